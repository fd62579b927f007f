//! # 隐写核心模块
//!
//! 按行、列、通道的顺序遍历样本，每个样本的最低有效位承载一个比特。
//! 嵌入与提取必须使用完全相同的遍历顺序。

use crate::bits::{decode_int, decode_text};
use crate::constants::{BITS_PER_CHAR, HEADER_BITS, MESSAGE_LENGTH_BITS, PASSCODE_LENGTH_BITS};
use crate::container::Container;
use crate::error::{Result, StegoError};
use crate::grid::PixelGrid;
use log::debug;

/// 网格的隐写容量。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    /// 可用的总位数 (样本数)。
    pub total_bits: usize,
    /// 两个长度字段占用的位数。
    pub header_bits: usize,
    /// 口令与消息合计最多可容纳的字节数。
    pub max_payload_bytes: usize,
}

/// 计算网格最多能容纳多少口令与消息字节。
pub fn capacity(grid: &PixelGrid) -> Capacity {
    let total_bits = grid.sample_count();
    Capacity {
        total_bits,
        header_bits: HEADER_BITS,
        max_payload_bytes: total_bits.saturating_sub(HEADER_BITS) / BITS_PER_CHAR,
    }
}

/// 将口令与消息嵌入网格，返回写入的位数。
///
/// # Errors
///
/// * 口令或消息为空、含有单字节范围以外的字符、长度超出长度字段。
/// * 比特流长度超过样本总数。此时网格不会被修改。
pub fn embed(grid: &mut PixelGrid, passcode: &str, message: &str) -> Result<usize> {
    // 校验在 to_bits 中完成。
    let container = Container {
        passcode: passcode.to_owned(),
        message: message.to_owned(),
    };
    embed_container(grid, &container)
}

/// 将一个已构造的容器嵌入网格，返回写入的位数。
pub fn embed_container(grid: &mut PixelGrid, container: &Container) -> Result<usize> {
    let bits = container.to_bits()?;
    let available = grid.sample_count();

    if bits.len() > available {
        return Err(StegoError::Capacity {
            required: bits.len(),
            available,
        });
    }

    debug!(
        "embedding {} bits into {} samples (passcode {} bytes, message {} bytes)",
        bits.len(),
        available,
        container.passcode.chars().count(),
        container.message.chars().count()
    );

    // zip 在比特流耗尽时停止，其余样本保持原值。
    grid.samples_mut()
        .iter_mut()
        .zip(&bits)
        .for_each(|(sample, &bit)| *sample = (*sample & 0xFE) | bit);

    Ok(bits.len())
}

/// 从网格中提取口令与消息。本函数不比较口令。
///
/// # Errors
///
/// 头部声明的长度超出剩余样本时返回 [`StegoError::Truncated`]。
pub fn extract(grid: &PixelGrid) -> Result<Container> {
    let mut reader = LsbReader::new(grid.samples());

    let passcode_len = decode_int(reader.take(PASSCODE_LENGTH_BITS, "passcode length")?) as usize;
    debug!("passcode length: {passcode_len}");
    let passcode = decode_text(reader.take(passcode_len * BITS_PER_CHAR, "passcode")?);

    let message_len = decode_int(reader.take(MESSAGE_LENGTH_BITS, "message length")?) as usize;
    debug!("message length: {message_len}");
    let message_bits = message_len
        .checked_mul(BITS_PER_CHAR)
        .ok_or(StegoError::Truncated {
            field: "message",
            required: usize::MAX,
            available: reader.remaining(),
        })?;
    let message = decode_text(reader.take(message_bits, "message")?);

    debug!("extracted {} bits", reader.position());
    Ok(Container { passcode, message })
}

/// 提取容器并与用户输入的口令比较，匹配时返回消息。
///
/// # Errors
///
/// * 输入口令为空。
/// * 提取失败 (见 [`extract`])。
/// * 口令不匹配，此时不会泄露消息内容。
pub fn unlock(grid: &PixelGrid, passcode_guess: &str) -> Result<String> {
    if passcode_guess.is_empty() {
        return Err(StegoError::EmptyPasscode);
    }

    let container = extract(grid)?;
    if container.passcode != passcode_guess {
        return Err(StegoError::PasscodeMismatch);
    }
    Ok(container.message)
}

/// 顺序读取样本最低有效位的游标。只借用样本，最低位在解码时取出。
struct LsbReader<'a> {
    samples: &'a [u8],
    cursor: usize,
}

impl<'a> LsbReader<'a> {
    fn new(samples: &'a [u8]) -> Self {
        Self { samples, cursor: 0 }
    }

    fn remaining(&self) -> usize {
        self.samples.len() - self.cursor
    }

    fn position(&self) -> usize {
        self.cursor
    }

    fn take(&mut self, count: usize, field: &'static str) -> Result<&'a [u8]> {
        let available = self.remaining();
        if count > available {
            return Err(StegoError::Truncated {
                field,
                required: count,
                available,
            });
        }

        let start = self.cursor;
        self.cursor += count;
        Ok(&self.samples[start..self.cursor])
    }
}
