//! # 容器布局模块
//!
//! 容器是写入像素最低有效位的比特流，严格按以下顺序排列：
//!
//! 1. 口令长度 (16 位)
//! 2. 口令 (每字节 8 位)
//! 3. 消息长度 (32 位)
//! 4. 消息 (每字节 8 位)
//!
//! 所有整数均为最高有效位在前。

use crate::bits::{encode_bytes, encode_int, text_to_bytes};
use crate::constants::{
    BITS_PER_CHAR, HEADER_BITS, MAX_MESSAGE_LEN, MAX_PASSCODE_LEN, MESSAGE_LENGTH_BITS,
    PASSCODE_LENGTH_BITS,
};
use crate::error::{Result, StegoError};

/// 口令与消息组成的一个容器。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub passcode: String,
    pub message: String,
}

/// 给定口令与消息的字节数，计算容器所需的总位数。
pub fn required_bits(passcode_len: usize, message_len: usize) -> usize {
    HEADER_BITS + (passcode_len + message_len) * BITS_PER_CHAR
}

impl Container {
    /// 构造一个待嵌入的容器，并校验口令与消息。
    ///
    /// # Errors
    ///
    /// * 口令或消息为空。
    /// * 含有码位大于 255 的字符。
    /// * 长度超出对应长度字段的表示范围。
    pub fn new(passcode: impl Into<String>, message: impl Into<String>) -> Result<Self> {
        let container = Self {
            passcode: passcode.into(),
            message: message.into(),
        };
        container.field_bytes()?;
        Ok(container)
    }

    /// 校验口令与消息，并一次性转换为单字节序列 `(passcode, message)`。
    fn field_bytes(&self) -> Result<(Vec<u8>, Vec<u8>)> {
        if self.passcode.is_empty() {
            return Err(StegoError::EmptyPasscode);
        }
        if self.message.is_empty() {
            return Err(StegoError::EmptyMessage);
        }
        let passcode = checked_bytes("passcode", &self.passcode, MAX_PASSCODE_LEN)?;
        let message = checked_bytes("message", &self.message, MAX_MESSAGE_LEN)?;
        Ok((passcode, message))
    }

    /// 容器编码后的总位数。
    pub fn bit_len(&self) -> usize {
        required_bits(self.passcode.chars().count(), self.message.chars().count())
    }

    /// 按容器布局生成完整比特流。
    ///
    /// # Errors
    ///
    /// 与 [`Container::new`] 相同；直接构造的结构体在这里校验。
    pub fn to_bits(&self) -> Result<Vec<u8>> {
        let (passcode, message) = self.field_bytes()?;

        let mut bits = Vec::with_capacity(required_bits(passcode.len(), message.len()));
        bits.extend(encode_int(passcode.len() as u64, PASSCODE_LENGTH_BITS));
        bits.extend(encode_bytes(&passcode));
        bits.extend(encode_int(message.len() as u64, MESSAGE_LENGTH_BITS));
        bits.extend(encode_bytes(&message));
        Ok(bits)
    }
}

fn checked_bytes(field: &'static str, text: &str, max: usize) -> Result<Vec<u8>> {
    let bytes = text_to_bytes(text, field)?;
    if bytes.len() > max {
        return Err(StegoError::TooLong {
            field,
            len: bytes.len(),
            max,
        });
    }
    Ok(bytes)
}
