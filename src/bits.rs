//! # 比特编解码模块
//!
//! 在整数、文本与比特序列之间做无损、保序的转换。
//! 所有比特序列均为最高有效位在前，每个元素取值为 0 或 1。

use crate::constants::BITS_PER_CHAR;
use crate::error::{Result, StegoError};

/// 将 `value` 编码为 `width` 位的比特序列，最高有效位在前。
///
/// 调用方须保证 `value < 2^width`，超出部分的高位会被丢弃。
pub fn encode_int(value: u64, width: usize) -> Vec<u8> {
    debug_assert!(width <= 64, "encode_int supports at most 64 bits");
    debug_assert!(
        width == 64 || value >> width == 0,
        "value {value} does not fit in {width} bits"
    );

    (0..width)
        .rev()
        .map(|shift| ((value >> shift) & 1) as u8)
        .collect()
}

/// 将比特序列按最高有效位在前的顺序解码为整数。
///
/// 序列的第 0 位是最高位，每个元素只取最低位，因此可以直接传入像素样本。
/// 超过 64 位的序列只保留最后 64 位。
pub fn decode_int(bits: &[u8]) -> u64 {
    bits.iter()
        .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit & 1))
}

/// 将字节序列编码为比特序列，每个字节 8 位，最高有效位在前。
pub fn encode_bytes(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .flat_map(|&byte| encode_int(u64::from(byte), BITS_PER_CHAR))
        .collect()
}

/// [`encode_bytes`] 的逆运算。末尾不足 8 位的部分会被忽略。
pub fn decode_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks_exact(BITS_PER_CHAR)
        .map(|chunk| decode_int(chunk) as u8)
        .collect()
}

/// 将文本转换为单字节序列，每个字符对应其码位值。
///
/// # Errors
///
/// 如果任一字符的码位大于 255，返回 [`StegoError::Encoding`]，`field` 用于指明出错的字段。
pub fn text_to_bytes(text: &str, field: &'static str) -> Result<Vec<u8>> {
    text.chars()
        .enumerate()
        .map(|(index, character)| {
            u8::try_from(u32::from(character)).map_err(|_| StegoError::Encoding {
                field,
                character,
                index,
            })
        })
        .collect()
}

/// 将单字节序列还原为文本，每个字节解释为同值码位的字符。
pub fn bytes_to_text(bytes: &[u8]) -> String {
    bytes.iter().map(|&byte| char::from(byte)).collect()
}

/// 将文本编码为 `8 * 字符数` 位的比特序列。
///
/// # Errors
///
/// 同 [`text_to_bytes`]。
pub fn encode_text(text: &str, field: &'static str) -> Result<Vec<u8>> {
    text_to_bytes(text, field).map(|bytes| encode_bytes(&bytes))
}

/// [`encode_text`] 的逆运算：每连续 8 位还原为一个字符。
pub fn decode_text(bits: &[u8]) -> String {
    debug_assert!(bits.len() % BITS_PER_CHAR == 0);
    bytes_to_text(&decode_bytes(bits))
}
