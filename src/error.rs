//! # 错误类型模块
//!
//! 定义隐写核心的全部失败情形。命令层使用 `anyhow` 为这些错误附加上下文。

use std::path::PathBuf;
use thiserror::Error;

/// 隐写核心以及图像读写过程中可能出现的错误。
#[derive(Error, Debug)]
pub enum StegoError {
    #[error("The passcode must not be empty.")]
    EmptyPasscode,

    #[error("The secret message must not be empty.")]
    EmptyMessage,

    /// 字符超出单字节范围 (U+0000..=U+00FF)。
    #[error(
        "The {field} contains {character:?} (U+{:04X}) at index {index}, which is outside the single-byte range.",
        code_point(.character)
    )]
    Encoding {
        field: &'static str,
        character: char,
        index: usize,
    },

    /// 长度超出头部长度字段的表示范围。
    #[error("The {field} is {len} bytes long, but at most {max} bytes can be stored.")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("Not enough space in the image. Required: {required} bits, Available: {available} bits")]
    Capacity { required: usize, available: usize },

    /// 头部声明的长度超出了图像中实际可读取的位数。
    #[error(
        "Not a valid container or the image is corrupted: the {field} needs {required} bits, but only {available} remain."
    )]
    Truncated {
        field: &'static str,
        required: usize,
        available: usize,
    },

    #[error("Incorrect passcode.")]
    PasscodeMismatch,

    #[error("A {rows}x{cols}x{channels} grid needs {expected} samples, but {actual} were supplied.")]
    InvalidGrid {
        rows: usize,
        cols: usize,
        channels: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Unable to decode image file: {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Unable to encode image file: {path}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Unsupported output format for {path}: only lossless formats (png, bmp, tiff, qoi, webp) keep the hidden bits intact.")]
    UnsupportedFormat { path: PathBuf },

    #[error("File operation failed: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn code_point(character: &char) -> u32 {
    u32::from(*character)
}

pub type Result<T> = std::result::Result<T, StegoError>;
