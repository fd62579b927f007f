//! # lsb_lock 库
//!
//! 本库包含口令保护的 LSB 隐写工具的核心逻辑。

// 声明库包含的所有模块。

pub mod bits;
pub mod cli;
pub mod constants;
pub mod container;
pub mod error;
pub mod grid;
pub mod handler;
pub mod image_io;
pub mod steganography;

pub use container::Container;
pub use error::StegoError;
pub use grid::PixelGrid;
