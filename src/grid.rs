//! # 像素网格模块
//!
//! 以 (行, 列, 通道) 索引的 8 位样本数组，行优先、通道在最内层。
//! 扁平存储的顺序即隐写时遍历样本的顺序。

use crate::error::{Result, StegoError};

/// 调用方持有的像素样本网格。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    rows: usize,
    cols: usize,
    channels: usize,
    samples: Vec<u8>,
}

impl PixelGrid {
    /// 用已有的样本缓冲区构造网格。
    ///
    /// # Errors
    ///
    /// 缓冲区长度不等于 `rows * cols * channels` 时返回 [`StegoError::InvalidGrid`]。
    pub fn new(rows: usize, cols: usize, channels: usize, samples: Vec<u8>) -> Result<Self> {
        let expected = rows
            .checked_mul(cols)
            .and_then(|n| n.checked_mul(channels));

        match expected {
            Some(expected) if expected == samples.len() => Ok(Self {
                rows,
                cols,
                channels,
                samples,
            }),
            _ => Err(StegoError::InvalidGrid {
                rows,
                cols,
                channels,
                expected: expected.unwrap_or(usize::MAX),
                actual: samples.len(),
            }),
        }
    }

    /// 构造所有样本都为 `value` 的网格。
    pub fn filled(rows: usize, cols: usize, channels: usize, value: u8) -> Self {
        Self {
            rows,
            cols,
            channels,
            samples: vec![value; rows * cols * channels],
        }
    }

    /// 返回 `(rows, cols, channels)`。
    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.rows, self.cols, self.channels)
    }

    /// 样本总数，即最多可嵌入的位数。
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn get(&self, row: usize, col: usize, channel: usize) -> Option<u8> {
        if row >= self.rows || col >= self.cols || channel >= self.channels {
            return None;
        }
        self.samples
            .get((row * self.cols + col) * self.channels + channel)
            .copied()
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_layout_is_row_major_channel_minor() {
        let grid = PixelGrid::new(2, 2, 3, (0..12).collect()).unwrap();
        assert_eq!(grid.get(0, 0, 2), Some(2));
        assert_eq!(grid.get(0, 1, 0), Some(3));
        assert_eq!(grid.get(1, 0, 0), Some(6));
        assert_eq!(grid.get(1, 1, 2), Some(11));
        assert_eq!(grid.get(2, 0, 0), None);
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        let err = PixelGrid::new(4, 4, 3, vec![0; 47]).unwrap_err();
        assert!(matches!(
            err,
            StegoError::InvalidGrid {
                expected: 48,
                actual: 47,
                ..
            }
        ));
    }
}
