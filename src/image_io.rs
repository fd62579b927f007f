//! # 图像读写模块
//!
//! 使用 `image` 库在图像文件与 [`PixelGrid`] 之间转换。
//! 只接受无损格式输出，有损压缩会破坏最低有效位中的数据。

use crate::error::{Result, StegoError};
use crate::grid::PixelGrid;
use clap::ValueEnum;
use image::error::{ParameterError, ParameterErrorKind};
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};
use log::debug;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// 网格中每个像素的通道排列顺序。
///
/// 遍历顺序是文件格式的一部分，通道顺序不同会读出完全不同的比特流。
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChannelOrder {
    /// 蓝、绿、红。与基于 OpenCV 的同类工具生成的图像互通。
    #[default]
    Bgr,
    /// 红、绿、蓝。解码器的原生顺序。
    Rgb,
}

/// 读取图像文件并转换为 3 通道、每通道 8 位的网格。Alpha 通道会被丢弃。
///
/// # Errors
///
/// 无法打开文件或无法解码时返回错误。
pub fn load(path: &Path, order: ChannelOrder) -> Result<PixelGrid> {
    let reader = ImageReader::open(path)
        .map_err(|source| StegoError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .with_guessed_format()
        .map_err(|source| StegoError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let image = reader.decode().map_err(|source| StegoError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    debug!("loaded {}x{} image from {}", width, height, path.display());

    let mut samples = rgb.into_raw();
    if order == ChannelOrder::Bgr {
        swap_red_blue(&mut samples, 3);
    }

    PixelGrid::new(height as usize, width as usize, 3, samples)
}

/// 将网格编码为图像并写入 `path`，输出格式由扩展名决定。
///
/// 图像先在内存中完整编码，成功后才写入文件，失败时不会留下不完整的输出文件。
///
/// # Errors
///
/// * 扩展名不是受支持的无损格式。
/// * 网格通道数不是 1、3 或 4，或尺寸超出图像格式的范围。
/// * 编码或写入失败。
pub fn save(grid: &PixelGrid, path: &Path, order: ChannelOrder) -> Result<()> {
    let format = lossless_format(path)?;
    let encode_error = |source| StegoError::Encode {
        path: path.to_path_buf(),
        source,
    };

    let image = to_image(grid, order).ok_or_else(|| encode_error(dimension_mismatch()))?;

    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, format).map_err(encode_error)?;

    fs::write(path, buffer.into_inner()).map_err(|source| StegoError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("saved {:?} image to {}", format, path.display());
    Ok(())
}

/// 根据扩展名确定输出格式，只允许无损格式。
pub fn lossless_format(path: &Path) -> Result<ImageFormat> {
    match ImageFormat::from_path(path) {
        Ok(
            format @ (ImageFormat::Png
            | ImageFormat::Bmp
            | ImageFormat::Tiff
            | ImageFormat::Qoi
            | ImageFormat::WebP),
        ) => Ok(format),
        _ => Err(StegoError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

fn to_image(grid: &PixelGrid, order: ChannelOrder) -> Option<DynamicImage> {
    let (rows, cols, channels) = grid.dimensions();
    let width = u32::try_from(cols).ok()?;
    let height = u32::try_from(rows).ok()?;

    let mut samples = grid.samples().to_vec();
    if order == ChannelOrder::Bgr && channels >= 3 {
        swap_red_blue(&mut samples, channels);
    }

    match channels {
        1 => image::GrayImage::from_raw(width, height, samples).map(DynamicImage::ImageLuma8),
        3 => image::RgbImage::from_raw(width, height, samples).map(DynamicImage::ImageRgb8),
        4 => image::RgbaImage::from_raw(width, height, samples).map(DynamicImage::ImageRgba8),
        _ => None,
    }
}

fn swap_red_blue(samples: &mut [u8], channels: usize) {
    samples
        .chunks_exact_mut(channels)
        .for_each(|pixel| pixel.swap(0, 2));
}

fn dimension_mismatch() -> ImageError {
    ImageError::Parameter(ParameterError::from_kind(
        ParameterErrorKind::DimensionMismatch,
    ))
}
