//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::constants::DOCTORED_PREFIX;
use crate::error::StegoError;
use crate::grid::PixelGrid;
use crate::image_io::{self, ChannelOrder};
use crate::steganography::{capacity, embed, unlock};
use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和待隐藏的文本、调用隐写核心函数写入口令与消息，
/// 最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径、消息与口令的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入的图像或文本文件。
/// * 口令或消息为空，或含有单字节范围以外的字符。
/// * 图像文件没有足够的空间来隐藏口令与消息。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = match args.dest {
        Some(dest) => dest,
        None => default_dest(&args.image)?,
    };
    ensure_writable(&dest, args.force)?;
    image_io::lossless_format(&dest)?;

    let message = match (args.message, &args.text) {
        (Some(message), _) => message,
        (None, Some(text)) => fs::read_to_string(text).with_context(|| {
            format!(
                "Unable to read text file: {}",
                text.to_string_lossy().red().bold()
            )
        })?,
        (None, None) => anyhow::bail!("Either --message or --text must be provided."),
    };

    let passcode = resolve_passcode(args.passcode, true)?;
    let mut grid = load_grid(&args.image, args.channel_order)?;

    let written = embed(&mut grid, &passcode, &message).map_err(|err| match err {
        StegoError::Capacity {
            required,
            available,
        } => anyhow::anyhow!(
            "Not enough space in the image to hide the text. \nRequired: {} bits, Available: {} bits",
            required.to_string().red().bold(),
            available.to_string().green().bold()
        ),
        other => anyhow::Error::new(other).context("Failed to hide the message in the image."),
    })?;
    info!("{written} bits written to {}", args.image.display());

    image_io::save(&grid, &dest, args.channel_order).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、提取口令并与用户输入比较，
/// 口令匹配时将恢复的文本写入目标文件或打印到标准输出。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 图像中没有有效的容器或数据已损坏。
/// * 口令不正确。
/// * 无法写入到目标文本文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    if let Some(text) = &args.text {
        ensure_writable(text, args.force)?;
    }

    let passcode = resolve_passcode(args.passcode, false)?;
    let grid = load_grid(&args.image, args.channel_order)?;

    let message = unlock(&grid, &passcode).map_err(|err| match err {
        StegoError::EmptyPasscode => anyhow::anyhow!(
            "The passcode must not be empty. \nEnter the passcode that was set when the text was hidden."
        ),
        StegoError::PasscodeMismatch => anyhow::anyhow!(
            "Incorrect passcode for {}.",
            args.image.to_string_lossy().red().bold()
        ),
        other => anyhow::Error::new(other).context(format!(
            "Failed to recover the message from '{}'. \nThe image may not contain a hidden message or is corrupted.",
            args.image.to_string_lossy().red().bold()
        )),
    })?;

    match &args.text {
        Some(text) => {
            fs::write(text, &message).with_context(|| {
                format!(
                    "Unable to write to target text file: {}",
                    text.to_string_lossy().red().bold()
                )
            })?;
            println!(
                "The text has been successfully recovered and saved: {}",
                text.to_string_lossy().green().bold()
            );
        }
        None => println!("{message}"),
    }

    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑，打印图像的样本数与最大可隐藏字节数。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let grid = load_grid(&args.image, ChannelOrder::default())?;
    let (rows, cols, channels) = grid.dimensions();
    let report = capacity(&grid);

    println!(
        "Image: {} ({}x{}x{})",
        args.image.to_string_lossy().green().bold(),
        rows,
        cols,
        channels
    );
    println!(
        "Available bits: {}, header bits: {}",
        report.total_bits.to_string().green().bold(),
        report.header_bits
    );
    println!(
        "Passcode and message may hold up to {} bytes combined.",
        report.max_payload_bytes.to_string().green().bold()
    );

    Ok(())
}

fn load_grid(image: &Path, order: ChannelOrder) -> Result<PixelGrid> {
    image_io::load(image, order).with_context(|| {
        format!(
            "Unable to read image file: {}",
            image.to_string_lossy().red().bold()
        )
    })
}

/// 未通过参数或环境变量提供口令时，在终端中提示输入 (不回显)。
/// `confirm` 为真时要求再输入一次，两次不一致则报错。
fn resolve_passcode(passcode: Option<String>, confirm: bool) -> Result<String> {
    if let Some(passcode) = passcode {
        return Ok(passcode);
    }

    let passcode =
        rpassword::prompt_password("Passcode: ").context("Unable to read the passcode.")?;
    if confirm {
        let again = rpassword::prompt_password("Repeat passcode: ")
            .context("Unable to read the passcode.")?;
        anyhow::ensure!(passcode == again, "The two passcodes do not match.");
    }
    Ok(passcode)
}

/// 目标文件已存在时，除非指定 `--force`，否则拒绝覆盖。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 生成默认的输出路径：输入图像同目录下的 `doctored_<文件名>.png`。
fn default_dest(image: &Path) -> Result<PathBuf> {
    let stem = image.file_stem().with_context(|| {
        format!(
            "Unable to derive an output name from: {}",
            image.to_string_lossy().red().bold()
        )
    })?;
    let name = format!("{DOCTORED_PREFIX}{}.png", stem.to_string_lossy());
    Ok(image.with_file_name(name))
}
