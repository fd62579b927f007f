//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::image_io::ChannelOrder;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用口令保护隐藏在无损格式图像 (如 PNG, BMP) 中的文本。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用口令保护隐藏在无损格式图像 (如 PNG, BMP) 中的文本。\n口令以明文形式保存在图像中，仅用于访问控制，不是加密密钥。"
)]
pub struct Cli {
    /// 输出更详细的日志 (可重复使用，如 -vv)。
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// 只输出错误信息。
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 capacity (容量)。
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 在无损格式图像中隐藏受口令保护的文本。
    Hide(HideArgs),

    /// 输入正确口令后，从经过隐写的图像中恢复隐藏的文本。
    Recover(RecoverArgs),

    /// 显示图像最多能隐藏多少字节。
    Capacity(CapacityArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Args, Debug)]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文本内容。
    #[arg(short, long, conflicts_with = "text", required_unless_present = "text")]
    pub message: Option<String>,

    /// 要隐藏的文本内容的文件路径。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 恢复文本时需要输入的口令。省略时从环境变量读取，或在终端中输入 (不回显)。
    #[arg(short, long, env = "LSB_LOCK_PASSCODE", hide_env_values = true)]
    pub passcode: Option<String>,

    /// 隐写完成后，保存结果图像的输出路径。默认为输入图像同目录下的 `doctored_<文件名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    /// 像素通道的遍历顺序。
    #[arg(short, long, value_enum, default_value_t = ChannelOrder::Bgr)]
    pub channel_order: ChannelOrder,
}

/// 'recover' 命令所需的参数。
#[derive(Args, Debug)]
pub struct RecoverArgs {
    /// 已隐藏文本数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 隐藏文本时设置的口令。省略时从环境变量读取，或在终端中输入 (不回显)。
    #[arg(short, long, env = "LSB_LOCK_PASSCODE", hide_env_values = true)]
    pub passcode: Option<String>,

    /// 恢复文本后，保存文本内容的输出路径。省略时直接打印到标准输出。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    /// 像素通道的遍历顺序，须与隐藏时一致。
    #[arg(short, long, value_enum, default_value_t = ChannelOrder::Bgr)]
    pub channel_order: ChannelOrder,
}

/// 'capacity' 命令所需的参数。
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// 要检查的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,
}
