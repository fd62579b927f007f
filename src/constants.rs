/// 口令长度字段占用的位数。
/// 口令长度以 16 位无符号整数存储，最高位在前。
pub const PASSCODE_LENGTH_BITS: usize = 16;

/// 消息长度字段占用的位数。
/// 消息长度以 32 位无符号整数存储，位序与口令长度字段相同。
pub const MESSAGE_LENGTH_BITS: usize = 32;

/// 两个长度字段合计占用的位数，即任意容器的最小比特数。
pub const HEADER_BITS: usize = PASSCODE_LENGTH_BITS + MESSAGE_LENGTH_BITS;

/// 每个字符占用的位数。
/// 字符按单字节 (Latin-1) 处理，每个字节写入 8 个样本的最低有效位。
pub const BITS_PER_CHAR: usize = 8;

/// 16 位长度字段能表示的最大口令长度 (字节)。
pub const MAX_PASSCODE_LEN: usize = u16::MAX as usize;

/// 32 位长度字段能表示的最大消息长度 (字节)。
pub const MAX_MESSAGE_LEN: usize = u32::MAX as usize;

/// 未指定输出路径时，隐写图像文件名的前缀。
pub const DOCTORED_PREFIX: &str = "doctored_";

