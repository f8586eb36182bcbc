//! 压缩数据包 (Packet).
//!
//! 表示从封装层读取的一段压缩数据.

use bytes::Bytes;

/// 未知时间戳
pub const NOPTS_VALUE: i64 = i64::MIN;

/// 压缩数据包
///
/// 一个 Packet 可以是一个原始数据块, 一个 ADTS 帧, 或者连续的若干 ADTS 帧.
#[derive(Debug, Clone)]
pub struct Packet {
    /// 压缩数据
    pub data: Bytes,
    /// 显示时间戳 (以采样为单位)
    pub pts: i64,
    /// 在输入中的字节偏移量 (-1 表示未知)
    pub pos: i64,
}

impl Packet {
    /// 创建空数据包
    pub fn empty() -> Self {
        Self {
            data: Bytes::new(),
            pts: NOPTS_VALUE,
            pos: -1,
        }
    }

    /// 从数据创建数据包
    pub fn from_data(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            ..Self::empty()
        }
    }

    /// 数据大小 (字节)
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// 是否为空包 (flush packet)
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
