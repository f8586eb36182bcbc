//! 统一错误类型定义.
//!
//! 所有 Yin crate 共用的错误类型, 支持跨模块传播.

use std::fmt;

use thiserror::Error;

/// 码流故障分类
///
/// 解码器内部的具体故障 (例如 AAC 的各类语法错误) 归入以下几类之一.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultClass {
    /// 语法错误 (非法码本, 分组不一致, 越界的边带信息)
    MalformedSyntax,
    /// 比特游标越过缓冲区末尾
    BufferExhausted,
    /// 解码不一致 (非法码字, 反量化溢出, LTP 延迟越界)
    DecodeInconsistency,
    /// 当前构建或对象类型不支持该工具
    Unsupported,
    /// 调用方提供的输出缓冲区不足
    OutputTooSmall,
}

impl fmt::Display for FaultClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MalformedSyntax => "语法错误",
            Self::BufferExhausted => "缓冲区耗尽",
            Self::DecodeInconsistency => "解码不一致",
            Self::Unsupported => "不支持",
            Self::OutputTooSmall => "输出缓冲区不足",
        };
        write!(f, "{name}")
    }
}

/// Yin 框架统一错误类型
#[derive(Debug, Error)]
pub enum YinError {
    /// 无效参数
    #[error("无效参数: {0}")]
    InvalidArgument(String),

    /// 不支持的操作
    #[error("不支持的操作: {0}")]
    Unsupported(String),

    /// I/O 错误
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 数据不足, 需要更多输入
    #[error("数据不足, 需要更多输入")]
    NeedMoreData,

    /// 已到达流末尾
    #[error("已到达流末尾")]
    Eof,

    /// 未找到指定的编解码器
    #[error("未找到编解码器: {0}")]
    CodecNotFound(String),

    /// 无效数据 (损坏的码流等)
    #[error("无效数据: {0}")]
    InvalidData(String),

    /// 解码器报告的码流故障, 带稳定的数值编码
    #[error("码流故障 #{code} ({class}): {message}")]
    Fault {
        code: u8,
        class: FaultClass,
        message: String,
    },
}

impl YinError {
    /// 码流故障编码, 非故障类错误返回 None
    pub fn fault_code(&self) -> Option<u8> {
        match self {
            Self::Fault { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Yin 框架统一 Result 类型
pub type YinResult<T> = Result<T, YinError>;
