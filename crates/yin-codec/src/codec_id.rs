//! 编解码器标识符.
//!
//! 为每种编解码算法分配唯一标识, 与封装格式无关.

use std::fmt;
use std::str::FromStr;

use yin_core::YinError;

/// 编解码器标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CodecId {
    /// 未知编解码器
    None,
    /// AAC (Advanced Audio Coding)
    Aac,
}

impl CodecId {
    /// 获取编解码器的人类可读名称
    pub const fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Aac => "aac",
        }
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CodecId {
    type Err = YinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aac" | "mp4a" => Ok(Self::Aac),
            other => Err(YinError::CodecNotFound(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_名称往返() {
        assert_eq!(CodecId::Aac.to_string(), "aac");
        assert_eq!("AAC".parse::<CodecId>().unwrap(), CodecId::Aac);
        assert_eq!("mp4a".parse::<CodecId>().unwrap(), CodecId::Aac);
        assert!("h264".parse::<CodecId>().is_err());
    }
}
