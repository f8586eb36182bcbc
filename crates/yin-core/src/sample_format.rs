//! 音频采样格式定义.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::YinError;

/// 输出采样格式 (交错排列)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum SampleFormat {
    /// 有符号 16 位整数
    S16,
    /// 有符号 32 位整数
    S32,
    /// 32 位浮点
    #[default]
    F32,
}

impl SampleFormat {
    /// 每个采样点占用的字节数
    pub const fn bytes_per_sample(&self) -> u32 {
        match self {
            Self::S16 => 2,
            Self::S32 | Self::F32 => 4,
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::S16 => "s16",
            Self::S32 => "s32",
            Self::F32 => "f32",
        };
        write!(f, "{name}")
    }
}

impl FromStr for SampleFormat {
    type Err = YinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "s16" => Ok(Self::S16),
            "s32" => Ok(Self::S32),
            "f32" | "flt" => Ok(Self::F32),
            other => Err(YinError::InvalidArgument(format!("未知采样格式: {other}"))),
        }
    }
}
