//! 音频声道布局定义.
//!
//! 覆盖 AAC 声道配置 1-7 对应的扬声器排列.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// 声道位掩码, 每个位代表一个扬声器位置
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ChannelMask: u64 {
        /// 前方左声道
        const FRONT_LEFT    = 1 << 0;
        /// 前方右声道
        const FRONT_RIGHT   = 1 << 1;
        /// 前方中央声道
        const FRONT_CENTER  = 1 << 2;
        /// 低频效果 (LFE / 重低音)
        const LOW_FREQUENCY = 1 << 3;
        /// 后方左声道
        const BACK_LEFT     = 1 << 4;
        /// 后方右声道
        const BACK_RIGHT    = 1 << 5;
        /// 后方中央声道
        const BACK_CENTER   = 1 << 8;
        /// 侧方左声道
        const SIDE_LEFT     = 1 << 9;
        /// 侧方右声道
        const SIDE_RIGHT    = 1 << 10;
    }
}

/// 声道布局
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelLayout {
    /// 声道数量
    pub channels: u32,
    /// 声道位掩码 (非标准布局为空)
    pub mask: ChannelMask,
}

impl ChannelLayout {
    /// 单声道
    pub const MONO: Self = Self {
        channels: 1,
        mask: ChannelMask::FRONT_CENTER,
    };

    /// 立体声 (左右)
    pub const STEREO: Self = Self {
        channels: 2,
        mask: ChannelMask::FRONT_LEFT.union(ChannelMask::FRONT_RIGHT),
    };

    /// 3.0 (中左右)
    pub const SURROUND_3_0: Self = Self {
        channels: 3,
        mask: ChannelMask::FRONT_CENTER
            .union(ChannelMask::FRONT_LEFT)
            .union(ChannelMask::FRONT_RIGHT),
    };

    /// 4.0 (中左右 + 后中)
    pub const SURROUND_4_0: Self = Self {
        channels: 4,
        mask: ChannelMask::FRONT_CENTER
            .union(ChannelMask::FRONT_LEFT)
            .union(ChannelMask::FRONT_RIGHT)
            .union(ChannelMask::BACK_CENTER),
    };

    /// 5.0
    pub const SURROUND_5_0: Self = Self {
        channels: 5,
        mask: ChannelMask::FRONT_CENTER
            .union(ChannelMask::FRONT_LEFT)
            .union(ChannelMask::FRONT_RIGHT)
            .union(ChannelMask::BACK_LEFT)
            .union(ChannelMask::BACK_RIGHT),
    };

    /// 5.1 环绕声
    pub const SURROUND_5_1: Self = Self {
        channels: 6,
        mask: ChannelMask::FRONT_LEFT
            .union(ChannelMask::FRONT_RIGHT)
            .union(ChannelMask::FRONT_CENTER)
            .union(ChannelMask::LOW_FREQUENCY)
            .union(ChannelMask::BACK_LEFT)
            .union(ChannelMask::BACK_RIGHT),
    };

    /// 7.1 环绕声
    pub const SURROUND_7_1: Self = Self {
        channels: 8,
        mask: ChannelMask::FRONT_LEFT
            .union(ChannelMask::FRONT_RIGHT)
            .union(ChannelMask::FRONT_CENTER)
            .union(ChannelMask::LOW_FREQUENCY)
            .union(ChannelMask::BACK_LEFT)
            .union(ChannelMask::BACK_RIGHT)
            .union(ChannelMask::SIDE_LEFT)
            .union(ChannelMask::SIDE_RIGHT),
    };

    /// 根据声道数创建默认布局
    pub fn from_channels(channels: u32) -> Self {
        match channels {
            1 => Self::MONO,
            2 => Self::STEREO,
            3 => Self::SURROUND_3_0,
            4 => Self::SURROUND_4_0,
            5 => Self::SURROUND_5_0,
            6 => Self::SURROUND_5_1,
            8 => Self::SURROUND_7_1,
            n => Self {
                channels: n,
                mask: ChannelMask::empty(),
            },
        }
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MONO => write!(f, "mono"),
            Self::STEREO => write!(f, "stereo"),
            Self::SURROUND_5_1 => write!(f, "5.1"),
            Self::SURROUND_7_1 => write!(f, "7.1"),
            _ => write!(f, "{}ch", self.channels),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_声道数与掩码一致() {
        for n in [1u32, 2, 3, 4, 5, 6, 8] {
            let layout = ChannelLayout::from_channels(n);
            assert_eq!(layout.mask.bits().count_ones(), n);
        }
        assert!(ChannelLayout::from_channels(7).mask.is_empty());
        assert_eq!(ChannelLayout::from_channels(6).to_string(), "5.1");
    }
}
