//! 编解码器参数.
//!
//! 描述解码器的配置参数, 通常由封装层提供.

use yin_core::{ChannelLayout, SampleFormat};

use crate::codec_id::CodecId;

/// 编解码器参数
#[derive(Debug, Clone)]
pub struct CodecParameters {
    /// 编解码器标识
    pub codec_id: CodecId,
    /// 额外数据 (AAC 为 AudioSpecificConfig)
    pub extra_data: Vec<u8>,
    /// 码率 (bits/s)
    pub bit_rate: u64,
    /// 音频参数, 未知时为 None
    pub audio: Option<AudioCodecParams>,
}

/// 音频编解码器参数
#[derive(Debug, Clone)]
pub struct AudioCodecParams {
    /// 采样率 (Hz)
    pub sample_rate: u32,
    /// 声道布局
    pub channel_layout: ChannelLayout,
    /// 期望的输出采样格式
    pub sample_format: SampleFormat,
    /// 每帧采样数 (0 表示可变)
    pub frame_size: u32,
}

impl CodecParameters {
    /// 只带 AudioSpecificConfig 的参数
    pub fn with_extra_data(codec_id: CodecId, extra_data: impl Into<Vec<u8>>) -> Self {
        Self {
            codec_id,
            extra_data: extra_data.into(),
            bit_rate: 0,
            audio: None,
        }
    }
}
