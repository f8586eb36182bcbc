//! 解码后的音频帧.

use yin_core::{ChannelLayout, SampleFormat};

use crate::packet::NOPTS_VALUE;

/// 音频帧
///
/// 样本按声道交错排列, 以小端字节序存放在 `data` 中.
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// 交错排列的采样数据
    pub data: Vec<u8>,
    /// 本帧包含的采样数 (每声道)
    pub nb_samples: u32,
    /// 采样率 (Hz)
    pub sample_rate: u32,
    /// 采样格式
    pub sample_format: SampleFormat,
    /// 声道布局
    pub channel_layout: ChannelLayout,
    /// 显示时间戳 (以采样为单位)
    pub pts: i64,
}

impl AudioFrame {
    /// 创建空的音频帧
    pub fn new(
        nb_samples: u32,
        sample_rate: u32,
        sample_format: SampleFormat,
        channel_layout: ChannelLayout,
    ) -> Self {
        Self {
            data: Vec::new(),
            nb_samples,
            sample_rate,
            sample_format,
            channel_layout,
            pts: NOPTS_VALUE,
        }
    }

    /// 按 S16 解释 data
    pub fn samples_i16(&self) -> Option<Vec<i16>> {
        (self.sample_format == SampleFormat::S16).then(|| {
            self.data
                .chunks_exact(2)
                .map(|b| i16::from_le_bytes([b[0], b[1]]))
                .collect()
        })
    }

    /// 按 F32 解释 data
    pub fn samples_f32(&self) -> Option<Vec<f32>> {
        (self.sample_format == SampleFormat::F32).then(|| {
            self.data
                .chunks_exact(4)
                .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                .collect()
        })
    }
}
