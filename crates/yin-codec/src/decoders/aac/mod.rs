//! MPEG-4/2 AAC 音频解码器.
//!
//! 支持 Main, LC, SSR, LTP, ER-LC, ER-LTP 与 LD 对象类型, 输入可以是
//! 原始数据块 (配合 AudioSpecificConfig), ADTS 帧或 ADIF 流.
//!
//! # 解码流程
//! 1. 解析流配置 (AudioSpecificConfig / ADTS / ADIF 头)
//! 2. 解析 raw_data_block: SCE/CPE/LFE 元素, ICS 边信息, 频谱码字 (含 HCR/RVLC)
//! 3. 反量化与缩放因子, 短窗解交织
//! 4. PNS, M/S 与强度立体声
//! 5. Main 预测或 LTP, TNS, DRC
//! 6. IMDCT, 加窗与重叠相加
//!
//! 重建管线对数值类型泛型 ([`real::Real`]), 同时提供 f32 与 Q 格式定点实现.

pub mod config;
pub mod drc;
pub mod extension;
pub mod fault;
pub mod fft;
pub mod filterbank;
pub mod hcr;
pub mod header;
pub mod huffman;
pub mod ics;
pub mod ltp;
pub mod mdct;
pub mod pce;
pub mod pns;
pub mod prediction;
pub mod real;
pub mod rvlc;
pub mod session;
pub mod side_info;
pub mod specrec;
pub mod stereo;
pub mod syntax;
pub mod tables;
pub mod tns;

use std::collections::VecDeque;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use yin_core::{ChannelLayout, SampleFormat, YinError, YinResult};

use crate::codec_id::CodecId;
use crate::codec_parameters::CodecParameters;
use crate::decoder::Decoder;
use crate::frame::AudioFrame;
use crate::packet::{NOPTS_VALUE, Packet};

pub use config::{FrameConfig, ObjectType};
pub use drc::DrcGain;
pub use fault::{AacFault, AacResult};
pub use header::HeaderType;
pub use real::{Fixed, Real};
pub use session::{AacSession, DecodedFrame, FrameInfo};

/// 重建管线使用的数值类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Float,
    Fixed,
}

/// 解码器选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderOptions {
    pub output: OutputMode,
    /// `Decoder` 输出的采样格式
    pub sample_format: SampleFormat,
    /// DRC 压缩系数
    pub drc_cut: f64,
    /// DRC 提升系数
    pub drc_boost: f64,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            output: OutputMode::Float,
            sample_format: SampleFormat::F32,
            drc_cut: 1.0,
            drc_boost: 1.0,
        }
    }
}

/// 两种数值路径的会话
#[derive(Debug)]
enum Engine {
    Float(AacSession<f32>),
    Fixed(AacSession<Fixed>),
}

/// 用同一段代码处理两种会话
macro_rules! with_session {
    ($engine:expr, $s:ident => $body:expr) => {
        match $engine {
            Engine::Float($s) => $body,
            Engine::Fixed($s) => $body,
        }
    };
}

impl Engine {
    fn from_config(options: &DecoderOptions, config: FrameConfig) -> YinResult<Self> {
        let mut engine = match options.output {
            OutputMode::Float => Engine::Float(AacSession::new(config)?),
            OutputMode::Fixed => Engine::Fixed(AacSession::new(config)?),
        };
        engine.set_drc(options);
        Ok(engine)
    }

    /// 按码流头初始化, 返回应跳过的字节数
    fn probe(options: &DecoderOptions, data: &[u8]) -> YinResult<(Self, usize)> {
        let (mut engine, skip) = match options.output {
            OutputMode::Float => {
                let (s, skip) = AacSession::probe(data)?;
                (Engine::Float(s), skip)
            }
            OutputMode::Fixed => {
                let (s, skip) = AacSession::probe(data)?;
                (Engine::Fixed(s), skip)
            }
        };
        engine.set_drc(options);
        Ok((engine, skip))
    }

    fn set_drc(&mut self, options: &DecoderOptions) {
        let gain = DrcGain::new(options.drc_cut, options.drc_boost);
        with_session!(self, s => s.set_drc(gain));
    }

    fn config(&self) -> &FrameConfig {
        with_session!(self, s => s.config())
    }

    fn header_type(&self) -> HeaderType {
        with_session!(self, s => s.header_type())
    }

    fn reset(&mut self) {
        with_session!(self, s => s.reset());
    }

    fn decode(&mut self, data: &[u8], format: SampleFormat) -> YinResult<(FrameInfo, Vec<u8>)> {
        with_session!(self, s => {
            let frame = s.decode_frame(data)?;
            let bytes = encode_samples(&frame, format)?;
            Ok((frame.info, bytes))
        })
    }
}

/// 把一帧样本转换为交错的小端字节
fn encode_samples<R: Real>(frame: &DecodedFrame<R>, format: SampleFormat) -> YinResult<Vec<u8>> {
    let bytes = match format {
        SampleFormat::F32 => frame
            .interleaved_f32()
            .into_iter()
            .flat_map(f32::to_le_bytes)
            .collect(),
        SampleFormat::S16 => frame
            .interleaved_i16()
            .into_iter()
            .flat_map(i16::to_le_bytes)
            .collect(),
        SampleFormat::S32 => frame
            .interleaved_i16()
            .into_iter()
            .flat_map(|v| (i32::from(v) << 16).to_le_bytes())
            .collect(),
        other => {
            return Err(YinError::Unsupported(format!("AAC: 输出采样格式 {other}")));
        }
    };
    Ok(bytes)
}

/// 实现 [`Decoder`] 的 AAC 解码器
pub struct AacDecoder {
    name: &'static str,
    options: DecoderOptions,
    engine: Option<Engine>,
    pending: VecDeque<AudioFrame>,
    flushing: bool,
    next_pts: i64,
    last_info: Option<FrameInfo>,
}

impl AacDecoder {
    pub fn with_options(options: DecoderOptions) -> Self {
        Self {
            name: match options.output {
                OutputMode::Float => "aac",
                OutputMode::Fixed => "aac_fixed",
            },
            options,
            engine: None,
            pending: VecDeque::new(),
            flushing: false,
            next_pts: 0,
            last_info: None,
        }
    }

    /// 创建浮点 AAC 解码器实例
    pub fn create() -> YinResult<Box<dyn Decoder>> {
        Ok(Box::new(Self::with_options(DecoderOptions::default())))
    }

    /// 创建定点 AAC 解码器实例
    pub fn create_fixed() -> YinResult<Box<dyn Decoder>> {
        Ok(Box::new(Self::with_options(DecoderOptions {
            output: OutputMode::Fixed,
            ..Default::default()
        })))
    }

    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// 当前流配置, 尚未初始化时为 None
    pub fn stream_config(&self) -> Option<&FrameConfig> {
        self.engine.as_ref().map(Engine::config)
    }

    /// 最近一帧的状态报告
    pub fn last_frame_info(&self) -> Option<&FrameInfo> {
        self.last_info.as_ref()
    }

    fn push_frame(&mut self, info: &FrameInfo, data: Vec<u8>) {
        let layout = match self.engine.as_ref().map(Engine::config) {
            Some(cfg) if cfg.channels() == info.channels => cfg.channel_layout(),
            _ => ChannelLayout::from_channels(info.channels as u32),
        };
        let mut frame = AudioFrame::new(
            info.samples as u32,
            info.sample_rate,
            self.options.sample_format,
            layout,
        );
        frame.data = data;
        frame.pts = self.next_pts;
        self.next_pts += info.samples as i64;
        self.pending.push_back(frame);
    }
}

impl Decoder for AacDecoder {
    fn codec_id(&self) -> CodecId {
        CodecId::Aac
    }

    fn name(&self) -> &str {
        self.name
    }

    fn open(&mut self, params: &CodecParameters) -> YinResult<()> {
        if let Some(audio) = &params.audio {
            self.options.sample_format = audio.sample_format;
        }
        if !params.extra_data.is_empty() {
            let config = FrameConfig::from_audio_specific_config(&params.extra_data)?;
            self.engine = Some(Engine::from_config(&self.options, config)?);
        }
        self.pending.clear();
        self.flushing = false;
        self.next_pts = 0;
        Ok(())
    }

    fn send_packet(&mut self, packet: &Packet) -> YinResult<()> {
        if packet.is_empty() {
            self.flushing = true;
            return Ok(());
        }
        if packet.pts != NOPTS_VALUE {
            self.next_pts = packet.pts;
        }

        let mut data: &[u8] = &packet.data;
        if self.engine.is_none() {
            let (engine, skip) = Engine::probe(&self.options, data)?;
            debug!("AAC: 由码流头初始化, {:?}", engine.header_type());
            self.engine = Some(engine);
            data = data.get(skip..).unwrap_or_default();
        }

        let format = self.options.sample_format;
        let mut decoded = 0usize;
        while !data.is_empty() {
            let Some(engine) = self.engine.as_mut() else {
                break;
            };
            let header_type = engine.header_type();
            let (info, bytes) = match engine.decode(data, format) {
                Ok(result) => result,
                Err(e) if decoded > 0 => {
                    debug!("AAC: 数据包尾部 {} 字节无法解码: {}", data.len(), e);
                    break;
                }
                Err(e) => return Err(e),
            };
            decoded += 1;
            if let Some(fault) = info.error {
                warn!("AAC 帧解码出错 (码 {}): {}, 已输出可用声道", fault.code(), fault);
            }
            if info.samples > 0 {
                self.push_frame(&info, bytes);
            }
            let consumed = info.bytes_consumed;
            let stop = consumed == 0
                || header_type == HeaderType::Raw
                || (header_type == HeaderType::Adif && info.error.is_some());
            self.last_info = Some(info);
            if stop {
                break;
            }
            data = data.get(consumed..).unwrap_or_default();
        }
        Ok(())
    }

    fn receive_frame(&mut self) -> YinResult<AudioFrame> {
        if let Some(frame) = self.pending.pop_front() {
            Ok(frame)
        } else if self.flushing {
            Err(YinError::Eof)
        } else {
            Err(YinError::NeedMoreData)
        }
    }

    fn flush(&mut self) {
        self.pending.clear();
        self.flushing = false;
        self.last_info = None;
        if let Some(engine) = self.engine.as_mut() {
            engine.reset();
        }
    }
}
