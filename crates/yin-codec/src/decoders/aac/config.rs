//! 流配置: 对象类型, 采样率, 声道配置, 帧长与容错标志.
//!
//! 配置在流初始化时确定一次, 来源可以是 AudioSpecificConfig, ADTS 头或 ADIF 头.

use std::fmt;

use log::debug;
use serde::Serialize;
use yin_core::{BitCursor, BitSource, ChannelLayout, YinError, YinResult};

use super::fault::AacFault;
use super::header::{AdifHeader, AdtsHeader};
use super::pce::ProgramConfig;
use super::tables::{self, swb};

/// 支持的音频对象类型 (MPEG-4 编号)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ObjectType {
    Main,
    Lc,
    Ssr,
    Ltp,
    ErLc,
    ErLtp,
    Ld,
}

impl ObjectType {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Main),
            2 => Some(Self::Lc),
            3 => Some(Self::Ssr),
            4 => Some(Self::Ltp),
            17 => Some(Self::ErLc),
            19 => Some(Self::ErLtp),
            23 => Some(Self::Ld),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        match self {
            Self::Main => 1,
            Self::Lc => 2,
            Self::Ssr => 3,
            Self::Ltp => 4,
            Self::ErLc => 17,
            Self::ErLtp => 19,
            Self::Ld => 23,
        }
    }

    /// 错误鲁棒 (ER) 对象类型
    pub fn is_error_resilient(self) -> bool {
        self.id() >= 17
    }

    /// 使用长时预测
    pub fn uses_ltp(self) -> bool {
        matches!(self, Self::Ltp | Self::ErLtp | Self::Ld)
    }

    pub fn is_low_delay(self) -> bool {
        self == Self::Ld
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Main => "AAC Main",
            Self::Lc => "AAC LC",
            Self::Ssr => "AAC SSR",
            Self::Ltp => "AAC LTP",
            Self::ErLc => "ER AAC LC",
            Self::ErLtp => "ER AAC LTP",
            Self::Ld => "ER AAC LD",
        };
        f.write_str(name)
    }
}

/// 容错工具开关 (仅 ER 对象类型可置位)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ResilienceFlags {
    /// 分段数据容错 (aacSectionDataResilienceFlag)
    pub section_data: bool,
    /// 缩放因子使用 RVLC
    pub scalefactor_data: bool,
    /// 频谱数据使用 HCR
    pub spectral_data: bool,
}

/// 流配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameConfig {
    pub object_type: ObjectType,
    pub sf_index: u8,
    pub sample_rate: u32,
    pub channel_configuration: u8,
    /// 每帧每声道输出样本数: 1024/960, LD 为 512/480
    pub frame_length: usize,
    pub resilience: ResilienceFlags,
    pub depends_on_core_coder: bool,
    pub core_coder_delay: u16,
    /// 显式信令的 SBR 扩展 (只记录, 不解码)
    pub sbr_present: bool,
    pub extension_sample_rate: Option<u32>,
    pub pce: Option<ProgramConfig>,
}

impl FrameConfig {
    /// 以默认帧长创建配置
    pub fn new(object_type: ObjectType, sf_index: u8, channel_configuration: u8) -> YinResult<Self> {
        let sample_rate = tables::sample_rate(usize::from(sf_index))
            .ok_or(YinError::from(AacFault::SampleRateIndex))?;
        let config = Self {
            object_type,
            sf_index,
            sample_rate,
            channel_configuration,
            frame_length: if object_type.is_low_delay() { 512 } else { 1024 },
            resilience: ResilienceFlags::default(),
            depends_on_core_coder: false,
            core_coder_delay: 0,
            sbr_present: false,
            extension_sample_rate: None,
            pce: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// 使用 960 (LD 为 480) 样本帧长
    pub fn with_small_frames(mut self, small: bool) -> YinResult<Self> {
        self.frame_length = match (self.object_type.is_low_delay(), small) {
            (true, true) => 480,
            (true, false) => 512,
            (false, true) => 960,
            (false, false) => 1024,
        };
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> YinResult<()> {
        if self.channel_configuration > 7 {
            return Err(YinError::Unsupported(format!(
                "AAC: 声道配置 {} 保留",
                self.channel_configuration
            )));
        }
        // 帧长与采样率组合必须有频带表
        let sf = usize::from(self.sf_index);
        if swb::num_swb_long(self.frame_length, sf) == 0 || swb::num_swb_short(sf) == 0 {
            return Err(AacFault::SampleRateIndex.into());
        }
        Ok(())
    }

    /// 输出声道数 (声道配置 0 且无 PCE 时由首帧确定, 返回 0)
    pub fn channels(&self) -> usize {
        match self.channel_configuration {
            0 => self.pce.as_ref().map_or(0, |p| p.channels),
            7 => 8,
            n => usize::from(n),
        }
    }

    pub fn channel_layout(&self) -> ChannelLayout {
        match &self.pce {
            Some(pce) if self.channel_configuration == 0 => pce.channel_layout(),
            _ => ChannelLayout::from_channels(self.channels() as u32),
        }
    }

    /// 解析 AudioSpecificConfig
    pub fn from_audio_specific_config(data: &[u8]) -> YinResult<Self> {
        let mut br = BitCursor::new(data)?;
        let mut object_id = read_object_type(&mut br);
        let (mut sf_index, explicit_rate) = read_sampling_frequency(&mut br);
        let channel_configuration = br.get_bits(4) as u8;

        let mut sbr_present = false;
        let mut extension_sample_rate = None;
        // 显式分层信令的 SBR (5) / PS (29): 先是扩展采样率, 再是核心对象类型
        if object_id == 5 || object_id == 29 {
            sbr_present = true;
            let (ext_index, ext_rate) = read_sampling_frequency(&mut br);
            extension_sample_rate = ext_rate.or_else(|| tables::sample_rate(usize::from(ext_index)));
            object_id = read_object_type(&mut br);
        }

        let object_type = ObjectType::from_id(object_id).ok_or_else(|| {
            YinError::Unsupported(format!("AAC: 不支持的对象类型 {}", object_id))
        })?;

        if let Some(rate) = explicit_rate {
            sf_index = tables::nearest_sf_index(rate);
        }
        if sf_index > 12 {
            return Err(AacFault::SampleRateIndex.into());
        }

        let frame_length_flag = br.get_bit() == 1;
        let mut config = FrameConfig::new(object_type, sf_index, channel_configuration)?
            .with_small_frames(frame_length_flag)?;
        if let Some(rate) = explicit_rate {
            config.sample_rate = rate;
        }
        config.sbr_present = sbr_present;
        config.extension_sample_rate = extension_sample_rate;

        config.depends_on_core_coder = br.get_bit() == 1;
        if config.depends_on_core_coder {
            config.core_coder_delay = br.get_bits(14) as u16;
        }
        let extension_flag = br.get_bit() == 1;

        if channel_configuration == 0 {
            config.pce = Some(ProgramConfig::parse(&mut br)?);
        }

        if extension_flag && object_type.is_error_resilient() {
            config.resilience = ResilienceFlags {
                section_data: br.get_bit() == 1,
                scalefactor_data: br.get_bit() == 1,
                spectral_data: br.get_bit() == 1,
            };
            // extensionFlag3
            br.get_bit();
        }

        if object_type.is_error_resilient() {
            let ep_config = br.get_bits(2);
            if ep_config != 0 {
                return Err(YinError::Unsupported(format!(
                    "AAC: 不支持错误保护配置 epConfig={}",
                    ep_config
                )));
            }
        }

        if br.has_error() {
            return Err(AacFault::BufferExhausted.into());
        }

        debug!(
            "AAC 配置: {}, {} Hz, 声道配置 {}, 帧长 {}, 容错 {:?}",
            config.object_type,
            config.sample_rate,
            config.channel_configuration,
            config.frame_length,
            config.resilience,
        );
        Ok(config)
    }

    /// 由 ADTS 头推导配置
    pub fn from_adts(header: &AdtsHeader) -> YinResult<Self> {
        let object_id = header.profile + 1;
        let object_type = match ObjectType::from_id(object_id) {
            Some(ot) if !ot.is_error_resilient() => ot,
            _ => {
                return Err(YinError::Unsupported(format!(
                    "AAC: ADTS profile {} 不受支持",
                    header.profile
                )));
            }
        };
        FrameConfig::new(object_type, header.sf_index, header.channel_configuration)
    }

    /// 由 ADIF 头推导配置, 声道映射取首个 PCE
    pub fn from_adif(header: &AdifHeader) -> YinResult<Self> {
        let pce = header
            .pces
            .first()
            .ok_or_else(|| YinError::InvalidData("ADIF 头缺少 PCE".into()))?;
        let object_type = ObjectType::from_id(pce.object_type + 1)
            .ok_or_else(|| YinError::Unsupported(format!("AAC: ADIF profile {}", pce.object_type)))?;
        let mut config = FrameConfig::new(object_type, pce.sf_index, 0)?;
        config.pce = Some(pce.clone());
        Ok(config)
    }
}

fn read_object_type(br: &mut BitCursor<'_>) -> u8 {
    let id = br.get_bits(5) as u8;
    if id == 31 {
        32 + br.get_bits(6) as u8
    } else {
        id
    }
}

/// 返回 (采样率索引, 显式采样率)
fn read_sampling_frequency(br: &mut BitCursor<'_>) -> (u8, Option<u32>) {
    let index = br.get_bits(4) as u8;
    if index == 15 {
        (index, Some(br.get_bits(24)))
    } else {
        (index, None)
    }
}
