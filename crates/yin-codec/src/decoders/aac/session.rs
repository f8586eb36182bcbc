//! 解码会话: 持有跨帧状态并驱动逐帧重建.
//!
//! 每个声道的重叠缓冲, 上一帧窗形状以及预测状态都归会话所有.
//! 调用方负责在 seek 之后调用 [`AacSession::reset`].

use log::{debug, warn};
use yin_core::{BitCursor, BitSource, YinError, YinResult};

use super::config::{FrameConfig, ObjectType};
use super::drc::DrcGain;
use super::extension::SbrPayload;
use super::fault::{AacFault, AacResult};
use super::filterbank::FilterBank;
use super::hcr::HcrReport;
use super::header::{AdifHeader, AdtsHeader, HeaderType};
use super::ics::{Ics, WindowShape};
use super::ltp::LtpState;
use super::pns::{self, NoiseGenerator};
use super::prediction::{self, PredictorCell};
use super::real::Real;
use super::rvlc::RvlcReport;
use super::specrec;
use super::stereo;
use super::syntax::{self, ChannelElement, ElementKind, ElementSlots, RawDataBlock};
use super::tns;

/// 按对象类型决定的预测状态
#[derive(Debug, Clone)]
pub enum PredictionState {
    None,
    Main(Vec<PredictorCell>),
    LongTerm(LtpState),
}

impl PredictionState {
    fn for_object_type(object_type: ObjectType, frame_length: usize) -> Self {
        match object_type {
            ObjectType::Main => Self::Main(vec![PredictorCell::default(); frame_length]),
            ot if ot.uses_ltp() => Self::LongTerm(LtpState::new(frame_length, ot.is_low_delay())),
            _ => Self::None,
        }
    }

    fn reset(&mut self) {
        match self {
            Self::None => {}
            Self::Main(cells) => cells.iter_mut().for_each(PredictorCell::reset),
            Self::LongTerm(ltp) => ltp.reset(),
        }
    }
}

/// 单声道的跨帧状态
#[derive(Debug, Clone)]
struct ChannelState<R: Real> {
    overlap: Vec<R>,
    shape_prev: WindowShape,
    prediction: PredictionState,
}

impl<R: Real> ChannelState<R> {
    fn new(config: &FrameConfig) -> Self {
        Self {
            overlap: vec![R::ZERO; config.frame_length],
            shape_prev: WindowShape::Sine,
            prediction: PredictionState::for_object_type(config.object_type, config.frame_length),
        }
    }

    fn reset(&mut self) {
        self.overlap.fill(R::ZERO);
        self.shape_prev = WindowShape::Sine;
        self.prediction.reset();
    }
}

/// 单帧状态报告
#[derive(Debug, Clone, Default)]
pub struct FrameInfo {
    /// 本次调用消耗的输入字节数 (含 ADTS 帧头与同步前跳过的字节)
    pub bytes_consumed: usize,
    /// 每声道输出样本数
    pub samples: usize,
    pub channels: usize,
    pub sample_rate: u32,
    pub object_type: Option<ObjectType>,
    pub header_type: HeaderType,
    /// 中止本帧 (或某个声道) 的故障
    pub error: Option<AacFault>,
    /// 首个降级声道的 RVLC 结果
    pub rvlc: RvlcReport,
    /// 本帧所有声道 HCR 统计之和
    pub hcr: Option<HcrReport>,
    pub sbr_payloads: Vec<SbrPayload>,
}

/// 一帧解码结果, 样本按声道平面排列
#[derive(Debug, Clone)]
pub struct DecodedFrame<R: Real> {
    pub info: FrameInfo,
    pub planes: Vec<Vec<R>>,
}

impl<R: Real> DecodedFrame<R> {
    /// 交错后的样本总数
    pub fn interleaved_len(&self) -> usize {
        self.info.samples * self.planes.len()
    }

    /// 按交错顺序写入调用方缓冲区, 返回写入的样本数
    pub fn write_interleaved<T>(&self, dst: &mut [T], convert: impl Fn(R) -> T) -> AacResult<usize> {
        let total = self.interleaved_len();
        let Some(dst) = dst.get_mut(..total) else {
            return Err(AacFault::OutputTooSmall);
        };
        let n = self.info.samples;
        let channels = self.planes.len();
        for (c, plane) in self.planes.iter().enumerate() {
            for (i, &v) in plane.iter().take(n).enumerate() {
                dst[i * channels + c] = convert(v);
            }
        }
        Ok(total)
    }

    /// 交错排列的 f32 样本, 浮点路径归一化到 [-1, 1)
    pub fn interleaved_f32(&self) -> Vec<f32> {
        let mut out = vec![0.0; self.interleaved_len()];
        let written = self.write_interleaved(&mut out, |v| v.to_f32() / 32768.0).unwrap_or(0);
        out.truncate(written);
        out
    }

    /// 交错排列的 16 位样本
    pub fn interleaved_i16(&self) -> Vec<i16> {
        let mut out = vec![0; self.interleaved_len()];
        let written = self.write_interleaved(&mut out, R::to_i16_sat).unwrap_or(0);
        out.truncate(written);
        out
    }
}

/// AAC 解码会话
#[derive(Debug)]
pub struct AacSession<R: Real> {
    config: FrameConfig,
    header_type: HeaderType,
    filter_bank: FilterBank<R>,
    channels: Vec<ChannelState<R>>,
    /// 已知的输出声道数
    output_channels: usize,
    slots: ElementSlots,
    rng: NoiseGenerator,
    drc: DrcGain,
    /// 首帧已输出过 (非 LD 流的首帧只填充重叠缓冲)
    primed: bool,
    frames: u64,
}

impl<R: Real> AacSession<R> {
    pub fn new(config: FrameConfig) -> YinResult<Self> {
        Self::with_header(config, HeaderType::Raw)
    }

    fn with_header(config: FrameConfig, header_type: HeaderType) -> YinResult<Self> {
        if R::FIXED && config.object_type == ObjectType::Main {
            return Err(AacFault::MainPredictionUnavailable.into());
        }
        let filter_bank = FilterBank::new(config.frame_length, config.object_type.is_low_delay())
            .ok_or_else(|| YinError::Unsupported(format!("AAC: 帧长 {}", config.frame_length)))?;
        debug!(
            "AAC 会话: {} {} Hz, 声道配置 {}, 帧长 {}, {}",
            config.object_type,
            config.sample_rate,
            config.channel_configuration,
            config.frame_length,
            if R::FIXED { "定点" } else { "浮点" }
        );
        Ok(Self {
            output_channels: config.channels(),
            config,
            header_type,
            filter_bank,
            channels: Vec::new(),
            slots: ElementSlots::default(),
            rng: NoiseGenerator::new(),
            drc: DrcGain::default(),
            primed: false,
            frames: 0,
        })
    }

    /// 由 AudioSpecificConfig 初始化
    pub fn from_audio_specific_config(data: &[u8]) -> YinResult<Self> {
        Self::new(FrameConfig::from_audio_specific_config(data)?)
    }

    /// 由码流开头的 ADTS 帧头初始化; 该帧仍需交给 [`Self::decode_frame`]
    pub fn from_adts(data: &[u8]) -> YinResult<Self> {
        let mut br = BitCursor::new(data)?;
        let header = AdtsHeader::parse(&mut br)?;
        Self::with_header(FrameConfig::from_adts(&header)?, HeaderType::Adts)
    }

    /// 由 ADIF 头初始化, 返回会话与头部字节数
    pub fn from_adif(data: &[u8]) -> YinResult<(Self, usize)> {
        let mut br = BitCursor::new(data)?;
        let header = AdifHeader::parse(&mut br)?;
        let consumed = (br.bits_consumed() / 8) as usize;
        let session = Self::with_header(FrameConfig::from_adif(&header)?, HeaderType::Adif)?;
        Ok((session, consumed))
    }

    /// 根据码流开头自动识别 ADTS / ADIF, 返回会话与应跳过的头部字节数
    pub fn probe(data: &[u8]) -> YinResult<(Self, usize)> {
        if AdifHeader::probe(data) {
            Self::from_adif(data)
        } else {
            Ok((Self::from_adts(data)?, 0))
        }
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    pub fn header_type(&self) -> HeaderType {
        self.header_type
    }

    /// 已知的输出声道数 (声道配置 0 且无 PCE 时, 首帧之前为 0)
    pub fn channel_count(&self) -> usize {
        self.output_channels
    }

    pub fn set_drc(&mut self, drc: DrcGain) {
        self.drc = drc;
    }

    /// 清空全部跨帧状态, 用于 seek 之后
    pub fn reset(&mut self) {
        for ch in &mut self.channels {
            ch.reset();
        }
        self.slots.reset();
        self.rng.reset();
        self.primed = false;
        self.frames = 0;
    }

    fn ensure_channels(&mut self, count: usize) {
        while self.channels.len() < count {
            self.channels.push(ChannelState::new(&self.config));
        }
    }

    /// ADTS 帧头与当前配置不一致时重建会话状态
    fn follow_adts(&mut self, header: &AdtsHeader) -> YinResult<()> {
        let cfg = FrameConfig::from_adts(header)?;
        if cfg.object_type == self.config.object_type
            && cfg.sf_index == self.config.sf_index
            && cfg.channel_configuration == self.config.channel_configuration
        {
            return Ok(());
        }
        debug!(
            "ADTS 流参数变化: {} {} Hz {} 声道 -> {} {} Hz {} 声道",
            self.config.object_type,
            self.config.sample_rate,
            self.config.channel_configuration,
            cfg.object_type,
            cfg.sample_rate,
            cfg.channel_configuration
        );
        let drc = self.drc;
        *self = Self::with_header(cfg, HeaderType::Adts)?;
        self.drc = drc;
        Ok(())
    }

    /// 解码一帧
    ///
    /// 码流故障不作为 `Err` 返回, 而是记录在 [`FrameInfo::error`] 中,
    /// 此前已解析的声道仍正常输出. 只有找不到可解码的数据时才返回 `Err`.
    pub fn decode_frame(&mut self, data: &[u8]) -> YinResult<DecodedFrame<R>> {
        let mut br = BitCursor::new(data)?;
        let mut frame_bytes = None;
        if self.header_type == HeaderType::Adts {
            let header = AdtsHeader::parse(&mut br)?;
            self.follow_adts(&header)?;
            if !header.protection_absent && header.num_raw_data_blocks > 0 {
                br.consume(16 * u32::from(header.num_raw_data_blocks));
            }
            if header.num_raw_data_blocks > 0 {
                debug!("ADTS 帧含 {} 个数据块, 只解码第一个", header.num_raw_data_blocks + 1);
            }
            frame_bytes = Some(header.sync_offset + header.frame_length);
        }

        let block = syntax::parse_raw_data_block(&mut br, &self.config, &mut self.slots);
        let parsed_bytes = (br.bits_consumed() as usize).div_ceil(8);
        let bytes_consumed = frame_bytes
            .filter(|&n| n >= parsed_bytes)
            .unwrap_or(parsed_bytes)
            .min(data.len());

        let mut frame = self.reconstruct(block);
        frame.info.bytes_consumed = bytes_consumed;
        Ok(frame)
    }

    /// 对解析结果做频谱重建与滤波器组
    fn reconstruct(&mut self, block: RawDataBlock) -> DecodedFrame<R> {
        let n = self.config.frame_length;
        let mut info = FrameInfo {
            sample_rate: self.config.sample_rate,
            object_type: Some(self.config.object_type),
            header_type: self.header_type,
            error: block.error,
            sbr_payloads: block.extensions.sbr_payloads.clone(),
            ..Default::default()
        };
        if let Some(fault) = block.error {
            warn!("第 {} 帧解码出错: {}", self.frames, fault);
        }

        if block.elements.is_empty() {
            info.channels = self.output_channels;
            self.frames += 1;
            return DecodedFrame {
                info,
                planes: vec![Vec::new(); self.output_channels],
            };
        }

        self.ensure_channels(block.channels);
        let out_channels = self
            .output_channels
            .max(block.elements.iter().map(|e| e.output_channel + e.kind.channels()).max().unwrap_or(0));
        self.output_channels = out_channels;
        let mut planes = vec![vec![R::ZERO; n]; out_channels];

        for element in &block.elements {
            collect_reports(element, &mut info);
            if let Err(fault) = self.decode_element(element, &block, &mut planes) {
                warn!("元素 {:?} (tag {}) 重建失败: {}", element.kind, element.tag, fault);
                info.error.get_or_insert(fault);
            }
        }

        let samples = if self.primed || self.config.object_type.is_low_delay() {
            n
        } else {
            0
        };
        self.primed = true;
        self.frames += 1;

        if samples == 0 {
            planes.iter_mut().for_each(Vec::clear);
        }
        info.samples = samples;
        info.channels = out_channels;
        DecodedFrame { info, planes }
    }

    fn decode_element(
        &mut self,
        element: &ChannelElement,
        block: &RawDataBlock,
        planes: &mut [Vec<R>],
    ) -> AacResult<()> {
        let n = self.config.frame_length;
        let mut spectra = Vec::with_capacity(element.streams.len());
        for stream in &element.streams {
            let mut spec = vec![R::ZERO; n];
            specrec::quant_to_spec(&stream.ics, &stream.quant, n, &mut spec)?;
            spectra.push(spec);
        }

        match (element.kind, spectra.as_mut_slice()) {
            (ElementKind::Pair, [left, right]) if element.common_window => {
                let (li, ri) = (&element.streams[0].ics, &element.streams[1].ics);
                pns::apply_pair(&mut self.rng, li, left, ri, right, n);
                stereo::apply(li, left, ri, right, n);
            }
            _ => {
                for (stream, spec) in element.streams.iter().zip(spectra.iter_mut()) {
                    pns::apply_single(&mut self.rng, &stream.ics, spec, n);
                }
            }
        }

        for (i, (stream, spec)) in element.streams.iter().zip(spectra.iter_mut()).enumerate() {
            let channel = element.first_channel + i;
            let output = element.output_channel + i;
            self.channel_tail(channel, &stream.ics, spec, block, &mut planes[output]);
        }
        Ok(())
    }

    /// 预测, TNS, DRC 与滤波器组
    fn channel_tail(
        &mut self,
        channel: usize,
        ics: &Ics,
        spec: &mut [R],
        block: &RawDataBlock,
        time_out: &mut [R],
    ) {
        let n = self.config.frame_length;
        let sf_index = self.config.sf_index;
        let ssr = self.config.object_type == ObjectType::Ssr;
        let state = &mut self.channels[channel];

        match &mut state.prediction {
            PredictionState::Main(cells) => {
                if let Some(view) = R::float_view(spec) {
                    prediction::apply(ics, view, cells, sf_index);
                }
                prediction::reset_noise_bands(ics, cells, n);
            }
            PredictionState::LongTerm(ltp) => {
                ltp.predict(ics, &self.filter_bank, state.shape_prev, sf_index, spec);
            }
            PredictionState::None => {}
        }

        tns::decode_frame(ics, sf_index, ssr, spec, n);
        self.drc.apply(&block.extensions.drc, channel, spec, n);

        self.filter_bank.inverse(
            ics.window_sequence,
            ics.window_shape,
            state.shape_prev,
            spec,
            time_out,
            &mut state.overlap,
        );

        if let PredictionState::LongTerm(ltp) = &mut state.prediction {
            ltp.update(time_out, &state.overlap);
        }
        state.shape_prev = ics.window_shape;
    }
}

/// 汇总各声道的 RVLC / HCR 报告
fn collect_reports(element: &ChannelElement, info: &mut FrameInfo) {
    for stream in &element.streams {
        if let Some(report) = stream.rvlc {
            if report.degraded() && !info.rvlc.degraded() {
                info.rvlc = report;
            } else if !info.rvlc.degraded() && info.rvlc.reverse_consistent.is_none() {
                info.rvlc.reverse_consistent = report.reverse_consistent;
            }
        }
        if let Some(report) = stream.hcr {
            let total = info.hcr.get_or_insert_with(HcrReport::default);
            total.segments += report.segments;
            total.sets += report.sets;
            total.codewords += report.codewords;
            total.undecoded += report.undecoded;
        }
    }
}
