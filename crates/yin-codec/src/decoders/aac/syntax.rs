//! raw_data_block 语法解析.
//!
//! 本层只做无损解码: 读出每个声道元素的 ICS 边信息与量化频谱,
//! 频谱重建与滤波器组在 [`super::specrec`] 及之后的阶段完成.
//!
//! 某个元素解析失败时, 之前已完整解析的元素保留在结果中, 错误记录在 `error` 字段.

use log::{debug, trace};
use serde::Serialize;
use yin_core::{BitCursor, BitSource};

use super::config::{FrameConfig, ObjectType};
use super::extension::{self, FrameExtensions};
use super::fault::{AacFault, AacResult};
use super::hcr::{self, HcrReport};
use super::huffman::{self, CodebookKind, ZERO_HCB};
use super::ics::Ics;
use super::pce::{MAX_CHANNELS, ProgramConfig};
use super::rvlc::{self, RvlcInfo, RvlcReport};
use super::side_info::{LtpInfo, PulseData, TnsData, skip_gain_control};

/// 单帧语法元素数上限
pub const MAX_SYNTAX_ELEMENTS: usize = 48;

const ID_SCE: u32 = 0;
const ID_CPE: u32 = 1;
const ID_CCE: u32 = 2;
const ID_LFE: u32 = 3;
const ID_DSE: u32 = 4;
const ID_PCE: u32 = 5;
const ID_FIL: u32 = 6;
const ID_END: u32 = 7;

/// 声道元素类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ElementKind {
    Single,
    Pair,
    Lfe,
}

impl ElementKind {
    pub fn channels(self) -> usize {
        match self {
            Self::Pair => 2,
            Self::Single | Self::Lfe => 1,
        }
    }
}

/// 一个声道的无损解码结果
#[derive(Debug, Clone)]
pub struct ChannelStream {
    pub ics: Ics,
    /// 量化频谱 (短窗时按窗组交织)
    pub quant: Vec<i32>,
    pub rvlc: Option<RvlcReport>,
    pub hcr: Option<HcrReport>,
}

/// 一个声道元素 (SCE / CPE / LFE)
#[derive(Debug, Clone)]
pub struct ChannelElement {
    pub kind: ElementKind,
    pub tag: u8,
    /// 内部声道序号 (按出现顺序), 决定跨帧状态归属
    pub first_channel: usize,
    /// 输出声道位置
    pub output_channel: usize,
    pub common_window: bool,
    pub streams: Vec<ChannelStream>,
}

/// 一个 raw_data_block 的解析结果
#[derive(Debug, Clone, Default)]
pub struct RawDataBlock {
    pub elements: Vec<ChannelElement>,
    pub extensions: FrameExtensions,
    pub channels: usize,
    pub error: Option<AacFault>,
}

/// 跨帧记录每个元素槽位的声道数, 用于发现帧间不一致
#[derive(Debug, Clone, Default)]
pub struct ElementSlots {
    channels: Vec<usize>,
}

impl ElementSlots {
    fn check(&mut self, index: usize, channels: usize) -> AacResult<()> {
        match self.channels.get(index) {
            Some(&known) if known != channels => Err(AacFault::ChannelConfigChanged),
            Some(_) => Ok(()),
            None => {
                self.channels.resize(index, 0);
                self.channels.push(channels);
                Ok(())
            }
        }
    }

    pub fn reset(&mut self) {
        self.channels.clear();
    }
}

/// 解析一个 raw_data_block (或 ER 格式的 er_raw_data_block)
pub fn parse_raw_data_block(
    br: &mut BitCursor<'_>,
    cfg: &FrameConfig,
    slots: &mut ElementSlots,
) -> RawDataBlock {
    let mut parser = BlockParser {
        cfg,
        slots,
        block: RawDataBlock::default(),
    };
    let result = if cfg.object_type.is_error_resilient() {
        parser.er_elements(br)
    } else {
        parser.elements(br)
    };
    if let Err(fault) = result {
        debug!("raw_data_block 解析中止: {}", fault);
        parser.block.error = Some(fault);
    } else {
        br.byte_align();
        if br.has_error() {
            parser.block.error = Some(AacFault::BufferExhausted);
        }
    }
    parser.block
}

struct BlockParser<'a> {
    cfg: &'a FrameConfig,
    slots: &'a mut ElementSlots,
    block: RawDataBlock,
}

impl BlockParser<'_> {
    fn elements(&mut self, br: &mut BitCursor<'_>) -> AacResult<()> {
        let mut after_channel_element = false;
        loop {
            if br.has_error() {
                return Err(AacFault::BufferExhausted);
            }
            let id = br.get_bits(3);
            let mut channel_element = false;
            match id {
                ID_END => break,
                ID_SCE => {
                    self.channel_element(br, ElementKind::Single)?;
                    channel_element = true;
                }
                ID_CPE => {
                    self.channel_element(br, ElementKind::Pair)?;
                    channel_element = true;
                }
                ID_LFE => {
                    self.channel_element(br, ElementKind::Lfe)?;
                    channel_element = true;
                }
                ID_CCE => {
                    // 耦合声道只解析不应用, 其余元素照常输出
                    parse_coupling_element(br, self.cfg)?;
                    self.block.error.get_or_insert(AacFault::CouplingUnsupported);
                }
                ID_DSE => {
                    let bytes = extension::skip_data_stream_element(br)?;
                    trace!("跳过数据流元素: {} 字节", bytes);
                }
                ID_PCE => {
                    // 码流中途的 PCE 只解析, 不改变声道映射
                    let pce = ProgramConfig::parse(br)?;
                    trace!("忽略 raw_data_block 中的 PCE (tag {})", pce.element_instance_tag);
                }
                ID_FIL => {
                    let owner = after_channel_element.then(|| self.block.elements.len() - 1);
                    self.block.extensions.parse_fill_element(br, owner)?;
                }
                other => {
                    trace!("未知元素 ID {}", other);
                    break;
                }
            }
            after_channel_element = channel_element;
        }
        Ok(())
    }

    fn er_elements(&mut self, br: &mut BitCursor<'_>) -> AacResult<()> {
        use ElementKind::{Lfe, Pair, Single};
        let order: &[ElementKind] = match self.cfg.channel_configuration {
            1 => &[Single],
            2 => &[Pair],
            3 => &[Single, Pair],
            4 => &[Single, Pair, Single],
            5 => &[Single, Pair, Pair],
            6 => &[Single, Pair, Pair, Lfe],
            7 => &[Single, Pair, Pair, Pair, Lfe],
            _ => return Err(AacFault::ErChannelConfig),
        };
        for &kind in order {
            self.channel_element(br, kind)?;
            if br.has_error() {
                return Err(AacFault::BufferExhausted);
            }
        }
        Ok(())
    }

    fn channel_element(&mut self, br: &mut BitCursor<'_>, kind: ElementKind) -> AacResult<()> {
        let n = kind.channels();
        let first_channel = self.block.channels;
        if first_channel + n > MAX_CHANNELS {
            return Err(AacFault::InvalidChannelCount);
        }
        let index = self.block.elements.len();
        if index + 1 > MAX_SYNTAX_ELEMENTS {
            return Err(AacFault::TooManyElements);
        }
        self.slots.check(index, n)?;

        let mut element = match kind {
            ElementKind::Pair => parse_channel_pair(br, self.cfg, first_channel)?,
            _ => parse_single_channel(br, self.cfg, kind, first_channel)?,
        };
        trace!(
            "{:?} 元素: tag {}, 声道 {}..{}",
            kind,
            element.tag,
            first_channel,
            first_channel + n
        );
        element.output_channel = self.output_position(&element);
        self.block.channels += n;
        self.block.elements.push(element);
        Ok(())
    }

    /// 有 PCE 时按 PCE 的声道映射输出, 否则按出现顺序
    fn output_position(&self, element: &ChannelElement) -> usize {
        let Some(pce) = &self.cfg.pce else {
            return element.first_channel;
        };
        let tag = usize::from(element.tag) & 15;
        let mapped = usize::from(match element.kind {
            ElementKind::Single => pce.sce_channel[tag],
            ElementKind::Pair => pce.cpe_channel[tag],
            ElementKind::Lfe => pce.lfe_channel[tag],
        });
        if mapped + element.kind.channels() <= pce.channels {
            mapped
        } else {
            element.first_channel
        }
    }
}

fn parse_single_channel(
    br: &mut BitCursor<'_>,
    cfg: &FrameConfig,
    kind: ElementKind,
    first_channel: usize,
) -> AacResult<ChannelElement> {
    let tag = br.get_bits(4) as u8;
    let mut ics = Ics::default();
    let stream = individual_channel_stream(br, cfg, &mut ics, false)?;
    Ok(ChannelElement {
        kind,
        tag,
        first_channel,
        output_channel: first_channel,
        common_window: false,
        streams: vec![stream],
    })
}

fn parse_channel_pair(
    br: &mut BitCursor<'_>,
    cfg: &FrameConfig,
    first_channel: usize,
) -> AacResult<ChannelElement> {
    let tag = br.get_bits(4) as u8;
    let common_window = br.get_bit() == 1;
    let er = cfg.object_type.is_error_resilient();

    let mut ics1 = Ics::default();
    let mut ics2 = Ics::default();
    if common_window {
        ics1.parse_info(br, cfg, true)?;
        ics1.ms_mask_present = br.get_bits(2) as u8;
        if ics1.ms_mask_present == 1 {
            for g in 0..ics1.num_window_groups {
                for sfb in 0..ics1.max_sfb {
                    ics1.ms_used[g][sfb] = br.get_bit() == 1;
                }
            }
        }
        if er && ics1.predictor_data_present {
            ics1.ltp = LtpInfo::parse(br, ics1.max_sfb, cfg)?;
        }
        ics2 = ics1.common_window_twin();
    }

    let first = individual_channel_stream(br, cfg, &mut ics1, common_window)?;

    if common_window && er && ics1.predictor_data_present {
        ics2.ltp = LtpInfo::parse(br, ics2.max_sfb, cfg)?;
    }
    let second = individual_channel_stream(br, cfg, &mut ics2, common_window)?;

    Ok(ChannelElement {
        kind: ElementKind::Pair,
        tag,
        first_channel,
        output_channel: first_channel,
        common_window,
        streams: vec![first, second],
    })
}

/// individual_channel_stream: 边信息, 缩放因子与频谱
fn individual_channel_stream(
    br: &mut BitCursor<'_>,
    cfg: &FrameConfig,
    ics: &mut Ics,
    common_window: bool,
) -> AacResult<ChannelStream> {
    let er = cfg.object_type.is_error_resilient();
    let resilience = cfg.resilience;

    ics.global_gain = br.get_bits(8) as u8;
    if !common_window {
        ics.parse_info(br, cfg, false)?;
    }
    ics.parse_section_data(br, cfg)?;

    if resilience.scalefactor_data {
        ics.rvlc = RvlcInfo::parse(br, ics.window_sequence.is_short(), ics.noise_used);
    } else {
        ics.parse_scale_factors(br)?;
    }

    ics.pulse = None;
    if br.get_bit() == 1 {
        if ics.window_sequence.is_short() {
            return Err(AacFault::PulseInShortBlock);
        }
        ics.pulse = Some(PulseData::parse(br, ics.num_swb)?);
    }

    ics.tns = None;
    let tns_present = br.get_bit() == 1;
    if tns_present && !er {
        ics.tns = Some(TnsData::parse(br, ics));
    }

    if br.get_bit() == 1 {
        if cfg.object_type != ObjectType::Ssr {
            return Err(AacFault::GainControlUnsupported);
        }
        skip_gain_control(br, ics.window_sequence);
    }

    if resilience.spectral_data {
        let limit = if cfg.channel_configuration == 2 { 6144 } else { 12288 };
        ics.reordered_spectral_length = (br.get_bits(14) as usize).min(limit);
        ics.longest_codeword_length = (br.get_bits(6) as usize).min(49);
    }

    let mut stream = ChannelStream {
        ics: Ics::default(),
        quant: vec![0; cfg.frame_length],
        rvlc: None,
        hcr: None,
    };

    if resilience.scalefactor_data {
        stream.rvlc = Some(rvlc::decode_scale_factors(ics, br)?);
    }
    if tns_present && er {
        ics.tns = Some(TnsData::parse(br, ics));
    }
    if br.has_error() {
        return Err(AacFault::BufferExhausted);
    }

    if resilience.spectral_data {
        let report = hcr::decode_reordered(
            ics,
            br,
            resilience.section_data,
            cfg.frame_length,
            &mut stream.quant,
        )?;
        stream.hcr = Some(report);
    } else {
        spectral_data(ics, br, cfg.frame_length, &mut stream.quant)?;
    }

    if let Some(pulse) = &ics.pulse {
        pulse.apply(ics, &mut stream.quant)?;
    }
    stream.ics = ics.clone();
    Ok(stream)
}

/// 按分段顺序解码频谱码字
pub fn spectral_data(
    ics: &Ics,
    br: &mut BitCursor<'_>,
    frame_length: usize,
    quant: &mut [i32],
) -> AacResult<()> {
    let nshort = frame_length / 8;
    let mut groups = 0;
    let mut sections = ics.sections.iter().peekable();
    for g in 0..ics.num_window_groups {
        let mut p = groups * nshort;
        while let Some(sec) = sections.next_if(|s| s.group == g) {
            let lo = usize::from(ics.sect_sfb_offset[g][sec.start]);
            let hi = usize::from(ics.sect_sfb_offset[g][sec.end]);
            if !CodebookKind::from_id(sec.cb).has_spectral_data() {
                p += hi - lo;
                continue;
            }
            let mut k = lo;
            while k < hi {
                let Some(out) = quant.get_mut(p..) else {
                    return Err(AacFault::SectionIndex);
                };
                let dim = huffman::decode_spectral(sec.cb, br, out)
                    .map_err(|e| e.into_fault(AacFault::SpectralHuffman))?;
                p += dim;
                k += dim;
            }
        }
        groups += ics.window_group_length[g];
    }
    Ok(())
}

/// 解析并丢弃耦合声道元素, 只保证游标位置正确
fn parse_coupling_element(br: &mut BitCursor<'_>, cfg: &FrameConfig) -> AacResult<()> {
    let tag = br.get_bits(4);
    let ind_sw_cce = br.get_bit() == 1;
    let num_coupled = br.get_bits(3) as usize + 1;
    let mut num_gain_element_lists = 0;
    for _ in 0..num_coupled {
        num_gain_element_lists += 1;
        let is_cpe = br.get_bit() == 1;
        br.consume(4);
        if is_cpe {
            let cc_l = br.get_bit() == 1;
            let cc_r = br.get_bit() == 1;
            if cc_l && cc_r {
                num_gain_element_lists += 1;
            }
        }
    }
    // cc_domain, gain_element_sign, gain_element_scale
    br.consume(4);

    let mut ics = Ics::default();
    individual_channel_stream(br, cfg, &mut ics, false)?;

    for _ in 1..num_gain_element_lists {
        let common_gain = ind_sw_cce || br.get_bit() == 1;
        if common_gain {
            huffman::decode_scalefactor_delta(br)?;
        } else {
            for g in 0..ics.num_window_groups {
                for sfb in 0..ics.max_sfb {
                    if ics.sfb_cb[g][sfb] != ZERO_HCB {
                        huffman::decode_scalefactor_delta(br)?;
                    }
                }
            }
        }
    }
    trace!("跳过耦合声道元素 tag {}", tag);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoders::aac::config::ObjectType;
    use yin_core::BitWriter;

    /// 长窗 ICS: max_sfb 个频带全部使用 ZERO_HCB
    fn write_silent_ics(w: &mut BitWriter, max_sfb: u32, with_info: bool) {
        w.write_bits(100, 8); // global_gain
        if with_info {
            w.write_bits(0, 4); // reserved, ONLY_LONG, sine
            w.write_bits(max_sfb, 6);
            w.write_bit(0); // predictor_data_present
        }
        if max_sfb > 0 {
            w.write_bits(0, 4); // ZERO_HCB
            w.write_bits(max_sfb, 5);
        }
        w.write_bit(0); // pulse
        w.write_bit(0); // tns
        w.write_bit(0); // gain control
    }

    fn finish(w: BitWriter) -> Vec<u8> {
        w.finish()
    }

    #[test]
    fn test_单声道静音块() {
        let cfg = FrameConfig::new(ObjectType::Lc, 4, 1).unwrap();
        let mut w = BitWriter::new();
        w.write_bits(ID_SCE, 3);
        w.write_bits(0, 4);
        write_silent_ics(&mut w, 1, true);
        w.write_bits(ID_END, 3);
        let data = finish(w);
        let mut br = BitCursor::new(&data).unwrap();
        let mut slots = ElementSlots::default();
        let block = parse_raw_data_block(&mut br, &cfg, &mut slots);
        assert_eq!(block.error, None);
        assert_eq!(block.channels, 1);
        assert_eq!(block.elements.len(), 1);
        let stream = &block.elements[0].streams[0];
        assert!(stream.quant.iter().all(|&q| q == 0));
        assert_eq!(stream.ics.max_sfb, 1);
        assert_eq!(br.bits_consumed() % 8, 0);
    }

    #[test]
    fn test_耦合声道跳过并报告() {
        let cfg = FrameConfig::new(ObjectType::Lc, 4, 1).unwrap();
        let mut w = BitWriter::new();
        w.write_bits(ID_SCE, 3);
        w.write_bits(0, 4);
        write_silent_ics(&mut w, 1, true);
        w.write_bits(ID_CCE, 3);
        w.write_bits(0, 4); // tag
        w.write_bit(0); // ind_sw_cce
        w.write_bits(0, 3); // 一个被耦合元素
        w.write_bit(0); // SCE
        w.write_bits(0, 4);
        w.write_bits(0, 4); // cc_domain, sign, scale
        write_silent_ics(&mut w, 1, true);
        w.write_bits(ID_END, 3);
        let data = finish(w);
        let mut br = BitCursor::new(&data).unwrap();
        let mut slots = ElementSlots::default();
        let block = parse_raw_data_block(&mut br, &cfg, &mut slots);
        assert_eq!(block.error, Some(AacFault::CouplingUnsupported));
        assert_eq!(block.elements.len(), 1);
        assert_eq!(block.channels, 1);
        assert_eq!(br.bits_consumed() as usize, data.len() * 8);
    }

    #[test]
    fn test_公共窗声道对() {
        let cfg = FrameConfig::new(ObjectType::Lc, 4, 2).unwrap();
        let mut w = BitWriter::new();
        w.write_bits(ID_CPE, 3);
        w.write_bits(0, 4);
        w.write_bit(1); // common_window
        w.write_bits(0, 4);
        w.write_bits(2, 6); // max_sfb
        w.write_bit(0);
        w.write_bits(1, 2); // ms_mask_present
        w.write_pattern("10");
        write_silent_ics(&mut w, 2, false);
        write_silent_ics(&mut w, 2, false);
        w.write_bits(ID_END, 3);
        let data = finish(w);
        let mut br = BitCursor::new(&data).unwrap();
        let mut slots = ElementSlots::default();
        let block = parse_raw_data_block(&mut br, &cfg, &mut slots);
        assert_eq!(block.error, None);
        assert_eq!(block.channels, 2);
        let e = &block.elements[0];
        assert!(e.common_window);
        assert_eq!(e.streams.len(), 2);
        assert!(e.streams[1].ics.ms_used[0][0]);
        assert!(!e.streams[1].ics.ms_used[0][1]);
    }

    #[test]
    fn test_元素槽位声道数变化() {
        let cfg = FrameConfig::new(ObjectType::Lc, 4, 1).unwrap();
        let mut slots = ElementSlots::default();

        let mut w = BitWriter::new();
        w.write_bits(ID_SCE, 3);
        w.write_bits(0, 4);
        write_silent_ics(&mut w, 0, true);
        w.write_bits(ID_END, 3);
        let data = finish(w);
        let mut br = BitCursor::new(&data).unwrap();
        assert_eq!(parse_raw_data_block(&mut br, &cfg, &mut slots).error, None);

        let mut w = BitWriter::new();
        w.write_bits(ID_CPE, 3);
        w.write_bits(0, 4);
        w.write_bit(0);
        write_silent_ics(&mut w, 0, true);
        write_silent_ics(&mut w, 0, true);
        w.write_bits(ID_END, 3);
        let data = finish(w);
        let mut br = BitCursor::new(&data).unwrap();
        let block = parse_raw_data_block(&mut br, &cfg, &mut slots);
        assert_eq!(block.error, Some(AacFault::ChannelConfigChanged));
        assert!(block.elements.is_empty());
    }

    #[test]
    fn test_出错前的元素保留() {
        let cfg = FrameConfig::new(ObjectType::Lc, 4, 2).unwrap();
        let mut w = BitWriter::new();
        w.write_bits(ID_SCE, 3);
        w.write_bits(0, 4);
        write_silent_ics(&mut w, 1, true);
        // 第二个元素使用保留码本 12
        w.write_bits(ID_SCE, 3);
        w.write_bits(1, 4);
        w.write_bits(100, 8);
        w.write_bits(0, 4);
        w.write_bits(1, 6);
        w.write_bit(0);
        w.write_bits(12, 4);
        w.write_bits(1, 5);
        w.write_bits(ID_END, 3);
        let data = finish(w);
        let mut br = BitCursor::new(&data).unwrap();
        let mut slots = ElementSlots::default();
        let block = parse_raw_data_block(&mut br, &cfg, &mut slots);
        assert_eq!(block.error, Some(AacFault::InvalidCodebook));
        assert_eq!(block.elements.len(), 1);
        assert_eq!(block.channels, 1);
    }

    #[test]
    fn test_增益控制仅限_ssr() {
        let cfg = FrameConfig::new(ObjectType::Lc, 4, 1).unwrap();
        let mut w = BitWriter::new();
        w.write_bits(ID_SCE, 3);
        w.write_bits(0, 4);
        w.write_bits(100, 8);
        w.write_bits(0, 4);
        w.write_bits(0, 6);
        w.write_bit(0);
        w.write_bit(0);
        w.write_bit(0);
        w.write_bit(1); // gain_control_data_present
        w.write_bits(ID_END, 3);
        let data = finish(w);
        let mut br = BitCursor::new(&data).unwrap();
        let mut slots = ElementSlots::default();
        let block = parse_raw_data_block(&mut br, &cfg, &mut slots);
        assert_eq!(block.error, Some(AacFault::GainControlUnsupported));
    }

    #[test]
    fn test_er_声道配置非法() {
        let mut cfg = FrameConfig::new(ObjectType::ErLc, 4, 1).unwrap();
        cfg.channel_configuration = 0;
        let data = [0u8; 8];
        let mut br = BitCursor::new(&data).unwrap();
        let mut slots = ElementSlots::default();
        let block = parse_raw_data_block(&mut br, &cfg, &mut slots);
        assert_eq!(block.error, Some(AacFault::ErChannelConfig));
    }

    #[test]
    fn test_填充元素与数据流元素() {
        let cfg = FrameConfig::new(ObjectType::Lc, 4, 1).unwrap();
        let mut w = BitWriter::new();
        w.write_bits(ID_DSE, 3);
        w.write_bits(0, 4);
        w.write_bit(0);
        w.write_bits(1, 8);
        w.write_bits(0xAB, 8);
        w.write_bits(ID_SCE, 3);
        w.write_bits(0, 4);
        write_silent_ics(&mut w, 0, true);
        w.write_bits(ID_FIL, 3);
        w.write_bits(2, 4);
        w.write_bits(13, 4); // SBR
        w.write_bits(0xC, 4);
        w.write_bits(0x34, 8);
        w.write_bits(ID_END, 3);
        let data = finish(w);
        let mut br = BitCursor::new(&data).unwrap();
        let mut slots = ElementSlots::default();
        let block = parse_raw_data_block(&mut br, &cfg, &mut slots);
        assert_eq!(block.error, None);
        assert_eq!(block.extensions.sbr_payloads.len(), 1);
        assert_eq!(block.extensions.sbr_payloads[0].element, 0);
        assert_eq!(block.extensions.sbr_payloads[0].data, vec![0xDC, 0x34]);
    }
}
