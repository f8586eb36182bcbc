//! 单声道流 (individual channel stream) 的帧内信息.
//!
//! 包括 ics_info (窗序列, 分组, max_sfb), 分段数据与缩放因子.
//! 频谱数据与 ER 工具的解析见 [`super::syntax`].

use yin_core::{BitCursor, BitSource};

use super::config::{FrameConfig, ObjectType};
use super::fault::{AacFault, AacResult};
use super::huffman::{self, CodebookKind, ESC_HCB, INTENSITY_HCB, INTENSITY_HCB2, NOISE_HCB, ZERO_HCB};
use super::rvlc::RvlcInfo;
use super::side_info::{LtpInfo, PredictionInfo, PulseData, TnsData};
use super::tables::swb;

/// 最大缩放因子频带数
pub const MAX_SFB: usize = 51;
/// 短窗个数
pub const MAX_WINDOWS: usize = 8;
/// 每个窗组的分段数上限
pub const MAX_SECTIONS: usize = 120;

/// 窗序列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowSequence {
    #[default]
    OnlyLong,
    LongStart,
    EightShort,
    LongStop,
}

impl WindowSequence {
    fn from_bits(bits: u32) -> Self {
        match bits & 3 {
            0 => Self::OnlyLong,
            1 => Self::LongStart,
            2 => Self::EightShort,
            _ => Self::LongStop,
        }
    }

    pub fn is_short(self) -> bool {
        self == Self::EightShort
    }
}

/// 窗形状
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowShape {
    #[default]
    Sine,
    Kbd,
}

/// 一个分段: 窗组 `group` 内 [start, end) 频带使用同一码本
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub group: usize,
    pub cb: u8,
    pub start: usize,
    pub end: usize,
}

/// 单声道流的帧内状态
#[derive(Debug, Clone)]
pub struct Ics {
    pub window_sequence: WindowSequence,
    pub window_shape: WindowShape,
    pub max_sfb: usize,
    pub num_swb: usize,
    pub num_windows: usize,
    pub num_window_groups: usize,
    pub window_group_length: [usize; MAX_WINDOWS],
    pub scale_factor_grouping: u8,
    /// 单个窗内的频带边界, `swb_offset[num_swb]` 为窗长
    pub swb_offset: [u16; MAX_SFB + 1],
    pub swb_offset_max: usize,
    /// 窗组内 (交织后) 的频带边界
    pub sect_sfb_offset: [[u16; MAX_SFB + 1]; MAX_WINDOWS],

    pub sections: Vec<Section>,
    pub sfb_cb: [[u8; MAX_SFB]; MAX_WINDOWS],
    pub global_gain: u8,
    pub scale_factors: [[i16; MAX_SFB]; MAX_WINDOWS],
    pub noise_used: bool,
    pub is_used: bool,

    /// 0: 无 M/S, 1: 按频带, 2: 全部频带
    pub ms_mask_present: u8,
    pub ms_used: [[bool; MAX_SFB]; MAX_WINDOWS],

    pub pulse: Option<PulseData>,
    pub tns: Option<TnsData>,
    pub predictor_data_present: bool,
    pub prediction: PredictionInfo,
    pub ltp: LtpInfo,
    /// 公共窗 CPE 中第二声道的 LTP 参数
    pub ltp2: LtpInfo,

    pub rvlc: RvlcInfo,
    pub reordered_spectral_length: usize,
    pub longest_codeword_length: usize,
}

impl Default for Ics {
    fn default() -> Self {
        Self {
            window_sequence: WindowSequence::OnlyLong,
            window_shape: WindowShape::Sine,
            max_sfb: 0,
            num_swb: 0,
            num_windows: 1,
            num_window_groups: 1,
            window_group_length: [1, 0, 0, 0, 0, 0, 0, 0],
            scale_factor_grouping: 0,
            swb_offset: [0; MAX_SFB + 1],
            swb_offset_max: 0,
            sect_sfb_offset: [[0; MAX_SFB + 1]; MAX_WINDOWS],
            sections: Vec::new(),
            sfb_cb: [[ZERO_HCB; MAX_SFB]; MAX_WINDOWS],
            global_gain: 0,
            scale_factors: [[0; MAX_SFB]; MAX_WINDOWS],
            noise_used: false,
            is_used: false,
            ms_mask_present: 0,
            ms_used: [[false; MAX_SFB]; MAX_WINDOWS],
            pulse: None,
            tns: None,
            predictor_data_present: false,
            prediction: PredictionInfo::default(),
            ltp: LtpInfo::default(),
            ltp2: LtpInfo::default(),
            rvlc: RvlcInfo::default(),
            reordered_spectral_length: 0,
            longest_codeword_length: 0,
        }
    }
}

impl Ics {
    /// 解析 ics_info
    pub fn parse_info(
        &mut self,
        br: &mut BitCursor<'_>,
        cfg: &FrameConfig,
        common_window: bool,
    ) -> AacResult<()> {
        // ics_reserved_bit
        br.get_bit();
        self.window_sequence = WindowSequence::from_bits(br.get_bits(2));
        self.window_shape = if br.get_bit() == 1 {
            WindowShape::Kbd
        } else {
            WindowShape::Sine
        };

        // LD 只有长窗
        if cfg.object_type.is_low_delay() && self.window_sequence != WindowSequence::OnlyLong {
            return Err(AacFault::BandLimit);
        }

        if self.window_sequence.is_short() {
            self.max_sfb = br.get_bits(4) as usize;
            self.scale_factor_grouping = br.get_bits(7) as u8;
        } else {
            self.max_sfb = br.get_bits(6) as usize;
        }

        self.window_grouping(cfg)?;
        if self.max_sfb > self.num_swb {
            return Err(AacFault::BandLimit);
        }

        self.predictor_data_present = false;
        self.prediction = PredictionInfo::default();
        self.ltp = LtpInfo::default();
        self.ltp2 = LtpInfo::default();
        if !self.window_sequence.is_short() {
            self.predictor_data_present = br.get_bit() == 1;
            if self.predictor_data_present {
                self.parse_predictor_data(br, cfg, common_window)?;
            }
        }
        Ok(())
    }

    fn parse_predictor_data(
        &mut self,
        br: &mut BitCursor<'_>,
        cfg: &FrameConfig,
        common_window: bool,
    ) -> AacResult<()> {
        let ot = cfg.object_type;
        if ot == ObjectType::Main {
            self.prediction = PredictionInfo::parse(br, self.max_sfb, cfg.sf_index);
            return Ok(());
        }
        if !ot.uses_ltp() {
            return Err(AacFault::LtpUnavailable);
        }
        if !ot.is_error_resilient() {
            self.ltp = LtpInfo::parse(br, self.max_sfb, cfg)?;
            if common_window {
                self.ltp2 = LtpInfo::parse(br, self.max_sfb, cfg)?;
            }
        } else if !common_window {
            self.ltp = LtpInfo::parse(br, self.max_sfb, cfg)?;
        }
        Ok(())
    }

    /// 由窗序列与分组位推导窗组与频带边界
    fn window_grouping(&mut self, cfg: &FrameConfig) -> AacResult<()> {
        let sf = usize::from(cfg.sf_index);
        let frame_length = cfg.frame_length;
        if self.window_sequence.is_short() {
            let table = swb::short_offsets(sf).ok_or(AacFault::SampleRateIndex)?;
            self.num_windows = 8;
            self.num_window_groups = 1;
            self.window_group_length = [1, 0, 0, 0, 0, 0, 0, 0];
            self.num_swb = swb::num_swb_short(sf);
            self.swb_offset_max = frame_length / 8;
            self.swb_offset[..self.num_swb].copy_from_slice(&table[..self.num_swb]);
            self.swb_offset[self.num_swb] = self.swb_offset_max as u16;

            for i in 0..self.num_windows - 1 {
                if self.scale_factor_grouping & (1 << (6 - i)) == 0 {
                    self.num_window_groups += 1;
                    self.window_group_length[self.num_window_groups - 1] = 1;
                } else {
                    self.window_group_length[self.num_window_groups - 1] += 1;
                }
            }

            for g in 0..self.num_window_groups {
                let mut offset = 0u16;
                for i in 0..self.num_swb {
                    self.sect_sfb_offset[g][i] = offset;
                    let width = self.swb_offset[i + 1] - self.swb_offset[i];
                    offset += width * self.window_group_length[g] as u16;
                }
                self.sect_sfb_offset[g][self.num_swb] = offset;
            }
        } else {
            let table = swb::long_offsets(frame_length, sf).ok_or(AacFault::SampleRateIndex)?;
            self.num_windows = 1;
            self.num_window_groups = 1;
            self.window_group_length = [1, 0, 0, 0, 0, 0, 0, 0];
            self.num_swb = swb::num_swb_long(frame_length, sf);
            self.swb_offset_max = frame_length;
            self.swb_offset[..self.num_swb].copy_from_slice(&table[..self.num_swb]);
            self.swb_offset[self.num_swb] = frame_length as u16;
            self.sect_sfb_offset[0] = self.swb_offset;
        }
        Ok(())
    }

    /// 解析分段数据 (section_data)
    pub fn parse_section_data(&mut self, br: &mut BitCursor<'_>, cfg: &FrameConfig) -> AacResult<()> {
        let (sect_bits, sect_esc_val) = if self.window_sequence.is_short() {
            (3, 7)
        } else {
            (5, 31)
        };
        let resilient = cfg.resilience.section_data;
        let cb_bits = if resilient { 5 } else { 4 };

        self.sections.clear();
        self.noise_used = false;
        self.is_used = false;
        for group_cb in self.sfb_cb.iter_mut() {
            group_cb.fill(ZERO_HCB);
        }

        for g in 0..self.num_window_groups {
            let mut k = 0;
            let mut count = 0;
            while k < self.max_sfb {
                if br.has_error() {
                    return Err(AacFault::BufferExhausted);
                }
                let cb = br.get_bits(cb_bits) as u8;
                match CodebookKind::from_id(cb) {
                    CodebookKind::Reserved => return Err(AacFault::InvalidCodebook),
                    CodebookKind::Noise => self.noise_used = true,
                    CodebookKind::Intensity(_) => self.is_used = true,
                    _ => {}
                }

                let mut sect_len = 0;
                // 容错模式下 11 号及虚拟码本的分段固定为 1 个频带
                if resilient && (cb == ESC_HCB || cb >= 16) {
                    sect_len = 1;
                } else {
                    let mut incr = br.get_bits(sect_bits) as usize;
                    while incr == sect_esc_val {
                        sect_len += incr;
                        if br.has_error() {
                            return Err(AacFault::BufferExhausted);
                        }
                        incr = br.get_bits(sect_bits) as usize;
                    }
                    sect_len += incr;
                }

                if count >= MAX_SECTIONS || k + sect_len > self.max_sfb {
                    return Err(AacFault::SectionIndex);
                }
                self.sfb_cb[g][k..k + sect_len].fill(cb);
                self.sections.push(Section {
                    group: g,
                    cb,
                    start: k,
                    end: k + sect_len,
                });
                k += sect_len;
                count += 1;
            }
        }
        Ok(())
    }

    /// 解析标准 (Huffman 差分) 缩放因子
    pub fn parse_scale_factors(&mut self, br: &mut BitCursor<'_>) -> AacResult<()> {
        let mut scale_factor = i32::from(self.global_gain);
        let mut is_position = 0i32;
        let mut noise_energy = i32::from(self.global_gain) - 90;
        let mut noise_pcm = true;

        for g in 0..self.num_window_groups {
            for sfb in 0..self.max_sfb {
                let value = match self.sfb_cb[g][sfb] {
                    ZERO_HCB => 0,
                    INTENSITY_HCB | INTENSITY_HCB2 => {
                        is_position += huffman::decode_scalefactor_delta(br)?;
                        is_position
                    }
                    NOISE_HCB => {
                        let delta = if noise_pcm {
                            noise_pcm = false;
                            br.get_bits(9) as i32 - 256
                        } else {
                            huffman::decode_scalefactor_delta(br)?
                        };
                        noise_energy += delta;
                        noise_energy
                    }
                    _ => {
                        scale_factor += huffman::decode_scalefactor_delta(br)?;
                        if !(0..=255).contains(&scale_factor) {
                            return Err(AacFault::ScaleFactorRange);
                        }
                        scale_factor
                    }
                };
                self.scale_factors[g][sfb] = value as i16;
            }
        }
        Ok(())
    }

    /// 频带码本分类
    pub fn band_kind(&self, g: usize, sfb: usize) -> CodebookKind {
        CodebookKind::from_id(self.sfb_cb[g][sfb])
    }

    pub fn is_noise(&self, g: usize, sfb: usize) -> bool {
        self.sfb_cb[g][sfb] == NOISE_HCB
    }

    /// 强度立体声方向: +1 同相, -1 反相, 0 非强度频带
    pub fn is_intensity(&self, g: usize, sfb: usize) -> i8 {
        match self.band_kind(g, sfb) {
            CodebookKind::Intensity(sign) => sign,
            _ => 0,
        }
    }

    /// 长窗频带是否由 PNS 或强度立体声重建, 这类频带不叠加预测值
    pub fn excluded_from_prediction(&self, sfb: usize) -> bool {
        self.is_noise(0, sfb) || self.is_intensity(0, sfb) != 0
    }

    /// 公共窗 CPE 的第二声道: 继承窗信息, 取 ltp2 作为自身 LTP 参数
    pub fn common_window_twin(&self) -> Ics {
        let mut twin = self.clone();
        twin.ltp = self.ltp2;
        twin.ltp2 = LtpInfo::default();
        twin
    }
}
