//! ICS 附带的边信息: 脉冲, TNS, LTP, Main 预测, SSR 增益控制.

use yin_core::{BitCursor, BitSource};

use super::config::{FrameConfig, ObjectType};
use super::fault::{AacFault, AacResult};
use super::ics::{Ics, WindowSequence};
use super::tables::{MAX_LTP_SFB, MAX_PRED_SFB};

/// 脉冲数据, 在反量化前叠加到量化频谱上
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PulseData {
    pub count: usize,
    pub start_sfb: usize,
    pub offsets: [u8; 4],
    pub amps: [u8; 4],
}

impl PulseData {
    pub fn parse(br: &mut BitCursor<'_>, num_swb: usize) -> AacResult<Self> {
        let mut pulse = PulseData {
            count: br.get_bits(2) as usize + 1,
            start_sfb: br.get_bits(6) as usize,
            ..Default::default()
        };
        if pulse.start_sfb > num_swb {
            return Err(AacFault::BandLimit);
        }
        for i in 0..pulse.count {
            pulse.offsets[i] = br.get_bits(5) as u8;
            pulse.amps[i] = br.get_bits(4) as u8;
        }
        Ok(pulse)
    }

    /// 叠加脉冲: 幅度朝远离零的方向增加
    pub fn apply(&self, ics: &Ics, spec: &mut [i32]) -> AacResult<()> {
        let mut k = usize::from(ics.swb_offset[self.start_sfb]).min(ics.swb_offset_max);
        for i in 0..self.count {
            k += usize::from(self.offsets[i]);
            let Some(q) = spec.get_mut(k) else {
                return Err(AacFault::SectionIndex);
            };
            let amp = i32::from(self.amps[i]);
            if *q > 0 {
                *q += amp;
            } else {
                *q -= amp;
            }
        }
        Ok(())
    }
}

/// 单个 TNS 滤波器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TnsFilter {
    /// 作用范围 (缩放因子频带数)
    pub length: u8,
    pub order: u8,
    /// true 表示自高频向低频滤波
    pub direction: bool,
    pub coef_compress: bool,
    pub coef: [u8; 32],
}

impl Default for TnsFilter {
    fn default() -> Self {
        Self {
            length: 0,
            order: 0,
            direction: false,
            coef_compress: false,
            coef: [0; 32],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TnsWindow {
    pub n_filt: usize,
    /// 系数分辨率: true 为 4 位, false 为 3 位
    pub coef_res: bool,
    pub filters: [TnsFilter; 3],
}

/// 每个窗的 TNS 参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TnsData {
    pub windows: [TnsWindow; 8],
}

impl TnsData {
    pub fn parse(br: &mut BitCursor<'_>, ics: &Ics) -> Self {
        let short = ics.window_sequence.is_short();
        let (n_filt_bits, length_bits, order_bits) = if short { (1, 4, 3) } else { (2, 6, 5) };
        let mut tns = TnsData::default();
        for w in 0..ics.num_windows {
            let win = &mut tns.windows[w];
            win.n_filt = br.get_bits(n_filt_bits) as usize;
            let mut start_coef_bits = 3;
            if win.n_filt > 0 {
                win.coef_res = br.get_bit() == 1;
                if win.coef_res {
                    start_coef_bits = 4;
                }
            }
            for filt in win.filters.iter_mut().take(win.n_filt) {
                filt.length = br.get_bits(length_bits) as u8;
                filt.order = br.get_bits(order_bits) as u8;
                if filt.order > 0 {
                    filt.direction = br.get_bit() == 1;
                    filt.coef_compress = br.get_bit() == 1;
                    let coef_bits = start_coef_bits - u32::from(filt.coef_compress);
                    for c in filt.coef.iter_mut().take(usize::from(filt.order)) {
                        *c = br.get_bits(coef_bits) as u8;
                    }
                }
            }
        }
        tns
    }
}

/// 长时预测参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LtpInfo {
    pub data_present: bool,
    /// LD: 本帧携带新的延迟
    pub lag_update: bool,
    pub lag: u16,
    /// 增益码本索引
    pub coef: u8,
    pub last_band: usize,
    pub long_used: [bool; MAX_LTP_SFB],
}

impl Default for LtpInfo {
    fn default() -> Self {
        Self {
            data_present: false,
            lag_update: false,
            lag: 0,
            coef: 0,
            last_band: 0,
            long_used: [false; MAX_LTP_SFB],
        }
    }
}

impl LtpInfo {
    /// 读取 ltp_data_present 及其后的 ltp_data
    pub fn parse(br: &mut BitCursor<'_>, max_sfb: usize, cfg: &FrameConfig) -> AacResult<Self> {
        let mut ltp = LtpInfo {
            data_present: br.get_bit() == 1,
            ..Default::default()
        };
        if !ltp.data_present {
            return Ok(ltp);
        }
        if cfg.object_type == ObjectType::Ld {
            ltp.lag_update = br.get_bit() == 1;
            if ltp.lag_update {
                ltp.lag = br.get_bits(10) as u16;
            }
        } else {
            ltp.lag = br.get_bits(11) as u16;
        }
        if usize::from(ltp.lag) > cfg.frame_length << 1 {
            return Err(AacFault::LtpLag);
        }
        ltp.coef = br.get_bits(3) as u8;
        ltp.last_band = max_sfb.min(MAX_LTP_SFB);
        for used in ltp.long_used.iter_mut().take(ltp.last_band) {
            *used = br.get_bit() == 1;
        }
        Ok(ltp)
    }
}

/// Main 预测参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionInfo {
    /// 复位组号 (1..=30), 0 表示本帧不复位
    pub reset_group: u8,
    pub limit: usize,
    pub used: [bool; 41],
}

impl Default for PredictionInfo {
    fn default() -> Self {
        Self {
            reset_group: 0,
            limit: 0,
            used: [false; 41],
        }
    }
}

impl PredictionInfo {
    pub fn parse(br: &mut BitCursor<'_>, max_sfb: usize, sf_index: u8) -> Self {
        let mut pred = PredictionInfo {
            limit: max_sfb.min(MAX_PRED_SFB[usize::from(sf_index)]),
            ..Default::default()
        };
        if br.get_bit() == 1 {
            pred.reset_group = br.get_bits(5) as u8;
        }
        for used in pred.used.iter_mut().take(pred.limit) {
            *used = br.get_bit() == 1;
        }
        pred
    }
}

/// 跳过 SSR 增益控制数据 (不参与重建)
pub fn skip_gain_control(br: &mut BitCursor<'_>, window_sequence: WindowSequence) {
    let max_band = br.get_bits(2);
    // (窗数, 首窗位置码位数, 其余窗位置码位数)
    let (windows, first_loc_bits, loc_bits) = match window_sequence {
        WindowSequence::OnlyLong => (1, 5, 5),
        WindowSequence::LongStart => (2, 4, 2),
        WindowSequence::EightShort => (8, 2, 2),
        WindowSequence::LongStop => (2, 4, 5),
    };
    for _ in 0..max_band {
        for wd in 0..windows {
            let adjust_num = br.get_bits(3);
            let loc = if wd == 0 { first_loc_bits } else { loc_bits };
            for _ in 0..adjust_num {
                br.consume(4 + loc);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yin_core::BitWriter;

    fn long_ics(max_sfb: usize) -> Ics {
        Ics {
            max_sfb,
            num_windows: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_tns_长窗解析() {
        let mut w = BitWriter::new();
        w.write_bits(1, 2); // n_filt
        w.write_bit(1); // coef_res = 4 位
        w.write_bits(20, 6);
        w.write_bits(2, 5);
        w.write_bit(1);
        w.write_bit(1); // 压缩 -> 3 位
        w.write_bits(0b101, 3);
        w.write_bits(0b011, 3);
        let data = w.finish();
        let mut br = BitCursor::new(&data).unwrap();
        let tns = TnsData::parse(&mut br, &long_ics(10));
        let f = &tns.windows[0].filters[0];
        assert_eq!(tns.windows[0].n_filt, 1);
        assert_eq!((f.length, f.order, f.direction), (20, 2, true));
        assert_eq!(&f.coef[..2], &[0b101, 0b011]);
        assert_eq!(br.bits_consumed(), 2 + 1 + 6 + 5 + 2 + 6);
    }

    #[test]
    fn test_ltp_延迟越界() {
        let cfg = FrameConfig::new(ObjectType::Ltp, 4, 1)
            .and_then(|c| c.with_small_frames(true))
            .unwrap();
        let mut w = BitWriter::new();
        w.write_bit(1);
        w.write_bits(1921, 11);
        let data = w.finish();
        let mut br = BitCursor::new(&data).unwrap();
        assert_eq!(LtpInfo::parse(&mut br, 10, &cfg), Err(AacFault::LtpLag));

        let mut w = BitWriter::new();
        w.write_bit(1);
        w.write_bits(1000, 11);
        w.write_bits(3, 3);
        w.write_pattern("101");
        let data = w.finish();
        let mut br = BitCursor::new(&data).unwrap();
        let ltp = LtpInfo::parse(&mut br, 3, &cfg).unwrap();
        assert_eq!((ltp.lag, ltp.coef, ltp.last_band), (1000, 3, 3));
        assert_eq!(&ltp.long_used[..3], &[true, false, true]);
    }

    #[test]
    fn test_ld_延迟更新() {
        let cfg = FrameConfig::new(ObjectType::Ld, 3, 1).unwrap();
        let mut w = BitWriter::new();
        w.write_bit(1);
        w.write_bit(0); // 沿用上一帧延迟
        w.write_bits(5, 3);
        let data = w.finish();
        let mut br = BitCursor::new(&data).unwrap();
        let ltp = LtpInfo::parse(&mut br, 0, &cfg).unwrap();
        assert!(ltp.data_present && !ltp.lag_update);
        assert_eq!(ltp.coef, 5);
    }

    #[test]
    fn test_脉冲叠加() {
        let mut ics = long_ics(2);
        ics.swb_offset[1] = 4;
        ics.swb_offset_max = 1024;
        let pulse = PulseData {
            count: 2,
            start_sfb: 1,
            offsets: [1, 2, 0, 0],
            amps: [3, 2, 0, 0],
        };
        let mut spec = vec![0i32; 1024];
        spec[7] = -1;
        pulse.apply(&ics, &mut spec).unwrap();
        assert_eq!(spec[5], -3);
        assert_eq!(spec[7], -3);

        let far = PulseData {
            count: 1,
            start_sfb: 1,
            offsets: [31, 0, 0, 0],
            amps: [1, 0, 0, 0],
        };
        let mut short = vec![0i32; 16];
        assert_eq!(far.apply(&ics, &mut short), Err(AacFault::SectionIndex));
    }

    #[test]
    fn test_增益控制跳过() {
        let mut w = BitWriter::new();
        w.write_bits(1, 2); // max_band
        w.write_bits(1, 3); // adjust_num
        w.write_bits(0, 4 + 5);
        w.write_bits(0xA, 4);
        let data = w.finish();
        let mut br = BitCursor::new(&data).unwrap();
        skip_gain_control(&mut br, WindowSequence::OnlyLong);
        assert_eq!(br.get_bits(4), 0xA);
    }
}
