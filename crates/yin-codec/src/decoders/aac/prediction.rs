//! Main 档次的帧间 (逐谱线) 后向自适应预测.
//!
//! 每条谱线一个二阶格型预测器. 状态以截断到高 16 位的 f32 保存,
//! 与参考实现的量化规则保持一致, 因此只在浮点路径上提供.

use std::sync::OnceLock;

use super::ics::Ics;
use super::pns::for_each_band;
use super::tables::MAX_PRED_SFB;

const ALPHA: f32 = 0.906_25;
const A: f32 = 0.953_125;
const B: f32 = 0.953_125;

/// 复位后的方差 (1.0 的高 16 位)
const VAR_RESET: u16 = 0x3F80;

/// 单条谱线的预测器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictorCell {
    r: [u16; 2],
    cor: [u16; 2],
    var: [u16; 2],
}

impl Default for PredictorCell {
    fn default() -> Self {
        Self {
            r: [0; 2],
            cor: [0; 2],
            var: [VAR_RESET; 2],
        }
    }
}

impl PredictorCell {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 对一条谱线做预测, `used` 为 false 时只更新状态
    fn predict(&mut self, input: f32, used: bool) -> f32 {
        let r = self.r.map(expand);
        let cor = self.cor.map(expand);
        let var = self.var.map(expand);

        let k1 = gain(self.var[0], cor[0]);
        let mut output = input;
        if used {
            let k2 = gain(self.var[1], cor[1]);
            output = input + round_half(k1 * r[0] + k2 * r[1]);
        }

        let e0 = output;
        let e1 = e0 - k1 * r[0];
        let dr1 = k1 * e0;

        let var0 = ALPHA * var[0] + 0.5 * (r[0] * r[0] + e0 * e0);
        let cor0 = ALPHA * cor[0] + r[0] * e0;
        let var1 = ALPHA * var[1] + 0.5 * (r[1] * r[1] + e1 * e1);
        let cor1 = ALPHA * cor[1] + r[1] * e1;

        let r1 = A * (r[0] - dr1);
        let r0 = A * e0;

        self.r = [compress(r0), compress(r1)];
        self.cor = [compress(cor0), compress(cor1)];
        self.var = [compress(var0), compress(var1)];
        output
    }
}

/// B / var 按压缩方差的指数与 7 位尾数分别查表
struct GainTables {
    /// 2^-(e+1), e 为指数减 128
    exp: [f32; 128],
    /// B / (1 + m/128), 舍入到 1/256
    mnt: [f32; 128],
}

fn gain_tables() -> &'static GainTables {
    static TABLES: OnceLock<GainTables> = OnceLock::new();
    TABLES.get_or_init(|| {
        let mut exp = [0.0f32; 128];
        let mut mnt = [0.0f32; 128];
        for (i, (e, m)) in exp.iter_mut().zip(mnt.iter_mut()).enumerate() {
            *e = 2f64.powi(-(i as i32 + 1)) as f32;
            let v = f64::from(B) / (1.0 + i as f64 / 128.0);
            *m = ((v * 256.0).round() / 256.0) as f32;
        }
        GainTables { exp, mnt }
    })
}

/// 方差小于 2 时不做预测
fn gain(var_bits: u16, cor: f32) -> f32 {
    let j = usize::from(var_bits >> 7);
    let Some(index) = j.checked_sub(128) else {
        return 0.0;
    };
    let tables = gain_tables();
    match tables.exp.get(index) {
        Some(&e) => cor * e * tables.mnt[usize::from(var_bits & 0x7F)],
        None => 0.0,
    }
}

/// 取 f32 高 16 位 (就近舍入)
fn compress(x: f32) -> u16 {
    (x.to_bits().wrapping_add(0x8000) >> 16) as u16
}

fn expand(q: u16) -> f32 {
    f32::from_bits(u32::from(q) << 16)
}

/// 保留高 16 位, 半个最低位向远离零方向进位
fn round_half(x: f32) -> f32 {
    let bits = x.to_bits();
    let truncated = f32::from_bits(bits & 0xFFFF_0000);
    if bits & 0x8000 == 0 {
        return truncated;
    }
    let exponent = bits & 0xFF80_0000;
    truncated + f32::from_bits(exponent | 0x0001_0000) - f32::from_bits(exponent)
}

/// 对一个声道的长窗频谱做 Main 预测; 短窗时复位全部预测器
pub fn apply(ics: &Ics, spec: &mut [f32], cells: &mut [PredictorCell], sf_index: u8) {
    if ics.window_sequence.is_short() {
        cells.iter_mut().for_each(PredictorCell::reset);
        return;
    }
    let bands = MAX_PRED_SFB[usize::from(sf_index)].min(ics.num_swb);
    for sfb in 0..bands {
        let lo = usize::from(ics.swb_offset[sfb]);
        let hi = usize::from(ics.swb_offset[sfb + 1]).min(ics.swb_offset_max);
        let used = ics.predictor_data_present
            && !ics.excluded_from_prediction(sfb)
            && ics.prediction.used.get(sfb).copied().unwrap_or(false);
        for bin in lo..hi.min(spec.len()).min(cells.len()) {
            spec[bin] = cells[bin].predict(spec[bin], used);
        }
    }

    if ics.predictor_data_present && ics.prediction.reset_group > 0 {
        let first = usize::from(ics.prediction.reset_group) - 1;
        cells.iter_mut().skip(first).step_by(30).for_each(PredictorCell::reset);
    }
}

/// PNS 频带的谱线不参与预测, 其预测器复位
pub fn reset_noise_bands(ics: &Ics, cells: &mut [PredictorCell], frame_length: usize) {
    if !ics.noise_used {
        return;
    }
    for_each_band(ics, frame_length, |g, sfb, range| {
        if ics.is_noise(g, sfb) {
            for cell in cells.iter_mut().take(range.end).skip(range.start) {
                cell.reset();
            }
        }
    });
}
