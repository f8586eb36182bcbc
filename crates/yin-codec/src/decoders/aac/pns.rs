//! 感知噪声替代 (PNS).
//!
//! 噪声频带的谱线由线性同余发生器产生, 归一化到单位能量后乘以 2^(sf/4).
//! 声道对中两个声道同一频带都是噪声且该频带标记了 M/S 时, 两声道共用同一噪声向量.

use super::ics::Ics;
use super::real::Real;
use super::specrec::spectrum_exponent;

/// 噪声发生器
///
/// x' = 1664525 · x + 1013904223 (mod 2^32), 初始值为 1. 状态归属于解码会话.
#[derive(Debug, Clone)]
pub struct NoiseGenerator {
    state: u32,
}

impl Default for NoiseGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseGenerator {
    pub const SEED: u32 = 1;

    pub fn new() -> Self {
        Self { state: Self::SEED }
    }

    pub fn reset(&mut self) {
        self.state = Self::SEED;
    }

    pub fn next_value(&mut self) -> i32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state as i32
    }

    /// 生成 `len` 个单位能量的噪声值
    fn unit_vector(&mut self, len: usize, out: &mut Vec<f64>) {
        out.clear();
        let mut energy = 0.0;
        for _ in 0..len {
            let v = f64::from(self.next_value());
            energy += v * v;
            out.push(v);
        }
        if energy > 0.0 {
            let norm = energy.sqrt().recip();
            out.iter_mut().for_each(|v| *v *= norm);
        }
    }
}

fn write_band<R: Real>(unit: &[f64], noise_sf: i16, exponent: i32, dst: &mut [R]) {
    let gain = 2f64.powf(0.25 * f64::from(noise_sf) + f64::from(exponent));
    for (out, &u) in dst.iter_mut().zip(unit) {
        *out = R::from_f64(u * gain);
    }
}

/// 单声道 (或非公共窗声道对中的一个声道) 的 PNS
pub fn apply_single<R: Real>(rng: &mut NoiseGenerator, ics: &Ics, spec: &mut [R], frame_length: usize) {
    if !ics.noise_used {
        return;
    }
    let exponent = spectrum_exponent::<R>(ics, frame_length);
    let mut unit = Vec::new();
    for_each_band(ics, frame_length, |g, sfb, range| {
        if ics.is_noise(g, sfb) {
            rng.unit_vector(range.len(), &mut unit);
            write_band(&unit, ics.scale_factors[g][sfb], exponent, &mut spec[range]);
        }
    });
}

/// 公共窗声道对的 PNS
///
/// 对每个频带依次处理左, 右声道, 右声道在相关情况下复用左声道的噪声向量.
pub fn apply_pair<R: Real>(
    rng: &mut NoiseGenerator,
    left_ics: &Ics,
    left: &mut [R],
    right_ics: &Ics,
    right: &mut [R],
    frame_length: usize,
) {
    if !left_ics.noise_used && !right_ics.noise_used {
        return;
    }
    let exponent = spectrum_exponent::<R>(left_ics, frame_length);
    let mut unit = Vec::new();
    for_each_band(left_ics, frame_length, |g, sfb, range| {
        let left_noise = left_ics.is_noise(g, sfb);
        if left_noise {
            rng.unit_vector(range.len(), &mut unit);
            write_band(&unit, left_ics.scale_factors[g][sfb], exponent, &mut left[range.clone()]);
        }
        if right_ics.is_noise(g, sfb) {
            let correlated = left_noise
                && (left_ics.ms_mask_present == 2
                    || (left_ics.ms_mask_present == 1 && left_ics.ms_used[g][sfb]));
            if !correlated {
                rng.unit_vector(range.len(), &mut unit);
            }
            write_band(&unit, right_ics.scale_factors[g][sfb], exponent, &mut right[range]);
        }
    });
}

/// 按 (窗组, 窗, 频带) 顺序遍历解交织后的频带区间
pub(crate) fn for_each_band<F>(ics: &Ics, frame_length: usize, mut f: F)
where
    F: FnMut(usize, usize, std::ops::Range<usize>),
{
    let nshort = frame_length / 8;
    let mut window = 0;
    for g in 0..ics.num_window_groups {
        for _ in 0..ics.window_group_length[g] {
            let base = window * nshort;
            for sfb in 0..ics.max_sfb {
                let lo = base + usize::from(ics.swb_offset[sfb]);
                let hi = base + usize::from(ics.swb_offset[sfb + 1]);
                f(g, sfb, lo..hi);
            }
            window += 1;
        }
    }
}
