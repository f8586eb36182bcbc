//! 联合立体声: M/S 与强度立体声.
//!
//! 每个频带只走一条处理路径, 优先级: 噪声 > 强度 > M/S > 不处理.
//! 噪声频带已由 PNS 填充, 这里保持不动.

use super::ics::Ics;
use super::pns::for_each_band;
use super::real::Real;

/// 单个频带的立体声处理路径
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandPath {
    Plain,
    Noise,
    MidSide,
    Intensity,
}

pub fn band_path(left: &Ics, right: &Ics, g: usize, sfb: usize) -> BandPath {
    if left.is_noise(g, sfb) || right.is_noise(g, sfb) {
        BandPath::Noise
    } else if right.is_intensity(g, sfb) != 0 {
        BandPath::Intensity
    } else if ms_flagged(left, g, sfb) {
        BandPath::MidSide
    } else {
        BandPath::Plain
    }
}

fn ms_flagged(ics: &Ics, g: usize, sfb: usize) -> bool {
    match ics.ms_mask_present {
        1 => ics.ms_used[g][sfb],
        2 => true,
        _ => false,
    }
}

/// 对公共窗声道对做 M/S 与强度立体声解码
pub fn apply<R: Real>(
    left_ics: &Ics,
    left: &mut [R],
    right_ics: &Ics,
    right: &mut [R],
    frame_length: usize,
) {
    if left_ics.ms_mask_present == 0 && !right_ics.is_used {
        return;
    }
    for_each_band(left_ics, frame_length, |g, sfb, range| {
        match band_path(left_ics, right_ics, g, sfb) {
            BandPath::Plain | BandPath::Noise => {}
            BandPath::MidSide => {
                for (l, r) in left[range.clone()].iter_mut().zip(&mut right[range]) {
                    let (m, s) = (*l, *r);
                    *l = m + s;
                    *r = m - s;
                }
            }
            BandPath::Intensity => {
                // M/S 掩码为 1 时, ms_used 反转强度方向
                let invert = if left_ics.ms_mask_present == 1 && left_ics.ms_used[g][sfb] {
                    -1
                } else {
                    1
                };
                let sign = i32::from(right_ics.is_intensity(g, sfb)) * invert;
                let position = i32::from(right_ics.scale_factors[g][sfb]);
                for (l, r) in left[range.clone()].iter().zip(&mut right[range]) {
                    let v = l.mul_pow2_quarter(-position, 0);
                    *r = if sign < 0 { -v } else { v };
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoders::aac::huffman::{INTENSITY_HCB, INTENSITY_HCB2, NOISE_HCB};

    const BANDS: usize = 4;

    fn base_ics() -> Ics {
        let mut ics = Ics {
            max_sfb: BANDS,
            num_swb: BANDS,
            ..Default::default()
        };
        for i in 0..=BANDS {
            ics.swb_offset[i] = (i * 4) as u16;
        }
        ics
    }

    /// 与实现独立的期望值
    fn expected(left: &Ics, right: &Ics, sfb: usize, l: f32, r: f32) -> (f32, f32, BandPath) {
        let noise = left.sfb_cb[0][sfb] == NOISE_HCB || right.sfb_cb[0][sfb] == NOISE_HCB;
        let rcb = right.sfb_cb[0][sfb];
        let ms = left.ms_mask_present == 2 || (left.ms_mask_present == 1 && left.ms_used[0][sfb]);
        if noise {
            (l, r, BandPath::Noise)
        } else if rcb == INTENSITY_HCB || rcb == INTENSITY_HCB2 {
            let mut sign = if rcb == INTENSITY_HCB { 1.0 } else { -1.0 };
            if left.ms_mask_present == 1 && left.ms_used[0][sfb] {
                sign = -sign;
            }
            let pos = f32::from(right.scale_factors[0][sfb]);
            (l, sign * l * 2f32.powf(-0.25 * pos), BandPath::Intensity)
        } else if ms {
            (l + r, l - r, BandPath::MidSide)
        } else {
            (l, r, BandPath::Plain)
        }
    }

    #[test]
    fn test_立体声路径互斥() {
        let mut seed = 7u32;
        let mut next = |m: u32| {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (seed >> 16) % m
        };
        for _ in 0..500 {
            let mut left = base_ics();
            let mut right = base_ics();
            left.ms_mask_present = next(3) as u8;
            for sfb in 0..BANDS {
                left.ms_used[0][sfb] = next(2) == 1;
                left.sfb_cb[0][sfb] = if next(4) == 0 { NOISE_HCB } else { 1 };
                right.sfb_cb[0][sfb] = [1, NOISE_HCB, INTENSITY_HCB, INTENSITY_HCB2][next(4) as usize];
                right.scale_factors[0][sfb] = next(9) as i16 - 4;
            }
            right.is_used = true;
            right.ms_mask_present = left.ms_mask_present;
            right.ms_used = left.ms_used;

            let mut l: Vec<f32> = (0..BANDS * 4).map(|k| 1.0 + k as f32).collect();
            let mut r: Vec<f32> = (0..BANDS * 4).map(|k| 0.5 - k as f32 * 0.25).collect();
            let (l0, r0) = (l.clone(), r.clone());
            apply(&left, &mut l, &right, &mut r, 1024);

            for sfb in 0..BANDS {
                let path = band_path(&left, &right, 0, sfb);
                for k in sfb * 4..sfb * 4 + 4 {
                    let (el, er, ep) = expected(&left, &right, sfb, l0[k], r0[k]);
                    assert_eq!(path, ep);
                    assert!((l[k] - el).abs() < 1e-4, "sfb {sfb} {path:?}");
                    assert!((r[k] - er).abs() < 1e-4, "sfb {sfb} {path:?}");
                }
            }
        }
    }

    #[test]
    fn test_全频带_ms() {
        let mut left = base_ics();
        left.ms_mask_present = 2;
        left.sfb_cb[0][..BANDS].fill(1);
        let mut right = left.clone();
        right.ms_mask_present = 2;
        let mut l = vec![3.0f32; 16];
        let mut r = vec![1.0f32; 16];
        apply(&left, &mut l, &right, &mut r, 1024);
        assert!(l.iter().all(|&v| v == 4.0));
        assert!(r.iter().all(|&v| v == 2.0));
    }
}
