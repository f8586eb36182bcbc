//! 频谱重建: 反量化, 缩放因子与短窗解交织.
//!
//! 三步合并为一趟遍历. 输出按窗排列: 窗 w 的谱线位于 `w * nshort + k`.
//! 定点路径额外乘以 2^(IQ_TABLE_SHIFT + e), e 为 [`Real::spectral_exponent`].

use super::fault::{AacFault, AacResult};
use super::huffman::CodebookKind;
use super::ics::Ics;
use super::real::{IQ_TABLE_SIZE, Real};

/// 反量化上限 (不含)
const IQUANT_LIMIT: usize = 8192;

/// |q|^(4/3) · sign(q), 表外的值以 8 为步长线性插值
fn iquant<R: Real>(q: i32, table: &[R]) -> AacResult<R> {
    let a = q.unsigned_abs() as usize;
    let mag = if a < IQ_TABLE_SIZE {
        table[a]
    } else if a < IQUANT_LIMIT {
        let x1 = table[a >> 3];
        let x2 = table[(a >> 3) + 1];
        let frac = R::coef((a & 7) as f64 / 8.0);
        (x1 + (x2 - x1).mul_c(frac)).shift(4)
    } else {
        return Err(AacFault::IquantRange);
    };
    Ok(if q < 0 { -mag } else { mag })
}

/// 频谱在本解码路径下的额外缩放指数
pub fn spectrum_exponent<R: Real>(ics: &Ics, frame_length: usize) -> i32 {
    let transform_len = if ics.window_sequence.is_short() {
        2 * frame_length / 8
    } else {
        2 * frame_length
    };
    R::spectral_exponent(transform_len)
}

/// 量化值 -> 频谱
pub fn quant_to_spec<R: Real>(
    ics: &Ics,
    quant: &[i32],
    frame_length: usize,
    spec: &mut [R],
) -> AacResult<()> {
    let table = R::iq_table();
    let extra = if R::FIXED {
        R::IQ_TABLE_SHIFT + spectrum_exponent::<R>(ics, frame_length)
    } else {
        0
    };
    let nshort = frame_length / 8;
    spec.fill(R::ZERO);

    let mut k = 0;
    let mut window_base = 0;
    for g in 0..ics.num_window_groups {
        let group_len = ics.window_group_length[g];
        for sfb in 0..ics.num_swb {
            let lo = usize::from(ics.swb_offset[sfb]);
            let hi = usize::from(ics.swb_offset[sfb + 1]);
            let width = hi - lo;
            let spectral = sfb < ics.max_sfb
                && matches!(ics.band_kind(g, sfb), CodebookKind::Spectral(_));
            let sf = i32::from(ics.scale_factors[g][sfb]) - 100;

            for win in 0..group_len {
                let base = window_base + win * nshort + lo;
                let (Some(src), Some(dst)) = (quant.get(k..k + width), spec.get_mut(base..base + width))
                else {
                    return Err(AacFault::SectionIndex);
                };
                k += width;
                if !spectral {
                    continue;
                }
                for (out, &q) in dst.iter_mut().zip(src) {
                    if q != 0 {
                        *out = iquant(q, table)?.mul_pow2_quarter(sf, extra);
                    }
                }
            }
        }
        window_base += group_len * nshort;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoders::aac::config::{FrameConfig, ObjectType};
    use crate::decoders::aac::real::Fixed;
    use yin_core::{BitCursor, BitWriter};

    fn long_ics(max_sfb: usize) -> Ics {
        let cfg = FrameConfig::new(ObjectType::Lc, 4, 1).unwrap();
        let mut w = BitWriter::new();
        w.write_bits(0, 4);
        w.write_bits(max_sfb as u32, 6);
        w.write_bit(0);
        let data = w.finish();
        let mut br = BitCursor::new(&data).unwrap();
        let mut ics = Ics::default();
        ics.parse_info(&mut br, &cfg, false).unwrap();
        for sfb in 0..max_sfb {
            ics.sfb_cb[0][sfb] = 1;
            ics.scale_factors[0][sfb] = 100;
        }
        ics
    }

    #[test]
    fn test_反量化插值() {
        let table = f32::iq_table();
        assert_eq!(iquant(0, table).unwrap(), 0.0);
        assert!((iquant(-8, table).unwrap() + 16.0).abs() < 1e-4);
        for q in [1100, 4000, 8191] {
            let exact = (q as f64).powf(4.0 / 3.0);
            let got = f64::from(iquant(q, table).unwrap());
            assert!((got - exact).abs() / exact < 1e-3, "q={q}");
        }
        assert_eq!(iquant(8192, table), Err(AacFault::IquantRange));
        assert_eq!(iquant(-9000, table), Err(AacFault::IquantRange));
    }

    fn check_iquant_monotonic<R: Real + PartialOrd>() {
        let table = R::iq_table();
        let mut prev = R::ZERO;
        for q in 0..IQUANT_LIMIT as i32 {
            let v = iquant(q, table).unwrap();
            assert!(prev <= v, "q={q}: {prev:?} > {v:?}");
            assert_eq!(iquant(-q, table).unwrap(), -v, "q={q}");
            prev = v;
        }
        // 查表与插值的分界
        let last = IQ_TABLE_SIZE as i32 - 1;
        assert!(iquant(last, table).unwrap() < iquant(last + 1, table).unwrap());
    }

    #[test]
    fn test_反量化单调且奇对称() {
        check_iquant_monotonic::<f32>();
        check_iquant_monotonic::<Fixed>();
    }

    #[test]
    fn test_长窗缩放因子() {
        let mut ics = long_ics(2);
        ics.scale_factors[0][1] = 104;
        let mut quant = vec![0; 1024];
        quant[0] = 1;
        quant[4] = -2;
        let mut spec = vec![0.0f32; 1024];
        quant_to_spec(&ics, &quant, 1024, &mut spec).unwrap();
        assert!((spec[0] - 1.0).abs() < 1e-6);
        let expect = -(2f32.powf(4.0 / 3.0)) * 2.0;
        assert!((spec[4] - expect).abs() < 1e-4);
    }

    #[test]
    fn test_定点频谱附加指数() {
        let ics = long_ics(1);
        let mut quant = vec![0; 1024];
        quant[0] = 8;
        let mut spec = vec![Fixed(0); 1024];
        quant_to_spec(&ics, &quant, 1024, &mut spec).unwrap();
        // 16 · 2^-10
        let e = spectrum_exponent::<Fixed>(&ics, 1024);
        assert_eq!(e, -10);
        assert!((spec[0].to_f64() - 16.0 / 1024.0).abs() < 1e-3);
    }

    #[test]
    fn test_短窗解交织() {
        let cfg = FrameConfig::new(ObjectType::Lc, 4, 1).unwrap();
        let mut w = BitWriter::new();
        w.write_bit(0);
        w.write_bits(2, 2);
        w.write_bit(0);
        w.write_bits(2, 4);
        w.write_pattern("1000000"); // 窗组 [2, 1, 1, 1, 1, 1, 1]
        let data = w.finish();
        let mut br = BitCursor::new(&data).unwrap();
        let mut ics = Ics::default();
        ics.parse_info(&mut br, &cfg, false).unwrap();
        for g in 0..ics.num_window_groups {
            ics.sfb_cb[g][..2].fill(1);
            ics.scale_factors[g][..2].fill(100);
        }

        let mut quant = vec![0; 1024];
        quant[4] = 1; // 窗组 0, 频带 0, 第二个窗
        quant[8] = 1; // 窗组 0, 频带 1, 第一个窗
        quant[128 * 2] = -1; // 窗组 1 (窗 2), 频带 0
        let mut spec = vec![0.0f32; 1024];
        quant_to_spec(&ics, &quant, 1024, &mut spec).unwrap();
        assert_eq!(spec[128], 1.0);
        assert_eq!(spec[4], 1.0);
        assert_eq!(spec[256], -1.0);
        assert_eq!(spec.iter().filter(|&&v| v != 0.0).count(), 3);
    }
}
