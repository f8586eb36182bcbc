//! 滤波器组: 加窗, IMDCT 与重叠相加.
//!
//! 窗表与变换计划按帧长构建一次, 之后只读共享. 每个声道的重叠缓冲由调用方持有.

use std::f64::consts::PI;

use super::ics::{WindowSequence, WindowShape};
use super::mdct::Mdct;
use super::real::Real;

/// 长窗 KBD 的 alpha
const KBD_ALPHA_LONG: f64 = 4.0;
/// 短窗 KBD 的 alpha
const KBD_ALPHA_SHORT: f64 = 6.0;

/// 正弦窗的上升半边, 长度 `n`
pub fn sine_window(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| (PI / (2.0 * n as f64) * (i as f64 + 0.5)).sin())
        .collect()
}

/// 第一类零阶修正贝塞尔函数
fn bessel_i0(x: f64) -> f64 {
    let half = x / 2.0;
    let mut sum = 1.0;
    let mut term = 1.0;
    for k in 1..64 {
        term *= half / k as f64;
        let t = term * term;
        sum += t;
        if t < sum * 1e-17 {
            break;
        }
    }
    sum
}

/// KBD 窗的上升半边, 长度 `n`
pub fn kbd_window(n: usize, alpha: f64) -> Vec<f64> {
    let kaiser: Vec<f64> = (0..=n)
        .map(|j| {
            let r = 2.0 * j as f64 / n as f64 - 1.0;
            bessel_i0(PI * alpha * (1.0 - r * r).max(0.0).sqrt())
        })
        .collect();
    let total: f64 = kaiser.iter().sum();
    let mut acc = 0.0;
    kaiser[..n]
        .iter()
        .map(|w| {
            acc += w;
            (acc / total).sqrt()
        })
        .collect()
}

/// LD 低重叠窗的上升半边, 长度 `n`: 3n/8 个零, n/4 点正弦上升, 其余为 1
pub fn low_overlap_window(n: usize) -> Vec<f64> {
    let zeros = 3 * n / 8;
    let rise = n / 4;
    let rising = sine_window(rise);
    (0..n)
        .map(|i| {
            if i < zeros {
                0.0
            } else if i < zeros + rise {
                rising[i - zeros]
            } else {
                1.0
            }
        })
        .collect()
}

#[derive(Debug)]
pub struct FilterBank<R: Real> {
    frame_length: usize,
    long: Mdct<R>,
    short: Option<Mdct<R>>,
    /// 按窗形状 (正弦, KBD 或 LD 低重叠) 索引
    long_windows: [Vec<R::Coef>; 2],
    short_windows: [Vec<R::Coef>; 2],
}

fn to_coef<R: Real>(w: Vec<f64>) -> Vec<R::Coef> {
    w.into_iter().map(R::coef).collect()
}

impl<R: Real> FilterBank<R> {
    /// `low_delay` 为 true 时使用 LD 窗且没有短窗
    pub fn new(frame_length: usize, low_delay: bool) -> Option<Self> {
        let nshort = frame_length / 8;
        let long = Mdct::new(2 * frame_length)?;
        let (short, long_windows, short_windows) = if low_delay {
            (
                None,
                [
                    to_coef::<R>(sine_window(frame_length)),
                    to_coef::<R>(low_overlap_window(frame_length)),
                ],
                [Vec::new(), Vec::new()],
            )
        } else {
            (
                Some(Mdct::new(2 * nshort)?),
                [
                    to_coef::<R>(sine_window(frame_length)),
                    to_coef::<R>(kbd_window(frame_length, KBD_ALPHA_LONG)),
                ],
                [
                    to_coef::<R>(sine_window(nshort)),
                    to_coef::<R>(kbd_window(nshort, KBD_ALPHA_SHORT)),
                ],
            )
        };
        Some(Self {
            frame_length,
            long,
            short,
            long_windows,
            short_windows,
        })
    }

    pub fn frame_length(&self) -> usize {
        self.frame_length
    }

    fn long_window(&self, shape: WindowShape) -> &[R::Coef] {
        &self.long_windows[shape as usize]
    }

    fn short_window(&self, shape: WindowShape) -> &[R::Coef] {
        &self.short_windows[shape as usize]
    }

    /// 频谱 -> 时域, 与重叠缓冲相加后输出 `frame_length` 个样本, 并更新重叠缓冲
    pub fn inverse(
        &self,
        sequence: WindowSequence,
        shape: WindowShape,
        shape_prev: WindowShape,
        spec: &[R],
        time_out: &mut [R],
        overlap: &mut [R],
    ) {
        let n = self.frame_length;
        let nshort = n / 8;
        let nflat_ls = (n - nshort) / 2;
        let mut buf = vec![R::ZERO; 2 * n];

        match (sequence, &self.short) {
            (WindowSequence::EightShort, Some(short)) => {
                let rise_prev = self.short_window(shape_prev);
                let win = self.short_window(shape);
                let mut block = vec![R::ZERO; 2 * nshort];
                for w in 0..8 {
                    short.backward(&spec[w * nshort..(w + 1) * nshort], &mut block);
                    let rise = if w == 0 { rise_prev } else { win };
                    let base = nflat_ls + w * nshort;
                    for i in 0..nshort {
                        buf[base + i] += block[i].mul_c(rise[i]);
                        buf[base + nshort + i] += block[nshort + i].mul_c(win[nshort - 1 - i]);
                    }
                }
            }
            _ => {
                self.long.backward(&spec[..n], &mut buf);
                self.window_long_block(sequence, shape, shape_prev, &mut buf);
            }
        }

        for i in 0..n {
            time_out[i] = overlap[i] + buf[i];
            overlap[i] = buf[n + i];
        }
    }

    /// 按窗序列对 2N 点块加窗 (长窗类序列)
    fn window_long_block(
        &self,
        sequence: WindowSequence,
        shape: WindowShape,
        shape_prev: WindowShape,
        buf: &mut [R],
    ) {
        let n = self.frame_length;
        let nshort = n / 8;
        let nflat_ls = (n - nshort) / 2;
        let long = self.long_window(shape);
        let long_prev = self.long_window(shape_prev);

        // 前半
        match sequence {
            WindowSequence::LongStop if self.short.is_some() => {
                let short_prev = self.short_window(shape_prev);
                buf[..nflat_ls].fill(R::ZERO);
                for i in 0..nshort {
                    let v = buf[nflat_ls + i].mul_c(short_prev[i]);
                    buf[nflat_ls + i] = v;
                }
            }
            _ => {
                for i in 0..n {
                    let v = buf[i].mul_c(long_prev[i]);
                    buf[i] = v;
                }
            }
        }

        // 后半
        match sequence {
            WindowSequence::LongStart if self.short.is_some() => {
                let short = self.short_window(shape);
                for i in 0..nshort {
                    let v = buf[n + nflat_ls + i].mul_c(short[nshort - 1 - i]);
                    buf[n + nflat_ls + i] = v;
                }
                buf[n + nflat_ls + nshort..].fill(R::ZERO);
            }
            _ => {
                for i in 0..n {
                    let v = buf[n + i].mul_c(long[n - 1 - i]);
                    buf[n + i] = v;
                }
            }
        }
    }

    /// LTP 用的正变换: 2N 点时域 -> N 点频谱 (只支持长窗类序列)
    pub fn forward_ltp(
        &self,
        sequence: WindowSequence,
        shape: WindowShape,
        shape_prev: WindowShape,
        input: &[R],
        spec_out: &mut [R],
    ) {
        let n = self.frame_length;
        let mut buf = input[..2 * n].to_vec();
        self.window_long_block(sequence, shape, shape_prev, &mut buf);
        self.long.forward(&buf, &mut spec_out[..n]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoders::aac::real::Fixed;

    fn assert_power_complementary(w: &[f64]) {
        let n = w.len();
        for i in 0..n {
            let s = w[i] * w[i] + w[n - 1 - i] * w[n - 1 - i];
            assert!((s - 1.0).abs() < 1e-9, "i={i} s={s}");
        }
    }

    #[test]
    fn test_窗函数功率互补() {
        assert_power_complementary(&sine_window(1024));
        assert_power_complementary(&sine_window(120));
        assert_power_complementary(&kbd_window(1024, KBD_ALPHA_LONG));
        assert_power_complementary(&kbd_window(128, KBD_ALPHA_SHORT));
        assert_power_complementary(&low_overlap_window(512));
        assert_power_complementary(&low_overlap_window(480));
    }

    #[test]
    fn test_低重叠窗形状() {
        let w = low_overlap_window(512);
        assert!(w[..192].iter().all(|&v| v == 0.0));
        assert!(w[192] > 0.0 && w[319] < 1.0);
        assert!(w[320..].iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_kbd_单调上升() {
        let w = kbd_window(128, KBD_ALPHA_SHORT);
        assert!(w.windows(2).all(|p| p[0] < p[1]));
        assert!(w[0] > 0.0 && w[127] < 1.0);
    }

    /// 用 LTP 正变换做分析, 逆变换重叠相加后应恢复原信号
    fn reconstruct<R: Real>(frame_length: usize, low_delay: bool, shape: WindowShape, tol: f64) {
        let fb = FilterBank::<R>::new(frame_length, low_delay).unwrap();
        let n = frame_length;
        let signal: Vec<f64> = (0..3 * n)
            .map(|t| (t as f64 * 0.031).sin() * 8000.0 + (t as f64 * 0.2).cos() * 500.0)
            .collect();
        let signal_r: Vec<R> = signal.iter().map(|&v| R::from_f64(v)).collect();

        let mut overlap = vec![R::ZERO; n];
        let mut time = vec![R::ZERO; n];
        let mut spec = vec![R::ZERO; n];
        for frame in 0..2 {
            fb.forward_ltp(
                WindowSequence::OnlyLong,
                shape,
                shape,
                &signal_r[frame * n..frame * n + 2 * n],
                &mut spec,
            );
            fb.inverse(WindowSequence::OnlyLong, shape, shape, &spec, &mut time, &mut overlap);
        }
        for t in 0..n {
            let got = time[t].to_f64();
            let want = signal[n + t];
            assert!((got - want).abs() < tol, "t={t} got={got} want={want}");
        }
    }

    #[test]
    fn test_长窗完全重建() {
        reconstruct::<f32>(1024, false, WindowShape::Sine, 0.05);
        reconstruct::<f32>(1024, false, WindowShape::Kbd, 0.05);
        reconstruct::<f32>(960, false, WindowShape::Sine, 0.05);
        reconstruct::<f32>(512, true, WindowShape::Kbd, 0.05);
    }

    #[test]
    fn test_定点长窗重建() {
        reconstruct::<Fixed>(1024, false, WindowShape::Sine, 2.0);
    }

    #[test]
    fn test_静音输入只输出重叠() {
        let fb = FilterBank::<f32>::new(1024, false).unwrap();
        let spec = vec![0.0f32; 1024];
        let mut overlap: Vec<f32> = (0..1024).map(|i| i as f32).collect();
        let expect = overlap.clone();
        let mut time = vec![0.0f32; 1024];
        for seq in [
            WindowSequence::OnlyLong,
            WindowSequence::LongStart,
            WindowSequence::EightShort,
            WindowSequence::LongStop,
        ] {
            overlap.copy_from_slice(&expect);
            fb.inverse(seq, WindowShape::Kbd, WindowShape::Sine, &spec, &mut time, &mut overlap);
            assert_eq!(time, expect);
            assert!(overlap.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn test_短窗块位置() {
        // 只有第 0 个短窗有能量时, 输出集中在 nflat_ls 起的 2 · nshort 个样本
        let fb = FilterBank::<f32>::new(1024, false).unwrap();
        let mut spec = vec![0.0f32; 1024];
        spec[3] = 1000.0;
        let mut overlap = vec![0.0f32; 1024];
        let mut time = vec![0.0f32; 1024];
        fb.inverse(
            WindowSequence::EightShort,
            WindowShape::Sine,
            WindowShape::Sine,
            &spec,
            &mut time,
            &mut overlap,
        );
        let nflat_ls = (1024 - 128) / 2;
        assert!(time[..nflat_ls].iter().all(|&v| v == 0.0));
        assert!(time[nflat_ls..nflat_ls + 256].iter().any(|&v| v != 0.0));
        assert!(time[nflat_ls + 256..].iter().all(|&v| v == 0.0));
        assert!(overlap.iter().all(|&v| v == 0.0));
    }
}
