//! MDCT / IMDCT, 经前后旋转归约为 N/4 点复数 FFT.
//!
//! 逆变换输出 (2/N) · Σ X[k] · cos(2π/N · (n + n0) · (k + 1/2)), n0 = (N/2 + 1)/2;
//! 正变换输出其对偶 2 · Σ x[n] · cos(...). 定点路径中频谱带有 2^e 的缩放,
//! 旋转因子与正变换系数据此调整, 使两条路径输出同一量纲.

use super::fft::Fft;
use super::real::{Complex, Real};

#[derive(Debug)]
pub struct Mdct<R: Real> {
    n: usize,
    sincos: Vec<Complex<R::Coef>>,
    forward_scale: R::Coef,
    fft: Fft<R>,
}

/// y1 = x1·c.re + x2·c.im, y2 = x2·c.re - x1·c.im
fn complex_mult<R: Real>(x1: R, x2: R, c: Complex<R::Coef>) -> (R, R) {
    (x1.mul_c(c.re) + x2.mul_c(c.im), x2.mul_c(c.re) - x1.mul_c(c.im))
}

impl<R: Real> Mdct<R> {
    /// `n` 为变换长度 (输入时域样本数); 长度不能分解时返回 None
    pub fn new(n: usize) -> Option<Self> {
        let fft = Fft::new(n / 4)?;
        let e = f64::from(R::spectral_exponent(n));
        let scale = (2.0 / n as f64 / 2f64.powf(e)).sqrt();
        let sincos = (0..n / 4)
            .map(|k| {
                let angle = 2.0 * std::f64::consts::PI * (k as f64 + 0.125) / n as f64;
                Complex::new(R::coef(scale * angle.cos()), R::coef(scale * angle.sin()))
            })
            .collect();
        Some(Self {
            n,
            sincos,
            forward_scale: R::coef(n as f64 * 2f64.powf(2.0 * e)),
            fft,
        })
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// N/2 个频谱系数 -> N 个时域样本
    pub fn backward(&self, input: &[R], output: &mut [R]) {
        let n2 = self.n / 2;
        let n4 = self.n / 4;
        let n8 = self.n / 8;
        let mut z = vec![Complex::<R>::default(); n4];
        let mut scratch = vec![Complex::<R>::default(); n4];

        for (k, zk) in z.iter_mut().enumerate() {
            let (im, re) = complex_mult(input[2 * k], input[n2 - 1 - 2 * k], self.sincos[k]);
            *zk = Complex::new(re, im);
        }

        self.fft.backward(&mut z, &mut scratch);

        for (k, zk) in z.iter_mut().enumerate() {
            let (im, re) = complex_mult(zk.im, zk.re, self.sincos[k]);
            *zk = Complex::new(re, im);
        }

        let out = &mut output[..self.n];
        for k in (0..n8).step_by(2) {
            out[2 * k] = z[n8 + k].im;
            out[2 + 2 * k] = z[n8 + 1 + k].im;
            out[1 + 2 * k] = -z[n8 - 1 - k].re;
            out[3 + 2 * k] = -z[n8 - 2 - k].re;

            out[n4 + 2 * k] = z[k].re;
            out[n4 + 2 + 2 * k] = z[1 + k].re;
            out[n4 + 1 + 2 * k] = -z[n4 - 1 - k].im;
            out[n4 + 3 + 2 * k] = -z[n4 - 2 - k].im;

            out[n2 + 2 * k] = z[n8 + k].re;
            out[n2 + 2 + 2 * k] = z[n8 + 1 + k].re;
            out[n2 + 1 + 2 * k] = -z[n8 - 1 - k].im;
            out[n2 + 3 + 2 * k] = -z[n8 - 2 - k].im;

            out[n2 + n4 + 2 * k] = -z[k].im;
            out[n2 + n4 + 2 + 2 * k] = -z[1 + k].im;
            out[n2 + n4 + 1 + 2 * k] = z[n4 - 1 - k].re;
            out[n2 + n4 + 3 + 2 * k] = z[n4 - 2 - k].re;
        }
    }

    /// N 个时域样本 -> N/2 个频谱系数
    pub fn forward(&self, input: &[R], output: &mut [R]) {
        let n = self.n;
        let n2 = n / 2;
        let n4 = n / 4;
        let n8 = n / 8;
        let s = self.forward_scale;
        let mut z = vec![Complex::<R>::default(); n4];
        let mut scratch = vec![Complex::<R>::default(); n4];

        for k in 0..n8 {
            let m = 2 * k;
            let re = input[n - n4 - 1 - m] + input[n - n4 + m];
            let im = input[n4 + m] - input[n4 - 1 - m];
            let (a, b) = complex_mult(re, im, self.sincos[k]);
            z[k] = Complex::new(a.mul_c(s), b.mul_c(s));

            let re = input[n2 - 1 - m] - input[m];
            let im = input[n2 + m] + input[n - 1 - m];
            let (a, b) = complex_mult(re, im, self.sincos[k + n8]);
            z[k + n8] = Complex::new(a.mul_c(s), b.mul_c(s));
        }

        self.fft.forward(&mut z, &mut scratch);

        for (k, zk) in z.iter().enumerate() {
            let m = 2 * k;
            let (re, im) = complex_mult(zk.re, zk.im, self.sincos[k]);
            output[m] = -re;
            output[n2 - 1 - m] = im;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoders::aac::real::Fixed;

    fn basis(n: usize, t: usize, k: usize) -> f64 {
        let n0 = (n as f64 / 2.0 + 1.0) / 2.0;
        (2.0 * std::f64::consts::PI / n as f64 * (t as f64 + n0) * (k as f64 + 0.5)).cos()
    }

    fn reference_imdct(spec: &[f64], n: usize) -> Vec<f64> {
        (0..n)
            .map(|t| 2.0 / n as f64 * spec.iter().enumerate().map(|(k, x)| x * basis(n, t, k)).sum::<f64>())
            .collect()
    }

    #[test]
    fn test_逆变换与直接公式一致() {
        for n in [256, 1920] {
            let mdct = Mdct::<f32>::new(n).unwrap();
            let spec: Vec<f64> = (0..n / 2).map(|k| ((k * 31) % 17) as f64 - 8.0).collect();
            let input: Vec<f32> = spec.iter().map(|&v| v as f32).collect();
            let mut out = vec![0.0f32; n];
            mdct.backward(&input, &mut out);
            let expect = reference_imdct(&spec, n);
            for (got, want) in out.iter().zip(&expect) {
                assert!((f64::from(*got) - want).abs() < 1e-3, "n={n}");
            }
        }
    }

    #[test]
    fn test_正变换与直接公式一致() {
        let n = 256;
        let mdct = Mdct::<f32>::new(n).unwrap();
        let x: Vec<f32> = (0..n).map(|t| (t as f32 * 0.13).sin() * 100.0).collect();
        let mut out = vec![0.0f32; n / 2];
        mdct.forward(&x, &mut out);
        let want: Vec<f64> = (0..n / 2)
            .map(|k| 2.0 * x.iter().enumerate().map(|(t, v)| f64::from(*v) * basis(n, t, k)).sum::<f64>())
            .collect();
        let peak = want.iter().fold(0.0f64, |m, v| m.max(v.abs()));
        for (k, (got, want)) in out.iter().zip(&want).enumerate() {
            assert!((f64::from(*got) - want).abs() < 1e-4 * peak, "k={k}");
        }
    }

    #[test]
    fn test_定点逆变换() {
        let n = 2048;
        let e = Fixed::spectral_exponent(n);
        assert_eq!(e, -10);
        let mdct = Mdct::<Fixed>::new(n).unwrap();
        let mut spec = vec![0.0f64; n / 2];
        spec[3] = 4096.0;
        spec[10] = -2048.0;
        let input: Vec<Fixed> = spec.iter().map(|&v| Fixed::from_f64(v * 2f64.powi(e))).collect();
        let mut out = vec![Fixed(0); n];
        mdct.backward(&input, &mut out);
        let expect = reference_imdct(&spec, n);
        for (got, want) in out.iter().zip(&expect) {
            assert!((got.to_f64() - want).abs() < 0.05, "{} vs {}", got.to_f64(), want);
        }
    }

    #[test]
    fn test_正逆变换重建() {
        // 正弦窗下相邻两块重叠相加恢复原信号
        let n = 256;
        let mdct = Mdct::<f32>::new(n).unwrap();
        let w: Vec<f32> = (0..n)
            .map(|t| (std::f32::consts::PI * (t as f32 + 0.5) / n as f32).sin())
            .collect();
        let signal: Vec<f32> = (0..3 * n / 2).map(|t| (t as f32 * 0.21).sin() * 1000.0).collect();
        let block = |start: usize| {
            let windowed: Vec<f32> = (0..n).map(|t| signal[start + t] * w[t]).collect();
            let mut spec = vec![0.0f32; n / 2];
            mdct.forward(&windowed, &mut spec);
            let mut time = vec![0.0f32; n];
            mdct.backward(&spec, &mut time);
            time.iter().zip(&w).map(|(a, b)| a * b).collect::<Vec<f32>>()
        };
        let first = block(0);
        let second = block(n / 2);
        for t in 0..n / 2 {
            let rec = first[n / 2 + t] + second[t];
            assert!((rec - signal[n / 2 + t]).abs() < 0.05, "t={t}");
        }
    }
}
