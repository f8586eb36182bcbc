//! 混合基复数 FFT (基 2, 3, 4, 5).
//!
//! 长度按 3, 4, 2, 5 的顺序分解, 因子 2 提到最前. 每一趟从 `input` 读, 写入 `output`,
//! 两块缓冲交替使用; [`Fft::run`] 返回最后一趟写入的是哪一块.
//! 正变换使用 e^(-i), 逆变换使用 e^(+i), 两者都不归一化.

use super::real::{Complex, Real};

/// 变换方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn sign(self) -> f64 {
        match self {
            Self::Forward => -1.0,
            Self::Backward => 1.0,
        }
    }
}

/// 结果所在的缓冲区
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Live {
    Data,
    Scratch,
}

/// 预计算的 FFT 计划
#[derive(Debug)]
pub struct Fft<R: Real> {
    n: usize,
    factors: Vec<usize>,
    /// 每趟 (ip - 1) · ido 个旋转因子 e^(+i·2π·m·l1·i/n)
    twiddles: Vec<Complex<R::Coef>>,
    /// 基 3 / 基 5 蝶形常数: cos(2π/3), sin(2π/3), cos(2π/5), sin(2π/5), cos(4π/5), sin(4π/5)
    radix: [R::Coef; 6],
}

fn factorize(n: usize) -> Option<Vec<usize>> {
    let mut factors = Vec::new();
    let mut rest = n;
    for radix in [3, 4, 2, 5] {
        while rest % radix == 0 {
            rest /= radix;
            if radix == 2 {
                factors.insert(0, 2);
            } else {
                factors.push(radix);
            }
        }
    }
    (rest == 1 && n > 1).then_some(factors)
}

impl<R: Real> Fft<R> {
    /// 长度含 2, 3, 5 以外的质因子时返回 None
    pub fn new(n: usize) -> Option<Self> {
        let factors = factorize(n)?;
        let step = 2.0 * std::f64::consts::PI / n as f64;
        let mut twiddles = Vec::with_capacity(n);
        let mut l1 = 1;
        for &ip in &factors {
            let ido = n / (l1 * ip);
            for m in 1..ip {
                for i in 0..ido {
                    let arg = step * (m * l1 * i) as f64;
                    twiddles.push(Complex::new(R::coef(arg.cos()), R::coef(arg.sin())));
                }
            }
            l1 *= ip;
        }
        let third = 2.0 * std::f64::consts::PI / 3.0;
        let fifth = 2.0 * std::f64::consts::PI / 5.0;
        Some(Self {
            n,
            factors,
            twiddles,
            radix: [
                R::coef(third.cos()),
                R::coef(third.sin()),
                R::coef(fifth.cos()),
                R::coef(fifth.sin()),
                R::coef((2.0 * fifth).cos()),
                R::coef((2.0 * fifth).sin()),
            ],
        })
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn factors(&self) -> &[usize] {
        &self.factors
    }

    /// 执行全部趟数, 不做最后的拷贝
    pub fn run(&self, data: &mut [Complex<R>], scratch: &mut [Complex<R>], dir: Direction) -> Live {
        let mut input: &mut [Complex<R>] = &mut data[..self.n];
        let mut output: &mut [Complex<R>] = &mut scratch[..self.n];
        let mut live = Live::Data;
        let mut l1 = 1;
        let mut iw = 0;
        for &ip in &self.factors {
            let ido = self.n / (l1 * ip);
            let wa = &self.twiddles[iw..iw + (ip - 1) * ido];
            let pass = Pass { ido, l1, wa, dir };
            match ip {
                2 => pass.radix2(input, output),
                3 => pass.radix3(input, output, &self.radix),
                4 => pass.radix4(input, output),
                _ => pass.radix5(input, output, &self.radix),
            }
            std::mem::swap(&mut input, &mut output);
            live = match live {
                Live::Data => Live::Scratch,
                Live::Scratch => Live::Data,
            };
            l1 *= ip;
            iw += (ip - 1) * ido;
        }
        live
    }

    /// 原位变换, 结果写回 `data`
    pub fn transform(&self, data: &mut [Complex<R>], scratch: &mut [Complex<R>], dir: Direction) {
        if self.run(data, scratch, dir) == Live::Scratch {
            data[..self.n].copy_from_slice(&scratch[..self.n]);
        }
    }

    pub fn forward(&self, data: &mut [Complex<R>], scratch: &mut [Complex<R>]) {
        self.transform(data, scratch, Direction::Forward);
    }

    pub fn backward(&self, data: &mut [Complex<R>], scratch: &mut [Complex<R>]) {
        self.transform(data, scratch, Direction::Backward);
    }
}

fn add<R: Real>(a: Complex<R>, b: Complex<R>) -> Complex<R> {
    Complex::new(a.re + b.re, a.im + b.im)
}

fn sub<R: Real>(a: Complex<R>, b: Complex<R>) -> Complex<R> {
    Complex::new(a.re - b.re, a.im - b.im)
}

fn scale<R: Real>(a: Complex<R>, c: R::Coef) -> Complex<R> {
    Complex::new(a.re.mul_c(c), a.im.mul_c(c))
}

/// 乘以 ±i
fn rotate<R: Real>(a: Complex<R>, positive: bool) -> Complex<R> {
    if positive {
        Complex::new(-a.im, a.re)
    } else {
        Complex::new(a.im, -a.re)
    }
}

/// 乘以 w (逆变换) 或 conj(w) (正变换)
fn twiddle<R: Real>(a: Complex<R>, w: Complex<R::Coef>, dir: Direction) -> Complex<R> {
    match dir {
        Direction::Backward => Complex::new(
            a.re.mul_c(w.re) - a.im.mul_c(w.im),
            a.im.mul_c(w.re) + a.re.mul_c(w.im),
        ),
        Direction::Forward => Complex::new(
            a.re.mul_c(w.re) + a.im.mul_c(w.im),
            a.im.mul_c(w.re) - a.re.mul_c(w.im),
        ),
    }
}

/// 一趟蝶形: 输入下标 (k·ip + j)·ido + i, 输出下标 (m·l1 + k)·ido + i
struct Pass<'a, C> {
    ido: usize,
    l1: usize,
    wa: &'a [Complex<C>],
    dir: Direction,
}

impl<C: Copy> Pass<'_, C> {
    fn store<R: Real<Coef = C>>(&self, output: &mut [Complex<R>], k: usize, i: usize, ys: &[Complex<R>]) {
        for (m, &y) in ys.iter().enumerate() {
            let v = if m == 0 || self.ido == 1 {
                y
            } else {
                twiddle(y, self.wa[(m - 1) * self.ido + i], self.dir)
            };
            output[(m * self.l1 + k) * self.ido + i] = v;
        }
    }

    fn load<R: Real, const P: usize>(&self, input: &[Complex<R>], k: usize, i: usize) -> [Complex<R>; P] {
        std::array::from_fn(|j| input[(k * P + j) * self.ido + i])
    }

    fn radix2<R: Real<Coef = C>>(&self, input: &[Complex<R>], output: &mut [Complex<R>]) {
        for k in 0..self.l1 {
            for i in 0..self.ido {
                let [x0, x1] = self.load::<R, 2>(input, k, i);
                self.store(output, k, i, &[add(x0, x1), sub(x0, x1)]);
            }
        }
    }

    fn radix3<R: Real<Coef = C>>(&self, input: &[Complex<R>], output: &mut [Complex<R>], c: &[C; 6]) {
        let positive = self.dir == Direction::Backward;
        for k in 0..self.l1 {
            for i in 0..self.ido {
                let [x0, x1, x2] = self.load::<R, 3>(input, k, i);
                let t2 = add(x1, x2);
                let c2 = add(x0, scale(t2, c[0]));
                let c3 = rotate(scale(sub(x1, x2), c[1]), positive);
                self.store(output, k, i, &[add(x0, t2), add(c2, c3), sub(c2, c3)]);
            }
        }
    }

    fn radix4<R: Real<Coef = C>>(&self, input: &[Complex<R>], output: &mut [Complex<R>]) {
        let positive = self.dir == Direction::Backward;
        for k in 0..self.l1 {
            for i in 0..self.ido {
                let [x0, x1, x2, x3] = self.load::<R, 4>(input, k, i);
                let t1 = sub(x0, x2);
                let t2 = add(x0, x2);
                let t3 = add(x1, x3);
                let t4 = rotate(sub(x1, x3), positive);
                self.store(
                    output,
                    k,
                    i,
                    &[add(t2, t3), add(t1, t4), sub(t2, t3), sub(t1, t4)],
                );
            }
        }
    }

    fn radix5<R: Real<Coef = C>>(&self, input: &[Complex<R>], output: &mut [Complex<R>], c: &[C; 6]) {
        let positive = self.dir == Direction::Backward;
        let (tr11, ti11, tr12, ti12) = (c[2], c[3], c[4], c[5]);
        for k in 0..self.l1 {
            for i in 0..self.ido {
                let [x0, x1, x2, x3, x4] = self.load::<R, 5>(input, k, i);
                let t2 = add(x1, x4);
                let t5 = sub(x1, x4);
                let t3 = add(x2, x3);
                let t4 = sub(x2, x3);

                let y0 = add(x0, add(t2, t3));
                let c2 = add(x0, add(scale(t2, tr11), scale(t3, tr12)));
                let c3 = add(x0, add(scale(t2, tr12), scale(t3, tr11)));
                let c5 = rotate(add(scale(t5, ti11), scale(t4, ti12)), positive);
                let c4 = rotate(sub(scale(t5, ti12), scale(t4, ti11)), positive);
                self.store(
                    output,
                    k,
                    i,
                    &[y0, add(c2, c5), add(c3, c4), sub(c3, c4), sub(c2, c5)],
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(n: usize) -> Vec<Complex<f32>> {
        (0..n)
            .map(|k| {
                let t = k as f32;
                Complex::new((t * 0.37).sin() + 0.25, (t * 0.11).cos() - 0.5)
            })
            .collect()
    }

    fn naive_dft(x: &[Complex<f32>], sign: f64) -> Vec<Complex<f64>> {
        let n = x.len();
        (0..n)
            .map(|m| {
                let mut acc = Complex::new(0.0, 0.0);
                for (j, v) in x.iter().enumerate() {
                    let arg = sign * 2.0 * std::f64::consts::PI * (j * m) as f64 / n as f64;
                    let (s, c) = arg.sin_cos();
                    acc.re += f64::from(v.re) * c - f64::from(v.im) * s;
                    acc.im += f64::from(v.re) * s + f64::from(v.im) * c;
                }
                acc
            })
            .collect()
    }

    #[test]
    fn test_长度分解() {
        assert_eq!(factorize(512), Some(vec![2, 4, 4, 4, 4]));
        assert_eq!(factorize(64), Some(vec![4, 4, 4]));
        assert_eq!(factorize(480), Some(vec![2, 3, 4, 4, 5]));
        assert_eq!(factorize(60), Some(vec![3, 4, 5]));
        assert_eq!(factorize(14), None);
        assert!(Fft::<f32>::new(7).is_none());
    }

    #[test]
    fn test_与直接_dft_一致() {
        for n in [8, 15, 60, 64] {
            let fft = Fft::<f32>::new(n).unwrap();
            for dir in [Direction::Forward, Direction::Backward] {
                let x = signal(n);
                let expect = naive_dft(&x, dir.sign());
                let mut data = x.clone();
                let mut scratch = vec![Complex::default(); n];
                fft.transform(&mut data, &mut scratch, dir);
                for (got, want) in data.iter().zip(&expect) {
                    assert!((f64::from(got.re) - want.re).abs() < 1e-3, "n={n}");
                    assert!((f64::from(got.im) - want.im).abs() < 1e-3, "n={n}");
                }
            }
        }
    }

    #[test]
    fn test_正逆变换往返() {
        for n in [60, 64, 240, 256, 480, 512] {
            let fft = Fft::<f32>::new(n).unwrap();
            let x = signal(n);
            let mut data = x.clone();
            let mut scratch = vec![Complex::default(); n];
            fft.forward(&mut data, &mut scratch);
            fft.backward(&mut data, &mut scratch);
            for (got, want) in data.iter().zip(&x) {
                let (re, im) = (got.re / n as f32, got.im / n as f32);
                assert!((re - want.re).abs() <= 1e-5 * want.re.abs().max(1.0), "n={n}");
                assert!((im - want.im).abs() <= 1e-5 * want.im.abs().max(1.0), "n={n}");
            }
        }
    }

    #[test]
    fn test_缓冲区交替() {
        // 4 · 4 · 4: 三趟, 结果落在 scratch
        let fft = Fft::<f32>::new(64).unwrap();
        let mut data = signal(64);
        let mut scratch = vec![Complex::default(); 64];
        assert_eq!(fft.run(&mut data, &mut scratch, Direction::Forward), Live::Scratch);
        let fft = Fft::<f32>::new(8).unwrap();
        assert_eq!(fft.factors(), &[2, 4]);
        let mut data = signal(8);
        let mut scratch = vec![Complex::default(); 8];
        assert_eq!(fft.run(&mut data, &mut scratch, Direction::Forward), Live::Data);
    }
}
