//! 数值抽象: 浮点与定点两条解码路径共用同一套重建与滤波器组代码.
//!
//! - 浮点路径直接使用 `f32`.
//! - 定点路径使用 [`Fixed`]: 样本值为 Q14 (REAL), 窗与旋转因子等系数为 Q28 (COEF).
//!   乘法取 64 位乘积的高位并显式舍入, 不做截断.
//!
//! 两条路径输出的时域样本都以 16 位 PCM 为量纲 (满幅约 ±32768).

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::sync::OnceLock;

/// REAL 小数位数
const REAL_BITS: u32 = 14;
/// COEF 小数位数
const COEF_BITS: u32 = 28;

/// 2^(f/4), f = 0..3
const POW2_QUARTER: [f64; 4] = [
    1.0,
    1.189_207_115_002_721,
    1.414_213_562_373_095,
    1.681_792_830_507_429,
];

/// 反量化表长度
pub const IQ_TABLE_SIZE: usize = 1026;

/// 解码管线使用的数值类型
pub trait Real:
    Copy
    + Default
    + Debug
    + PartialEq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
{
    /// 系数 (窗, 旋转因子, 滤波器系数) 的存储类型
    type Coef: Copy + Default + Debug + Send + Sync + 'static;

    /// 是否为定点实现
    const FIXED: bool;
    /// 反量化表预先右移的位数, 由缩放因子补偿
    const IQ_TABLE_SHIFT: i32;
    const ZERO: Self;

    fn from_f64(v: f64) -> Self;
    fn coef(v: f64) -> Self::Coef;
    fn from_i16(v: i16) -> Self;
    fn to_f32(self) -> f32;
    fn to_f64(self) -> f64;

    /// 舍入并饱和为 16 位 PCM
    fn to_i16_sat(self) -> i16;

    /// 与系数相乘
    fn mul_c(self, c: Self::Coef) -> Self;

    /// 乘以 2^e
    fn shift(self, e: i32) -> Self;

    /// 乘以 2^(k/4 + extra)
    fn mul_pow2_quarter(self, k: i32, extra: i32) -> Self;

    /// 乘以任意正增益
    fn mul_gain(self, g: f64) -> Self;

    /// 频谱相对于浮点频谱的缩放指数 (2^e), 使逆变换无需额外归一化
    fn spectral_exponent(transform_len: usize) -> i32;

    /// 反量化表 |q|^(4/3) / 2^IQ_TABLE_SHIFT, 所有实例共享
    fn iq_table() -> &'static [Self];

    /// 以 f32 视图访问 (仅浮点路径可用)
    fn float_view(samples: &mut [Self]) -> Option<&mut [f32]>;
}

fn build_iq_table(shift: i32) -> Vec<f64> {
    let scale = 2f64.powi(-shift);
    (0..IQ_TABLE_SIZE)
        .map(|q| (q as f64).powf(4.0 / 3.0) * scale)
        .collect()
}

// ============================================================
// 浮点
// ============================================================

impl Real for f32 {
    type Coef = f32;

    const FIXED: bool = false;
    const IQ_TABLE_SHIFT: i32 = 0;
    const ZERO: Self = 0.0;

    fn from_f64(v: f64) -> Self {
        v as f32
    }

    fn coef(v: f64) -> f32 {
        v as f32
    }

    fn from_i16(v: i16) -> Self {
        f32::from(v)
    }

    fn to_f32(self) -> f32 {
        self
    }

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn to_i16_sat(self) -> i16 {
        let rounded = if self >= 0.0 { self + 0.5 } else { self - 0.5 };
        if rounded >= 32767.0 {
            32767
        } else if rounded <= -32768.0 {
            -32768
        } else {
            rounded as i16
        }
    }

    fn mul_c(self, c: f32) -> Self {
        self * c
    }

    fn shift(self, e: i32) -> Self {
        self * 2f32.powi(e)
    }

    fn mul_pow2_quarter(self, k: i32, extra: i32) -> Self {
        let e = k.div_euclid(4) + extra;
        let f = k.rem_euclid(4) as usize;
        self * (POW2_QUARTER[f] as f32) * 2f32.powi(e)
    }

    fn mul_gain(self, g: f64) -> Self {
        self * g as f32
    }

    fn spectral_exponent(_transform_len: usize) -> i32 {
        0
    }

    fn iq_table() -> &'static [Self] {
        static TABLE: OnceLock<Vec<f32>> = OnceLock::new();
        TABLE.get_or_init(|| {
            build_iq_table(Self::IQ_TABLE_SHIFT)
                .into_iter()
                .map(|v| v as f32)
                .collect()
        })
    }

    fn float_view(samples: &mut [Self]) -> Option<&mut [f32]> {
        Some(samples)
    }
}

// ============================================================
// 定点
// ============================================================

/// Q14 定点数 (REAL)
///
/// 加减与取负使用回绕运算, 乘法经 64 位中间结果舍入后饱和.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(pub i32);

impl Fixed {
    pub const ONE: Fixed = Fixed(1 << REAL_BITS);

    fn saturate(v: i64) -> i32 {
        v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }
}

impl Add for Fixed {
    type Output = Fixed;
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Fixed {
    type Output = Fixed;
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_sub(rhs.0))
    }
}

impl Neg for Fixed {
    type Output = Fixed;
    fn neg(self) -> Fixed {
        Fixed(self.0.wrapping_neg())
    }
}

impl AddAssign for Fixed {
    fn add_assign(&mut self, rhs: Fixed) {
        *self = *self + rhs;
    }
}

impl SubAssign for Fixed {
    fn sub_assign(&mut self, rhs: Fixed) {
        *self = *self - rhs;
    }
}

impl Real for Fixed {
    /// Q28 原始值
    type Coef = i32;

    const FIXED: bool = true;
    const IQ_TABLE_SHIFT: i32 = 3;
    const ZERO: Self = Fixed(0);

    fn from_f64(v: f64) -> Self {
        Fixed(Self::saturate((v * f64::from(1u32 << REAL_BITS)).round() as i64))
    }

    fn coef(v: f64) -> i32 {
        Self::saturate((v * f64::from(1u32 << COEF_BITS)).round() as i64)
    }

    fn from_i16(v: i16) -> Self {
        Fixed(i32::from(v) << REAL_BITS)
    }

    fn to_f32(self) -> f32 {
        self.0 as f32 / (1u32 << REAL_BITS) as f32
    }

    fn to_f64(self) -> f64 {
        f64::from(self.0) / f64::from(1u32 << REAL_BITS)
    }

    fn to_i16_sat(self) -> i16 {
        let half = 1i64 << (REAL_BITS - 1);
        let v = i64::from(self.0);
        let rounded = if v >= 0 { v + half } else { v - half };
        let max = 32767i64 << REAL_BITS;
        let min = -32768i64 << REAL_BITS;
        if rounded >= max {
            32767
        } else if rounded <= min {
            -32768
        } else {
            // 向零截断, 与浮点路径的舍入方式一致
            (rounded / (1i64 << REAL_BITS)) as i16
        }
    }

    fn mul_c(self, c: i32) -> Self {
        let prod = i64::from(self.0) * i64::from(c) + (1i64 << (COEF_BITS - 1));
        Fixed(Self::saturate(prod >> COEF_BITS))
    }

    fn shift(self, e: i32) -> Self {
        if e >= 0 {
            if e >= 32 {
                return Fixed(match self.0.signum() {
                    0 => 0,
                    1 => i32::MAX,
                    _ => i32::MIN,
                });
            }
            Fixed(Self::saturate(i64::from(self.0) << e))
        } else {
            let s = -e;
            if s >= 32 {
                return Fixed(0);
            }
            let round = 1i64 << (s - 1);
            Fixed(((i64::from(self.0) + round) >> s) as i32)
        }
    }

    fn mul_pow2_quarter(self, k: i32, extra: i32) -> Self {
        let e = k.div_euclid(4) + extra;
        let f = k.rem_euclid(4) as usize;
        if f == 0 {
            self.shift(e)
        } else {
            // 先乘小于 1 的系数再移位, 避免 Q28 溢出
            self.mul_c(Self::coef(POW2_QUARTER[f] * 0.5)).shift(e + 1)
        }
    }

    fn mul_gain(self, g: f64) -> Self {
        if g <= 0.0 || !g.is_finite() {
            return Fixed(0);
        }
        let mut e = g.log2().floor() as i32 + 1;
        let mut m = g / 2f64.powi(e);
        // 保证尾数落在 [0.5, 1)
        if m >= 1.0 {
            m *= 0.5;
            e += 1;
        }
        self.mul_c(Self::coef(m)).shift(e)
    }

    fn spectral_exponent(transform_len: usize) -> i32 {
        (2.0 / transform_len as f64).log2().ceil() as i32
    }

    fn iq_table() -> &'static [Self] {
        static TABLE: OnceLock<Vec<Fixed>> = OnceLock::new();
        TABLE.get_or_init(|| {
            build_iq_table(Self::IQ_TABLE_SHIFT)
                .into_iter()
                .map(Fixed::from_f64)
                .collect()
        })
    }

    fn float_view(_samples: &mut [Self]) -> Option<&mut [f32]> {
        None
    }
}

/// 复数, 供 FFT 与 MDCT 使用
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_定点乘法舍入() {
        let half = Fixed::coef(0.5);
        assert_eq!(Fixed(3).mul_c(half), Fixed(2)); // 1.5 向上舍入
        assert_eq!(Fixed(-3).mul_c(half), Fixed(-1));
        assert_eq!(Fixed::ONE.mul_c(Fixed::coef(0.25)), Fixed(4096));
    }

    #[test]
    fn test_定点移位与饱和() {
        assert_eq!(Fixed(5).shift(-1), Fixed(3));
        assert_eq!(Fixed(1 << 20).shift(20), Fixed(i32::MAX));
        assert_eq!(Fixed(-8).shift(-2), Fixed(-2));
        assert_eq!(Fixed(123).shift(-40), Fixed(0));
    }

    #[test]
    fn test_四分之一幂次缩放() {
        for k in -12..12 {
            let expect = 2f64.powf(f64::from(k) * 0.25 + 2.0);
            let f = 1.0f32.mul_pow2_quarter(k, 2);
            assert!((f64::from(f) - expect).abs() < 1e-5 * expect);
            let x = Fixed::ONE.mul_pow2_quarter(k, 2).to_f64();
            assert!((x - expect).abs() < 2e-3 * expect.max(1.0), "k={k} x={x}");
        }
    }

    #[test]
    fn test_浮点缩放为整数移位() {
        // 整数次幂精确
        assert_eq!(3.0f32.mul_pow2_quarter(8, 0), 12.0);
        assert_eq!(3.0f32.mul_pow2_quarter(-4, -1), 0.75);
        // 同一小数部分的比值恰为 2 的幂
        let a = 1.0f32.mul_pow2_quarter(5, 0);
        let b = 1.0f32.mul_pow2_quarter(-3, 0);
        assert_eq!(a, b * 4.0);
        assert_eq!(a, POW2_QUARTER[1] as f32 * 2.0);
        // 缩放因子差 155 仍在 f32 范围内
        let big = 1.0f32.mul_pow2_quarter(155, 0);
        assert!(big.is_finite() && big > 1e11);
    }

    #[test]
    fn test_饱和输出() {
        assert_eq!(40000.0f32.to_i16_sat(), 32767);
        assert_eq!((-40000.0f32).to_i16_sat(), -32768);
        assert_eq!(1.4f32.to_i16_sat(), 1);
        assert_eq!((-1.6f32).to_i16_sat(), -2);
        assert_eq!(Fixed::from_f64(1.6).to_i16_sat(), 2);
        assert_eq!(Fixed::from_f64(-1.4).to_i16_sat(), -1);
        assert_eq!(Fixed::from_f64(50000.0).to_i16_sat(), 32767);
    }

    #[test]
    fn test_反量化表() {
        let f = f32::iq_table();
        assert_eq!(f.len(), IQ_TABLE_SIZE);
        assert!((f[8] - 16.0).abs() < 1e-4);
        let x = Fixed::iq_table();
        assert!((x[8].to_f64() * 8.0 - 16.0).abs() < 1e-3);
    }

    #[test]
    fn test_任意增益() {
        let g = 1.0f32.mul_gain(0.3);
        assert!((g - 0.3).abs() < 1e-6);
        let x = Fixed::from_f64(100.0).mul_gain(2.5).to_f64();
        assert!((x - 250.0).abs() < 0.01);
        assert_eq!(Fixed::from_f64(1.0).mul_gain(0.0), Fixed(0));
    }
}
