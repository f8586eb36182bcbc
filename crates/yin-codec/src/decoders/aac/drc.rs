//! 动态范围控制增益.
//!
//! 只按码流携带的 dynamic_range_info 对已重建的频谱逐频带乘增益,
//! 不做任何压缩曲线计算.

use super::extension::{DRC_REF_LEVEL, DrcInfo};
use super::real::Real;

/// 压缩与提升的缩放系数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrcGain {
    pub cut: f64,
    pub boost: f64,
}

impl Default for DrcGain {
    fn default() -> Self {
        Self {
            cut: 1.0,
            boost: 1.0,
        }
    }
}

impl DrcGain {
    pub fn new(cut: f64, boost: f64) -> Self {
        Self { cut, boost }
    }

    /// 单个频带的线性增益: 2^(±ctrl · (dyn_rng_ctl - (80 - prog_ref_level)) / 24)
    fn band_factor(&self, info: &DrcInfo, band: usize) -> f64 {
        let level = f64::from(info.dyn_rng_ctl[band])
            - (f64::from(DRC_REF_LEVEL) - f64::from(info.prog_ref_level));
        let exp = if info.dyn_rng_sgn[band] {
            -self.cut * level / 24.0
        } else {
            self.boost * level / 24.0
        };
        2f64.powf(exp)
    }

    /// 对一个声道的频谱应用本帧的 DRC 信息
    pub fn apply<R: Real>(&self, info: &DrcInfo, channel: usize, spec: &mut [R], frame_length: usize) {
        if !info.present || info.excludes(channel) {
            return;
        }
        let mut bottom = 0usize;
        for band in 0..info.num_bands {
            let top = if info.num_bands == 1 {
                frame_length
            } else {
                (4 * (usize::from(info.band_top[band]) + 1)).min(frame_length)
            };
            let factor = self.band_factor(info, band);
            if top > bottom && factor != 1.0 {
                for v in &mut spec[bottom..top] {
                    *v = v.mul_gain(factor);
                }
            }
            bottom = bottom.max(top);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(sgn: bool, ctl: u8) -> DrcInfo {
        let mut info = DrcInfo {
            present: true,
            ..Default::default()
        };
        info.dyn_rng_sgn[0] = sgn;
        info.dyn_rng_ctl[0] = ctl;
        info
    }

    #[test]
    fn test_单频带增益() {
        let gain = DrcGain::default();
        // 24 个 0.25 dB 单位 = 6 dB, 即 2 倍
        let mut spec = vec![1.0f32; 1024];
        gain.apply(&info(false, 24), 0, &mut spec, 1024);
        assert!(spec.iter().all(|&v| (v - 2.0).abs() < 1e-6));

        let mut spec = vec![1.0f32; 1024];
        gain.apply(&info(true, 24), 0, &mut spec, 1024);
        assert!(spec.iter().all(|&v| (v - 0.5).abs() < 1e-6));

        // 压缩系数为 0 时不衰减
        let mut spec = vec![1.0f32; 1024];
        DrcGain::new(0.0, 1.0).apply(&info(true, 24), 0, &mut spec, 1024);
        assert!(spec.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_参考电平与排除声道() {
        let gain = DrcGain::default();
        let mut drc = info(false, 24);
        // 参考电平 56 使有效控制值减少 24
        drc.prog_ref_level = 56;
        let mut spec = vec![1.0f32; 16];
        gain.apply(&drc, 0, &mut spec, 16);
        assert!(spec.iter().all(|&v| (v - 1.0).abs() < 1e-6));

        let mut drc = info(false, 48);
        drc.exclude_mask = vec![false, true];
        let mut spec = vec![1.0f32; 16];
        gain.apply(&drc, 1, &mut spec, 16);
        assert!(spec.iter().all(|&v| v == 1.0));
        gain.apply(&drc, 0, &mut spec, 16);
        assert!(spec.iter().all(|&v| (v - 4.0).abs() < 1e-5));
    }

    #[test]
    fn test_多频带边界() {
        let mut drc = info(false, 24);
        drc.num_bands = 2;
        drc.band_top[0] = 1; // 谱线 0..8
        drc.band_top[1] = 255;
        drc.dyn_rng_sgn[1] = true;
        drc.dyn_rng_ctl[1] = 24;
        let mut spec = vec![1.0f32; 32];
        DrcGain::default().apply(&drc, 0, &mut spec, 32);
        assert!(spec[..8].iter().all(|&v| (v - 2.0).abs() < 1e-6));
        assert!(spec[8..].iter().all(|&v| (v - 0.5).abs() < 1e-6));
    }
}
