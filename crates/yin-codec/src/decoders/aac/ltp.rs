//! 长时预测 (LTP).
//!
//! 历史缓冲保存最近输出的 16 位时域样本. 预测时按信令的延迟取出 2N 个样本,
//! 乘以码本增益后经加窗正变换与 TNS 编码方向滤波, 叠加到启用的频带上.

use log::trace;

use super::filterbank::FilterBank;
use super::ics::{Ics, WindowShape};
use super::real::Real;
use super::tables::LTP_CODEBOOK;
use super::tns;

/// 单声道 LTP 状态
#[derive(Debug, Clone)]
pub struct LtpState {
    frame_length: usize,
    low_delay: bool,
    /// 4N 个样本; 非 LD 时最后 N 个恒为零
    history: Vec<i16>,
    /// LD 下未更新延迟时沿用的值
    last_lag: u16,
}

impl LtpState {
    pub fn new(frame_length: usize, low_delay: bool) -> Self {
        Self {
            frame_length,
            low_delay,
            history: vec![0; 4 * frame_length],
            last_lag: 0,
        }
    }

    pub fn reset(&mut self) {
        self.history.fill(0);
        self.last_lag = 0;
    }

    pub fn history(&self) -> &[i16] {
        &self.history
    }

    /// 本帧实际使用的延迟
    fn resolve_lag(&mut self, ics: &Ics) -> usize {
        if self.low_delay {
            if ics.ltp.lag_update {
                self.last_lag = ics.ltp.lag;
            }
            usize::from(self.last_lag)
        } else {
            usize::from(ics.ltp.lag)
        }
    }

    /// 把预测频谱叠加到 `spec`, 短窗帧不做预测
    pub fn predict<R: Real>(
        &mut self,
        ics: &Ics,
        filter_bank: &FilterBank<R>,
        shape_prev: WindowShape,
        sf_index: u8,
        spec: &mut [R],
    ) {
        if ics.window_sequence.is_short() || !ics.ltp.data_present {
            return;
        }
        let n = self.frame_length;
        let lag = self.resolve_lag(ics);
        if lag > 2 * n {
            return;
        }
        let gain = R::coef(LTP_CODEBOOK[usize::from(ics.ltp.coef & 7)]);
        trace!("LTP: lag={} coef={} last_band={}", lag, ics.ltp.coef, ics.ltp.last_band);

        let estimate: Vec<R> = (0..2 * n)
            .map(|i| R::from_i16(self.history[2 * n + i - lag]).mul_c(gain))
            .collect();
        let mut predicted = vec![R::ZERO; n];
        filter_bank.forward_ltp(
            ics.window_sequence,
            ics.window_shape,
            shape_prev,
            &estimate,
            &mut predicted,
        );
        tns::encode_frame(ics, sf_index, false, &mut predicted, n);

        for sfb in 0..ics.ltp.last_band.min(ics.num_swb) {
            if !ics.ltp.long_used[sfb] || ics.excluded_from_prediction(sfb) {
                continue;
            }
            let lo = usize::from(ics.swb_offset[sfb]);
            let hi = usize::from(ics.swb_offset[sfb + 1]).min(ics.swb_offset_max).min(n);
            for bin in lo..hi {
                spec[bin] += predicted[bin];
            }
        }
    }

    /// 用本帧输出与新的重叠缓冲更新历史
    pub fn update<R: Real>(&mut self, time: &[R], overlap: &[R]) {
        let n = self.frame_length;
        let h = &mut self.history;
        if self.low_delay {
            h.copy_within(n..3 * n, 0);
            for i in 0..n {
                h[2 * n + i] = time[i].to_i16_sat();
                h[3 * n + i] = overlap[i].to_i16_sat();
            }
        } else {
            h.copy_within(n..2 * n, 0);
            for i in 0..n {
                h[n + i] = time[i].to_i16_sat();
                h[2 * n + i] = overlap[i].to_i16_sat();
            }
        }
    }
}
