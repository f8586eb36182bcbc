//! 时域噪声整形 (TNS).
//!
//! 解码方向使用全极点 (AR) 滤波, LTP 的频谱重估计使用对应的全零 (MA) 滤波.

use std::f64::consts::FRAC_PI_2;

use super::ics::Ics;
use super::real::Real;
use super::side_info::{TnsData, TnsFilter};
use super::tables::{TNS_MAX_ORDER, tns_max_bands};

/// 由量化的反射系数求 LPC 系数, `a[0] = 1`
fn lpc_coefficients(filter: &TnsFilter, coef_res_bits: u32, order: usize) -> [f64; TNS_MAX_ORDER + 1] {
    let bits = coef_res_bits - u32::from(filter.coef_compress);
    let half = f64::from(1u32 << (coef_res_bits - 1));
    let mut reflection = [0.0; TNS_MAX_ORDER];
    for (k, &raw) in reflection.iter_mut().zip(&filter.coef[..order]) {
        // 按 bits 位符号扩展
        let shift = 32 - bits;
        let tmp = ((u32::from(raw) << shift) as i32) >> shift;
        let iqfac = if tmp >= 0 { (half - 0.5) / FRAC_PI_2 } else { (half + 0.5) / FRAC_PI_2 };
        *k = (f64::from(tmp) / iqfac).sin();
    }

    let mut a = [0.0; TNS_MAX_ORDER + 1];
    let mut b = [0.0; TNS_MAX_ORDER + 1];
    a[0] = 1.0;
    for m in 1..=order {
        let k = reflection[m - 1];
        for i in 1..m {
            b[i] = a[i] + k * a[m - i];
        }
        a[1..m].copy_from_slice(&b[1..m]);
        a[m] = k;
    }
    a
}

/// 一个滤波器的作用区间
struct FilterSpan<C> {
    /// 谱线下标 (已含窗偏移)
    start: usize,
    size: usize,
    reverse: bool,
    order: usize,
    lpc: [C; TNS_MAX_ORDER + 1],
}

fn filter_spans<R: Real>(
    ics: &Ics,
    tns: &TnsData,
    sf_index: u8,
    ssr: bool,
    frame_length: usize,
) -> Vec<FilterSpan<R::Coef>> {
    let nshort = frame_length / 8;
    let max_bands = tns_max_bands(usize::from(sf_index), ics.window_sequence.is_short(), ssr);
    let limit = |band: usize| {
        let band = band.min(max_bands).min(ics.max_sfb);
        usize::from(ics.swb_offset[band]).min(ics.swb_offset_max)
    };

    let mut spans = Vec::new();
    for (w, window) in tns.windows.iter().enumerate().take(ics.num_windows) {
        let coef_res_bits = if window.coef_res { 4 } else { 3 };
        let mut bottom = ics.num_swb;
        for filter in window.filters.iter().take(window.n_filt) {
            let top = bottom;
            bottom = top.saturating_sub(usize::from(filter.length));
            let order = usize::from(filter.order).min(TNS_MAX_ORDER);
            if order == 0 {
                continue;
            }
            let start = limit(bottom);
            let end = limit(top);
            if end <= start {
                continue;
            }
            let lpc = lpc_coefficients(filter, coef_res_bits, order).map(R::coef);
            spans.push(FilterSpan {
                start: w * nshort + start,
                size: end - start,
                reverse: filter.direction,
                order,
                lpc,
            });
        }
    }
    spans
}

fn position(span_start: usize, size: usize, reverse: bool, i: usize) -> usize {
    if reverse { span_start + size - 1 - i } else { span_start + i }
}

/// 全极点滤波: y(n) = x(n) - Σ lpc[j] · y(n - j)
fn ar_filter<R: Real>(spec: &mut [R], span: &FilterSpan<R::Coef>) {
    let mut state = [R::ZERO; TNS_MAX_ORDER];
    for i in 0..span.size {
        let idx = position(span.start, span.size, span.reverse, i);
        let mut y = spec[idx];
        for j in 0..span.order {
            y -= state[j].mul_c(span.lpc[j + 1]);
        }
        state.copy_within(0..span.order - 1, 1);
        state[0] = y;
        spec[idx] = y;
    }
}

/// 全零滤波: y(n) = x(n) + Σ lpc[j] · x(n - j)
fn ma_filter<R: Real>(spec: &mut [R], span: &FilterSpan<R::Coef>) {
    let mut state = [R::ZERO; TNS_MAX_ORDER];
    for i in 0..span.size {
        let idx = position(span.start, span.size, span.reverse, i);
        let x = spec[idx];
        let mut y = x;
        for j in 0..span.order {
            y += state[j].mul_c(span.lpc[j + 1]);
        }
        state.copy_within(0..span.order - 1, 1);
        state[0] = x;
        spec[idx] = y;
    }
}

/// 解码端 TNS
pub fn decode_frame<R: Real>(
    ics: &Ics,
    sf_index: u8,
    ssr: bool,
    spec: &mut [R],
    frame_length: usize,
) {
    let Some(tns) = &ics.tns else {
        return;
    };
    for span in filter_spans::<R>(ics, tns, sf_index, ssr, frame_length) {
        if span.start + span.size <= spec.len() {
            ar_filter(spec, &span);
        }
    }
}

/// 编码端 TNS, 供 LTP 对预测频谱做同样的整形
pub fn encode_frame<R: Real>(
    ics: &Ics,
    sf_index: u8,
    ssr: bool,
    spec: &mut [R],
    frame_length: usize,
) {
    let Some(tns) = &ics.tns else {
        return;
    };
    for span in filter_spans::<R>(ics, tns, sf_index, ssr, frame_length) {
        if span.start + span.size <= spec.len() {
            ma_filter(spec, &span);
        }
    }
}
