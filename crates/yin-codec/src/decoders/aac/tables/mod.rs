//! AAC 静态表.

pub(crate) mod codebooks;
pub mod rvlc;
pub mod swb;

/// 采样率索引表 (索引 13..15 保留)
pub const SAMPLE_RATES: [u32; 13] = [
    96000, 88200, 64000, 48000, 44100, 32000, 24000, 22050, 16000, 12000, 11025, 8000, 7350,
];

/// 采样率索引对应的采样率
pub fn sample_rate(sf_index: usize) -> Option<u32> {
    SAMPLE_RATES.get(sf_index).copied()
}

/// 将任意采样率映射到最接近的标准索引
pub fn nearest_sf_index(rate: u32) -> u8 {
    const THRESHOLDS: [u32; 11] = [
        92017, 75132, 55426, 46009, 37566, 27713, 23004, 18783, 13856, 11502, 9391,
    ];
    THRESHOLDS
        .iter()
        .position(|&t| rate >= t)
        .map_or(11, |i| i as u8)
}

/// Main 预测可用的最大频带数, 按采样率索引
pub const MAX_PRED_SFB: [usize; 13] = [33, 33, 38, 40, 40, 40, 41, 41, 37, 37, 37, 34, 34];

/// LTP 长窗最大频带数
pub const MAX_LTP_SFB: usize = 40;

/// TNS 滤波器最大阶数
pub const TNS_MAX_ORDER: usize = 20;

/// TNS 作用的最高频带: 列依次为 长窗, 短窗, SSR 长窗, SSR 短窗
const TNS_MAX_BANDS: [[u8; 4]; 13] = [
    [31, 9, 28, 7],
    [31, 9, 28, 7],
    [34, 10, 27, 7],
    [40, 14, 26, 6],
    [42, 14, 26, 6],
    [51, 14, 26, 6],
    [46, 14, 29, 7],
    [46, 14, 29, 7],
    [42, 14, 23, 8],
    [42, 14, 23, 8],
    [42, 14, 23, 8],
    [39, 14, 19, 7],
    [39, 14, 19, 7],
];

pub fn tns_max_bands(sf_index: usize, short: bool, ssr: bool) -> usize {
    let col = usize::from(short) + if ssr { 2 } else { 0 };
    TNS_MAX_BANDS
        .get(sf_index)
        .map_or(0, |row| usize::from(row[col]))
}

/// LTP 增益码本
pub const LTP_CODEBOOK: [f64; 8] = [
    0.570829, 0.696616, 0.813004, 0.911304, 0.984900, 1.067894, 1.194601, 1.369533,
];
