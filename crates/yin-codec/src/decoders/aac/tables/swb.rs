//! 缩放因子频带 (swb) 边界表.
//!
//! 每张表都以帧长自身作为末项; 实际使用时只取前 `num_swb` 项,
//! 再补上当前帧长 (960/480 帧沿用 1024/512 的表, 末项被截断).

/// 长窗 (1024/960) 频带数, 按采样率索引.
pub const NUM_SWB_1024: [u8; 13] = [41, 41, 47, 49, 49, 51, 47, 47, 43, 43, 43, 40, 40];
pub const NUM_SWB_960: [u8; 13] = [40, 40, 45, 49, 49, 49, 46, 46, 42, 42, 42, 40, 40];
/// 低延迟 512 / 480 帧, 0 表示该采样率不支持.
pub const NUM_SWB_512: [u8; 13] = [0, 0, 0, 36, 36, 37, 31, 31, 0, 0, 0, 0, 0];
pub const NUM_SWB_480: [u8; 13] = [0, 0, 0, 35, 35, 37, 30, 30, 0, 0, 0, 0, 0];
/// 短窗 (128/120) 频带数.
pub const NUM_SWB_128: [u8; 13] = [12, 12, 12, 14, 14, 14, 15, 15, 15, 15, 15, 15, 15];

const SWB_1024_96: &[u16] = &[
    0, 4, 8, 12, 16, 20, 24, 28, 32, 36, 40, 44, 48, 52, 56, 64, 72, 80, 88, 96, 108, 120, 132,
    144, 156, 172, 188, 212, 240, 276, 320, 384, 448, 512, 576, 640, 704, 768, 832, 896, 960, 1024,
];

const SWB_1024_64: &[u16] = &[
    0, 4, 8, 12, 16, 20, 24, 28, 32, 36, 40, 44, 48, 52, 56, 64, 72, 80, 88, 100, 112, 124, 140,
    156, 172, 192, 216, 240, 268, 304, 344, 384, 424, 464, 504, 544, 584, 624, 664, 704, 744, 784,
    824, 864, 904, 944, 984, 1024,
];

const SWB_1024_48: &[u16] = &[
    0, 4, 8, 12, 16, 20, 24, 28, 32, 36, 40, 48, 56, 64, 72, 80, 88, 96, 108, 120, 132, 144, 160,
    176, 196, 216, 240, 264, 292, 320, 352, 384, 416, 448, 480, 512, 544, 576, 608, 640, 672, 704,
    736, 768, 800, 832, 864, 896, 928, 1024,
];

const SWB_1024_32: &[u16] = &[
    0, 4, 8, 12, 16, 20, 24, 28, 32, 36, 40, 48, 56, 64, 72, 80, 88, 96, 108, 120, 132, 144, 160,
    176, 196, 216, 240, 264, 292, 320, 352, 384, 416, 448, 480, 512, 544, 576, 608, 640, 672, 704,
    736, 768, 800, 832, 864, 896, 928, 960, 992, 1024,
];

const SWB_1024_24: &[u16] = &[
    0, 4, 8, 12, 16, 20, 24, 28, 32, 36, 40, 44, 52, 60, 68, 76, 84, 92, 100, 108, 116, 124, 136,
    148, 160, 172, 188, 204, 220, 240, 260, 284, 308, 336, 364, 396, 432, 468, 508, 552, 600, 652,
    704, 768, 832, 896, 960, 1024,
];

const SWB_1024_16: &[u16] = &[
    0, 8, 16, 24, 32, 40, 48, 56, 64, 72, 80, 88, 100, 112, 124, 136, 148, 160, 172, 184, 196, 212,
    228, 244, 260, 280, 300, 320, 344, 368, 396, 424, 456, 492, 532, 572, 616, 664, 716, 772, 832,
    896, 960, 1024,
];

const SWB_1024_8: &[u16] = &[
    0, 12, 24, 36, 48, 60, 72, 84, 96, 108, 120, 132, 144, 156, 172, 188, 204, 220, 236, 252, 268,
    288, 308, 328, 348, 372, 396, 420, 448, 476, 508, 544, 580, 620, 664, 712, 764, 820, 880, 944,
    1024,
];

const SWB_512_48: &[u16] = &[
    0, 4, 8, 12, 16, 20, 24, 28, 32, 36, 40, 44, 48, 52, 56, 60, 68, 76, 84, 92, 100, 112, 124,
    136, 148, 164, 184, 208, 236, 268, 300, 332, 364, 396, 428, 460, 512,
];

const SWB_512_32: &[u16] = &[
    0, 4, 8, 12, 16, 20, 24, 28, 32, 36, 40, 44, 48, 52, 56, 64, 72, 80, 88, 96, 108, 120, 132,
    144, 160, 176, 192, 212, 236, 260, 288, 320, 352, 384, 416, 448, 480, 512,
];

const SWB_512_24: &[u16] = &[
    0, 4, 8, 12, 16, 20, 24, 28, 32, 36, 40, 44, 52, 60, 68, 80, 92, 104, 120, 140, 164, 192, 224,
    256, 288, 320, 352, 384, 416, 448, 480, 512,
];

const SWB_480_48: &[u16] = &[
    0, 4, 8, 12, 16, 20, 24, 28, 32, 36, 40, 44, 48, 52, 56, 64, 72, 80, 88, 96, 108, 120, 132,
    144, 156, 172, 188, 212, 240, 272, 304, 336, 368, 400, 432, 480,
];

const SWB_480_32: &[u16] = &[
    0, 4, 8, 12, 16, 20, 24, 28, 32, 36, 40, 44, 48, 52, 56, 60, 64, 72, 80, 88, 96, 104, 112,
    124, 136, 148, 164, 180, 200, 224, 256, 288, 320, 352, 384, 416, 448, 480,
];

const SWB_480_24: &[u16] = &[
    0, 4, 8, 12, 16, 20, 24, 28, 32, 36, 40, 44, 52, 60, 68, 80, 92, 104, 120, 140, 164, 192, 224,
    256, 288, 320, 352, 384, 416, 448, 480,
];

const SWB_128_96: &[u16] = &[0, 4, 8, 12, 16, 20, 24, 32, 40, 48, 64, 92, 128];
const SWB_128_64: &[u16] = &[0, 4, 8, 12, 16, 20, 24, 32, 40, 48, 64, 92, 128];
const SWB_128_48: &[u16] = &[0, 4, 8, 12, 16, 20, 28, 36, 44, 56, 68, 80, 96, 112, 128];
const SWB_128_24: &[u16] = &[0, 4, 8, 12, 16, 20, 24, 28, 36, 44, 52, 64, 76, 92, 108, 128];
const SWB_128_16: &[u16] = &[0, 4, 8, 12, 16, 20, 24, 28, 32, 40, 48, 60, 72, 88, 108, 128];
const SWB_128_8: &[u16] = &[0, 4, 8, 12, 16, 20, 24, 28, 36, 44, 52, 60, 72, 88, 108, 128];

const LONG_1024: [&[u16]; 13] = [
    SWB_1024_96,
    SWB_1024_96,
    SWB_1024_64,
    SWB_1024_48,
    SWB_1024_48,
    SWB_1024_32,
    SWB_1024_24,
    SWB_1024_24,
    SWB_1024_16,
    SWB_1024_16,
    SWB_1024_16,
    SWB_1024_8,
    SWB_1024_8,
];

const SHORT_128: [&[u16]; 13] = [
    SWB_128_96, SWB_128_96, SWB_128_64, SWB_128_48, SWB_128_48, SWB_128_48, SWB_128_24, SWB_128_24,
    SWB_128_16, SWB_128_16, SWB_128_16, SWB_128_8, SWB_128_8,
];

/// 取长窗频带边界表 (未截断), 低延迟帧长在不支持的采样率上返回 None.
pub fn long_offsets(frame_length: usize, sf_index: usize) -> Option<&'static [u16]> {
    if sf_index >= 13 {
        return None;
    }
    match frame_length {
        1024 | 960 => Some(LONG_1024[sf_index]),
        512 => match sf_index {
            3 | 4 => Some(SWB_512_48),
            5 => Some(SWB_512_32),
            6 | 7 => Some(SWB_512_24),
            _ => None,
        },
        480 => match sf_index {
            3 | 4 => Some(SWB_480_48),
            5 => Some(SWB_480_32),
            6 | 7 => Some(SWB_480_24),
            _ => None,
        },
        _ => None,
    }
}

/// 取短窗频带边界表.
pub fn short_offsets(sf_index: usize) -> Option<&'static [u16]> {
    SHORT_128.get(sf_index).copied()
}

/// 长窗频带数; 不支持的组合返回 0.
pub fn num_swb_long(frame_length: usize, sf_index: usize) -> usize {
    let table = match frame_length {
        1024 => &NUM_SWB_1024,
        960 => &NUM_SWB_960,
        512 => &NUM_SWB_512,
        480 => &NUM_SWB_480,
        _ => return 0,
    };
    table.get(sf_index).map_or(0, |&n| n as usize)
}

pub fn num_swb_short(sf_index: usize) -> usize {
    NUM_SWB_128.get(sf_index).map_or(0, |&n| n as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_频带表单调且覆盖帧长() {
        for sf in 0..13 {
            for &n in &[1024usize, 960, 512, 480] {
                let Some(tab) = long_offsets(n, sf) else {
                    assert_eq!(num_swb_long(n, sf), 0);
                    continue;
                };
                let num = num_swb_long(n, sf);
                assert!(num > 0 && num < tab.len(), "n={n} sf={sf}");
                assert!(tab[..num].windows(2).all(|w| w[0] < w[1]));
                assert!((tab[num - 1] as usize) < n);
            }
            let short = short_offsets(sf).unwrap();
            let num = num_swb_short(sf);
            assert!((short[num - 1] as usize) < 120);
            assert_eq!(*short.last().unwrap(), 128);
        }
    }
}
