//! HCR (Huffman 码字重排) 频谱解码.
//!
//! 重排后的频谱数据被切成若干段, 每段开头是一个优先码字 (PCW), 可直接解码.
//! 其余码字按 "集合" 分批, 每批在各段剩余位中轮换尝试; 每批结束后所有段的剩余位反转,
//! 下一批从另一端读取. 放不下的码字把已读的位带到下一段, 拼接在该段剩余位之前继续解码.

use log::{trace, warn};
use serde::Serialize;
use yin_core::{BitCursor, BitSource};

use super::fault::{AacFault, AacResult};
use super::huffman::{self, ESC_HCB, INTENSITY_HCB, INTENSITY_HCB2, NOISE_HCB, ZERO_HCB};
use super::ics::Ics;

/// 各码本单个码字的最大位数
const MAX_CW_LEN: [usize; 32] = [
    0, 11, 9, 20, 16, 13, 11, 14, 12, 17, 14, 49, 0, 0, 0, 0, 14, 17, 21, 21, 25, 25, 29, 29, 29,
    29, 33, 33, 33, 37, 37, 41,
];

/// 码本处理优先级 (启用分段容错时包含虚拟码本)
const PRESORT_VCB11: [u8; 22] = [
    11, 31, 30, 29, 28, 27, 26, 25, 24, 23, 22, 21, 20, 19, 18, 17, 16, 9, 7, 5, 3, 1,
];
const PRESORT: [u8; 6] = [11, 9, 7, 5, 3, 1];

/// HCR 解码统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HcrReport {
    pub segments: usize,
    pub sets: usize,
    /// 码字总数 (含 PCW)
    pub codewords: usize,
    /// 未能解码的码字数, 对应位置保持为零
    pub undecoded: usize,
}

/// 显式位向量表示的段, 从前端读取
#[derive(Debug, Clone, Default)]
pub struct BitSegment {
    bits: Vec<u8>,
    pos: usize,
    error: bool,
}

impl BitSegment {
    pub fn from_bits(bits: Vec<u8>) -> Self {
        Self {
            bits,
            pos: 0,
            error: false,
        }
    }

    /// 剩余位 (读取顺序)
    pub fn remaining(&self) -> &[u8] {
        &self.bits[self.pos..]
    }

    /// 反转剩余位的读取方向
    pub fn reverse(&mut self) {
        let mut rest = self.bits.split_off(self.pos);
        rest.reverse();
        self.bits = rest;
        self.pos = 0;
        self.error = false;
    }

    /// 在剩余位之前拼接 `prefix`
    pub fn prepend(&mut self, prefix: &[u8]) {
        let mut bits = Vec::with_capacity(prefix.len() + self.bits_left());
        bits.extend_from_slice(prefix);
        bits.extend_from_slice(self.remaining());
        self.bits = bits;
        self.pos = 0;
        self.error = false;
    }

    /// 取走全部剩余位, 段变空
    pub fn take_remaining(&mut self) -> Vec<u8> {
        let rest = self.bits.split_off(self.pos);
        self.bits.clear();
        self.pos = 0;
        self.error = false;
        rest
    }

    fn append(&mut self, more: &[u8]) {
        self.bits.extend_from_slice(more);
    }

    fn rewind_to(&mut self, pos: usize) {
        self.pos = pos;
        self.error = false;
    }
}

impl BitSource for BitSegment {
    fn peek(&self, n: u32) -> u32 {
        let mut value = 0u32;
        for i in 0..n.min(32) as usize {
            let bit = self.bits.get(self.pos + i).copied().unwrap_or(0);
            value = (value << 1) | u32::from(bit);
        }
        value
    }

    fn consume(&mut self, n: u32) {
        let target = self.pos + n as usize;
        if target > self.bits.len() {
            self.pos = self.bits.len();
            self.error = true;
        } else {
            self.pos = target;
        }
    }

    fn bits_consumed(&self) -> u64 {
        self.pos as u64
    }

    fn bits_left(&self) -> usize {
        self.bits.len() - self.pos
    }

    fn has_error(&self) -> bool {
        self.error
    }
}

/// 一个待解码的码字
#[derive(Debug, Clone)]
struct Codeword {
    cb: u8,
    /// 在频谱缓冲区中的位置
    offset: usize,
    decoded: bool,
    /// 之前段中读到的位
    carried: Vec<u8>,
}

/// 在段上尝试解码一个码字; 成功时写入频谱, 失败时恢复段位置
fn try_decode(cb: u8, seg: &mut BitSegment, spec: &mut [i32], offset: usize) -> bool {
    let start = seg.bits_consumed() as usize;
    let mut values = [0i32; 4];
    match huffman::decode_spectral(cb, seg, &mut values) {
        Ok(dim) => {
            let Some(dst) = spec.get_mut(offset..offset + dim) else {
                return false;
            };
            dst.copy_from_slice(&values[..dim]);
            true
        }
        Err(_) => {
            seg.rewind_to(start);
            false
        }
    }
}

/// 按优先级顺序列出所有码字 (码本, 频谱位置)
fn codeword_order(ics: &Ics, vcb11: bool, nshort: usize) -> Vec<(u8, usize)> {
    let mut group_start = [0usize; 8];
    for g in 1..ics.num_window_groups {
        group_start[g] = group_start[g - 1] + nshort * ics.window_group_length[g - 1];
    }
    let presort: &[u8] = if vcb11 { &PRESORT_VCB11 } else { &PRESORT };

    let mut order = Vec::new();
    for &next_cb in presort {
        for sfb in 0..ics.max_sfb {
            let width = usize::from(ics.swb_offset[sfb + 1] - ics.swb_offset[sfb]);
            for w in (0..width).step_by(4) {
                for g in 0..ics.num_window_groups {
                    let glen = ics.window_group_length[g];
                    for sec in ics.sections.iter().filter(|s| s.group == g) {
                        let cb = sec.cb;
                        let due = cb == next_cb || (next_cb < ESC_HCB && cb == next_cb + 1);
                        if !due || sfb < sec.start || sfb >= sec.end {
                            continue;
                        }
                        if matches!(cb, ZERO_HCB | NOISE_HCB | INTENSITY_HCB | INTENSITY_HCB2) {
                            continue;
                        }
                        let inc = if cb < 5 { 4 } else { 2 };
                        let band_start = usize::from(ics.sect_sfb_offset[g][sfb]);
                        let band_len = usize::from(ics.sect_sfb_offset[g][sfb + 1]) - band_start;
                        let base = w * glen / inc;
                        for k in 0..(4 / inc) * glen {
                            if k + base >= band_len / inc {
                                break;
                            }
                            order.push((cb, group_start[g] + band_start + inc * (k + base)));
                        }
                    }
                }
            }
        }
    }
    order
}

/// 读取并解码一个声道的重排频谱数据
///
/// 调用方负责把 `spec` 清零. 主码流游标总是前进 `reordered_spectral_length` 位.
pub fn decode_reordered(
    ics: &Ics,
    br: &mut BitCursor<'_>,
    vcb11: bool,
    frame_length: usize,
    spec: &mut [i32],
) -> AacResult<HcrReport> {
    let total = ics.reordered_spectral_length;
    let mut report = HcrReport::default();
    if total == 0 {
        return Ok(report);
    }
    let longest = ics.longest_codeword_length;
    if longest == 0 || total < longest || ics.max_sfb == 0 {
        return Err(AacFault::SpectralHuffman);
    }

    let mut stream = Vec::with_capacity(total);
    for _ in 0..total {
        stream.push(br.get_bit() as u8);
    }
    if br.has_error() {
        return Err(AacFault::BufferExhausted);
    }

    let order = codeword_order(ics, vcb11, frame_length / 8);
    report.codewords = order.len();

    // 第一步: 切段并解码 PCW
    let mut segments: Vec<BitSegment> = Vec::new();
    let mut pending: Vec<Codeword> = Vec::new();
    let mut read = 0;
    let mut pcw_done = false;
    for &(cb, offset) in &order {
        if !pcw_done {
            let width = MAX_CW_LEN[usize::from(cb)].min(longest);
            if read + width <= total {
                let mut seg = BitSegment::from_bits(stream[read..read + width].to_vec());
                read += width;
                if !try_decode(cb, &mut seg, spec, offset) {
                    warn!("HCR: PCW 解码失败 (码本 {}, 位置 {})", cb, offset);
                    report.undecoded += 1;
                }
                segments.push(seg);
                continue;
            }
            // 不足一段的剩余位并入最后一段
            if let Some(last) = segments.last_mut() {
                last.append(&stream[read..]);
            }
            read = total;
            pcw_done = true;
        }
        pending.push(Codeword {
            cb,
            offset,
            decoded: false,
            carried: Vec::new(),
        });
    }

    let num_segments = segments.len();
    if num_segments == 0 {
        return Err(AacFault::SpectralHuffman);
    }
    report.segments = num_segments;
    report.sets = order.len() / num_segments;

    for seg in &mut segments {
        seg.reverse();
    }

    // 第二步: 按集合轮换解码其余码字
    for set in 0..report.sets {
        let first = set * num_segments;
        if first >= pending.len() {
            break;
        }
        let in_set = (pending.len() - first).min(num_segments);
        let mut remaining = in_set;
        for trial in 0..num_segments {
            for base in 0..in_set {
                let cw = &mut pending[first + base];
                if cw.decoded {
                    continue;
                }
                let seg = &mut segments[(trial + base) % num_segments];
                if seg.bits_left() == 0 {
                    continue;
                }
                if !cw.carried.is_empty() {
                    seg.prepend(&cw.carried);
                    cw.carried.clear();
                }
                if try_decode(cw.cb, seg, spec, cw.offset) {
                    cw.decoded = true;
                    remaining -= 1;
                } else {
                    cw.carried = seg.take_remaining();
                }
            }
            if remaining == 0 {
                break;
            }
        }
        for seg in &mut segments {
            seg.reverse();
        }
    }

    let undecoded = pending.iter().filter(|cw| !cw.decoded).count();
    if undecoded > 0 {
        warn!("HCR: {} 个码字未能解码, 对应频谱置零", undecoded);
    }
    report.undecoded += undecoded;
    trace!(
        "HCR: {} 段, {} 个集合, {} 个码字",
        report.segments, report.sets, report.codewords
    );
    Ok(report)
}
