//! RVLC (可逆变长码) 缩放因子解码.
//!
//! 缩放因子差分流与转义流依次位于主码流中, 长度由边信息给出.
//! 正向解码结果即最终结果; 遇到不允许的码字时, 该频带及之后所有频带置零,
//! 只在报告中标记, 不中止帧解码. 无转义时再用反向游标从段尾扫描一遍做一致性校验.

use log::{trace, warn};
use serde::Serialize;
use yin_core::{BitCursor, BitSource, ReverseBitCursor};

use super::fault::{AacFault, AacResult};
use super::huffman::{INTENSITY_HCB, INTENSITY_HCB2, NOISE_HCB, ZERO_HCB, codebooks};
use super::ics::Ics;
use super::tables::rvlc::{RVLC_ESC, RVLC_ESC_VAL, RVLC_NOT_ALLOWED, RVLC_SF};

/// RVLC 边信息 (rvlc_scale_factor_data)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RvlcInfo {
    pub sf_concealment: bool,
    pub rev_global_gain: u8,
    /// 差分流位数 (已扣除 dpcm_noise_nrg)
    pub length_of_rvlc_sf: usize,
    pub dpcm_noise_nrg: u16,
    pub sf_escapes_present: bool,
    pub length_of_rvlc_escapes: usize,
    pub dpcm_noise_last_position: u16,
}

impl RvlcInfo {
    pub fn parse(br: &mut BitCursor<'_>, short: bool, noise_used: bool) -> Self {
        let mut info = RvlcInfo {
            sf_concealment: br.get_bit() == 1,
            rev_global_gain: br.get_bits(8) as u8,
            length_of_rvlc_sf: br.get_bits(if short { 11 } else { 9 }) as usize,
            ..Default::default()
        };
        if noise_used {
            info.dpcm_noise_nrg = br.get_bits(9) as u16;
            info.length_of_rvlc_sf = info.length_of_rvlc_sf.saturating_sub(9);
        }
        info.sf_escapes_present = br.get_bit() == 1;
        if info.sf_escapes_present {
            info.length_of_rvlc_escapes = br.get_bits(8) as usize;
        }
        if noise_used {
            info.dpcm_noise_last_position = br.get_bits(9) as u16;
        }
        info
    }
}

/// 单声道 RVLC 解码结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RvlcReport {
    /// 首个出错频带 (窗组, 频带); 从该频带起缩放因子被置零
    pub error_band: Option<(usize, usize)>,
    /// 反向扫描与正向结果是否一致; None 表示未做校验
    pub reverse_consistent: Option<bool>,
}

impl RvlcReport {
    pub fn degraded(&self) -> bool {
        self.error_band.is_some()
    }

    /// 对应的非致命故障
    pub fn fault(&self) -> Option<AacFault> {
        self.error_band.map(|_| AacFault::RvlcBitError)
    }
}

/// 符号解码失败: 不允许的码字或段内位数不足
struct SymbolError;

/// 取出长度为 `bits` 的段
fn read_segment(br: &mut BitCursor<'_>, bits: usize) -> Vec<u8> {
    let mut buf = br.read_buffer(bits);
    if buf.is_empty() {
        buf.push(0);
    }
    buf
}

fn decode_symbol<S: BitSource + ?Sized>(
    sf: &mut S,
    esc: Option<&mut BitCursor<'_>>,
) -> Result<i32, SymbolError> {
    let books = codebooks();
    let index = books.rvlc.decode(sf).map_err(|_| SymbolError)?;
    let value = RVLC_SF[index].0;
    if value == RVLC_NOT_ALLOWED {
        return Err(SymbolError);
    }
    if value.abs() != RVLC_ESC_VAL {
        return Ok(value);
    }
    let esc = esc.ok_or(SymbolError)?;
    let esc_index = books.rvlc_escape.decode(esc).map_err(|_| SymbolError)?;
    let extra = RVLC_ESC[esc_index].0;
    Ok(if value > 0 {
        value + extra
    } else {
        value - extra
    })
}

/// 读取 RVLC 数据段并解码全部缩放因子
///
/// 缩放因子越出 0..=255 仍是致命故障; 其余码字错误只降级.
pub fn decode_scale_factors(ics: &mut Ics, br: &mut BitCursor<'_>) -> AacResult<RvlcReport> {
    let info = ics.rvlc;
    let sf_data = read_segment(br, info.length_of_rvlc_sf);
    let esc_data = if info.sf_escapes_present {
        Some(read_segment(br, info.length_of_rvlc_escapes))
    } else {
        None
    };
    if br.has_error() {
        return Err(AacFault::BufferExhausted);
    }

    let mut sf = BitCursor::with_bit_len(&sf_data, info.length_of_rvlc_sf)
        .map_err(|_| AacFault::BufferExhausted)?;
    let mut esc = match &esc_data {
        Some(data) => Some(
            BitCursor::with_bit_len(data, info.length_of_rvlc_escapes)
                .map_err(|_| AacFault::BufferExhausted)?,
        ),
        None => None,
    };

    let mut report = RvlcReport::default();
    let mut symbols = Vec::new();
    let mut scale_factor = i32::from(ics.global_gain);
    let mut is_position = 0i32;
    let mut noise_energy = i32::from(ics.global_gain) - 90 - 256;
    let mut noise_pcm = true;
    let mut last_spectral = None;

    for g in 0..ics.num_window_groups {
        for sfb in 0..ics.max_sfb {
            if report.error_band.is_some() {
                ics.scale_factors[g][sfb] = 0;
                continue;
            }
            let cb = ics.sfb_cb[g][sfb];
            let decoded = match cb {
                ZERO_HCB => Ok(0),
                INTENSITY_HCB | INTENSITY_HCB2 => decode_symbol(&mut sf, esc.as_mut()).map(|t| {
                    symbols.push(t);
                    is_position += t;
                    is_position
                }),
                NOISE_HCB if noise_pcm => {
                    noise_pcm = false;
                    noise_energy += i32::from(info.dpcm_noise_nrg);
                    Ok(noise_energy)
                }
                NOISE_HCB => decode_symbol(&mut sf, esc.as_mut()).map(|t| {
                    symbols.push(t);
                    noise_energy += t;
                    noise_energy
                }),
                _ => match decode_symbol(&mut sf, esc.as_mut()) {
                    Ok(t) => {
                        symbols.push(t);
                        scale_factor += t;
                        if !(0..=255).contains(&scale_factor) {
                            return Err(AacFault::ScaleFactorRange);
                        }
                        last_spectral = Some(scale_factor);
                        Ok(scale_factor)
                    }
                    Err(e) => Err(e),
                },
            };
            match decoded {
                Ok(value) => ics.scale_factors[g][sfb] = value as i16,
                Err(SymbolError) => {
                    warn!("RVLC 码字错误 (窗组 {}, 频带 {}), 之后的缩放因子置零", g, sfb);
                    report.error_band = Some((g, sfb));
                    ics.scale_factors[g][sfb] = 0;
                }
            }
        }
    }

    if report.error_band.is_none() {
        let mut consistent = last_spectral.is_none_or(|v| v == i32::from(info.rev_global_gain));
        if esc.is_none() {
            consistent &= reverse_scan_matches(&sf_data, info.length_of_rvlc_sf, &symbols);
        }
        trace!("RVLC 反向校验: {}", consistent);
        report.reverse_consistent = Some(consistent);
    }
    Ok(report)
}

/// 从段尾反向解码, 结果应为正向符号的逆序
fn reverse_scan_matches(data: &[u8], bits: usize, forward: &[i32]) -> bool {
    let Ok(mut rev) = ReverseBitCursor::with_bit_len(data, bits) else {
        return false;
    };
    for &expected in forward.iter().rev() {
        match decode_symbol(&mut rev, None) {
            Ok(t) if t == expected => {}
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use yin_core::BitWriter;

    fn write_delta(w: &mut BitWriter, delta: i32) {
        let &(_, len, code) = RVLC_SF
            .iter()
            .find(|e| e.0 == delta)
            .expect("码表中存在该差分");
        w.write_bits(code, u32::from(len));
    }

    /// 全部为频谱频带, global_gain = 100
    fn build(deltas: &[i32], corrupt: bool) -> (Ics, Vec<u8>) {
        let mut ics = Ics {
            max_sfb: deltas.len(),
            global_gain: 100,
            ..Default::default()
        };
        ics.sfb_cb[0][..deltas.len()].fill(1);

        let mut w = BitWriter::new();
        write_delta(&mut w, deltas[0]);
        if corrupt {
            // 第二个码字换成不允许的 110010
            w.write_pattern("110010");
        } else {
            for &d in &deltas[1..] {
                write_delta(&mut w, d);
            }
        }
        let end: i32 = 100 + deltas.iter().sum::<i32>();
        ics.rvlc = RvlcInfo {
            rev_global_gain: end as u8,
            length_of_rvlc_sf: w.bits_written(),
            ..Default::default()
        };
        (ics, w.finish())
    }

    #[test]
    fn test_rvlc_正向解码与反向校验() {
        let (mut ics, data) = build(&[1, -2, 0], false);
        let mut br = BitCursor::new(&data).unwrap();
        let report = decode_scale_factors(&mut ics, &mut br).unwrap();
        assert_eq!(&ics.scale_factors[0][..3], &[101, 99, 99]);
        assert!(!report.degraded());
        assert_eq!(report.reverse_consistent, Some(true));
    }

    #[test]
    fn test_rvlc_非法码字降级为零() {
        let (mut ics, data) = build(&[1, -2, 0], true);
        let mut br = BitCursor::new(&data).unwrap();
        let report = decode_scale_factors(&mut ics, &mut br).unwrap();
        assert_eq!(&ics.scale_factors[0][..3], &[101, 0, 0]);
        assert_eq!(report.error_band, Some((0, 1)));
        assert_eq!(report.fault(), Some(AacFault::RvlcBitError));
        assert_eq!(report.reverse_consistent, None);
    }

    #[test]
    fn test_rvlc_转义() {
        let mut ics = Ics {
            max_sfb: 1,
            global_gain: 50,
            ..Default::default()
        };
        ics.sfb_cb[0][0] = 1;
        let mut w = BitWriter::new();
        write_delta(&mut w, 7);
        let sf_bits = w.bits_written();
        // 转义值 3: 码字 010
        w.write_bits(2, 3);
        ics.rvlc = RvlcInfo {
            rev_global_gain: 60,
            length_of_rvlc_sf: sf_bits,
            sf_escapes_present: true,
            length_of_rvlc_escapes: 3,
            ..Default::default()
        };
        let data = w.finish();
        let mut br = BitCursor::new(&data).unwrap();
        let report = decode_scale_factors(&mut ics, &mut br).unwrap();
        assert_eq!(ics.scale_factors[0][0], 60);
        assert_eq!(report.reverse_consistent, Some(true));
    }

    #[test]
    fn test_rvlc_边信息() {
        let mut w = BitWriter::new();
        w.write_bit(0);
        w.write_bits(120, 8);
        w.write_bits(40, 9);
        w.write_bits(300, 9); // dpcm_noise_nrg
        w.write_bit(1);
        w.write_bits(12, 8);
        w.write_bits(5, 9);
        let data = w.finish();
        let mut br = BitCursor::new(&data).unwrap();
        let info = RvlcInfo::parse(&mut br, false, true);
        assert_eq!(info.length_of_rvlc_sf, 31);
        assert_eq!(info.dpcm_noise_nrg, 300);
        assert_eq!(info.length_of_rvlc_escapes, 12);
        assert_eq!(info.dpcm_noise_last_position, 5);
    }
}
