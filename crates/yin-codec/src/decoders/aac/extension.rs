//! 填充元素 (FIL) 与数据流元素 (DSE).
//!
//! 填充元素内可能携带动态范围信息, 辅助数据或 SBR 负载.
//! SBR 负载不在本解码器内处理, 原样保存供外部使用.

use log::{trace, warn};
use serde::Serialize;
use yin_core::{BitCursor, BitSource};

use super::fault::{AacFault, AacResult};

const EXT_FIL: u32 = 0;
const EXT_FILL_DATA: u32 = 1;
const EXT_DATA_ELEMENT: u32 = 2;
const EXT_DYNAMIC_RANGE: u32 = 11;
const EXT_SBR_DATA: u32 = 13;
const EXT_SBR_DATA_CRC: u32 = 14;

const ANC_DATA: u32 = 0;

/// DRC 频带数上限
pub const DRC_MAX_BANDS: usize = 17;
/// 节目参考电平缺省值 (0.25 dB 单位, 即 -20 dB)
pub const DRC_REF_LEVEL: u8 = 80;

/// dynamic_range_info
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrcInfo {
    pub present: bool,
    pub pce_instance_tag: Option<u8>,
    /// 按声道序号的排除标记 (每 7 个一组)
    pub exclude_mask: Vec<bool>,
    pub num_bands: usize,
    /// 频带上界, 单位为 4 条谱线
    pub band_top: [u8; DRC_MAX_BANDS],
    pub prog_ref_level: u8,
    /// true 表示压缩 (衰减)
    pub dyn_rng_sgn: [bool; DRC_MAX_BANDS],
    pub dyn_rng_ctl: [u8; DRC_MAX_BANDS],
}

impl Default for DrcInfo {
    fn default() -> Self {
        Self {
            present: false,
            pce_instance_tag: None,
            exclude_mask: Vec::new(),
            num_bands: 1,
            band_top: [0; DRC_MAX_BANDS],
            prog_ref_level: DRC_REF_LEVEL,
            dyn_rng_sgn: [false; DRC_MAX_BANDS],
            dyn_rng_ctl: [0; DRC_MAX_BANDS],
        }
    }
}

impl DrcInfo {
    /// 该声道是否被排除在 DRC 之外
    pub fn excludes(&self, channel: usize) -> bool {
        self.exclude_mask.get(channel).copied().unwrap_or(false)
    }

    /// 解析 dynamic_range_info, 返回占用的字节数 (含扩展类型所在字节)
    fn parse(&mut self, br: &mut BitCursor<'_>) -> usize {
        let mut n = 1;
        self.present = true;
        self.num_bands = 1;

        if br.get_bit() == 1 {
            self.pce_instance_tag = Some(br.get_bits(4) as u8);
            br.consume(4);
            n += 1;
        }

        if br.get_bit() == 1 {
            self.exclude_mask.clear();
            loop {
                for _ in 0..7 {
                    self.exclude_mask.push(br.get_bit() == 1);
                }
                n += 1;
                if br.get_bit() == 0 || br.has_error() {
                    break;
                }
            }
        }

        if br.get_bit() == 1 {
            let band_incr = br.get_bits(4) as usize;
            br.consume(4);
            n += 1;
            self.num_bands = (1 + band_incr).min(DRC_MAX_BANDS);
            for top in self.band_top.iter_mut().take(self.num_bands) {
                *top = br.get_bits(8) as u8;
                n += 1;
            }
        }

        if br.get_bit() == 1 {
            self.prog_ref_level = br.get_bits(7) as u8;
            br.consume(1);
            n += 1;
        }

        for b in 0..self.num_bands {
            self.dyn_rng_sgn[b] = br.get_bit() == 1;
            self.dyn_rng_ctl[b] = br.get_bits(7) as u8;
            n += 1;
        }
        n
    }
}

/// 原样保存的 SBR 扩展负载
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SbrPayload {
    /// 所属声道元素在本帧中的序号
    pub element: usize,
    pub crc: bool,
    /// 含扩展类型半字节在内的全部字节
    pub data: Vec<u8>,
}

/// 本帧填充元素携带的信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameExtensions {
    pub drc: DrcInfo,
    pub sbr_payloads: Vec<SbrPayload>,
    /// 辅助数据 (data_element_byte)
    pub ancillary: Vec<u8>,
}

impl FrameExtensions {
    /// 解析一个填充元素
    ///
    /// `sbr_element` 为紧邻的上一个声道元素序号; 没有时 SBR 负载被丢弃.
    pub fn parse_fill_element(
        &mut self,
        br: &mut BitCursor<'_>,
        sbr_element: Option<usize>,
    ) -> AacResult<()> {
        let mut count = br.get_bits(4) as usize;
        if count == 15 {
            count += br.get_bits(8) as usize;
            count -= 1;
        }
        if count == 0 {
            return Ok(());
        }
        if br.bits_left() < count * 8 {
            return Err(AacFault::BufferExhausted);
        }

        let ext_type = br.peek(4);
        if ext_type == EXT_SBR_DATA || ext_type == EXT_SBR_DATA_CRC {
            let data = br.read_buffer(count * 8);
            match sbr_element {
                Some(element) => {
                    trace!("SBR 负载: 元素 {}, {} 字节", element, count);
                    self.sbr_payloads.push(SbrPayload {
                        element,
                        crc: ext_type == EXT_SBR_DATA_CRC,
                        data,
                    });
                }
                None => warn!("SBR 负载之前没有声道元素, 已丢弃"),
            }
            return Ok(());
        }

        while count > 0 {
            let used = self.extension_payload(br, count);
            if br.has_error() {
                return Err(AacFault::BufferExhausted);
            }
            count = count.saturating_sub(used.max(1));
        }
        Ok(())
    }

    /// 解析一个 extension_payload, 返回占用的字节数
    fn extension_payload(&mut self, br: &mut BitCursor<'_>, count: usize) -> usize {
        let ext_type = br.get_bits(4);
        let mut align = 4;
        match ext_type {
            EXT_DYNAMIC_RANGE => {
                let n = self.drc.parse(br);
                trace!("DRC: {} 个频带, 参考电平 {}", self.drc.num_bands, self.drc.prog_ref_level);
                return n;
            }
            EXT_FILL_DATA => {
                br.consume(4);
                br.consume(8 * (count as u32 - 1));
                return count;
            }
            EXT_DATA_ELEMENT => {
                let version = br.get_bits(4);
                if version == ANC_DATA {
                    let mut loop_counter = 0;
                    let mut length = 0usize;
                    loop {
                        let part = br.get_bits(8) as usize;
                        length += part;
                        loop_counter += 1;
                        if part != 255 || br.has_error() {
                            break;
                        }
                    }
                    for _ in 0..length {
                        self.ancillary.push(br.get_bits(8) as u8);
                    }
                    return length + loop_counter + 1;
                }
                align = 0;
            }
            EXT_FIL => {}
            other => trace!("未知扩展类型 {}, 跳过", other),
        }
        br.consume(align);
        br.consume(8 * (count as u32 - 1));
        count
    }
}

/// 跳过数据流元素, 返回数据字节数
pub fn skip_data_stream_element(br: &mut BitCursor<'_>) -> AacResult<usize> {
    let _tag = br.get_bits(4);
    let byte_aligned = br.get_bit() == 1;
    let mut count = br.get_bits(8) as usize;
    if count == 255 {
        count += br.get_bits(8) as usize;
    }
    if byte_aligned {
        br.byte_align();
    }
    if br.bits_left() < count * 8 {
        return Err(AacFault::BufferExhausted);
    }
    br.consume(8 * count as u32);
    Ok(count)
}
