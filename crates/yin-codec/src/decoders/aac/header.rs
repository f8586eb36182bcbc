//! ADTS / ADIF 传输头.
//!
//! ADTS 头位于每帧之前, 解析后剩余部分即 raw_data_block;
//! ADIF 头只在文件开头出现一次, 之后是连续的 raw_data_block.

use serde::Serialize;
use yin_core::{BitCursor, BitSource};

use super::fault::{AacFault, AacResult};
use super::pce::ProgramConfig;

/// ADTS 同步字搜索的最大字节数
const ADTS_SYNC_SEARCH: usize = 768;

/// 码流封装类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum HeaderType {
    #[default]
    Raw,
    Adif,
    Adts,
}

/// ADTS 帧头 (固定头 + 可变头)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdtsHeader {
    /// 0 = MPEG-4, 1 = MPEG-2
    pub id: u8,
    pub layer: u8,
    pub protection_absent: bool,
    /// 对象类型 - 1
    pub profile: u8,
    pub sf_index: u8,
    pub private_bit: bool,
    pub channel_configuration: u8,
    pub original: bool,
    pub home: bool,
    pub copyright_id_bit: bool,
    pub copyright_id_start: bool,
    /// 含头在内的整帧字节数
    pub frame_length: usize,
    pub buffer_fullness: u16,
    pub num_raw_data_blocks: u8,
    pub crc: Option<u16>,
    /// 同步字之前跳过的字节数
    pub sync_offset: usize,
}

impl AdtsHeader {
    /// 在数据起始处是否为 ADTS 同步字
    pub fn probe(data: &[u8]) -> bool {
        data.len() >= 7 && data[0] == 0xFF && (data[1] & 0xF6) == 0xF0
    }

    /// 搜索同步字并解析帧头, 游标停在 raw_data_block 起始处
    pub fn parse(br: &mut BitCursor<'_>) -> AacResult<Self> {
        let mut sync_offset = 0;
        loop {
            if br.bits_left() < 12 {
                return Err(AacFault::AdtsSyncNotFound);
            }
            if br.peek(12) == 0xFFF {
                break;
            }
            sync_offset += 1;
            if sync_offset >= ADTS_SYNC_SEARCH {
                return Err(AacFault::AdtsSyncNotFound);
            }
            br.consume(8);
        }
        br.consume(12);

        let mut header = AdtsHeader {
            id: br.get_bit() as u8,
            layer: br.get_bits(2) as u8,
            protection_absent: br.get_bit() == 1,
            profile: br.get_bits(2) as u8,
            sf_index: br.get_bits(4) as u8,
            private_bit: br.get_bit() == 1,
            channel_configuration: br.get_bits(3) as u8,
            original: br.get_bit() == 1,
            home: br.get_bit() == 1,
            copyright_id_bit: br.get_bit() == 1,
            copyright_id_start: br.get_bit() == 1,
            frame_length: br.get_bits(13) as usize,
            buffer_fullness: br.get_bits(11) as u16,
            num_raw_data_blocks: br.get_bits(2) as u8,
            crc: None,
            sync_offset,
        };
        if !header.protection_absent {
            header.crc = Some(br.get_bits(16) as u16);
        }
        if br.has_error() {
            return Err(AacFault::BufferExhausted);
        }
        Ok(header)
    }

    /// 帧头字节数 (不含同步前的跳过字节)
    pub fn header_len(&self) -> usize {
        if self.protection_absent { 7 } else { 9 }
    }
}

/// ADIF 文件头
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdifHeader {
    pub copyright_id: Option<[u8; 9]>,
    pub original_copy: bool,
    pub home: bool,
    /// 0 = 恒定码率, 1 = 可变码率
    pub bitstream_type: u8,
    pub bitrate: u32,
    pub buffer_fullness: Vec<u32>,
    pub pces: Vec<ProgramConfig>,
}

impl AdifHeader {
    pub fn probe(data: &[u8]) -> bool {
        data.starts_with(b"ADIF")
    }

    /// 解析 ADIF 头, 结束后游标按字节对齐
    pub fn parse(br: &mut BitCursor<'_>) -> AacResult<Self> {
        if br.get_bits(32) != u32::from_be_bytes(*b"ADIF") {
            return Err(AacFault::AdtsSyncNotFound);
        }
        let mut header = AdifHeader::default();
        if br.get_bit() == 1 {
            let mut id = [0u8; 9];
            for b in &mut id {
                *b = br.get_bits(8) as u8;
            }
            header.copyright_id = Some(id);
        }
        header.original_copy = br.get_bit() == 1;
        header.home = br.get_bit() == 1;
        header.bitstream_type = br.get_bit() as u8;
        header.bitrate = br.get_bits(23);
        let num_pce = br.get_bits(4) as usize + 1;
        for _ in 0..num_pce {
            let fullness = if header.bitstream_type == 0 {
                br.get_bits(20)
            } else {
                0
            };
            header.buffer_fullness.push(fullness);
            header.pces.push(ProgramConfig::parse(br)?);
        }
        br.byte_align();
        if br.has_error() {
            return Err(AacFault::BufferExhausted);
        }
        Ok(header)
    }
}
