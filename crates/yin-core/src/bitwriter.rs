//! 比特流写入器.
//!
//! 与 [`BitCursor`](crate::bitreader::BitCursor) 对应的大端位序写入器,
//! 主要用于在测试与工具中合成 AAC 码流.

/// 比特流写入器
///
/// # 示例
/// ```
/// use yin_core::bitwriter::BitWriter;
///
/// let mut bw = BitWriter::new();
/// bw.write_bits(0b1011, 4);
/// bw.write_pattern("0001");
/// bw.write_bits(0b01010101, 8);
/// assert_eq!(bw.finish(), vec![0b10110001, 0b01010101]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// 已完成的字节
    data: Vec<u8>,
    /// 正在填充的字节
    current_byte: u8,
    /// 当前字节中已填充的位数 (0-7)
    bit_count: u8,
}

impl BitWriter {
    /// 创建新的比特流写入器
    pub fn new() -> Self {
        Self::default()
    }

    /// 已写入的总位数
    pub fn bits_written(&self) -> usize {
        self.data.len() * 8 + self.bit_count as usize
    }

    /// 写入 1 个位
    pub fn write_bit(&mut self, bit: u32) {
        self.current_byte = (self.current_byte << 1) | (bit & 1) as u8;
        self.bit_count += 1;
        if self.bit_count == 8 {
            self.data.push(self.current_byte);
            self.current_byte = 0;
            self.bit_count = 0;
        }
    }

    /// 写入值的低 n 位 (n <= 32), 高位在前
    pub fn write_bits(&mut self, value: u32, n: u32) {
        debug_assert!(n <= 32, "write_bits: n={n} 超过 32 位");
        for shift in (0..n.min(32)).rev() {
            self.write_bit((value >> shift) & 1);
        }
    }

    /// 以二进制补码写入有符号值
    pub fn write_signed(&mut self, value: i32, n: u32) {
        let mask = if n >= 32 { u32::MAX } else { (1u32 << n) - 1 };
        self.write_bits(value as u32 & mask, n);
    }

    /// 写入 "0101" 形式的位串, 其它字符被忽略
    pub fn write_pattern(&mut self, pattern: &str) {
        for ch in pattern.chars() {
            match ch {
                '0' => self.write_bit(0),
                '1' => self.write_bit(1),
                _ => {}
            }
        }
    }

    /// 对齐到字节边界 (用 0 填充), 返回填充的位数
    pub fn align_to_byte(&mut self) -> u32 {
        if self.bit_count == 0 {
            return 0;
        }
        let pad = 8 - self.bit_count;
        self.current_byte <<= pad;
        self.data.push(self.current_byte);
        self.current_byte = 0;
        self.bit_count = 0;
        u32::from(pad)
    }

    /// 写入完整字节
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        if self.bit_count == 0 {
            self.data.extend_from_slice(bytes);
        } else {
            for &b in bytes {
                self.write_bits(u32::from(b), 8);
            }
        }
    }

    /// 完成写入, 不在字节边界时以 0 填充
    pub fn finish(mut self) -> Vec<u8> {
        self.align_to_byte();
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitreader::{BitCursor, BitSource};

    #[test]
    fn test_写入后读回() {
        let mut bw = BitWriter::new();
        bw.write_bits(0x5, 3);
        bw.write_signed(-3, 5);
        bw.write_bits(0xABCD_1234, 32);
        bw.write_pattern("1 0 1");
        assert_eq!(bw.bits_written(), 43);
        let data = bw.finish();
        assert_eq!(data.len(), 6);

        let mut bc = BitCursor::new(&data).unwrap();
        assert_eq!(bc.get_bits(3), 0x5);
        assert_eq!(bc.get_bits(5), 0b11101);
        assert_eq!(bc.get_bits(32), 0xABCD_1234);
        assert_eq!(bc.get_bits(3), 0b101);
    }

    #[test]
    fn test_对齐填充() {
        let mut bw = BitWriter::new();
        bw.write_bit(1);
        assert_eq!(bw.align_to_byte(), 7);
        assert_eq!(bw.align_to_byte(), 0);
        bw.write_bytes(&[0x12, 0x34]);
        assert_eq!(bw.finish(), vec![0x80, 0x12, 0x34]);
    }
}
