//! 比特游标.
//!
//! 按大端位序 (MSB first) 从字节缓冲区读取数据, 是 AAC 语法解析与熵解码的基础设施.
//!
//! 与常见的 "读失败立即返回错误" 的读取器不同, 游标采用延迟错误语义:
//! 越界读取返回 0 并置位内部的 `error` / `exhausted` 标志, 由调用方在一段解析结束后统一检查.
//! 容错解码 (HCR/RVLC) 依赖这一点保留部分可用的结果.
//!
//! 正向游标 [`BitCursor`] 与反向游标 [`ReverseBitCursor`] 共享 [`BitSource`] 读取契约,
//! 反向游标从缓冲区尾部向低地址读取.

use crate::{YinError, YinResult};

/// 按位读取的统一契约
///
/// 实现者只需提供 `peek` / `consume` 及状态查询, `get_bits` 等由默认方法完成.
pub trait BitSource {
    /// 窥视 n 位 (n <= 32), 不移动位置. 越过末尾的位按 0 补齐.
    fn peek(&self, n: u32) -> u32;

    /// 前进 n 位. 越过末尾时停在末尾并置位错误标志.
    fn consume(&mut self, n: u32);

    /// 已读取的位数
    fn bits_consumed(&self) -> u64;

    /// 剩余可读位数
    fn bits_left(&self) -> usize;

    /// 是否发生过越界读取
    fn has_error(&self) -> bool;

    /// 读取 n 位 (peek + consume). 越界时返回 0.
    fn get_bits(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        let value = if self.bits_left() >= n as usize {
            self.peek(n)
        } else {
            0
        };
        self.consume(n);
        value
    }

    /// 读取 1 位
    fn get_bit(&mut self) -> u32 {
        self.get_bits(1)
    }
}

/// 正向比特游标
///
/// # 示例
/// ```
/// use yin_core::bitreader::{BitCursor, BitSource};
///
/// let data = [0b10110001, 0b01010101];
/// let mut cursor = BitCursor::new(&data).unwrap();
/// assert_eq!(cursor.get_bits(4), 0b1011);
/// assert_eq!(cursor.peek(4), 0b0001);
/// assert_eq!(cursor.byte_align(), 4);
/// assert_eq!(cursor.get_bits(8), 0b01010101);
/// assert!(!cursor.has_error());
/// ```
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    /// 源数据
    data: &'a [u8],
    /// 有效位数 (可小于 data.len() * 8)
    len_bits: usize,
    /// 当前位位置
    pos: usize,
    /// 越界读取标志
    error: bool,
    /// 已到达末尾
    exhausted: bool,
}

impl<'a> BitCursor<'a> {
    /// 创建游标, 空缓冲区返回错误
    pub fn new(data: &'a [u8]) -> YinResult<Self> {
        Self::with_bit_len(data, data.len() * 8)
    }

    /// 创建只读取前 `len_bits` 位的游标
    pub fn with_bit_len(data: &'a [u8], len_bits: usize) -> YinResult<Self> {
        if data.is_empty() {
            return Err(YinError::InvalidArgument("比特游标: 空缓冲区".into()));
        }
        if len_bits > data.len() * 8 {
            return Err(YinError::InvalidArgument(format!(
                "比特游标: 有效位数 {len_bits} 超过缓冲区 {} 位",
                data.len() * 8
            )));
        }
        Ok(Self {
            data,
            len_bits,
            pos: 0,
            error: false,
            exhausted: len_bits == 0,
        })
    }

    /// 对齐到下一个字节边界, 返回跳过的位数
    pub fn byte_align(&mut self) -> u32 {
        let rem = (self.pos % 8) as u32;
        if rem == 0 {
            return 0;
        }
        let skip = 8 - rem;
        self.consume(skip);
        skip
    }

    /// 回到缓冲区起点并清除错误标志
    pub fn rewind(&mut self) {
        self.pos = 0;
        self.error = false;
        self.exhausted = self.len_bits == 0;
    }

    /// 是否已读到末尾
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// 有效总位数
    pub fn bit_len(&self) -> usize {
        self.len_bits
    }

    /// 当前字节位置 (向下取整)
    pub fn byte_position(&self) -> usize {
        self.pos / 8
    }

    /// 取出接下来的 `n_bits` 位, 按 MSB 优先打包为独立缓冲区并前进.
    ///
    /// 末字节不足 8 位时低位补 0. 越界部分同样补 0 并置位错误.
    pub fn read_buffer(&mut self, n_bits: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(n_bits.div_ceil(8));
        let mut remaining = n_bits;
        while remaining > 0 {
            let take = remaining.min(8) as u32;
            let byte = self.get_bits(take) << (8 - take);
            out.push(byte as u8);
            remaining -= take as usize;
        }
        out
    }

    fn byte_at(&self, index: usize) -> u64 {
        self.data.get(index).copied().map_or(0, u64::from)
    }
}

impl BitSource for BitCursor<'_> {
    fn peek(&self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        debug_assert!(n <= 32, "peek: n={n} 超过 32 位");
        let n = n.min(32);
        let byte = self.pos / 8;
        let shift = (self.pos % 8) as u32;

        // 40 位窗口足以覆盖任意位偏移下的 32 位读取
        let mut window = 0u64;
        for i in 0..5 {
            window = (window << 8) | self.byte_at(byte + i);
        }
        let mut value = (window >> (40 - shift - n)) & ((1u64 << n) - 1);

        // 有效位之外的内容按 0 处理
        let valid = self.len_bits.saturating_sub(self.pos);
        if valid < n as usize {
            let invalid = n - valid as u32;
            value &= !((1u64 << invalid) - 1);
        }
        value as u32
    }

    fn consume(&mut self, n: u32) {
        let target = self.pos + n as usize;
        if target > self.len_bits {
            self.pos = self.len_bits;
            self.error = true;
        } else {
            self.pos = target;
        }
        self.exhausted = self.pos >= self.len_bits;
    }

    fn bits_consumed(&self) -> u64 {
        self.pos as u64
    }

    fn bits_left(&self) -> usize {
        self.len_bits - self.pos
    }

    fn has_error(&self) -> bool {
        self.error
    }
}

/// 反向比特游标
///
/// 从有效数据末尾开始向低地址读取: 每次读取的第一位是当前位置之前的那一位,
/// 并作为返回值的最高位. 用于从段尾部扫描 RVLC 码字.
#[derive(Debug, Clone)]
pub struct ReverseBitCursor<'a> {
    data: &'a [u8],
    len_bits: usize,
    /// 下一次读取的位边界 (读取 pos-1, pos-2, ...)
    pos: usize,
    error: bool,
    exhausted: bool,
}

impl<'a> ReverseBitCursor<'a> {
    /// 创建从缓冲区尾部开始的反向游标
    pub fn new(data: &'a [u8]) -> YinResult<Self> {
        Self::with_bit_len(data, data.len() * 8)
    }

    /// 创建反向游标, 只使用前 `len_bits` 位 (从第 `len_bits - 1` 位开始读)
    pub fn with_bit_len(data: &'a [u8], len_bits: usize) -> YinResult<Self> {
        if data.is_empty() {
            return Err(YinError::InvalidArgument("反向比特游标: 空缓冲区".into()));
        }
        if len_bits > data.len() * 8 {
            return Err(YinError::InvalidArgument(format!(
                "反向比特游标: 有效位数 {len_bits} 超过缓冲区 {} 位",
                data.len() * 8
            )));
        }
        Ok(Self {
            data,
            len_bits,
            pos: len_bits,
            error: false,
            exhausted: len_bits == 0,
        })
    }

    /// 向低地址对齐到字节边界, 返回跳过的位数
    pub fn byte_align(&mut self) -> u32 {
        let skip = (self.pos % 8) as u32;
        self.consume(skip);
        skip
    }

    /// 回到尾部起点并清除错误标志
    pub fn rewind(&mut self) {
        self.pos = self.len_bits;
        self.error = false;
        self.exhausted = self.len_bits == 0;
    }

    /// 是否已读到起点
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn bit_at(&self, index: usize) -> u32 {
        let byte = self.data[index / 8];
        u32::from((byte >> (7 - (index % 8))) & 1)
    }
}

impl BitSource for ReverseBitCursor<'_> {
    fn peek(&self, n: u32) -> u32 {
        debug_assert!(n <= 32, "peek: n={n} 超过 32 位");
        let mut value = 0u32;
        for i in 0..n.min(32) as usize {
            let bit = if i < self.pos {
                self.bit_at(self.pos - 1 - i)
            } else {
                0
            };
            value = (value << 1) | bit;
        }
        value
    }

    fn consume(&mut self, n: u32) {
        let n = n as usize;
        if n > self.pos {
            self.pos = 0;
            self.error = true;
        } else {
            self.pos -= n;
        }
        self.exhausted = self.pos == 0;
    }

    fn bits_consumed(&self) -> u64 {
        (self.len_bits - self.pos) as u64
    }

    fn bits_left(&self) -> usize {
        self.pos
    }

    fn has_error(&self) -> bool {
        self.error
    }
}
