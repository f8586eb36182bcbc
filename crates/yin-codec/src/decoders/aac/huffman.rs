//! Huffman 解码.
//!
//! 所有码本在首次使用时构建为二叉树, 之后由全部解码器实例只读共享.
//! 码本编号到解码方式的映射由 [`CodebookKind`] 与数据驱动的 [`SpectralBook`] 表完成,
//! 解码单个码字时不再按码本编号分支.

use std::sync::OnceLock;

use yin_core::BitSource;

use super::fault::{AacFault, AacResult};
use super::tables::codebooks::{
    BOOK_1, BOOK_2, BOOK_3, BOOK_4, BOOK_5, BOOK_6, BOOK_7, BOOK_8, BOOK_9, BOOK_10, BOOK_11,
    SCALEFACTOR,
};
use super::tables::rvlc::{RVLC_ESC, RVLC_SF};

/// 码字解码失败的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// 码字尚未结束位源就已耗尽
    Exhausted,
    /// 位串不对应任何码字
    Invalid,
}

impl TreeError {
    /// 转为普通 (非 HCR) 路径的故障
    pub fn into_fault(self, invalid: AacFault) -> AacFault {
        match self {
            Self::Exhausted => AacFault::BufferExhausted,
            Self::Invalid => invalid,
        }
    }
}

/// 读取 n 位, 位源不足时报告耗尽而不是补零
pub fn take_bits<S: BitSource + ?Sized>(src: &mut S, n: u32) -> Result<u32, TreeError> {
    if src.bits_left() < n as usize {
        return Err(TreeError::Exhausted);
    }
    Ok(src.get_bits(n))
}

// ============================================================
// Huffman 二叉树
// ============================================================

/// Huffman 二叉树
///
/// 节点为 `[bit0_child, bit1_child]`: 正值为子节点下标, 负值为叶子
/// (条目下标 = -(child + 1)), 0 表示空分支.
#[derive(Debug)]
pub struct HuffTree {
    nodes: Vec<[i32; 2]>,
    max_len: u8,
}

impl HuffTree {
    /// 由 (码字, 码长) 序列构建, 叶子记录条目下标
    pub fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, u8)>,
    {
        let mut nodes = vec![[0i32; 2]];
        let mut max_len = 0u8;
        for (index, (code, len)) in entries.into_iter().enumerate() {
            max_len = max_len.max(len);
            let leaf = -(index as i32 + 1);
            let mut idx = 0usize;
            for bit_pos in (0..len).rev() {
                let bit = ((code >> bit_pos) & 1) as usize;
                if bit_pos == 0 {
                    nodes[idx][bit] = leaf;
                } else if nodes[idx][bit] > 0 {
                    idx = nodes[idx][bit] as usize;
                } else {
                    let new_idx = nodes.len();
                    nodes.push([0; 2]);
                    nodes[idx][bit] = new_idx as i32;
                    idx = new_idx;
                }
            }
        }
        Self { nodes, max_len }
    }

    /// 解码一个码字, 返回条目下标
    pub fn decode<S: BitSource + ?Sized>(&self, src: &mut S) -> Result<usize, TreeError> {
        let mut idx = 0usize;
        for _ in 0..self.max_len {
            if src.bits_left() == 0 {
                return Err(TreeError::Exhausted);
            }
            let bit = src.get_bit() as usize;
            let child = self.nodes[idx][bit];
            if child < 0 {
                return Ok((-(child + 1)) as usize);
            }
            if child == 0 {
                return Err(TreeError::Invalid);
            }
            idx = child as usize;
        }
        Err(TreeError::Invalid)
    }

    pub fn max_len(&self) -> u8 {
        self.max_len
    }
}

// ============================================================
// 码本分类
// ============================================================

/// 码本编号的语义分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodebookKind {
    /// ZERO_HCB: 频带全零
    Zero,
    /// 频谱码本 1..=11; 16..=31 为容错模式下的 11 号虚拟码本
    Spectral(u8),
    /// 保留编号 12
    Reserved,
    /// NOISE_HCB: 感知噪声替代
    Noise,
    /// INTENSITY_HCB / INTENSITY_HCB2: 强度立体声, 携带同相 (+1) 或反相 (-1)
    Intensity(i8),
}

pub const ZERO_HCB: u8 = 0;
pub const ESC_HCB: u8 = 11;
pub const NOISE_HCB: u8 = 13;
pub const INTENSITY_HCB2: u8 = 14;
pub const INTENSITY_HCB: u8 = 15;

impl CodebookKind {
    pub fn from_id(cb: u8) -> Self {
        match cb {
            ZERO_HCB => Self::Zero,
            1..=11 | 16..=31 => Self::Spectral(cb),
            NOISE_HCB => Self::Noise,
            INTENSITY_HCB2 => Self::Intensity(-1),
            INTENSITY_HCB => Self::Intensity(1),
            _ => Self::Reserved,
        }
    }

    /// 该频带是否携带频谱码字
    pub fn has_spectral_data(self) -> bool {
        matches!(self, Self::Spectral(_))
    }
}

/// 虚拟码本 16..=31 的最大绝对值
const VCB11_LAV: [i32; 16] = [
    16, 31, 47, 63, 95, 127, 159, 191, 223, 255, 319, 383, 511, 767, 1023, 2047,
];

// ============================================================
// 频谱码本
// ============================================================

/// 频谱码本: 树 + 码本下标到量化值的映射
#[derive(Debug)]
pub struct SpectralBook {
    tree: HuffTree,
    values: Vec<[i8; 4]>,
    /// 每个码字携带的值个数 (2 或 4)
    pub dim: usize,
    /// 值是否自带符号; 否则对非零值逐个读取符号位
    signed: bool,
    /// 是否为带转义的 11 号码本
    escape: bool,
}

impl SpectralBook {
    fn build(table: &[(u16, u8)], dim: usize, modulo: i32, offset: i32, signed: bool) -> Self {
        let tree = HuffTree::build(table.iter().map(|&(c, l)| (u32::from(c), l)));
        let values = (0..table.len())
            .map(|i| index_to_values(i as i32, dim, modulo, offset))
            .collect();
        Self {
            tree,
            values,
            dim,
            signed,
            escape: modulo == 17,
        }
    }

    /// 解码一个码字, 写入 `out[..dim]`
    ///
    /// 顺序: 码字, 非零值的符号位, 然后依次为各值的转义序列.
    pub fn decode<S: BitSource + ?Sized>(
        &self,
        src: &mut S,
        out: &mut [i32],
    ) -> Result<(), TreeError> {
        let index = self.tree.decode(src)?;
        let raw = self.values.get(index).ok_or(TreeError::Invalid)?;
        for (dst, &v) in out.iter_mut().zip(raw.iter()).take(self.dim) {
            *dst = i32::from(v);
        }
        if !self.signed {
            for v in out.iter_mut().take(self.dim) {
                if *v != 0 && take_bits(src, 1)? == 1 {
                    *v = -*v;
                }
            }
        }
        if self.escape {
            for v in out.iter_mut().take(self.dim) {
                if v.abs() == 16 {
                    let magnitude = read_escape(src)?;
                    *v = if *v < 0 { -magnitude } else { magnitude };
                }
            }
        }
        Ok(())
    }

    pub fn max_codeword_len(&self) -> u8 {
        self.tree.max_len()
    }
}

/// 读取转义序列: N 个 1 加一个 0, 随后 N+4 位尾数, 值为 2^(N+4) + 尾数
fn read_escape<S: BitSource + ?Sized>(src: &mut S) -> Result<i32, TreeError> {
    let mut n = 4u32;
    while take_bits(src, 1)? == 1 {
        n += 1;
        if n > 16 {
            return Err(TreeError::Invalid);
        }
    }
    let mantissa = take_bits(src, n)? as i32;
    Ok((1 << n) + mantissa)
}

/// 将码本下标展开为值元组
pub(crate) fn index_to_values(index: i32, dim: usize, modulo: i32, offset: i32) -> [i8; 4] {
    let mut out = [0i8; 4];
    let mut rest = index;
    for i in (0..dim).rev() {
        out[i] = (rest % modulo + offset) as i8;
        rest /= modulo;
    }
    out
}

// ============================================================
// 共享码本集合
// ============================================================

/// 全部 AAC Huffman 码本
#[derive(Debug)]
pub struct Codebooks {
    pub scalefactor: HuffTree,
    /// 频谱码本 1..=11 (下标 0 对应 1 号)
    pub spectral: [SpectralBook; 11],
    pub rvlc: HuffTree,
    pub rvlc_escape: HuffTree,
}

impl Codebooks {
    fn build() -> Self {
        Self {
            scalefactor: HuffTree::build(SCALEFACTOR.iter().copied()),
            spectral: [
                SpectralBook::build(&BOOK_1, 4, 3, -1, true),
                SpectralBook::build(&BOOK_2, 4, 3, -1, true),
                SpectralBook::build(&BOOK_3, 4, 3, 0, false),
                SpectralBook::build(&BOOK_4, 4, 3, 0, false),
                SpectralBook::build(&BOOK_5, 2, 9, -4, true),
                SpectralBook::build(&BOOK_6, 2, 9, -4, true),
                SpectralBook::build(&BOOK_7, 2, 8, 0, false),
                SpectralBook::build(&BOOK_8, 2, 8, 0, false),
                SpectralBook::build(&BOOK_9, 2, 13, 0, false),
                SpectralBook::build(&BOOK_10, 2, 13, 0, false),
                SpectralBook::build(&BOOK_11, 2, 17, 0, false),
            ],
            rvlc: HuffTree::build(RVLC_SF.iter().map(|&(_, l, c)| (c, l))),
            rvlc_escape: HuffTree::build(RVLC_ESC.iter().map(|&(_, l, c)| (c, l))),
        }
    }

    /// 按码本编号取频谱码本; 虚拟码本 16..=31 使用 11 号码本
    pub fn spectral_book(&self, cb: u8) -> Option<&SpectralBook> {
        match cb {
            1..=11 => Some(&self.spectral[usize::from(cb) - 1]),
            16..=31 => Some(&self.spectral[10]),
            _ => None,
        }
    }
}

/// 共享码本 (首次调用时构建)
pub fn codebooks() -> &'static Codebooks {
    static BOOKS: OnceLock<Codebooks> = OnceLock::new();
    BOOKS.get_or_init(Codebooks::build)
}

/// 解码缩放因子差分 (-60..=60)
pub fn decode_scalefactor_delta<S: BitSource + ?Sized>(src: &mut S) -> AacResult<i32> {
    codebooks()
        .scalefactor
        .decode(src)
        .map(|index| index as i32 - 60)
        .map_err(|e| e.into_fault(AacFault::ScaleFactorHuffman))
}

/// 解码一个频谱码字到 `out[..dim]`, 返回 dim
///
/// 虚拟码本超出其最大绝对值时该码字的值清零.
pub fn decode_spectral<S: BitSource + ?Sized>(
    cb: u8,
    src: &mut S,
    out: &mut [i32],
) -> Result<usize, TreeError> {
    let book = codebooks().spectral_book(cb).ok_or(TreeError::Invalid)?;
    book.decode(src, out)?;
    if cb >= 16 {
        let lav = VCB11_LAV[usize::from(cb - 16)];
        if out[..book.dim].iter().any(|v| v.abs() > lav) {
            out[..book.dim].fill(0);
        }
    }
    Ok(book.dim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use yin_core::{BitCursor, BitWriter};

    fn cursor_of(w: BitWriter) -> (Vec<u8>, usize) {
        let bits = w.bits_written();
        (w.finish(), bits)
    }

    #[test]
    fn test_sf_差分为零() {
        let data = [0x00u8];
        let mut br = BitCursor::new(&data).unwrap();
        assert_eq!(decode_scalefactor_delta(&mut br).unwrap(), 0);
        assert_eq!(br.bits_consumed(), 1);
    }

    #[test]
    fn test_sf_全部码字可解() {
        for (index, &(code, len)) in SCALEFACTOR.iter().enumerate() {
            let mut w = BitWriter::new();
            w.write_bits(code, u32::from(len));
            let (buf, bits) = cursor_of(w);
            let mut br = BitCursor::with_bit_len(&buf, bits).unwrap();
            assert_eq!(decode_scalefactor_delta(&mut br).unwrap(), index as i32 - 60);
        }
    }

    #[test]
    fn test_cb1_零向量与单位脉冲() {
        let data = [0x00u8];
        let mut br = BitCursor::new(&data).unwrap();
        let mut out = [9i32; 4];
        assert_eq!(decode_spectral(1, &mut br, &mut out).unwrap(), 4);
        assert_eq!(out, [0, 0, 0, 0]);

        let (code, len) = BOOK_1[67];
        let mut w = BitWriter::new();
        w.write_bits(u32::from(code), u32::from(len));
        let (buf, bits) = cursor_of(w);
        let mut br = BitCursor::with_bit_len(&buf, bits).unwrap();
        decode_spectral(1, &mut br, &mut out).unwrap();
        assert_eq!(out, [1, 0, 0, 0]);
    }

    #[test]
    fn test_无符号码本读取符号位() {
        // CB7 下标 9 = (1, 1)
        let (code, len) = BOOK_7[9];
        let mut w = BitWriter::new();
        w.write_bits(u32::from(code), u32::from(len));
        w.write_bits(0b10, 2);
        let (buf, bits) = cursor_of(w);
        let mut br = BitCursor::with_bit_len(&buf, bits).unwrap();
        let mut out = [0i32; 4];
        assert_eq!(decode_spectral(7, &mut br, &mut out).unwrap(), 2);
        assert_eq!(&out[..2], &[-1, 1]);
        assert_eq!(br.bits_left(), 0);
    }

    #[test]
    fn test_cb11_转义() {
        // (16, 0): 下标 16 * 17 = 272, 正号, 转义值 20 = 2^4 + 4
        let (code, len) = BOOK_11[272];
        let mut w = BitWriter::new();
        w.write_bits(u32::from(code), u32::from(len));
        w.write_bit(0);
        w.write_bit(0);
        w.write_bits(4, 4);
        let (buf, bits) = cursor_of(w);
        let mut br = BitCursor::with_bit_len(&buf, bits).unwrap();
        let mut out = [0i32; 4];
        decode_spectral(11, &mut br, &mut out).unwrap();
        assert_eq!(&out[..2], &[20, 0]);
    }

    #[test]
    fn test_位源耗尽() {
        let (code, len) = BOOK_11[272];
        let mut w = BitWriter::new();
        w.write_bits(u32::from(code), u32::from(len));
        let (buf, bits) = cursor_of(w);
        let mut br = BitCursor::with_bit_len(&buf, bits).unwrap();
        let mut out = [0i32; 4];
        assert_eq!(
            decode_spectral(11, &mut br, &mut out),
            Err(TreeError::Exhausted)
        );
    }

    #[test]
    fn test_码本分类() {
        assert_eq!(CodebookKind::from_id(0), CodebookKind::Zero);
        assert_eq!(CodebookKind::from_id(12), CodebookKind::Reserved);
        assert_eq!(CodebookKind::from_id(13), CodebookKind::Noise);
        assert_eq!(CodebookKind::from_id(14), CodebookKind::Intensity(-1));
        assert_eq!(CodebookKind::from_id(15), CodebookKind::Intensity(1));
        assert_eq!(CodebookKind::from_id(20), CodebookKind::Spectral(20));
        assert!(codebooks().spectral_book(20).is_some());
        assert!(codebooks().spectral_book(12).is_none());
    }

    #[test]
    fn test_index_to_values() {
        assert_eq!(index_to_values(27, 4, 3, 0), [1, 0, 0, 0]);
        assert_eq!(index_to_values(80, 4, 3, 0), [2, 2, 2, 2]);
        assert_eq!(index_to_values(40, 2, 9, -4), [0, 0, 0, 0]);
        assert_eq!(index_to_values(0, 2, 9, -4), [-4, -4, 0, 0]);
        assert_eq!(index_to_values(63, 2, 8, 0), [7, 7, 0, 0]);
    }
}
