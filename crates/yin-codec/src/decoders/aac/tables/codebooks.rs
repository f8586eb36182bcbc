//! Huffman 码本数据 (ISO/IEC 14496-3 附录 4.A).
//!
//! 每个条目为 `(码字, 码长)`, 条目下标即码本索引.

/// 尺度因子码本, 索引 - 60 为差分值
#[rustfmt::skip]
pub(crate) static SCALEFACTOR: [(u32, u8); 121] = [
    (0x3FFE8, 18), (0x3FFE6, 18), (0x3FFE7, 18), (0x3FFE5, 18),
    (0x7FFF5, 19), (0x7FFF1, 19), (0x7FFED, 19), (0x7FFF6, 19),
    (0x7FFEE, 19), (0x7FFEF, 19), (0x7FFF0, 19), (0x7FFFC, 19),
    (0x7FFFD, 19), (0x7FFFF, 19), (0x7FFFE, 19), (0x7FFF7, 19),
    (0x7FFF8, 19), (0x7FFFB, 19), (0x7FFF9, 19), (0x3FFE4, 18),
    (0x7FFFA, 19), (0x3FFE3, 18), (0x1FFEF, 17), (0x1FFF0, 17),
    (0x0FFF5, 16), (0x1FFEE, 17), (0x0FFF2, 16), (0x0FFF3, 16),
    (0x0FFF4, 16), (0x0FFF1, 16), (0x07FF6, 15), (0x07FF7, 15),
    (0x03FF9, 14), (0x03FF5, 14), (0x03FF7, 14), (0x03FF3, 14),
    (0x03FF6, 14), (0x03FF2, 14), (0x01FF7, 13), (0x01FF5, 13),
    (0x00FF9, 12), (0x00FF7, 12), (0x00FF6, 12), (0x007F9, 11),
    (0x00FF4, 12), (0x007F8, 11), (0x003F9, 10), (0x003F7, 10),
    (0x003F5, 10), (0x001F8, 9), (0x001F7, 9), (0x000FA, 8),
    (0x000F8, 8), (0x000F6, 8), (0x00079, 7), (0x0003A, 6),
    (0x00038, 6), (0x0001A, 5), (0x0000B, 4), (0x00004, 3),
    (0x00000, 1), (0x0000A, 4), (0x0000C, 4), (0x0001B, 5),
    (0x00039, 6), (0x0003B, 6), (0x00078, 7), (0x0007A, 7),
    (0x000F7, 8), (0x000F9, 8), (0x001F6, 9), (0x001F9, 9),
    (0x003F4, 10), (0x003F6, 10), (0x003F8, 10), (0x007F5, 11),
    (0x007F4, 11), (0x007F6, 11), (0x007F7, 11), (0x00FF5, 12),
    (0x00FF8, 12), (0x01FF4, 13), (0x01FF6, 13), (0x01FF8, 13),
    (0x03FF8, 14), (0x03FF4, 14), (0x0FFF0, 16), (0x07FF4, 15),
    (0x0FFF6, 16), (0x07FF5, 15), (0x3FFE2, 18), (0x7FFD9, 19),
    (0x7FFDA, 19), (0x7FFDB, 19), (0x7FFDC, 19), (0x7FFDD, 19),
    (0x7FFDE, 19), (0x7FFD8, 19), (0x7FFD2, 19), (0x7FFD3, 19),
    (0x7FFD4, 19), (0x7FFD5, 19), (0x7FFD6, 19), (0x7FFF2, 19),
    (0x7FFDF, 19), (0x7FFE7, 19), (0x7FFE8, 19), (0x7FFE9, 19),
    (0x7FFEA, 19), (0x7FFEB, 19), (0x7FFE6, 19), (0x7FFE0, 19),
    (0x7FFE1, 19), (0x7FFE2, 19), (0x7FFE3, 19), (0x7FFE4, 19),
    (0x7FFE5, 19), (0x7FFD7, 19), (0x7FFEC, 19), (0x7FFF4, 19),
    (0x7FFF3, 19),
];

/// 频谱码本 1: 四元组, 有符号, 最大绝对值 1
#[rustfmt::skip]
pub(crate) static BOOK_1: [(u16, u8); 81] = [
    (0x07f8, 11), (0x01f1, 9), (0x07fd, 11), (0x03f5, 10), (0x0068, 7), (0x03f0, 10),
    (0x07f7, 11), (0x01ec, 9), (0x07f5, 11), (0x03f1, 10), (0x0072, 7), (0x03f4, 10),
    (0x0074, 7), (0x0011, 5), (0x0076, 7), (0x01eb, 9), (0x006c, 7), (0x03f6, 10),
    (0x07fc, 11), (0x01e1, 9), (0x07f1, 11), (0x01f0, 9), (0x0061, 7), (0x01f6, 9),
    (0x07f2, 11), (0x01ea, 9), (0x07fb, 11), (0x01f2, 9), (0x0069, 7), (0x01ed, 9),
    (0x0077, 7), (0x0017, 5), (0x006f, 7), (0x01e6, 9), (0x0064, 7), (0x01e5, 9),
    (0x0067, 7), (0x0015, 5), (0x0062, 7), (0x0012, 5), (0x0000, 1), (0x0014, 5),
    (0x0065, 7), (0x0016, 5), (0x006d, 7), (0x01e9, 9), (0x0063, 7), (0x01e4, 9),
    (0x006b, 7), (0x0013, 5), (0x0071, 7), (0x01e3, 9), (0x0070, 7), (0x01f3, 9),
    (0x07fe, 11), (0x01e7, 9), (0x07f3, 11), (0x01ef, 9), (0x0060, 7), (0x01ee, 9),
    (0x07f0, 11), (0x01e2, 9), (0x07fa, 11), (0x03f3, 10), (0x006a, 7), (0x01e8, 9),
    (0x0075, 7), (0x0010, 5), (0x0073, 7), (0x01f4, 9), (0x006e, 7), (0x03f7, 10),
    (0x07f6, 11), (0x01e0, 9), (0x07f9, 11), (0x03f2, 10), (0x0066, 7), (0x01f5, 9),
    (0x07ff, 11), (0x01f7, 9), (0x07f4, 11),
];

/// 频谱码本 2: 四元组, 有符号, 最大绝对值 1
#[rustfmt::skip]
pub(crate) static BOOK_2: [(u16, u8); 81] = [
    (0x01f3, 9), (0x006f, 7), (0x01fd, 9), (0x00eb, 8), (0x0023, 6), (0x00ea, 8),
    (0x01f7, 9), (0x00e8, 8), (0x01fa, 9), (0x00f2, 8), (0x002d, 6), (0x0070, 7),
    (0x0020, 6), (0x0006, 5), (0x002b, 6), (0x006e, 7), (0x0028, 6), (0x00e9, 8),
    (0x01f9, 9), (0x0066, 7), (0x00f8, 8), (0x00e7, 8), (0x001b, 6), (0x00f1, 8),
    (0x01f4, 9), (0x006b, 7), (0x01f5, 9), (0x00ec, 8), (0x002a, 6), (0x006c, 7),
    (0x002c, 6), (0x000a, 5), (0x0027, 6), (0x0067, 7), (0x001a, 6), (0x00f5, 8),
    (0x0024, 6), (0x0008, 5), (0x001f, 6), (0x0009, 5), (0x0000, 3), (0x0007, 5),
    (0x001d, 6), (0x000b, 5), (0x0030, 6), (0x00ef, 8), (0x001c, 6), (0x0064, 7),
    (0x001e, 6), (0x000c, 5), (0x0029, 6), (0x00f3, 8), (0x002f, 6), (0x00f0, 8),
    (0x01fc, 9), (0x0071, 7), (0x01f2, 9), (0x00f4, 8), (0x0021, 6), (0x00e6, 8),
    (0x00f7, 8), (0x0068, 7), (0x01f8, 9), (0x00ee, 8), (0x0022, 6), (0x0065, 7),
    (0x0031, 6), (0x0002, 4), (0x0026, 6), (0x00ed, 8), (0x0025, 6), (0x006a, 7),
    (0x01fb, 9), (0x0072, 7), (0x01fe, 9), (0x0069, 7), (0x002e, 6), (0x00f6, 8),
    (0x01ff, 9), (0x006d, 7), (0x01f6, 9),
];

/// 频谱码本 3: 四元组, 无符号, 最大值 2
#[rustfmt::skip]
pub(crate) static BOOK_3: [(u16, u8); 81] = [
    (0x0000, 1), (0x0009, 4), (0x00ef, 8), (0x000b, 4), (0x0019, 5), (0x00f0, 8),
    (0x01eb, 9), (0x01e6, 9), (0x03f2, 10), (0x000a, 4), (0x0035, 6), (0x01ef, 9),
    (0x0034, 6), (0x0037, 6), (0x01e9, 9), (0x01ed, 9), (0x01e7, 9), (0x03f3, 10),
    (0x01ee, 9), (0x03ed, 10), (0x1ffa, 13), (0x01ec, 9), (0x01f2, 9), (0x07f9, 11),
    (0x07f8, 11), (0x03f8, 10), (0x0ff8, 12), (0x0008, 4), (0x0038, 6), (0x03f6, 10),
    (0x0036, 6), (0x0075, 7), (0x03f1, 10), (0x03eb, 10), (0x03ec, 10), (0x0ff4, 12),
    (0x0018, 5), (0x0076, 7), (0x07f4, 11), (0x0039, 6), (0x0074, 7), (0x03ef, 10),
    (0x01f3, 9), (0x01f4, 9), (0x07f6, 11), (0x01e8, 9), (0x03ea, 10), (0x1ffc, 13),
    (0x00f2, 8), (0x01f1, 9), (0x0ffb, 12), (0x03f5, 10), (0x07f3, 11), (0x0ffc, 12),
    (0x00ee, 8), (0x03f7, 10), (0x7ffe, 15), (0x01f0, 9), (0x07f5, 11), (0x7ffd, 15),
    (0x1ffb, 13), (0x3ffa, 14), (0xffff, 16), (0x00f1, 8), (0x03f0, 10), (0x3ffc, 14),
    (0x01ea, 9), (0x03ee, 10), (0x3ffb, 14), (0x0ff6, 12), (0x0ffa, 12), (0x7ffc, 15),
    (0x07f2, 11), (0x0ff5, 12), (0xfffe, 16), (0x03f4, 10), (0x07f7, 11), (0x7ffb, 15),
    (0x0ff7, 12), (0x0ff9, 12), (0x7ffa, 15),
];

/// 频谱码本 4: 四元组, 无符号, 最大值 2
#[rustfmt::skip]
pub(crate) static BOOK_4: [(u16, u8); 81] = [
    (0x0007, 4), (0x0016, 5), (0x00f6, 8), (0x0018, 5), (0x0008, 4), (0x00ef, 8),
    (0x01ef, 9), (0x00f3, 8), (0x07f8, 11), (0x0019, 5), (0x0017, 5), (0x00ed, 8),
    (0x0015, 5), (0x0001, 4), (0x00e2, 8), (0x00f0, 8), (0x0070, 7), (0x03f0, 10),
    (0x01ee, 9), (0x00f1, 8), (0x07fa, 11), (0x00ee, 8), (0x00e4, 8), (0x03f2, 10),
    (0x07f6, 11), (0x03ef, 10), (0x07fd, 11), (0x0005, 4), (0x0014, 5), (0x00f2, 8),
    (0x0009, 4), (0x0004, 4), (0x00e5, 8), (0x00f4, 8), (0x00e8, 8), (0x03f4, 10),
    (0x0006, 4), (0x0002, 4), (0x00e7, 8), (0x0003, 4), (0x0000, 4), (0x006b, 7),
    (0x00e3, 8), (0x0069, 7), (0x01f3, 9), (0x00eb, 8), (0x00e6, 8), (0x03f6, 10),
    (0x006e, 7), (0x006a, 7), (0x01f4, 9), (0x03ec, 10), (0x01f0, 9), (0x03f9, 10),
    (0x00f5, 8), (0x00ec, 8), (0x07fb, 11), (0x00ea, 8), (0x006f, 7), (0x03f7, 10),
    (0x07f9, 11), (0x03f3, 10), (0x0fff, 12), (0x00e9, 8), (0x006d, 7), (0x03f8, 10),
    (0x006c, 7), (0x0068, 7), (0x01f5, 9), (0x03ee, 10), (0x01f2, 9), (0x07f4, 11),
    (0x07f7, 11), (0x03f1, 10), (0x0ffe, 12), (0x03ed, 10), (0x01f1, 9), (0x07f5, 11),
    (0x07fe, 11), (0x03f5, 10), (0x07fc, 11),
];

/// 频谱码本 5: 二元组, 有符号, 最大绝对值 4
#[rustfmt::skip]
pub(crate) static BOOK_5: [(u16, u8); 81] = [
    (0x1fff, 13), (0x0ff7, 12), (0x07f4, 11), (0x07e8, 11), (0x03f1, 10), (0x07ee, 11),
    (0x07f9, 11), (0x0ff8, 12), (0x1ffd, 13), (0x0ffd, 12), (0x07f1, 11), (0x03e8, 10),
    (0x01e8, 9), (0x00f0, 8), (0x01ec, 9), (0x03ee, 10), (0x07f2, 11), (0x0ffa, 12),
    (0x0ff4, 12), (0x03ef, 10), (0x01f2, 9), (0x00e8, 8), (0x0070, 7), (0x00ec, 8),
    (0x01f0, 9), (0x03ea, 10), (0x07f3, 11), (0x07eb, 11), (0x01eb, 9), (0x00ea, 8),
    (0x001a, 5), (0x0008, 4), (0x0019, 5), (0x00ee, 8), (0x01ef, 9), (0x07ed, 11),
    (0x03f0, 10), (0x00f2, 8), (0x0073, 7), (0x000b, 4), (0x0000, 1), (0x000a, 4),
    (0x0071, 7), (0x00f3, 8), (0x07e9, 11), (0x07ef, 11), (0x01ee, 9), (0x00ef, 8),
    (0x0018, 5), (0x0009, 4), (0x001b, 5), (0x00eb, 8), (0x01e9, 9), (0x07ec, 11),
    (0x07f6, 11), (0x03eb, 10), (0x01f3, 9), (0x00ed, 8), (0x0072, 7), (0x00e9, 8),
    (0x01f1, 9), (0x03ed, 10), (0x07f7, 11), (0x0ff6, 12), (0x07f0, 11), (0x03e9, 10),
    (0x01ed, 9), (0x00f1, 8), (0x01ea, 9), (0x03ec, 10), (0x07f8, 11), (0x0ff9, 12),
    (0x1ffc, 13), (0x0ffc, 12), (0x0ff5, 12), (0x07ea, 11), (0x03f3, 10), (0x03f2, 10),
    (0x07f5, 11), (0x0ffb, 12), (0x1ffe, 13),
];

/// 频谱码本 6: 二元组, 有符号, 最大绝对值 4
#[rustfmt::skip]
pub(crate) static BOOK_6: [(u16, u8); 81] = [
    (0x07fe, 11), (0x03fd, 10), (0x01f1, 9), (0x01eb, 9), (0x01f4, 9), (0x01ea, 9),
    (0x01f0, 9), (0x03fc, 10), (0x07fd, 11), (0x03f6, 10), (0x01e5, 9), (0x00ea, 8),
    (0x006c, 7), (0x0071, 7), (0x0068, 7), (0x00f0, 8), (0x01e6, 9), (0x03f7, 10),
    (0x01f3, 9), (0x00ef, 8), (0x0032, 6), (0x0027, 6), (0x0028, 6), (0x0026, 6),
    (0x0031, 6), (0x00eb, 8), (0x01f7, 9), (0x01e8, 9), (0x006f, 7), (0x002e, 6),
    (0x0008, 4), (0x0004, 4), (0x0006, 4), (0x0029, 6), (0x006b, 7), (0x01ee, 9),
    (0x01ef, 9), (0x0072, 7), (0x002d, 6), (0x0002, 4), (0x0000, 4), (0x0003, 4),
    (0x002f, 6), (0x0073, 7), (0x01fa, 9), (0x01e7, 9), (0x006e, 7), (0x002b, 6),
    (0x0007, 4), (0x0001, 4), (0x0005, 4), (0x002c, 6), (0x006d, 7), (0x01ec, 9),
    (0x01f9, 9), (0x00ee, 8), (0x0030, 6), (0x0024, 6), (0x002a, 6), (0x0025, 6),
    (0x0033, 6), (0x00ec, 8), (0x01f2, 9), (0x03f8, 10), (0x01e4, 9), (0x00ed, 8),
    (0x006a, 7), (0x0070, 7), (0x0069, 7), (0x0074, 7), (0x00f1, 8), (0x03fa, 10),
    (0x07ff, 11), (0x03f9, 10), (0x01f6, 9), (0x01ed, 9), (0x01f8, 9), (0x01e9, 9),
    (0x01f5, 9), (0x03fb, 10), (0x07fc, 11),
];

/// 频谱码本 7: 二元组, 无符号, 最大值 7
#[rustfmt::skip]
pub(crate) static BOOK_7: [(u16, u8); 64] = [
    (0x0000, 1), (0x0005, 3), (0x0037, 6), (0x0074, 7), (0x00f2, 8), (0x01eb, 9),
    (0x03ed, 10), (0x07f7, 11), (0x0004, 3), (0x000c, 4), (0x0035, 6), (0x0071, 7),
    (0x00ec, 8), (0x00ee, 8), (0x01ee, 9), (0x01f5, 9), (0x0036, 6), (0x0034, 6),
    (0x0072, 7), (0x00ea, 8), (0x00f1, 8), (0x01e9, 9), (0x01f3, 9), (0x03f5, 10),
    (0x0073, 7), (0x0070, 7), (0x00eb, 8), (0x00f0, 8), (0x01f1, 9), (0x01f0, 9),
    (0x03ec, 10), (0x03fa, 10), (0x00f3, 8), (0x00ed, 8), (0x01e8, 9), (0x01ef, 9),
    (0x03ef, 10), (0x03f1, 10), (0x03f9, 10), (0x07fb, 11), (0x01ed, 9), (0x00ef, 8),
    (0x01ea, 9), (0x01f2, 9), (0x03f3, 10), (0x03f8, 10), (0x07f9, 11), (0x07fc, 11),
    (0x03ee, 10), (0x01ec, 9), (0x01f4, 9), (0x03f4, 10), (0x03f7, 10), (0x07f8, 11),
    (0x0ffd, 12), (0x0ffe, 12), (0x07f6, 11), (0x03f0, 10), (0x03f2, 10), (0x03f6, 10),
    (0x07fa, 11), (0x07fd, 11), (0x0ffc, 12), (0x0fff, 12),
];

/// 频谱码本 8: 二元组, 无符号, 最大值 7
#[rustfmt::skip]
pub(crate) static BOOK_8: [(u16, u8); 64] = [
    (0x000e, 5), (0x0005, 4), (0x0010, 5), (0x0030, 6), (0x006f, 7), (0x00f1, 8),
    (0x01fa, 9), (0x03fe, 10), (0x0003, 4), (0x0000, 3), (0x0004, 4), (0x0012, 5),
    (0x002c, 6), (0x006a, 7), (0x0075, 7), (0x00f8, 8), (0x000f, 5), (0x0002, 4),
    (0x0006, 4), (0x0014, 5), (0x002e, 6), (0x0069, 7), (0x0072, 7), (0x00f5, 8),
    (0x002f, 6), (0x0011, 5), (0x0013, 5), (0x002a, 6), (0x0032, 6), (0x006c, 7),
    (0x00ec, 8), (0x00fa, 8), (0x0071, 7), (0x002b, 6), (0x002d, 6), (0x0031, 6),
    (0x006d, 7), (0x0070, 7), (0x00f2, 8), (0x01f9, 9), (0x00ef, 8), (0x0068, 7),
    (0x0033, 6), (0x006b, 7), (0x006e, 7), (0x00ee, 8), (0x00f9, 8), (0x03fc, 10),
    (0x01f8, 9), (0x0074, 7), (0x0073, 7), (0x00ed, 8), (0x00f0, 8), (0x00f6, 8),
    (0x01f6, 9), (0x01fd, 9), (0x03fd, 10), (0x00f3, 8), (0x00f4, 8), (0x00f7, 8),
    (0x01f7, 9), (0x01fb, 9), (0x01fc, 9), (0x03ff, 10),
];

/// 频谱码本 9: 二元组, 无符号, 最大值 12
#[rustfmt::skip]
pub(crate) static BOOK_9: [(u16, u8); 169] = [
    (0x0000, 1), (0x0005, 3), (0x0037, 6), (0x00e7, 8), (0x01de, 9), (0x03ce, 10),
    (0x03d9, 10), (0x07c8, 11), (0x07cd, 11), (0x0fc8, 12), (0x0fdd, 12), (0x1fe4, 13),
    (0x1fec, 13), (0x0004, 3), (0x000c, 4), (0x0035, 6), (0x0072, 7), (0x00ea, 8),
    (0x00ed, 8), (0x01e2, 9), (0x03d1, 10), (0x03d3, 10), (0x03e0, 10), (0x07d8, 11),
    (0x0fcf, 12), (0x0fd5, 12), (0x0036, 6), (0x0034, 6), (0x0071, 7), (0x00e8, 8),
    (0x00ec, 8), (0x01e1, 9), (0x03cf, 10), (0x03dd, 10), (0x03db, 10), (0x07d0, 11),
    (0x0fc7, 12), (0x0fd4, 12), (0x0fe4, 12), (0x00e6, 8), (0x0070, 7), (0x00e9, 8),
    (0x01dd, 9), (0x01e3, 9), (0x03d2, 10), (0x03dc, 10), (0x07cc, 11), (0x07ca, 11),
    (0x07de, 11), (0x0fd8, 12), (0x0fea, 12), (0x1fdb, 13), (0x01df, 9), (0x00eb, 8),
    (0x01dc, 9), (0x01e6, 9), (0x03d5, 10), (0x03de, 10), (0x07cb, 11), (0x07dd, 11),
    (0x07dc, 11), (0x0fcd, 12), (0x0fe2, 12), (0x0fe7, 12), (0x1fe1, 13), (0x03d0, 10),
    (0x01e0, 9), (0x01e4, 9), (0x03d6, 10), (0x07c5, 11), (0x07d1, 11), (0x07db, 11),
    (0x0fd2, 12), (0x07e0, 11), (0x0fd9, 12), (0x0feb, 12), (0x1fe3, 13), (0x1fe9, 13),
    (0x07c4, 11), (0x01e5, 9), (0x03d7, 10), (0x07c6, 11), (0x07cf, 11), (0x07da, 11),
    (0x0fcb, 12), (0x0fda, 12), (0x0fe3, 12), (0x0fe9, 12), (0x1fe6, 13), (0x1ff3, 13),
    (0x1ff7, 13), (0x07d3, 11), (0x03d8, 10), (0x03e1, 10), (0x07d4, 11), (0x07d9, 11),
    (0x0fd3, 12), (0x0fde, 12), (0x1fdd, 13), (0x1fd9, 13), (0x1fe2, 13), (0x1fea, 13),
    (0x1ff1, 13), (0x1ff6, 13), (0x07d2, 11), (0x03d4, 10), (0x03da, 10), (0x07c7, 11),
    (0x07d7, 11), (0x07e2, 11), (0x0fce, 12), (0x0fdb, 12), (0x1fd8, 13), (0x1fee, 13),
    (0x3ff0, 14), (0x1ff4, 13), (0x3ff2, 14), (0x07e1, 11), (0x03df, 10), (0x07c9, 11),
    (0x07d6, 11), (0x0fca, 12), (0x0fd0, 12), (0x0fe5, 12), (0x0fe6, 12), (0x1feb, 13),
    (0x1fef, 13), (0x3ff3, 14), (0x3ff4, 14), (0x3ff5, 14), (0x0fe0, 12), (0x07ce, 11),
    (0x07d5, 11), (0x0fc6, 12), (0x0fd1, 12), (0x0fe1, 12), (0x1fe0, 13), (0x1fe8, 13),
    (0x1ff0, 13), (0x3ff1, 14), (0x3ff8, 14), (0x3ff6, 14), (0x7ffc, 15), (0x0fe8, 12),
    (0x07df, 11), (0x0fc9, 12), (0x0fd7, 12), (0x0fdc, 12), (0x1fdc, 13), (0x1fdf, 13),
    (0x1fed, 13), (0x1ff5, 13), (0x3ff9, 14), (0x3ffb, 14), (0x7ffd, 15), (0x7ffe, 15),
    (0x1fe7, 13), (0x0fcc, 12), (0x0fd6, 12), (0x0fdf, 12), (0x1fde, 13), (0x1fda, 13),
    (0x1fe5, 13), (0x1ff2, 13), (0x3ffa, 14), (0x3ff7, 14), (0x3ffc, 14), (0x3ffd, 14),
    (0x7fff, 15),
];

/// 频谱码本 10: 二元组, 无符号, 最大值 12
#[rustfmt::skip]
pub(crate) static BOOK_10: [(u16, u8); 169] = [
    (0x0022, 6), (0x0008, 5), (0x001d, 6), (0x0026, 6), (0x005f, 7), (0x00d3, 8),
    (0x01cf, 9), (0x03d0, 10), (0x03d7, 10), (0x03ed, 10), (0x07f0, 11), (0x07f6, 11),
    (0x0ffd, 12), (0x0007, 5), (0x0000, 4), (0x0001, 4), (0x0009, 5), (0x0020, 6),
    (0x0054, 7), (0x0060, 7), (0x00d5, 8), (0x00dc, 8), (0x01d4, 9), (0x03cd, 10),
    (0x03de, 10), (0x07e7, 11), (0x001c, 6), (0x0002, 4), (0x0006, 5), (0x000c, 5),
    (0x001e, 6), (0x0028, 6), (0x005b, 7), (0x00cd, 8), (0x00d9, 8), (0x01ce, 9),
    (0x01dc, 9), (0x03d9, 10), (0x03f1, 10), (0x0025, 6), (0x000b, 5), (0x000a, 5),
    (0x000d, 5), (0x0024, 6), (0x0057, 7), (0x0061, 7), (0x00cc, 8), (0x00dd, 8),
    (0x01cc, 9), (0x01de, 9), (0x03d3, 10), (0x03e7, 10), (0x005d, 7), (0x0021, 6),
    (0x001f, 6), (0x0023, 6), (0x0027, 6), (0x0059, 7), (0x0064, 7), (0x00d8, 8),
    (0x00df, 8), (0x01d2, 9), (0x01e2, 9), (0x03dd, 10), (0x03ee, 10), (0x00d1, 8),
    (0x0055, 7), (0x0029, 6), (0x0056, 7), (0x0058, 7), (0x0062, 7), (0x00ce, 8),
    (0x00e0, 8), (0x00e2, 8), (0x01da, 9), (0x03d4, 10), (0x03e3, 10), (0x07eb, 11),
    (0x01c9, 9), (0x005e, 7), (0x005a, 7), (0x005c, 7), (0x0063, 7), (0x00ca, 8),
    (0x00da, 8), (0x01c7, 9), (0x01ca, 9), (0x01e0, 9), (0x03db, 10), (0x03e8, 10),
    (0x07ec, 11), (0x01e3, 9), (0x00d2, 8), (0x00cb, 8), (0x00d0, 8), (0x00d7, 8),
    (0x00db, 8), (0x01c6, 9), (0x01d5, 9), (0x01d8, 9), (0x03ca, 10), (0x03da, 10),
    (0x07ea, 11), (0x07f1, 11), (0x01e1, 9), (0x00d4, 8), (0x00cf, 8), (0x00d6, 8),
    (0x00de, 8), (0x00e1, 8), (0x01d0, 9), (0x01d6, 9), (0x03d1, 10), (0x03d5, 10),
    (0x03f2, 10), (0x07ee, 11), (0x07fb, 11), (0x03e9, 10), (0x01cd, 9), (0x01c8, 9),
    (0x01cb, 9), (0x01d1, 9), (0x01d7, 9), (0x01df, 9), (0x03cf, 10), (0x03e0, 10),
    (0x03ef, 10), (0x07e6, 11), (0x07f8, 11), (0x0ffa, 12), (0x03eb, 10), (0x01dd, 9),
    (0x01d3, 9), (0x01d9, 9), (0x01db, 9), (0x03d2, 10), (0x03cc, 10), (0x03dc, 10),
    (0x03ea, 10), (0x07ed, 11), (0x07f3, 11), (0x07f9, 11), (0x0ff9, 12), (0x07f2, 11),
    (0x03ce, 10), (0x01e4, 9), (0x03cb, 10), (0x03d8, 10), (0x03d6, 10), (0x03e2, 10),
    (0x03e5, 10), (0x07e8, 11), (0x07f4, 11), (0x07f5, 11), (0x07f7, 11), (0x0ffb, 12),
    (0x07fa, 11), (0x03ec, 10), (0x03df, 10), (0x03e1, 10), (0x03e4, 10), (0x03e6, 10),
    (0x03f0, 10), (0x07e9, 11), (0x07ef, 11), (0x0ff8, 12), (0x0ffe, 12), (0x0ffc, 12),
    (0x0fff, 12),
];

/// 频谱码本 11: 二元组, 无符号, 最大值 16 (16 为转义)
#[rustfmt::skip]
pub(crate) static BOOK_11: [(u16, u8); 289] = [
    (0x0000, 4), (0x0006, 5), (0x0019, 6), (0x003d, 7), (0x009c, 8), (0x00c6, 8),
    (0x01a7, 9), (0x0390, 10), (0x03c2, 10), (0x03df, 10), (0x07e6, 11), (0x07f3, 11),
    (0x0ffb, 12), (0x07ec, 11), (0x0ffa, 12), (0x0ffe, 12), (0x038e, 10), (0x0005, 5),
    (0x0001, 4), (0x0008, 5), (0x0014, 6), (0x0037, 7), (0x0042, 7), (0x0092, 8),
    (0x00af, 8), (0x0191, 9), (0x01a5, 9), (0x01b5, 9), (0x039e, 10), (0x03c0, 10),
    (0x03a2, 10), (0x03cd, 10), (0x07d6, 11), (0x00ae, 8), (0x0017, 6), (0x0007, 5),
    (0x0009, 5), (0x0018, 6), (0x0039, 7), (0x0040, 7), (0x008e, 8), (0x00a3, 8),
    (0x00b8, 8), (0x0199, 9), (0x01ac, 9), (0x01c1, 9), (0x03b1, 10), (0x0396, 10),
    (0x03be, 10), (0x03ca, 10), (0x009d, 8), (0x003c, 7), (0x0015, 6), (0x0016, 6),
    (0x001a, 6), (0x003b, 7), (0x0044, 7), (0x0091, 8), (0x00a5, 8), (0x00be, 8),
    (0x0196, 9), (0x01ae, 9), (0x01b9, 9), (0x03a1, 10), (0x0391, 10), (0x03a5, 10),
    (0x03d5, 10), (0x0094, 8), (0x009a, 8), (0x0036, 7), (0x0038, 7), (0x003a, 7),
    (0x0041, 7), (0x008c, 8), (0x009b, 8), (0x00b0, 8), (0x00c3, 8), (0x019e, 9),
    (0x01ab, 9), (0x01bc, 9), (0x039f, 10), (0x038f, 10), (0x03a9, 10), (0x03cf, 10),
    (0x0093, 8), (0x00bf, 8), (0x003e, 7), (0x003f, 7), (0x0043, 7), (0x0045, 7),
    (0x009e, 8), (0x00a7, 8), (0x00b9, 8), (0x0194, 9), (0x01a2, 9), (0x01ba, 9),
    (0x01c3, 9), (0x03a6, 10), (0x03a7, 10), (0x03bb, 10), (0x03d4, 10), (0x009f, 8),
    (0x01a0, 9), (0x008f, 8), (0x008d, 8), (0x0090, 8), (0x0098, 8), (0x00a6, 8),
    (0x00b6, 8), (0x00c4, 8), (0x019f, 9), (0x01af, 9), (0x01bf, 9), (0x0399, 10),
    (0x03bf, 10), (0x03b4, 10), (0x03c9, 10), (0x03e7, 10), (0x00a8, 8), (0x01b6, 9),
    (0x00ab, 8), (0x00a4, 8), (0x00aa, 8), (0x00b2, 8), (0x00c2, 8), (0x00c5, 8),
    (0x0198, 9), (0x01a4, 9), (0x01b8, 9), (0x038c, 10), (0x03a4, 10), (0x03c4, 10),
    (0x03c6, 10), (0x03dd, 10), (0x03e8, 10), (0x00ad, 8), (0x03af, 10), (0x0192, 9),
    (0x00bd, 8), (0x00bc, 8), (0x018e, 9), (0x0197, 9), (0x019a, 9), (0x01a3, 9),
    (0x01b1, 9), (0x038d, 10), (0x0398, 10), (0x03b7, 10), (0x03d3, 10), (0x03d1, 10),
    (0x03db, 10), (0x07dd, 11), (0x00b4, 8), (0x03de, 10), (0x01a9, 9), (0x019b, 9),
    (0x019c, 9), (0x01a1, 9), (0x01aa, 9), (0x01ad, 9), (0x01b3, 9), (0x038b, 10),
    (0x03b2, 10), (0x03b8, 10), (0x03ce, 10), (0x03e1, 10), (0x03e0, 10), (0x07d2, 11),
    (0x07e5, 11), (0x00b7, 8), (0x07e3, 11), (0x01bb, 9), (0x01a8, 9), (0x01a6, 9),
    (0x01b0, 9), (0x01b2, 9), (0x01b7, 9), (0x039b, 10), (0x039a, 10), (0x03ba, 10),
    (0x03b5, 10), (0x03d6, 10), (0x07d7, 11), (0x03e4, 10), (0x07d8, 11), (0x07ea, 11),
    (0x00ba, 8), (0x07e8, 11), (0x03a0, 10), (0x01bd, 9), (0x01b4, 9), (0x038a, 10),
    (0x01c4, 9), (0x0392, 10), (0x03aa, 10), (0x03b0, 10), (0x03bc, 10), (0x03d7, 10),
    (0x07d4, 11), (0x07dc, 11), (0x07db, 11), (0x07d5, 11), (0x07f0, 11), (0x00c1, 8),
    (0x07fb, 11), (0x03c8, 10), (0x03a3, 10), (0x0395, 10), (0x039d, 10), (0x03ac, 10),
    (0x03ae, 10), (0x03c5, 10), (0x03d8, 10), (0x03e2, 10), (0x03e6, 10), (0x07e4, 11),
    (0x07e7, 11), (0x07e0, 11), (0x07e9, 11), (0x07f7, 11), (0x0190, 9), (0x07f2, 11),
    (0x0393, 10), (0x01be, 9), (0x01c0, 9), (0x0394, 10), (0x0397, 10), (0x03ad, 10),
    (0x03c3, 10), (0x03c1, 10), (0x03d2, 10), (0x07da, 11), (0x07d9, 11), (0x07df, 11),
    (0x07eb, 11), (0x07f4, 11), (0x07fa, 11), (0x0195, 9), (0x07f8, 11), (0x03bd, 10),
    (0x039c, 10), (0x03ab, 10), (0x03a8, 10), (0x03b3, 10), (0x03b9, 10), (0x03d0, 10),
    (0x03e3, 10), (0x03e5, 10), (0x07e2, 11), (0x07de, 11), (0x07ed, 11), (0x07f1, 11),
    (0x07f9, 11), (0x07fc, 11), (0x0193, 9), (0x0ffd, 12), (0x03dc, 10), (0x03b6, 10),
    (0x03c7, 10), (0x03cc, 10), (0x03cb, 10), (0x03d9, 10), (0x03da, 10), (0x07d3, 11),
    (0x07e1, 11), (0x07ee, 11), (0x07ef, 11), (0x07f5, 11), (0x07f6, 11), (0x0ffc, 12),
    (0x0fff, 12), (0x019d, 9), (0x01c2, 9), (0x00b5, 8), (0x00a1, 8), (0x0096, 8),
    (0x0097, 8), (0x0095, 8), (0x0099, 8), (0x00a0, 8), (0x00a2, 8), (0x00ac, 8),
    (0x00a9, 8), (0x00b1, 8), (0x00b3, 8), (0x00bb, 8), (0x00c0, 8), (0x018f, 9),
    (0x0004, 5),
];
