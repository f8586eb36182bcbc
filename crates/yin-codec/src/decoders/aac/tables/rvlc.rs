//! RVLC 缩放因子码表.
//!
//! 主表码字均为回文, 可从段的任意一端解码; 值 99 标记不允许出现的码字.

/// 不允许出现的码字对应的符号值
pub const RVLC_NOT_ALLOWED: i32 = 99;

/// 触发转义表查找的差分幅度
pub const RVLC_ESC_VAL: i32 = 7;

/// 主表: (差分值, 码长, 码字)
pub(crate) static RVLC_SF: [(i32, u8, u32); 23] = [
    (0, 1, 0b0),
    (-1, 3, 0b101),
    (1, 3, 0b111),
    (-2, 4, 0b1001),
    (-3, 5, 0b10001),
    (2, 5, 0b11011),
    (-4, 6, 0b100001),
    (3, 6, 0b110011),
    (-7, 7, 0b1000001),
    (7, 7, 0b1100011),
    (4, 7, 0b1101011),
    (-5, 8, 0b10000001),
    (5, 8, 0b11000011),
    (-6, 9, 0b100000001),
    (6, 9, 0b110101011),
    (99, 6, 0b110010),
    (99, 6, 0b110100),
    (99, 7, 0b1100000),
    (99, 7, 0b1100010),
    (99, 8, 0b11000010),
    (99, 8, 0b11010100),
    (99, 9, 0b100000000),
    (99, 9, 0b110101010),
];

/// 转义表: (转义值, 码长, 码字)
pub(crate) static RVLC_ESC: [(i32, u8, u32); 54] = [
    (1, 2, 0),
    (0, 2, 2),
    (3, 3, 2),
    (2, 3, 6),
    (4, 4, 14),
    (7, 5, 13),
    (6, 5, 15),
    (5, 5, 31),
    (11, 6, 24),
    (10, 6, 25),
    (9, 6, 29),
    (8, 6, 61),
    (13, 7, 56),
    (12, 7, 120),
    (15, 8, 114),
    (14, 8, 242),
    (17, 9, 230),
    (16, 9, 486),
    (19, 10, 463),
    (18, 10, 974),
    (22, 11, 925),
    (20, 11, 1950),
    (21, 11, 1951),
    (23, 12, 1848),
    (25, 13, 3698),
    (24, 14, 7399),
    (26, 15, 14797),
    (49, 19, 236736),
    (50, 19, 236737),
    (51, 19, 236738),
    (52, 19, 236739),
    (53, 19, 236740),
    (27, 20, 473482),
    (28, 20, 473483),
    (29, 20, 473484),
    (30, 20, 473485),
    (31, 20, 473486),
    (32, 20, 473487),
    (33, 20, 473488),
    (34, 20, 473489),
    (35, 20, 473490),
    (36, 20, 473491),
    (37, 20, 473492),
    (38, 20, 473493),
    (39, 20, 473494),
    (40, 20, 473495),
    (41, 20, 473496),
    (42, 20, 473497),
    (43, 20, 473498),
    (44, 20, 473499),
    (45, 20, 473500),
    (46, 20, 473501),
    (47, 20, 473502),
    (48, 20, 473503),
];
