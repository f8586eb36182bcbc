//! # Yin (音)
//!
//! 纯 Rust 实现的 MPEG-4/2 AAC 音频解码框架.
//!
//! - **解码**: Main, LC, SSR, LTP, ER-LC, ER-LTP 与 LD 对象类型
//! - **输入**: ADTS 帧, ADIF 流, 或配合 AudioSpecificConfig 的原始数据块
//! - **输出**: 浮点或 Q 格式定点重建, 交错 F32 / S16 样本
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use yin::codec::{Decoder, Packet};
//!
//! let registry = yin::default_codec_registry();
//! let mut decoder = registry.create_decoder_by_name("aac").unwrap();
//! let adts = std::fs::read("input.aac").unwrap();
//! decoder.send_packet(&Packet::from_data(adts)).unwrap();
//! while let Ok(frame) = decoder.receive_frame() {
//!     println!("{} 个样本 @ {} Hz", frame.nb_samples, frame.sample_rate);
//! }
//! ```
//!
//! # Crate 结构
//!
//! | Crate | 功能 |
//! |-------|------|
//! | `yin-core` | 错误类型, 位读写, 声道布局, 采样格式 |
//! | `yin-codec` | 解码器框架与 AAC 解码器 |

/// 核心类型与工具
pub use yin_core as core;

/// 解码器框架
pub use yin_codec as codec;

pub mod logging;

/// 获取 Yin 版本号
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// 创建已注册所有内置解码器的注册表
pub fn default_codec_registry() -> yin_codec::CodecRegistry {
    let mut registry = yin_codec::CodecRegistry::new();
    yin_codec::register_all(&mut registry);
    registry
}
