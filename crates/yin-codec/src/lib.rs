//! # yin-codec
//!
//! Yin 音频解码框架编解码器库, 提供解码器抽象、Packet/Frame 类型与 AAC 解码器.
//!
//! ## 支持的解码器
//!
//! - **aac**: MPEG-4/2 AAC (Main, LC, SSR, LTP, ER-LC, ER-LTP, LD), 浮点输出
//! - **aac_fixed**: 同上, 定点重建路径 (不含 Main 预测)
//!
//! ## 使用示例
//!
//! ```rust
//! use yin_codec::{CodecId, CodecRegistry};
//!
//! let mut reg = CodecRegistry::new();
//! yin_codec::register_all(&mut reg);
//!
//! let decoder = reg.create_decoder(CodecId::Aac).unwrap();
//! assert_eq!(decoder.name(), "aac");
//! let fixed = reg.create_decoder_by_name("aac_fixed").unwrap();
//! assert_eq!(fixed.name(), "aac_fixed");
//! ```

pub mod codec_id;
pub mod codec_parameters;
pub mod decoder;
pub mod decoders;
pub mod frame;
pub mod packet;
pub mod registry;

// 重导出常用类型
pub use codec_id::CodecId;
pub use codec_parameters::CodecParameters;
pub use decoder::Decoder;
pub use decoders::aac::{AacDecoder, DecoderOptions, OutputMode};
pub use frame::AudioFrame;
pub use packet::Packet;
pub use registry::CodecRegistry;

/// 注册所有内置解码器
pub fn register_all(registry: &mut CodecRegistry) {
    decoders::register_all_decoders(registry);
}
