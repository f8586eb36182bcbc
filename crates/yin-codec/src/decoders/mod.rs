//! 解码器实现模块.

pub mod aac;

use crate::codec_id::CodecId;
use crate::registry::CodecRegistry;

/// 注册所有内置解码器
pub fn register_all_decoders(registry: &mut CodecRegistry) {
    registry.register_decoder(CodecId::Aac, "aac", aac::AacDecoder::create);
    registry.register_decoder(CodecId::Aac, "aac_fixed", aac::AacDecoder::create_fixed);
}
