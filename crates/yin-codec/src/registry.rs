//! 解码器注册表.
//!
//! 支持按 CodecId 或名称查找并实例化解码器.

use std::collections::HashMap;

use yin_core::{YinError, YinResult};

use crate::codec_id::CodecId;
use crate::decoder::Decoder;

/// 解码器工厂函数类型
pub type DecoderFactory = fn() -> YinResult<Box<dyn Decoder>>;

/// 解码器注册表
pub struct CodecRegistry {
    /// 同一 CodecId 可注册多个实现, 先注册者优先
    decoders: HashMap<CodecId, Vec<DecoderEntry>>,
}

/// 解码器注册条目
struct DecoderEntry {
    name: String,
    factory: DecoderFactory,
}

impl CodecRegistry {
    /// 创建空的注册表
    pub fn new() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// 注册一个解码器
    pub fn register_decoder(
        &mut self,
        codec_id: CodecId,
        name: impl Into<String>,
        factory: DecoderFactory,
    ) {
        self.decoders
            .entry(codec_id)
            .or_default()
            .push(DecoderEntry {
                name: name.into(),
                factory,
            });
    }

    /// 创建指定编解码器 ID 的解码器实例 (优先级最高的实现)
    pub fn create_decoder(&self, codec_id: CodecId) -> YinResult<Box<dyn Decoder>> {
        let entry = self
            .decoders
            .get(&codec_id)
            .and_then(|entries| entries.first())
            .ok_or_else(|| YinError::CodecNotFound(format!("未找到 {} 的解码器", codec_id)))?;
        (entry.factory)()
    }

    /// 按注册名称创建解码器实例
    pub fn create_decoder_by_name(&self, name: &str) -> YinResult<Box<dyn Decoder>> {
        let entry = self
            .decoders
            .values()
            .flatten()
            .find(|e| e.name == name)
            .ok_or_else(|| YinError::CodecNotFound(format!("未找到名为 {} 的解码器", name)))?;
        (entry.factory)()
    }

    /// 获取所有已注册的解码器名称
    pub fn list_decoders(&self) -> Vec<(CodecId, &str)> {
        let mut result: Vec<(CodecId, &str)> = self
            .decoders
            .iter()
            .flat_map(|(id, entries)| entries.iter().map(move |e| (*id, e.name.as_str())))
            .collect();
        result.sort_by(|a, b| a.1.cmp(b.1));
        result
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_注册所有解码器() {
        let mut registry = CodecRegistry::new();
        crate::register_all(&mut registry);

        let decoders = registry.list_decoders();
        assert_eq!(decoders, vec![(CodecId::Aac, "aac"), (CodecId::Aac, "aac_fixed")]);
    }

    #[test]
    fn test_按codec_id创建解码器() {
        let mut registry = CodecRegistry::new();
        crate::register_all(&mut registry);

        let dec = registry.create_decoder(CodecId::Aac).unwrap();
        assert_eq!(dec.codec_id(), CodecId::Aac);
        assert_eq!(dec.name(), "aac");
    }

    #[test]
    fn test_按名称创建解码器() {
        let mut registry = CodecRegistry::new();
        crate::register_all(&mut registry);

        let dec = registry.create_decoder_by_name("aac_fixed").unwrap();
        assert_eq!(dec.name(), "aac_fixed");
        assert!(registry.create_decoder_by_name("mp3").is_err());
    }

    #[test]
    fn test_未注册的编解码器返回错误() {
        let registry = CodecRegistry::new();
        assert!(matches!(
            registry.create_decoder(CodecId::Aac),
            Err(YinError::CodecNotFound(_))
        ));
    }
}
