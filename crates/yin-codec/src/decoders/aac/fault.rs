//! AAC 码流故障.
//!
//! 每种故障对应一个稳定的数值编码, 与外部工具链中沿用的错误码保持一致,
//! 便于日志比对与测试断言.

use thiserror::Error;
use yin_core::{FaultClass, YinError};

/// AAC 解码过程中可能出现的码流故障
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum AacFault {
    #[error("当前对象类型不支持增益控制")]
    GainControlUnsupported,
    #[error("短窗中不允许脉冲编码")]
    PulseInShortBlock,
    #[error("非法的 Huffman 码本")]
    InvalidCodebook,
    #[error("缩放因子越界")]
    ScaleFactorRange,
    #[error("未找到 ADTS 同步字")]
    AdtsSyncNotFound,
    #[error("不支持声道耦合")]
    CouplingUnsupported,
    #[error("不支持的 ER 声道配置")]
    ErChannelConfig,
    #[error("RVLC 码字错误")]
    RvlcBitError,
    #[error("缩放因子 Huffman 解码错误")]
    ScaleFactorHuffman,
    #[error("频谱 Huffman / HCR 解码错误")]
    SpectralHuffman,
    #[error("使用了不存在的码本")]
    NonexistentCodebook,
    #[error("声道数无效")]
    InvalidChannelCount,
    #[error("语法元素数量超过上限")]
    TooManyElements,
    #[error("输入缓冲区耗尽")]
    BufferExhausted,
    #[error("分段数组下标越界")]
    SectionIndex,
    #[error("max_sfb 或脉冲起始频带过大")]
    BandLimit,
    #[error("量化值超出反量化范围")]
    IquantRange,
    #[error("LTP 延迟越界")]
    LtpLag,
    #[error("声道配置发生意外变化")]
    ChannelConfigChanged,
    #[error("PCE 声道数超过上限")]
    PceChannels,
    #[error("当前解码器不支持 LTP")]
    LtpUnavailable,
    #[error("输出缓冲区过小")]
    OutputTooSmall,
    #[error("不允许的采样率索引")]
    SampleRateIndex,
    #[error("当前解码器不支持 Main 预测")]
    MainPredictionUnavailable,
}

impl AacFault {
    /// 稳定的数值编码
    pub fn code(self) -> u8 {
        match self {
            Self::GainControlUnsupported => 1,
            Self::PulseInShortBlock => 2,
            Self::InvalidCodebook => 3,
            Self::ScaleFactorRange => 4,
            Self::AdtsSyncNotFound => 5,
            Self::CouplingUnsupported => 6,
            Self::ErChannelConfig => 7,
            Self::RvlcBitError => 8,
            Self::ScaleFactorHuffman => 9,
            Self::SpectralHuffman => 10,
            Self::NonexistentCodebook => 11,
            Self::InvalidChannelCount => 12,
            Self::TooManyElements => 13,
            Self::BufferExhausted => 14,
            Self::SectionIndex => 15,
            Self::BandLimit => 16,
            Self::IquantRange => 17,
            Self::LtpLag => 18,
            Self::ChannelConfigChanged => 21,
            Self::PceChannels => 22,
            Self::LtpUnavailable => 26,
            Self::OutputTooSmall => 27,
            Self::SampleRateIndex => 32,
            Self::MainPredictionUnavailable => 33,
        }
    }

    /// 故障分类
    pub fn class(self) -> FaultClass {
        match self {
            Self::GainControlUnsupported
            | Self::CouplingUnsupported
            | Self::ErChannelConfig
            | Self::LtpUnavailable
            | Self::MainPredictionUnavailable => FaultClass::Unsupported,
            Self::RvlcBitError
            | Self::ScaleFactorHuffman
            | Self::SpectralHuffman
            | Self::IquantRange
            | Self::LtpLag => FaultClass::DecodeInconsistency,
            Self::BufferExhausted => FaultClass::BufferExhausted,
            Self::OutputTooSmall => FaultClass::OutputTooSmall,
            _ => FaultClass::MalformedSyntax,
        }
    }
}

impl From<AacFault> for YinError {
    fn from(fault: AacFault) -> Self {
        YinError::Fault {
            code: fault.code(),
            class: fault.class(),
            message: fault.to_string(),
        }
    }
}

/// AAC 内部 Result 类型
pub type AacResult<T> = Result<T, AacFault>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_编码唯一() {
        let all = [
            AacFault::GainControlUnsupported,
            AacFault::PulseInShortBlock,
            AacFault::InvalidCodebook,
            AacFault::ScaleFactorRange,
            AacFault::AdtsSyncNotFound,
            AacFault::CouplingUnsupported,
            AacFault::ErChannelConfig,
            AacFault::RvlcBitError,
            AacFault::ScaleFactorHuffman,
            AacFault::SpectralHuffman,
            AacFault::NonexistentCodebook,
            AacFault::InvalidChannelCount,
            AacFault::TooManyElements,
            AacFault::BufferExhausted,
            AacFault::SectionIndex,
            AacFault::BandLimit,
            AacFault::IquantRange,
            AacFault::LtpLag,
            AacFault::ChannelConfigChanged,
            AacFault::PceChannels,
            AacFault::LtpUnavailable,
            AacFault::OutputTooSmall,
            AacFault::SampleRateIndex,
            AacFault::MainPredictionUnavailable,
        ];
        let mut codes: Vec<u8> = all.iter().map(|f| f.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
        assert!(codes.iter().all(|&c| (1..=33).contains(&c)));
    }

    #[test]
    fn test_转换为统一错误() {
        let err: YinError = AacFault::BufferExhausted.into();
        assert_eq!(err.fault_code(), Some(14));
        match err {
            YinError::Fault { class, .. } => assert_eq!(class, FaultClass::BufferExhausted),
            other => panic!("意外的错误类型: {other:?}"),
        }
        assert_eq!(AacFault::RvlcBitError.class(), FaultClass::DecodeInconsistency);
        assert_eq!(AacFault::ErChannelConfig.class(), FaultClass::Unsupported);
    }
}
