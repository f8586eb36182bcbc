//! # yin-core
//!
//! Yin 音频解码框架核心库, 提供错误类型、比特游标和音频基础类型.

pub mod bitreader;
pub mod bitwriter;
pub mod channel_layout;
pub mod error;
pub mod sample_format;

// 重导出常用类型
pub use bitreader::{BitCursor, BitSource, ReverseBitCursor};
pub use bitwriter::BitWriter;
pub use channel_layout::{ChannelLayout, ChannelMask};
pub use error::{FaultClass, YinError, YinResult};
pub use sample_format::SampleFormat;
