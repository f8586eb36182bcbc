//! 命令行配置文件.
//!
//! JSON 格式, 两个可选段:
//!
//! ```json
//! { "decoder": { "output": "fixed", "drc_cut": 0.5 }, "logging": { "level": "debug" } }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use yin::logging::LoggingConfig;
use yin_codec::DecoderOptions;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    pub decoder: DecoderOptions,
    pub logging: LoggingConfig,
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败, path={}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("解析配置文件失败, path={}", path.display()))
    }

    /// 未给出配置文件时使用默认值
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// -v / -vv 覆盖配置文件中的日志级别
    pub fn apply_verbosity(&mut self, verbosity: u8) {
        match verbosity {
            0 => {}
            1 => self.logging.level = "debug".to_string(),
            _ => self.logging.level = "trace".to_string(),
        }
    }
}
