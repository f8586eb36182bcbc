//! yin - AAC 解码命令行工具
//!
//! - `yin decode <输入> <输出.wav>`: 把 ADTS / ADIF 文件解码为 WAV
//! - `yin info <输入>`: 以 JSON 输出流参数与帧统计

mod config;
mod decode;
mod wav;

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use yin_codec::OutputMode;
use yin_core::SampleFormat;

use config::CliConfig;

#[derive(Parser, Debug)]
#[command(name = "yin", version, about = "纯 Rust AAC 解码工具")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON 配置文件 ({"decoder": ..., "logging": ...})
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 日志级别 (-v debug, -vv trace), YIN_LOG 环境变量优先
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 解码为 WAV
    Decode {
        /// 输入文件 (ADTS 或 ADIF)
        input: PathBuf,
        /// 输出 WAV 文件
        output: PathBuf,
        /// 使用定点重建
        #[arg(long)]
        fixed: bool,
        /// 输出采样格式 (s16 / f32)
        #[arg(long)]
        format: Option<SampleFormat>,
    },
    /// 输出流信息
    Info {
        /// 输入文件 (ADTS 或 ADIF)
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("错误: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = CliConfig::load_or_default(cli.config.as_deref())?;
    config.apply_verbosity(cli.verbose);
    yin::logging::init(&config.logging)?;
    log::debug!("日志文件: {}", config.logging.current_log_path().display());

    match cli.command {
        Command::Decode {
            input,
            output,
            fixed,
            format,
        } => {
            let mut options = config.decoder;
            if fixed {
                options.output = OutputMode::Fixed;
            }
            if let Some(format) = format {
                options.sample_format = format;
            }
            eprintln!("yin 版本 {} -- AAC 解码", yin::version());
            eprintln!("输入: {}", input.display());
            eprintln!("输出: {}", output.display());
            let summary = decode::decode_to_wav(&input, &output, options)?;
            info!(
                "解码完成: {} 帧, {} 样本/声道, {} 声道, {} Hz",
                summary.frames, summary.samples, summary.channels, summary.sample_rate
            );
        }
        Command::Info { input } => {
            let data = std::fs::read(&input)
                .with_context(|| format!("读取输入文件失败, path={}", input.display()))?;
            let info = decode::probe_stream(&data)?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_命令行定义() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_解析解码参数() {
        let cli = Cli::try_parse_from(["yin", "decode", "a.aac", "b.wav", "--fixed", "--format", "s16", "-vv"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Decode { fixed, format, .. } => {
                assert!(fixed);
                assert_eq!(format, Some(SampleFormat::S16));
            }
            Command::Info { .. } => panic!("应解析为 decode"),
        }
    }
}
