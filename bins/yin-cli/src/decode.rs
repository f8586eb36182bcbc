//! 解码与信息探测.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use serde::Serialize;
use yin_codec::decoders::aac::config::{ObjectType, ResilienceFlags};
use yin_codec::decoders::aac::{AacSession, HeaderType};
use yin_codec::{AacDecoder, Decoder, DecoderOptions, Packet};
use yin_core::YinError;

use crate::wav::WavWriter;

/// 解码结果统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    pub frames: usize,
    /// 每声道样本数
    pub samples: u64,
    pub channels: u32,
    pub sample_rate: u32,
}

/// 把 ADTS / ADIF 文件解码为 WAV
pub fn decode_to_wav(input: &Path, output: &Path, options: DecoderOptions) -> Result<DecodeSummary> {
    let data = std::fs::read(input)
        .with_context(|| format!("读取输入文件失败, path={}", input.display()))?;
    let format = options.sample_format;
    let mut decoder = AacDecoder::with_options(options);
    decoder.send_packet(&Packet::from_data(data))?;
    decoder.send_packet(&Packet::empty())?;

    let mut summary = DecodeSummary::default();
    if let Some(cfg) = decoder.stream_config() {
        summary.channels = cfg.channels() as u32;
        summary.sample_rate = cfg.sample_rate;
        info!(
            "输入: {} {} Hz, 声道配置 {}, 帧长 {}",
            cfg.object_type, cfg.sample_rate, cfg.channel_configuration, cfg.frame_length
        );
    }

    let mut wav: Option<WavWriter<BufWriter<File>>> = None;
    loop {
        let frame = match decoder.receive_frame() {
            Ok(frame) => frame,
            Err(YinError::Eof | YinError::NeedMoreData) => break,
            Err(e) => return Err(e.into()),
        };
        if wav.is_none() {
            summary.channels = frame.channel_layout.channels;
            summary.sample_rate = frame.sample_rate;
            let file = File::create(output)
                .with_context(|| format!("创建输出文件失败, path={}", output.display()))?;
            let channels = u16::try_from(summary.channels)?;
            wav = Some(WavWriter::new(
                BufWriter::new(file),
                summary.sample_rate,
                channels,
                format,
            )?);
        }
        let Some(writer) = wav.as_mut() else {
            break;
        };
        if frame.channel_layout.channels != summary.channels {
            warn!(
                "第 {} 帧声道数 {} 与输出文件 {} 不一致, 已丢弃",
                summary.frames, frame.channel_layout.channels, summary.channels
            );
            continue;
        }
        writer.write_samples(&frame.data)?;
        summary.frames += 1;
        summary.samples += u64::from(frame.nb_samples);
    }

    match wav {
        Some(writer) => {
            debug!("PCM 数据 {} 字节", writer.data_written());
            writer.finish()?;
        }
        None => bail!("没有解码出任何音频: {}", input.display()),
    }
    Ok(summary)
}

/// `yin info` 的输出
#[derive(Debug, Clone, Serialize)]
pub struct StreamInfo {
    pub header_type: HeaderType,
    pub object_type: ObjectType,
    pub sample_rate: u32,
    pub channels: usize,
    pub frame_length: usize,
    pub sbr_present: bool,
    pub resilience: ResilienceFlags,
    pub frames: usize,
    /// 报告了故障的帧数
    pub faulty_frames: usize,
    pub duration_seconds: f64,
}

/// 解析码流头并逐帧解码一遍, 统计帧数与故障
pub fn probe_stream(data: &[u8]) -> Result<StreamInfo> {
    let (mut session, skip) = AacSession::<f32>::probe(data)?;
    let cfg = session.config().clone();
    let mut info = StreamInfo {
        header_type: session.header_type(),
        object_type: cfg.object_type,
        sample_rate: cfg.sample_rate,
        channels: session.channel_count(),
        frame_length: cfg.frame_length,
        sbr_present: cfg.sbr_present,
        resilience: cfg.resilience,
        frames: 0,
        faulty_frames: 0,
        duration_seconds: 0.0,
    };

    let mut rest = data.get(skip..).unwrap_or_default();
    let mut samples = 0u64;
    while !rest.is_empty() {
        let frame = match session.decode_frame(rest) {
            Ok(frame) => frame,
            Err(e) if info.frames > 0 => {
                debug!("尾部 {} 字节无法解码: {}", rest.len(), e);
                break;
            }
            Err(e) => return Err(e.into()),
        };
        info.frames += 1;
        samples += frame.info.samples as u64;
        info.channels = info.channels.max(frame.info.channels);
        // 参数可能随 ADTS 帧头变化, 以最后一帧为准
        info.sample_rate = frame.info.sample_rate;
        if frame.info.error.is_some() {
            info.faulty_frames += 1;
            if info.header_type == HeaderType::Adif {
                break;
            }
        }
        let consumed = frame.info.bytes_consumed;
        if consumed == 0 {
            break;
        }
        rest = rest.get(consumed..).unwrap_or_default();
    }
    if info.sample_rate > 0 {
        info.duration_seconds = samples as f64 / f64::from(info.sample_rate);
    }
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use yin_core::BitWriter;

    /// LC 单声道 44.1 kHz 的 ADTS 静音帧
    fn silent_adts_frame() -> Vec<u8> {
        let mut w = BitWriter::new();
        w.write_bits(0, 3); // SCE
        w.write_bits(0, 4);
        w.write_bits(100, 8);
        w.write_bits(0, 4);
        w.write_bits(1, 6);
        w.write_bit(0);
        w.write_bits(0, 4);
        w.write_bits(1, 5);
        w.write_bits(0, 3);
        w.write_bits(7, 3); // END
        let payload = w.finish();

        let mut h = BitWriter::new();
        h.write_bits(0xFFF, 12);
        h.write_bits(0, 3);
        h.write_bit(1);
        h.write_bits(1, 2);
        h.write_bits(4, 4);
        h.write_bit(0);
        h.write_bits(1, 3);
        h.write_bits(0, 4);
        h.write_bits(7 + payload.len() as u32, 13);
        h.write_bits(0x7FF, 11);
        h.write_bits(0, 2);
        let mut frame = h.finish();
        frame.extend_from_slice(&payload);
        frame
    }

    fn silent_stream(frames: usize) -> Vec<u8> {
        silent_adts_frame().repeat(frames)
    }

    #[test]
    fn test_探测流信息() {
        let info = probe_stream(&silent_stream(4)).unwrap();
        assert_eq!(info.header_type, HeaderType::Adts);
        assert_eq!(info.object_type, ObjectType::Lc);
        assert_eq!(info.sample_rate, 44100);
        assert_eq!(info.channels, 1);
        assert_eq!(info.frames, 4);
        assert_eq!(info.faulty_frames, 0);
        // 首帧无输出
        assert!((info.duration_seconds - 3.0 * 1024.0 / 44100.0).abs() < 1e-9);
    }

    #[test]
    fn test_非_aac_输入报错() {
        assert!(probe_stream(b"not an aac stream at all").is_err());
    }

    #[test]
    fn test_解码到_wav() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.aac");
        let output = dir.path().join("out.wav");
        std::fs::write(&input, silent_stream(3)).unwrap();

        let options = DecoderOptions {
            sample_format: yin_core::SampleFormat::S16,
            ..Default::default()
        };
        let summary = decode_to_wav(&input, &output, options).unwrap();
        assert_eq!(summary.frames, 2);
        assert_eq!(summary.samples, 2048);
        assert_eq!(summary.channels, 1);
        let wav = std::fs::read(&output).unwrap();
        assert_eq!(wav.len(), 44 + 2048 * 2);
        assert!(wav[44..].iter().all(|&b| b == 0));
    }
}
