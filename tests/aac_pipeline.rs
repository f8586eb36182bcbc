//! AAC 解码集成测试.
//!
//! 经由门面 crate 的注册表创建解码器, 覆盖:
//! AudioSpecificConfig + 原始数据块, ADTS 帧流, 浮点与定点路径的一致性.

use yin::codec::{AudioFrame, CodecId, CodecParameters, Decoder, Packet};
use yin::core::{BitWriter, ChannelLayout, SampleFormat, YinError};

// ============================================================
// 辅助函数
// ============================================================

/// LC, 44.1 kHz, 单声道的 AudioSpecificConfig
fn lc_mono_asc() -> Vec<u8> {
    let mut w = BitWriter::new();
    w.write_bits(2, 5);
    w.write_bits(4, 4);
    w.write_bits(1, 4);
    w.write_bits(0, 3);
    w.finish()
}

/// 单声道原始数据块; `tone` 为真时频带 0 含一根谱线
fn raw_block(tone: bool) -> Vec<u8> {
    let mut w = BitWriter::new();
    w.write_bits(0, 3); // SCE
    w.write_bits(0, 4);
    w.write_bits(if tone { 170 } else { 100 }, 8);
    w.write_bits(0, 4);
    w.write_bits(1, 6);
    w.write_bit(0);
    w.write_bits(if tone { 1 } else { 0 }, 4);
    w.write_bits(1, 5);
    if tone {
        w.write_pattern("0");
    }
    w.write_bits(0, 3);
    if tone {
        w.write_pattern("10000");
    }
    w.write_bits(7, 3); // END
    w.finish()
}

fn adts(payload: &[u8]) -> Vec<u8> {
    let mut w = BitWriter::new();
    w.write_bits(0xFFF, 12);
    w.write_bits(0, 3);
    w.write_bit(1);
    w.write_bits(1, 2);
    w.write_bits(4, 4);
    w.write_bit(0);
    w.write_bits(1, 3);
    w.write_bits(0, 4);
    w.write_bits(7 + payload.len() as u32, 13);
    w.write_bits(0x7FF, 11);
    w.write_bits(0, 2);
    let mut out = w.finish();
    out.extend_from_slice(payload);
    out
}

fn open_raw(name: &str, format: SampleFormat) -> Box<dyn Decoder> {
    let registry = yin::default_codec_registry();
    let mut decoder = registry.create_decoder_by_name(name).unwrap();
    let mut params = CodecParameters::with_extra_data(CodecId::Aac, lc_mono_asc());
    params.audio = Some(yin::codec::codec_parameters::AudioCodecParams {
        sample_rate: 44100,
        channel_layout: ChannelLayout::MONO,
        sample_format: format,
        frame_size: 1024,
    });
    decoder.open(&params).unwrap();
    decoder
}

fn decode_all(decoder: &mut dyn Decoder, packets: &[Vec<u8>]) -> Vec<AudioFrame> {
    let mut frames = Vec::new();
    for data in packets {
        decoder.send_packet(&Packet::from_data(data.clone())).unwrap();
        while let Ok(frame) = decoder.receive_frame() {
            frames.push(frame);
        }
    }
    decoder.send_packet(&Packet::empty()).unwrap();
    loop {
        match decoder.receive_frame() {
            Ok(frame) => frames.push(frame),
            Err(YinError::Eof) => break,
            Err(e) => panic!("意外错误: {e}"),
        }
    }
    frames
}

// ============================================================
// 测试
// ============================================================

#[test]
fn test_原始数据块解码() {
    let mut decoder = open_raw("aac", SampleFormat::F32);
    let packets = vec![raw_block(true), raw_block(false), raw_block(false)];
    let frames = decode_all(decoder.as_mut(), &packets);

    // 首帧只填充重叠缓冲
    assert_eq!(frames.len(), 2);
    let tail = frames[0].samples_f32().unwrap();
    assert_eq!(tail.len(), 1024);
    assert!(tail.iter().any(|v| v.abs() > 1e-3));
    assert!(tail.iter().all(|v| v.abs() <= 1.0));
    // 第三帧前后两帧都是静音, 输出为零
    assert!(frames[1].samples_f32().unwrap().iter().all(|&v| v == 0.0));
}

#[test]
fn test_浮点与定点输出一致() {
    let packets = vec![raw_block(true), raw_block(false)];
    let mut float = open_raw("aac", SampleFormat::S16);
    let mut fixed = open_raw("aac_fixed", SampleFormat::S16);
    let a = decode_all(float.as_mut(), &packets);
    let b = decode_all(fixed.as_mut(), &packets);
    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 1);

    let a = a[0].samples_i16().unwrap();
    let b = b[0].samples_i16().unwrap();
    for (i, (x, y)) in a.iter().zip(&b).enumerate() {
        assert!((i32::from(*x) - i32::from(*y)).abs() <= 2, "样本 {i}: {x} != {y}");
    }
    assert!(a.iter().any(|&v| v.abs() > 100));
}

#[test]
fn test_adts_单个数据包多帧() {
    let registry = yin::default_codec_registry();
    let mut decoder = registry.create_decoder(CodecId::Aac).unwrap();
    // 无 AudioSpecificConfig, 由首个数据包的 ADTS 帧头初始化
    decoder
        .open(&CodecParameters::with_extra_data(CodecId::Aac, Vec::new()))
        .unwrap();

    let mut stream = Vec::new();
    for tone in [true, false, false, false] {
        stream.extend_from_slice(&adts(&raw_block(tone)));
    }
    let frames = decode_all(decoder.as_mut(), &[stream]);
    assert_eq!(frames.len(), 3);
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(frame.nb_samples, 1024);
        assert_eq!(frame.sample_rate, 44100);
        assert_eq!(frame.channel_layout, ChannelLayout::MONO);
        assert_eq!(frame.pts, i as i64 * 1024);
    }
}

#[test]
fn test_非法输入报错() {
    let registry = yin::default_codec_registry();
    let mut decoder = registry.create_decoder_by_name("aac").unwrap();
    let err = decoder
        .send_packet(&Packet::from_data(vec![0u8; 32]))
        .unwrap_err();
    assert_eq!(err.fault_code(), Some(5));
}
