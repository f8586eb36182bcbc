//! Yin AAC 解码性能基准测试.
//!
//! 覆盖 IMDCT, FFT 与整帧解码 (浮点与定点).

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use yin::codec::decoders::aac::fft::Fft;
use yin::codec::decoders::aac::mdct::Mdct;
use yin::codec::decoders::aac::real::Complex;
use yin::codec::decoders::aac::{AacSession, Fixed, FrameConfig, ObjectType, Real};
use yin::core::BitWriter;

/// LC 双声道静音帧 (CPE, 非公共窗, 每声道 49 个 ZERO_HCB 频带)
fn silent_stereo_block() -> Vec<u8> {
    let mut w = BitWriter::new();
    w.write_bits(1, 3); // CPE
    w.write_bits(0, 4);
    w.write_bit(0);
    for _ in 0..2 {
        w.write_bits(100, 8);
        w.write_bits(0, 4);
        w.write_bits(49, 6);
        w.write_bit(0);
        w.write_bits(0, 4);
        w.write_bits(31, 5); // 转义
        w.write_bits(18, 5);
        w.write_bits(0, 3);
    }
    w.write_bits(7, 3);
    w.finish()
}

fn bench_imdct(c: &mut Criterion) {
    c.bench_function("imdct_2048_f32", |b| {
        let mdct = Mdct::<f32>::new(2048).unwrap();
        let spec: Vec<f32> = (0..1024).map(|k| ((k * 37) % 101) as f32 - 50.0).collect();
        let mut out = vec![0.0f32; 2048];
        b.iter(|| mdct.backward(black_box(&spec), &mut out));
    });
    c.bench_function("imdct_2048_fixed", |b| {
        let mdct = Mdct::<Fixed>::new(2048).unwrap();
        let spec: Vec<Fixed> = (0..1024)
            .map(|k| Fixed::from_i16(((k * 37) % 101) as i16 - 50))
            .collect();
        let mut out = vec![Fixed::ZERO; 2048];
        b.iter(|| mdct.backward(black_box(&spec), &mut out));
    });
}

fn bench_fft(c: &mut Criterion) {
    c.bench_function("fft_512_f32", |b| {
        let fft = Fft::<f32>::new(512).unwrap();
        let input: Vec<Complex<f32>> = (0..512)
            .map(|i| Complex::new((i as f32 * 0.1).sin(), (i as f32 * 0.3).cos()))
            .collect();
        let mut data = input.clone();
        let mut scratch = input.clone();
        b.iter(|| {
            data.copy_from_slice(&input);
            fft.forward(black_box(&mut data), &mut scratch);
        });
    });
}

fn bench_frame(c: &mut Criterion) {
    let block = silent_stereo_block();
    c.bench_function("decode_silent_frame_f32", |b| {
        let cfg = FrameConfig::new(ObjectType::Lc, 4, 2).unwrap();
        let mut session = AacSession::<f32>::new(cfg).unwrap();
        b.iter(|| session.decode_frame(black_box(&block)).unwrap());
    });
    c.bench_function("decode_silent_frame_fixed", |b| {
        let cfg = FrameConfig::new(ObjectType::Lc, 4, 2).unwrap();
        let mut session = AacSession::<Fixed>::new(cfg).unwrap();
        b.iter(|| session.decode_frame(black_box(&block)).unwrap());
    });
}

criterion_group!(benches, bench_imdct, bench_fft, bench_frame);
criterion_main!(benches);
