//! WAV (RIFF WAVE) 写入.
//!
//! 先写入 RIFF 与 fmt 块并为 data 块大小占位, 追加 PCM 后在 `finish` 中回填.

use std::io::{Seek, SeekFrom, Write};

use anyhow::{Result, bail};
use byteorder::{LittleEndian, WriteBytesExt};
use log::debug;
use yin_core::SampleFormat;

/// WAV 音频格式码: PCM 整数
const WAV_FORMAT_PCM: u16 = 0x0001;
/// WAV 音频格式码: IEEE 浮点
const WAV_FORMAT_IEEE_FLOAT: u16 = 0x0003;

/// RIFF 大小字段偏移
const RIFF_SIZE_OFFSET: u64 = 4;
/// data 块大小字段偏移: 12 (RIFF) + 24 (fmt) + 4 (data tag)
const DATA_SIZE_OFFSET: u64 = 40;

pub struct WavWriter<W: Write + Seek> {
    inner: W,
    data_written: u64,
}

impl<W: Write + Seek> WavWriter<W> {
    pub fn new(mut inner: W, sample_rate: u32, channels: u16, format: SampleFormat) -> Result<Self> {
        let (audio_format, bits_per_sample) = match format {
            SampleFormat::S16 => (WAV_FORMAT_PCM, 16u16),
            SampleFormat::S32 => (WAV_FORMAT_PCM, 32),
            SampleFormat::F32 => (WAV_FORMAT_IEEE_FLOAT, 32),
            other => bail!("WAV 不支持采样格式 {other}"),
        };
        if channels == 0 {
            bail!("WAV 声道数不能为 0");
        }
        let block_align = channels * (bits_per_sample / 8);
        let byte_rate = sample_rate * u32::from(block_align);

        inner.write_all(b"RIFF")?;
        inner.write_u32::<LittleEndian>(0)?;
        inner.write_all(b"WAVE")?;

        inner.write_all(b"fmt ")?;
        inner.write_u32::<LittleEndian>(16)?;
        inner.write_u16::<LittleEndian>(audio_format)?;
        inner.write_u16::<LittleEndian>(channels)?;
        inner.write_u32::<LittleEndian>(sample_rate)?;
        inner.write_u32::<LittleEndian>(byte_rate)?;
        inner.write_u16::<LittleEndian>(block_align)?;
        inner.write_u16::<LittleEndian>(bits_per_sample)?;

        inner.write_all(b"data")?;
        inner.write_u32::<LittleEndian>(0)?;

        debug!(
            "WAV 写入头部: {} Hz, {} 声道, {} 位",
            sample_rate, channels, bits_per_sample
        );
        Ok(Self {
            inner,
            data_written: 0,
        })
    }

    /// 追加已按小端交错排列的样本字节
    pub fn write_samples(&mut self, data: &[u8]) -> Result<()> {
        self.inner.write_all(data)?;
        self.data_written += data.len() as u64;
        Ok(())
    }

    pub fn data_written(&self) -> u64 {
        self.data_written
    }

    /// 回填大小字段并返回底层写入器
    pub fn finish(mut self) -> Result<W> {
        let data_size = u32::try_from(self.data_written)?;
        let riff_size = 36 + data_size;
        self.inner.seek(SeekFrom::Start(RIFF_SIZE_OFFSET))?;
        self.inner.write_u32::<LittleEndian>(riff_size)?;
        self.inner.seek(SeekFrom::Start(DATA_SIZE_OFFSET))?;
        self.inner.write_u32::<LittleEndian>(data_size)?;
        self.inner.seek(SeekFrom::End(0))?;
        self.inner.flush()?;
        debug!("WAV 写入尾部: riff_size={}, data_size={}", riff_size, data_size);
        Ok(self.inner)
    }
}
