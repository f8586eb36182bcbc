//! 节目配置元素 (program_config_element).
//!
//! 只有流头 (AudioSpecificConfig / ADIF) 中的 PCE 决定声道映射,
//! 原始数据块内出现的 PCE 仅解析以保持游标同步, 其内容被忽略.

use yin_core::{BitCursor, BitSource, ChannelLayout, ChannelMask};

use super::fault::{AacFault, AacResult};

/// 单个解码器支持的最大声道数
pub const MAX_CHANNELS: usize = 64;

/// 一个前/侧/后声道元素的引用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElementRef {
    pub is_cpe: bool,
    pub tag: u8,
}

/// 节目配置
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgramConfig {
    pub element_instance_tag: u8,
    /// 2 位 profile (对象类型 - 1)
    pub object_type: u8,
    pub sf_index: u8,
    pub front: Vec<ElementRef>,
    pub side: Vec<ElementRef>,
    pub back: Vec<ElementRef>,
    pub lfe_tags: Vec<u8>,
    pub assoc_data_tags: Vec<u8>,
    /// (是否独立切换, 标签)
    pub cc_elements: Vec<(bool, u8)>,
    pub mono_mixdown: Option<u8>,
    pub stereo_mixdown: Option<u8>,
    /// (矩阵下混索引, 伪环绕)
    pub matrix_mixdown: Option<(u8, bool)>,
    pub comment: Vec<u8>,

    /// 各声道组内的声道数
    pub num_front_channels: usize,
    pub num_side_channels: usize,
    pub num_back_channels: usize,
    pub num_lfe_channels: usize,
    pub channels: usize,
    /// 按元素标签查输出声道起点
    pub sce_channel: [u8; 16],
    pub cpe_channel: [u8; 16],
    pub lfe_channel: [u8; 16],
}

impl ProgramConfig {
    /// 解析 PCE (不含 3 位元素 ID)
    pub fn parse(br: &mut BitCursor<'_>) -> AacResult<Self> {
        let mut pce = ProgramConfig {
            element_instance_tag: br.get_bits(4) as u8,
            object_type: br.get_bits(2) as u8,
            sf_index: br.get_bits(4) as u8,
            ..Default::default()
        };

        let num_front = br.get_bits(4) as usize;
        let num_side = br.get_bits(4) as usize;
        let num_back = br.get_bits(4) as usize;
        let num_lfe = br.get_bits(2) as usize;
        let num_assoc = br.get_bits(3) as usize;
        let num_cc = br.get_bits(4) as usize;

        if br.get_bit() == 1 {
            pce.mono_mixdown = Some(br.get_bits(4) as u8);
        }
        if br.get_bit() == 1 {
            pce.stereo_mixdown = Some(br.get_bits(4) as u8);
        }
        if br.get_bit() == 1 {
            let idx = br.get_bits(2) as u8;
            let pseudo_surround = br.get_bit() == 1;
            pce.matrix_mixdown = Some((idx, pseudo_surround));
        }

        pce.front = read_elements(br, num_front);
        pce.side = read_elements(br, num_side);
        pce.back = read_elements(br, num_back);
        pce.num_front_channels = pce.assign_channels(Group::Front);
        pce.num_side_channels = pce.assign_channels(Group::Side);
        pce.num_back_channels = pce.assign_channels(Group::Back);

        for _ in 0..num_lfe {
            let tag = br.get_bits(4) as u8;
            pce.lfe_channel[usize::from(tag)] = pce.channels.min(usize::from(u8::MAX)) as u8;
            pce.lfe_tags.push(tag);
            pce.channels += 1;
        }
        pce.num_lfe_channels = num_lfe;

        pce.assoc_data_tags = (0..num_assoc).map(|_| br.get_bits(4) as u8).collect();
        pce.cc_elements = (0..num_cc)
            .map(|_| {
                let ind_sw = br.get_bit() == 1;
                (ind_sw, br.get_bits(4) as u8)
            })
            .collect();

        br.byte_align();
        let comment_bytes = br.get_bits(8) as usize;
        pce.comment = (0..comment_bytes).map(|_| br.get_bits(8) as u8).collect();

        if pce.channels > MAX_CHANNELS {
            return Err(AacFault::PceChannels);
        }
        Ok(pce)
    }

    fn assign_channels(&mut self, group: Group) -> usize {
        let elements = match group {
            Group::Front => self.front.clone(),
            Group::Side => self.side.clone(),
            Group::Back => self.back.clone(),
        };
        let mut count = 0;
        for el in elements {
            let start = self.channels.min(usize::from(u8::MAX)) as u8;
            if el.is_cpe {
                self.cpe_channel[usize::from(el.tag)] = start;
                self.channels += 2;
                count += 2;
            } else {
                self.sce_channel[usize::from(el.tag)] = start;
                self.channels += 1;
                count += 1;
            }
        }
        count
    }

    /// 按声道组推导声道布局
    pub fn channel_layout(&self) -> ChannelLayout {
        let mut mask = ChannelMask::empty();
        match self.num_front_channels {
            1 => mask |= ChannelMask::FRONT_CENTER,
            2 => mask |= ChannelMask::FRONT_LEFT | ChannelMask::FRONT_RIGHT,
            n if n >= 3 => {
                mask |= ChannelMask::FRONT_LEFT | ChannelMask::FRONT_RIGHT;
                mask |= ChannelMask::FRONT_CENTER;
            }
            _ => {}
        }
        if self.num_side_channels >= 2 {
            mask |= ChannelMask::SIDE_LEFT | ChannelMask::SIDE_RIGHT;
        }
        match self.num_back_channels {
            1 => mask |= ChannelMask::BACK_CENTER,
            n if n >= 2 => mask |= ChannelMask::BACK_LEFT | ChannelMask::BACK_RIGHT,
            _ => {}
        }
        if self.num_lfe_channels > 0 {
            mask |= ChannelMask::LOW_FREQUENCY;
        }
        if mask.bits().count_ones() as usize == self.channels {
            ChannelLayout {
                channels: self.channels as u32,
                mask,
            }
        } else {
            ChannelLayout::from_channels(self.channels as u32)
        }
    }
}

#[derive(Clone, Copy)]
enum Group {
    Front,
    Side,
    Back,
}

fn read_elements(br: &mut BitCursor<'_>, count: usize) -> Vec<ElementRef> {
    (0..count)
        .map(|_| {
            let is_cpe = br.get_bit() == 1;
            ElementRef {
                is_cpe,
                tag: br.get_bits(4) as u8,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use yin_core::BitWriter;

    /// 5.1: 前 SCE + CPE, 后 CPE, LFE
    fn write_pce_5_1(w: &mut BitWriter) {
        w.write_bits(0, 4); // tag
        w.write_bits(1, 2); // LC
        w.write_bits(3, 4); // 48 kHz
        w.write_bits(2, 4); // front
        w.write_bits(0, 4); // side
        w.write_bits(1, 4); // back
        w.write_bits(1, 2); // lfe
        w.write_bits(0, 3); // assoc
        w.write_bits(0, 4); // cc
        w.write_bits(0, 3); // 三个下混标志
        w.write_bit(0);
        w.write_bits(0, 4); // front SCE tag 0
        w.write_bit(1);
        w.write_bits(0, 4); // front CPE tag 0
        w.write_bit(1);
        w.write_bits(1, 4); // back CPE tag 1
        w.write_bits(0, 4); // lfe tag 0
        w.align_to_byte();
        w.write_bits(2, 8);
        w.write_bytes(b"hi");
    }

    #[test]
    fn test_pce_5_1_解析() {
        let mut w = BitWriter::new();
        write_pce_5_1(&mut w);
        let data = w.finish();
        let mut br = BitCursor::new(&data).unwrap();
        let pce = ProgramConfig::parse(&mut br).unwrap();
        assert_eq!(pce.channels, 6);
        assert_eq!(pce.num_front_channels, 3);
        assert_eq!(pce.num_back_channels, 2);
        assert_eq!(pce.sce_channel[0], 0);
        assert_eq!(pce.lfe_channel[0], 5);
        assert_eq!(pce.cpe_channel[0], 1);
        assert_eq!(pce.cpe_channel[1], 3);
        assert_eq!(pce.comment, b"hi");
        assert_eq!(pce.channel_layout().channels, 6);
        assert!(!br.has_error());
    }
}
