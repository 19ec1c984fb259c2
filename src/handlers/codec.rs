//! Decoder configuration records carried inside sample entries.

use crate::descriptors::{self, DEFAULT};
use crate::error::{ParseError, Result};
use crate::fullbox::parse_fullbox;
use crate::node::Parser;
use crate::util::mask;

fn configuration_version(ps: &mut Parser<'_>) -> Result<()> {
    let version = ps.u8()?;
    if version != 1 {
        return Err(ParseError::invalid("configuration version", version));
    }
    Ok(())
}

/// Length-prefixed parameter sets, one hex line each.
fn parameter_sets(ps: &mut Parser<'_>, label: &str, count: u64) -> Result<()> {
    for _ in 0..count {
        let len = ps.u16()? as usize;
        let nalu = ps.read(len)?;
        ps.print(format!("- {label}: {}", hex::encode(nalu)))?;
    }
    Ok(())
}

fn profile_compat_level(ps: &mut Parser<'_>) -> Result<u8> {
    let bytes = ps.read(3)?;
    ps.field("profile / compat / level", hex::encode(bytes))?;
    Ok(bytes[0])
}

pub fn avcc(ps: &mut Parser<'_>) -> Result<()> {
    configuration_version(ps)?;
    let profile = profile_compat_level(ps)?;
    ps.bits(1, |ps, br| {
        ps.reserved("reserved_1", br.read(6)?, mask(6))?;
        ps.field("lengthSizeMinusOne", br.read(2)?)
    })?;
    let sps_count = ps.bits(1, |ps, br| {
        ps.reserved("reserved_2", br.read(3)?, mask(3))?;
        br.read(5)
    })?;
    parameter_sets(ps, "SPS", sps_count)?;
    let pps_count = ps.u8()?;
    parameter_sets(ps, "PPS", pps_count as u64)?;

    // High profiles append chroma and bit depth information
    if ps.is_empty() || !matches!(profile, 100 | 110 | 122 | 144) {
        return ps.dump_rest();
    }
    ps.bits(3, |ps, br| {
        ps.reserved("reserved_3", br.read(6)?, mask(6))?;
        ps.field("chroma_format", br.read(2)?)?;
        ps.reserved("reserved_4", br.read(5)?, mask(5))?;
        ps.field("bit_depth_luma_minus8", br.read(3)?)?;
        ps.reserved("reserved_5", br.read(5)?, mask(5))?;
        ps.field("bit_depth_chroma_minus8", br.read(3)?)
    })?;
    let ext_count = ps.u8()?;
    parameter_sets(ps, "SPS extension", ext_count as u64)
}

pub fn svcc(ps: &mut Parser<'_>) -> Result<()> {
    configuration_version(ps)?;
    profile_compat_level(ps)?;
    ps.bits(1, |ps, br| {
        ps.field("complete_representation", br.bit()?)?;
        ps.reserved("reserved_1", br.read(5)?, mask(5))?;
        ps.field("lengthSizeMinusOne", br.read(2)?)
    })?;
    let sps_count = ps.bits(1, |ps, br| {
        ps.reserved("reserved_2", br.read(1)?, 0)?;
        br.read(7)
    })?;
    parameter_sets(ps, "SPS", sps_count)?;
    let pps_count = ps.u8()?;
    parameter_sets(ps, "PPS", pps_count as u64)
}

/// One byte holding `reserved` all-ones bits followed by a small field.
fn padded_field(ps: &mut Parser<'_>, reserved: usize, name: &str) -> Result<()> {
    ps.bits(1, |ps, br| {
        ps.reserved("reserved", br.read(reserved)?, mask(reserved as u32))?;
        ps.field(name, br.read_rest()?)
    })
}

pub fn hvcc(ps: &mut Parser<'_>) -> Result<()> {
    configuration_version(ps)?;
    ps.bits(1, |ps, br| {
        ps.field("general_profile_space", br.read(2)?)?;
        ps.field("general_tier_flag", br.read(1)?)?;
        ps.field("general_profile_idc", format!("{:02x}", br.read(5)?))
    })?;
    let compat = ps.read(4)?;
    ps.field("general_profile_compatibility_flags", hex::encode(compat))?;
    let constraints = ps.read(6)?;
    ps.field("general_constraint_indicator_flags", hex::encode(constraints))?;
    let level = ps.read(1)?;
    ps.field("general_level_idc", hex::encode(level))?;

    ps.bits(2, |ps, br| {
        ps.reserved("reserved", br.read(4)?, mask(4))?;
        ps.field("min_spatial_segmentation_idc", br.read_rest()?)
    })?;
    padded_field(ps, 6, "parallelismType")?;
    padded_field(ps, 6, "chromaFormat")?;
    padded_field(ps, 5, "bitDepthLumaMinus8")?;
    padded_field(ps, 5, "bitDepthChromaMinus8")?;

    let avg_frame_rate = ps.u16()?;
    ps.field("avgFrameRate", avg_frame_rate)?;
    ps.bits(1, |ps, br| {
        ps.field("constantFrameRate", br.read(2)?)?;
        ps.field("numTemporalLayers", br.read(3)?)?;
        ps.field("temporalIdNested", br.bit()?)?;
        ps.field("lengthSizeMinusOne", br.read(2)?)
    })?;

    let num_arrays = ps.u8()?;
    for i in 0..num_arrays {
        ps.print(format!("- array {i}:"))?;
        ps.in_object(|ps| {
            ps.bits(1, |ps, br| {
                ps.field("array_completeness", br.bit()?)?;
                ps.reserved("reserved", br.read(1)?, 0)?;
                ps.field("NAL_unit_type", br.read(6)?)
            })?;
            let num_nalus = ps.u16()?;
            for n in 0..num_nalus {
                ps.print(format!("- NALU {n}"))?;
                let len = ps.u16()? as usize;
                let nalu = ps.read(len)?;
                ps.in_object(|ps| ps.hexdump(nalu))?;
            }
            Ok(())
        })?;
    }
    Ok(())
}

pub fn av1c(ps: &mut Parser<'_>) -> Result<()> {
    ps.bits(4, |ps, br| {
        ps.reserved("marker", br.bit()?, true)?;
        let version = br.read(7)?;
        if version != 1 {
            return Err(ParseError::invalid("configuration version", version));
        }
        ps.field("seq_profile", br.read(3)?)?;
        ps.field("seq_level_idx_0", br.read(5)?)?;
        for name in [
            "seq_tier_0",
            "high_bitdepth",
            "twelve_bit",
            "monochrome",
            "chroma_subsampling_x",
            "chroma_subsampling_y",
        ] {
            ps.field(name, br.bit()?)?;
        }
        ps.field("chroma_sample_position", br.read(2)?)?;
        ps.reserved("reserved", br.read(3)?, 0)?;
        if br.bit()? {
            ps.field("initial_presentation_delay_minus_one", br.read(4)?)
        } else {
            ps.reserved("reserved", br.read(4)?, 0)
        }
    })?;
    ps.print("configOBUs =")?;
    ps.in_object(|ps| ps.dump_rest())
}

pub fn av1f(ps: &mut Parser<'_>) -> Result<()> {
    let fwd_distance = ps.u8()?;
    ps.field("fwd_distance", fwd_distance)
}

pub fn dops(ps: &mut Parser<'_>) -> Result<()> {
    let version = ps.u8()?;
    if version != 0 {
        return Err(ParseError::invalid("Version", version));
    }
    let output_channel_count = ps.u8()?;
    ps.field("OutputChannelCount", output_channel_count)?;
    let pre_skip = ps.u16()?;
    ps.field("PreSkip", pre_skip)?;
    let input_sample_rate = ps.u32()?;
    ps.field("InputSampleRate", input_sample_rate)?;
    let output_gain = ps.i16()? as f64 / 256.0;
    ps.field("OutputGain", output_gain)?;
    let family = ps.u8()?;
    ps.field("ChannelMappingFamily", family)?;
    if family != 0 {
        let stream_count = ps.u8()?;
        ps.field("StreamCount", stream_count)?;
        let coupled_count = ps.u8()?;
        ps.field("CoupledCount", coupled_count)?;
        let mapping = ps.read(output_channel_count as usize)?;
        ps.field("ChannelMapping", format!("{mapping:?}"))?;
    }
    Ok(())
}

/// ES_DescrTag
const ES_DESCRIPTOR: u8 = 0x03;
/// MP4_IOD_Tag
const MP4_INITIAL_OBJECT_DESCRIPTOR: u8 = 0x10;

pub fn esds(ps: &mut Parser<'_>) -> Result<()> {
    parse_fullbox(ps)?;
    ps.in_object(|ps| descriptors::parse_descriptor(ps, Some(ES_DESCRIPTOR), DEFAULT))
}

pub fn iods(ps: &mut Parser<'_>) -> Result<()> {
    parse_fullbox(ps)?;
    ps.in_object(|ps| descriptors::parse_descriptor(ps, Some(MP4_INITIAL_OBJECT_DESCRIPTOR), DEFAULT))
}

pub fn m4ds(ps: &mut Parser<'_>) -> Result<()> {
    descriptors::parse_descriptors(ps, DEFAULT)
}
