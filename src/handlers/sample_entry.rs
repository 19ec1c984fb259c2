use super::header::check_entry_count;
use super::quoted;
use crate::boxes::BoxHeader;
use crate::error::{ParseError, Result};
use crate::fullbox::{FullBoxRules, parse_fullbox_with};
use crate::node::Parser;
use crate::parser::{parse_boxes, parse_boxes_with};
use crate::util::{format_fraction, format_size};
use log::debug;

/// Sample descriptions. Each child is a sample entry whose layout depends on
/// the media handler declared earlier in the track.
pub fn stsd(ps: &mut Parser<'_>) -> Result<()> {
    let (version, _) = parse_fullbox_with(ps, FullBoxRules::default().max_version(u8::MAX))?;
    let entry_count = ps.u32()?;
    let boxes = parse_boxes_with(ps, &mut |hdr, ps| sample_entry(hdr, ps, version))?;
    check_entry_count(entry_count, boxes.len())
}

fn sample_entry(hdr: &BoxHeader, ps: &mut Parser<'_>, version: u8) -> Result<()> {
    let reserved = ps.read(6)?;
    ps.reserved_zero("reserved", reserved)?;
    let data_reference_index = ps.u16()?;
    ps.field("data_reference_index", data_reference_index)?;

    let handler = ps.track.handler_type;
    debug!("{} sample entry under handler {handler:?}", hdr.typ);
    match handler.as_ref().map(|h| &h.0) {
        Some(b"vide") => visual(ps, version),
        Some(b"soun") => audio(ps, version),
        Some(b"meta" | b"text" | b"subt") => text(hdr, ps, version),
        _ => ps.dump_rest(),
    }
}

fn expect_version(version: u8, max: u8) -> Result<()> {
    if version > max {
        return Err(ParseError::invalid("sample description version", version));
    }
    Ok(())
}

fn visual(ps: &mut Parser<'_>, version: u8) -> Result<()> {
    expect_version(version, 0)?;
    let reserved = ps.read(16)?;
    ps.reserved_zero("reserved", reserved)?;

    let (width, height) = (ps.u16()?, ps.u16()?);
    ps.field("size", format_size(width, height))?;
    let resolution = (ps.fixed16()?, ps.fixed16()?);
    ps.field_default_as("resolution", resolution, (72.0, 72.0), |&(h, v)| format_size(h, v))?;
    let reserved_2 = ps.u32()?;
    ps.reserved("reserved_2", reserved_2, 0)?;
    let frame_count = ps.u16()?;
    ps.field_default("frame_count", frame_count, 1)?;

    ps.subparser(32, |ps| {
        let len = ps.u8()? as usize;
        let name = ps.read(len)?;
        ps.field("compressorname", quoted(name))?;
        let pad = ps.read_rest();
        ps.reserved_zero("compressorname_pad", pad)
    })?;

    let depth = ps.u16()?;
    ps.field_default("depth", depth, 0x18)?;
    let pre_defined = ps.i16()?;
    ps.reserved("pre_defined_3", pre_defined, -1)?;
    parse_boxes(ps).map(drop)
}

fn audio(ps: &mut Parser<'_>, version: u8) -> Result<()> {
    expect_version(version, 1)?;
    if version == 0 {
        let reserved = ps.read(2)?;
        ps.reserved_zero("reserved_1_2", reserved)?;
    } else {
        let entry_version = ps.u16()?;
        ps.reserved("entry_version", entry_version, 1)?;
    }
    let reserved = ps.read(6)?;
    ps.reserved_zero("reserved_1", reserved)?;

    let channelcount = ps.u16()?;
    if version == 0 {
        ps.field_default("channelcount", channelcount, 2)?;
    } else {
        ps.field("channelcount", channelcount)?;
    }
    let samplesize = ps.u16()?;
    ps.field_default("samplesize", samplesize, 16)?;
    let pre_defined = ps.u16()?;
    ps.reserved("pre_defined_1", pre_defined, 0)?;
    let reserved_2 = ps.u16()?;
    ps.reserved("reserved_2", reserved_2, 0)?;
    let samplerate = ps.fixed16()?;
    if version == 0 {
        ps.field("samplerate", samplerate)?;
    } else {
        ps.field_default("samplerate", samplerate, 1.0)?;
    }
    parse_boxes(ps).map(drop)
}

fn text(hdr: &BoxHeader, ps: &mut Parser<'_>, version: u8) -> Result<()> {
    expect_version(version, 0)?;
    let fields: &[&str] = match &hdr.typ.0 {
        b"metx" => &["content_encoding", "namespace", "schema_location"],
        b"mett" | b"stxt" | b"sbtt" => &["content_encoding", "mime_format"],
        b"stpp" => &["namespace", "schema_location", "auxiliary_mime_types"],
        _ => &[],
    };
    for &name in fields {
        let value = ps.string()?;
        ps.field(name, format!("{value:?}"))?;
    }
    parse_boxes(ps).map(drop)
}

// ---------- auxiliary boxes ----------

pub fn btrt(ps: &mut Parser<'_>) -> Result<()> {
    for name in ["bufferSizeDB", "maxBitrate", "avgBitrate"] {
        let v = ps.u32()?;
        ps.field(name, v)?;
    }
    Ok(())
}

fn fraction(ps: &mut Parser<'_>, name: &str) -> Result<()> {
    let (num, den) = (ps.u32()?, ps.u32()?);
    ps.field(name, format_fraction(num as u64, den as u64))
}

pub fn pasp(ps: &mut Parser<'_>) -> Result<()> {
    fraction(ps, "pixel_aspect_ratio")
}

pub fn clap(ps: &mut Parser<'_>) -> Result<()> {
    for name in ["cleanApertureWidth", "cleanApertureHeight", "horizOff", "vertOff"] {
        fraction(ps, name)?;
    }
    Ok(())
}

fn describe_colour_type(colour_type: &[u8; 4]) -> Option<String> {
    let d = match colour_type {
        b"nclx" => "on-screen colours",
        b"rICC" => "restricted ICC profile",
        b"prof" => "unrestricted ICC profile",
        _ => return None,
    };
    Some(d.to_string())
}

pub fn colr(ps: &mut Parser<'_>) -> Result<()> {
    let colour_type = ps.fourcc()?;
    ps.field_desc("colour_type", format!("{colour_type:?}"), describe_colour_type(&colour_type.0))?;
    match &colour_type.0 {
        b"nclx" => {
            for name in ["colour_primaries", "transfer_characteristics", "matrix_coefficients"] {
                let v = ps.u16()?;
                ps.field(name, v)?;
            }
            ps.bits(1, |ps, br| {
                ps.field("full_range_flag", br.bit()?)?;
                ps.reserved("reserved", br.read_rest()?, 0)
            })
        }
        b"rICC" | b"prof" => {
            ps.print("ICC_profile =")?;
            ps.in_object(|ps| ps.dump_rest())
        }
        _ => {
            ps.print("data =")?;
            ps.in_object(|ps| ps.dump_rest())
        }
    }
}
