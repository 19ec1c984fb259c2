use super::{language, matrix, quoted, sample_flags, word_max, word_size};
use crate::boxes::FourCC;
use crate::error::{ParseError, Result};
use crate::fullbox::{FullBoxRules, parse_fullbox, parse_fullbox_with};
use crate::node::Parser;
use crate::parser::{parse_boxes, parse_boxes_with, parse_contents};
use crate::util::{format_size, format_time};
use log::debug;

// ---------- file and structure ----------

pub fn ftyp(ps: &mut Parser<'_>) -> Result<()> {
    let major = ps.fourcc()?;
    ps.field("major_brand", format!("{major:?}"))?;
    let minor = ps.u32()?;
    ps.field("minor_version", format!("{minor:08x}"))?;
    while !ps.is_empty() {
        let brand = ps.fourcc()?;
        ps.print(format!("- compatible: {brand:?}"))?;
    }
    Ok(())
}

/// Padding: all-zero content is summarized rather than dumped.
pub fn free(ps: &mut Parser<'_>) -> Result<()> {
    let data = ps.read_rest();
    if data.iter().any(|&b| b != 0) {
        return ps.hexdump(data);
    }
    if data.is_empty() {
        return Ok(());
    }
    let style = ps.style();
    ps.print(style.dim(&style.green(&format!("({} empty bytes)", data.len()))))
}

/// Boxes under `meta` belong to its own handler, not to the enclosing track.
pub fn meta(ps: &mut Parser<'_>) -> Result<()> {
    parse_fullbox(ps)?;
    ps.isolate_track(|ps| parse_boxes(ps).map(drop))
}

pub fn trak(ps: &mut Parser<'_>) -> Result<()> {
    ps.isolate_track(|ps| parse_boxes(ps).map(drop))
}

/// Only the `hdlr` directly under `mdia` declares the media kind; data
/// handlers deeper down (QuickTime `minf/hdlr`) leave the context alone.
pub fn mdia(ps: &mut Parser<'_>) -> Result<()> {
    let mut declared = None;
    parse_boxes_with(ps, &mut |hdr, sub| {
        if declared.is_none() && hdr.uuid.is_none() && hdr.typ == FourCC(*b"hdlr") {
            declared = peek_handler_type(sub);
        }
        if declared.is_some() {
            sub.track.handler_type = declared;
        }
        parse_contents(hdr, sub)
    })
    .map(drop)
}

/// `handler_type` sits after version, flags and `pre_defined`.
fn peek_handler_type(ps: &Parser<'_>) -> Option<FourCC> {
    let bytes = ps.peek(12).ok()?;
    let handler_type = FourCC(bytes[8..12].try_into().ok()?);
    debug!("track handler type {handler_type}");
    Some(handler_type)
}

pub fn hdlr(ps: &mut Parser<'_>) -> Result<()> {
    parse_fullbox(ps)?;
    let pre_defined = ps.read(4)?;
    ps.reserved_zero("pre_defined", pre_defined)?;
    let handler_type = ps.fourcc()?;
    let reserved = ps.read(12)?;
    ps.reserved_zero("reserved", reserved)?;
    let name = ps.read_rest();
    ps.print(format!("handler_type = {handler_type:?}, name = {}", quoted(name)))
}

pub(crate) fn check_entry_count(entry_count: u32, found: usize) -> Result<()> {
    if found as u64 != entry_count as u64 {
        return Err(ParseError::invalid(
            "entry_count",
            format!("{entry_count}, but {found} boxes present"),
        ));
    }
    Ok(())
}

pub fn dref(ps: &mut Parser<'_>) -> Result<()> {
    parse_fullbox(ps)?;
    let entry_count = ps.u32()?;
    let boxes = parse_boxes(ps)?;
    check_entry_count(entry_count, boxes.len())
}

/// Flag 1: media data is in the same file, no location follows.
const SELF_CONTAINED: u32 = 1;

pub fn url(ps: &mut Parser<'_>) -> Result<()> {
    parse_fullbox_with(ps, FullBoxRules::default().known_flags(SELF_CONTAINED))?;
    if ps.is_empty() {
        return Ok(());
    }
    let location = ps.string()?;
    ps.field("location", format!("{location:?}"))
}

pub fn urn(ps: &mut Parser<'_>) -> Result<()> {
    parse_fullbox_with(ps, FullBoxRules::default().known_flags(SELF_CONTAINED))?;
    for name in ["location", "name"] {
        if ps.is_empty() {
            break;
        }
        let value = ps.string()?;
        ps.field(name, format!("{value:?}"))?;
    }
    Ok(())
}

pub fn id32(ps: &mut Parser<'_>) -> Result<()> {
    parse_fullbox(ps)?;
    language(ps)?;
    ps.print("ID3v2 data =")?;
    ps.in_object(|ps| ps.dump_rest())
}

// ---------- headers ----------

fn v1() -> FullBoxRules {
    FullBoxRules::default().max_version(1)
}

fn times(ps: &mut Parser<'_>, version: u8) -> Result<()> {
    for name in ["creation_time", "modification_time"] {
        let t = ps.uint(word_size(version))?;
        ps.field_default_as(name, t, 0, |&t| format_time(t))?;
    }
    Ok(())
}

fn duration(ps: &mut Parser<'_>, version: u8) -> Result<()> {
    let d = ps.uint(word_size(version))?;
    ps.field_default("duration", d, word_max(version))
}

pub fn mvhd(ps: &mut Parser<'_>) -> Result<()> {
    let (version, _) = parse_fullbox_with(ps, v1())?;
    times(ps, version)?;
    let timescale = ps.u32()?;
    ps.field("timescale", timescale)?;
    duration(ps, version)?;
    let rate = ps.sfixed16()?;
    ps.field_default("rate", rate, 1.0)?;
    let volume = ps.sfixed8()?;
    ps.field_default("volume", volume, 1.0)?;
    let reserved_1 = ps.u16()?;
    ps.reserved("reserved_1", reserved_1, 0)?;
    let reserved_2 = ps.read(8)?;
    ps.reserved_zero("reserved_2", reserved_2)?;
    matrix(ps)?;
    let pre_defined = ps.read(6 * 4)?;
    ps.reserved_zero("pre_defined", pre_defined)?;
    let next_track_id = ps.u32()?;
    ps.field_default("next_track_ID", next_track_id, u32::MAX)
}

fn describe_tkhd_flags(flags: u32) -> String {
    let names = [
        (0x1, "enabled"),
        (0x2, "in_movie"),
        (0x4, "in_preview"),
        (0x8, "size_is_aspect_ratio"),
    ];
    let set: Vec<&str> = names
        .iter()
        .filter(|(bit, _)| flags & bit != 0)
        .map(|&(_, name)| name)
        .collect();
    if set.is_empty() { "none".to_string() } else { set.join(", ") }
}

pub fn tkhd(ps: &mut Parser<'_>) -> Result<()> {
    let (version, flags) = parse_fullbox_with(ps, v1().known_flags(0xf))?;
    ps.field_desc("track_flags", format!("{flags:#x}"), Some(describe_tkhd_flags(flags)))?;
    times(ps, version)?;
    let track_id = ps.u32()?;
    ps.field("track_ID", track_id)?;
    let reserved_1 = ps.u32()?;
    ps.reserved("reserved_1", reserved_1, 0)?;
    duration(ps, version)?;
    let reserved_2 = ps.read(8)?;
    ps.reserved_zero("reserved_2", reserved_2)?;
    let layer = ps.i16()?;
    ps.field_default("layer", layer, 0)?;
    let alternate_group = ps.i16()?;
    ps.field_default("alternate_group", alternate_group, 0)?;
    let volume = ps.sfixed8()?;
    ps.field_default("volume", volume, 1.0)?;
    let reserved_4 = ps.u16()?;
    ps.reserved("reserved_4", reserved_4, 0)?;
    matrix(ps)?;
    let size = (ps.fixed16()?, ps.fixed16()?);
    ps.field_default_as("size", size, (0.0, 0.0), |&(w, h)| format_size(w, h))
}

pub fn mdhd(ps: &mut Parser<'_>) -> Result<()> {
    let (version, _) = parse_fullbox_with(ps, v1())?;
    times(ps, version)?;
    let timescale = ps.u32()?;
    ps.field("timescale", timescale)?;
    duration(ps, version)?;
    language(ps)?;
    let pre_defined = ps.u16()?;
    ps.reserved("pre_defined", pre_defined, 0)
}

pub fn mehd(ps: &mut Parser<'_>) -> Result<()> {
    let (version, _) = parse_fullbox_with(ps, v1())?;
    let fragment_duration = ps.uint(word_size(version))?;
    ps.field("fragment_duration", fragment_duration)
}

pub fn smhd(ps: &mut Parser<'_>) -> Result<()> {
    parse_fullbox(ps)?;
    let balance = ps.sfixed8()?;
    ps.field_default("balance", balance, 0.0)?;
    let reserved = ps.u16()?;
    ps.reserved("reserved", reserved, 0)
}

pub fn vmhd(ps: &mut Parser<'_>) -> Result<()> {
    let (_, flags) = parse_fullbox_with(ps, FullBoxRules::default().known_flags(1).default_flags(1))?;
    if flags != 1 {
        return Err(ParseError::invalid("vmhd flags", format!("{flags:#x}")));
    }
    let graphicsmode = ps.u16()?;
    ps.field_default("graphicsmode", graphicsmode, 0)?;
    let opcolor = [ps.u16()?, ps.u16()?, ps.u16()?];
    ps.field_default_as("opcolor", opcolor, [0; 3], |c| format!("{c:?}"))
}

pub fn mfhd(ps: &mut Parser<'_>) -> Result<()> {
    parse_fullbox(ps)?;
    let sequence_number = ps.u32()?;
    ps.field("sequence_number", sequence_number)
}

pub fn trex(ps: &mut Parser<'_>) -> Result<()> {
    parse_fullbox(ps)?;
    for name in [
        "track_ID",
        "default_sample_description_index",
        "default_sample_duration",
        "default_sample_size",
    ] {
        let v = ps.u32()?;
        ps.field(name, v)?;
    }
    sample_flags(ps, "default_sample_flags")
}

const TFHD_BASE_DATA_OFFSET: u32 = 0x1;
const TFHD_SAMPLE_DESCRIPTION_INDEX: u32 = 0x2;
const TFHD_DEFAULT_DURATION: u32 = 0x8;
const TFHD_DEFAULT_SIZE: u32 = 0x10;
const TFHD_DEFAULT_FLAGS: u32 = 0x20;
const TFHD_DURATION_IS_EMPTY: u32 = 0x10000;
const TFHD_DEFAULT_BASE_IS_MOOF: u32 = 0x20000;

pub fn tfhd(ps: &mut Parser<'_>) -> Result<()> {
    let (_, flags) = parse_fullbox_with(ps, FullBoxRules::default().known_flags(0x3003b))?;
    let track_id = ps.u32()?;
    ps.field("track_ID", track_id)?;
    if flags & TFHD_DURATION_IS_EMPTY != 0 {
        ps.print("duration-is-empty flag set")?;
    }
    if flags & TFHD_DEFAULT_BASE_IS_MOOF != 0 {
        ps.print("default-base-is-moof flag set")?;
    }
    if flags & TFHD_BASE_DATA_OFFSET != 0 {
        let base_data_offset = ps.u64()?;
        ps.field("base_data_offset", base_data_offset)?;
    }
    let optional = [
        (TFHD_SAMPLE_DESCRIPTION_INDEX, "sample_description_index"),
        (TFHD_DEFAULT_DURATION, "default_sample_duration"),
        (TFHD_DEFAULT_SIZE, "default_sample_size"),
    ];
    for (bit, name) in optional {
        if flags & bit != 0 {
            let v = ps.u32()?;
            ps.field(name, v)?;
        }
    }
    if flags & TFHD_DEFAULT_FLAGS != 0 {
        sample_flags(ps, "default_sample_flags")?;
    }
    Ok(())
}

pub fn tfdt(ps: &mut Parser<'_>) -> Result<()> {
    let (version, _) = parse_fullbox_with(ps, v1())?;
    let base_media_decode_time = ps.uint(word_size(version))?;
    ps.field("baseMediaDecodeTime", base_media_decode_time)
}
