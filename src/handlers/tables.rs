use super::{sample_flags, word_size};
use crate::error::{ParseError, Result};
use crate::fullbox::{FullBoxRules, parse_fullbox, parse_fullbox_with};
use crate::node::Parser;

fn v1() -> FullBoxRules {
    FullBoxRules::default().max_version(1)
}

fn entry_count(ps: &mut Parser<'_>) -> Result<u32> {
    let n = ps.u32()?;
    ps.field("entry_count", n)?;
    Ok(n)
}

pub fn elst(ps: &mut Parser<'_>) -> Result<()> {
    let (version, _) = parse_fullbox_with(ps, v1())?;
    let w = word_size(version);
    let count = entry_count(ps)?;
    for i in 0..count as u64 {
        let segment_duration = ps.uint(w)?;
        let media_time = ps.sint(w)?;
        let media_rate = ps.sfixed16()?;
        ps.row(i, || {
            format!(
                "[edit segment {i:3}] duration = {segment_duration:6}, media_time = {media_time:6}, media_rate = {media_rate}"
            )
        })?;
    }
    ps.rows_end(count as u64)
}

pub fn sidx(ps: &mut Parser<'_>) -> Result<()> {
    let (version, _) = parse_fullbox_with(ps, v1())?;
    let w = word_size(version);
    let reference_id = ps.u32()?;
    ps.field("reference_ID", reference_id)?;
    let timescale = ps.u32()?;
    ps.field("timescale", timescale)?;
    let earliest_presentation_time = ps.uint(w)?;
    ps.field("earliest_presentation_time", earliest_presentation_time)?;
    let first_offset = ps.uint(w)?;
    ps.field("first_offset", first_offset)?;
    let reserved = ps.u16()?;
    ps.reserved("reserved_1", reserved, 0)?;
    let reference_count = ps.u16()?;
    ps.field("reference_count", reference_count)?;

    for i in 0..reference_count as u64 {
        let (kind, size) = ps.bits(4, |_, br| Ok((br.read(1)?, br.read(31)?)))?;
        let duration = ps.u32()?;
        let (sap, sap_type, sap_delta) = ps.bits(4, |_, br| Ok((br.read(1)?, br.read(3)?, br.read(28)?)))?;
        ps.row(i, || {
            format!(
                "[reference {i:3}] type = {kind}, size = {size}, duration = {duration}, starts_with_SAP = {sap}, SAP_type = {sap_type}, SAP_delta_time = {sap_delta}"
            )
        })?;
    }
    ps.rows_end(reference_count as u64)
}

pub fn stts(ps: &mut Parser<'_>) -> Result<()> {
    parse_fullbox(ps)?;
    let count = entry_count(ps)?;
    let (mut sample, mut time) = (1u64, 0u64);
    for i in 0..count as u64 {
        let sample_count = ps.u32()? as u64;
        let sample_delta = ps.u32()? as u64;
        ps.row(i, || {
            format!(
                "[entry {i:3}] [sample = {sample:6}, time = {time:6}] sample_count = {sample_count:5}, sample_delta = {sample_delta:5}"
            )
        })?;
        sample = sample.saturating_add(sample_count);
        time = time.saturating_add(sample_count * sample_delta);
    }
    ps.rows_end(count as u64)?;
    ps.print(format!("[samples = {:6}, time = {time:6}]", sample - 1))
}

pub fn ctts(ps: &mut Parser<'_>) -> Result<()> {
    let (version, _) = parse_fullbox_with(ps, v1())?;
    let count = entry_count(ps)?;
    let mut sample = 1u64;
    for i in 0..count as u64 {
        let sample_count = ps.u32()? as u64;
        // unsigned in version 0, signed from version 1
        let sample_offset = if version == 0 { ps.u32()? as i64 } else { ps.i32()? as i64 };
        ps.row(i, || {
            format!(
                "[entry {i:3}] [sample = {sample:6}] sample_count = {sample_count:5}, sample_offset = {sample_offset:5}"
            )
        })?;
        sample = sample.saturating_add(sample_count);
    }
    ps.rows_end(count as u64)?;
    ps.print(format!("[samples = {:6}]", sample - 1))
}

pub fn stsc(ps: &mut Parser<'_>) -> Result<()> {
    parse_fullbox(ps)?;
    let count = entry_count(ps)?;
    let mut sample = 1u64;
    let mut last: Option<(u32, u32)> = None;
    for i in 0..count as u64 {
        let first_chunk = ps.u32()?;
        let samples_per_chunk = ps.u32()?;
        let sample_description_index = ps.u32()?;
        if let Some((last_chunk, last_spc)) = last {
            if first_chunk <= last_chunk {
                return Err(ParseError::invalid(
                    "first_chunk",
                    format!("{first_chunk} not after previous {last_chunk}"),
                ));
            }
            sample = sample.saturating_add(last_spc as u64 * (first_chunk - last_chunk) as u64);
        }
        ps.row(i, || {
            format!(
                "[entry {i:3}] [sample = {sample:6}] first_chunk = {first_chunk:5}, samples_per_chunk = {samples_per_chunk:4}, sample_description_index = {sample_description_index}"
            )
        })?;
        last = Some((first_chunk, samples_per_chunk));
    }
    ps.rows_end(count as u64)
}

pub fn stsz(ps: &mut Parser<'_>) -> Result<()> {
    parse_fullbox(ps)?;
    let sample_size = ps.u32()?;
    ps.field_default("sample_size", sample_size, 0)?;
    let sample_count = ps.u32()?;
    ps.field("sample_count", sample_count)?;
    if sample_size != 0 {
        return Ok(());
    }
    for i in 0..sample_count as u64 {
        let size = ps.u32()?;
        ps.row(i, || format!("[sample {:6}] sample_size = {size:5}", i + 1))?;
    }
    ps.rows_end(sample_count as u64)
}

pub fn stco(ps: &mut Parser<'_>) -> Result<()> {
    parse_fullbox(ps)?;
    let count = entry_count(ps)?;
    for i in 0..count as u64 {
        let offset = ps.u32()?;
        ps.row(i, || format!("[chunk {:5}] offset = {offset:#08x}", i + 1))?;
    }
    ps.rows_end(count as u64)
}

pub fn co64(ps: &mut Parser<'_>) -> Result<()> {
    parse_fullbox(ps)?;
    let count = entry_count(ps)?;
    for i in 0..count as u64 {
        let offset = ps.u64()?;
        ps.row(i, || format!("[chunk {:5}] offset = {offset:#016x}", i + 1))?;
    }
    ps.rows_end(count as u64)
}

pub fn stss(ps: &mut Parser<'_>) -> Result<()> {
    parse_fullbox(ps)?;
    let count = entry_count(ps)?;
    for i in 0..count as u64 {
        let sample_number = ps.u32()?;
        ps.row(i, || format!("[sync sample {i:5}] sample_number = {sample_number:6}"))?;
    }
    ps.rows_end(count as u64)
}

pub fn sbgp(ps: &mut Parser<'_>) -> Result<()> {
    let (version, _) = parse_fullbox_with(ps, v1())?;
    let grouping_type = ps.fourcc()?;
    ps.field("grouping_type", format!("{grouping_type:?}"))?;
    if version == 1 {
        let parameter = ps.u32()?;
        ps.field("grouping_type_parameter", parameter)?;
    }
    let count = entry_count(ps)?;
    let mut sample = 1u64;
    for i in 0..count as u64 {
        let sample_count = ps.u32()? as u64;
        let group_description_index = ps.u32()?;
        ps.row(i, || {
            format!(
                "[entry {:5}] [sample = {sample:6}] sample_count = {sample_count:5}, group_description_index = {group_description_index:5}",
                i + 1
            )
        })?;
        sample = sample.saturating_add(sample_count);
    }
    ps.rows_end(count as u64)?;
    ps.print(format!("[samples = {:6}]", sample - 1))
}

/// Only version 1 entries are understood; their payload is grouping type
/// specific and stays raw.
pub fn sgpd(ps: &mut Parser<'_>) -> Result<()> {
    let (version, _) = parse_fullbox_with(ps, FullBoxRules::default().max_version(2))?;
    let grouping_type = ps.fourcc()?;
    ps.field("grouping_type", format!("{grouping_type:?}"))?;
    let mut default_length = 0;
    if version == 1 {
        default_length = ps.u32()?;
        ps.field("default_length", default_length)?;
    } else if version >= 2 {
        let index = ps.u32()?;
        ps.field("default_sample_description_index", index)?;
    }

    let count = ps.u32()?;
    for i in 0..count {
        ps.print(format!("- entry {}:", i + 1))?;
        if version != 1 {
            return Err(ParseError::Unsupported(format!(
                "sgpd version {version} entries ({grouping_type})"
            )));
        }
        let mut length = default_length;
        if length == 0 {
            length = ps.u32()?;
            ps.print(format!("  description_length = {length}"))?;
        }
        let description = ps.read(length as usize)?;
        ps.in_object(|ps| ps.hexdump(description))?;
    }
    Ok(())
}

pub fn saiz(ps: &mut Parser<'_>) -> Result<()> {
    let (_, flags) = parse_fullbox_with(ps, FullBoxRules::default().known_flags(1))?;
    if flags & 1 != 0 {
        let aux_info_type = ps.fourcc()?;
        ps.field("aux_info_type", format!("{aux_info_type:?}"))?;
        let parameter = ps.u32()?;
        ps.field("aux_info_type_parameter", format!("{parameter:#x}"))?;
    }
    let default_size = ps.u8()?;
    ps.field("default_sample_info_size", default_size)?;
    let sample_count = ps.u32()?;
    ps.field("sample_count", sample_count)?;
    if default_size != 0 {
        return Ok(());
    }
    for i in 0..sample_count as u64 {
        let size = ps.u8()?;
        ps.row(i, || format!("[sample {:6}] sample_info_size = {size:5}", i + 1))?;
    }
    ps.rows_end(sample_count as u64)
}

pub fn saio(ps: &mut Parser<'_>) -> Result<()> {
    let (version, flags) = parse_fullbox_with(ps, v1().known_flags(1))?;
    if flags & 1 != 0 {
        let aux_info_type = ps.fourcc()?;
        ps.field("aux_info_type", format!("{aux_info_type:?}"))?;
        let parameter = ps.u32()?;
        ps.field("aux_info_type_parameter", format!("{parameter:#x}"))?;
    }
    let count = entry_count(ps)?;
    for i in 0..count as u64 {
        let offset = ps.uint(word_size(version))?;
        ps.row(i, || format!("[entry {:6}] offset = {offset:#08x}", i + 1))?;
    }
    ps.rows_end(count as u64)
}

const TRUN_DATA_OFFSET: u32 = 1 << 0;
const TRUN_FIRST_SAMPLE_FLAGS: u32 = 1 << 2;
const TRUN_DURATION: u32 = 1 << 8;
const TRUN_SIZE: u32 = 1 << 9;
const TRUN_FLAGS: u32 = 1 << 10;
const TRUN_CTS_OFFSET: u32 = 1 << 11;
const TRUN_PER_SAMPLE: u32 = TRUN_DURATION | TRUN_SIZE | TRUN_FLAGS | TRUN_CTS_OFFSET;

pub fn trun(ps: &mut Parser<'_>) -> Result<()> {
    let (version, flags) = parse_fullbox_with(ps, v1().known_flags(0xf05))?;
    let sample_count = ps.u32()?;
    ps.field("sample_count", sample_count)?;
    if flags & TRUN_DATA_OFFSET != 0 {
        let data_offset = ps.i32()?;
        ps.field("data_offset", format!("{data_offset:#x}"))?;
    }
    if flags & TRUN_FIRST_SAMPLE_FLAGS != 0 {
        sample_flags(ps, "first_sample_flags")?;
    }

    // samples without per-sample fields take no bytes
    if flags & TRUN_PER_SAMPLE == 0 {
        return Ok(());
    }
    let read = |ps: &mut Parser<'_>, bit: u32| -> Result<Option<u32>> {
        if flags & bit == 0 { Ok(None) } else { ps.u32().map(Some) }
    };
    let (mut offset, mut time) = (0u64, 0u64);
    for i in 0..sample_count as u64 {
        let duration = read(ps, TRUN_DURATION)?;
        let size = read(ps, TRUN_SIZE)?;
        let per_sample_flags = read(ps, TRUN_FLAGS)?;
        // unsigned in version 0, signed from version 1
        let cts = read(ps, TRUN_CTS_OFFSET)?.map(|v| if version == 0 { v as i64 } else { v as i32 as i64 });

        let (start_time, start_offset) = (time, offset);
        ps.row(i, || {
            let mut text = Vec::new();
            if let Some(duration) = duration {
                text.push(format!("time={start_time:7} + {duration:5}"));
            }
            if let Some(size) = size {
                text.push(format!("offset={start_offset:#9x} + {size:5}"));
            }
            if let Some(per_sample_flags) = per_sample_flags {
                text.push(format!("flags={per_sample_flags:08x}"));
            }
            if let Some(cts) = cts {
                text.push(cts.to_string());
            }
            format!("[sample {i:4}] {}", text.join(", "))
        })?;
        time = time.saturating_add(duration.unwrap_or(0) as u64);
        offset = offset.saturating_add(size.unwrap_or(0) as u64);
    }
    ps.rows_end(sample_count as u64)
}
