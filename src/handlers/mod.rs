//! Per-box-type body parsers, registered in [`crate::registry::default_registry`].

pub mod codec;
pub mod header;
pub mod metadata;
pub mod protection;
pub mod sample_entry;
pub mod tables;

use crate::error::Result;
use crate::languages::language_name;
use crate::node::Parser;
use crate::util::{decode_language, mask};

/// Width of version-dependent integers: 32 bits in version 0, 64 in 1.
pub(crate) fn word_size(version: u8) -> usize {
    if version == 0 { 4 } else { 8 }
}

/// Largest value of a version-dependent integer (the "unknown" duration).
pub(crate) fn word_max(version: u8) -> u64 {
    mask(word_size(version) as u32 * 8)
}

pub(crate) fn matrix(ps: &mut Parser<'_>) -> Result<()> {
    let mut m = [0f64; 9];
    for v in &mut m {
        *v = ps.sfixed16()?;
    }
    let identity = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 16384.0];
    ps.field_default_as("matrix", m, identity, |m| {
        let cells: Vec<String> = m.iter().map(f64::to_string).collect();
        format!("[{}]", cells.join(", "))
    })
}

/// Packed ISO-639-2/T code, annotated with the language name when known.
pub(crate) fn language(ps: &mut Parser<'_>) -> Result<()> {
    let code = ps.u16()?;
    let letters = decode_language(code);
    let name = letters.as_deref().and_then(language_name).map(str::to_string);
    let value = letters.unwrap_or_else(|| format!("{code:#06x}"));
    ps.field_default_desc("language", value, format!("{:#06x}", 0), name)
}

fn describe_sdtp(x: u64) -> String {
    match x {
        0 => "unknown",
        1 => "yes",
        2 => "no",
        _ => "reserved",
    }
    .to_string()
}

/// The 32-bit sample flags shared by `trex`, `tfhd` and `trun`.
pub(crate) fn sample_flags(ps: &mut Parser<'_>, name: &str) -> Result<()> {
    ps.print(format!("{name} ="))?;
    ps.in_object(|ps| {
        ps.bits(4, |ps, br| {
            ps.reserved("reserved", br.read(4)?, 0)?;
            // same meanings as in 'sdtp'
            for field in ["is_leading", "sample_depends_on", "sample_is_depended_on", "sample_has_redundancy"] {
                let v = br.read(2)?;
                ps.field_default_desc(field, v, 0, Some(describe_sdtp(v)))?;
            }
            ps.field_default("sample_padding_value", br.read(3)?, 0)?;
            ps.field_default("sample_is_non_sync_sample", br.bit()?, false)?;
            ps.field_default("sample_degradation_priority", br.read(16)?, 0)
        })
    })
}

/// Quoted UTF-8 text, lossily decoded.
pub(crate) fn quoted(bytes: &[u8]) -> String {
    format!("{:?}", String::from_utf8_lossy(bytes))
}
