use crate::error::{ParseError, Result};
use crate::node::Parser;

/// What a handler accepts in the version/flags preamble of a FullBox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FullBoxRules {
    pub max_version: u8,
    /// Flag bits the handler understands; others are reported.
    pub known_flags: u32,
    /// Flags value that is elided from the report.
    pub default_flags: u32,
}

impl FullBoxRules {
    pub fn max_version(mut self, v: u8) -> Self {
        self.max_version = v;
        self
    }

    pub fn known_flags(mut self, mask: u32) -> Self {
        self.known_flags = mask;
        self
    }

    pub fn default_flags(mut self, flags: u32) -> Self {
        self.default_flags = flags;
        self
    }
}

/// Version 0 only, no flags.
pub fn parse_fullbox(ps: &mut Parser<'_>) -> Result<(u8, u32)> {
    parse_fullbox_with(ps, FullBoxRules::default())
}

/// Read the 1-byte version and 24-bit flags.
///
/// A version above `rules.max_version` fails with `UnsupportedVersion`; flag
/// bits outside `rules.known_flags` only produce a warning line.
pub fn parse_fullbox_with(ps: &mut Parser<'_>, rules: FullBoxRules) -> Result<(u8, u32)> {
    let version = ps.u8()?;
    let flags = ps.uint(3)? as u32;
    if version > rules.max_version {
        return Err(ParseError::UnsupportedVersion {
            version,
            max: rules.max_version,
        });
    }
    ps.field_default("version", version, 0)?;
    ps.field_default("flags", format!("{flags:#08x}"), format!("{:#08x}", rules.default_flags))?;

    let unknown = flags & !rules.known_flags;
    if unknown != 0 {
        ps.warning(&format!("unknown flags set: {unknown:#08x}"))?;
    }
    Ok((version, flags))
}
