use crate::boxes::{BoxKey, FourCC};
use crate::error::Result;
use crate::handlers::{codec, header, metadata, protection, sample_entry, tables};
use crate::node::Parser;
use std::collections::HashMap;

/// Parser for the body of one box type.
///
/// A handler receives a [`Parser`] bounded to exactly the box body and must
/// consume all of it; whatever it leaves behind is reported as trailing
/// data by the walker.
pub trait BoxHandler: Send + Sync {
    fn parse(&self, ps: &mut Parser<'_>) -> Result<()>;
}

impl<F> BoxHandler for F
where
    F: Fn(&mut Parser<'_>) -> Result<()> + Send + Sync,
{
    fn parse(&self, ps: &mut Parser<'_>) -> Result<()> {
        self(ps)
    }
}

/// Registry of handlers keyed by `BoxKey` (4CC or UUID).
///
/// The registry is immutable once constructed; use [`Registry::with_handler`]
/// to build it fluently.
pub struct Registry {
    map: HashMap<BoxKey, HandlerEntry>,
}

pub struct HandlerEntry {
    inner: Box<dyn BoxHandler>,
    name: String,
}

impl HandlerEntry {
    /// Human readable name, used only for logging.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parse(&self, ps: &mut Parser<'_>) -> Result<()> {
        self.inner.parse(ps)
    }
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Return a new registry with the given handler added, replacing any
    /// handler already bound to `key`.
    pub fn with_handler(mut self, key: BoxKey, name: &str, handler: Box<dyn BoxHandler>) -> Self {
        self.map.insert(
            key,
            HandlerEntry {
                inner: handler,
                name: name.to_string(),
            },
        );
        self
    }

    pub fn get(&self, key: &BoxKey) -> Option<&HandlerEntry> {
        self.map.get(key)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn cc(code: &[u8; 4]) -> BoxKey {
    BoxKey::FourCC(FourCC(*code))
}

/// Every box type the dissector knows how to decode.
pub fn default_registry() -> Registry {
    let handlers: &[(&[u8; 4], fn(&mut Parser<'_>) -> Result<()>)] = &[
        // file and structure
        (b"ftyp", header::ftyp),
        (b"styp", header::ftyp),
        (b"free", header::free),
        (b"skip", header::free),
        (b"wide", header::free),
        (b"meta", header::meta),
        (b"trak", header::trak),
        (b"mdia", header::mdia),
        (b"hdlr", header::hdlr),
        (b"dref", header::dref),
        (b"url ", header::url),
        (b"urn ", header::urn),
        (b"ID32", header::id32),
        // headers
        (b"mvhd", header::mvhd),
        (b"tkhd", header::tkhd),
        (b"mdhd", header::mdhd),
        (b"mehd", header::mehd),
        (b"smhd", header::smhd),
        (b"vmhd", header::vmhd),
        (b"mfhd", header::mfhd),
        (b"trex", header::trex),
        (b"tfhd", header::tfhd),
        (b"tfdt", header::tfdt),
        // sample description
        (b"stsd", sample_entry::stsd),
        (b"btrt", sample_entry::btrt),
        (b"pasp", sample_entry::pasp),
        (b"clap", sample_entry::clap),
        (b"colr", sample_entry::colr),
        // tables
        (b"elst", tables::elst),
        (b"sidx", tables::sidx),
        (b"stts", tables::stts),
        (b"ctts", tables::ctts),
        (b"stsc", tables::stsc),
        (b"stsz", tables::stsz),
        (b"stco", tables::stco),
        (b"co64", tables::co64),
        (b"stss", tables::stss),
        (b"sbgp", tables::sbgp),
        (b"sgpd", tables::sgpd),
        (b"saiz", tables::saiz),
        (b"saio", tables::saio),
        (b"trun", tables::trun),
        // codec configuration
        (b"avcC", codec::avcc),
        (b"svcC", codec::svcc),
        (b"hvcC", codec::hvcc),
        (b"av1C", codec::av1c),
        (b"av1f", codec::av1f),
        (b"dOps", codec::dops),
        (b"esds", codec::esds),
        (b"iods", codec::iods),
        (b"m4ds", codec::m4ds),
        // protection
        (b"frma", protection::frma),
        (b"schm", protection::schm),
        (b"tenc", protection::tenc),
        (b"pssh", protection::pssh),
        // QuickTime metadata
        (b"ilst", metadata::ilst),
        (b"data", metadata::data),
    ];

    handlers.iter().fold(Registry::new(), |reg, &(code, f)| {
        let name = String::from_utf8_lossy(code);
        reg.with_handler(cc(code), &name, Box::new(f))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_covers_core_boxes() {
        let reg = default_registry();
        for code in [b"ftyp", b"stsd", b"esds", b"trun", b"url "] {
            assert!(reg.get(&cc(code)).is_some(), "{}", String::from_utf8_lossy(code));
        }
        assert!(reg.get(&cc(b"moov")).is_none());
        assert_eq!(reg.get(&cc(b"iods")).map(HandlerEntry::name), Some("iods"));
    }
}
