//! MPEG-4 Systems (ISO/IEC 14496-1) descriptors.
//!
//! Descriptors are framed independently of boxes: a tag byte, then a size
//! in 7-bit groups with a continuation bit. Tags map to classes within a
//! namespace, and classes form a single-inheritance tree whose handlers
//! parse the body.

use crate::error::{ParseError, RegistryError, Result};
use crate::node::Parser;
use crate::util::mask;
use log::{debug, trace};
use std::collections::HashMap;
use std::ops::Range;

pub const DEFAULT: &str = "default";
pub const COMMAND: &str = "command";
pub const QOS: &str = "QoS";
pub const IPMP: &str = "IPMP";

/// Parses the fields a descriptor class adds to its base class.
pub type DescriptorFn = fn(&mut Parser<'_>) -> Result<()>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    pub name: String,
    pub tag: Option<u8>,
    pub base: Option<String>,
}

/// Unvalidated namespace definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub name: String,
    pub classes: Vec<ClassDef>,
    /// Unmatched tags in a range resolve to the named class.
    pub ranges: Vec<(Range<u8>, String)>,
    /// Unassigned tags from here on are user private, below it reserved.
    pub user_private: Option<u8>,
}

impl Namespace {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            classes: Vec::new(),
            ranges: Vec::new(),
            user_private: None,
        }
    }

    /// Add the class with no base.
    pub fn root(self, name: &str) -> Self {
        self.push(name, None, None)
    }

    /// Add an abstract class (no tag).
    pub fn base(self, name: &str, base: &str) -> Self {
        self.push(name, None, Some(base))
    }

    pub fn class(self, tag: u8, name: &str, base: &str) -> Self {
        self.push(name, Some(tag), Some(base))
    }

    pub fn range(mut self, tags: Range<u8>, class: &str) -> Self {
        self.ranges.push((tags, class.to_string()));
        self
    }

    pub fn user_private(mut self, from: u8) -> Self {
        self.user_private = Some(from);
        self
    }

    fn push(mut self, name: &str, tag: Option<u8>, base: Option<&str>) -> Self {
        self.classes.push(ClassDef {
            name: name.to_string(),
            tag,
            base: base.map(str::to_string),
        });
        self
    }
}

#[derive(Debug)]
struct Class {
    name: String,
    base: Option<usize>,
    handler: Option<DescriptorFn>,
}

#[derive(Debug)]
struct ResolvedNamespace {
    tags: HashMap<u8, usize>,
    ranges: Vec<(Range<u8>, usize)>,
    user_private: Option<u8>,
}

/// Validated descriptor namespaces with their bound handlers.
#[derive(Debug)]
pub struct DescriptorRegistry {
    classes: Vec<Class>,
    namespaces: HashMap<String, ResolvedNamespace>,
}

/// A tag resolved within a namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// `reserved for ISO use` / `user private` for unassigned tags.
    pub label: Option<&'static str>,
    /// Class chain, most specific first.
    pub chain: Vec<usize>,
}

impl DescriptorRegistry {
    /// Validate `namespaces` and bind `handlers` (class name, parser).
    pub fn new(
        namespaces: Vec<Namespace>,
        handlers: &[(&str, DescriptorFn)],
    ) -> std::result::Result<Self, RegistryError> {
        let mut classes = Vec::new();
        let mut by_name: HashMap<String, (usize, usize)> = HashMap::new();
        for (ns_idx, ns) in namespaces.iter().enumerate() {
            for def in &ns.classes {
                if by_name.insert(def.name.clone(), (ns_idx, classes.len())).is_some() {
                    return Err(RegistryError::DuplicateClass(def.name.clone()));
                }
                classes.push(Class {
                    name: def.name.clone(),
                    base: None,
                    handler: None,
                });
            }
        }

        let mut resolved = HashMap::new();
        for (ns_idx, ns) in namespaces.iter().enumerate() {
            let roots = ns.classes.iter().filter(|c| c.base.is_none()).count();
            if roots != 1 {
                return Err(RegistryError::RootCount {
                    namespace: ns.name.clone(),
                    found: roots,
                });
            }

            let mut tags = HashMap::new();
            for def in &ns.classes {
                let idx = by_name[&def.name].1;
                if let Some(tag) = def.tag {
                    if tags.insert(tag, idx).is_some() {
                        return Err(RegistryError::DuplicateTag {
                            namespace: ns.name.clone(),
                            tag,
                        });
                    }
                }
                if let Some(base) = &def.base {
                    match by_name.get(base) {
                        Some(&(owner, base_idx)) if owner == ns_idx => classes[idx].base = Some(base_idx),
                        _ => {
                            return Err(RegistryError::UnknownBase {
                                namespace: ns.name.clone(),
                                base: base.clone(),
                            });
                        }
                    }
                }
            }

            let mut ranges = Vec::new();
            for (tags, class) in &ns.ranges {
                match by_name.get(class) {
                    Some(&(owner, idx)) if owner == ns_idx => ranges.push((tags.clone(), idx)),
                    _ => {
                        return Err(RegistryError::InvalidRange {
                            namespace: ns.name.clone(),
                            class: class.clone(),
                        });
                    }
                }
            }

            resolved.insert(
                ns.name.clone(),
                ResolvedNamespace {
                    tags,
                    ranges,
                    user_private: ns.user_private,
                },
            );
        }

        // with bases resolved, any walk longer than the class count loops
        for ns in &namespaces {
            for def in &ns.classes {
                let mut k = by_name[&def.name].1;
                let mut steps = 0;
                while let Some(base) = classes[k].base {
                    steps += 1;
                    if steps > classes.len() {
                        return Err(RegistryError::Cycle {
                            namespace: ns.name.clone(),
                            class: def.name.clone(),
                        });
                    }
                    k = base;
                }
            }
        }

        for &(name, f) in handlers {
            match by_name.get(name) {
                Some(&(_, idx)) => classes[idx].handler = Some(f),
                None => return Err(RegistryError::UnknownHandler(name.to_string())),
            }
        }

        Ok(Self {
            classes,
            namespaces: resolved,
        })
    }

    /// The ISO/IEC 14496-1 namespaces with the built-in handlers.
    pub fn standard() -> std::result::Result<Self, RegistryError> {
        Self::new(standard_namespaces(), STANDARD_HANDLERS)
    }

    pub fn class_name(&self, idx: usize) -> &str {
        &self.classes[idx].name
    }

    fn chain(&self, mut idx: usize) -> Vec<usize> {
        let mut out = vec![idx];
        while let Some(base) = self.classes[idx].base {
            out.push(base);
            idx = base;
        }
        out
    }

    /// Resolve `tag`: exact match, else reserved/user-private label plus the
    /// fallback range class, if any.
    pub fn resolve(&self, namespace: &str, tag: u8) -> Result<Resolution> {
        let ns = self
            .namespaces
            .get(namespace)
            .ok_or_else(|| ParseError::Unsupported(format!("descriptor namespace {namespace}")))?;
        if let Some(&idx) = ns.tags.get(&tag) {
            return Ok(Resolution {
                label: None,
                chain: self.chain(idx),
            });
        }
        let label = match ns.user_private {
            Some(from) if tag >= from => "user private",
            _ => "reserved for ISO use",
        };
        let chain = ns
            .ranges
            .iter()
            .find(|(r, _)| r.contains(&tag))
            .map(|&(_, idx)| self.chain(idx))
            .unwrap_or_default();
        Ok(Resolution {
            label: Some(label),
            chain,
        })
    }

    /// Handlers to run for `chain`, most specific first.
    ///
    /// Leading classes without a handler are skipped; the walk then stops at
    /// the first ancestor that has none.
    fn handlers(&self, chain: &[usize]) -> Vec<DescriptorFn> {
        chain
            .iter()
            .map(|&i| self.classes[i].handler)
            .skip_while(Option::is_none)
            .map_while(|h| h)
            .collect()
    }
}

/// Number of size bytes a minimal encoding of `size` takes.
fn minimal_size_bytes(size: u64) -> usize {
    let bits = (u64::BITS - size.leading_zeros()) as usize;
    bits.div_ceil(7).max(1)
}

/// Read the variable length size field, returning the size and the number
/// of bytes it was encoded in.
fn read_size(ps: &mut Parser<'_>) -> Result<(u64, usize)> {
    let mut size = 0u64;
    let mut n_bytes = 0;
    loop {
        let more = ps.bits(1, |_, br| {
            let more = br.bit()?;
            size = (size << 7) | br.read(7)?;
            Ok(more)
        })?;
        n_bytes += 1;
        if size > mask(32) {
            return Err(ParseError::InvalidFraming(format!(
                "descriptor size exceeds 32 bits after {n_bytes} bytes"
            )));
        }
        if !more {
            return Ok((size, n_bytes));
        }
    }
}

/// Parse one descriptor in `namespace`.
///
/// `expected` is the tag the enclosing syntax calls for; a different tag is
/// reported but still parsed.
pub fn parse_descriptor(ps: &mut Parser<'_>, expected: Option<u8>, namespace: &str) -> Result<()> {
    let registry = ps.dissector().descriptors();
    let start = ps.offset();
    let tag = ps.u8()?;
    if tag == 0x00 || tag == 0xFF {
        return Err(ParseError::InvalidFraming(format!("forbidden descriptor tag {tag:#04x}")));
    }
    let (size, n_bytes) = read_size(ps)?;
    trace!("descriptor {tag:#04x} at {start:#x}: size {size} in {n_bytes} bytes");
    let resolution = registry.resolve(namespace, tag)?;

    let opts = ps.options();
    let style = ps.style();
    let mut line = style.bold(&format!("[{tag:#04x}]"));
    if opts.show_descriptions {
        let mut labels: Vec<String> = resolution.label.iter().map(|l| style.blue(l)).collect();
        labels.extend(resolution.chain.iter().map(|&i| style.bold(registry.class_name(i))));
        if !labels.is_empty() {
            line.push(' ');
            line.push_str(&labels.join(" -> "));
        }
    }
    if opts.show_offsets {
        line.push_str(&format!(" {start:#x}"));
    }
    if opts.show_lengths {
        line.push_str(&format!(" ({size})"));
    }
    if n_bytes > minimal_size_bytes(size) {
        line.push_str(&style.blue(&format!(" ({n_bytes} length bytes)")));
    }
    ps.print(line)?;

    if let Some(expected) = expected.filter(|&e| e != tag) {
        ps.warning(&format!("expected descriptor tag {expected:#04x}, found {tag:#04x}"))?;
    }

    let size = usize::try_from(size).map_err(|_| ParseError::invalid("descriptor size", size))?;
    let handlers = registry.handlers(&resolution.chain);
    debug!("descriptor {tag:#04x}: {} handlers", handlers.len());
    ps.nested(size, |d| {
        d.handle_errors(|d| {
            for handler in handlers {
                handler(d)?;
            }
            d.dump_rest()
        })
    })
}

/// Parse descriptors until the node is exhausted.
pub fn parse_descriptors(ps: &mut Parser<'_>, namespace: &str) -> Result<()> {
    while !ps.is_empty() {
        parse_descriptor(ps, None, namespace)?;
    }
    Ok(())
}

// ---------- tables ----------

/// The namespaces of ISO/IEC 14496-1 (2010), plus the 14496-14 additions.
pub fn standard_namespaces() -> Vec<Namespace> {
    let default = Namespace::new(DEFAULT)
        .root("BaseDescriptor")
        .class(0x03, "ES_Descriptor", "BaseDescriptor")
        .class(0x05, "DecoderSpecificInfo", "BaseDescriptor")
        .class(0x04, "DecoderConfigDescriptor", "BaseDescriptor")
        .class(0x09, "IPI_DescrPointer", "BaseDescriptor")
        .class(0x0a, "IPMP_DescriptorPointer", "BaseDescriptor")
        .class(0x0b, "IPMP_Descriptor", "BaseDescriptor")
        .class(0x60, "IPMP_ToolListDescriptor", "BaseDescriptor")
        .class(0x61, "IPMP_Tool", "BaseDescriptor")
        .class(0x0c, "QoS_Descriptor", "BaseDescriptor")
        .class(0x0d, "RegistrationDescriptor", "BaseDescriptor")
        .base("ObjectDescriptorBase", "BaseDescriptor")
        .class(0x01, "ObjectDescriptor", "ObjectDescriptorBase")
        .class(0x02, "InitialObjectDescriptor", "ObjectDescriptorBase")
        .base("IP_IdentificationDataSet", "BaseDescriptor")
        .class(0x07, "ContentIdentificationDescriptor", "IP_IdentificationDataSet")
        .class(0x08, "SupplementaryContentIdentificationDescriptor", "IP_IdentificationDataSet")
        .base("OCI_Descriptor", "BaseDescriptor")
        .class(0x40, "ContentClassificationDescriptor", "OCI_Descriptor")
        .class(0x41, "KeyWordDescriptor", "OCI_Descriptor")
        .class(0x42, "RatingDescriptor", "OCI_Descriptor")
        .class(0x43, "LanguageDescriptor", "OCI_Descriptor")
        .class(0x44, "ShortTextualDescriptor", "OCI_Descriptor")
        .class(0x45, "ExpandedTextualDescriptor", "OCI_Descriptor")
        .class(0x46, "ContentCreatorNameDescriptor", "OCI_Descriptor")
        .class(0x47, "ContentCreationDateDescriptor", "OCI_Descriptor")
        .class(0x48, "OCICreatorNameDescriptor", "OCI_Descriptor")
        .class(0x49, "OCICreationDateDescriptor", "OCI_Descriptor")
        .class(0x4a, "SmpteCameraPositionDescriptor", "OCI_Descriptor")
        .class(0x4b, "SegmentDescriptor", "OCI_Descriptor")
        .class(0x4c, "MediaTimeDescriptor", "OCI_Descriptor")
        .base("ExtensionDescriptor", "BaseDescriptor")
        .class(0x13, "ExtensionProfileLevelDescriptor", "ExtensionDescriptor")
        .class(0x14, "ProfileLevelIndicationIndexDescriptor", "BaseDescriptor")
        .class(0x06, "SLConfigDescriptor", "BaseDescriptor")
        .class(0x64, "ExtendedSLConfigDescriptor", "SLConfigDescriptor")
        // no base class in 14496-1 itself
        .base("SLExtensionDescriptor", "BaseDescriptor")
        .class(0x67, "DependencyPointer", "SLExtensionDescriptor")
        .class(0x68, "MarkerDescriptor", "SLExtensionDescriptor")
        .class(0x69, "M4MuxChannelDescriptor", "BaseDescriptor")
        .class(0x65, "M4MuxBufferSizeDescriptor", "BaseDescriptor")
        .class(0x62, "M4MuxTimingDescriptor", "BaseDescriptor")
        .class(0x63, "M4MuxCodeTableDescriptor", "BaseDescriptor")
        .class(0x66, "M4MuxIdentDescriptor", "BaseDescriptor")
        // ISO/IEC 14496-14; the last two names are not defined formally
        .class(0x0e, "ES_ID_Inc", "BaseDescriptor")
        .class(0x0f, "ES_ID_Ref", "BaseDescriptor")
        .class(0x11, "<MP4ObjectDescriptor>", "ObjectDescriptor")
        .class(0x10, "<MP4InitialObjectDescriptor>", "InitialObjectDescriptor")
        .class(0x12, "<IPL_DescrPointerRef>", "BaseDescriptor")
        .range(0x40..0x60, "OCI_Descriptor")
        .range(0x6A..0xFF, "ExtensionDescriptor")
        .user_private(0xC0);

    let command = Namespace::new(COMMAND)
        .root("BaseCommand")
        .class(0x01, "ObjectDescriptorUpdate", "BaseCommand")
        .class(0x02, "ObjectDescriptorRemove", "BaseCommand")
        .class(0x03, "ES_DescriptorUpdate", "BaseCommand")
        .class(0x04, "ES_DescriptorRemove", "BaseCommand")
        .class(0x05, "IPMP_DescriptorUpdate", "BaseCommand")
        .class(0x06, "IPMP_DescriptorRemove", "BaseCommand")
        .class(0x08, "ObjectDescriptorExecute", "BaseCommand")
        .class(0x07, "<ES_DescriptorRemoveRef>", "ES_DescriptorRemove")
        .user_private(0xC0);

    let qos = Namespace::new(QOS)
        .root("QoS_Qualifier")
        .class(0x01, "QoS_Qualifier_MAX_DELAY", "QoS_Qualifier")
        .class(0x02, "QoS_Qualifier_PREF_MAX_DELAY", "QoS_Qualifier")
        .class(0x03, "QoS_Qualifier_LOSS_PROB", "QoS_Qualifier")
        .class(0x04, "QoS_Qualifier_MAX_GAP_LOSS", "QoS_Qualifier")
        .class(0x41, "QoS_Qualifier_MAX_AU_SIZE", "QoS_Qualifier")
        .class(0x42, "QoS_Qualifier_AVG_AU_SIZE", "QoS_Qualifier")
        .class(0x43, "QoS_Qualifier_MAX_AU_RATE", "QoS_Qualifier")
        .class(0x44, "QoS_Qualifier_REBUFFERING_RATIO", "QoS_Qualifier")
        .user_private(0x80);

    // only the class 14496-1 itself defines; IPMP tool tags resolve as unassigned
    let ipmp = Namespace::new(IPMP)
        .root("IPMP_Data_BaseClass")
        .class(0x10, "IPMP_ParamtericDescription", "IPMP_Data_BaseClass");

    vec![default, command, qos, ipmp]
}

const STANDARD_HANDLERS: &[(&str, DescriptorFn)] = &[
    ("BaseDescriptor", nothing),
    ("ObjectDescriptorBase", nothing),
    ("ExtensionDescriptor", nothing),
    ("OCI_Descriptor", nothing),
    ("IP_IdentificationDataSet", nothing),
    ("QoS_Qualifier", nothing),
    ("BaseCommand", nothing),
    ("ES_Descriptor", es_descriptor),
    ("DecoderConfigDescriptor", decoder_config),
    ("SLConfigDescriptor", sl_config),
    ("ES_ID_Inc", es_id_inc),
    ("ES_ID_Ref", es_id_ref),
    ("QoS_Descriptor", qos_descriptor),
    ("InitialObjectDescriptor", initial_object_descriptor),
];

/// Object type indications, from the MP4RA `oti` registry:
/// (code, full name, common name, withdrawn).
#[rustfmt::skip]
static OBJECT_TYPES: &[(u8, &str, Option<&str>, bool)] = &[
    (0x01, "Systems ISO/IEC 14496-1", None, false),
    (0x02, "Systems ISO/IEC 14496-1", None, false),
    (0x03, "Interaction Stream", None, false),
    (0x04, "Extended BIFS", None, false),
    (0x05, "AFX Stream", None, false),
    (0x06, "Font Data Stream", None, false),
    (0x07, "Synthetised Texture", None, false),
    (0x08, "Text Stream", None, false),
    (0x09, "LASeR Stream", None, false),
    (0x0A, "Simple Aggregation Format (SAF) Stream", None, false),
    (0x20, "Visual ISO/IEC 14496-2", Some("MPEG-4 Video"), false),
    (0x21, "Visual ITU-T Recommendation H.264 | ISO/IEC 14496-10", Some("H.264 / AVC"), false),
    (0x22, "Parameter Sets for ITU-T Recommendation H.264 | ISO/IEC 14496-10", Some("H.264 / AVC (PPS / SPS)"), false),
    (0x23, "Visual ISO/IEC 23008-2 | ITU-T Recommendation H.265", Some("H.265 / HEVC"), false),
    (0x40, "Audio ISO/IEC 14496-3", Some("AAC"), false),
    (0x60, "Visual ISO/IEC 13818-2 Simple Profile", Some("MPEG-2 Video (Simple Profile)"), false),
    (0x61, "Visual ISO/IEC 13818-2 Main Profile", Some("MPEG-2 Video (Main Profile)"), false),
    (0x62, "Visual ISO/IEC 13818-2 SNR Profile", Some("MPEG-2 Video (SNR Profile)"), false),
    (0x63, "Visual ISO/IEC 13818-2 Spatial Profile", Some("MPEG-2 Video (Spatial Profile)"), false),
    (0x64, "Visual ISO/IEC 13818-2 High Profile", Some("MPEG-2 Video (High Profile)"), false),
    (0x65, "Visual ISO/IEC 13818-2 422 Profile", Some("MPEG-2 Video (422 Profile)"), false),
    (0x66, "Audio ISO/IEC 13818-7 Main Profile", Some("MPEG-2 AAC"), false),
    (0x67, "Audio ISO/IEC 13818-7 LowComplexity Profile", Some("MPEG-2 AAC-LC"), false),
    (0x68, "Audio ISO/IEC 13818-7 Scaleable Sampling Rate Profile", Some("MPEG-2 AAC-SSR"), false),
    (0x69, "Audio ISO/IEC 13818-3", Some("MPEG-2 BC Audio"), false),
    (0x6A, "Visual ISO/IEC 11172-2", Some("MPEG-1 Video"), false),
    (0x6B, "Audio ISO/IEC 11172-3", Some("MPEG-1 Audio (usually MP3)"), false),
    (0x6C, "Visual ISO/IEC 10918-1", Some("JPEG"), false),
    (0x6D, "Portable Network Graphics", Some("PNG"), false),
    (0x6E, "Visual ISO/IEC 15444-1 (JPEG 2000)", Some("JPEG 2000"), false),
    (0xA0, "EVRC Voice", None, false),
    (0xA1, "SMV Voice", None, false),
    (0xA2, "3GPP2 Compact Multimedia Format (CMF)", Some("CMF"), false),
    (0xA3, "SMPTE VC-1 Video", None, false),
    (0xA4, "Dirac Video Coder", None, false),
    (0xA5, "AC-3", None, true),
    (0xA6, "Enhanced AC-3", None, true),
    (0xA7, "DRA Audio", None, false),
    (0xA8, "ITU G.719 Audio", None, false),
    (0xA9, "Core Substream", None, false),
    (0xAA, "Core Substream + Extension Substream", None, false),
    (0xAB, "Extension Substream containing only XLL", None, false),
    (0xAC, "Extension Substream containing only LBR", None, false),
    (0xAD, "Opus audio", Some("Opus"), false),
    (0xAE, "AC-4", None, true),
    (0xAF, "Auro-Cx 3D audio", None, false),
    (0xB0, "RealVideo Codec 11", None, false),
    (0xB1, "VP9 Video", Some("VP9"), false),
    (0xB2, "DTS-UHD profile 2", None, false),
    (0xB3, "DTS-UHD profile 3 or higher", None, false),
    (0xE1, "13K Voice", None, false),
];

static STREAM_TYPES: &[(u8, &str)] = &[
    (0x01, "ObjectDescriptorStream"),
    (0x02, "ClockReferenceStream"),
    (0x03, "SceneDescriptionStream"),
    (0x04, "VisualStream"),
    (0x05, "AudioStream"),
    (0x06, "MPEG7Stream"),
    (0x07, "IPMPStream"),
    (0x08, "ObjectContentInfoStream"),
    (0x09, "MPEGJStream"),
    (0x0A, "Interaction Stream"),
    (0x0B, "IPMPToolStream"),
    (0x0C, "FontDataStream"),
    (0x0D, "StreamingText"),
];

fn format_object_type(oti: u8) -> Result<String> {
    if oti == 0x00 {
        return Err(ParseError::invalid("objectTypeIndication", "0x00 (forbidden)"));
    }
    if oti == 0xFF {
        return Ok("no object type specified".to_string());
    }
    Ok(match OBJECT_TYPES.iter().find(|e| e.0 == oti) {
        Some(&(_, name, short, withdrawn)) => {
            let mut d = short.unwrap_or(name).to_string();
            if withdrawn {
                d.push_str(" (withdrawn, unused, do not use)");
            }
            d
        }
        None if oti < 0xC0 => "reserved for ISO use".to_string(),
        None => "user private".to_string(),
    })
}

fn format_stream_type(sti: u8) -> Result<String> {
    if sti == 0x00 {
        return Err(ParseError::invalid("streamType", "0x00 (forbidden)"));
    }
    Ok(match STREAM_TYPES.iter().find(|e| e.0 == sti) {
        Some(&(_, name)) => name.to_string(),
        None if sti < 0x20 => "reserved for ISO use".to_string(),
        None => "user private".to_string(),
    })
}

// ---------- handlers ----------

fn nothing(_: &mut Parser<'_>) -> Result<()> {
    Ok(())
}

fn url_string(ps: &mut Parser<'_>) -> Result<String> {
    let len = ps.u8()? as usize;
    Ok(String::from_utf8_lossy(ps.read(len)?).into_owned())
}

fn es_descriptor(ps: &mut Parser<'_>) -> Result<()> {
    let es_id = ps.u16()?;
    ps.field("ES_ID", es_id)?;
    let (depends, url, ocr) = ps.bits(1, |ps, br| {
        let flags = (br.bit()?, br.bit()?, br.bit()?);
        ps.field("streamPriority", br.read(5)?)?;
        Ok(flags)
    })?;
    if depends {
        let depends_on_es_id = ps.u16()?;
        ps.field("dependsOn_ES_ID", depends_on_es_id)?;
    }
    if url {
        let url = url_string(ps)?;
        ps.field("URL", format!("{url:?}"))?;
    }
    if ocr {
        let ocr_es_id = ps.u16()?;
        ps.field("OCR_ES_ID", ocr_es_id)?;
    }
    parse_descriptors(ps, DEFAULT)
}

fn decoder_config(ps: &mut Parser<'_>) -> Result<()> {
    let oti = ps.u8()?;
    ps.field_desc("objectTypeIndication", format!("{oti:#04x}"), Some(format_object_type(oti)?))?;
    ps.bits(4, |ps, br| {
        let sti = br.read(6)? as u8;
        ps.field_desc("streamType", format!("{sti:#04x}"), Some(format_stream_type(sti)?))?;
        ps.field("upStream", br.bit()?)?;
        ps.reserved("reserved", br.read(1)?, 1)?;
        ps.field("bufferSizeDB", br.read(24)?)
    })?;
    let max_bitrate = ps.u32()?;
    ps.field("maxBitrate", max_bitrate)?;
    let avg_bitrate = ps.u32()?;
    ps.field("avgBitrate", avg_bitrate)?;
    parse_descriptors(ps, DEFAULT)
}

fn describe_sl_predefined(predefined: u8) -> &'static str {
    match predefined {
        0x00 => "Custom",
        0x01 => "null SL packet header",
        0x02 => "Reserved for use in MP4 files",
        _ => "Reserved for ISO use",
    }
}

/// Also reached by ExtendedSLConfigDescriptor, whose SLExtensionDescriptors
/// follow the base fields.
fn sl_config(ps: &mut Parser<'_>) -> Result<()> {
    let predefined = ps.u8()?;
    ps.field_desc("predefined", predefined, Some(describe_sl_predefined(predefined).to_string()))?;
    if predefined == 0 {
        sl_config_custom(ps)?;
    }
    parse_descriptors(ps, DEFAULT)
}

fn sl_config_custom(ps: &mut Parser<'_>) -> Result<()> {
    let (use_timestamps, duration) = ps.bits(1, |ps, br| {
        ps.field("useAccessUnitStartFlag", br.bit()?)?;
        ps.field("useAccessUnitEndFlag", br.bit()?)?;
        ps.field("useRandomAccessPointFlag", br.bit()?)?;
        ps.field("hasRandomAccessUnitsOnlyFlag", br.bit()?)?;
        ps.field("usePaddingFlag", br.bit()?)?;
        let use_timestamps = br.bit()?;
        ps.field("useTimeStampsFlag", use_timestamps)?;
        ps.field("useIdleFlag", br.bit()?)?;
        let duration = br.bit()?;
        ps.field("durationFlag", duration)?;
        Ok((use_timestamps, duration))
    })?;
    let time_stamp_resolution = ps.u32()?;
    ps.field("timeStampResolution", time_stamp_resolution)?;
    let ocr_resolution = ps.u32()?;
    ps.field("OCRResolution", ocr_resolution)?;

    let limits = [("timeStampLength", 64), ("OCRLength", 64), ("AU_Length", 32)];
    for (name, max) in limits {
        let v = ps.u8()?;
        ps.field(name, v)?;
        if v > max {
            return Err(ParseError::invalid(name, v));
        }
    }
    let instant_bitrate_length = ps.u8()?;
    ps.field("instantBitrateLength", instant_bitrate_length)?;
    ps.bits(2, |ps, br| {
        ps.field("degradationPriorityLength", br.read(4)?)?;
        for name in ["AU_seqNumLength", "packetSeqNumLength"] {
            let v = br.read(5)?;
            ps.field(name, v)?;
            if v > 16 {
                return Err(ParseError::invalid(name, v));
            }
        }
        ps.reserved("reserved", br.read(2)?, 0b11)
    })?;
    if duration {
        let time_scale = ps.u32()?;
        ps.field("timeScale", time_scale)?;
        let access_unit_duration = ps.u16()?;
        ps.field("accessUnitDuration", access_unit_duration)?;
        let composition_unit_duration = ps.u16()?;
        ps.field("compositionUnitDuration", composition_unit_duration)?;
    }
    if !use_timestamps {
        return Err(ParseError::Unsupported(
            "startDecodingTimeStamp / startCompositionTimeStamp".to_string(),
        ));
    }
    Ok(())
}

fn es_id_inc(ps: &mut Parser<'_>) -> Result<()> {
    let track_id = ps.u32()?;
    ps.field("Track_ID", track_id)
}

fn es_id_ref(ps: &mut Parser<'_>) -> Result<()> {
    let ref_index = ps.u16()?;
    ps.field("ref_index", ref_index)
}

fn qos_descriptor(ps: &mut Parser<'_>) -> Result<()> {
    let predefined = ps.u8()?;
    let desc = if predefined == 0 { "Custom" } else { "Reserved" };
    ps.field_desc("predefined", predefined, Some(desc.to_string()))?;
    if predefined != 0 {
        return Ok(());
    }
    parse_descriptors(ps, QOS)
}

fn initial_object_descriptor(ps: &mut Parser<'_>) -> Result<()> {
    let url = ps.bits(2, |ps, br| {
        ps.field("ObjectDescriptorID", br.read(10)?)?;
        let url = br.bit()?;
        ps.field("includeInlineProfileLevelFlag", br.bit()?)?;
        ps.reserved("reserved", br.read(4)?, mask(4))?;
        Ok(url)
    })?;
    if url {
        let url = url_string(ps)?;
        ps.field("URLstring", format!("{url:?}"))?;
    } else {
        for name in [
            "ODProfileLevelIndication",
            "sceneProfileLevelIndication",
            "audioProfileLevelIndication",
            "visualProfileLevelIndication",
            "graphicsProfileLevelIndication",
        ] {
            let v = ps.u8()?;
            ps.field(name, v)?;
        }
    }
    parse_descriptors(ps, DEFAULT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_names(reg: &DescriptorRegistry, ns: &str, tag: u8) -> Vec<String> {
        let r = reg.resolve(ns, tag).unwrap();
        r.chain.iter().map(|&i| reg.class_name(i).to_string()).collect()
    }

    #[test]
    fn standard_tables_validate() {
        let reg = DescriptorRegistry::standard().unwrap();
        assert_eq!(chain_names(&reg, DEFAULT, 0x03), ["ES_Descriptor", "BaseDescriptor"]);
        assert_eq!(
            chain_names(&reg, DEFAULT, 0x10),
            ["<MP4InitialObjectDescriptor>", "InitialObjectDescriptor", "ObjectDescriptorBase", "BaseDescriptor"]
        );
    }

    #[test]
    fn unassigned_tags_use_ranges_and_labels() {
        let reg = DescriptorRegistry::standard().unwrap();
        let r = reg.resolve(DEFAULT, 0x50).unwrap();
        assert_eq!(r.label, Some("reserved for ISO use"));
        assert_eq!(reg.class_name(r.chain[0]), "OCI_Descriptor");

        let r = reg.resolve(DEFAULT, 0xD0).unwrap();
        assert_eq!(r.label, Some("user private"));
        assert_eq!(reg.class_name(r.chain[0]), "ExtensionDescriptor");

        let r = reg.resolve(QOS, 0x90).unwrap();
        assert_eq!(r.label, Some("user private"));
        assert!(r.chain.is_empty());

        // IPMP tool tags have no classes of their own
        let r = reg.resolve(IPMP, 0x01).unwrap();
        assert_eq!(r.label, Some("reserved for ISO use"));
        assert!(r.chain.is_empty());
        assert_eq!(chain_names(&reg, IPMP, 0x10), ["IPMP_ParamtericDescription", "IPMP_Data_BaseClass"]);

        assert!(reg.resolve("nope", 1).is_err());
    }

    #[test]
    fn handler_walk_skips_leaf_and_stops_at_gap() {
        let ns = Namespace::new("t").root("Root").class(1, "A", "Root").class(2, "B", "A");
        let reg = DescriptorRegistry::new(vec![ns], &[("A", nothing)]).unwrap();
        let r = reg.resolve("t", 2).unwrap();
        assert_eq!(reg.handlers(&r.chain).len(), 1);
    }

    #[test]
    fn validation_errors() {
        let two_roots = Namespace::new("t").root("R1").root("R2");
        assert_eq!(
            DescriptorRegistry::new(vec![two_roots], &[]).unwrap_err(),
            RegistryError::RootCount { namespace: "t".into(), found: 2 }
        );

        let dup_tag = Namespace::new("t").root("R").class(1, "A", "R").class(1, "B", "R");
        assert_eq!(
            DescriptorRegistry::new(vec![dup_tag], &[]).unwrap_err(),
            RegistryError::DuplicateTag { namespace: "t".into(), tag: 1 }
        );

        let cycle = Namespace::new("t").root("R").base("A", "B").base("B", "A");
        assert!(matches!(
            DescriptorRegistry::new(vec![cycle], &[]).unwrap_err(),
            RegistryError::Cycle { .. }
        ));

        let bad_range = Namespace::new("t").root("R").range(1..5, "Missing");
        assert!(matches!(
            DescriptorRegistry::new(vec![bad_range], &[]).unwrap_err(),
            RegistryError::InvalidRange { .. }
        ));

        let ns = Namespace::new("t").root("R");
        assert_eq!(
            DescriptorRegistry::new(vec![ns], &[("Other", nothing)]).unwrap_err(),
            RegistryError::UnknownHandler("Other".into())
        );

        let a = Namespace::new("a").root("R");
        let b = Namespace::new("b").root("R");
        assert_eq!(
            DescriptorRegistry::new(vec![a, b], &[]).unwrap_err(),
            RegistryError::DuplicateClass("R".into())
        );
    }

    #[test]
    fn minimal_size_encoding() {
        assert_eq!(minimal_size_bytes(0), 1);
        assert_eq!(minimal_size_bytes(127), 1);
        assert_eq!(minimal_size_bytes(128), 2);
        assert_eq!(minimal_size_bytes(mask(28)), 4);
    }
}
