use std::fmt;

/// Four-character box type code.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// Printable as Latin-1 (QuickTime metadata uses `©` in item types).
    pub fn is_printable(&self) -> bool {
        self.0
            .iter()
            .all(|&c| (0x20..=0x7e).contains(&c) || c >= 0xa0)
    }

    pub fn as_str_lossy(&self) -> String {
        self.0
            .iter()
            .map(|&c| {
                if (0x20..=0x7e).contains(&c) || c >= 0xa0 {
                    c as char
                } else {
                    '.'
                }
            })
            .collect()
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str_lossy())
    }
}
impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str_lossy())
    }
}

/// 16-byte extended type, displayed in the usual 8-4-4-4-12 grouping.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Uuid(pub [u8; 16]);

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{}-{}-{}-{}-{}",
            hex::encode(&b[0..4]),
            hex::encode(&b[4..6]),
            hex::encode(&b[6..8]),
            hex::encode(&b[8..10]),
            hex::encode(&b[10..16])
        )
    }
}
impl fmt::Debug for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// Effective type of a box: its 4CC, or the extended type of a `uuid` box.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BoxKey {
    FourCC(FourCC),
    Uuid(Uuid),
}

impl fmt::Display for BoxKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoxKey::FourCC(cc) => write!(f, "{cc}"),
            BoxKey::Uuid(u) => write!(f, "{u}"),
        }
    }
}

impl From<FourCC> for BoxKey {
    fn from(cc: FourCC) -> Self {
        BoxKey::FourCC(cc)
    }
}

impl From<Uuid> for BoxKey {
    fn from(u: Uuid) -> Self {
        BoxKey::Uuid(u)
    }
}

/// How the length of a box was encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeKind {
    /// Plain 32-bit length.
    Compact,
    /// 32-bit length was `1`, a 64-bit largesize follows the type.
    Large,
    /// 32-bit length was `0`: box runs to the end of its container.
    ToEnd,
}

#[derive(Debug, Clone)]
pub struct BoxHeader {
    pub size: u64,          // total size including header, `ToEnd` already resolved
    pub typ: FourCC,        // 4CC or b"uuid"
    pub uuid: Option<Uuid>,
    pub header_size: u64,   // 8, 16, 24 or 32
    pub start: u64,         // file offset of header start
    pub size_kind: SizeKind,
}

impl BoxHeader {
    pub fn key(&self) -> BoxKey {
        match self.uuid {
            Some(u) => BoxKey::Uuid(u),
            None => BoxKey::FourCC(self.typ),
        }
    }

    pub fn body_start(&self) -> u64 {
        self.start + self.header_size
    }

    pub fn body_len(&self) -> u64 {
        self.size - self.header_size
    }

    pub fn end(&self) -> u64 {
        self.start + self.size
    }
}
