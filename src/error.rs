use crate::boxes::BoxKey;

/// Errors raised while dissecting a node.
///
/// Every variant except [`ParseError::Io`] is local to one node: the nearest
/// recovery boundary renders it as an error line followed by a hex dump of
/// whatever the node left unconsumed, and dissection carries on with the
/// next sibling.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of data: needed {needed} bytes, {available} available")]
    UnexpectedEndOfData { needed: usize, available: usize },

    #[error("invalid framing: {0}")]
    InvalidFraming(String),

    #[error("truncated {typ} box: expected {expected} bytes, got {available}")]
    TruncatedBox {
        typ: BoxKey,
        expected: u64,
        available: u64,
    },

    #[error("unsupported version {version} (max supported: {max})")]
    UnsupportedVersion { version: u8, max: u8 },

    #[error("{remaining} bytes of trailing data")]
    UnconsumedTrailingData { remaining: usize },

    #[error("{bits} bits left unread in bit group")]
    UnconsumedBits { bits: usize },

    #[error("invalid {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("not implemented: {0}")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, ParseError>;

impl ParseError {
    pub(crate) fn invalid(name: &'static str, value: impl std::fmt::Display) -> Self {
        ParseError::InvalidValue {
            name,
            value: value.to_string(),
        }
    }
}

/// Inconsistencies found while validating descriptor namespaces at startup.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate descriptor class {0}")]
    DuplicateClass(String),
    #[error("namespace {namespace}: duplicate tag {tag:#04x}")]
    DuplicateTag { namespace: String, tag: u8 },
    #[error("namespace {namespace} must have exactly 1 root class, found {found}")]
    RootCount { namespace: String, found: usize },
    #[error("namespace {namespace}: base class {base} not defined")]
    UnknownBase { namespace: String, base: String },
    #[error("namespace {namespace}: inheritance cycle through {class}")]
    Cycle { namespace: String, class: String },
    #[error("namespace {namespace}: range class {class} not defined")]
    InvalidRange { namespace: String, class: String },
    #[error("handler bound to undefined descriptor class {0}")]
    UnknownHandler(String),
}
