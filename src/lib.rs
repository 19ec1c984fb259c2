pub mod bits;
pub mod boxes;
pub mod cursor;
pub mod descriptors;
pub mod dissector;
pub mod error;
pub mod fullbox;
pub mod handlers;
pub mod known_boxes;
pub mod languages;
pub mod node;
pub mod options;
pub mod output;
pub mod parser;
pub mod registry;
pub mod util;

pub use boxes::{BoxHeader, BoxKey, FourCC, SizeKind, Uuid};
pub use cursor::ByteCursor;
pub use descriptors::{DescriptorRegistry, Namespace, parse_descriptor, parse_descriptors};
pub use dissector::Dissector;
pub use error::{ParseError, RegistryError, Result};
pub use node::{Parser, TrackContext};
pub use options::Options;
pub use output::Output;
pub use parser::{parse_boxes, read_box_header};
pub use registry::{BoxHandler, Registry, default_registry};
