use crate::boxes::BoxHeader;
use crate::descriptors::DescriptorRegistry;
use crate::error::{RegistryError, Result};
use crate::node::Parser;
use crate::options::Options;
use crate::output::Output;
use crate::parser::{parse_contents, walk_boxes};
use crate::registry::{Registry, default_registry};
use log::info;
use std::path::Path;

/// Everything a dissection needs, fixed before it starts: display options,
/// box handlers, descriptor namespaces and the output sink.
pub struct Dissector {
    options: Options,
    registry: Registry,
    descriptors: DescriptorRegistry,
    out: Output,
}

impl Dissector {
    /// Dissector with the default handlers, writing to stdout.
    pub fn new(options: Options) -> std::result::Result<Self, RegistryError> {
        Self::with_output(options, Output::stdout())
    }

    pub fn with_output(options: Options, out: Output) -> std::result::Result<Self, RegistryError> {
        Ok(Self {
            options,
            registry: default_registry(),
            descriptors: DescriptorRegistry::standard()?,
            out,
        })
    }

    /// Replace the box handler registry.
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the descriptor namespaces.
    pub fn with_descriptors(mut self, descriptors: DescriptorRegistry) -> Self {
        self.descriptors = descriptors;
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn output(&self) -> &Output {
        &self.out
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn descriptors(&self) -> &DescriptorRegistry {
        &self.descriptors
    }

    /// Dissect a whole buffer as a top-level box sequence.
    ///
    /// Never fails on malformed input: a framing error at the top level is
    /// reported like any other and the rest of the buffer is dumped. Returns
    /// the top-level boxes that were framed successfully.
    pub fn dissect(&self, data: &[u8]) -> Result<Vec<BoxHeader>> {
        let mut ps = Parser::new(data, 0, self);
        let mut boxes = Vec::new();
        ps.handle_errors(|ps| walk_boxes(ps, &mut boxes, &mut parse_contents))?;
        info!("dissected {} bytes, {} top-level boxes", data.len(), boxes.len());
        Ok(boxes)
    }

    pub fn dissect_file(&self, path: impl AsRef<Path>) -> Result<Vec<BoxHeader>> {
        let data = std::fs::read(path)?;
        self.dissect(&data)
    }
}
