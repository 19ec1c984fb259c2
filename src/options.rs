use serde::{Deserialize, Serialize};

/// Display configuration, fixed before dissection starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Bytes per hex dump line.
    pub bytes_per_line: usize,
    /// Maximum lines shown for tables, lists and hex dumps (0 hides dumps).
    pub max_rows: usize,
    pub show_offsets: bool,
    pub show_lengths: bool,
    /// Show meanings of numerical values and box class names.
    pub show_descriptions: bool,
    /// Show fields even when they hold their default value.
    pub show_defaults: bool,
    pub colorize: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            indent: 4,
            bytes_per_line: 16,
            max_rows: 7,
            show_offsets: true,
            show_lengths: true,
            show_descriptions: true,
            show_defaults: false,
            colorize: false,
        }
    }
}

impl Options {
    /// Maximum bytes shown by a single hex dump.
    pub fn max_dump(&self) -> usize {
        self.bytes_per_line.saturating_mul(self.max_rows)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let o = Options::from_json(r#"{ "max_rows": 2, "show_defaults": true }"#).unwrap();
        assert_eq!(o.max_rows, 2);
        assert!(o.show_defaults);
        assert_eq!(o.indent, 4);
        assert_eq!(o.max_dump(), 32);
    }

    #[test]
    fn max_dump_saturates() {
        let o = Options {
            bytes_per_line: usize::MAX,
            max_rows: 4,
            ..Options::default()
        };
        assert_eq!(o.max_dump(), usize::MAX);
    }
}
