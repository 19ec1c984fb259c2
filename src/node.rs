use crate::bits::BitReader;
use crate::boxes::FourCC;
use crate::cursor::ByteCursor;
use crate::dissector::Dissector;
use crate::error::{ParseError, Result};
use crate::options::Options;
use crate::util::{Style, hex_dump};
use log::{debug, warn};
use std::fmt::Display;
use std::ops::{Deref, DerefMut};

/// Order-dependent state shared by sibling boxes of one track.
///
/// Set by `mdia` from its direct `hdlr` child and inherited downward only,
/// so it reaches the sample entries under `minf/stbl/stsd`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackContext {
    pub handler_type: Option<FourCC>,
}

/// One node of the dissection: a byte cursor plus everything needed to
/// report on it (depth, options, output sink, track context).
///
/// Dereferences to its [`ByteCursor`], so handlers read with `ps.u32()?`.
pub struct Parser<'a> {
    cursor: ByteCursor<'a>,
    depth: usize,
    dx: &'a Dissector,
    pub track: TrackContext,
}

impl<'a> Deref for Parser<'a> {
    type Target = ByteCursor<'a>;
    fn deref(&self) -> &Self::Target {
        &self.cursor
    }
}

impl DerefMut for Parser<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.cursor
    }
}

impl<'a> Parser<'a> {
    pub fn new(data: &'a [u8], base: u64, dx: &'a Dissector) -> Self {
        Self {
            cursor: ByteCursor::at(data, base),
            depth: 0,
            dx,
            track: TrackContext::default(),
        }
    }

    pub fn dissector(&self) -> &'a Dissector {
        self.dx
    }

    pub fn options(&self) -> &'a Options {
        self.dx.options()
    }

    pub fn style(&self) -> Style {
        Style {
            enabled: self.options().colorize,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn prefix(&self) -> String {
        " ".repeat(self.depth * self.options().indent)
    }

    pub fn print(&self, text: impl AsRef<str>) -> Result<()> {
        let line = format!("{}{}", self.prefix(), text.as_ref());
        self.dx.output().line(&line)?;
        Ok(())
    }

    /// Raw bytes as an owned string, replacing invalid UTF-8.
    pub fn string(&mut self) -> Result<String> {
        Ok(String::from_utf8_lossy(self.cursor.cstring()?).into_owned())
    }

    // ---------- field emission ----------

    fn emit(&self, name: &str, rendered: String, description: Option<String>) -> Result<()> {
        let mut line = format!("{name} = {rendered}");
        if let Some(d) = description.filter(|_| self.options().show_descriptions) {
            line.push_str(&format!(" {}", self.style().dim(&format!("({d})"))));
        }
        self.print(line)
    }

    pub fn field(&self, name: &str, value: impl Display) -> Result<()> {
        self.emit(name, value.to_string(), None)
    }

    /// Emitted only when `value` differs from `default` (or defaults are shown).
    pub fn field_default<T: Display + PartialEq>(&self, name: &str, value: T, default: T) -> Result<()> {
        if value == default && !self.options().show_defaults {
            return Ok(());
        }
        self.emit(name, value.to_string(), None)
    }

    /// Field with a human readable annotation of its value.
    pub fn field_desc(&self, name: &str, value: impl Display, description: Option<String>) -> Result<()> {
        self.emit(name, value.to_string(), description)
    }

    /// [`Parser::field_default`] with an annotation.
    pub fn field_default_desc<T: Display + PartialEq>(
        &self,
        name: &str,
        value: T,
        default: T,
        description: Option<String>,
    ) -> Result<()> {
        if value == default && !self.options().show_defaults {
            return Ok(());
        }
        self.emit(name, value.to_string(), description)
    }

    /// [`Parser::field_default`] for values rendered by `render` (dates,
    /// sizes, matrices).
    pub fn field_default_as<T: PartialEq>(
        &self,
        name: &str,
        value: T,
        default: T,
        render: impl FnOnce(&T) -> String,
    ) -> Result<()> {
        if value == default && !self.options().show_defaults {
            return Ok(());
        }
        self.emit(name, render(&value), None)
    }

    // ---------- reserved fields ----------

    /// Soft check: a mismatch is reported, never raised.
    pub fn reserved<T: Display + PartialEq>(&self, name: &str, value: T, expected: T) -> Result<()> {
        if value == expected {
            return Ok(());
        }
        self.reserved_violation(name, &value.to_string(), &expected.to_string())
    }

    /// Soft check that a reserved region is all zero.
    pub fn reserved_zero(&self, name: &str, bytes: &[u8]) -> Result<()> {
        if bytes.iter().all(|&b| b == 0) {
            return Ok(());
        }
        self.reserved_violation(name, &hex::encode(bytes), "zero")
    }

    fn reserved_violation(&self, name: &str, value: &str, expected: &str) -> Result<()> {
        self.warning(&format!("reserved field {name} = {value} (expected {expected})"))
    }

    /// Non-fatal anomaly: logged, and shown inline in the report.
    pub fn warning(&self, message: &str) -> Result<()> {
        warn!("{message} (at {:#x})", self.offset());
        let style = self.style();
        self.print(format!(
            "{} {}",
            style.bold(&style.yellow("WARNING:")),
            style.yellow(message)
        ))
    }

    // ---------- dumps and tables ----------

    pub fn hexdump(&self, bytes: &[u8]) -> Result<()> {
        if self.options().max_dump() == 0 {
            return Ok(());
        }
        for line in hex_dump(bytes, self.options()) {
            self.print(line)?;
        }
        Ok(())
    }

    /// Consume whatever is left in this scope and hex dump it.
    pub fn dump_rest(&mut self) -> Result<()> {
        let rest = self.cursor.read_rest();
        if rest.is_empty() {
            return Ok(());
        }
        self.hexdump(rest)
    }

    /// Table row, shown only within the first `max_rows` entries. `text`
    /// is not evaluated for rows past the limit.
    pub fn row(&self, index: u64, text: impl FnOnce() -> String) -> Result<()> {
        if index < self.options().max_rows as u64 {
            self.print(text())?;
        }
        Ok(())
    }

    pub fn rows_end(&self, count: u64) -> Result<()> {
        if count > self.options().max_rows as u64 {
            self.print("...")?;
        }
        Ok(())
    }

    // ---------- scopes ----------

    fn scoped<T>(
        &mut self,
        n: usize,
        depth: usize,
        f: impl FnOnce(&mut Parser<'a>) -> Result<T>,
    ) -> Result<T> {
        let cursor = self.cursor.split(n)?;
        let mut child = Parser {
            cursor,
            depth,
            dx: self.dx,
            track: self.track,
        };
        let out = f(&mut child)?;
        child.cursor.expect_end()?;
        Ok(out)
    }

    /// Bounded view over the next `n` bytes at the same depth. While it is
    /// open this node cannot be read; it must be fully consumed by `f`.
    pub fn subparser<T>(&mut self, n: usize, f: impl FnOnce(&mut Parser<'a>) -> Result<T>) -> Result<T> {
        self.scoped(n, self.depth, f)
    }

    /// Bounded view one level deeper, as used for box and descriptor bodies.
    pub fn nested<T>(&mut self, n: usize, f: impl FnOnce(&mut Parser<'a>) -> Result<T>) -> Result<T> {
        self.scoped(n, self.depth + 1, f)
    }

    /// Indent output by one level without opening a new byte scope.
    pub fn in_object<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }

    /// Bit-granular scope over the next `n` bytes; every bit must be read.
    pub fn bits<T>(
        &mut self,
        n: usize,
        f: impl FnOnce(&mut Self, &mut BitReader<'a>) -> Result<T>,
    ) -> Result<T> {
        let mut br = BitReader::new(self.cursor.read(n)?);
        let out = f(self, &mut br)?;
        br.finish()?;
        Ok(out)
    }

    /// Run `f` with a fresh track context, restoring the current one after.
    pub fn isolate_track<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let outer = std::mem::take(&mut self.track);
        let out = f(self);
        self.track = outer;
        out
    }

    /// Recovery boundary.
    ///
    /// Any error raised by `f` is rendered as one error line plus a hex dump
    /// of what `f` left unread, and the scope is then treated as consumed.
    /// Only output failures escape.
    pub fn handle_errors(&mut self, f: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
        match f(self) {
            Ok(()) => Ok(()),
            Err(e @ ParseError::Io(_)) => Err(e),
            Err(e) => {
                warn!("recovered at {:#x}: {e}", self.offset());
                debug!("{} bytes left unparsed", self.remaining());
                let style = self.style();
                self.print(format!(
                    "{} {}",
                    style.bold(&style.red("ERROR:")),
                    style.red(&e.to_string())
                ))?;
                self.dump_rest()
            }
        }
    }
}
