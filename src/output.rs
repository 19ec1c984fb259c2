use std::cell::RefCell;
use std::io::{self, Write};

enum Sink {
    Stdout(io::Stdout),
    Buffer(Vec<u8>),
}

/// Line-oriented destination for the report.
///
/// Shared by reference between every node of one dissection; the
/// `RefCell` is only ever borrowed for the duration of a single line.
pub struct Output {
    sink: RefCell<Sink>,
}

impl Output {
    pub fn stdout() -> Self {
        Self {
            sink: RefCell::new(Sink::Stdout(io::stdout())),
        }
    }

    pub fn buffer() -> Self {
        Self {
            sink: RefCell::new(Sink::Buffer(Vec::new())),
        }
    }

    pub fn line(&self, text: &str) -> io::Result<()> {
        match &mut *self.sink.borrow_mut() {
            Sink::Stdout(out) => writeln!(out.lock(), "{text}"),
            Sink::Buffer(buf) => writeln!(buf, "{text}"),
        }
    }

    /// Drain what has been written to a buffer sink (empty for stdout).
    pub fn take_string(&self) -> String {
        match &mut *self.sink.borrow_mut() {
            Sink::Stdout(_) => String::new(),
            Sink::Buffer(buf) => String::from_utf8_lossy(&std::mem::take(buf)).into_owned(),
        }
    }
}
