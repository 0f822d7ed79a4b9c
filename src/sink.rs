//! Output sinks: where finished renders go.

use std::env;
use std::io::{self, IsTerminal, Write};

/// Destination for finished renders.
///
/// A sink receives one complete blob of text per render call and tells the
/// printer whether its destination can display ANSI color. The renderer
/// itself never does I/O mid-traversal; a sink sees either a full render
/// or nothing.
pub trait Sink {
    /// Whether the destination can display ANSI color.
    fn supports_color(&self) -> bool;

    /// Accept a finished blob of rendered text.
    fn write_text(&mut self, text: &str) -> io::Result<()>;
}

/// Sink writing to standard output.
///
/// Color capability is "stdout is a terminal and `NO_COLOR` is unset".
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl StdoutSink {
    /// Create a stdout sink.
    pub fn new() -> Self {
        Self
    }
}

impl Sink for StdoutSink {
    fn supports_color(&self) -> bool {
        io::stdout().is_terminal() && env::var_os("NO_COLOR").is_none()
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())?;
        out.flush()
    }
}

/// Capture into a `String`. Never reports color support; handy for tests
/// and for capturing sink-directed output.
impl Sink for String {
    fn supports_color(&self) -> bool {
        false
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.push_str(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_sink_accumulates_text() {
        let mut sink = String::new();
        sink.write_text("first\n").unwrap();
        sink.write_text("second\n").unwrap();
        assert_eq!(sink, "first\nsecond\n");
        assert!(!sink.supports_color());
    }
}
