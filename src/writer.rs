/// Terminal output primitive: width query, line emission, cursor retraction.
///
/// The width is read once when the writer is built and never refreshed, so a
/// resize during the run is not picked up.
use std::io::{self, Stdout, Write};

use crossterm::{cursor::MoveUp, queue};
use log::debug;

use crate::constants::FALLBACK_WIDTH;

/// Line-oriented terminal writer.
#[derive(Debug)]
pub struct Writer<W: Write = Stdout> {
    out: W,
    width: u16,
    reset_cursor: bool,
}

impl Writer<Stdout> {
    /// Writer on stdout, sized to the current terminal.
    ///
    /// Falls back to [`FALLBACK_WIDTH`] columns when stdout is not a terminal.
    #[must_use]
    pub fn new() -> Self {
        let width = match crossterm::terminal::size() {
            Ok((cols, _)) if cols > 0 => cols,
            Ok(_) => FALLBACK_WIDTH,
            Err(e) => {
                debug!("terminal size unavailable ({e}), assuming {FALLBACK_WIDTH} columns");
                FALLBACK_WIDTH
            }
        };
        Self::with_width(io::stdout(), width)
    }
}

impl Default for Writer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Writer<W> {
    /// Writer on an arbitrary sink with a fixed width.
    pub fn with_width(out: W, width: u16) -> Self {
        Self {
            out,
            width,
            reset_cursor: false,
        }
    }

    /// Terminal column count captured at construction.
    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Move the cursor back over the next `out_*` call's lines once written.
    ///
    /// Only the next call consults the request; it is cleared afterwards.
    pub fn reset_cursor(&mut self) -> &mut Self {
        self.reset_cursor = true;
        self
    }

    /// Write one line, then flush.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the sink.
    pub fn out_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{line}")?;
        self.finish(1)
    }

    /// Write several lines as one flushed batch.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the sink.
    pub fn out_lines<S: AsRef<str>>(&mut self, lines: &[S]) -> io::Result<()> {
        for line in lines {
            writeln!(self.out, "{}", line.as_ref())?;
        }
        self.finish(lines.len())
    }

    /// Write a bare line terminator.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the sink.
    pub fn newline(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.flush()
    }

    /// Consume the writer and return its sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Borrow the sink.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn finish(&mut self, rows: usize) -> io::Result<()> {
        // Clear first so a failed write does not leak the request into the next call.
        let reset = std::mem::take(&mut self.reset_cursor);
        if reset && rows > 0 {
            let rows = u16::try_from(rows).unwrap_or(u16::MAX);
            queue!(self.out, MoveUp(rows))?;
        }
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured(writer: Writer<Vec<u8>>) -> String {
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_width_is_fixed() {
        let writer = Writer::with_width(Vec::new(), 42);
        assert_eq!(writer.width(), 42);
    }

    #[test]
    fn test_out_line_plain() {
        let mut writer = Writer::with_width(Vec::new(), 80);
        writer.out_line("hello").unwrap();
        assert_eq!(captured(writer), "hello\n");
    }

    #[test]
    fn test_out_line_with_reset() {
        let mut writer = Writer::with_width(Vec::new(), 80);
        writer.reset_cursor().out_line("bar").unwrap();
        assert_eq!(captured(writer), "bar\n\x1b[1A");
    }

    #[test]
    fn test_out_lines_with_reset_moves_by_count() {
        let mut writer = Writer::with_width(Vec::new(), 80);
        writer.reset_cursor();
        writer.out_lines(&["a", "b", "c"]).unwrap();
        assert_eq!(captured(writer), "a\nb\nc\n\x1b[3A");
    }

    #[test]
    fn test_reset_applies_to_one_call_only() {
        let mut writer = Writer::with_width(Vec::new(), 80);
        writer.reset_cursor().out_line("first").unwrap();
        writer.out_line("second").unwrap();
        writer.newline().unwrap();
        assert_eq!(captured(writer), "first\n\x1b[1Asecond\n\n");
    }

    #[test]
    fn test_empty_batch_emits_no_escape() {
        let mut writer = Writer::with_width(Vec::new(), 80);
        writer.reset_cursor();
        writer.out_lines::<&str>(&[]).unwrap();
        assert!(captured(writer).is_empty());
    }
}
