/// Static text component.
use std::fmt;
use std::io::{self, Write};

use crate::writer::Writer;

/// Prints a fixed block of lines once.
pub struct Display {
    lines: Vec<String>,
    retract: bool,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl Display {
    #[must_use]
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            retract: false,
            on_complete: None,
        }
    }

    /// Leave the cursor at the first emitted line so the next component
    /// overwrites this block.
    #[must_use]
    pub fn retract_cursor(mut self) -> Self {
        self.retract = true;
        self
    }

    /// Callback fired after the lines are written.
    #[must_use]
    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub(crate) fn run<W: Write>(self, writer: &mut Writer<W>) -> io::Result<()> {
        if self.retract {
            writer.reset_cursor();
        }
        writer.out_lines(&self.lines)?;
        if let Some(callback) = self.on_complete {
            callback();
        }
        Ok(())
    }
}

impl fmt::Debug for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Display")
            .field("lines", &self.lines)
            .field("retract", &self.retract)
            .finish_non_exhaustive()
    }
}
