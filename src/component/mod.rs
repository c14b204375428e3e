/// Terminal components: single-use units of output run against a [`Writer`].
pub mod display;
pub mod loader;

use std::io::{self, Write};

use log::debug;

pub use display::Display;
pub use loader::{Loader, LoaderHandle, filled_len, render_bar};

use crate::writer::Writer;

/// A queued unit of terminal output. Consumed by [`Component::run`].
#[derive(Debug)]
pub enum Component {
    /// Static block of lines.
    Display(Display),
    /// Live progress bar.
    Loader(Loader),
}

impl Component {
    /// Run the component once against `writer`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the writer, or from spawning a loader's
    /// background thread.
    pub fn run<W: Write>(self, writer: &mut Writer<W>) -> io::Result<()> {
        match self {
            Self::Display(display) => {
                debug!("running display ({} lines)", display.lines().len());
                display.run(writer)
            }
            Self::Loader(loader) => {
                debug!("running loader");
                loader.run(writer)
            }
        }
    }
}

impl From<Display> for Component {
    fn from(display: Display) -> Self {
        Self::Display(display)
    }
}

impl From<Loader> for Component {
    fn from(loader: Loader) -> Self {
        Self::Loader(loader)
    }
}
