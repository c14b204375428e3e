#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]
//! quikcli — flag parsing and live terminal components for interactive
//! command-line programs.
//!
//! ```no_run
//! use quikcli::{Cli, Display, Loader, Slot};
//!
//! let steps = Slot::with_default(100u32);
//! let mut cli = Cli::new("demo", "0.1.0")?;
//! cli.add_typed_flag("steps", "Number of loader steps", steps.clone())?
//!     .set_alias('s')?;
//! cli.parse_env()?;
//!
//! let total = steps.get().unwrap_or(100);
//! cli.push_component(Display::new(["Loading..."]))
//!     .push_component(Loader::spawn(move |handle| {
//!         for step in 1..=total {
//!             handle.update(f64::from(step) / f64::from(total));
//!         }
//!     }));
//! cli.run()?;
//! # Ok::<(), quikcli::Error>(())
//! ```

pub mod cli;
pub mod component;
pub mod constants;
pub mod errors;
pub mod flag;
pub mod types;
pub mod writer;

pub use cli::Cli;
pub use component::{Component, Display, Loader, LoaderHandle};
pub use errors::{ConfigError, Error, ParseError, Result};
pub use flag::{Arity, Flag, FlagHandle, FlagRegistry, ParamSet, ParseOutcome, Slot};
pub use types::{ErrorOutput, FlagInfo};
pub use writer::Writer;
