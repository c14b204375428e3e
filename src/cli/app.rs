/// The façade: one flag registry plus an ordered queue of components.
///
/// Liveness is a plain boolean. Parse errors and the built-in `--help` /
/// `--version` flags deactivate the façade; the embedding application checks
/// [`Cli::is_active`] and decides the process exit code itself.
use std::collections::VecDeque;
use std::io::{Stdout, Write};

use log::debug;

use super::help::{help_lines, version_line};
use crate::component::Component;
use crate::constants::{HELP_ALIAS, HELP_FLAG, VERSION_ALIAS, VERSION_FLAG};
use crate::errors::{ConfigError, Error, ParseError};
use crate::flag::{FlagHandle, FlagRegistry, ParamSet, ParseOutcome};
use crate::writer::Writer;

/// Parse-then-run entry point for an interactive command-line program.
pub struct Cli<W: Write = Stdout> {
    name: String,
    version: String,
    flags: FlagRegistry,
    components: VecDeque<Component>,
    writer: Writer<W>,
    active: bool,
}

impl Cli<Stdout> {
    /// Façade writing to stdout, with `--version` and `--help` registered.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the built-in flags cannot be registered.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Self::with_writer(name, version, Writer::new())
    }
}

impl<W: Write> Cli<W> {
    /// Façade on an explicit writer.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the built-in flags cannot be registered.
    pub fn with_writer(
        name: impl Into<String>,
        version: impl Into<String>,
        writer: Writer<W>,
    ) -> Result<Self, ConfigError> {
        let mut flags = FlagRegistry::new();
        flags
            .add_flag(VERSION_FLAG, "Print version information and exit")?
            .set_alias(VERSION_ALIAS)?
            .set_immediate_parse()
            .set_halting();
        flags
            .add_flag(HELP_FLAG, "Print this help and exit")?
            .set_alias(HELP_ALIAS)?
            .set_immediate_parse()
            .set_halting();

        Ok(Self {
            name: name.into(),
            version: version.into(),
            flags,
            components: VecDeque::new(),
            writer,
            active: true,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whether the program should keep going.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Mark the program as finished; queued components will not run.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    #[must_use]
    pub fn flags(&self) -> &FlagRegistry {
        &self.flags
    }

    pub fn flags_mut(&mut self) -> &mut FlagRegistry {
        &mut self.flags
    }

    #[must_use]
    pub fn writer(&self) -> &Writer<W> {
        &self.writer
    }

    /// Consume the façade and return its writer.
    pub fn into_writer(self) -> Writer<W> {
        self.writer
    }

    /// See [`FlagRegistry::add_flag`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` on a duplicate or invalid name.
    pub fn add_flag(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<FlagHandle<'_>, ConfigError> {
        self.flags.add_flag(name, description)
    }

    /// See [`FlagRegistry::add_flag_with`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` on a duplicate or invalid name.
    pub fn add_flag_with<F>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        callback: F,
    ) -> Result<FlagHandle<'_>, ConfigError>
    where
        F: FnMut(&[String]) -> Result<(), ParseError> + 'static,
    {
        self.flags.add_flag_with(name, description, callback)
    }

    /// See [`FlagRegistry::add_typed_flag`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` on a duplicate or invalid name.
    pub fn add_typed_flag<P: ParamSet>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        targets: P,
    ) -> Result<FlagHandle<'_>, ConfigError> {
        self.flags.add_typed_flag(name, description, targets)
    }

    /// Parse the process arguments (`std::env::args`).
    ///
    /// # Errors
    ///
    /// See [`Cli::parse_flags`].
    pub fn parse_env(&mut self) -> Result<ParseOutcome, Error> {
        self.parse_flags(std::env::args())
    }

    /// Parse an argument vector whose first element is the program name.
    ///
    /// A halting flag deactivates the façade; the built-in `--version` and
    /// `--help` print their text before returning. On error the façade is
    /// deactivated and flags bound before the error stay bound.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` for rejected input, or `Error::Io` if the
    /// built-in output cannot be written.
    pub fn parse_flags<I, S>(&mut self, args: I) -> Result<ParseOutcome, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let outcome = match self.flags.parse(args) {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!("parse failed: {e}");
                self.active = false;
                return Err(e.into());
            }
        };

        if let ParseOutcome::Halted { flag } = &outcome {
            debug!("--{flag} halted flag processing");
            self.active = false;
            match flag.as_str() {
                VERSION_FLAG => {
                    let line = version_line(&self.name, &self.version);
                    self.writer.out_line(&line)?;
                }
                HELP_FLAG => {
                    let lines = self.help_text();
                    self.writer.out_lines(&lines)?;
                }
                _ => {}
            }
        }
        Ok(outcome)
    }

    /// Help text for every registered flag.
    #[must_use]
    pub fn help_text(&self) -> Vec<String> {
        help_lines(&self.name, self.flags.iter())
    }

    /// Queue a component to run after the ones already queued.
    pub fn push_component(&mut self, component: impl Into<Component>) -> &mut Self {
        self.components.push_back(component.into());
        self
    }

    /// Number of components waiting to run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.components.len()
    }

    /// Run every queued component in order, consuming each.
    ///
    /// Does nothing but discard the queue when the façade is inactive.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if a component fails to write; the façade is
    /// deactivated and the remaining components are dropped.
    pub fn run(&mut self) -> Result<(), Error> {
        if !self.active {
            debug!("inactive, discarding {} component(s)", self.components.len());
            self.components.clear();
            return Ok(());
        }

        while let Some(component) = self.components.pop_front() {
            if let Err(e) = component.run(&mut self.writer) {
                self.active = false;
                self.components.clear();
                return Err(e.into());
            }
        }
        Ok(())
    }
}
