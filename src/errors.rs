/// Error taxonomy for flag registration, argument parsing and terminal output.
use thiserror::Error;

/// Errors raised while registering flags. Always a setup defect.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A flag with the same name is already registered.
    #[error("flag --{name} has already been registered")]
    DuplicateFlag {
        /// The duplicated flag name.
        name: String,
    },

    /// The alias is already claimed by another flag in the same registry.
    #[error("alias -{alias} has already been assigned to --{owner}")]
    DuplicateAlias {
        /// The contested alias character.
        alias: char,
        /// Name of the flag that already owns the alias.
        owner: String,
    },

    /// The flag name is empty or would be read as a flag token itself.
    #[error("invalid flag name '{name}'")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// The alias cannot be expressed as a `-X` token.
    #[error("invalid alias '{alias}'")]
    InvalidAlias {
        /// The rejected alias character.
        alias: char,
    },
}

/// Errors raised while binding command-line tokens to flags.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// No flag is registered under this long name or alias.
    #[error("unknown flag '{token}'")]
    UnknownFlag {
        /// The offending token as written on the command line.
        token: String,
    },

    /// A parameter appeared before any flag token.
    #[error("expected flag, got '{token}'")]
    ExpectedFlag {
        /// The stray parameter token.
        token: String,
    },

    /// The flag was already bound earlier in the same parse call.
    #[error("flag --{name} has already been set")]
    AlreadySet {
        /// Name of the repeated flag.
        name: String,
    },

    /// The collected parameter count does not match the flag's arity.
    #[error("flag --{name} expected {expected} arguments, got {actual}")]
    Arity {
        /// Name of the flag being closed.
        name: String,
        /// Parameter count required by the flag.
        expected: usize,
        /// Parameter count actually collected.
        actual: usize,
    },

    /// A textual parameter could not be converted to its target type.
    #[error("failed to parse argument '{value}' for flag --{name}")]
    InvalidParam {
        /// Name of the flag owning the parameter.
        name: String,
        /// The text that failed to convert.
        value: String,
    },

    /// A callback rejected its parameters.
    #[error("flag --{name}: {message}")]
    Rejected {
        /// Name of the flag whose callback failed.
        name: String,
        /// Reason supplied by the callback.
        message: String,
    },
}

impl ParseError {
    /// Build a [`ParseError::Rejected`] from inside a flag callback.
    #[must_use]
    pub fn rejected(name: &str, message: impl Into<String>) -> Self {
        Self::Rejected {
            name: name.to_owned(),
            message: message.into(),
        }
    }
}

/// Top-level error returned by every fallible crate operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Registration-time defect.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Command-line input rejected.
    #[error("Parser error: {0}")]
    Parse(#[from] ParseError),

    /// Writing to the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Machine-readable code for this error kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "configuration",
            Self::Parse(_) => "parser",
            Self::Io(_) => "io",
        }
    }
}

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;
