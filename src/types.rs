/// Shared serializable output types.
///
/// These are what an embedding application writes when it wants machine-readable
/// output. They are decoupled from the internal `Flag` / `Error` types.
use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::flag::Flag;

/// A registered flag, as listed by help or introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagInfo {
    /// Long name, without the leading `--`.
    pub name: String,
    /// Single-character alias, or null.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<char>,
    /// Free-form description shown in help.
    pub description: String,
    /// Parameter count: a number, or `*` for variadic flags.
    pub arity: String,
    /// Whether the callback fires at bind time.
    pub immediate: bool,
    /// Whether the flag was bound by the last parse call.
    pub set: bool,
}

impl From<&Flag> for FlagInfo {
    fn from(flag: &Flag) -> Self {
        Self {
            name: flag.name().to_owned(),
            alias: flag.alias(),
            description: flag.description().to_owned(),
            arity: flag.arity().to_string(),
            immediate: flag.is_immediate(),
            set: flag.is_set(),
        }
    }
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error kind: `configuration`, `parser` or `io`.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorOutput {
    /// Construct from a crate [`Error`].
    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
            },
        }
    }
}
