/// Error reporting for embedding applications.
use std::io::{self, IsTerminal, Write};

use crate::errors::Error;
use crate::types::ErrorOutput;

/// Write `err` to `out`, as a JSON envelope or as plain text.
///
/// # Errors
///
/// Returns any I/O error from `out`.
pub fn write_error_to<W: Write>(out: &mut W, err: &Error, json: bool) -> io::Result<()> {
    if json {
        let envelope = ErrorOutput::from_error(err);
        let s = serde_json::to_string_pretty(&envelope).map_err(io::Error::other)?;
        writeln!(out, "{s}")
    } else {
        writeln!(out, "Error: {err}")
    }
}

/// Write `err` to stderr. JSON is used when stderr is not a terminal and
/// `json` is unset; plain text otherwise.
pub fn write_error(err: &Error, json: Option<bool>) {
    let stderr = io::stderr();
    let json = json.unwrap_or_else(|| !stderr.is_terminal());
    let mut out = stderr.lock();
    let _ = write_error_to(&mut out, err, json);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConfigError;

    #[test]
    fn test_plain_text() {
        let err = Error::from(ConfigError::DuplicateFlag {
            name: "verbose".to_owned(),
        });
        let mut out = Vec::new();
        write_error_to(&mut out, &err, false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Error: Configuration error: flag --verbose has already been registered\n"
        );
    }

    #[test]
    fn test_json_envelope() {
        let err = Error::from(ConfigError::DuplicateFlag {
            name: "verbose".to_owned(),
        });
        let mut out = Vec::new();
        write_error_to(&mut out, &err, true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["ok"], false);
        assert_eq!(value["error"]["code"], "configuration");
    }
}
