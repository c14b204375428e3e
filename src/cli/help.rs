/// Help and version text for the built-in flags.
use std::fmt::Write as _;

use crate::constants::HELP_COLUMN;
use crate::flag::Flag;

/// `<name> version <version>`
#[must_use]
pub fn version_line(name: &str, version: &str) -> String {
    format!("{name} version {version}")
}

/// One help entry: `  --name[, -alias]` padded to [`HELP_COLUMN`], then the
/// description. An overflowing name pushes the description to the next line.
#[must_use]
pub fn flag_entry(flag: &Flag) -> String {
    let mut head = format!("  --{}", flag.name());
    if let Some(alias) = flag.alias() {
        let _ = write!(head, ", -{alias}");
    }

    let used = head.chars().count();
    if used < HELP_COLUMN {
        head.push_str(&" ".repeat(HELP_COLUMN - used));
    } else {
        head.push('\n');
        head.push_str(&" ".repeat(HELP_COLUMN));
    }
    head.push_str(flag.description());
    head
}

/// Full help text: usage line followed by every flag in registration order.
#[must_use]
pub fn help_lines<'a>(name: &str, flags: impl Iterator<Item = &'a Flag>) -> Vec<String> {
    let mut lines = vec![format!("Usage: {name} [FLAGS]"), String::new(), "Flags:".to_owned()];
    lines.extend(flags.map(flag_entry));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flag::FlagRegistry;

    #[test]
    fn test_version_line() {
        assert_eq!(version_line("quikcli", "0.0.1"), "quikcli version 0.0.1");
    }

    #[test]
    fn test_entry_padding_and_alias() {
        let mut reg = FlagRegistry::new();
        reg.add_flag("verbose", "Print more")
            .unwrap()
            .set_alias('v')
            .unwrap();
        reg.add_flag("quiet", "Print less").unwrap();

        let verbose = flag_entry(reg.get("verbose").unwrap());
        assert_eq!(verbose, format!("{:<24}Print more", "  --verbose, -v"));
        let quiet = flag_entry(reg.get("quiet").unwrap());
        assert_eq!(quiet, format!("{:<24}Print less", "  --quiet"));
    }

    #[test]
    fn test_long_name_wraps_description() {
        let mut reg = FlagRegistry::new();
        reg.add_flag("a-really-long-flag-name", "Wrapped").unwrap();
        let entry = flag_entry(reg.get("a-really-long-flag-name").unwrap());
        assert_eq!(
            entry,
            format!("  --a-really-long-flag-name\n{}Wrapped", " ".repeat(24))
        );
    }

    #[test]
    fn test_help_lines_order() {
        let mut reg = FlagRegistry::new();
        reg.add_flag("zeta", "z").unwrap();
        reg.add_flag("alpha", "a").unwrap();
        let lines = help_lines("demo", reg.iter());
        assert_eq!(lines[0], "Usage: demo [FLAGS]");
        assert!(lines[3].starts_with("  --zeta"));
        assert!(lines[4].starts_with("  --alpha"));
    }
}
