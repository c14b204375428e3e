/// Compile-time defaults shared by the façade, help output and loader.
use std::time::Duration;

/// Long name of the built-in version flag.
pub const VERSION_FLAG: &str = "version";

/// Alias of the built-in version flag.
pub const VERSION_ALIAS: char = 'V';

/// Long name of the built-in help flag.
pub const HELP_FLAG: &str = "help";

/// Alias of the built-in help flag.
pub const HELP_ALIAS: char = 'h';

/// Column at which flag descriptions start in help output.
pub const HELP_COLUMN: usize = 24;

/// Interval between two checks of a loader's dirty flag.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Width assumed when the terminal size cannot be queried (e.g. piped stdout).
pub const FALLBACK_WIDTH: u16 = 80;

/// Narrowest width a progress bar is rendered at: brackets, one cell and `100%`.
pub const MIN_BAR_WIDTH: usize = 10;
