/// CLI layer: the parse-then-run façade, help text and error reporting.
pub mod app;
pub mod help;
pub mod output;

pub use app::Cli;
pub use output::{write_error, write_error_to};
