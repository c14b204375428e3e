/// Flag layer: registration, typed parameters and argument parsing.
pub mod definition;
pub mod params;
pub mod parser;
pub mod registry;

pub use definition::{Arity, Flag};
pub use params::{ParamSet, Slot};
pub use parser::ParseOutcome;
pub use registry::{FlagHandle, FlagRegistry};
