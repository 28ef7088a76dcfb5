//! Command-line argument parsing and handling.

pub mod definition;
pub mod insert;
pub mod settings;
pub mod utils;

pub use definition::{Args, run};
pub use utils::determine_log_level;
