//! Command-line flags and the TOML settings file they point at.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
