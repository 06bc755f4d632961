//! CLI layer: argument parsing, command dispatch and terminal presenter

pub mod args;
pub mod commands;
pub mod error;
pub mod output;

pub use args::{Cli, Commands};
pub use error::{CliError, CliResult};
