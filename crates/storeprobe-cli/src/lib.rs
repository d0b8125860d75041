//! Storeprobe CLI Library
//!
//! Command-line front end for the storeprobe library: decode captured
//! response bodies, build form bodies and poke the store API by hand.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{
    ApiArgs, ApiCommand, Cli, ColorArg, Commands, DecodeArgs, EncodeArgs, FormatArg,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use logging::init_logging;
pub use output::{OutputFormat, Reporter};
