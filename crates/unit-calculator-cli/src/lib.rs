//! Unitcalc CLI library
//!
//! Command-line front end for the unit calculator: argument parsing,
//! configuration, key replay and snapshot rendering.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod keys;
pub mod logging;
mod output;

pub use commands::{
    Cli, ColorArg, Commands, ConfigArgs, ConvertArgs, EvalArgs, FormatArg, KeysArgs, ReplArgs,
    UnitArg,
};
pub use config::{CliConfig, ColorChoice, OutputFormat, Verbosity};
pub use error::{CliError, CliResult};
pub use keys::{apply_sequence, KeyAction};
pub use output::Reporter;
