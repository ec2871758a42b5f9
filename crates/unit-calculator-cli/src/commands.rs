//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use unit_calculator::prelude::Unit;

/// unitcalc: keypad expression calculator with Eth/Gwei/Wei conversion
#[derive(Parser, Debug)]
#[command(name = "unitcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress everything but results and errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorArg>,

    /// Configuration file (YAML)
    #[arg(long, global = true, env = "UNITCALC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate an expression and show it in every unit
    Eval(EvalArgs),

    /// Show a single value in every unit
    Convert(ConvertArgs),

    /// Replay a keypad sequence
    ///
    /// Every character is one key press: digits, `.`, `+ - * /` (also
    /// `x` and `÷`) are typed, `=` evaluates, `<` is backspace, `C` clears.
    Keys(KeysArgs),

    /// Interactive session reading key sequences from stdin
    Repl(ReplArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Expression, e.g. "1.5*(2+3)"; whitespace is ignored
    #[arg(allow_hyphen_values = true)]
    pub expression: String,

    /// Unit the expression is written in
    #[arg(short, long, value_enum)]
    pub unit: Option<UnitArg>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
}

/// Arguments for the convert command
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// A single decimal literal, e.g. 21000
    #[arg(allow_hyphen_values = true)]
    pub value: String,

    /// Unit the value is written in
    #[arg(short, long, value_enum)]
    pub unit: Option<UnitArg>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
}

/// Arguments for the keys command
#[derive(Parser, Debug)]
pub struct KeysArgs {
    /// Key sequence, e.g. "7++3="
    #[arg(allow_hyphen_values = true)]
    pub sequence: String,

    /// Unit selected before the first key
    #[arg(short, long, value_enum)]
    pub unit: Option<UnitArg>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
}

/// Arguments for the repl command
#[derive(Parser, Debug)]
pub struct ReplArgs {
    /// Unit selected at start
    #[arg(short, long, value_enum)]
    pub unit: Option<UnitArg>,

    /// Do not print the prompt
    #[arg(long)]
    pub no_prompt: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Print the configuration as YAML
    #[arg(long)]
    pub yaml: bool,
}

/// Unit argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitArg {
    /// Base unit
    #[value(alias = "base")]
    Eth,
    /// 10^-9 of the base unit
    #[value(alias = "milli9")]
    Gwei,
    /// 10^-18 of the base unit
    #[value(alias = "milli18")]
    Wei,
}

impl From<UnitArg> for Unit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Eth => Self::Base,
            UnitArg::Gwei => Self::Milli9,
            UnitArg::Wei => Self::Milli18,
        }
    }
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    /// Human-readable lines
    Text,
    /// JSON snapshot
    Json,
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorArg {
    /// Colors when stdout is a terminal
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}
