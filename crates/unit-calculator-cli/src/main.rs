//! unitcalc: keypad expression calculator with Eth/Gwei/Wei conversion
//!
//! ## Usage
//!
//! ```bash
//! unitcalc eval "1.5*(2+3)"          # Evaluate, show every unit
//! unitcalc eval 21000 --unit gwei    # Expression written in Gwei
//! unitcalc convert 1 --unit wei      # Reinterpret a literal
//! unitcalc keys "7++3="              # Replay key presses
//! unitcalc repl                      # Interactive session
//! ```

use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use unitcalc::{
    handlers, logging, Cli, CliConfig, CliError, CliResult, ColorChoice, Commands, Verbosity,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Invalid { message, cause }) => {
            eprintln!("{message}: {cause}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Build configuration from the file, then CLI args
    let config = build_config(&cli)?;
    logging::init_tracing(config.verbosity);
    debug!(?config, "effective configuration");

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Commands::Eval(args) => handlers::execute_eval(&config, &args, &mut stdout),
        Commands::Convert(args) => handlers::execute_convert(&config, &args, &mut stdout),
        Commands::Keys(args) => handlers::execute_keys(&config, &args, &mut stdout),
        Commands::Repl(args) => {
            drop(stdout);
            handlers::execute_repl(&config, &args)
        }
        Commands::Config(args) => handlers::execute_config(&config, &args, &mut stdout),
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let mut config = match cli.config {
        Some(ref path) => CliConfig::load(path)?,
        None => CliConfig::new(),
    };

    if cli.quiet || cli.verbose > 0 {
        config = config.with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose));
    }
    if let Some(color) = cli.color {
        config = config.with_color(ColorChoice::from(color));
    }
    Ok(config)
}
