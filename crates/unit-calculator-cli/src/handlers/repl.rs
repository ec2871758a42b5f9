//! Repl command handler
//!
//! Each input line is a key sequence. Lines starting with `:` are
//! session commands.

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::keys::apply_sequence;
use crate::output::Reporter;
use crate::ReplArgs;
use std::io::{BufRead, Write};
use tracing::debug;
use unit_calculator::prelude::{CalculatorSession, Unit};

const HELP: &str = "\
keys:      0-9 . + - * / (x ÷), = evaluate, < backspace, C clear
commands:  :unit eth|gwei|wei  :clear  :help  :quit";

/// A parsed `:` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    /// Select a unit
    Unit(Unit),
    /// Clear the session
    Clear,
    /// Print key help
    Help,
    /// Leave the loop
    Quit,
}

impl ReplCommand {
    /// Parses a line without its leading `:`
    pub fn parse(line: &str) -> CliResult<Self> {
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("unit" | "u"), Some(unit)) => Ok(Self::Unit(unit.parse()?)),
            (Some("unit" | "u"), None) => Err(CliError::usage(":unit needs eth, gwei or wei")),
            (Some("clear"), None) => Ok(Self::Clear),
            (Some("help" | "h"), None) => Ok(Self::Help),
            (Some("quit" | "q" | "exit"), None) => Ok(Self::Quit),
            _ => Err(CliError::usage(format!("unknown command ':{line}'"))),
        }
    }
}

/// Runs the loop until `:quit` or end of input
pub fn run_repl<R: BufRead, W: Write>(
    session: &mut CalculatorSession,
    reporter: &Reporter,
    input: R,
    out: &mut W,
    prompt: bool,
) -> CliResult<()> {
    if prompt {
        reporter.info(out, HELP)?;
    }

    let mut lines = input.lines();
    loop {
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let step = match line.strip_prefix(':') {
            Some(command) => match ReplCommand::parse(command) {
                Ok(ReplCommand::Quit) => break,
                Ok(ReplCommand::Help) => {
                    writeln!(out, "{HELP}")?;
                    continue;
                }
                Ok(ReplCommand::Unit(unit)) => Ok(session.select_unit(unit)),
                Ok(ReplCommand::Clear) => Ok(session.clear()),
                Err(e) => Err(e),
            },
            None => apply_sequence(session, line),
        };

        match step {
            Ok(snapshot) => reporter.write_snapshot(out, &snapshot)?,
            Err(e) => {
                debug!(%line, error = %e, "repl line rejected");
                reporter.warning(out, &e.to_string())?;
            }
        }
    }
    Ok(())
}

/// Execute the repl command over stdin/stdout
pub fn execute_repl(config: &CliConfig, args: &ReplArgs) -> CliResult<()> {
    let reporter = Reporter::from_config(config, config.output_format);
    let mut session = CalculatorSession::with_unit(config.unit_or_default(args.unit));
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    run_repl(
        &mut session,
        &reporter,
        stdin.lock(),
        &mut stdout,
        !args.no_prompt,
    )
}
