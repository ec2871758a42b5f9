//! Command handlers
//!
//! Each handler drives a [`CalculatorSession`] and hands the final
//! snapshot to [`finish`], which renders it and maps the Invalid overlay
//! onto an error so the process exits non-zero.

pub mod config;
pub mod convert;
pub mod eval;
pub mod keys;
pub mod repl;

pub use config::execute_config;
pub use convert::execute_convert;
pub use eval::execute_eval;
pub use keys::execute_keys;
pub use repl::execute_repl;

use crate::config::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::Reporter;
use std::io::Write;
use unit_calculator::prelude::{CalcError, CalculatorSession, VALIDATION_MESSAGE};

/// Renders the session and reports an invalid expression as an error
///
/// In text mode an invalid snapshot is left to the error path on stderr;
/// in JSON mode the snapshot is still written so callers can parse it.
pub fn finish<W: Write>(
    reporter: &Reporter,
    out: &mut W,
    session: &CalculatorSession,
) -> CliResult<()> {
    let snapshot = session.snapshot();
    if !snapshot.invalid || reporter.format == OutputFormat::Json {
        reporter.write_snapshot(out, &snapshot)?;
    }
    if snapshot.invalid {
        let cause = session
            .last_error()
            .cloned()
            .unwrap_or(CalcError::EmptyExpression);
        return Err(CliError::invalid(VALIDATION_MESSAGE, cause));
    }
    Ok(())
}
