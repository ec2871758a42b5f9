//! Eval command handler

use super::finish;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Reporter;
use crate::EvalArgs;
use std::io::Write;
use tracing::info;
use unit_calculator::prelude::CalculatorSession;

/// Strips whitespace so `1 + 2` and `1+2` evaluate alike
#[must_use]
pub fn normalize_expression(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Evaluates an expression typed as free text
pub fn evaluate_expression(session: &mut CalculatorSession, text: &str) {
    let expression = normalize_expression(text);
    session.set_expression(&expression);
    session.evaluate();
}

/// Execute the eval command
pub fn execute_eval<W: Write>(config: &CliConfig, args: &EvalArgs, out: &mut W) -> CliResult<()> {
    let unit = config.unit_or_default(args.unit);
    let reporter = Reporter::from_config(config, config.format_or_default(args.format));

    let mut session = CalculatorSession::with_unit(unit);
    evaluate_expression(&mut session, &args.expression);
    info!(expression = %args.expression, %unit, invalid = session.is_invalid(), "eval");

    finish(&reporter, out, &session)
}
