//! Convert command handler

use super::finish;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Reporter;
use crate::ConvertArgs;
use std::io::Write;
use unit_calculator::core::units::parse_literal;
use unit_calculator::prelude::{CalcError, CalculatorSession, Expression, Unit};

/// Reads `value` as a bare literal in `unit`
///
/// The session starts in the base unit with the literal typed in, then
/// the unit is selected so the literal is reinterpreted the same way a
/// unit switch reinterprets it on the keypad.
pub fn convert_literal(value: &str, unit: Unit) -> CliResult<CalculatorSession> {
    let literal = value.trim();
    if Expression::from(literal).single_literal().is_none() {
        return Err(CliError::Calc(CalcError::malformed(format!(
            "'{literal}' is not a single decimal literal"
        ))));
    }
    parse_literal(literal)?;

    let mut session = CalculatorSession::new();
    session.set_expression(literal);
    session.select_unit(unit);
    Ok(session)
}

/// Execute the convert command
pub fn execute_convert<W: Write>(
    config: &CliConfig,
    args: &ConvertArgs,
    out: &mut W,
) -> CliResult<()> {
    let unit = config.unit_or_default(args.unit);
    let reporter = Reporter::from_config(config, config.format_or_default(args.format));
    let session = convert_literal(&args.value, unit)?;
    finish(&reporter, out, &session)
}
