//! Keys command handler

use super::finish;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::keys::apply_sequence;
use crate::output::Reporter;
use crate::KeysArgs;
use std::io::Write;
use unit_calculator::prelude::CalculatorSession;

/// Execute the keys command
pub fn execute_keys<W: Write>(config: &CliConfig, args: &KeysArgs, out: &mut W) -> CliResult<()> {
    let reporter = Reporter::from_config(config, config.format_or_default(args.format));
    let mut session = CalculatorSession::with_unit(config.unit_or_default(args.unit));
    apply_sequence(&mut session, &args.sequence)?;
    finish(&reporter, out, &session)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{ColorChoice, FormatArg};

    fn run(sequence: &str, format: Option<FormatArg>) -> CliResult<String> {
        let config = CliConfig::new().with_color(ColorChoice::Never);
        let args = KeysArgs {
            sequence: sequence.to_string(),
            unit: None,
            format,
        };
        let mut buf = Vec::new();
        execute_keys(&config, &args, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_keys_without_evaluate() {
        let text = run("7++3", None).unwrap();
        assert!(text.starts_with("7+3 [Eth]\n"));
    }

    #[test]
    fn test_keys_with_evaluate() {
        let text = run("7++3=", Some(FormatArg::Json)).unwrap();
        assert!(text.contains("\"expression\": \"10\""));
    }

    #[test]
    fn test_keys_rejected_key() {
        assert!(run("1a", None).is_err());
    }

    #[test]
    fn test_keys_invalid_evaluation() {
        assert!(run("5/0=", None).is_err());
    }
}
