//! Config command handler

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::ConfigArgs;
use std::io::Write;

/// Execute the config command
pub fn execute_config<W: Write>(
    config: &CliConfig,
    args: &ConfigArgs,
    out: &mut W,
) -> CliResult<()> {
    if args.yaml {
        out.write_all(config.to_yaml()?.as_bytes())?;
    } else {
        print_current_config(config, out)?;
    }
    Ok(())
}

/// Print the current configuration
pub fn print_current_config<W: Write>(config: &CliConfig, out: &mut W) -> CliResult<()> {
    writeln!(out, "Current configuration:")?;
    writeln!(out, "  Verbosity: {:?}", config.verbosity)?;
    writeln!(out, "  Color: {:?}", config.color)?;
    writeln!(out, "  Default unit: {}", config.default_unit)?;
    writeln!(out, "  Output format: {:?}", config.output_format)?;
    Ok(())
}
