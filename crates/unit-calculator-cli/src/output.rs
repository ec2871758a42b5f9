//! Snapshot rendering

use crate::config::{CliConfig, OutputFormat};
use crate::error::CliResult;
use console::style;
use std::io::Write;
use unit_calculator::prelude::{Snapshot, Unit, VALIDATION_MESSAGE};

/// Renders session snapshots as text or JSON
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    /// Output format
    pub format: OutputFormat,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(OutputFormat::Text, false, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub const fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            format,
            use_color,
            quiet,
        }
    }

    /// Reporter for a configuration, with the format already resolved
    #[must_use]
    pub fn from_config(config: &CliConfig, format: OutputFormat) -> Self {
        Self::new(
            format,
            config.color.should_color(),
            config.verbosity.is_quiet(),
        )
    }

    /// Renders a snapshot to a string, newline-terminated
    pub fn render(&self, snapshot: &Snapshot) -> CliResult<String> {
        match self.format {
            OutputFormat::Json => Ok(format!("{}\n", snapshot.to_json_pretty()?)),
            OutputFormat::Text => Ok(self.render_text(snapshot)),
        }
    }

    /// Writes a rendered snapshot
    pub fn write_snapshot<W: Write>(&self, out: &mut W, snapshot: &Snapshot) -> CliResult<()> {
        out.write_all(self.render(snapshot)?.as_bytes())?;
        Ok(())
    }

    fn render_text(&self, snapshot: &Snapshot) -> String {
        let mut text = String::new();

        if !self.quiet {
            let unit = if self.use_color {
                style(snapshot.unit.label()).cyan().to_string()
            } else {
                snapshot.unit.label().to_string()
            };
            text.push_str(&format!("{} [{unit}]\n", display_expression(snapshot)));
        }

        if snapshot.invalid {
            text.push_str(&self.failure_line(snapshot));
            return text;
        }

        for unit in Unit::ALL {
            let line = format!("{} {}", snapshot.formatted.get(unit), unit.label());
            if self.use_color && unit == snapshot.unit {
                text.push_str(&format!("{}\n", style(line).bold()));
            } else {
                text.push_str(&line);
                text.push('\n');
            }
        }
        text
    }

    fn failure_line(&self, snapshot: &Snapshot) -> String {
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "ERROR".to_string()
        };
        match (&snapshot.error, self.quiet) {
            (Some(error), false) => format!("{prefix} {VALIDATION_MESSAGE} ({error})\n"),
            _ => format!("{prefix} {VALIDATION_MESSAGE}\n"),
        }
    }

    /// Prints an informational line unless quiet
    pub fn info<W: Write>(&self, out: &mut W, message: &str) -> CliResult<()> {
        if !self.quiet {
            writeln!(out, "{message}")?;
        }
        Ok(())
    }

    /// Prints a warning line, even in quiet mode
    pub fn warning<W: Write>(&self, out: &mut W, message: &str) -> CliResult<()> {
        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };
        writeln!(out, "{prefix} {message}")?;
        Ok(())
    }
}

fn display_expression(snapshot: &Snapshot) -> &str {
    if snapshot.expression.is_empty() {
        "0"
    } else {
        &snapshot.expression
    }
}
