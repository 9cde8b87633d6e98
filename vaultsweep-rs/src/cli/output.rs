//! Output formatting for the CLI.

use crate::cli::args::OutputFormat;
use crate::error::Result;
use crate::types::CleanReport;
use serde::Serialize;
use std::fmt::Write as _;

/// Helper for formatting and printing output.
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Render a serializable value in the configured structured format.
    /// Text output falls back to pretty JSON.
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        let output = match self.format {
            OutputFormat::Text | OutputFormat::Json => serde_json::to_string_pretty(value)?,
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
            OutputFormat::Toml => toml::to_string_pretty(value)?,
        };
        Ok(output)
    }

    /// Print a serializable value in the configured format.
    pub fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", self.render(value)?);
        Ok(())
    }

    /// Print a cleaning report: text summary or the full structured report.
    pub fn report(&self, report: &CleanReport) -> Result<()> {
        match self.format {
            OutputFormat::Text => self.print_raw(render_text(report).trim_end()),
            _ => self.print(report)?,
        }
        Ok(())
    }

    /// Print raw text (not serialized).
    pub fn print_raw(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a warning message unless in quiet mode.
    pub fn warn(&self, message: &str) {
        if !self.quiet {
            eprintln!("Warning: {}", message);
        }
    }
}

/// Human summary of a run.
pub fn render_text(report: &CleanReport) -> String {
    let stats = report.stats;
    let removed = stats.removed();
    let mut text = String::new();

    if removed == 0 {
        text.push_str("Vault is already clean!\n");
        return text;
    }

    let verb = if report.dry_run { "Would remove" } else { "Removed" };
    let _ = writeln!(text, "Scanned {} attachments", stats.before);
    let _ = writeln!(text, "{} {} unused files", verb, removed);
    let _ = writeln!(text, "Before: {} | After: {}", stats.before, stats.after);

    if report.dry_run {
        for path in &report.removed {
            let _ = writeln!(text, "  {}", path.display());
        }
    }

    text
}
