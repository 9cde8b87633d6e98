//! CLI argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vaultsweep")]
#[command(author, version, about = "Remove attachments no note embeds anymore from an Obsidian vault", long_about = None)]
pub struct Cli {
    /// Path to the vault (overrides config and VAULTSWEEP_VAULT)
    #[arg(long)]
    pub vault: Option<PathBuf>,

    /// Path to the config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Run the cleaner and delete unused attachments
    #[arg(short, long, conflicts_with = "dry_run")]
    pub run: bool,

    /// Report unused attachments without deleting them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print the cleaning report after the run
    #[arg(short, long)]
    pub show: bool,

    /// Print the report as JSON
    #[arg(long, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Print the report as YAML
    #[arg(long, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Print the report as TOML
    #[arg(long, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress warnings and logs
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Whether a cleaning run was requested at all. Nothing is scanned or
    /// deleted without `--run` or `--dry-run`.
    pub fn wants_cleaning(&self) -> bool {
        self.run || self.dry_run
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Text
        }
    }

    /// Whether the report should be printed at all.
    pub fn wants_report(&self) -> bool {
        self.show || self.output_format() != OutputFormat::Text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
    Toml,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["vaultsweep"]);
        assert!(cli.vault.is_none());
        assert!(!cli.run);
        assert!(!cli.dry_run);
        assert!(!cli.wants_cleaning());
        assert!(!cli.wants_report());
        assert_eq!(cli.output_format(), OutputFormat::Text);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from(["vaultsweep", "--vault", "/v", "-n", "-s", "-vv"]);
        assert_eq!(cli.vault, Some(PathBuf::from("/v")));
        assert!(cli.dry_run);
        assert!(cli.show);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_run_flag() {
        let cli = Cli::parse_from(["vaultsweep", "-r", "-s"]);
        assert!(cli.run);
        assert!(cli.wants_cleaning());

        let cli = Cli::parse_from(["vaultsweep", "--dry-run"]);
        assert!(!cli.run);
        assert!(cli.wants_cleaning());

        let cli = Cli::parse_from(["vaultsweep", "--show"]);
        assert!(!cli.wants_cleaning());
    }

    #[test]
    fn test_run_conflicts_with_dry_run() {
        assert!(Cli::try_parse_from(["vaultsweep", "--run", "--dry-run"]).is_err());
    }

    #[test]
    fn test_structured_format_implies_report() {
        let cli = Cli::parse_from(["vaultsweep", "--json"]);
        assert_eq!(cli.output_format(), OutputFormat::Json);
        assert!(cli.wants_report());
    }

    #[test]
    fn test_formats_conflict() {
        assert!(Cli::try_parse_from(["vaultsweep", "--json", "--yaml"]).is_err());
    }
}
