//! vaultsweep CLI entry point.

use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use vaultsweep::cli::{clean, logging, Cli, Output};
use vaultsweep::config::Config;
use vaultsweep::error::{ExitCode as SweepExitCode, SweepError};
use vaultsweep::vault::Vault;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => ExitCode::from(code.code() as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<SweepExitCode, SweepError> {
    if !cli.wants_cleaning() {
        Cli::command().print_help()?;
        return Ok(SweepExitCode::Success);
    }

    // Load config
    let config = Config::load(cli.config.as_deref())?;
    logging::init(&config.logging, cli.verbose, cli.quiet);

    // Resolve vault path
    let vault_path = config.resolve_vault_path(cli.vault.as_deref())?;
    let vault = Vault::open(vault_path, &config)?;
    tracing::debug!(root = %vault.root.display(), "opened vault");

    let output = Output::new(cli.output_format(), cli.quiet);
    clean::run(&vault, cli, &output)
}
