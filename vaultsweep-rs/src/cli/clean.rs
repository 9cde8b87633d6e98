//! The clean command: run the cleaner and hand the report to the output.

use crate::cleaner::Cleaner;
use crate::cli::args::Cli;
use crate::cli::output::Output;
use crate::error::{ExitCode, Result};
use crate::reconcile::{DryRun, FsRemover};
use crate::types::CleanReport;
use crate::vault::Vault;

pub fn run(vault: &Vault, cli: &Cli, output: &Output) -> Result<ExitCode> {
    let cleaner = Cleaner::new(vault);
    let report = if cli.dry_run {
        cleaner.run(&DryRun)?
    } else {
        cleaner.run(&FsRemover)?
    };

    warn_recoverable(&report, output);

    if cli.wants_report() {
        output.report(&report)?;
    }

    if report.has_failures() {
        Ok(ExitCode::DeletionFailures)
    } else {
        Ok(ExitCode::Success)
    }
}

fn warn_recoverable(report: &CleanReport, output: &Output) {
    for note in &report.skipped_notes {
        output.warn(&format!(
            "Skipped note {}: content is not readable UTF-8 text",
            note.display()
        ));
    }

    for failure in &report.failures {
        output.warn(&format!(
            "Could not remove {}: {}",
            failure.path.display(),
            failure.error
        ));
    }
}
