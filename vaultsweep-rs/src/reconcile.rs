//! Deleting attachments that no note references.

use crate::references::ReferenceSet;
use crate::types::{CleaningStats, DeletionFailure, VaultEntry};
use std::io;
use std::path::Path;

/// Removes files on behalf of the reconciliation step.
pub trait Remover {
    fn remove(&self, path: &Path) -> io::Result<()>;

    /// Whether removals are only simulated.
    fn is_dry_run(&self) -> bool {
        false
    }
}

/// Deletes files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsRemover;

impl Remover for FsRemover {
    fn remove(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}

/// Pretends every removal succeeds and touches nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRun;

impl Remover for DryRun {
    fn remove(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Candidate count before anything was removed.
    pub before: usize,

    /// Attachments still on disk: referenced ones and failed removals.
    pub surviving: Vec<VaultEntry>,

    pub removed: Vec<VaultEntry>,

    pub failures: Vec<DeletionFailure>,
}

impl Reconciliation {
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    pub fn stats(&self) -> CleaningStats {
        CleaningStats {
            before: self.before,
            after: self.surviving.len(),
        }
    }
}

/// Remove every attachment whose exact name is not in `references`.
///
/// The surviving list is built fresh from `attachments`. A failed removal is
/// recorded and the entry survives; it never stops the pass.
pub fn reconcile<R: Remover + ?Sized>(
    attachments: Vec<VaultEntry>,
    references: &ReferenceSet,
    remover: &R,
) -> Reconciliation {
    let mut result = Reconciliation {
        before: attachments.len(),
        ..Reconciliation::default()
    };

    for attachment in attachments {
        if references.references(&attachment) {
            result.surviving.push(attachment);
            continue;
        }

        match remover.remove(&attachment.path) {
            Ok(()) => {
                if remover.is_dry_run() {
                    tracing::info!(path = %attachment.path.display(), "would remove unused attachment");
                } else {
                    tracing::info!(path = %attachment.path.display(), "removed unused attachment");
                }
                result.removed.push(attachment);
            }
            Err(e) => {
                tracing::error!(path = %attachment.path.display(), error = %e, "failed to remove attachment");
                result.failures.push(DeletionFailure {
                    name: attachment.name.clone(),
                    path: attachment.path.clone(),
                    error: e.to_string(),
                });
                result.surviving.push(attachment);
            }
        }
    }

    result
}
