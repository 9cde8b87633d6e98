//! One cleaning run, stage by stage.
//!
//! A run moves through `Cleaner` (idle) → [`Scanned`] → [`Extracted`] →
//! [`Reconciled`] → [`CleanReport`]. Every transition consumes the previous
//! stage, so a stage can neither be skipped nor replayed; a new run starts
//! from a new [`Cleaner`].

use crate::error::Result;
use crate::reconcile::{reconcile, Reconciliation, Remover};
use crate::references::{extract_references, ReferenceSet};
use crate::types::{CleanReport, CleaningStats, VaultEntry};
use crate::vault::Vault;
use std::path::PathBuf;

/// Idle run over a vault.
#[derive(Debug, Clone, Copy)]
pub struct Cleaner<'a> {
    vault: &'a Vault,
}

/// The vault has been walked.
#[derive(Debug, Clone)]
pub struct Scanned<'a> {
    vault: &'a Vault,
    notes: Vec<VaultEntry>,
    attachments: Vec<VaultEntry>,
    stats: CleaningStats,
}

/// Every note has been read.
#[derive(Debug, Clone)]
pub struct Extracted<'a> {
    vault: &'a Vault,
    attachments: Vec<VaultEntry>,
    references: ReferenceSet,
    skipped_notes: Vec<PathBuf>,
    stats: CleaningStats,
}

/// Unused attachments have been dealt with.
#[derive(Debug, Clone)]
pub struct Reconciled {
    vault: PathBuf,
    dry_run: bool,
    reconciliation: Reconciliation,
    skipped_notes: Vec<PathBuf>,
}

impl<'a> Cleaner<'a> {
    pub fn new(vault: &'a Vault) -> Self {
        Self { vault }
    }

    /// Run every stage and return the report.
    pub fn run<R: Remover + ?Sized>(self, remover: &R) -> Result<CleanReport> {
        Ok(self.scan()?.extract_references().reconcile(remover).finish())
    }

    /// Walk the vault. Fails on an unreadable directory before anything is
    /// deleted.
    pub fn scan(self) -> Result<Scanned<'a>> {
        let scan = self.vault.scan()?;
        let stats = CleaningStats {
            before: scan.attachments.len(),
            after: 0,
        };
        Ok(Scanned {
            vault: self.vault,
            notes: scan.notes,
            attachments: scan.attachments,
            stats,
        })
    }
}

impl<'a> Scanned<'a> {
    pub fn notes(&self) -> &[VaultEntry] {
        &self.notes
    }

    pub fn attachments(&self) -> &[VaultEntry] {
        &self.attachments
    }

    pub fn stats(&self) -> CleaningStats {
        self.stats
    }

    /// Read every note and collect its embeds.
    pub fn extract_references(self) -> Extracted<'a> {
        let extraction = extract_references(&self.notes);
        Extracted {
            vault: self.vault,
            attachments: self.attachments,
            references: extraction.references,
            skipped_notes: extraction.skipped,
            stats: self.stats,
        }
    }
}

impl Extracted<'_> {
    pub fn references(&self) -> &ReferenceSet {
        &self.references
    }

    pub fn skipped_notes(&self) -> &[PathBuf] {
        &self.skipped_notes
    }

    pub fn stats(&self) -> CleaningStats {
        self.stats
    }

    /// Remove the attachments nothing references.
    pub fn reconcile<R: Remover + ?Sized>(self, remover: &R) -> Reconciled {
        let reconciliation = reconcile(self.attachments, &self.references, remover);
        Reconciled {
            vault: self.vault.root.clone(),
            dry_run: remover.is_dry_run(),
            reconciliation,
            skipped_notes: self.skipped_notes,
        }
    }
}

impl Reconciled {
    pub fn stats(&self) -> CleaningStats {
        self.reconciliation.stats()
    }

    pub fn finish(self) -> CleanReport {
        let stats = self.reconciliation.stats();
        tracing::info!(
            before = stats.before,
            after = stats.after,
            removed = stats.removed(),
            failures = self.reconciliation.failures.len(),
            dry_run = self.dry_run,
            "cleaning finished"
        );

        CleanReport {
            vault: self.vault,
            dry_run: self.dry_run,
            stats,
            removed: self
                .reconciliation
                .removed
                .into_iter()
                .map(|entry| entry.path)
                .collect(),
            failures: self.reconciliation.failures,
            skipped_notes: self.skipped_notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SweepError;
    use crate::reconcile::{DryRun, FsRemover};
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::io;
    use std::path::Path;
    use tempfile::TempDir;

    fn setup_test_vault(files: &[(&str, &str)]) -> (TempDir, Vault) {
        let dir = TempDir::new().unwrap();
        for (file, content) in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content).unwrap();
        }
        let vault = Vault::new(dir.path()).unwrap();
        (dir, vault)
    }

    #[test]
    fn test_end_to_end() {
        let (dir, vault) = setup_test_vault(&[
            ("a.md", "Look: ![[img1.png]]"),
            ("b.md", "no embeds"),
            ("img1.png", "png"),
            ("img2.png", "png"),
        ]);

        let report = Cleaner::new(&vault).run(&FsRemover).unwrap();

        assert_eq!(report.stats, CleaningStats { before: 2, after: 1 });
        assert_eq!(report.stats.removed(), 1);
        assert!(!report.dry_run);
        assert!(dir.path().join("img1.png").exists());
        assert!(!dir.path().join("img2.png").exists());
        assert_eq!(report.removed, vec![vault.root.join("img2.png")]);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_stage_stats() {
        let (_dir, vault) = setup_test_vault(&[
            ("a.md", "![[keep.pdf]]"),
            ("keep.pdf", ""),
            ("drop.pdf", ""),
        ]);

        let scanned = Cleaner::new(&vault).scan().unwrap();
        assert_eq!(scanned.stats(), CleaningStats { before: 2, after: 0 });
        assert_eq!(scanned.notes().len(), 1);
        assert_eq!(scanned.attachments().len(), 2);

        let extracted = scanned.extract_references();
        assert!(extracted.references().contains("keep.pdf"));
        assert_eq!(extracted.stats().before, 2);

        let reconciled = extracted.reconcile(&FsRemover);
        assert_eq!(reconciled.stats(), CleaningStats { before: 2, after: 1 });
        let report = reconciled.finish();
        assert_eq!(report.removed, vec![vault.root.join("drop.pdf")]);
    }

    #[test]
    fn test_second_run_is_noop() {
        let (_dir, vault) = setup_test_vault(&[
            ("a.md", "![[img1.png]]"),
            ("img1.png", ""),
            ("img2.png", ""),
            ("sub/img3.jpg", ""),
        ]);

        let first = Cleaner::new(&vault).run(&FsRemover).unwrap();
        assert_eq!(first.stats.removed(), 2);

        let second = Cleaner::new(&vault).run(&FsRemover).unwrap();
        assert_eq!(second.stats, CleaningStats { before: 1, after: 1 });
        assert_eq!(second.stats.removed(), 0);
    }

    #[test]
    fn test_empty_vault() {
        let (_dir, vault) = setup_test_vault(&[("only.md", "![[missing.png]]")]);

        let report = Cleaner::new(&vault).run(&FsRemover).unwrap();
        assert_eq!(report.stats, CleaningStats::default());
        assert!(report.removed.is_empty());
    }

    #[test]
    fn test_excluded_files_survive() {
        let (dir, vault) = setup_test_vault(&[
            ("note.md", ""),
            (".gitignore", "target"),
            (".obsidian/app.json", "{}"),
            (".git/config", ""),
        ]);

        let report = Cleaner::new(&vault).run(&FsRemover).unwrap();

        assert_eq!(report.stats, CleaningStats::default());
        assert!(dir.path().join(".gitignore").exists());
        assert!(dir.path().join(".obsidian/app.json").exists());
        assert!(dir.path().join(".git/config").exists());
    }

    #[test]
    fn test_dry_run_report() {
        let (dir, vault) = setup_test_vault(&[("a.md", ""), ("unused.png", "")]);

        let report = Cleaner::new(&vault).run(&DryRun).unwrap();

        assert!(report.dry_run);
        assert_eq!(report.stats, CleaningStats { before: 1, after: 0 });
        assert!(dir.path().join("unused.png").exists());
    }

    #[test]
    fn test_skipped_notes_reported() {
        let (dir, vault) = setup_test_vault(&[("ok.md", "![[a.png]]"), ("a.png", "")]);
        fs::write(dir.path().join("bad.md"), b"![[b.png]]\xff").unwrap();
        fs::write(dir.path().join("b.png"), b"").unwrap();

        let report = Cleaner::new(&vault).run(&FsRemover).unwrap();

        assert_eq!(report.skipped_notes, vec![vault.root.join("bad.md")]);
        assert_eq!(report.stats, CleaningStats { before: 2, after: 1 });
    }

    #[test]
    fn test_unclosed_embed_does_not_cost_attachment() {
        let (dir, vault) = setup_test_vault(&[
            ("howto.md", "Type ![[ to embed a file.\n\n![[diagram.png]]"),
            ("table.md", "| ![[photo.png\\|100]] |"),
            ("diagram.png", ""),
            ("photo.png", ""),
        ]);

        let report = Cleaner::new(&vault).run(&FsRemover).unwrap();

        assert_eq!(report.stats, CleaningStats { before: 2, after: 2 });
        assert!(dir.path().join("diagram.png").exists());
        assert!(dir.path().join("photo.png").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_aborts_before_deleting() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, vault) = setup_test_vault(&[
            ("a.md", ""),
            ("unused.png", ""),
            ("locked/note.md", "![[unused.png]]"),
        ]);
        let locked = dir.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not apply to root.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = Cleaner::new(&vault).run(&FsRemover);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(result, Err(SweepError::Walk { .. })));
        assert!(dir.path().join("unused.png").exists());
    }

    struct DenyNamed(&'static str);

    impl Remover for DenyNamed {
        fn remove(&self, path: &Path) -> io::Result<()> {
            if path.ends_with(self.0) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            }
            fs::remove_file(path)
        }
    }

    #[test]
    fn test_partial_failure_completes() {
        let (dir, vault) = setup_test_vault(&[
            ("a.md", ""),
            ("deletable.png", ""),
            ("protected.png", ""),
        ]);

        let report = Cleaner::new(&vault).run(&DenyNamed("protected.png")).unwrap();

        assert_eq!(report.stats, CleaningStats { before: 2, after: 1 });
        assert_eq!(report.stats.removed(), 1);
        assert!(report.has_failures());
        assert_eq!(report.failures[0].name, "protected.png");
        assert!(dir.path().join("protected.png").exists());
        assert!(!dir.path().join("deletable.png").exists());
    }
}
