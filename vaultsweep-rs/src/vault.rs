//! Vault representation and the scan that partitions it into notes and
//! attachments.

use crate::config::Config;
use crate::error::{Result, SweepError};
use crate::exclusion::ExclusionSet;
use crate::types::{EntryKind, VaultEntry};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Represents an Obsidian vault together with its exclusion policy.
#[derive(Debug, Clone)]
pub struct Vault {
    /// Canonical root path of the vault.
    pub root: PathBuf,
    exclusions: ExclusionSet,
}

/// Output of a scan: two disjoint lists, each sorted by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub notes: Vec<VaultEntry>,
    pub attachments: Vec<VaultEntry>,
}

impl Vault {
    /// Open a vault with the default exclusions.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = canonical_root(root.into())?;
        let exclusions = ExclusionSet::for_root(&root);
        Ok(Self { root, exclusions })
    }

    /// Open a vault with the exclusions the config describes.
    pub fn open(root: impl Into<PathBuf>, config: &Config) -> Result<Self> {
        let root = canonical_root(root.into())?;
        let exclusions = ExclusionSet::from_config(&root, config)?;
        Ok(Self { root, exclusions })
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// Walk the vault once and classify every file.
    pub fn scan(&self) -> Result<ScanResult> {
        scan(&self.root, &self.exclusions)
    }
}

fn canonical_root(root: PathBuf) -> Result<PathBuf> {
    if !root.is_dir() {
        return Err(SweepError::VaultNotFound(root));
    }
    root.canonicalize()
        .map_err(|_| SweepError::VaultNotFound(root))
}

/// Walk `root` recursively and split its files into notes and attachments.
///
/// Excluded directories are pruned, excluded filenames are dropped. Only
/// regular files become entries; symlinks are not followed. An unreadable
/// directory fails the whole scan.
pub fn scan(root: &Path, exclusions: &ExclusionSet) -> Result<ScanResult> {
    if !root.is_dir() {
        return Err(SweepError::VaultNotFound(root.to_path_buf()));
    }

    let mut result = ScanResult::default();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0 || !(e.file_type().is_dir() && exclusions.is_excluded_dir(e.path()))
        });

    for entry in walker {
        let entry = entry.map_err(|e| SweepError::Walk {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if exclusions.excludes(path) {
            tracing::debug!(path = %path.display(), "excluded");
            continue;
        }

        let Some(vault_entry) = VaultEntry::from_path(path) else {
            tracing::warn!(path = %path.display(), "skipping file with non UTF-8 name");
            continue;
        };

        tracing::debug!(path = %path.display(), kind = ?vault_entry.kind, "classified");
        match vault_entry.kind {
            EntryKind::Note => result.notes.push(vault_entry),
            EntryKind::Attachment => result.attachments.push(vault_entry),
        }
    }

    result.notes.sort_by(|a, b| a.path.cmp(&b.path));
    result.attachments.sort_by(|a, b| a.path.cmp(&b.path));

    tracing::info!(
        notes = result.notes.len(),
        attachments = result.attachments.len(),
        "scanned vault"
    );

    Ok(result)
}
