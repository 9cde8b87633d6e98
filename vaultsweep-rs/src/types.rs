//! Shared types for vaultsweep.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Extension that marks a file as a note.
pub const NOTE_EXTENSION: &str = ".md";

/// How a scanned file is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Note,
    Attachment,
}

impl EntryKind {
    /// Classify a base filename.
    pub fn classify(name: &str) -> Self {
        if name.ends_with(NOTE_EXTENSION) {
            EntryKind::Note
        } else {
            EntryKind::Attachment
        }
    }
}

/// A file observed during the vault scan.
///
/// Identity is the path; `name` is what embeds refer to and may repeat
/// across folders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VaultEntry {
    /// Base filename.
    pub name: String,

    /// Absolute location on disk.
    pub path: PathBuf,

    pub kind: EntryKind,
}

impl VaultEntry {
    /// Build an entry from a path, classifying it by extension.
    ///
    /// Returns `None` for paths without a UTF-8 file name.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_string();
        let kind = EntryKind::classify(&name);
        Some(Self {
            name,
            path: path.to_path_buf(),
            kind,
        })
    }

    /// The name in NFC form, as used for reference matching.
    pub fn match_name(&self) -> String {
        self.name.nfc().collect()
    }
}

/// Attachment counts before and after reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningStats {
    pub before: usize,
    pub after: usize,
}

impl CleaningStats {
    /// Number of attachments that went away.
    pub fn removed(&self) -> usize {
        self.before.saturating_sub(self.after)
    }
}

/// An attachment whose removal failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionFailure {
    pub name: String,
    pub path: PathBuf,
    pub error: String,
}

/// Everything a finished run hands to the report sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanReport {
    pub vault: PathBuf,
    pub dry_run: bool,

    /// Attachments removed (or, in a dry run, that would be removed).
    pub removed: Vec<PathBuf>,

    /// Notes whose content could not be read as UTF-8 text.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skipped_notes: Vec<PathBuf>,

    // Tables last so the report also serializes to TOML.
    pub stats: CleaningStats,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub failures: Vec<DeletionFailure>,
}

impl CleanReport {
    /// Whether any deletion failed.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
