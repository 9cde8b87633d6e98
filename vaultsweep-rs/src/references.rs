//! Attachment references collected from note content.

use crate::parser::parse_embeds;
use crate::types::VaultEntry;
use std::collections::HashSet;
use std::path::PathBuf;
use unicode_normalization::UnicodeNormalization;

/// Deduplicated set of referenced attachment names (NFC).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSet {
    names: HashSet<String>,
}

impl ReferenceSet {
    /// Whether an attachment name is referenced. Exact match only.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Whether this entry's name is referenced.
    pub fn references(&self, entry: &VaultEntry) -> bool {
        self.contains(&entry.match_name())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Add every file embed in `content`.
    fn add_from_content(&mut self, content: &str) {
        for embed in parse_embeds(content) {
            let name = embed.file_name();
            tracing::trace!(
                target = %embed.target,
                fragment = ?embed.fragment,
                alias = ?embed.alias,
                line = embed.line,
                "found embed"
            );
            if !name.is_empty() {
                self.names.insert(name);
            }
        }
    }
}

impl<S: Into<String>> FromIterator<S> for ReferenceSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|s| {
                    let s: String = s.into();
                    s.nfc().collect::<String>()
                })
                .collect(),
        }
    }
}

/// Result of reading every note.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub references: ReferenceSet,

    /// Notes that could not be read as UTF-8 text.
    pub skipped: Vec<PathBuf>,
}

/// References embedded in a single piece of note content.
pub fn references_in(content: &str) -> ReferenceSet {
    let mut set = ReferenceSet::default();
    set.add_from_content(content);
    set
}

/// Read every note and collect the attachment names it embeds.
///
/// A note that cannot be read, or is not valid UTF-8, is skipped and listed
/// in [`Extraction::skipped`]. Never touches the filesystem otherwise.
pub fn extract_references(notes: &[VaultEntry]) -> Extraction {
    let mut extraction = Extraction::default();

    for note in notes {
        let bytes = match std::fs::read(&note.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(path = %note.path.display(), error = %e, "skipping unreadable note");
                extraction.skipped.push(note.path.clone());
                continue;
            }
        };

        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(_) => {
                tracing::warn!(path = %note.path.display(), "skipping note that is not valid UTF-8");
                extraction.skipped.push(note.path.clone());
                continue;
            }
        };

        let before = extraction.references.len();
        extraction.references.add_from_content(&content);
        tracing::debug!(
            path = %note.path.display(),
            new_references = extraction.references.len() - before,
            "extracted references"
        );
    }

    tracing::info!(
        references = extraction.references.len(),
        skipped = extraction.skipped.len(),
        "collected references"
    );

    extraction
}
