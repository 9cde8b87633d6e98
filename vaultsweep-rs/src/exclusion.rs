//! Directories and filenames that are never scanned or deleted.

use crate::config::{expand_tilde, Config};
use crate::error::Result;
use glob::Pattern;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Directories under the vault root that are always skipped.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[".obsidian", ".git"];

/// Filenames that are always skipped.
pub const DEFAULT_EXCLUDED_FILES: &[&str] = &[".gitignore"];

/// Immutable exclusion policy for one run.
///
/// Directory membership is by path component prefix, so `.git` does not
/// exclude `.github`. Whether the directories exist is never checked.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    dirs: HashSet<PathBuf>,
    files: HashSet<String>,
    patterns: Vec<Pattern>,
}

impl ExclusionSet {
    /// The built-in exclusions for a vault root.
    pub fn for_root(root: &Path) -> Self {
        Self {
            dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| root.join(d)).collect(),
            files: DEFAULT_EXCLUDED_FILES.iter().map(|f| f.to_string()).collect(),
            patterns: Vec::new(),
        }
    }

    /// The built-in exclusions plus everything the config adds.
    pub fn from_config(root: &Path, config: &Config) -> Result<Self> {
        let mut set = Self::for_root(root);

        for dir in &config.exclude_dirs {
            let expanded = expand_tilde(dir)?;
            let dir = if expanded.is_absolute() {
                expanded
            } else {
                root.join(expanded)
            };
            set.dirs.insert(dir);
        }

        set.files.extend(config.exclude_files.iter().cloned());

        for raw in &config.exclude_patterns {
            set.patterns.push(Pattern::new(raw)?);
        }

        Ok(set)
    }

    /// Whether `path` is an excluded directory or lies inside one.
    pub fn is_excluded_dir(&self, path: &Path) -> bool {
        self.dirs.iter().any(|dir| path.starts_with(dir))
    }

    /// Whether a base filename is excluded by name or pattern.
    pub fn is_excluded_file(&self, name: &str) -> bool {
        self.files.contains(name) || self.patterns.iter().any(|p| p.matches(name))
    }

    /// Whether a file at `path` must be left alone.
    pub fn excludes(&self, path: &Path) -> bool {
        if path.parent().is_some_and(|parent| self.is_excluded_dir(parent)) {
            return true;
        }
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| self.is_excluded_file(name))
    }
}
