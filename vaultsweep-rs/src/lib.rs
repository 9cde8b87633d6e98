//! vaultsweep - remove attachments that no note in an Obsidian-style vault
//! embeds anymore.
//!
//! # Overview
//!
//! A run walks the vault once, splitting files into notes (`.md`) and
//! candidate attachments, collects every `![[file.ext]]` /
//! `![[file.ext|alias]]` embed from the notes, and deletes each attachment
//! whose exact file name no note embeds. `.obsidian/`, `.git/` and
//! `.gitignore` are never touched.
//!
//! # Example
//!
//! ```no_run
//! use vaultsweep::{Cleaner, FsRemover, Vault};
//!
//! let vault = Vault::new("/path/to/vault").unwrap();
//! let report = Cleaner::new(&vault).run(&FsRemover).unwrap();
//! println!("removed {} of {}", report.stats.removed(), report.stats.before);
//! ```

pub mod cleaner;
pub mod cli;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod parser;
pub mod reconcile;
pub mod references;
pub mod types;
pub mod vault;

// Re-export main types at crate root
pub use cleaner::Cleaner;
pub use config::Config;
pub use error::{Result, SweepError};
pub use exclusion::ExclusionSet;
pub use reconcile::{reconcile, DryRun, FsRemover, Reconciliation, Remover};
pub use references::{extract_references, ReferenceSet};
pub use types::*;
pub use vault::{scan, ScanResult, Vault};
