//! Error types and exit codes for vaultsweep.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const VAULT_NOT_FOUND: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DELETION_FAILURES: i32 = 4;
}

/// Main error type for vaultsweep operations.
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Vault not found at: {0}")]
    VaultNotFound(PathBuf),

    #[error("Failed to walk vault directory {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl SweepError {
    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            SweepError::VaultNotFound(_) => exit_code::VAULT_NOT_FOUND,
            SweepError::Config(_) | SweepError::TomlParse(_) | SweepError::GlobPattern(_) => {
                exit_code::CONFIG_ERROR
            }
            _ => exit_code::GENERAL_ERROR,
        }
    }
}

/// Result type alias for vaultsweep operations.
pub type Result<T> = std::result::Result<T, SweepError>;

/// Exit code for runs that did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    GeneralError,
    VaultNotFound,
    ConfigError,
    DeletionFailures,
}

impl ExitCode {
    /// Convert to exit code integer.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => exit_code::SUCCESS,
            ExitCode::GeneralError => exit_code::GENERAL_ERROR,
            ExitCode::VaultNotFound => exit_code::VAULT_NOT_FOUND,
            ExitCode::ConfigError => exit_code::CONFIG_ERROR,
            ExitCode::DeletionFailures => exit_code::DELETION_FAILURES,
        }
    }
}
