//! Configuration loading and vault path resolution.

use crate::error::{Result, SweepError};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configured vault root.
pub const VAULT_ENV_VAR: &str = "VAULTSWEEP_VAULT";

/// Default vault location, relative to the home directory.
const DEFAULT_VAULT_DIR: &str = "Documents/OBSIDIAN_VAULT";

/// Settings read from `config.toml`.
///
/// Every field is optional in the file; missing ones fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vault root. A leading `~/` is expanded.
    pub vault: Option<String>,

    /// Extra directories to skip, relative to the vault root or absolute.
    /// `.obsidian` and `.git` are always skipped.
    pub exclude_dirs: Vec<String>,

    /// Extra filenames to skip. `.gitignore` is always skipped.
    pub exclude_files: Vec<String>,

    /// Glob patterns matched against filenames (e.g. `*.canvas`).
    pub exclude_patterns: Vec<String>,

    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when neither `-v` nor `RUST_LOG` say otherwise.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load the config file.
    ///
    /// With an explicit path the file must exist. Without one, the default
    /// location is tried and a missing file yields the default config.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(SweepError::Config(format!(
                        "config file not found at {}",
                        path.display()
                    )));
                }
                Self::from_file(path)
            }
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// `<config dir>/vaultsweep/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vaultsweep").join("config.toml"))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Self::from_toml_str(&content)
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Resolve the vault root: CLI flag, then `VAULTSWEEP_VAULT`, then the
    /// config file, then `~/Documents/OBSIDIAN_VAULT`.
    pub fn resolve_vault_path(&self, cli_vault: Option<&Path>) -> Result<PathBuf> {
        self.resolve_vault_path_with(cli_vault, std::env::var_os(VAULT_ENV_VAR))
    }

    fn resolve_vault_path_with(
        &self,
        cli_vault: Option<&Path>,
        env_vault: Option<OsString>,
    ) -> Result<PathBuf> {
        if let Some(path) = cli_vault {
            return expand_tilde(&path.to_string_lossy());
        }

        if let Some(value) = env_vault.filter(|v| !v.is_empty()) {
            return expand_tilde(&value.to_string_lossy());
        }

        if let Some(ref vault) = self.vault {
            return expand_tilde(vault);
        }

        let home = dirs::home_dir().ok_or_else(|| {
            SweepError::Config("home directory not available to locate the vault".to_string())
        })?;
        Ok(home.join(DEFAULT_VAULT_DIR))
    }
}

/// Expand a leading `~` or `~/` to the home directory.
pub fn expand_tilde(raw: &str) -> Result<PathBuf> {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return Ok(PathBuf::from(raw)),
    };

    let home = dirs::home_dir().ok_or_else(|| {
        SweepError::Config(format!("home directory not available to expand '{}'", raw))
    })?;

    if rest.is_empty() {
        Ok(home)
    } else {
        Ok(home.join(rest))
    }
}
