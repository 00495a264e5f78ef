//! Configuration management for ado-pr.
//!
//! Settings are layered from lowest to highest precedence:
//! - built-in defaults
//! - a TOML file at `$XDG_CONFIG_HOME/ado-pr/config.toml`
//! - `ADO_PR_*` environment variables
//! - command-line arguments
//!
//! ## Example
//!
//! ```rust,no_run
//! use ado_pr::Config;
//!
//! let file = Config::load_from_file().unwrap();
//! let env = Config::load_from_env().unwrap();
//! let merged = Config::default().merge(file).merge(env);
//! println!("Target branch: {:?}", merged.target_branch);
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::models::{RepoCredentials, RepositoryAddressing};

/// On-disk shape of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    pub pat: Option<String>,
    pub username: Option<String>,
    pub target_branch: Option<String>,
    pub addressing: Option<RepositoryAddressing>,
    pub timeout_secs: Option<u64>,
}

/// Resolved settings for opening a pull request.
#[derive(Clone, Default, PartialEq)]
pub struct Config {
    /// Personal Access Token for authenticating with Azure DevOps.
    pub pat: Option<String>,
    /// User name sent alongside the PAT; Azure DevOps ignores it.
    pub username: Option<String>,
    /// Branch the pull request merges into.
    pub target_branch: Option<String>,
    /// How the repository is addressed in the create call.
    pub addressing: Option<RepositoryAddressing>,
    /// Upper bound on the whole operation, in seconds.
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("pat", &self.pat.as_ref().map(|_| "[REDACTED]"))
            .field("username", &self.username)
            .field("target_branch", &self.target_branch)
            .field("addressing", &self.addressing)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Target branch used when none is configured.
pub const DEFAULT_TARGET_BRANCH: &str = "main";

impl Config {
    /// Built-in defaults.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            target_branch: Some(DEFAULT_TARGET_BRANCH.to_string()),
            addressing: Some(RepositoryAddressing::default()),
            ..Self::default()
        }
    }

    /// Load configuration from the XDG config directory.
    ///
    /// A missing file yields an empty configuration.
    pub fn load_from_file() -> Result<Self, ConfigError> {
        Self::load_from_path(&Self::get_config_path()?)
    }

    /// Load configuration from a specific file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ConfigFile = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            pat: file.pat,
            username: file.username,
            target_branch: file.target_branch,
            addressing: file.addressing,
            timeout_secs: file.timeout_secs,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Unparseable values are reported rather than silently ignored.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let addressing = match std::env::var("ADO_PR_ADDRESSING").ok() {
            Some(value) => Some(RepositoryAddressing::parse(&value).ok_or(
                ConfigError::InvalidValue {
                    field: "ADO_PR_ADDRESSING",
                    value,
                },
            )?),
            None => None,
        };
        let timeout_secs = match std::env::var("ADO_PR_TIMEOUT_SECS").ok() {
            Some(value) => Some(value.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                field: "ADO_PR_TIMEOUT_SECS",
                value,
            })?),
            None => None,
        };

        Ok(Self {
            pat: std::env::var("ADO_PR_PAT").ok(),
            username: std::env::var("ADO_PR_USERNAME").ok(),
            target_branch: std::env::var("ADO_PR_TARGET_BRANCH").ok(),
            addressing,
            timeout_secs,
        })
    }

    /// Get the config file path, honoring `XDG_CONFIG_HOME`.
    pub fn get_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = match std::env::var("XDG_CONFIG_HOME") {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::home_dir()
                .ok_or(ConfigError::NoHomeDirectory)?
                .join(".config"),
        };

        Ok(config_dir.join("ado-pr").join("config.toml"))
    }

    /// Merge this config with another, preferring values from other when they exist
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            pat: other.pat.or(self.pat),
            username: other.username.or(self.username),
            target_branch: other.target_branch.or(self.target_branch),
            addressing: other.addressing.or(self.addressing),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
        }
    }

    /// Credentials built from the configured user name and PAT.
    #[must_use]
    pub fn credentials(&self) -> RepoCredentials {
        RepoCredentials::from_pat(self.pat.clone().unwrap_or_default())
            .with_username(self.username.clone())
    }

    /// Configured timeout; zero disables it.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Create a sample config file for user reference
    ///
    /// Returns the path written, or `None` when a file already exists.
    pub fn create_sample_config() -> Result<Option<PathBuf>, ConfigError> {
        let config_path = Self::get_config_path()?;
        Self::write_sample_config(&config_path)
    }

    fn write_sample_config(config_path: &Path) -> Result<Option<PathBuf>, ConfigError> {
        // Don't overwrite existing config
        if config_path.exists() {
            return Ok(None);
        }

        let write_err = |source| ConfigError::Write {
            path: config_path.to_path_buf(),
            source,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let sample_config = r#"# ado-pr Configuration File
# Location: ~/.config/ado-pr/config.toml (or $XDG_CONFIG_HOME/ado-pr/config.toml)

# Personal Access Token (consider using environment variable ADO_PR_PAT instead)
# pat = "your-pat-token"

# User name sent with the PAT (optional, ignored by Azure DevOps)
# username = "you@example.com"

# Branch pull requests merge into (optional, defaults to "main")
target_branch = "main"

# Repository addressing: "id" resolves the repository ID first, "name" sends the name
addressing = "id"

# Upper bound on the whole operation in seconds (optional, 0 disables)
# timeout_secs = 60
"#;

        fs::write(config_path, sample_config).map_err(write_err)?;
        Ok(Some(config_path.to_path_buf()))
    }
}
