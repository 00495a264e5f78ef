//! Error types for ado-pr.
//!
//! Every failure on the way to an opened pull request surfaces as a [`PrError`].
//! Failures at an external call boundary keep the underlying error as their
//! source and repeat its text in the message, so callers see what the service
//! actually said.
//!
//! ## Example
//!
//! ```rust
//! use ado_pr::error::PrError;
//! use ado_pr::repo_url::parse_repo_url;
//!
//! let err = parse_repo_url("https://github.com/owner/repo").unwrap_err();
//! assert!(matches!(err, PrError::UnsupportedUrl { .. }));
//! ```

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while opening a pull request.
#[derive(Error, Debug)]
pub enum PrError {
    /// The URL names neither `dev.azure.com` nor a `*.visualstudio.com` host.
    #[error("unsupported Azure DevOps repository URL format: {url}")]
    UnsupportedUrl {
        /// The URL as given.
        url: String,
    },

    /// The URL names a known host but lacks the expected path segments.
    #[error("invalid Azure DevOps repository URL format: {url}")]
    InvalidUrl {
        /// The URL as given.
        url: String,
    },

    /// No Personal Access Token was supplied.
    #[error("Azure DevOps requires a Personal Access Token (PAT) as password")]
    MissingCredential,

    /// The Git API client could not be built.
    #[error("error creating Azure DevOps Git client: {source}")]
    ClientConstruction {
        /// Underlying failure.
        source: anyhow::Error,
    },

    /// Listing the repositories of a project failed.
    #[error("error listing repositories: {source}")]
    RepositoryListing {
        /// Underlying failure.
        source: anyhow::Error,
    },

    /// No repository in the project carries the requested name.
    #[error("repository '{repository}' not found in project '{project}'")]
    RepositoryNotFound {
        /// Repository name that was looked up.
        repository: String,
        /// Project that was searched.
        project: String,
    },

    /// The create-pull-request call failed.
    #[error("error creating pull request: {source}")]
    PullRequestCreation {
        /// Underlying failure.
        source: anyhow::Error,
    },

    /// The whole operation ran past the caller's deadline.
    #[error("opening pull request timed out after {}s", .0.as_secs())]
    TimedOut(Duration),
}

impl PrError {
    /// Returns true when the error was raised before any network traffic.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedUrl { .. } | Self::InvalidUrl { .. } | Self::MissingCredential
        )
    }
}

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The sample configuration file could not be written.
    #[error("Failed to write config file {path}: {source}")]
    Write {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this tool.
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        /// Path of the file.
        path: PathBuf,
        /// Underlying TOML failure.
        source: toml::de::Error,
    },

    /// A configuration value has an unrecognized form.
    #[error("Invalid value '{value}' for {field}")]
    InvalidValue {
        /// Name of the setting.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The home directory could not be determined.
    #[error("Could not determine home directory")]
    NoHomeDirectory,
}
