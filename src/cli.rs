//! Command-line arguments for the `ado-pr` binary.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::ConfigError;
use crate::logging::LogConfig;
use crate::models::RepositoryAddressing;

/// Open a pull request in an Azure DevOps repository.
#[derive(Parser, Clone, Debug, Default)]
#[command(name = "ado-pr", version, about)]
pub struct Args {
    /// Repository URL (https://dev.azure.com/{org}/{project}/_git/{repo} or
    /// https://{org}.visualstudio.com/{project}/_git/{repo})
    #[arg(required_unless_present = "create_config")]
    pub repo_url: Option<String>,

    // Pull Request
    /// Pull request title
    #[arg(long, required_unless_present = "create_config", help_heading = "Pull Request")]
    pub title: Option<String>,

    /// Pull request description
    #[arg(long, default_value = "", help_heading = "Pull Request")]
    pub description: String,

    /// Branch containing the changes
    #[arg(
        short,
        long,
        required_unless_present = "create_config",
        help_heading = "Pull Request"
    )]
    pub source_branch: Option<String>,

    /// Branch to merge into [default: main]
    #[arg(short = 'b', long, help_heading = "Pull Request")]
    pub target_branch: Option<String>,

    // Azure DevOps Connection
    /// Personal Access Token for Azure DevOps API authentication
    #[arg(short = 't', long, help_heading = "Azure DevOps Connection")]
    pub pat: Option<String>,

    /// User name sent with the PAT
    #[arg(long, help_heading = "Azure DevOps Connection")]
    pub username: Option<String>,

    /// How the repository is addressed in the create call [default: id]
    #[arg(long, value_enum, help_heading = "Azure DevOps Connection")]
    pub addressing: Option<RepositoryAddressing>,

    /// Abort after this many seconds (0 disables)
    #[arg(long, help_heading = "Azure DevOps Connection")]
    pub timeout_secs: Option<u64>,

    // Logging
    /// Log level (trace, debug, info, warn, error); logging is off when unset
    #[arg(long, help_heading = "Logging")]
    pub log_level: Option<String>,

    /// Append logs to this file instead of stderr
    #[arg(long, help_heading = "Logging")]
    pub log_file: Option<PathBuf>,

    /// Log format (text, json)
    #[arg(long, help_heading = "Logging")]
    pub log_format: Option<String>,

    /// Write a sample configuration file and exit
    #[arg(long)]
    pub create_config: bool,
}

impl Args {
    /// Configuration layer carried by the command line.
    #[must_use]
    pub fn to_config(&self) -> Config {
        Config {
            pat: self.pat.clone(),
            username: self.username.clone(),
            target_branch: self.target_branch.clone(),
            addressing: self.addressing,
            timeout_secs: self.timeout_secs,
        }
    }

    /// Logging configuration from flags, falling back to the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an unknown level or format.
    pub fn log_config(&self) -> Result<LogConfig, ConfigError> {
        LogConfig::resolve(
            self.log_level.as_deref(),
            self.log_file.clone(),
            self.log_format.as_deref(),
        )
    }
}
