//! # ado-pr
//!
//! Opens pull requests in Azure DevOps repositories. Given a repository URL,
//! the source and target branches, a title, a description, and a Personal
//! Access Token, it:
//!
//! - parses the organization, project, and repository from the URL
//! - optionally resolves the repository ID
//! - qualifies both branches as `refs/heads/...`
//! - submits the pull request and returns its URL
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ado_pr::{RepoCredentials, open_pr};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let url = open_pr(
//!     "https://dev.azure.com/myorg/myproj/_git/myrepo",
//!     "Sync",
//!     "Rendered manifests",
//!     "main",
//!     "render",
//!     &RepoCredentials::from_pat("my-pat"),
//! )
//! .await?;
//! println!("Opened {url}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod pull_request;
pub mod refs;
pub mod repo_url;

// Re-export commonly used types for convenience
pub use api::AzureDevOpsClient;
pub use config::Config;
pub use error::PrError;
pub use models::{PullRequestResult, RepoCredentials, RepositoryAddressing};
pub use pull_request::{PullRequestOpener, open_pr};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
