//! Azure DevOps API client module.
//!
//! This module wraps the `git` area of the Azure DevOps REST API behind the
//! two operations needed to open a pull request: listing a project's
//! repositories and creating the pull request itself.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ado_pr::api::AzureDevOpsClient;
//! use secrecy::SecretString;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AzureDevOpsClient::new(
//!     "my-org".to_string(),
//!     &SecretString::from("my-pat".to_string()),
//! )?;
//!
//! let id = client.resolve_repository_id("my-project", "my-repo").await?;
//! println!("Repository ID: {id}");
//! # Ok(())
//! # }
//! ```

mod client;
mod mappers;
pub mod traits;

pub use client::AzureDevOpsClient;
pub use mappers::pull_request_web_url;
pub use traits::{GitOperations, PullRequestOperations, RealGitOperations, RepositoryOperations};
