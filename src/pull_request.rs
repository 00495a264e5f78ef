//! Opening a pull request from a repository URL.
//!
//! The flow is linear: validate the PAT, parse the URL, build the client,
//! optionally resolve the repository ID, normalize both branch refs, and
//! submit the pull request. Any failure aborts the call; nothing is retried.
//!
//! Dropping the returned future cancels whichever request is in flight.
//! [`PullRequestOpener::timeout`] bounds the whole chain.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::api::{AzureDevOpsClient, GitOperations};
use crate::error::PrError;
use crate::models::{
    PullRequestRequest, PullRequestResult, RepoCredentials, RepositoryAddressing, RepositoryTarget,
};
use crate::refs::{ensure_ref_format, short_branch_name};
use crate::repo_url::parse_repo_url;

/// Opens a pull request and returns its URL.
///
/// Uses ID addressing and no timeout; see [`PullRequestOpener`] for options.
///
/// # Errors
///
/// Returns a [`PrError`] describing the first step that failed.
///
/// # Example
///
/// ```rust,no_run
/// use ado_pr::{RepoCredentials, open_pr};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let url = open_pr(
///     "https://dev.azure.com/myorg/myproj/_git/myrepo",
///     "Sync",
///     "Rendered manifests",
///     "main",
///     "render",
///     &RepoCredentials::from_pat("my-pat"),
/// )
/// .await?;
/// println!("{url}");
/// # Ok(())
/// # }
/// ```
pub async fn open_pr(
    repo_url: &str,
    title: &str,
    description: &str,
    target_branch: &str,
    source_branch: &str,
    creds: &RepoCredentials,
) -> Result<String, PrError> {
    PullRequestOpener::new()
        .open(
            repo_url,
            title,
            description,
            target_branch,
            source_branch,
            creds,
        )
        .await
        .map(|result| result.url)
}

/// Configurable pull request creation.
#[derive(Clone, Default)]
pub struct PullRequestOpener {
    addressing: RepositoryAddressing,
    timeout: Option<Duration>,
    backend: Option<Arc<dyn GitOperations>>,
}

impl PullRequestOpener {
    /// Creates an opener with ID addressing, no timeout, and the live API.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects how the repository is addressed in the create call.
    #[must_use]
    pub fn addressing(mut self, addressing: RepositoryAddressing) -> Self {
        self.addressing = addressing;
        self
    }

    /// Bounds the whole operation.
    #[must_use]
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the live API with another Git operations backend.
    #[must_use]
    pub fn with_backend(mut self, backend: Arc<dyn GitOperations>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Opens a pull request.
    ///
    /// # Errors
    ///
    /// Returns [`PrError::MissingCredential`] before any network call when the
    /// PAT is blank, [`PrError::TimedOut`] when the timeout elapses, or the
    /// error of the step that failed.
    pub async fn open(
        &self,
        repo_url: &str,
        title: &str,
        description: &str,
        target_branch: &str,
        source_branch: &str,
        creds: &RepoCredentials,
    ) -> Result<PullRequestResult, PrError> {
        let run = self.run(
            repo_url,
            title,
            description,
            target_branch,
            source_branch,
            creds,
        );

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, run)
                .await
                .map_err(|_| PrError::TimedOut(limit))?,
            None => run.await,
        }
    }

    async fn run(
        &self,
        repo_url: &str,
        title: &str,
        description: &str,
        target_branch: &str,
        source_branch: &str,
        creds: &RepoCredentials,
    ) -> Result<PullRequestResult, PrError> {
        let pat = creds.pat()?;
        let identity = parse_repo_url(repo_url)?;

        let client = match &self.backend {
            Some(backend) => {
                AzureDevOpsClient::with_operations(identity.organization.clone(), backend.clone())
            }
            None => AzureDevOpsClient::new(identity.organization.clone(), pat)?,
        };

        let repository = match self.addressing {
            RepositoryAddressing::Id => RepositoryTarget::Id(
                client
                    .resolve_repository_id(&identity.project, &identity.repository)
                    .await?,
            ),
            RepositoryAddressing::Name => RepositoryTarget::Name(identity.repository.clone()),
        };
        debug!(?repository, "addressing repository");

        let request = PullRequestRequest {
            organization: identity.organization,
            project: identity.project,
            repository,
            title: title.to_string(),
            description: description.to_string(),
            source_ref: ensure_ref_format(source_branch),
            target_ref: ensure_ref_format(target_branch),
        };

        info!(
            organization = %request.organization,
            project = %request.project,
            source = short_branch_name(&request.source_ref),
            target = short_branch_name(&request.target_ref),
            "opening pull request"
        );

        client.create_pull_request(&request).await
    }
}
