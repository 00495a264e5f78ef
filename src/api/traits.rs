//! Traits for the Azure DevOps Git operations used to open a pull request.
//!
//! These traits abstract the hosted API so the orchestration in
//! [`crate::pull_request`] can run against a mock in unit tests.

use anyhow::Result;
use async_trait::async_trait;
use azure_devops_rust_api::git;
use azure_devops_rust_api::git::models as git_models;

use crate::models::{PullRequestRequest, PullRequestResult, RepositoryRef};

/// Trait for repository operations.
#[async_trait]
pub trait RepositoryOperations: Send + Sync {
    /// Lists all repositories in a project.
    ///
    /// # Arguments
    ///
    /// * `organization` - Azure DevOps organization name
    /// * `project` - Project name
    async fn list_repositories(
        &self,
        organization: &str,
        project: &str,
    ) -> Result<Vec<RepositoryRef>>;
}

/// Trait for pull request operations.
#[async_trait]
pub trait PullRequestOperations: Send + Sync {
    /// Creates a pull request described by `request`.
    async fn create_pull_request(&self, request: &PullRequestRequest)
    -> Result<PullRequestResult>;
}

/// Combined trait for all Git operations this crate performs.
pub trait GitOperations: RepositoryOperations + PullRequestOperations + Send + Sync {}

impl<T> GitOperations for T where T: RepositoryOperations + PullRequestOperations + Send + Sync {}

/// Real implementation wrapping `azure_devops_rust_api::git::Client`.
#[derive(Clone)]
pub struct RealGitOperations {
    client: git::Client,
}

impl RealGitOperations {
    /// Creates a new RealGitOperations wrapper.
    pub fn new(client: git::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RepositoryOperations for RealGitOperations {
    async fn list_repositories(
        &self,
        organization: &str,
        project: &str,
    ) -> Result<Vec<RepositoryRef>> {
        let repos = self
            .client
            .repositories_client()
            .list(organization, project)
            .await?;
        Ok(repos.value.into_iter().map(RepositoryRef::from).collect())
    }
}

#[async_trait]
impl PullRequestOperations for RealGitOperations {
    async fn create_pull_request(
        &self,
        request: &PullRequestRequest,
    ) -> Result<PullRequestResult> {
        let options = git_models::GitPullRequestCreateOptions::from(request);

        let pr = self
            .client
            .pull_requests_client()
            .create(
                &request.organization,
                request.repository.as_path_segment(),
                &request.project,
                options,
            )
            .await?;
        Ok(PullRequestResult::from(pr))
    }
}
