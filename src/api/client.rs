//! Azure DevOps API client implementation using azure_devops_rust_api crate.
//!
//! This module provides the client that resolves repositories and opens pull
//! requests for a single organization.

use azure_devops_rust_api::{Credential, git};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{debug, info};

use super::traits::{GitOperations, RealGitOperations};
use crate::error::PrError;
use crate::models::{PullRequestRequest, PullRequestResult};

/// Azure DevOps API client bound to one organization.
///
/// # Example
///
/// ```rust,no_run
/// use ado_pr::api::AzureDevOpsClient;
/// use secrecy::SecretString;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AzureDevOpsClient::new(
///     "myorg".to_string(),
///     &SecretString::from("my-pat".to_string()),
/// )?;
///
/// let repo_id = client.resolve_repository_id("myproj", "myrepo").await?;
/// println!("Repository ID: {repo_id}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AzureDevOpsClient {
    organization: String,
    git: Arc<dyn GitOperations>,
}

impl AzureDevOpsClient {
    /// Creates a new client authenticating with a Personal Access Token.
    ///
    /// # Security
    ///
    /// The PAT stays wrapped in a SecretString until it is handed to the
    /// API credential.
    ///
    /// # Errors
    ///
    /// Returns [`PrError::ClientConstruction`] when the organization is empty,
    /// since every request URL is rooted at it.
    pub fn new(organization: String, pat: &SecretString) -> Result<Self, PrError> {
        if organization.trim().is_empty() {
            return Err(PrError::ClientConstruction {
                source: anyhow::anyhow!("organization name is empty"),
            });
        }

        let credential = Credential::from_pat(pat.expose_secret().to_string());
        let git_client = git::ClientBuilder::new(credential).build();

        Ok(Self::with_operations(
            organization,
            Arc::new(RealGitOperations::new(git_client)),
        ))
    }

    /// Creates a client over an arbitrary Git operations backend.
    pub fn with_operations(organization: String, git: Arc<dyn GitOperations>) -> Self {
        Self { organization, git }
    }

    /// Returns the organization name.
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Looks up the ID of a repository by exact name.
    ///
    /// # Errors
    ///
    /// Returns [`PrError::RepositoryListing`] when the listing call fails and
    /// [`PrError::RepositoryNotFound`] when no repository carries the name.
    pub async fn resolve_repository_id(
        &self,
        project: &str,
        repository: &str,
    ) -> Result<String, PrError> {
        let repos = self
            .git
            .list_repositories(&self.organization, project)
            .await
            .map_err(|source| PrError::RepositoryListing { source })?;

        debug!(project, count = repos.len(), "listed repositories");

        repos
            .into_iter()
            .find(|repo| repo.name == repository)
            .map(|repo| repo.id)
            .ok_or_else(|| PrError::RepositoryNotFound {
                repository: repository.to_string(),
                project: project.to_string(),
            })
    }

    /// Submits a pull request.
    ///
    /// # Errors
    ///
    /// Returns [`PrError::PullRequestCreation`] carrying the service error.
    pub async fn create_pull_request(
        &self,
        request: &PullRequestRequest,
    ) -> Result<PullRequestResult, PrError> {
        let result = self
            .git
            .create_pull_request(request)
            .await
            .map_err(|source| PrError::PullRequestCreation { source })?;

        info!(
            pull_request_id = result.id,
            url = %result.url,
            "created pull request"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::traits::{PullRequestOperations, RepositoryOperations};
    use crate::models::{RepositoryRef, RepositoryTarget};
    use async_trait::async_trait;

    struct FixedRepos {
        repos: Vec<RepositoryRef>,
        fail: bool,
    }

    #[async_trait]
    impl RepositoryOperations for FixedRepos {
        async fn list_repositories(
            &self,
            _organization: &str,
            _project: &str,
        ) -> anyhow::Result<Vec<RepositoryRef>> {
            if self.fail {
                anyhow::bail!("TF200016: The following project does not exist: myproj");
            }
            Ok(self.repos.clone())
        }
    }

    #[async_trait]
    impl PullRequestOperations for FixedRepos {
        async fn create_pull_request(
            &self,
            request: &PullRequestRequest,
        ) -> anyhow::Result<PullRequestResult> {
            if self.fail {
                anyhow::bail!("TF401179: An active pull request already exists");
            }
            Ok(PullRequestResult {
                id: 1,
                url: format!("https://example/{}", request.repository.as_path_segment()),
                web_url: None,
            })
        }
    }

    fn client(repos: Vec<RepositoryRef>, fail: bool) -> AzureDevOpsClient {
        AzureDevOpsClient::with_operations(
            "myorg".to_string(),
            Arc::new(FixedRepos { repos, fail }),
        )
    }

    fn repo(id: &str, name: &str) -> RepositoryRef {
        RepositoryRef {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    /// # Client Creation
    ///
    /// Tests that a real client can be built without network access.
    ///
    /// ## Test Scenario
    /// - Builds a client from a PAT
    ///
    /// ## Expected Outcome
    /// - Construction succeeds and keeps the organization
    #[tokio::test]
    async fn test_client_creation() {
        let client =
            AzureDevOpsClient::new("myorg".to_string(), &SecretString::from("pat".to_string()))
                .unwrap();
        assert_eq!(client.organization(), "myorg");
    }

    #[tokio::test]
    async fn test_client_creation_empty_organization() {
        let result = AzureDevOpsClient::new(String::new(), &SecretString::from("pat".to_string()));
        assert!(matches!(result, Err(PrError::ClientConstruction { .. })));
    }

    /// # Repository ID Resolution
    ///
    /// Tests the exact-name scan over listed repositories.
    ///
    /// ## Test Scenario
    /// - Lists three repositories with similar names
    ///
    /// ## Expected Outcome
    /// - Only the exact match is returned
    #[tokio::test]
    async fn test_resolve_repository_id() {
        let client = client(
            vec![
                repo("id-1", "myrepo-old"),
                repo("id-2", "myrepo"),
                repo("id-3", "MyRepo"),
            ],
            false,
        );
        let id = client
            .resolve_repository_id("myproj", "myrepo")
            .await
            .unwrap();
        assert_eq!(id, "id-2");
    }

    /// # Repository Not Found
    ///
    /// ## Test Scenario
    /// - Resolves a name absent from the listing
    ///
    /// ## Expected Outcome
    /// - RepositoryNotFound names the repository and project
    #[tokio::test]
    async fn test_resolve_repository_id_not_found() {
        let client = client(vec![repo("id-1", "other")], false);
        let err = client
            .resolve_repository_id("myproj", "myrepo")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "repository 'myrepo' not found in project 'myproj'"
        );
    }

    /// # Repository Listing Failure
    ///
    /// ## Test Scenario
    /// - The listing call fails
    ///
    /// ## Expected Outcome
    /// - RepositoryListing wraps the underlying message
    #[tokio::test]
    async fn test_resolve_repository_id_listing_error() {
        let client = client(vec![], true);
        let err = client
            .resolve_repository_id("myproj", "myrepo")
            .await
            .unwrap_err();
        assert!(matches!(err, PrError::RepositoryListing { .. }));
        assert!(err.to_string().contains("TF200016"));
    }

    #[tokio::test]
    async fn test_create_pull_request_error_is_wrapped() {
        let client = client(vec![], true);
        let request = PullRequestRequest {
            organization: "myorg".to_string(),
            project: "myproj".to_string(),
            repository: RepositoryTarget::Name("myrepo".to_string()),
            title: "Sync".to_string(),
            description: String::new(),
            source_ref: "refs/heads/render".to_string(),
            target_ref: "refs/heads/main".to_string(),
        };
        let err = client.create_pull_request(&request).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "error creating pull request: TF401179: An active pull request already exists"
        );
    }
}
