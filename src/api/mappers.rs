//! Conversions from azure_devops_rust_api models to this crate's models.

use azure_devops_rust_api::git::models as git_models;

use crate::models::{PullRequestRequest, PullRequestResult, RepositoryRef};

/// Convert a listed GitRepository to its (id, name) projection.
impl From<git_models::GitRepository> for RepositoryRef {
    fn from(repo: git_models::GitRepository) -> Self {
        RepositoryRef {
            id: repo.id,
            name: repo.name,
        }
    }
}

/// Convert a created GitPullRequest to the returned result.
impl From<git_models::GitPullRequest> for PullRequestResult {
    fn from(pr: git_models::GitPullRequest) -> Self {
        let web_url = pr
            .repository
            .web_url
            .as_deref()
            .map(|base| pull_request_web_url(base, pr.pull_request_id));

        PullRequestResult {
            id: pr.pull_request_id,
            url: pr.url,
            web_url,
        }
    }
}

/// Build the create options body from a normalized request.
impl From<&PullRequestRequest> for git_models::GitPullRequestCreateOptions {
    fn from(request: &PullRequestRequest) -> Self {
        let mut options = git_models::GitPullRequestCreateOptions::new(
            request.source_ref.clone(),
            request.target_ref.clone(),
            request.title.clone(),
        );
        options.description = Some(request.description.clone());
        options
    }
}

/// Builds the browser URL of a pull request from its repository web URL.
#[must_use]
pub fn pull_request_web_url(repository_web_url: &str, pull_request_id: i32) -> String {
    format!(
        "{}/pullrequest/{}",
        repository_web_url.trim_end_matches('/'),
        pull_request_id
    )
}
