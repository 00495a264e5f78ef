//! Data types passed through a pull request creation.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PrError;

/// Credentials for an Azure DevOps repository.
///
/// Azure DevOps authenticates API calls with a Personal Access Token sent as
/// the password of basic credentials; the user name is not checked.
#[derive(Clone, Default)]
pub struct RepoCredentials {
    pub username: Option<String>,
    password: Option<SecretString>,
}

impl RepoCredentials {
    /// Creates credentials holding only a PAT.
    pub fn from_pat(pat: impl Into<String>) -> Self {
        Self {
            username: None,
            password: Some(SecretString::from(pat.into())),
        }
    }

    /// Creates credentials from a user name and password pair.
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password),
        }
    }

    /// Replaces the user name.
    #[must_use]
    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }

    /// Returns the PAT, failing when it is absent or blank.
    ///
    /// # Errors
    ///
    /// Returns [`PrError::MissingCredential`] when no usable token is present.
    pub fn pat(&self) -> Result<&SecretString, PrError> {
        self.password
            .as_ref()
            .filter(|pat| !pat.expose_secret().trim().is_empty())
            .ok_or(PrError::MissingCredential)
    }
}

impl fmt::Debug for RepoCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepoCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// How the create call addresses the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryAddressing {
    /// List the project's repositories and send the matching ID.
    #[default]
    Id,
    /// Send the repository name as parsed from the URL.
    Name,
}

impl RepositoryAddressing {
    /// Parse an addressing mode from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            _ => None,
        }
    }
}

/// Repository reference sent with the create call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryTarget {
    Id(String),
    Name(String),
}

impl RepositoryTarget {
    /// The path value the API accepts for either form.
    #[must_use]
    pub fn as_path_segment(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Name(name) => name,
        }
    }
}

/// A repository as listed in a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub id: String,
    pub name: String,
}

/// Everything the create-pull-request call needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRequest {
    pub organization: String,
    pub project: String,
    pub repository: RepositoryTarget,
    pub title: String,
    pub description: String,
    /// Fully qualified source ref (`refs/heads/...`).
    pub source_ref: String,
    /// Fully qualified target ref (`refs/heads/...`).
    pub target_ref: String,
}

/// A created pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestResult {
    pub id: i32,
    /// API URL of the pull request as reported by the service.
    pub url: String,
    /// Browser URL, when the service reported the repository web URL.
    pub web_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # PAT Validation
    ///
    /// Tests that missing or blank tokens are rejected.
    ///
    /// ## Test Scenario
    /// - Reads the PAT from default, empty, blank, and populated credentials
    ///
    /// ## Expected Outcome
    /// - Only the populated credential yields a token
    #[test]
    fn test_pat_validation() {
        assert!(matches!(
            RepoCredentials::default().pat(),
            Err(PrError::MissingCredential)
        ));
        assert!(matches!(
            RepoCredentials::from_pat("").pat(),
            Err(PrError::MissingCredential)
        ));
        assert!(matches!(
            RepoCredentials::from_pat("   ").pat(),
            Err(PrError::MissingCredential)
        ));

        let creds = RepoCredentials::from_pat("secret-pat");
        assert_eq!(creds.pat().unwrap().expose_secret(), "secret-pat");
    }

    /// # Credential Redaction
    ///
    /// Tests that Debug output never contains the token.
    ///
    /// ## Test Scenario
    /// - Formats credentials with Debug
    ///
    /// ## Expected Outcome
    /// - Output shows the user name and `[REDACTED]` but not the token
    #[test]
    fn test_credentials_debug_redacts_token() {
        let creds = RepoCredentials::new("me", SecretString::from("secret-pat".to_string()));
        let debug = format!("{creds:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("me"));
        assert!(!debug.contains("secret-pat"));
    }

    #[test]
    fn test_addressing_parse() {
        assert_eq!(RepositoryAddressing::parse("id"), Some(RepositoryAddressing::Id));
        assert_eq!(RepositoryAddressing::parse(" Name "), Some(RepositoryAddressing::Name));
        assert_eq!(RepositoryAddressing::parse("uuid"), None);
        assert_eq!(RepositoryAddressing::default(), RepositoryAddressing::Id);
    }

    #[test]
    fn test_repository_target_path_segment() {
        assert_eq!(
            RepositoryTarget::Id("0a1b".to_string()).as_path_segment(),
            "0a1b"
        );
        assert_eq!(
            RepositoryTarget::Name("myrepo".to_string()).as_path_segment(),
            "myrepo"
        );
    }
}
