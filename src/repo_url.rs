//! Repository URL parsing.
//!
//! Extracts the organization, project, and repository name from the URL forms
//! Azure DevOps hands out for a Git repository:
//!
//! - `https://dev.azure.com/{org}/{project}/_git/{repo}`
//! - `https://{org}.visualstudio.com/{project}/_git/{repo}`
//! - `git@ssh.dev.azure.com:v3/{org}/{project}/{repo}`
//! - `{org}@vs-ssh.visualstudio.com:v3/{org}/{project}/{repo}`
//!
//! The SSH forms are also accepted in `ssh://user@host/v3/...` scheme syntax.
//!
//! HTTPS forms are parsed by path segment position only; the segment
//! contents are not validated.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

use crate::error::PrError;

const DEV_AZURE_HOST: &str = "dev.azure.com";
const VISUALSTUDIO_HOST: &str = ".visualstudio.com";
const GIT_SUFFIX: &str = ".git";

/// Organization, project, and repository named by a repository URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoIdentity {
    pub organization: String,
    pub project: String,
    pub repository: String,
}

impl fmt::Display for RepoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.organization, self.project, self.repository)
    }
}

static SSH_MODERN_REGEX: OnceLock<Regex> = OnceLock::new();
static SSH_LEGACY_REGEX: OnceLock<Regex> = OnceLock::new();

fn ssh_modern_regex() -> &'static Regex {
    SSH_MODERN_REGEX.get_or_init(|| {
        Regex::new(r"^(?:ssh://)?[^@\s/]+@ssh\.dev\.azure\.com[:/]v3/([^/]+)/([^/]+)/([^/]+?)/?$")
            .expect("Failed to compile SSH modern regex")
    })
}

fn ssh_legacy_regex() -> &'static Regex {
    SSH_LEGACY_REGEX.get_or_init(|| {
        Regex::new(r"^(?:ssh://)?[^@\s/]+@vs-ssh\.visualstudio\.com[:/]v3/([^/]+)/([^/]+)/([^/]+?)/?$")
            .expect("Failed to compile SSH legacy regex")
    })
}

/// Parses an Azure DevOps repository URL.
///
/// # Errors
///
/// Returns [`PrError::UnsupportedUrl`] when the URL names neither
/// `dev.azure.com` nor a `*.visualstudio.com` host, and
/// [`PrError::InvalidUrl`] when a known host lacks the required segments.
///
/// # Example
///
/// ```rust
/// use ado_pr::repo_url::parse_repo_url;
///
/// let id = parse_repo_url("https://dev.azure.com/myorg/myproj/_git/myrepo.git").unwrap();
/// assert_eq!(id.organization, "myorg");
/// assert_eq!(id.project, "myproj");
/// assert_eq!(id.repository, "myrepo");
/// ```
pub fn parse_repo_url(repo_url: &str) -> Result<RepoIdentity, PrError> {
    let identity = if let Some(identity) = parse_ssh(repo_url) {
        identity
    } else if repo_url.contains(DEV_AZURE_HOST) {
        parse_dev_azure(repo_url)?
    } else if repo_url.contains(VISUALSTUDIO_HOST) {
        parse_visualstudio(repo_url)?
    } else {
        return Err(PrError::UnsupportedUrl {
            url: repo_url.to_string(),
        });
    };

    debug!(
        organization = %identity.organization,
        project = %identity.project,
        repository = %identity.repository,
        "parsed repository URL"
    );
    Ok(identity)
}

fn parse_ssh(repo_url: &str) -> Option<RepoIdentity> {
    let captures = ssh_modern_regex()
        .captures(repo_url)
        .or_else(|| ssh_legacy_regex().captures(repo_url))?;

    Some(RepoIdentity {
        organization: captures[1].to_string(),
        project: captures[2].to_string(),
        repository: strip_git_suffix(&captures[3]).to_string(),
    })
}

/// `[scheme://][user@]dev.azure.com/{org}/{project}/_git/{repo}`
fn parse_dev_azure(repo_url: &str) -> Result<RepoIdentity, PrError> {
    let host_prefix = format!("{DEV_AZURE_HOST}/");
    let path = repo_url
        .find(&host_prefix)
        .map(|idx| &repo_url[idx + host_prefix.len()..])
        .unwrap_or("");

    let parts: Vec<&str> = path.split('/').collect();
    if path.is_empty() || parts.len() < 4 {
        return Err(PrError::InvalidUrl {
            url: repo_url.to_string(),
        });
    }

    Ok(RepoIdentity {
        organization: parts[0].to_string(),
        project: parts[1].to_string(),
        repository: strip_git_suffix(parts[3]).to_string(),
    })
}

/// `https://[user@]{org}.visualstudio.com/{project}/_git/{repo}`
fn parse_visualstudio(repo_url: &str) -> Result<RepoIdentity, PrError> {
    let parts: Vec<&str> = repo_url.split('/').collect();
    if parts.len() < 6 {
        return Err(PrError::InvalidUrl {
            url: repo_url.to_string(),
        });
    }

    let host = parts[2].rsplit('@').next().unwrap_or(parts[2]);
    let organization = host.split('.').next().unwrap_or(host);

    Ok(RepoIdentity {
        organization: organization.to_string(),
        project: parts[3].to_string(),
        repository: strip_git_suffix(parts[5]).to_string(),
    })
}

fn strip_git_suffix(name: &str) -> &str {
    name.strip_suffix(GIT_SUFFIX).unwrap_or(name)
}
