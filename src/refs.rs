//! Branch reference normalization.

/// Prefix Azure DevOps requires on branch names in pull request payloads.
pub const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Qualifies a branch name as `refs/heads/<name>`.
///
/// Names that already carry the prefix are returned unchanged, so applying
/// this twice gives the same result as applying it once.
///
/// ```rust
/// use ado_pr::refs::ensure_ref_format;
///
/// assert_eq!(ensure_ref_format("main"), "refs/heads/main");
/// assert_eq!(ensure_ref_format("refs/heads/main"), "refs/heads/main");
/// ```
#[must_use]
pub fn ensure_ref_format(branch: &str) -> String {
    if branch.starts_with(BRANCH_REF_PREFIX) {
        branch.to_string()
    } else {
        format!("{BRANCH_REF_PREFIX}{branch}")
    }
}

/// Strips the `refs/heads/` prefix for display.
#[must_use]
pub fn short_branch_name(branch: &str) -> &str {
    branch.strip_prefix(BRANCH_REF_PREFIX).unwrap_or(branch)
}
