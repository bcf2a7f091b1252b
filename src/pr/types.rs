use serde::Deserialize;

/// Parsed components of a GitHub PR URL.
/// Extracted by decompose() in pr/mod.rs; owner and repo are lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrUrl {
    pub owner: String,
    pub repo: String,
    /// Digits only, kept as text so it round-trips into the API path unchanged.
    pub pr_number: String,
}

impl PrUrl {
    /// Browsable repository URL (e.g., https://github.com/org/repo)
    pub fn repo_url(&self) -> String {
        format!("https://{}/{}/{}", super::GITHUB_HOST, self.owner, self.repo)
    }
}

/// Components of a course-project repository name such as `proj-dining-s25-10`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoNameParts {
    /// Project name (e.g., "dining")
    pub project: String,
    /// Term letter + two-digit year (e.g., "s25")
    pub term: String,
    /// Two-digit team number (e.g., "10")
    pub team: String,
}

/// The pull request document returned by the GitHub REST API.
///
/// Only `body` and `head.ref` drive the resolution; the remaining fields are
/// optional and only show up in logs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequest {
    pub number: Option<u64>,
    pub title: Option<String>,
    pub html_url: Option<String>,
    pub user: Option<User>,
    /// Free-text description; GitHub sends `null` for an empty one.
    pub body: Option<String>,
    pub head: Option<HeadRef>,
}

impl PullRequest {
    /// Source branch name, if the record carries one.
    pub fn branch(&self) -> Option<&str> {
        self.head.as_ref().and_then(|head| head.branch.as_deref())
    }

    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct User {
    pub login: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeadRef {
    #[serde(rename = "ref")]
    pub branch: Option<String>,
}
