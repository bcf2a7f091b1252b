pub mod repo_name;
pub mod types;

pub use repo_name::parse_repo_name;
pub use types::{PrUrl, PullRequest};

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, instrument};

/// Host every accepted PR URL must point at.
pub const GITHUB_HOST: &str = "github.com";

/// Default REST API root for github.com.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";

#[derive(Debug, Error)]
pub enum PrError {
    #[error("Invalid GitHub pull request URL format: <{0}>")]
    MalformedUrl(String),

    #[error("Failed to fetch pull request: {status} {body}")]
    RemoteFetch { status: u16, body: String },

    #[error("GitHub API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode pull request JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

lazy_static! {
    static ref PR_URL_RE: Regex = Regex::new(
        r"^https://github\.com/(?P<owner>[^/]+)/(?P<repo>[^/]+)/pull/(?P<number>[0-9]+)(?:[/?#].*)?$"
    )
    .expect("PR URL regex must compile");
}

/// Decompose a GitHub PR URL into its component parts.
///
/// Expected format: https://github.com/{owner}/{repo}/pull/{number}, optionally
/// followed by a sub-path, query or fragment (`/files`, `#discussion`).
/// Owner and repo are lowercased since GitHub treats them case-insensitively.
pub fn decompose(raw_url: &str) -> Result<PrUrl, PrError> {
    let caps = PR_URL_RE
        .captures(raw_url.trim())
        .ok_or_else(|| PrError::MalformedUrl(raw_url.to_string()))?;

    Ok(PrUrl {
        owner: caps["owner"].to_lowercase(),
        repo: caps["repo"].to_lowercase(),
        pr_number: caps["number"].trim().to_string(),
    })
}

/// Source of pull request records.
/// Implemented by GitHubClient; tests substitute an in-memory fetcher.
#[async_trait]
pub trait PullRequestFetcher: Send + Sync {
    /// Retrieve the PR record for `pr_url`, authenticating with `token`.
    async fn fetch(&self, token: &str, pr_url: &PrUrl) -> Result<PullRequest, PrError>;
}

/// Fetches PR records from the GitHub REST API with a single GET per call.
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: String,
}

impl GitHubClient {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, pr_url: &PrUrl) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}",
            self.api_base, pr_url.owner, pr_url.repo, pr_url.pr_number
        )
    }
}

#[async_trait]
impl PullRequestFetcher for GitHubClient {
    #[instrument(skip(self, token), fields(owner = %pr_url.owner, repo = %pr_url.repo, pr = %pr_url.pr_number))]
    async fn fetch(&self, token: &str, pr_url: &PrUrl) -> Result<PullRequest, PrError> {
        let endpoint = self.endpoint(pr_url);

        debug!(%endpoint, "fetching PR metadata from GitHub API");
        let response = self
            .http
            .get(&endpoint)
            .header("User-Agent", "dokku-pr")
            .header("Accept", ACCEPT_GITHUB_JSON)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            debug!(status = status.as_u16(), "GitHub API returned an error status");
            return Err(PrError::RemoteFetch {
                status: status.as_u16(),
                body,
            });
        }

        let pull_request: PullRequest = serde_json::from_str(&body)?;
        debug!(
            number = ?pull_request.number,
            title = pull_request.title.as_deref().unwrap_or_default(),
            author = pull_request.user.as_ref().and_then(|u| u.login.as_deref()).unwrap_or_default(),
            url = pull_request.html_url.as_deref().unwrap_or_default(),
            branch = pull_request.branch().unwrap_or_default(),
            "received PR metadata"
        );
        Ok(pull_request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_url() -> PrUrl {
        decompose("https://github.com/ucsb-cs156-s25/proj-dining-s25-10/pull/46").unwrap()
    }

    #[test]
    fn test_decompose_valid_pr_url() {
        let url = sample_url();
        assert_eq!(url.owner, "ucsb-cs156-s25");
        assert_eq!(url.repo, "proj-dining-s25-10");
        assert_eq!(url.pr_number, "46");
    }

    #[test]
    fn test_decompose_lowercases_owner_and_repo() {
        let url = decompose("https://github.com/OrgX/RepoY/pull/7").unwrap();
        assert_eq!(
            url,
            PrUrl {
                owner: "orgx".to_string(),
                repo: "repoy".to_string(),
                pr_number: "7".to_string(),
            }
        );
        assert_eq!(decompose("https://github.com/orgx/repoy/pull/7").unwrap(), url);
    }

    #[test]
    fn test_decompose_accepts_trailing_path_and_whitespace() {
        let url = decompose("  https://github.com/org/repo/pull/12/files\n").unwrap();
        assert_eq!(url.pr_number, "12");
        assert!(decompose("https://github.com/org/repo/pull/12#issuecomment-1").is_ok());
    }

    #[test]
    fn test_decompose_invalid_pr_url() {
        for raw in [
            "https://example.com",
            "not-a-url",
            "https://github.com/org/repo/pulls/42",
            "https://github.com/org/repo/issues/42",
            "https://github.com/org/repo/pull/",
            "https://github.com/org/repo/pull/42abc",
            "http://github.com/org/repo/pull/42",
            "https://gitlab.com/org/repo/pull/42",
            "https://github.com/org/repo/pull/٤٦",
        ] {
            match decompose(raw) {
                Err(PrError::MalformedUrl(reported)) => assert_eq!(reported, raw),
                other => panic!("expected MalformedUrl for {raw}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = GitHubClient::new("https://ghe.example.com/api/v3/");
        assert_eq!(
            client.endpoint(&sample_url()),
            "https://ghe.example.com/api/v3/repos/ucsb-cs156-s25/proj-dining-s25-10/pulls/46"
        );
    }

    #[tokio::test]
    async fn test_fetch_sends_auth_and_accept_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/ucsb-cs156-s25/proj-dining-s25-10/pulls/46"))
            .and(header("authorization", "Bearer secret-token"))
            .and(header("accept", ACCEPT_GITHUB_JSON))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "number": 46,
                "title": "Menu items",
                "body": "See https://dining.dokku-10.cs.ucsb.edu",
                "head": {"ref": "feature-menu"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GitHubClient::new(server.uri());
        let pr = client.fetch("secret-token", &sample_url()).await.unwrap();
        assert_eq!(pr.number, Some(46));
        assert_eq!(pr.branch(), Some("feature-menu"));
        assert!(pr.body_text().contains("dokku-10"));
    }

    #[tokio::test]
    async fn test_fetch_non_200_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"Not Found"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = GitHubClient::new(server.uri());
        match client.fetch("t", &sample_url()).await {
            Err(PrError::RemoteFetch { status, body }) => {
                assert_eq!(status, 404);
                assert!(body.contains("Not Found"));
            }
            other => panic!("expected RemoteFetch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_non_200_success_code_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(202).set_body_string("{}"))
            .mount(&server)
            .await;

        let client = GitHubClient::new(server.uri());
        let err = client.fetch("t", &sample_url()).await.unwrap_err();
        assert!(matches!(err, PrError::RemoteFetch { status: 202, .. }));
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = GitHubClient::new(server.uri());
        let err = client.fetch("t", &sample_url()).await.unwrap_err();
        assert!(matches!(err, PrError::Decode(_)));
    }
}
