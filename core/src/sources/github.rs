//! GitHub provider abstraction.
//!
//! Defines a trait for the two repository collaborators — recursive tree
//! listing and raw file content — and a concrete implementation backed by
//! the public GitHub REST and raw-content endpoints.

use std::time::Duration;

use async_trait::async_trait;
use log::warn;
use serde::Deserialize;
use thiserror::Error;

const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_RAW_BASE: &str = "https://raw.githubusercontent.com";

/// Per-fetch timeout. A hanging remote fetch must not stall an analysis
/// request indefinitely.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One entry of a recursive git tree listing.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    /// `"blob"` for files, `"tree"` for directories.
    #[serde(rename = "type")]
    pub entry_type: String,
}

/// Recursive tree listing for one branch of a repository.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepoTree {
    #[serde(default)]
    pub tree: Vec<TreeEntry>,
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Abstraction over the repository host so the HTTP client can be swapped
/// for an in-memory fake in tests.
#[async_trait]
pub trait GitHubHost: Send + Sync {
    /// Fetch the recursive tree listing for `owner/repo` at `branch`.
    /// A non-200 response is a hard failure.
    async fn fetch_tree(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<RepoTree, GitHubError>;

    /// Fetch one file's raw content. A non-200 response yields an empty
    /// string rather than an error; callers skip empty files.
    async fn fetch_raw(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        path: &str,
    ) -> Result<String, GitHubError>;
}

// ---------------------------------------------------------------------------
// GitHubClient
// ---------------------------------------------------------------------------

/// [`GitHubHost`] backed by the public GitHub endpoints. Base URLs are
/// injectable so tests can point at a local stub.
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: String,
    raw_base: String,
}

impl GitHubClient {
    pub fn new() -> Self {
        Self::with_base_urls(GITHUB_API_BASE, GITHUB_RAW_BASE)
    }

    pub fn with_base_urls(api_base: impl Into<String>, raw_base: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("codeguard/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to create HTTP client");

        Self {
            http,
            api_base: api_base.into(),
            raw_base: raw_base.into(),
        }
    }
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GitHubHost for GitHubClient {
    async fn fetch_tree(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<RepoTree, GitHubError> {
        let url = format!(
            "{}/repos/{owner}/{repo}/git/trees/{branch}?recursive=1",
            self.api_base
        );

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GitHubError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    async fn fetch_raw(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        path: &str,
    ) -> Result<String, GitHubError> {
        // Encode each path segment, keeping the separators.
        let encoded_path = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let url = format!("{}/{owner}/{repo}/{branch}/{encoded_path}", self.raw_base);

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            // Swallowed by contract: missing or inaccessible files are
            // treated as "no content", not as an error.
            warn!("raw fetch for {path} returned {}", response.status());
            return Ok(String::new());
        }

        Ok(response.text().await?)
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub API error: {status} - {body}")]
    Api { status: u16, body: String },
    #[error("GitHub request failed: {0}")]
    Http(#[from] reqwest::Error),
}
