//! Repository analysis orchestration.
//!
//! Given a repository URL, list its tree, filter to supported source files,
//! fetch contents concurrently, and run the code-review prompt over each
//! non-empty file. One failure in URL parsing or the tree fetch aborts the
//! whole request; per-file fetch failures degrade to empty content and the
//! file is skipped.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;
use log::info;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Semaphore;

use crate::guard::prompt::review_prompt;
use crate::model::{ModelError, TextGenerator};
use crate::sources::{GitHubError, GitHubHost, RepoTree};

/// Source-file extensions eligible for analysis.
pub const SUPPORTED_EXTENSIONS: &[&str] =
    &[".py", ".js", ".ts", ".jsx", ".tsx", ".java", ".go"];

/// Message returned when a repository has no supported files.
pub const NO_FILES_MESSAGE: &str = "No supported code files found";

/// Token budget for one file review.
pub const REVIEW_MAX_TOKENS: u32 = 500;

const DEFAULT_BRANCH: &str = "main";
const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 8;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("invalid repository URL: {0}")]
    InvalidUrl(String),
    #[error(transparent)]
    GitHub(#[from] GitHubError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("task join error: {0}")]
    Join(String),
}

/// Result of analyzing one repository.
#[derive(Debug, Clone, Serialize)]
pub struct RepoAnalysis {
    /// File path → raw review text, ordered by path.
    pub analysis: BTreeMap<String, String>,
    /// Set when the repository contained no supported files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Extract `(owner, repo)` from a URL of the shape `.../<owner>/<repo>`:
/// the last two path segments after trimming trailing slashes.
pub fn parse_repo_url(url: &str) -> Result<(String, String), AnalyzeError> {
    let trimmed = url.trim().trim_end_matches('/');
    let segments: Vec<&str> = trimmed.split('/').collect();
    if segments.len() < 2 {
        return Err(AnalyzeError::InvalidUrl(url.to_owned()));
    }
    let owner = segments[segments.len() - 2];
    let repo = segments[segments.len() - 1];
    if owner.is_empty() || repo.is_empty() {
        return Err(AnalyzeError::InvalidUrl(url.to_owned()));
    }
    Ok((owner.to_owned(), repo.to_owned()))
}

/// Filter a tree listing down to analyzable file paths: blobs with a
/// supported extension, in listing order.
pub fn filter_source_files(tree: &RepoTree) -> Vec<String> {
    tree.tree
        .iter()
        .filter(|entry| {
            entry.entry_type == "blob"
                && SUPPORTED_EXTENSIONS
                    .iter()
                    .any(|ext| entry.path.ends_with(ext))
        })
        .map(|entry| entry.path.clone())
        .collect()
}

/// Orchestrates the code-review pipeline across one repository.
pub struct RepoAnalyzer {
    host: Arc<dyn GitHubHost>,
    model: Arc<dyn TextGenerator>,
    max_concurrent_fetches: usize,
}

impl RepoAnalyzer {
    pub fn new(host: Arc<dyn GitHubHost>, model: Arc<dyn TextGenerator>) -> Self {
        Self {
            host,
            model,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }

    pub fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit;
        self
    }

    pub async fn analyze(&self, repo_url: &str) -> Result<RepoAnalysis, AnalyzeError> {
        let (owner, repo) = parse_repo_url(repo_url)?;

        let tree = self.host.fetch_tree(&owner, &repo, DEFAULT_BRANCH).await?;
        let files = filter_source_files(&tree);

        if files.is_empty() {
            return Ok(RepoAnalysis {
                analysis: BTreeMap::new(),
                message: Some(NO_FILES_MESSAGE.to_owned()),
            });
        }

        info!("analyzing {owner}/{repo}: {} candidate files", files.len());

        // Fetch all file contents concurrently, bounded by a semaphore, and
        // join before any analysis begins.
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_fetches));
        let tasks: Vec<_> = files
            .into_iter()
            .map(|path| {
                let sem = Arc::clone(&semaphore);
                let host = Arc::clone(&self.host);
                let owner = owner.clone();
                let repo = repo.clone();
                tokio::spawn(async move {
                    let _permit = sem.acquire().await.expect("semaphore closed unexpectedly");
                    let content = host.fetch_raw(&owner, &repo, DEFAULT_BRANCH, &path).await?;
                    Ok::<_, GitHubError>((path, content))
                })
            })
            .collect();

        let mut fetched = Vec::with_capacity(tasks.len());
        for joined in join_all(tasks).await {
            let pair = joined.map_err(|e| AnalyzeError::Join(e.to_string()))??;
            fetched.push(pair);
        }

        // Reviews run sequentially against the single shared model.
        let mut analysis = BTreeMap::new();
        for (path, content) in fetched {
            if content.trim().is_empty() {
                continue;
            }
            let review = self
                .model
                .generate(&review_prompt(&content), REVIEW_MAX_TOKENS)
                .await?;
            analysis.insert(path, review);
        }

        Ok(RepoAnalysis {
            analysis,
            message: None,
        })
    }
}
