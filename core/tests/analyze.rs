//! Orchestrator integration tests driven through in-memory collaborators.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use codeguard::analyze::{AnalyzeError, RepoAnalyzer, NO_FILES_MESSAGE};
use codeguard::model::{ModelError, TextGenerator};
use codeguard::sources::{GitHubError, GitHubHost, RepoTree, TreeEntry};

/// In-memory repository host with a fixed tree and file contents. Paths
/// absent from `contents` come back empty, mirroring the swallowed non-200
/// raw-fetch behavior.
struct FakeHost {
    tree: RepoTree,
    contents: HashMap<String, String>,
    tree_fails: bool,
}

impl FakeHost {
    fn new(paths: &[(&str, &str)], contents: &[(&str, &str)]) -> Self {
        Self {
            tree: RepoTree {
                tree: paths
                    .iter()
                    .map(|(path, entry_type)| TreeEntry {
                        path: (*path).to_owned(),
                        entry_type: (*entry_type).to_owned(),
                    })
                    .collect(),
            },
            contents: contents
                .iter()
                .map(|(path, body)| ((*path).to_owned(), (*body).to_owned()))
                .collect(),
            tree_fails: false,
        }
    }

    fn failing() -> Self {
        Self {
            tree: RepoTree::default(),
            contents: HashMap::new(),
            tree_fails: true,
        }
    }
}

#[async_trait]
impl GitHubHost for FakeHost {
    async fn fetch_tree(
        &self,
        _owner: &str,
        _repo: &str,
        _branch: &str,
    ) -> Result<RepoTree, GitHubError> {
        if self.tree_fails {
            return Err(GitHubError::Api {
                status: 404,
                body: "Not Found".to_owned(),
            });
        }
        Ok(self.tree.clone())
    }

    async fn fetch_raw(
        &self,
        _owner: &str,
        _repo: &str,
        _branch: &str,
        path: &str,
    ) -> Result<String, GitHubError> {
        Ok(self.contents.get(path).cloned().unwrap_or_default())
    }
}

/// Model fake that tags each review with the reviewed content length.
struct ReviewModel;

#[async_trait]
impl TextGenerator for ReviewModel {
    async fn generate(&self, prompt: &str, _max_new_tokens: u32) -> Result<String, ModelError> {
        Ok(format!("review of {} prompt chars", prompt.len()))
    }
}

fn analyzer(host: FakeHost) -> RepoAnalyzer {
    RepoAnalyzer::new(Arc::new(host), Arc::new(ReviewModel))
}

#[tokio::test]
async fn analyzes_supported_non_empty_files_only() {
    let host = FakeHost::new(
        &[
            ("src/main.py", "blob"),
            ("README.md", "blob"),     // unsupported extension
            ("src", "tree"),           // directory, not a blob
            ("web/app.tsx", "blob"),   // content absent: fetched as empty
            ("util/blank.js", "blob"), // whitespace-only content
        ],
        &[
            ("src/main.py", "print('hi')"),
            ("util/blank.js", "   \n\t"),
        ],
    );

    let result = analyzer(host)
        .analyze("https://github.com/octocat/hello")
        .await
        .unwrap();

    assert!(result.message.is_none());
    let paths: Vec<&String> = result.analysis.keys().collect();
    assert_eq!(paths, vec!["src/main.py"]);
    assert!(result.analysis["src/main.py"].starts_with("review of"));
}

#[tokio::test]
async fn empty_match_returns_success_with_message() {
    let host = FakeHost::new(&[("README.md", "blob"), ("docs", "tree")], &[]);

    let result = analyzer(host)
        .analyze("https://github.com/octocat/docs-only")
        .await
        .unwrap();

    assert!(result.analysis.is_empty());
    assert_eq!(result.message.as_deref(), Some(NO_FILES_MESSAGE));
}

#[tokio::test]
async fn analysis_is_ordered_by_path() {
    let host = FakeHost::new(
        &[("z.py", "blob"), ("a.py", "blob"), ("m.go", "blob")],
        &[("z.py", "z"), ("a.py", "a"), ("m.go", "m")],
    );

    let result = analyzer(host).analyze("octocat/hello").await.unwrap();
    let paths: Vec<&String> = result.analysis.keys().collect();
    assert_eq!(paths, vec!["a.py", "m.go", "z.py"]);
}

#[tokio::test]
async fn tree_fetch_failure_aborts_request() {
    let err = analyzer(FakeHost::failing())
        .analyze("https://github.com/octocat/missing")
        .await
        .unwrap_err();

    match err {
        AnalyzeError::GitHub(inner) => {
            assert!(inner.to_string().contains("GitHub API error: 404"));
        }
        other => panic!("expected GitHub error, got {other}"),
    }
}

#[tokio::test]
async fn invalid_url_is_rejected() {
    let err = analyzer(FakeHost::new(&[], &[]))
        .analyze("not-a-repo-url")
        .await
        .unwrap_err();
    assert!(matches!(err, AnalyzeError::InvalidUrl(_)));
}

#[tokio::test]
async fn model_failure_aborts_request() {
    struct BrokenModel;

    #[async_trait]
    impl TextGenerator for BrokenModel {
        async fn generate(&self, _: &str, _: u32) -> Result<String, ModelError> {
            Err(ModelError::Api {
                status: 500,
                body: "out of memory".to_owned(),
            })
        }
    }

    let host = FakeHost::new(&[("a.py", "blob")], &[("a.py", "x = 1")]);
    let analyzer = RepoAnalyzer::new(Arc::new(host), Arc::new(BrokenModel));

    let err = analyzer.analyze("octocat/hello").await.unwrap_err();
    assert!(matches!(err, AnalyzeError::Model(_)));
}

#[tokio::test]
async fn bounded_fetch_limit_still_fetches_everything() {
    let host = FakeHost::new(
        &[("a.py", "blob"), ("b.py", "blob"), ("c.py", "blob")],
        &[("a.py", "a"), ("b.py", "b"), ("c.py", "c")],
    );
    let analyzer = analyzer(host).with_max_concurrent_fetches(1);

    let result = analyzer.analyze("octocat/hello").await.unwrap();
    assert_eq!(result.analysis.len(), 3);
}
