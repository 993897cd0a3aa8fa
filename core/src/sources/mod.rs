//! External repository-hosting collaborators.

pub mod github;

pub use github::{GitHubClient, GitHubError, GitHubHost, RepoTree, TreeEntry};
