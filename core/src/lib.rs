//! codeguard — content-safety moderation and repository analysis on top of
//! a locally hosted Llama Guard model.
//!
//! Two pipelines share the render-prompt → generate → parse pattern:
//! [`guard`] classifies text against the fixed S1–S13 safety taxonomy, and
//! [`analyze`] fetches a repository's source files and asks the model to
//! critique them. The model host and GitHub are external collaborators
//! reached through the [`model`] and [`sources`] seams.

pub mod analyze;
pub mod guard;
pub mod model;
#[cfg(feature = "server")]
pub mod server;
pub mod sources;
