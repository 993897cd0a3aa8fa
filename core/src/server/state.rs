//! Shared application state for the HTTP service.
//!
//! The composition root constructs the model handle once at startup and
//! threads it into both pipelines through this state; handlers never
//! construct collaborators themselves.

use std::sync::Arc;

use crate::analyze::RepoAnalyzer;
use crate::guard::Guard;

/// State accessible by all handlers via axum's State extractor.
pub struct AppState {
    pub guard: Guard,
    pub analyzer: RepoAnalyzer,
}

pub type SharedState = Arc<AppState>;
