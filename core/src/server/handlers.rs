//! Request handlers.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::state::SharedState;
use crate::guard::{Moderation, Role};

#[derive(Serialize)]
pub(super) struct HealthResponse {
    status: &'static str,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Deserialize)]
pub(super) struct AnalyzeRequest {
    repo_url: String,
}

#[derive(Serialize)]
pub(super) struct AnalyzeResponse {
    status: &'static str,
    analysis: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// POST /analyze — review every supported source file of a repository.
pub async fn analyze(
    State(state): State<SharedState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let result = state.analyzer.analyze(&request.repo_url).await?;
    Ok(Json(AnalyzeResponse {
        status: "success",
        analysis: result.analysis,
        message: result.message,
    }))
}

#[derive(Deserialize)]
pub(super) struct ModerateRequest {
    content: String,
    #[serde(default)]
    role: Role,
}

/// POST /moderate — classify one piece of content against the taxonomy.
pub async fn moderate(
    State(state): State<SharedState>,
    Json(request): Json<ModerateRequest>,
) -> Result<Json<Moderation>, ApiError> {
    let result = state.guard.moderate(&request.content, request.role).await?;
    Ok(Json(result))
}
