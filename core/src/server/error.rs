//! API error type with automatic JSON error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::analyze::AnalyzeError;
use crate::model::ModelError;

pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        let body = serde_json::json!({ "detail": message });
        (status, axum::Json(body)).into_response()
    }
}

// Every analysis failure — bad URL, tree fetch, model — surfaces as one
// client-facing 400 with the error message as detail.
impl From<AnalyzeError> for ApiError {
    fn from(err: AnalyzeError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
