//! HTTP service exposing the moderation and repository-analysis pipelines.

mod error;
mod handlers;
mod state;

use std::net::SocketAddr;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use log::{debug, info};
use tower_http::cors::CorsLayer;

pub use state::{AppState, SharedState};

/// Log every request method and path.
async fn log_request(request: Request, next: Next) -> Response {
    debug!("{} {}", request.method(), request.uri().path());
    next.run(request).await
}

/// Build the complete router with all REST routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/moderate", post(handlers::moderate))
        .route("/analyze", post(handlers::analyze))
        .layer(axum::middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is terminated.
pub async fn serve(addr: SocketAddr, state: SharedState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {addr}");
    axum::serve(listener, build_router(state)).await
}
