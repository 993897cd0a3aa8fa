//! HTTP service entry point.
//!
//! The model handle is constructed exactly once here and injected into both
//! pipelines; request handlers share it for the process lifetime.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use codeguard::analyze::RepoAnalyzer;
use codeguard::guard::Guard;
use codeguard::model::{llama_server, LlamaServerClient, TextGenerator};
use codeguard::server::{self, AppState};
use codeguard::sources::GitHubClient;
use log::info;

const DEFAULT_ADDR: &str = "127.0.0.1:8000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let addr: SocketAddr = std::env::var("CODEGUARD_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_owned())
        .parse()
        .context("invalid CODEGUARD_ADDR")?;
    let model_url = std::env::var("CODEGUARD_MODEL_URL")
        .unwrap_or_else(|_| llama_server::DEFAULT_BASE_URL.to_owned());

    info!("using model server at {model_url}");
    let model: Arc<dyn TextGenerator> = Arc::new(LlamaServerClient::new(model_url));

    let state = Arc::new(AppState {
        guard: Guard::new(Arc::clone(&model)),
        analyzer: RepoAnalyzer::new(Arc::new(GitHubClient::new()), model),
    });

    server::serve(addr, state).await.context("server error")
}
