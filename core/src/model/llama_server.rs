//! [`TextGenerator`] backed by a llama.cpp-style HTTP completion server.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use super::{ModelError, TextGenerator};

/// Default address of a locally hosted completion server.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Generation can be slow on CPU-bound hosts; be generous.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    n_predict: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    content: String,
}

/// HTTP client for a single locally hosted model instance. One instance is
/// constructed by the composition root and shared across all requests.
pub struct LlamaServerClient {
    base_url: String,
    http: reqwest::Client,
}

impl LlamaServerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to create HTTP client");

        Self {
            base_url: base_url.into(),
            http,
        }
    }
}

impl Default for LlamaServerClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl TextGenerator for LlamaServerClient {
    async fn generate(&self, prompt: &str, max_new_tokens: u32) -> Result<String, ModelError> {
        let url = format!("{}/completion", self.base_url.trim_end_matches('/'));
        debug!(
            "requesting completion ({} prompt chars, {max_new_tokens} max tokens)",
            prompt.len()
        );

        let response = self
            .http
            .post(&url)
            .json(&CompletionRequest {
                prompt,
                n_predict: max_new_tokens,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: CompletionResponse = response.json().await?;
        Ok(completion.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_request_wire_shape() {
        let request = CompletionRequest {
            prompt: "hello",
            n_predict: 100,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["prompt"], "hello");
        assert_eq!(json["n_predict"], 100);
    }

    #[test]
    fn test_completion_response_parsing() {
        let parsed: CompletionResponse =
            serde_json::from_str(r#"{"content": "safe", "model": "ignored"}"#).unwrap();
        assert_eq!(parsed.content, "safe");
    }
}
