//! Content-safety moderation pipeline: render prompt → generate → parse.

pub mod categories;
pub mod parse;
pub mod prompt;

use std::sync::Arc;

use futures::future::join_all;
use log::debug;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;

use crate::model::{ModelError, TextGenerator};

pub use parse::{parse_moderation_response, DEFAULT_ECHO_MARKER};
pub use prompt::Role;

/// Token budget for a moderation completion. The response contract is two
/// short lines, so a small budget is plenty.
pub const MODERATION_MAX_TOKENS: u32 = 100;

/// Outcome of classifying one piece of content. Constructed fresh per call
/// and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Moderation {
    pub is_safe: bool,
    /// Category codes exactly as the model emitted them, in order,
    /// duplicates and unknown codes included.
    pub violated_categories: Vec<String>,
    /// `CODE: Label` strings for the known codes only, same relative order.
    pub category_descriptions: Vec<String>,
    /// The model's generation with the prompt echo stripped.
    pub raw_response: String,
}

/// Tunables for the moderation pipeline.
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Delimiter separating the echoed prompt from the model's generation.
    pub echo_marker: String,
    /// Concurrent model invocations allowed during batch moderation.
    pub max_concurrent: usize,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            echo_marker: DEFAULT_ECHO_MARKER.to_owned(),
            max_concurrent: 4,
        }
    }
}

/// Safety classifier tying the prompt template, the generative model, and
/// the response parser together.
pub struct Guard {
    model: Arc<dyn TextGenerator>,
    config: GuardConfig,
}

impl Guard {
    pub fn new(model: Arc<dyn TextGenerator>) -> Self {
        Self::with_config(model, GuardConfig::default())
    }

    pub fn with_config(model: Arc<dyn TextGenerator>, config: GuardConfig) -> Self {
        Self { model, config }
    }

    /// Classify one piece of content under the given role.
    pub async fn moderate(&self, content: &str, role: Role) -> Result<Moderation, ModelError> {
        let rendered = prompt::moderation_prompt(content, role);
        let raw = self.model.generate(&rendered, MODERATION_MAX_TOKENS).await?;
        let result = parse_moderation_response(&raw, &self.config.echo_marker);
        debug!(
            "moderated {} chars as {} ({} violations)",
            content.len(),
            if result.is_safe { "safe" } else { "unsafe" },
            result.violated_categories.len()
        );
        Ok(result)
    }

    /// Classify a batch of contents independently under one fixed role.
    ///
    /// Items run concurrently up to `max_concurrent`, but the output order
    /// always matches the input order regardless of completion order. No
    /// deduplication and no cross-item caching.
    pub async fn moderate_batch(
        &self,
        contents: Vec<String>,
        role: Role,
    ) -> Result<Vec<Moderation>, ModelError> {
        if contents.is_empty() {
            return Ok(Vec::new());
        }

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent));

        let tasks: Vec<_> = contents
            .into_iter()
            .map(|content| {
                let sem = Arc::clone(&semaphore);
                let model = Arc::clone(&self.model);
                let echo_marker = self.config.echo_marker.clone();
                tokio::spawn(async move {
                    let _permit = sem.acquire().await.expect("semaphore closed unexpectedly");
                    let rendered = prompt::moderation_prompt(&content, role);
                    let raw = model.generate(&rendered, MODERATION_MAX_TOKENS).await?;
                    Ok::<_, ModelError>(parse_moderation_response(&raw, &echo_marker))
                })
            })
            .collect();

        // join_all preserves task order, which is input order.
        let mut results = Vec::with_capacity(tasks.len());
        for joined in join_all(tasks).await {
            let result = joined.map_err(|e| ModelError::Join(e.to_string()))??;
            results.push(result);
        }
        Ok(results)
    }
}
