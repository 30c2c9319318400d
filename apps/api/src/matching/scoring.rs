//! Scoring Client: pluggable seam between the engine and the reasoning service.
//!
//! `AppState` holds an `Arc<dyn MatchScorer>`. Production uses `LlmMatchScorer`;
//! tests substitute scripted scorers.

use async_trait::async_trait;
use tracing::debug;

use crate::errors::MatchError;
use crate::llm_client::LlmClient;
use crate::matching::prompts::MATCH_SYSTEM;

/// Sends one rendered prompt to the reasoning service and returns its raw text.
///
/// Implementations report every failure as `MatchError::ScoringUnavailable`;
/// the orchestrator treats that as a per-candidate skip.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, MatchError>;
}

/// Scorer backed by the shared LLM client.
pub struct LlmMatchScorer(pub LlmClient);

#[async_trait]
impl MatchScorer for LlmMatchScorer {
    async fn complete(&self, prompt: &str) -> Result<String, MatchError> {
        let text = self
            .0
            .complete(prompt, MATCH_SYSTEM)
            .await
            .map_err(|e| MatchError::ScoringUnavailable(e.to_string()))?;
        debug!("Scoring response: {} chars from {}", text.len(), self.0.model());
        Ok(text)
    }
}
