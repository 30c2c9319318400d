use std::sync::Arc;

use crate::config::Config;
use crate::matching::scoring::MatchScorer;
use crate::matching::store::MatchStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Job/candidate readers and the match persister. Default: PgMatchStore.
    pub store: Arc<dyn MatchStore>,
    /// Reasoning-service seam. Default: LlmMatchScorer.
    pub scorer: Arc<dyn MatchScorer>,
}
