pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/v1/matching/run", post(handlers::handle_run_matching))
        .route(
            "/api/v1/jobs/:job_id/matches",
            get(handlers::handle_list_matches),
        )
        .with_state(state)
}
