//! Axum route handlers for the Matching API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::engine::{run_matching, MatchRun, RunOptions};
use crate::models::match_result::MatchRow;
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: i64 = 50;
const MAX_LIST_LIMIT: i64 = 100;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunMatchingRequest {
    pub job_id: Uuid,
    #[serde(default)]
    pub requested_by: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct RunMatchingResponse {
    pub success: bool,
    #[serde(flatten)]
    pub run: MatchRun,
}

#[derive(Debug, Deserialize)]
pub struct ListMatchesQuery {
    pub limit: Option<i64>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/matching/run
///
/// Scores every available candidate against the job and persists one match per pair.
/// Partial failures are reported in `skipped`; only an unknown job is an error.
pub async fn handle_run_matching(
    State(state): State<AppState>,
    Json(request): Json<RunMatchingRequest>,
) -> Result<Json<RunMatchingResponse>, AppError> {
    let options = RunOptions {
        concurrency: state.config.match_concurrency,
        requested_by: request.requested_by,
    };

    let run = run_matching(
        state.store.as_ref(),
        state.scorer.as_ref(),
        request.job_id,
        &options,
    )
    .await?;

    Ok(Json(RunMatchingResponse { success: true, run }))
}

/// GET /api/v1/jobs/:job_id/matches?limit=n
///
/// Persisted matches for a job, best first.
pub async fn handle_list_matches(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Query(query): Query<ListMatchesQuery>,
) -> Result<Json<Vec<MatchRow>>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    if !(1..=MAX_LIST_LIMIT).contains(&limit) {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {MAX_LIST_LIMIT}"
        )));
    }

    if state.store.find_job(job_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }

    let matches = state.store.matches_for_job(job_id, limit).await?;
    Ok(Json(matches))
}
