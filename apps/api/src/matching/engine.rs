//! Batch Orchestrator: scores every available candidate against one job.
//!
//! Flow: find_job → available_candidates → per candidate
//!       (build prompt → score → parse → upsert) → rank → top N.
//!
//! Each candidate pipeline yields its own `Result`. Failures are logged and
//! recorded as skips; only a missing job or an unreadable store ends the run.

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{MatchError, MatchErrorKind};
use crate::matching::parser::parse_match_response;
use crate::matching::prompts::build_match_prompt;
use crate::matching::scoring::MatchScorer;
use crate::matching::store::{MatchStore, MatchUpsert};
use crate::models::candidate::CandidateProfile;
use crate::models::job::JobSpec;

/// Number of ranked summaries returned to the caller. All matches are persisted.
pub const TOP_MATCHES_RETURNED: usize = 10;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub candidate_id: Uuid,
    pub candidate_name: String,
    pub score: i32,
    pub rationale: Vec<String>,
    pub gaps: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedCandidate {
    pub candidate_id: Uuid,
    pub candidate_name: String,
    pub reason: MatchErrorKind,
    pub message: String,
}

/// Outcome of one run. `matches` is ranked and truncated; `total_matches`
/// counts every candidate that was scored and persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRun {
    pub job_id: Uuid,
    pub total_candidates: usize,
    pub total_matches: usize,
    pub matches: Vec<MatchSummary>,
    pub skipped: Vec<SkippedCandidate>,
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Candidate pipelines in flight at once. 1 processes strictly in sequence.
    pub concurrency: usize,
    pub requested_by: Option<Uuid>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            requested_by: None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Orchestration
// ────────────────────────────────────────────────────────────────────────────

pub async fn run_matching(
    store: &dyn MatchStore,
    scorer: &dyn MatchScorer,
    job_id: Uuid,
    options: &RunOptions,
) -> Result<MatchRun, MatchError> {
    info!("Fetching job details for {job_id}");
    let job = store
        .find_job(job_id)
        .await
        .map_err(MatchError::Storage)?
        .ok_or(MatchError::JobNotFound(job_id))?;

    let mut candidates = store
        .available_candidates()
        .await
        .map_err(MatchError::Storage)?;
    candidates.retain(CandidateProfile::is_available);
    info!("Found {} available candidates for job {job_id}", candidates.len());

    // Pipelines are built up front and boxed so the run future stays `Send`
    // behind an axum handler. `buffered` yields in input order, so results line
    // up with the read order no matter which pipeline finishes first.
    let job = &job;
    let requested_by = options.requested_by;
    let pipelines: Vec<BoxFuture<'_, (&CandidateProfile, Result<MatchSummary, MatchError>)>> =
        candidates
            .iter()
            .map(|candidate| {
                async move {
                    let outcome = score_candidate(store, scorer, job, candidate, requested_by).await;
                    (candidate, outcome)
                }
                .boxed()
            })
            .collect();

    let outcomes: Vec<(&CandidateProfile, Result<MatchSummary, MatchError>)> =
        stream::iter(pipelines)
            .buffered(options.concurrency.max(1))
            .collect()
            .await;

    let mut summaries = Vec::with_capacity(outcomes.len());
    let mut skipped = Vec::new();

    for (candidate, outcome) in outcomes {
        match outcome {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                warn!(
                    "Skipping candidate {} ({}) for job {job_id}: {e}",
                    candidate.id, candidate.full_name
                );
                skipped.push(SkippedCandidate {
                    candidate_id: candidate.id,
                    candidate_name: candidate.full_name.clone(),
                    reason: e.kind(),
                    message: e.to_string(),
                });
            }
        }
    }

    let total_matches = summaries.len();
    let matches = rank_matches(summaries, TOP_MATCHES_RETURNED);

    info!(
        "Completed matching for job {job_id}: {total_matches} matched, {} skipped",
        skipped.len()
    );

    Ok(MatchRun {
        job_id,
        total_candidates: candidates.len(),
        total_matches,
        matches,
        skipped,
    })
}

/// One candidate through prompt → score → parse → persist.
async fn score_candidate(
    store: &dyn MatchStore,
    scorer: &dyn MatchScorer,
    job: &JobSpec,
    candidate: &CandidateProfile,
    requested_by: Option<Uuid>,
) -> Result<MatchSummary, MatchError> {
    info!("Analyzing match for candidate: {}", candidate.full_name);

    let prompt = build_match_prompt(job, candidate);
    let raw = scorer.complete(&prompt).await?;
    let analysis = parse_match_response(&raw)?;

    let out_of_range = analysis.out_of_range_fields();
    if !out_of_range.is_empty() {
        warn!(
            "Candidate {} scored outside 0-100 on {:?}; storing as returned",
            candidate.id, out_of_range
        );
    }

    store
        .upsert_match(MatchUpsert {
            job_id: job.id,
            candidate_id: candidate.id,
            analysis: &analysis,
            created_by: requested_by,
        })
        .await
        .map_err(|e| MatchError::PersistenceFailure(format!("{e:#}")))?;

    Ok(MatchSummary {
        candidate_id: candidate.id,
        candidate_name: candidate.full_name.clone(),
        score: analysis.overall_score,
        rationale: analysis.rationale,
        gaps: analysis.gaps,
    })
}

/// Sorts by score descending and keeps the first `limit`.
/// The sort is stable: equal scores keep processing order.
pub fn rank_matches(mut summaries: Vec<MatchSummary>, limit: usize) -> Vec<MatchSummary> {
    summaries.sort_by(|a, b| b.score.cmp(&a.score));
    summaries.truncate(limit);
    summaries
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
