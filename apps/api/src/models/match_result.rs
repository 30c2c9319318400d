use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle status given to a match row when it is first created.
pub const STATUS_PENDING: &str = "pending";

/// A persisted match between one job and one candidate.
/// `(job_id, candidate_id)` is unique; re-runs replace the score fields in place.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub overall_score: i32,
    pub skill_match_score: Option<i32>,
    pub experience_score: Option<i32>,
    pub location_match_score: Option<i32>,
    /// Written by the assessment flow, not by matching. Defaults to 0.
    pub assessment_score: i32,
    pub ai_rationale: Option<Vec<String>>,
    pub gaps: Vec<String>,
    pub status: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
