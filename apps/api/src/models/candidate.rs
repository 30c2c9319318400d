use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status value that makes a candidate eligible for a matching run.
pub const STATUS_AVAILABLE: &str = "available";

/// Read-only view of a candidate profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateProfile {
    pub id: Uuid,
    pub full_name: String,
    pub title: Option<String>,
    /// Stored NULLs are read as 0.
    pub experience_years: i32,
    pub skills: Vec<String>,
    pub location: Option<String>,
    pub status: String,
}

impl CandidateProfile {
    pub fn is_available(&self) -> bool {
        self.status == STATUS_AVAILABLE
    }
}
