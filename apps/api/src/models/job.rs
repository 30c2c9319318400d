use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Read-only view of a job opening. The matching engine never writes jobs.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobSpec {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub requirements: Option<String>,
    pub location: Option<String>,
}
