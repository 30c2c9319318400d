//! Persistence seam for matching: job/candidate readers and the match persister.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::matching::parser::MatchAnalysis;
use crate::models::candidate::{CandidateProfile, STATUS_AVAILABLE};
use crate::models::job::JobSpec;
use crate::models::match_result::{MatchRow, STATUS_PENDING};

/// Parameters for writing one match.
pub struct MatchUpsert<'a> {
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub analysis: &'a MatchAnalysis,
    pub created_by: Option<Uuid>,
}

impl MatchUpsert<'_> {
    /// Empty rationale is stored as NULL, never as an empty array.
    fn rationale(&self) -> Option<Vec<String>> {
        (!self.analysis.rationale.is_empty()).then(|| self.analysis.rationale.clone())
    }
}

#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn find_job(&self, job_id: Uuid) -> Result<Option<JobSpec>>;

    /// Candidates with status `available`, oldest first. This order is the
    /// processing order a run uses to break score ties.
    async fn available_candidates(&self) -> Result<Vec<CandidateProfile>>;

    /// Insert-or-replace keyed on `(job_id, candidate_id)`.
    /// On replace, `assessment_score`, `status` and `created_at` are kept.
    async fn upsert_match(&self, upsert: MatchUpsert<'_>) -> Result<MatchRow>;

    async fn matches_for_job(&self, job_id: Uuid, limit: i64) -> Result<Vec<MatchRow>>;
}

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgMatchStore {
    pool: PgPool,
}

impl PgMatchStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchStore for PgMatchStore {
    async fn find_job(&self, job_id: Uuid) -> Result<Option<JobSpec>> {
        Ok(sqlx::query_as::<_, JobSpec>(
            "SELECT id, title, company, requirements, location FROM jobs WHERE id = $1",
        )
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn available_candidates(&self) -> Result<Vec<CandidateProfile>> {
        Ok(sqlx::query_as::<_, CandidateProfile>(
            r#"
            SELECT id, full_name, title,
                   COALESCE(experience_years, 0) AS experience_years,
                   COALESCE(skills, '{}') AS skills,
                   location, status
            FROM candidates
            WHERE status = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(STATUS_AVAILABLE)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn upsert_match(&self, upsert: MatchUpsert<'_>) -> Result<MatchRow> {
        let analysis = upsert.analysis;

        Ok(sqlx::query_as::<_, MatchRow>(
            r#"
            INSERT INTO matches
                (job_id, candidate_id, overall_score, skill_match_score, experience_score,
                 location_match_score, assessment_score, ai_rationale, gaps, status, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, 0, $7, $8, $9, $10)
            ON CONFLICT (job_id, candidate_id) DO UPDATE SET
                overall_score        = EXCLUDED.overall_score,
                skill_match_score    = EXCLUDED.skill_match_score,
                experience_score     = EXCLUDED.experience_score,
                location_match_score = EXCLUDED.location_match_score,
                ai_rationale         = EXCLUDED.ai_rationale,
                gaps                 = EXCLUDED.gaps,
                created_by           = COALESCE(EXCLUDED.created_by, matches.created_by),
                updated_at           = NOW()
            RETURNING *
            "#,
        )
        .bind(upsert.job_id)
        .bind(upsert.candidate_id)
        .bind(analysis.overall_score)
        .bind(analysis.skill_match)
        .bind(analysis.experience_match)
        .bind(analysis.location_match)
        .bind(upsert.rationale())
        .bind(&analysis.gaps)
        .bind(STATUS_PENDING)
        .bind(upsert.created_by)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn matches_for_job(&self, job_id: Uuid, limit: i64) -> Result<Vec<MatchRow>> {
        Ok(sqlx::query_as::<_, MatchRow>(
            r#"
            SELECT * FROM matches
            WHERE job_id = $1
            ORDER BY overall_score DESC, updated_at DESC
            LIMIT $2
            "#,
        )
        .bind(job_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }
}

#[cfg(test)]
pub mod memory {
    //! In-memory `MatchStore` with the same upsert semantics as `PgMatchStore`.

    use std::collections::HashSet;
    use std::sync::Mutex;

    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    use super::{MatchStore, MatchUpsert};
    use crate::models::candidate::CandidateProfile;
    use crate::models::job::JobSpec;
    use crate::models::match_result::{MatchRow, STATUS_PENDING};

    #[derive(Default)]
    pub struct InMemoryMatchStore {
        pub jobs: Vec<JobSpec>,
        pub candidates: Vec<CandidateProfile>,
        matches: Mutex<Vec<MatchRow>>,
        fail_upserts_for: HashSet<Uuid>,
        fail_reads: bool,
    }

    impl InMemoryMatchStore {
        pub fn new(jobs: Vec<JobSpec>, candidates: Vec<CandidateProfile>) -> Self {
            Self {
                jobs,
                candidates,
                ..Default::default()
            }
        }

        pub fn failing_upserts_for(mut self, candidate_id: Uuid) -> Self {
            self.fail_upserts_for.insert(candidate_id);
            self
        }

        pub fn failing_reads(mut self) -> Self {
            self.fail_reads = true;
            self
        }

        pub fn rows(&self) -> Vec<MatchRow> {
            self.matches.lock().unwrap().clone()
        }

        pub fn row(&self, job_id: Uuid, candidate_id: Uuid) -> Option<MatchRow> {
            self.rows()
                .into_iter()
                .find(|r| r.job_id == job_id && r.candidate_id == candidate_id)
        }

        /// Simulates the assessment flow writing its score.
        pub fn set_assessment_score(&self, job_id: Uuid, candidate_id: Uuid, score: i32) {
            let mut rows = self.matches.lock().unwrap();
            if let Some(row) = rows
                .iter_mut()
                .find(|r| r.job_id == job_id && r.candidate_id == candidate_id)
            {
                row.assessment_score = score;
                row.status = "shortlisted".to_string();
            }
        }
    }

    #[async_trait]
    impl MatchStore for InMemoryMatchStore {
        async fn find_job(&self, job_id: Uuid) -> Result<Option<JobSpec>> {
            if self.fail_reads {
                return Err(anyhow!("connection refused"));
            }
            Ok(self.jobs.iter().find(|j| j.id == job_id).cloned())
        }

        async fn available_candidates(&self) -> Result<Vec<CandidateProfile>> {
            if self.fail_reads {
                return Err(anyhow!("connection refused"));
            }
            Ok(self
                .candidates
                .iter()
                .filter(|c| c.is_available())
                .cloned()
                .collect())
        }

        async fn upsert_match(&self, upsert: MatchUpsert<'_>) -> Result<MatchRow> {
            if self.fail_upserts_for.contains(&upsert.candidate_id) {
                return Err(anyhow!("foreign key violation"));
            }

            let analysis = upsert.analysis;
            let now = Utc::now();
            let mut rows = self.matches.lock().unwrap();

            if let Some(row) = rows
                .iter_mut()
                .find(|r| r.job_id == upsert.job_id && r.candidate_id == upsert.candidate_id)
            {
                row.overall_score = analysis.overall_score;
                row.skill_match_score = analysis.skill_match;
                row.experience_score = analysis.experience_match;
                row.location_match_score = analysis.location_match;
                row.ai_rationale = upsert.rationale();
                row.gaps = analysis.gaps.clone();
                row.created_by = upsert.created_by.or(row.created_by);
                row.updated_at = now;
                return Ok(row.clone());
            }

            let row = MatchRow {
                id: Uuid::new_v4(),
                job_id: upsert.job_id,
                candidate_id: upsert.candidate_id,
                overall_score: analysis.overall_score,
                skill_match_score: analysis.skill_match,
                experience_score: analysis.experience_match,
                location_match_score: analysis.location_match,
                assessment_score: 0,
                ai_rationale: upsert.rationale(),
                gaps: analysis.gaps.clone(),
                status: STATUS_PENDING.to_string(),
                created_by: upsert.created_by,
                created_at: now,
                updated_at: now,
            };
            rows.push(row.clone());
            Ok(row)
        }

        async fn matches_for_job(&self, job_id: Uuid, limit: i64) -> Result<Vec<MatchRow>> {
            if self.fail_reads {
                return Err(anyhow!("connection refused"));
            }
            let mut rows: Vec<MatchRow> = self
                .rows()
                .into_iter()
                .filter(|r| r.job_id == job_id)
                .collect();
            rows.sort_by(|a, b| b.overall_score.cmp(&a.overall_score));
            rows.truncate(limit.max(0) as usize);
            Ok(rows)
        }
    }
}
