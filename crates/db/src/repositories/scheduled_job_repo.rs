//! Repository for the `scheduled_jobs` queue table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::scheduled_job::{ScheduledJob, JOB_STATUS_SCHEDULED};

/// Column list for `scheduled_jobs` queries.
const COLUMNS: &str = "job_id, task, payload, status, created_at";

/// Enqueues and looks up background jobs.
pub struct ScheduledJobRepo;

impl ScheduledJobRepo {
    /// Queue a job for `task`, returning the generated job row.
    pub async fn enqueue(
        pool: &PgPool,
        task: &str,
        payload: &serde_json::Value,
    ) -> Result<ScheduledJob, sqlx::Error> {
        let query = format!(
            "INSERT INTO scheduled_jobs (task, payload, status) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let job = sqlx::query_as::<_, ScheduledJob>(&query)
            .bind(task)
            .bind(payload)
            .bind(JOB_STATUS_SCHEDULED)
            .fetch_one(pool)
            .await?;
        tracing::info!(job_id = %job.job_id, task, "Job scheduled");
        Ok(job)
    }

    /// Find a queued job by id.
    pub async fn find_by_id(pool: &PgPool, job_id: Uuid) -> Result<Option<ScheduledJob>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scheduled_jobs WHERE job_id = $1");
        sqlx::query_as::<_, ScheduledJob>(&query)
            .bind(job_id)
            .fetch_optional(pool)
            .await
    }
}
