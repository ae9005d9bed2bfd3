//! [`JobScheduler`] backed by the `scheduled_jobs` table.

use async_trait::async_trait;
use sqlx::PgPool;
use vantage_core::error::CoreError;
use vantage_core::export::{JobScheduler, UploadMetricGsheetPayload, TASK_UPLOAD_GSHEET_FROM_QUERY};
use vantage_core::types::JobId;
use vantage_db::repositories::ScheduledJobRepo;

/// Queues jobs in PostgreSQL for the worker to pick up.
pub struct PgJobScheduler {
    pool: PgPool,
}

impl PgJobScheduler {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobScheduler for PgJobScheduler {
    async fn upload_gsheet_from_query(
        &self,
        payload: &UploadMetricGsheetPayload,
    ) -> Result<JobId, CoreError> {
        let payload = serde_json::to_value(payload)
            .map_err(|e| CoreError::Internal(format!("Failed to encode job payload: {e}")))?;
        let job = ScheduledJobRepo::enqueue(&self.pool, TASK_UPLOAD_GSHEET_FROM_QUERY, &payload)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to enqueue sheet upload");
                CoreError::Internal(format!("Failed to enqueue job: {e}"))
            })?;
        Ok(job.job_id.to_string())
    }
}
