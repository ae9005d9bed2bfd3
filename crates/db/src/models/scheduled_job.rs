//! Models for the `scheduled_jobs` queue table.

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;
use vantage_core::types::Timestamp;

/// Status of a job that has been queued but not yet picked up.
pub const JOB_STATUS_SCHEDULED: &str = "scheduled";

/// A row from the `scheduled_jobs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScheduledJob {
    pub job_id: Uuid,
    pub task: String,
    pub payload: serde_json::Value,
    pub status: String,
    pub created_at: Timestamp,
}
