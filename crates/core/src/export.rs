//! Scheduling of Google-Sheets exports for explore query results.
//!
//! The export itself runs in a background worker; this module only checks
//! the caller's ability and hands a typed payload to a [`JobScheduler`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ability::{ensure_can, Action, PermissionChecker, SessionUser, Subject, SubjectKind};
use crate::error::CoreError;
use crate::types::JobId;

/// Task name under which sheet uploads are queued.
pub const TASK_UPLOAD_GSHEET_FROM_QUERY: &str = "uploadGsheetFromQuery";

/// Export options supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadMetricGsheet {
    pub project_uuid: Uuid,
    pub explore_id: String,
    /// The query to run, passed through to the worker unchanged.
    pub metric_query: serde_json::Value,
    #[serde(default)]
    pub column_order: Vec<String>,
    #[serde(default)]
    pub show_table_names: bool,
    #[serde(default)]
    pub custom_labels: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub hidden_fields: Option<Vec<String>>,
    #[serde(default)]
    pub pivot_config: Option<serde_json::Value>,
}

/// The payload queued for the worker: the options plus who asked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadMetricGsheetPayload {
    #[serde(flatten)]
    pub options: UploadMetricGsheet,
    pub user_uuid: Uuid,
    pub organization_uuid: Uuid,
}

/// Identifier of a queued job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledJob {
    pub job_id: JobId,
}

/// Accepts typed payloads for background execution.
#[async_trait]
pub trait JobScheduler: Send + Sync {
    async fn upload_gsheet_from_query(
        &self,
        payload: &UploadMetricGsheetPayload,
    ) -> Result<JobId, CoreError>;
}

/// Queue a sheet upload on behalf of `user`.
///
/// Fails with [`CoreError::Forbidden`] when the user cannot manage CSV
/// exports in the target project.
pub async fn schedule_gsheet_upload(
    checker: &dyn PermissionChecker,
    scheduler: &dyn JobScheduler,
    user: &SessionUser,
    options: UploadMetricGsheet,
) -> Result<ScheduledJob, CoreError> {
    let subject = Subject::new(
        SubjectKind::ExportCsv,
        user.organization_uuid,
        options.project_uuid,
    );
    ensure_can(checker, user, Action::Manage, &subject)?;

    let payload = UploadMetricGsheetPayload {
        options,
        user_uuid: user.user_uuid,
        organization_uuid: user.organization_uuid,
    };
    let job_id = scheduler.upload_gsheet_from_query(&payload).await?;
    Ok(ScheduledJob { job_id })
}
