//! Handlers for the `/gdrive` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use vantage_core::export::{schedule_gsheet_upload, ScheduledJob, UploadMetricGsheet};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/gdrive/upload-gsheet
///
/// Queue an export of an explore query's results to Google Sheets.
/// Returns 202 with the queued job id.
pub async fn upload_gsheet(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UploadMetricGsheet>,
) -> AppResult<(StatusCode, Json<DataResponse<ScheduledJob>>)> {
    let project_uuid = input.project_uuid;
    let job = schedule_gsheet_upload(
        state.permissions.as_ref(),
        state.scheduler.as_ref(),
        &user,
        input,
    )
    .await?;

    tracing::info!(
        job_id = %job.job_id,
        %project_uuid,
        user_uuid = %user.user_uuid,
        "Sheet upload scheduled"
    );
    Ok((StatusCode::ACCEPTED, Json(DataResponse { data: job })))
}
