//! Handlers for the `/projects/{project_uuid}/validate` resource.
//!
//! Every handler checks the caller's ability on the project's `Validation`
//! subject before touching the store.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use vantage_core::ability::{ensure_can, Action, SessionUser, Subject, SubjectKind};
use vantage_core::error::CoreError;
use vantage_core::types::{DbId, JobId};
use vantage_core::validation::{CreateValidation, ValidationResponse};
use vantage_db::repositories::ValidationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the report endpoint.
#[derive(Debug, Deserialize)]
pub struct ReportParams {
    pub job_id: Option<JobId>,
}

/// Request body for recording validation results.
#[derive(Debug, Deserialize)]
pub struct CreateValidationsRequest {
    #[serde(default)]
    pub job_id: Option<JobId>,
    pub validations: Vec<CreateValidation>,
}

fn authorize(
    state: &AppState,
    user: &SessionUser,
    action: Action,
    project_uuid: Uuid,
) -> Result<(), CoreError> {
    let subject = Subject::new(
        SubjectKind::Validation,
        user.organization_uuid,
        project_uuid,
    );
    ensure_can(state.permissions.as_ref(), user, action, &subject)
}

/// GET /api/v1/projects/{project_uuid}/validate?job_id=X
///
/// The deduplicated validation report, grouped table, chart, dashboard.
/// Without `job_id` only results recorded outside a job run are returned.
pub async fn get_validations(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(project_uuid): Path<Uuid>,
    Query(params): Query<ReportParams>,
) -> AppResult<Json<DataResponse<Vec<ValidationResponse>>>> {
    authorize(&state, &user, Action::View, project_uuid)?;

    let report = ValidationRepo::get(&state.pool, project_uuid, params.job_id.as_deref()).await?;
    tracing::debug!(%project_uuid, entries = report.len(), "Validation report assembled");
    Ok(Json(DataResponse { data: report }))
}

/// POST /api/v1/projects/{project_uuid}/validate/results
///
/// Record a batch of validation errors atomically. Every record must belong
/// to the path project. Returns 201 with no body.
pub async fn create_validations(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(project_uuid): Path<Uuid>,
    Json(input): Json<CreateValidationsRequest>,
) -> AppResult<StatusCode> {
    authorize(&state, &user, Action::Manage, project_uuid)?;

    if let Some(stray) = input
        .validations
        .iter()
        .find(|v| v.base().project_uuid != project_uuid)
    {
        return Err(AppError::BadRequest(format!(
            "Validation for project {} submitted to project {project_uuid}",
            stray.base().project_uuid
        )));
    }

    ValidationRepo::create(&state.pool, &input.validations, input.job_id.as_deref()).await?;
    Ok(StatusCode::CREATED)
}

/// DELETE /api/v1/projects/{project_uuid}/validate
///
/// Remove every validation result of the project. Returns 204.
pub async fn delete_project_validations(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(project_uuid): Path<Uuid>,
) -> AppResult<StatusCode> {
    authorize(&state, &user, Action::Manage, project_uuid)?;

    let removed = ValidationRepo::delete(&state.pool, project_uuid).await?;
    tracing::info!(%project_uuid, removed, user_uuid = %user.user_uuid, "Project validations cleared");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/projects/{project_uuid}/validate/{validation_id}
///
/// Dismiss one validation result. Returns 204, or 404 when the row does not
/// exist or belongs to another project.
pub async fn delete_validation(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path((project_uuid, validation_id)): Path<(Uuid, DbId)>,
) -> AppResult<StatusCode> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Validation",
            id: validation_id,
        })
    };

    let found = ValidationRepo::get_by_validation_id(&state.pool, validation_id).await?;
    if found.project_uuid != project_uuid {
        return Err(not_found());
    }
    authorize(&state, &user, Action::Manage, found.project_uuid)?;

    if ValidationRepo::delete_validation(&state.pool, validation_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}
