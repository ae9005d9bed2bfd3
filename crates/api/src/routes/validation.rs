//! Route definitions for the `/projects/{project_uuid}/validate` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::validation;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /{project_uuid}/validate                   -> get_validations (?job_id)
/// DELETE /{project_uuid}/validate                   -> delete_project_validations
/// POST   /{project_uuid}/validate/results           -> create_validations
/// DELETE /{project_uuid}/validate/{validation_id}   -> delete_validation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{project_uuid}/validate",
            get(validation::get_validations).delete(validation::delete_project_validations),
        )
        .route(
            "/{project_uuid}/validate/results",
            post(validation::create_validations),
        )
        .route(
            "/{project_uuid}/validate/{validation_id}",
            delete(validation::delete_validation),
        )
}
