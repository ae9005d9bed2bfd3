pub mod gdrive;
pub mod health;
pub mod validation;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /projects/{project_uuid}/validate                  report (GET), clear (DELETE)
/// /projects/{project_uuid}/validate/results          record batch (POST)
/// /projects/{project_uuid}/validate/{validation_id}  dismiss one (DELETE)
///
/// /gdrive/upload-gsheet                              schedule sheet export (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", validation::router())
        .nest("/gdrive", gdrive::router())
}
