use axum::routing::post;
use axum::Router;

use crate::handlers::gdrive;
use crate::state::AppState;

/// Routes mounted at `/gdrive`.
///
/// ```text
/// POST   /upload-gsheet   -> upload_gsheet
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/upload-gsheet", post(gdrive::upload_gsheet))
}
