use std::sync::Arc;

use vantage_core::ability::PermissionChecker;
use vantage_core::export::JobScheduler;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vantage_db::DbPool,
    /// Server configuration (read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Ability checks for validation and export operations.
    pub permissions: Arc<dyn PermissionChecker>,
    /// Background job dispatcher.
    pub scheduler: Arc<dyn JobScheduler>,
}
