use vantage_core::error::CoreError;

/// Error type for repository methods that can fail with a domain error as
/// well as a database error.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
