//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod scheduled_job_repo;
pub mod validation_repo;
mod validation_report;

pub use scheduled_job_repo::ScheduledJobRepo;
pub use validation_repo::ValidationRepo;
