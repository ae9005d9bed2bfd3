//! Row structs and insert mappings.
//!
//! Each submodule contains:
//! - `FromRow` structs matching the database rows a repository reads
//! - the mapping from domain DTOs to insert column values

pub mod scheduled_job;
pub mod validation;
