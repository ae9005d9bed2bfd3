//! HTTP surface for project validation reports and sheet exports.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod scheduler;
pub mod state;
