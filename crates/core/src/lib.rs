//! Domain types and pure logic for the Vantage validation backend.
//!
//! Nothing in this crate touches the database; persistence lives in
//! `vantage-db` and the HTTP surface in `vantage-api`.

pub mod ability;
pub mod error;
pub mod export;
pub mod roles;
pub mod types;
pub mod validation;
