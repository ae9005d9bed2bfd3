//! Request extractors shared by the route handlers.
//!
//! - [`auth`] -- Bearer-token authentication ([`auth::AuthUser`]).

pub mod auth;
