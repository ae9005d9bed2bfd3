//! Session token primitives.
//!
//! - [`jwt`] -- JWT session-token validation (and minting for tooling/tests).

pub mod jwt;
