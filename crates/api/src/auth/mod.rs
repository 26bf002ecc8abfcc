//! Authentication primitives.
//!
//! - [`jwt`] -- HS256 access-token generation and validation.
//!
//! Password digests are computed by the store; see `modrepo_db::Dialect`.

pub mod jwt;
