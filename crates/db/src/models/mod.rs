//! Persistence-shaped row structs.
//!
//! Each submodule contains:
//! - `FromRow` structs matching what the repository queries select
//! - `into_entity` conversions into the `modrepo_core` domain types
//! - borrowed `New*Row` structs holding the values bound on insert
//!
//! Column types are restricted to what the `Any` driver decodes on both
//! backends: `BIGINT` ids, `INT` metrics, `SMALLINT` flags, `VARCHAR`
//! strings and Unix-second timestamps.

use modrepo_core::error::CoreError;

pub mod car;
pub mod catalog;
pub mod track;
pub mod user;

/// Stored representation of a boolean flag.
pub fn flag_from_bool(value: bool) -> i16 {
    i16::from(value)
}

pub fn flag_to_bool(value: i16) -> bool {
    value != 0
}

/// Re-tag an enum parse failure on a stored column as an internal error.
///
/// A bad value in the database is a data problem, not a client mistake.
pub(crate) fn stored<T>(column: &str, parsed: Result<T, CoreError>) -> Result<T, CoreError> {
    parsed.map_err(|e| CoreError::Internal(format!("corrupt value in column '{column}': {e}")))
}
