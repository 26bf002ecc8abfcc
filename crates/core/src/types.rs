/// Surrogate keys are 64-bit on both backends.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Convert a stored Unix-seconds value into a [`Timestamp`].
///
/// Out-of-range values clamp to the Unix epoch rather than failing the read.
pub fn timestamp_from_unix(secs: i64) -> Timestamp {
    chrono::DateTime::from_timestamp(secs, 0).unwrap_or_default()
}
