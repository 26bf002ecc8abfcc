//! Password salt generation.
//!
//! The store computes the password digest; this module only supplies the
//! per-user salt. Repositories receive a [`SaltSource`] at construction so
//! tests can substitute a deterministic one.

use rand::Rng;

/// Number of alphanumeric characters in a generated salt.
pub const SALT_LENGTH: usize = 30;

/// Source of fresh password salts.
pub trait SaltSource: Send + Sync {
    /// Produce a new salt of [`SALT_LENGTH`] alphanumeric characters.
    fn generate(&self) -> String;
}

/// Salt source backed by the thread-local CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSalt;

impl SaltSource for RandomSalt {
    fn generate(&self) -> String {
        rand::rng()
            .sample_iter(&rand::distr::Alphanumeric)
            .take(SALT_LENGTH)
            .map(char::from)
            .collect()
    }
}
