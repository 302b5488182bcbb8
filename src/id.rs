//! Entry identifier generation
//!
//! New entries are named by random fixed-length alphanumeric strings. The
//! generator is a pure source of candidate identifiers; uniqueness is
//! enforced by the store at creation time, not here.
//!
//! The generator is an injected dependency behind the [`IdGenerator`] trait
//! so tests can substitute a deterministic implementation without changing
//! any caller code.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Trait for identifier generation - allows deterministic sources in tests
pub trait IdGenerator: Send + Sync {
    /// Produce a candidate identifier of `len` characters.
    fn next(&self, len: usize) -> String;
}

/// The default generator: `len` characters drawn uniformly with replacement
/// from `[a-zA-Z0-9]` using the thread-local RNG.
#[derive(Debug, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next(&self, len: usize) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }
}
