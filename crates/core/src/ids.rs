//! Short entry identifiers.
//!
//! Ids are drawn uniformly from `[0-9A-Za-z]` with the thread-local CSPRNG.
//! This layer does not check for collisions; the store retries inserts on
//! a duplicate key instead.

use std::fmt;

use rand::Rng;

/// Length of a generated entry id.
pub const ID_LENGTH: usize = 8;

/// Generate a new random entry id.
pub fn generate_id() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(ID_LENGTH)
        .map(char::from)
        .collect()
}

/// Whether `id` has the shape of a generated id.
pub fn is_well_formed(id: &str) -> bool {
    id.len() == ID_LENGTH && id.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Source of entry ids. The store asks for a fresh one on every insert
/// attempt.
pub trait IdGenerator: Send + Sync + fmt::Debug {
    fn generate(&self) -> String;
}

/// Random ids from [`generate_id`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn generate(&self) -> String {
        generate_id()
    }
}
