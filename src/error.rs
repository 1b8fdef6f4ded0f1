// Error types for the todo engine

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the todo engine and store.
///
/// A hash that matches no current todo is NOT an error: batch operations
/// report it as a per-item line inside the aggregated result so sibling
/// items still apply.
#[derive(Debug, Error)]
pub enum TodoError {
    /// Malformed recurrence spec; the record is left unchanged.
    #[error("invalid recurrence spec '{0}', expected <count><d|w|m|y>")]
    InvalidRecurrence(String),

    /// Malformed batch input, rejected before any store access.
    #[error("{0}")]
    InvalidInput(String),

    /// The store exists but could not be read or written. Fatal to the
    /// whole call, never retried.
    #[error("todo store {}: {}", .path.display(), .source)]
    StoreIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
