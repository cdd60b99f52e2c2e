//! Domain error types.

use thiserror::Error;

/// Top-level error type for draws and their collaborators.
///
/// Only `Validation`, `RangeExhausted` and `Unauthorized` reach a caller as
/// failures. The two collaborator variants are logged and absorbed by the
/// engine, which falls back to local generation and local history.
#[derive(Debug, Error)]
pub enum DrawError {
    /// Malformed input that the caller can correct.
    #[error("validation error: {0}")]
    Validation(String),

    /// A unique draw asked for more values than the range holds.
    #[error("cannot draw {requested} unique values from a range of only {available}")]
    RangeExhausted {
        /// Number of values requested.
        requested: u32,
        /// Number of distinct integers in the range.
        available: u64,
    },

    /// The pending-override collaborator could not be reached.
    #[error("override source unavailable: {0}")]
    OverrideUnavailable(String),

    /// A privileged action was attempted without a valid credential.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The history collaborator could not be read or written.
    #[error("history persistence unavailable: {0}")]
    PersistenceUnavailable(String),
}
