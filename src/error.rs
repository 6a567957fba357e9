//! Error types for resampling and standard-error estimation.

use thiserror::Error;

/// Errors returned by every fallible operation in this crate.
///
/// All failures are local and synchronous: an operation either returns its
/// full result or one of these variants, with no partial output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResampleError {
    /// A size, count, or distribution parameter is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The named operation received a zero-length sequence.
    #[error("{0}: input must not be empty")]
    EmptyInput(&'static str),

    /// Too few observations for a variance-based computation.
    #[error("insufficient data: need at least {needed} values, got {got}")]
    InsufficientData { needed: usize, got: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ResampleError>;
