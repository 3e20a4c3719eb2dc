//! Error types raised by repository implementations.

use thiserror::Error;
use tracker_core::TurnOrderError;
use tracker_core::codec::CodecError;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("turn order store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    /// The stored sequence parsed but breaks the turn-order invariants.
    #[error("corrupted turn order: {0}")]
    CorruptedData(#[from] TurnOrderError),
}

impl From<CodecError> for RepositoryError {
    fn from(error: CodecError) -> Self {
        match error {
            CodecError::Json(e) => Self::Json(e.to_string()),
            CodecError::Order(e) => Self::CorruptedData(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
