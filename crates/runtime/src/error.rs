//! Unified error types surfaced by the tracker API.
//!
//! Wraps failures from the engine and the store so callers can bubble them up
//! with consistent context.

use thiserror::Error;
use tracker_core::{EngineError, ErrorKind, ParticipantId, TurnOrderError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, TrackerError>;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Engine(#[from] TurnOrderError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// No character sheet to roll initiative from.
    #[error("participant {0} has no character sheet")]
    UnknownParticipant(ParticipantId),

    #[error("tracker requires a turn order store to be configured before building")]
    MissingStore,

    #[error("tracker requires a roster oracle to be configured before building")]
    MissingOracles,
}

impl TrackerError {
    /// Caller-facing class, matching the engine's classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Engine(error) => error.kind(),
            Self::Repository(RepositoryError::CorruptedData(error)) => error.kind(),
            Self::UnknownParticipant(_) => ErrorKind::NotFound,
            Self::Repository(_) | Self::MissingStore | Self::MissingOracles => {
                ErrorKind::InvalidState
            }
        }
    }
}
