//! Common error infrastructure for tracker-core.
//!
//! Every engine operation reports failures through [`TurnOrderError`]. Each
//! variant maps onto one of three caller-facing [`ErrorKind`]s, and each kind
//! carries a [`ErrorSeverity`] so the runtime can decide how loudly to report
//! it.
//!
//! # Design Principles
//!
//! - **All-or-nothing**: an error means the input snapshot was not transformed
//! - **Kind classification**: callers branch on [`ErrorKind`], not on variants
//! - **Stable codes**: [`EngineError::error_code`] is safe to log and match on

use crate::state::ParticipantId;

/// Severity level of an error, used for categorization and logging priority.
///
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: The stored sequence disagrees with the engine's invariants
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, reissue the command after correcting it.
    ///
    /// Examples: no participants selected, unknown participant id
    Validation,

    /// Unexpected state inconsistency in the stored sequence.
    ///
    /// Examples: two round markers, malformed priority string
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates a corrupted or inconsistent sequence.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Caller-facing error classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or missing input.
    InvalidArgument,
    /// Preconditions violated against the current sequence.
    InvalidState,
    /// A referenced participant is absent from the sequence.
    NotFound,
}

impl ErrorKind {
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidArgument | Self::NotFound => ErrorSeverity::Validation,
            Self::InvalidState => ErrorSeverity::Internal,
        }
    }
}

/// Common trait for all tracker-core errors.
///
/// Keeps classification uniform so the runtime can report any engine failure
/// without matching on concrete variants.
pub trait EngineError: core::fmt::Display + core::fmt::Debug {
    /// Returns the caller-facing class of this error.
    fn kind(&self) -> ErrorKind;

    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity {
        self.kind().severity()
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

/// Errors surfaced by turn-order operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnOrderError {
    #[error("no participants were supplied")]
    NoParticipants,

    #[error("participant {0} is listed more than once")]
    DuplicateArgument(ParticipantId),

    #[error("participant {0} currently holds the turn")]
    CurrentParticipant(ParticipantId),

    #[error("timed effect needs a description")]
    EmptyDescription,

    #[error("turn order is empty")]
    EmptyOrder,

    #[error("malformed priority {0:?}")]
    MalformedPriority(String),

    #[error("turn order holds {0} round markers, at most one is allowed")]
    MultipleRoundMarkers(usize),

    #[error("participant {0} occupies more than one slot")]
    DuplicateParticipant(ParticipantId),

    #[error("turn order would hold {len} entries, the limit is {max}")]
    TooManyEntries { len: usize, max: usize },

    #[error("participant {0} is not in the turn order")]
    NotFound(ParticipantId),
}

impl EngineError for TurnOrderError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::NoParticipants
            | Self::DuplicateArgument(_)
            | Self::CurrentParticipant(_)
            | Self::EmptyDescription => ErrorKind::InvalidArgument,
            Self::EmptyOrder
            | Self::MalformedPriority(_)
            | Self::MultipleRoundMarkers(_)
            | Self::DuplicateParticipant(_)
            | Self::TooManyEntries { .. } => ErrorKind::InvalidState,
            Self::NotFound(_) => ErrorKind::NotFound,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoParticipants => "no_participants",
            Self::DuplicateArgument(_) => "duplicate_argument",
            Self::CurrentParticipant(_) => "current_participant",
            Self::EmptyDescription => "empty_description",
            Self::EmptyOrder => "empty_order",
            Self::MalformedPriority(_) => "malformed_priority",
            Self::MultipleRoundMarkers(_) => "multiple_round_markers",
            Self::DuplicateParticipant(_) => "duplicate_participant",
            Self::TooManyEntries { .. } => "too_many_entries",
            Self::NotFound(_) => "not_found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_classify_variants() {
        assert_eq!(TurnOrderError::NoParticipants.kind(), ErrorKind::InvalidArgument);
        assert_eq!(TurnOrderError::EmptyOrder.kind(), ErrorKind::InvalidState);
        assert_eq!(
            TurnOrderError::MalformedPriority("x".into()).kind(),
            ErrorKind::InvalidState
        );
        assert_eq!(
            TurnOrderError::NotFound(ParticipantId::new("orc")).kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn state_errors_are_internal() {
        assert!(TurnOrderError::MultipleRoundMarkers(2).severity().is_internal());
        assert!(!TurnOrderError::EmptyDescription.severity().is_internal());
        assert_eq!(ErrorKind::NotFound.to_string(), "not_found");
    }
}
