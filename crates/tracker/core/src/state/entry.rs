use core::fmt;

use super::Priority;

/// Identifier of a combatant as known to the host (token id).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ParticipantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Discriminant of [`TurnEntry`], used for logging and display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum EntryKind {
    Participant,
    RoundMarker,
    TimedEffect,
}

/// One slot in the initiative track.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnEntry {
    /// A combatant, ordered by its priority.
    Participant {
        id: ParticipantId,
        priority: Priority,
    },

    /// Start of a new round; carries the round counter.
    RoundMarker { round: u32 },

    /// Countdown for a spell or other temporary effect.
    ///
    /// Sits outside priority order and counts down once per lap.
    TimedEffect { description: String, remaining: u32 },
}

impl TurnEntry {
    pub fn participant(id: impl Into<ParticipantId>, priority: Priority) -> Self {
        Self::Participant {
            id: id.into(),
            priority,
        }
    }

    pub fn timed_effect(description: impl Into<String>, remaining: u32) -> Self {
        Self::TimedEffect {
            description: description.into(),
            remaining,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Participant { .. } => EntryKind::Participant,
            Self::RoundMarker { .. } => EntryKind::RoundMarker,
            Self::TimedEffect { .. } => EntryKind::TimedEffect,
        }
    }

    pub fn participant_id(&self) -> Option<&ParticipantId> {
        match self {
            Self::Participant { id, .. } => Some(id),
            _ => None,
        }
    }

    pub fn priority(&self) -> Option<&Priority> {
        match self {
            Self::Participant { priority, .. } => Some(priority),
            _ => None,
        }
    }

    pub fn is_participant(&self, candidate: &ParticipantId) -> bool {
        self.participant_id() == Some(candidate)
    }

    pub fn is_round_marker(&self) -> bool {
        matches!(self, Self::RoundMarker { .. })
    }
}

impl fmt::Display for TurnEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Participant { id, priority } => write!(f, "{id} [{priority}]"),
            Self::RoundMarker { round } => write!(f, "round {round}"),
            Self::TimedEffect {
                description,
                remaining,
            } => write!(f, "{description} ({remaining} left)"),
        }
    }
}
