use core::fmt;

use crate::state::{ParticipantId, Priority, Suffix, TurnFlag};

/// Why an entry left the track without a command naming it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum RemovalReason {
    Dead,
    Missing,
}

/// Human-facing event produced by an engine operation.
///
/// Notices are returned in the order they happened; formatting them for the
/// host's chat is a presentation concern. `Display` gives a plain-text form.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notice {
    Joined {
        id: ParticipantId,
        priority: Priority,
    },
    /// A newcomer was skipped because it already holds a slot.
    AlreadyJoined { id: ParticipantId },
    Left { id: ParticipantId },
    RoundStarted { round: u32 },
    TurnStarted { id: ParticipantId },
    TurnEffect { id: ParticipantId, text: String },
    Removed {
        id: ParticipantId,
        reason: RemovalReason,
    },
    EffectAdded { description: String, duration: u32 },
    EffectExpired { description: String },
    FlagSet { id: ParticipantId, flag: TurnFlag },
    FlagCleared { id: ParticipantId },
    /// A one-round suffix was stripped after a full lap.
    SuffixCleared { id: ParticipantId, suffix: Suffix },
    Reinserted {
        id: ParticipantId,
        priority: Priority,
    },
    CombatEnded,
}

impl Notice {
    /// The participant this notice is about, if any.
    pub fn participant(&self) -> Option<&ParticipantId> {
        match self {
            Self::Joined { id, .. }
            | Self::AlreadyJoined { id }
            | Self::Left { id }
            | Self::TurnStarted { id }
            | Self::TurnEffect { id, .. }
            | Self::Removed { id, .. }
            | Self::FlagSet { id, .. }
            | Self::FlagCleared { id }
            | Self::SuffixCleared { id, .. }
            | Self::Reinserted { id, .. } => Some(id),
            Self::RoundStarted { .. }
            | Self::EffectAdded { .. }
            | Self::EffectExpired { .. }
            | Self::CombatEnded => None,
        }
    }

    /// Renders the notice as chat text, naming participants through `name_of`.
    pub fn render(&self, name_of: impl Fn(&ParticipantId) -> String) -> String {
        let name = || self.participant().map(&name_of).unwrap_or_default();
        match self {
            Self::Joined { priority, .. } => {
                format!("{} joins combat on initiative {priority}", name())
            }
            Self::AlreadyJoined { .. } => format!("{} is already in combat", name()),
            Self::Left { .. } => format!("{} leaves combat", name()),
            Self::RoundStarted { round } => format!("Start of round {round}"),
            Self::TurnStarted { .. } => format!("{} is up", name()),
            Self::TurnEffect { text, .. } => text.clone(),
            Self::Removed { reason, .. } => {
                format!("{} is removed from combat ({reason})", name())
            }
            Self::EffectAdded {
                description,
                duration,
            } => format!("{description} lasts {duration} rounds"),
            Self::EffectExpired { description } => format!("{description} has expired"),
            Self::FlagSet { flag, .. } => format!("{} is {flag}", name()),
            Self::FlagCleared { .. } => format!("{} is no longer delaying or readying", name()),
            Self::SuffixCleared { suffix, .. } => format!("{} drops the {suffix} marker", name()),
            Self::Reinserted { priority, .. } => {
                format!("{} acts now on initiative {priority}", name())
            }
            Self::CombatEnded => "Combat is over".to_string(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(ToString::to_string))
    }
}
