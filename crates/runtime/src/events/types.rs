//! Notification payloads published after each command.

use core::fmt;

use serde::{Deserialize, Serialize};
use tracker_core::{ErrorKind, Notice};

use super::Topic;

/// Tracker command that produced a notification.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Command {
    StartCombat,
    Join,
    Reroll,
    Remove,
    NextTurn,
    Advance,
    SetFlag,
    Undelay,
    AddTimedEffect,
    EndCombat,
}

/// What the tracker tells the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    /// Something happened to the turn order. `text` is the notice rendered
    /// with participant names.
    Notice {
        command: Command,
        notice: Notice,
        text: String,
    },

    /// The command was rejected and the stored order left untouched.
    CommandFailed {
        command: Command,
        kind: ErrorKind,
        message: String,
    },
}

impl Notification {
    pub fn topic(&self) -> Topic {
        match self {
            Self::Notice { notice, .. } => match notice {
                Notice::Joined { .. }
                | Notice::AlreadyJoined { .. }
                | Notice::Left { .. }
                | Notice::Removed { .. }
                | Notice::CombatEnded => Topic::Combat,
                Notice::RoundStarted { .. }
                | Notice::TurnStarted { .. }
                | Notice::TurnEffect { .. }
                | Notice::EffectAdded { .. }
                | Notice::EffectExpired { .. }
                | Notice::FlagSet { .. }
                | Notice::FlagCleared { .. }
                | Notice::SuffixCleared { .. }
                | Notice::Reinserted { .. } => Topic::Turn,
            },
            Self::CommandFailed { .. } => Topic::Error,
        }
    }

    pub fn command(&self) -> Command {
        match self {
            Self::Notice { command, .. } | Self::CommandFailed { command, .. } => *command,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Notice { text, .. } => f.write_str(text),
            Self::CommandFailed {
                command, message, ..
            } => write!(f, "{command} failed: {message}"),
        }
    }
}
