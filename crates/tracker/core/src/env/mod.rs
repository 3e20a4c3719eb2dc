//! Traits describing the collaborators the engine consults.
//!
//! Oracles answer questions the engine cannot answer from the sequence alone:
//! whether a participant is still alive, what happens at the start of its
//! turn, what initiative it rolled, and whether it noticed an ambush. The
//! [`Env`] aggregate hands them to the engine without coupling it to concrete
//! implementations.
mod rng;
mod roster;

use core::fmt;

pub use rng::{PcgRng, RngOracle, compute_seed};
pub use roster::{CreatureKind, ParticipantSheet};

use crate::state::{ParticipantId, Priority};

/// Externally observed condition of a participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum ParticipantStatus {
    Active,
    Dead,
    /// The participant record no longer exists on the host.
    Missing,
}

/// Read-only view of participant records.
pub trait ParticipantOracle: Send + Sync {
    fn status(&self, id: &ParticipantId) -> ParticipantStatus;

    /// Per-turn effects (bleeding, stabilisation reminders) to announce when
    /// the participant's turn begins.
    fn start_of_turn(&self, _id: &ParticipantId) -> Vec<String> {
        Vec::new()
    }

    fn display_name(&self, _id: &ParticipantId) -> Option<String> {
        None
    }
}

/// Computes a participant's initiative priority (die roll plus modifier, with
/// the tiebreak embedded).
pub trait InitiativeOracle: Send + Sync {
    /// Returns `None` when the participant has no record to roll from.
    fn initiative(&self, id: &ParticipantId) -> Option<Priority>;
}

/// Resolves the surprise check for a participant.
pub trait SurpriseOracle: Send + Sync {
    /// True when the participant beats `difficulty` and is aware.
    fn is_aware(&self, id: &ParticipantId, difficulty: i32) -> bool;
}

/// Aggregates the oracles an engine call may consult.
///
/// Missing oracles are treated permissively: without a participant oracle
/// every participant counts as active and has no per-turn effects.
#[derive(Clone, Copy, Default)]
pub struct Env<'a> {
    participants: Option<&'a dyn ParticipantOracle>,
}

impl<'a> Env<'a> {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_participants(participants: &'a dyn ParticipantOracle) -> Self {
        Self {
            participants: Some(participants),
        }
    }

    pub fn participants(&self) -> Option<&'a dyn ParticipantOracle> {
        self.participants
    }

    pub fn status(&self, id: &ParticipantId) -> ParticipantStatus {
        self.participants
            .map_or(ParticipantStatus::Active, |oracle| oracle.status(id))
    }

    pub fn start_of_turn(&self, id: &ParticipantId) -> Vec<String> {
        self.participants
            .map(|oracle| oracle.start_of_turn(id))
            .unwrap_or_default()
    }
}

impl fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env")
            .field("participants", &self.participants.is_some())
            .finish()
    }
}
