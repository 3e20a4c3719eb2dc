//! Turn-order operations.
//!
//! The [`TurnEngine`] is the only way to produce a new [`TurnOrder`] from an
//! old one. Every operation is a pure transform of its input snapshot: it
//! either returns a complete new order plus the notices describing what
//! happened, or an error and nothing else. Callers persist the new order and
//! relay the notices.

mod advance;
mod flags;
mod insert;
mod notice;
mod start;
mod timed;

pub use notice::{Notice, RemovalReason};

use std::collections::HashSet;

use crate::config::TrackerConfig;
use crate::env::SurpriseOracle;
use crate::error::TurnOrderError;
use crate::state::{ParticipantId, Priority, SurpriseState, TurnEntry, TurnOrder};

/// Result of a successful engine operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    /// The complete new sequence to persist.
    pub order: TurnOrder,

    /// What happened, in order.
    pub notices: Vec<Notice>,
}

/// A participant about to enter the track with an already computed priority.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Combatant {
    pub id: ParticipantId,
    pub priority: Priority,
}

impl Combatant {
    pub fn new(id: impl Into<ParticipantId>, priority: Priority) -> Self {
        Self {
            id: id.into(),
            priority,
        }
    }

    /// Applies the surprise-round suffix, when a surprise round is running.
    fn marked(mut self, surprise: Option<&Surprise<'_>>) -> Self {
        if let Some(surprise) = surprise {
            let state = surprise.resolve(&self.id);
            self.priority = self.priority.with_suffix(Some(state.into()));
        }
        self
    }

    fn into_entry(self) -> TurnEntry {
        TurnEntry::Participant {
            id: self.id,
            priority: self.priority,
        }
    }
}

/// Surprise round parameters: who decides, and against what difficulty.
#[derive(Clone, Copy)]
pub struct Surprise<'a> {
    pub oracle: &'a dyn SurpriseOracle,
    pub difficulty: i32,
}

impl<'a> Surprise<'a> {
    pub fn new(oracle: &'a dyn SurpriseOracle, difficulty: i32) -> Self {
        Self { oracle, difficulty }
    }

    pub fn resolve(&self, id: &ParticipantId) -> SurpriseState {
        if self.oracle.is_aware(id, self.difficulty) {
            SurpriseState::Aware
        } else {
            SurpriseState::Surprised
        }
    }
}

impl core::fmt::Debug for Surprise<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Surprise")
            .field("difficulty", &self.difficulty)
            .finish_non_exhaustive()
    }
}

/// Which entry a flag command addresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// Whatever entry holds the front position.
    Current,
    Participant(ParticipantId),
}

impl Target {
    /// Command-argument form: `current` names the front entry, anything else
    /// is a participant id.
    pub fn from_arg(arg: &str) -> Self {
        if arg.eq_ignore_ascii_case("current") {
            Self::Current
        } else {
            Self::Participant(ParticipantId::new(arg))
        }
    }
}

impl From<ParticipantId> for Target {
    fn from(id: ParticipantId) -> Self {
        Self::Participant(id)
    }
}

/// Turn-order engine. Holds configuration only; all state is passed in.
#[derive(Clone, Copy, Debug)]
pub struct TurnEngine<'a> {
    config: &'a TrackerConfig,
}

impl<'a> TurnEngine<'a> {
    pub fn new(config: &'a TrackerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a TrackerConfig {
        self.config
    }

    /// Wraps freshly computed entries, re-checking the sequence invariants.
    fn finish(
        &self,
        entries: Vec<TurnEntry>,
        notices: Vec<Notice>,
    ) -> Result<TurnOutcome, TurnOrderError> {
        let order = TurnOrder::from_unchecked(entries);
        order.validate(self.config)?;
        Ok(TurnOutcome { order, notices })
    }

    fn unchanged(&self, order: &TurnOrder) -> TurnOutcome {
        TurnOutcome {
            order: order.clone(),
            notices: Vec::new(),
        }
    }
}

/// Rejects argument lists naming the same participant twice.
fn ensure_distinct<'i>(
    ids: impl IntoIterator<Item = &'i ParticipantId>,
) -> Result<(), TurnOrderError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(TurnOrderError::DuplicateArgument(id.clone()));
        }
    }
    Ok(())
}

/// Descending priority; equal priorities fall back to id so the result never
/// depends on input order.
fn sort_descending(combatants: &mut [Combatant]) {
    combatants.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.id.cmp(&b.id)));
}
