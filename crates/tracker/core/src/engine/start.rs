use crate::error::TurnOrderError;
use crate::state::{TurnEntry, TurnOrder};

use super::{Combatant, Notice, Surprise, TurnEngine, TurnOutcome, ensure_distinct, sort_descending};

impl TurnEngine<'_> {
    /// Builds a fresh track: the round marker for the first round followed by
    /// every participant in descending priority.
    ///
    /// When `surprise` is given, each participant first receives the aware
    /// (`½`) or surprised (`!`) suffix from the surprise check.
    pub fn start_combat(
        &self,
        participants: &[Combatant],
        surprise: Option<Surprise<'_>>,
    ) -> Result<TurnOutcome, TurnOrderError> {
        if participants.is_empty() {
            return Err(TurnOrderError::NoParticipants);
        }
        ensure_distinct(participants.iter().map(|c| &c.id))?;

        let mut entrants: Vec<Combatant> = participants
            .iter()
            .cloned()
            .map(|c| c.marked(surprise.as_ref()))
            .collect();
        sort_descending(&mut entrants);

        let notices = entrants
            .iter()
            .map(|c| Notice::Joined {
                id: c.id.clone(),
                priority: c.priority,
            })
            .collect();

        let mut entries = Vec::with_capacity(entrants.len() + 1);
        entries.push(TurnEntry::RoundMarker {
            round: self.config.first_round,
        });
        entries.extend(entrants.into_iter().map(Combatant::into_entry));

        self.finish(entries, notices)
    }

    /// Clears the track.
    pub fn end_combat(&self, order: &TurnOrder) -> Result<TurnOutcome, TurnOrderError> {
        if order.is_empty() {
            return Err(TurnOrderError::EmptyOrder);
        }
        Ok(TurnOutcome {
            order: TurnOrder::new(),
            notices: vec![Notice::CombatEnded],
        })
    }
}
