use crate::env::{Env, ParticipantStatus};
use crate::error::TurnOrderError;
use crate::state::{TurnEntry, TurnOrder};

use super::{Notice, RemovalReason, TurnEngine, TurnOutcome};

impl TurnEngine<'_> {
    /// Moves the front entry to the back.
    ///
    /// The entry that just finished is updated on its way out: a round marker
    /// counts up to the next round, a timed effect counts down one round.
    pub fn rotate(&self, order: &TurnOrder) -> Result<TurnOutcome, TurnOrderError> {
        let mut entries = order.entries().to_vec();
        if entries.is_empty() {
            return Err(TurnOrderError::EmptyOrder);
        }

        let mut leaving = entries.remove(0);
        match &mut leaving {
            TurnEntry::RoundMarker { round } => *round = round.saturating_add(1),
            TurnEntry::TimedEffect { remaining, .. } => *remaining = remaining.saturating_sub(1),
            TurnEntry::Participant { .. } => {}
        }
        entries.push(leaving);

        self.finish(entries, Vec::new())
    }

    /// Settles the front of the track after the cursor moved.
    ///
    /// Expired effects and dead or missing participants at the front are
    /// dropped until a live participant, a running effect, or the round marker
    /// holds position 0. Then the entry that just finished its turn (now at
    /// the back) loses any one-round suffix. Reaching the marker of the first
    /// round stops before that step: nobody has acted yet.
    pub fn advance_turn(
        &self,
        order: &TurnOrder,
        env: Env<'_>,
    ) -> Result<TurnOutcome, TurnOrderError> {
        if order.is_empty() {
            return Err(TurnOrderError::EmptyOrder);
        }

        let mut entries = order.entries().to_vec();
        let mut notices = Vec::new();

        // Each pass either stops or removes the front entry.
        while let Some(front) = entries.first() {
            match front {
                TurnEntry::RoundMarker { round } => {
                    let round = *round;
                    notices.push(Notice::RoundStarted { round });
                    if round == self.config.first_round {
                        return self.finish(entries, notices);
                    }
                    break;
                }
                TurnEntry::TimedEffect {
                    description,
                    remaining,
                } => {
                    if *remaining > self.config.expiry_threshold {
                        break;
                    }
                    notices.push(Notice::EffectExpired {
                        description: description.clone(),
                    });
                    entries.remove(0);
                }
                TurnEntry::Participant { id, .. } => {
                    let reason = match env.status(id) {
                        ParticipantStatus::Active => {
                            notices.push(Notice::TurnStarted { id: id.clone() });
                            notices.extend(env.start_of_turn(id).into_iter().map(|text| {
                                Notice::TurnEffect {
                                    id: id.clone(),
                                    text,
                                }
                            }));
                            break;
                        }
                        ParticipantStatus::Dead => RemovalReason::Dead,
                        ParticipantStatus::Missing => RemovalReason::Missing,
                    };
                    notices.push(Notice::Removed {
                        id: id.clone(),
                        reason,
                    });
                    entries.remove(0);
                }
            }
        }

        if let Some(TurnEntry::Participant { id, priority }) = entries.last_mut()
            && priority.is_round_scoped()
            && let Some(suffix) = priority.suffix.take()
        {
            notices.push(Notice::SuffixCleared {
                id: id.clone(),
                suffix,
            });
        }

        self.finish(entries, notices)
    }

    /// One full "next turn": [`rotate`](Self::rotate) then
    /// [`advance_turn`](Self::advance_turn).
    pub fn next_turn(&self, order: &TurnOrder, env: Env<'_>) -> Result<TurnOutcome, TurnOrderError> {
        let rotated = self.rotate(order)?;
        self.advance_turn(&rotated.order, env)
    }
}
