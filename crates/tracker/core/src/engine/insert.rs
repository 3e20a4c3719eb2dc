use crate::error::TurnOrderError;
use crate::state::{ParticipantId, Priority, Suffix, TurnEntry, TurnOrder};

use super::{Combatant, Notice, Surprise, TurnEngine, TurnOutcome, ensure_distinct, sort_descending};

/// Where a newcomer lands in a running track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Placement {
    /// Right before the round marker: the newcomer acts this round.
    BeforeMarker(usize),
    /// Right before the first participant it outranks.
    Before(usize),
    /// Nothing later in the lap is outranked.
    Append(usize),
}

impl Placement {
    fn index(self) -> usize {
        match self {
            Self::BeforeMarker(index) | Self::Before(index) | Self::Append(index) => index,
        }
    }

    fn marks_latecomer(self) -> bool {
        !matches!(self, Self::BeforeMarker(_))
    }
}

/// Walks forward from the slot after the current one.
///
/// The walk starts at position 1, so reaching the end already covers a full
/// lap and the newcomer goes to the back.
fn placement(entries: &[TurnEntry], priority: &Priority) -> Placement {
    for (index, entry) in entries.iter().enumerate().skip(1) {
        match entry {
            TurnEntry::RoundMarker { .. } => return Placement::BeforeMarker(index),
            TurnEntry::Participant {
                priority: existing, ..
            } if existing < priority => return Placement::Before(index),
            _ => {}
        }
    }
    Placement::Append(entries.len())
}

impl TurnEngine<'_> {
    /// Inserts participants into a running track.
    ///
    /// Ids already on the track are skipped with an [`Notice::AlreadyJoined`].
    /// A track without a round marker has not started, so this falls back to
    /// [`TurnEngine::start_combat`] over the existing participants plus the
    /// newcomers.
    pub fn add_participants(
        &self,
        order: &TurnOrder,
        newcomers: &[Combatant],
        surprise: Option<Surprise<'_>>,
    ) -> Result<TurnOutcome, TurnOrderError> {
        if newcomers.is_empty() {
            return Err(TurnOrderError::NoParticipants);
        }
        ensure_distinct(newcomers.iter().map(|c| &c.id))?;

        if order.round_marker_position().is_none() {
            return self.start_unmarked(order, newcomers, surprise);
        }

        let mut entries = order.entries().to_vec();
        let mut notices = Vec::new();
        let mut pending = Vec::with_capacity(newcomers.len());
        for newcomer in newcomers {
            if order.contains(&newcomer.id) {
                notices.push(Notice::AlreadyJoined {
                    id: newcomer.id.clone(),
                });
            } else {
                pending.push(newcomer.clone().marked(surprise.as_ref()));
            }
        }
        sort_descending(&mut pending);

        for mut newcomer in pending {
            let placement = placement(&entries, &newcomer.priority);
            let index = placement.index();

            let ties_previous = entries[..index]
                .last()
                .and_then(TurnEntry::priority)
                .is_some_and(|previous| previous.same_value(&newcomer.priority));
            if placement.marks_latecomer() && newcomer.priority.suffix.is_none() && ties_previous {
                newcomer.priority.suffix = Some(Suffix::Latecomer);
            }

            notices.push(Notice::Joined {
                id: newcomer.id.clone(),
                priority: newcomer.priority,
            });
            entries.insert(index, newcomer.into_entry());
        }

        self.finish(entries, notices)
    }

    /// Starts combat from a track that was never given a round marker.
    /// Timed effects already on it are kept at the back.
    fn start_unmarked(
        &self,
        order: &TurnOrder,
        newcomers: &[Combatant],
        surprise: Option<Surprise<'_>>,
    ) -> Result<TurnOutcome, TurnOrderError> {
        let mut combatants: Vec<Combatant> = order
            .entries()
            .iter()
            .filter_map(|entry| match entry {
                TurnEntry::Participant { id, priority } => {
                    Some(Combatant::new(id.clone(), priority.without_suffix()))
                }
                _ => None,
            })
            .collect();

        let mut notices = Vec::new();
        for newcomer in newcomers {
            if order.contains(&newcomer.id) {
                notices.push(Notice::AlreadyJoined {
                    id: newcomer.id.clone(),
                });
            } else {
                combatants.push(newcomer.clone());
            }
        }

        let started = self.start_combat(&combatants, surprise)?;
        notices.extend(started.notices);
        let mut entries = started.order.into_entries();
        entries.extend(
            order
                .entries()
                .iter()
                .filter(|entry| matches!(entry, TurnEntry::TimedEffect { .. }))
                .cloned(),
        );
        self.finish(entries, notices)
    }

    /// Deletes participants from the track.
    pub fn remove_participants(
        &self,
        order: &TurnOrder,
        ids: &[ParticipantId],
    ) -> Result<TurnOutcome, TurnOrderError> {
        if ids.is_empty() {
            return Err(TurnOrderError::NoParticipants);
        }
        ensure_distinct(ids)?;
        if let Some(missing) = ids.iter().find(|id| !order.contains(id)) {
            return Err(TurnOrderError::NotFound(missing.clone()));
        }

        let entries = order
            .entries()
            .iter()
            .filter(|entry| !ids.iter().any(|id| entry.is_participant(id)))
            .cloned()
            .collect();
        let notices = ids
            .iter()
            .map(|id| Notice::Left { id: id.clone() })
            .collect();

        self.finish(entries, notices)
    }

    /// Re-rolls: drops any existing slot for each newcomer, then adds them
    /// back with their new priority.
    pub fn replace_participants(
        &self,
        order: &TurnOrder,
        newcomers: &[Combatant],
        surprise: Option<Surprise<'_>>,
    ) -> Result<TurnOutcome, TurnOrderError> {
        if newcomers.is_empty() {
            return Err(TurnOrderError::NoParticipants);
        }
        ensure_distinct(newcomers.iter().map(|c| &c.id))?;

        let remaining = order
            .entries()
            .iter()
            .filter(|entry| !newcomers.iter().any(|c| entry.is_participant(&c.id)))
            .cloned()
            .collect();
        self.add_participants(&TurnOrder::from_unchecked(remaining), newcomers, surprise)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::TrackerConfig;
    use crate::env::SurpriseOracle;

    use super::*;

    /// Everyone named is aware; the rest are surprised.
    struct Lookouts(&'static [&'static str]);

    impl SurpriseOracle for Lookouts {
        fn is_aware(&self, id: &ParticipantId, _difficulty: i32) -> bool {
            self.0.contains(&id.as_str())
        }
    }

    /// Current actor `x`, then `c` and `e` still to act this round.
    fn surprise_round(c_suffix: Option<Suffix>) -> TurnOrder {
        TurnOrder::from_unchecked(vec![
            TurnEntry::participant("x", Priority::new(18, 0)),
            TurnEntry::participant("c", Priority::new(10, 0).with_suffix(c_suffix)),
            TurnEntry::participant("e", Priority::new(5, 0)),
            TurnEntry::RoundMarker { round: 1 },
            TurnEntry::participant("a", Priority::new(20, 0)),
        ])
    }

    fn combatant(id: &str, score: i32) -> Combatant {
        Combatant::new(id, Priority::new(score, 0))
    }

    fn ids(order: &TurnOrder) -> Vec<String> {
        order
            .entries()
            .iter()
            .map(|entry| match entry {
                TurnEntry::Participant { id, .. } => id.to_string(),
                TurnEntry::RoundMarker { .. } => "#".to_string(),
                TurnEntry::TimedEffect { description, .. } => description.clone(),
            })
            .collect()
    }

    /// Current actor `b` (15); `c` (10) still to act; then the marker and
    /// `a` (20), who already acted this round.
    fn running() -> TurnOrder {
        TurnOrder::from_unchecked(vec![
            TurnEntry::participant("b", Priority::new(15, 0)),
            TurnEntry::participant("c", Priority::new(10, 0)),
            TurnEntry::RoundMarker { round: 2 },
            TurnEntry::participant("a", Priority::new(20, 0)),
        ])
    }

    #[test]
    fn newcomer_that_outranks_remaining_actors_goes_before_them() {
        let config = TrackerConfig::default();
        let engine = TurnEngine::new(&config);
        let outcome = engine
            .add_participants(&running(), &[combatant("d", 12)], None)
            .expect("add");
        assert_eq!(ids(&outcome.order), ["b", "d", "c", "#", "a"]);
    }

    #[test]
    fn newcomer_below_everyone_left_acts_before_the_marker() {
        let config = TrackerConfig::default();
        let engine = TurnEngine::new(&config);
        let outcome = engine
            .add_participants(&running(), &[combatant("d", 3)], None)
            .expect("add");
        assert_eq!(ids(&outcome.order), ["b", "c", "d", "#", "a"]);
    }

    #[test]
    fn tie_with_previous_entry_gets_latecomer_suffix() {
        let config = TrackerConfig::default();
        let engine = TurnEngine::new(&config);
        let order = TurnOrder::from_unchecked(vec![
            TurnEntry::participant("b", Priority::new(15, 0)),
            TurnEntry::RoundMarker { round: 1 },
            TurnEntry::participant("a", Priority::new(20, 0)),
            TurnEntry::participant("c", Priority::new(10, 0)),
        ]);

        // The marker is reached before any participant it ties.
        let before_marker = engine
            .add_participants(&order, &[combatant("d", 15)], None)
            .expect("add");
        assert_eq!(ids(&before_marker.order), ["b", "d", "#", "a", "c"]);
        assert_eq!(
            before_marker.order.entries()[1].priority().and_then(|p| p.suffix),
            None
        );

        let tail_tie = TurnOrder::from_unchecked(vec![
            TurnEntry::RoundMarker { round: 1 },
            TurnEntry::participant("a", Priority::new(20, 0)),
            TurnEntry::participant("c", Priority::new(10, 0)),
        ]);
        let appended = engine
            .add_participants(&tail_tie, &[combatant("d", 10)], None)
            .expect("add");
        assert_eq!(ids(&appended.order), ["#", "a", "c", "d"]);
        assert_eq!(
            appended.order.entries()[3].priority().and_then(|p| p.suffix),
            Some(Suffix::Latecomer)
        );
    }

    #[test]
    fn present_ids_are_skipped() {
        let config = TrackerConfig::default();
        let engine = TurnEngine::new(&config);
        let outcome = engine
            .add_participants(&running(), &[combatant("c", 30)], None)
            .expect("add");
        assert_eq!(outcome.order, running());
        assert_eq!(
            outcome.notices,
            vec![Notice::AlreadyJoined {
                id: ParticipantId::new("c")
            }]
        );
    }

    #[test]
    fn add_without_marker_starts_combat() {
        let config = TrackerConfig::default();
        let engine = TurnEngine::new(&config);
        let outcome = engine
            .add_participants(&TurnOrder::new(), &[combatant("a", 5), combatant("b", 9)], None)
            .expect("add");
        assert_eq!(ids(&outcome.order), ["#", "b", "a"]);
    }

    #[test]
    fn unmarked_track_keeps_listed_participants_and_effects() {
        let config = TrackerConfig::default();
        let engine = TurnEngine::new(&config);
        let order = TurnOrder::from_unchecked(vec![
            TurnEntry::timed_effect("Fog", 2),
            TurnEntry::participant("a", Priority::new(8, 0).with_suffix(Some(Suffix::Delayed))),
        ]);

        let outcome = engine
            .add_participants(&order, &[combatant("a", 30), combatant("b", 12)], None)
            .expect("add");
        assert_eq!(ids(&outcome.order), ["#", "b", "a", "Fog"]);
        assert_eq!(outcome.order.entries()[2], TurnEntry::participant("a", Priority::new(8, 0)));
        assert_eq!(
            outcome.notices.first(),
            Some(&Notice::AlreadyJoined {
                id: ParticipantId::new("a")
            })
        );
    }

    #[test]
    fn surprised_latecomer_acts_after_tied_aware_entry() {
        let config = TrackerConfig::default();
        let engine = TurnEngine::new(&config);
        let oracle = Lookouts(&[]);

        let outcome = engine
            .add_participants(
                &surprise_round(Some(Suffix::Aware)),
                &[combatant("d", 10)],
                Some(Surprise::new(&oracle, 15)),
            )
            .expect("add");
        assert_eq!(ids(&outcome.order), ["x", "c", "d", "e", "#", "a"]);
        assert_eq!(
            outcome.order.entries()[2],
            TurnEntry::participant("d", Priority::new(10, 0).with_suffix(Some(Suffix::Surprised)))
        );
    }

    #[test]
    fn aware_latecomer_acts_before_tied_entry() {
        let config = TrackerConfig::default();
        let engine = TurnEngine::new(&config);
        let oracle = Lookouts(&["f"]);

        let outcome = engine
            .add_participants(
                &surprise_round(None),
                &[combatant("f", 10)],
                Some(Surprise::new(&oracle, 15)),
            )
            .expect("add");
        assert_eq!(ids(&outcome.order), ["x", "f", "c", "e", "#", "a"]);
        assert_eq!(
            outcome.order.entries()[1],
            TurnEntry::participant("f", Priority::new(10, 0).with_suffix(Some(Suffix::Aware)))
        );
    }

    #[test]
    fn remove_drops_only_named_participants() {
        let config = TrackerConfig::default();
        let engine = TurnEngine::new(&config);
        let outcome = engine
            .remove_participants(&running(), &[ParticipantId::new("c")])
            .expect("remove");
        assert_eq!(ids(&outcome.order), ["b", "#", "a"]);

        assert_eq!(
            engine.remove_participants(&running(), &[ParticipantId::new("zz")]),
            Err(TurnOrderError::NotFound(ParticipantId::new("zz")))
        );
    }

    #[test]
    fn replace_moves_a_rerolled_participant() {
        let config = TrackerConfig::default();
        let engine = TurnEngine::new(&config);
        let outcome = engine
            .replace_participants(&running(), &[combatant("c", 14)], None)
            .expect("replace");
        assert_eq!(ids(&outcome.order), ["b", "c", "#", "a"]);
        assert_eq!(outcome.order.entries()[1].priority(), Some(&Priority::new(14, 0)));
    }
}
