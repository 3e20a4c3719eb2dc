use std::collections::HashSet;

use crate::config::TrackerConfig;
use crate::error::TurnOrderError;

use super::{ParticipantId, TurnEntry};

/// Snapshot of the initiative track.
///
/// Position 0 is the entry the host cursor points at. Engine operations never
/// mutate a snapshot in place; they return a new one (see
/// [`crate::engine::TurnEngine`]).
///
/// Only serialized directly; reading one back goes through
/// [`TurnOrder::from_entries`] (or the host codec) so it is always validated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TurnOrder {
    entries: Vec<TurnEntry>,
}

impl TurnOrder {
    /// Creates an empty track (no combat running).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a track from entries read back from storage.
    ///
    /// Rejects sequences the engine could not have produced: more than one
    /// round marker, a participant in two slots, or more entries than the
    /// configured limit.
    pub fn from_entries(
        entries: Vec<TurnEntry>,
        config: &TrackerConfig,
    ) -> Result<Self, TurnOrderError> {
        let order = Self { entries };
        order.validate(config)?;
        Ok(order)
    }

    pub(crate) fn from_unchecked(entries: Vec<TurnEntry>) -> Self {
        Self { entries }
    }

    pub(crate) fn validate(&self, config: &TrackerConfig) -> Result<(), TurnOrderError> {
        if self.entries.len() > config.max_entries {
            return Err(TurnOrderError::TooManyEntries {
                len: self.entries.len(),
                max: config.max_entries,
            });
        }

        let markers = self.entries.iter().filter(|e| e.is_round_marker()).count();
        if markers > 1 {
            return Err(TurnOrderError::MultipleRoundMarkers(markers));
        }

        let mut seen = HashSet::new();
        for id in self.participant_ids() {
            if !seen.insert(id) {
                return Err(TurnOrderError::DuplicateParticipant(id.clone()));
            }
        }

        Ok(())
    }

    pub fn entries(&self) -> &[TurnEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<TurnEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry currently holding the turn.
    pub fn front(&self) -> Option<&TurnEntry> {
        self.entries.first()
    }

    pub fn tail(&self) -> Option<&TurnEntry> {
        self.entries.last()
    }

    pub fn round_marker_position(&self) -> Option<usize> {
        self.entries.iter().position(TurnEntry::is_round_marker)
    }

    /// Current round counter, if combat has started.
    pub fn round(&self) -> Option<u32> {
        self.entries.iter().find_map(|entry| match entry {
            TurnEntry::RoundMarker { round } => Some(*round),
            _ => None,
        })
    }

    pub fn position_of(&self, id: &ParticipantId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.is_participant(id))
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.position_of(id).is_some()
    }

    pub fn participant_ids(&self) -> impl Iterator<Item = &ParticipantId> {
        self.entries.iter().filter_map(TurnEntry::participant_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Priority;

    fn orc(id: &str, score: i32) -> TurnEntry {
        TurnEntry::participant(id, Priority::new(score, 0))
    }

    #[test]
    fn accepts_engine_shaped_sequences() {
        let config = TrackerConfig::default();
        let order = TurnOrder::from_entries(
            vec![
                orc("a", 15),
                TurnEntry::RoundMarker { round: 2 },
                orc("b", 20),
                TurnEntry::timed_effect("Bless", 3),
            ],
            &config,
        )
        .unwrap();

        assert_eq!(order.round(), Some(2));
        assert_eq!(order.round_marker_position(), Some(1));
        assert_eq!(order.position_of(&"b".into()), Some(2));
        assert_eq!(order.participant_ids().count(), 2);
    }

    #[test]
    fn rejects_second_round_marker() {
        let result = TurnOrder::from_entries(
            vec![
                TurnEntry::RoundMarker { round: 1 },
                TurnEntry::RoundMarker { round: 2 },
            ],
            &TrackerConfig::default(),
        );
        assert_eq!(result, Err(TurnOrderError::MultipleRoundMarkers(2)));
    }

    #[test]
    fn rejects_participant_in_two_slots() {
        let result = TurnOrder::from_entries(
            vec![orc("a", 3), orc("a", 9)],
            &TrackerConfig::default(),
        );
        assert_eq!(
            result,
            Err(TurnOrderError::DuplicateParticipant("a".into()))
        );
    }

    #[test]
    fn rejects_oversized_sequences() {
        let config = TrackerConfig::default().with_max_entries(1);
        let result = TurnOrder::from_entries(vec![orc("a", 3), orc("b", 9)], &config);
        assert_eq!(result, Err(TurnOrderError::TooManyEntries { len: 2, max: 1 }));
    }
}
