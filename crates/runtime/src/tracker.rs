//! Command service wrapping the turn-order engine.
//!
//! Every command follows the same cycle: load the whole sequence from the
//! store, run one pure engine transform, save the result, then publish the
//! notices. A failing command saves nothing and publishes one
//! [`Notification::CommandFailed`].

use std::sync::Arc;

use tracker_core::{
    Combatant, Env, InitiativeOracle, ParticipantId, Surprise, Target, TrackerConfig, TurnEngine,
    TurnFlag, TurnOrder, TurnOutcome,
};

use crate::error::{Result, TrackerError};
use crate::events::{Command, LogNotifier, Notification, Notifier};
use crate::oracle::RosterOracle;
use crate::repository::TurnOrderStore;

/// Turn-order command service.
pub struct Tracker {
    config: TrackerConfig,
    store: Arc<dyn TurnOrderStore>,
    roster: Arc<RosterOracle>,
    notifiers: Vec<Arc<dyn Notifier>>,
}

impl Tracker {
    pub fn builder() -> TrackerBuilder {
        TrackerBuilder::new()
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn roster(&self) -> &RosterOracle {
        &self.roster
    }

    /// Current stored sequence.
    pub fn order(&self) -> Result<TurnOrder> {
        Ok(self.store.load()?)
    }

    /// Rolls initiative for `ids` and starts a fresh track, replacing any
    /// previous one. With `surprise_dc`, everyone makes a surprise check.
    pub fn start_combat(
        &self,
        ids: &[ParticipantId],
        surprise_dc: Option<i32>,
    ) -> Result<TurnOutcome> {
        self.execute(Command::StartCombat, |engine, _| {
            let combatants = self.roll_initiative(ids)?;
            Ok(engine.start_combat(&combatants, self.surprise(surprise_dc))?)
        })
    }

    /// Rolls initiative for latecomers and merges them into the running track.
    pub fn join(&self, ids: &[ParticipantId], surprise_dc: Option<i32>) -> Result<TurnOutcome> {
        self.execute(Command::Join, |engine, order| {
            let combatants = self.roll_initiative(ids)?;
            Ok(engine.add_participants(order, &combatants, self.surprise(surprise_dc))?)
        })
    }

    /// Rolls again for participants, moving any that are already listed.
    pub fn reroll(&self, ids: &[ParticipantId]) -> Result<TurnOutcome> {
        self.execute(Command::Reroll, |engine, order| {
            let combatants = self.roll_initiative(ids)?;
            Ok(engine.replace_participants(order, &combatants, None)?)
        })
    }

    pub fn remove(&self, ids: &[ParticipantId]) -> Result<TurnOutcome> {
        self.execute(Command::Remove, |engine, order| {
            Ok(engine.remove_participants(order, ids)?)
        })
    }

    /// Moves the cursor on and settles the new front.
    pub fn next_turn(&self) -> Result<TurnOutcome> {
        self.execute(Command::NextTurn, |engine, order| {
            Ok(engine.next_turn(order, self.env())?)
        })
    }

    /// Settles the front without moving the cursor, for when the host moved
    /// it already.
    pub fn advance(&self) -> Result<TurnOutcome> {
        self.execute(Command::Advance, |engine, order| {
            Ok(engine.advance_turn(order, self.env())?)
        })
    }

    pub fn set_flag(&self, target: &Target, flag: Option<TurnFlag>) -> Result<TurnOutcome> {
        self.execute(Command::SetFlag, |engine, order| {
            Ok(engine.set_flag(order, target, flag)?)
        })
    }

    pub fn undelay(&self, ids: &[ParticipantId]) -> Result<TurnOutcome> {
        self.execute(Command::Undelay, |engine, order| {
            Ok(engine.undelay_and_reinsert(order, ids)?)
        })
    }

    /// Adds a countdown labelled `"<owner name>: <text>"`.
    pub fn add_timed_effect(
        &self,
        owner: &ParticipantId,
        duration: u32,
        text: &str,
    ) -> Result<TurnOutcome> {
        self.execute(Command::AddTimedEffect, |engine, order| {
            let description = if text.trim().is_empty() {
                String::new()
            } else {
                format!("{}: {}", self.roster.name_of(owner), text.trim())
            };
            Ok(engine.add_timed_effect(order, &description, duration)?)
        })
    }

    pub fn end_combat(&self) -> Result<TurnOutcome> {
        self.execute(Command::EndCombat, |engine, order| {
            Ok(engine.end_combat(order)?)
        })
    }

    fn execute<F>(&self, command: Command, op: F) -> Result<TurnOutcome>
    where
        F: FnOnce(&TurnEngine<'_>, &TurnOrder) -> Result<TurnOutcome>,
    {
        let engine = TurnEngine::new(&self.config);
        let result = self.store.load().map_err(TrackerError::from).and_then(|order| {
            let outcome = op(&engine, &order)?;
            self.store.save(&outcome.order)?;
            Ok(outcome)
        });

        match result {
            Ok(outcome) => {
                tracing::info!(
                    %command,
                    entries = outcome.order.len(),
                    notices = outcome.notices.len(),
                    "command applied"
                );
                for notice in &outcome.notices {
                    self.publish(Notification::Notice {
                        command,
                        text: notice.render(|id| self.roster.name_of(id)),
                        notice: notice.clone(),
                    });
                }
                Ok(outcome)
            }
            Err(error) => {
                tracing::warn!(%command, %error, "command rejected");
                self.publish(Notification::CommandFailed {
                    command,
                    kind: error.kind(),
                    message: error.to_string(),
                });
                Err(error)
            }
        }
    }

    fn publish(&self, notification: Notification) {
        for notifier in &self.notifiers {
            notifier.notify(&notification);
        }
    }

    fn roll_initiative(&self, ids: &[ParticipantId]) -> Result<Vec<Combatant>> {
        ids.iter()
            .map(|id| {
                self.roster
                    .initiative(id)
                    .map(|priority| Combatant::new(id.clone(), priority))
                    .ok_or_else(|| TrackerError::UnknownParticipant(id.clone()))
            })
            .collect()
    }

    fn surprise(&self, difficulty: Option<i32>) -> Option<Surprise<'_>> {
        difficulty.map(|difficulty| Surprise::new(self.roster.as_ref(), difficulty))
    }

    fn env(&self) -> Env<'_> {
        Env::with_participants(self.roster.as_ref())
    }
}

/// Builder for [`Tracker`].
pub struct TrackerBuilder {
    config: TrackerConfig,
    store: Option<Arc<dyn TurnOrderStore>>,
    roster: Option<Arc<RosterOracle>>,
    notifiers: Vec<Arc<dyn Notifier>>,
}

impl TrackerBuilder {
    fn new() -> Self {
        Self {
            config: TrackerConfig::default(),
            store: None,
            roster: None,
            notifiers: Vec::new(),
        }
    }

    /// Override tracker configuration
    pub fn config(mut self, config: TrackerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required turn order store
    pub fn store(mut self, store: impl TurnOrderStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set a store shared with other owners (e.g. a second tracker view)
    pub fn shared_store(mut self, store: Arc<dyn TurnOrderStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set required roster oracle
    pub fn roster(mut self, roster: Arc<RosterOracle>) -> Self {
        self.roster = Some(roster);
        self
    }

    /// Add a notifier. Without any, notifications go to [`LogNotifier`].
    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifiers.push(Arc::new(notifier));
        self
    }

    pub fn build(self) -> Result<Tracker> {
        let store = self.store.ok_or(TrackerError::MissingStore)?;
        let roster = self.roster.ok_or(TrackerError::MissingOracles)?;
        let notifiers = if self.notifiers.is_empty() {
            vec![Arc::new(LogNotifier) as Arc<dyn Notifier>]
        } else {
            self.notifiers
        };

        Ok(Tracker {
            config: self.config,
            store,
            roster,
            notifiers,
        })
    }
}

#[cfg(test)]
mod tests {
    use tracker_core::{ErrorKind, ParticipantSheet};

    use super::*;
    use crate::events::{EventBus, Topic};
    use crate::repository::InMemoryTurnOrderStore;

    fn tracker(bus: &EventBus) -> Tracker {
        let roster = RosterOracle::new(
            [
                ParticipantSheet::new("a", "Amiri").with_init(3, 12),
                ParticipantSheet::new("b", "Balazar").with_init(1, 16),
            ],
            11,
        );
        Tracker::builder()
            .store(InMemoryTurnOrderStore::new())
            .roster(Arc::new(roster))
            .notifier(bus.clone())
            .build()
            .expect("tracker")
    }

    #[test]
    fn builder_requires_store_and_roster() {
        assert!(matches!(
            Tracker::builder().build(),
            Err(TrackerError::MissingStore)
        ));
        assert!(matches!(
            Tracker::builder()
                .store(InMemoryTurnOrderStore::new())
                .build(),
            Err(TrackerError::MissingOracles)
        ));
    }

    #[test]
    fn notices_are_rendered_with_names() {
        let bus = EventBus::new();
        let mut combat = bus.subscribe(Topic::Combat);
        let tracker = tracker(&bus);

        tracker
            .start_combat(&[ParticipantId::new("a")], None)
            .expect("start");
        let text = combat.try_recv().expect("joined").to_string();
        assert!(text.starts_with("Amiri joins combat on initiative "), "{text}");
    }

    #[test]
    fn unknown_sheet_is_reported_and_nothing_saved() {
        let bus = EventBus::new();
        let mut errors = bus.subscribe(Topic::Error);
        let tracker = tracker(&bus);

        let result = tracker.start_combat(&[ParticipantId::new("ghost")], None);
        assert!(matches!(result, Err(TrackerError::UnknownParticipant(_))));
        assert!(tracker.order().expect("order").is_empty());

        match errors.try_recv().expect("failure notification") {
            Notification::CommandFailed { command, kind, .. } => {
                assert_eq!(command, Command::StartCombat);
                assert_eq!(kind, ErrorKind::NotFound);
            }
            other => panic!("unexpected notification {other:?}"),
        }
    }

    #[test]
    fn timed_effect_is_labelled_with_owner_name() {
        let bus = EventBus::new();
        let tracker = tracker(&bus);
        tracker
            .start_combat(&[ParticipantId::new("a"), ParticipantId::new("b")], None)
            .expect("start");

        let outcome = tracker
            .add_timed_effect(&ParticipantId::new("b"), 3, " Haste ")
            .expect("effect");
        assert!(
            outcome
                .order
                .entries()
                .contains(&tracker_core::TurnEntry::timed_effect("Balazar: Haste", 3))
        );

        assert!(matches!(
            tracker.add_timed_effect(&ParticipantId::new("b"), 3, "  "),
            Err(TrackerError::Engine(tracker_core::TurnOrderError::EmptyDescription))
        ));
    }
}
