//! In-memory TurnOrderStore implementation for tests and local runs.

use std::sync::RwLock;

use tracker_core::TurnOrder;

use crate::repository::{RepositoryError, Result, TurnOrderStore};

/// In-memory implementation of TurnOrderStore.
#[derive(Debug, Default)]
pub struct InMemoryTurnOrderStore {
    order: RwLock<TurnOrder>,
}

impl InMemoryTurnOrderStore {
    /// Create a store holding an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with an existing sequence.
    pub fn with_order(order: TurnOrder) -> Self {
        Self {
            order: RwLock::new(order),
        }
    }
}

impl TurnOrderStore for InMemoryTurnOrderStore {
    fn load(&self) -> Result<TurnOrder> {
        let order = self
            .order
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(order.clone())
    }

    fn save(&self, order: &TurnOrder) -> Result<()> {
        let mut stored = self
            .order
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *stored = order.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tracker_core::{Priority, TurnEntry, TrackerConfig};

    use super::*;

    #[test]
    fn save_replaces_whole_sequence() {
        let store = InMemoryTurnOrderStore::new();
        assert!(store.load().expect("load").is_empty());

        let order = TurnOrder::from_entries(
            vec![
                TurnEntry::RoundMarker { round: 1 },
                TurnEntry::participant("a", Priority::new(10, 0)),
            ],
            &TrackerConfig::default(),
        )
        .expect("valid order");
        store.save(&order).expect("save");
        assert_eq!(store.load().expect("load"), order);

        store.clear().expect("clear");
        assert!(store.load().expect("load").is_empty());
    }
}
