use crate::error::TurnOrderError;
use crate::state::{TurnEntry, TurnOrder};

use super::{Notice, TurnEngine, TurnOutcome};

impl TurnEngine<'_> {
    /// Adds a countdown entry at the second-to-last position.
    ///
    /// The description is stored trimmed. A duration of zero is accepted and
    /// expires the first time the entry reaches the front.
    pub fn add_timed_effect(
        &self,
        order: &TurnOrder,
        description: &str,
        duration: u32,
    ) -> Result<TurnOutcome, TurnOrderError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(TurnOrderError::EmptyDescription);
        }
        if order.is_empty() {
            return Err(TurnOrderError::EmptyOrder);
        }

        let mut entries = order.entries().to_vec();
        let index = entries.len() - 1;
        entries.insert(index, TurnEntry::timed_effect(description, duration));

        self.finish(
            entries,
            vec![Notice::EffectAdded {
                description: description.to_string(),
                duration,
            }],
        )
    }
}
