//! Repository contract for the shared turn-order field.

use tracker_core::TurnOrder;

use crate::repository::Result;

/// Whole-sequence persistence for the turn order.
///
/// There is exactly one sequence per store. Commands read it, transform it,
/// and write it back in full; there is no partial update.
pub trait TurnOrderStore: Send + Sync {
    /// Load the current sequence. A store that was never written holds an
    /// empty sequence.
    fn load(&self) -> Result<TurnOrder>;

    /// Replace the stored sequence.
    fn save(&self, order: &TurnOrder) -> Result<()>;

    /// Reset to the empty sequence.
    fn clear(&self) -> Result<()> {
        self.save(&TurnOrder::new())
    }
}
