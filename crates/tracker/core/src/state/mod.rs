//! Authoritative initiative-track representation.
//!
//! This module owns the data structures that describe the turn order: the
//! entries themselves, the priority value that orders participants, and the
//! validated snapshot the engine transforms. Runtime layers load and save
//! these snapshots but mutate them exclusively through the engine.
mod entry;
mod order;
mod priority;

pub use entry::{EntryKind, ParticipantId, TurnEntry};
pub use order::TurnOrder;
pub use priority::{Priority, Suffix, SurpriseState, TurnFlag};
