//! Deterministic turn-order logic shared by the runtime and offline tools.
//!
//! `tracker-core` defines the initiative track (entries, priorities, round
//! marker, timed effects) and exposes pure APIs that transform one snapshot of
//! the track into the next. All mutation flows through [`engine::TurnEngine`];
//! loading and saving the sequence is left to the caller.
#[cfg(feature = "serde")]
pub mod codec;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use config::TrackerConfig;
pub use engine::{Combatant, Notice, RemovalReason, Surprise, Target, TurnEngine, TurnOutcome};
pub use env::{
    CreatureKind, Env, InitiativeOracle, ParticipantOracle, ParticipantSheet, ParticipantStatus,
    PcgRng, RngOracle, SurpriseOracle, compute_seed,
};
pub use error::{EngineError, ErrorKind, ErrorSeverity, TurnOrderError};
pub use state::{
    EntryKind, ParticipantId, Priority, Suffix, SurpriseState, TurnEntry, TurnFlag, TurnOrder,
};
