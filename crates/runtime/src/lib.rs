//! Runtime services around the pure turn-order engine.
//!
//! This crate wires the engine in `tracker-core` to storage, character data
//! and notification sinks. Consumers build a [`Tracker`] and issue commands;
//! each command is a whole load-transform-save cycle against a
//! [`TurnOrderStore`].
//!
//! Modules are organized by responsibility:
//! - [`tracker`] hosts the command service and builder
//! - [`repository`] persists the turn order (in memory or as a host JSON file)
//! - [`events`] provides the notifier boundary and a topic-based event bus
//! - [`oracle`] answers the engine's questions from character sheets
pub mod error;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod tracker;

pub use error::{Result, TrackerError};
pub use events::{Command, EventBus, LogNotifier, Notification, Notifier, Topic};
pub use oracle::RosterOracle;
pub use repository::{
    FileTurnOrderStore, InMemoryTurnOrderStore, RepositoryError, TurnOrderStore,
};
pub use tracker::{Tracker, TrackerBuilder};
