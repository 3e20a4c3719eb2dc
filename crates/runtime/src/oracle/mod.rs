//! Runtime implementations of the tracker-core oracle traits.
//!
//! Character sheets belong to the host and change during play. The tracker
//! reads them through these oracles but never persists them.
mod roster;

pub use roster::RosterOracle;
