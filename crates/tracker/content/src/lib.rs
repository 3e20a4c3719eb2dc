//! Data-driven tracker content and loaders.
//!
//! This crate reads the files a table keeps next to its game:
//! - Tracker configuration (TOML)
//! - Participant rosters (RON)
//!
//! Content is consumed by runtime oracles and never appears in the turn order.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, RosterLoader};
