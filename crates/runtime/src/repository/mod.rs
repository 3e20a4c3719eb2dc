//! Persistence for the turn-order sequence.
//!
//! The engine never touches storage; the runtime loads the sequence through a
//! [`TurnOrderStore`], hands it to the engine, and saves the result.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileTurnOrderStore;
pub use memory::InMemoryTurnOrderStore;
pub use traits::TurnOrderStore;
