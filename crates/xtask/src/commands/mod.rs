//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod read_order;
mod simulate;

pub use read_order::ReadOrder;
pub use simulate::Simulate;
