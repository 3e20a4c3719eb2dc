//! Topic-based event bus for tracker notifications.
//!
//! Every accepted command yields one notification per engine notice; every
//! rejected command yields a single [`Notification::CommandFailed`]. They are
//! handed to each configured [`Notifier`], of which [`EventBus`] is one.

mod bus;
mod notifier;
mod types;

pub use bus::{EventBus, Topic};
pub use notifier::{LogNotifier, Notifier};
pub use types::{Command, Notification};
