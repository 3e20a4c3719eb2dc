//! Topic-based event bus implementation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::{Notification, Notifier};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Round and turn progress, flags, timed effects
    Turn,
    /// Participants joining or leaving, combat ending
    Combat,
    /// Rejected commands
    Error,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Turn, Topic::Combat, Topic::Error];
}

struct Channels {
    turn: broadcast::Sender<Notification>,
    combat: broadcast::Sender<Notification>,
    error: broadcast::Sender<Notification>,
}

impl Channels {
    fn get(&self, topic: Topic) -> &broadcast::Sender<Notification> {
        match topic {
            Topic::Turn => &self.turn,
            Topic::Combat => &self.combat,
            Topic::Error => &self.error,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// notifications they care about. Publishing never blocks and never fails:
/// notifications sent while nobody listens are dropped.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::new(Channels {
                turn: broadcast::channel(capacity).0,
                combat: broadcast::channel(capacity).0,
                error: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish a notification to its corresponding topic
    pub fn publish(&self, notification: Notification) {
        let topic = notification.topic();
        if self.channels.get(topic).send(notification).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Notification> {
        self.channels.get(topic).subscribe()
    }

    /// Subscribe to several topics at once.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> Vec<(Topic, broadcast::Receiver<Notification>)> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for EventBus {
    fn notify(&self, notification: &Notification) {
        self.publish(notification.clone());
    }
}

#[cfg(test)]
mod tests {
    use tracker_core::{ErrorKind, Notice};

    use super::*;
    use crate::events::Command;

    #[test]
    fn notifications_route_by_topic() {
        let bus = EventBus::new();
        let mut turn = bus.subscribe(Topic::Turn);
        let mut errors = bus.subscribe(Topic::Error);

        bus.publish(Notification::Notice {
            command: Command::NextTurn,
            notice: Notice::RoundStarted { round: 2 },
            text: "Start of round 2".to_string(),
        });
        bus.publish(Notification::CommandFailed {
            command: Command::Undelay,
            kind: ErrorKind::NotFound,
            message: "participant orc is not in the turn order".to_string(),
        });

        assert_eq!(
            turn.try_recv().expect("turn notification").to_string(),
            "Start of round 2"
        );
        assert!(turn.try_recv().is_err());
        assert_eq!(
            errors.try_recv().expect("error notification").command(),
            Command::Undelay
        );
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::with_capacity(1);
        bus.publish(Notification::Notice {
            command: Command::EndCombat,
            notice: Notice::CombatEnded,
            text: "Combat is over".to_string(),
        });
        assert_eq!(bus.subscribe_multiple(&Topic::ALL).len(), 3);
    }
}
