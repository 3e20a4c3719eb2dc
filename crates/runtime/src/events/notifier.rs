//! Notification boundary.

use super::Notification;

/// Receives every notification the tracker produces.
///
/// Fire-and-forget: implementations must not fail the command that produced
/// the notification.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Writes notifications to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) {
        match notification {
            Notification::Notice { command, text, .. } => {
                tracing::info!(target: "tracker", %command, "{text}");
            }
            Notification::CommandFailed {
                command,
                kind,
                message,
            } => {
                tracing::warn!(target: "tracker", %command, %kind, "{message}");
            }
        }
    }
}
