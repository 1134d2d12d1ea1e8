//! Notification channel.
//!
//! Fire-and-forget publish/subscribe for transient user-facing messages.
//! Any number of subscribers may listen; nothing is stored, so a
//! subscriber only sees what is published after it subscribed.

use sync_core::{Notification, NotificationKind};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

/// Buffered messages per subscriber before the oldest are dropped.
pub const DEFAULT_CAPACITY: usize = 64;

/// Sending side of the notification channel.
#[derive(Debug, Clone)]
pub struct NotificationChannel {
    tx: broadcast::Sender<Notification>,
}

impl NotificationChannel {
    /// Create a channel with [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a channel buffering up to `capacity` messages per subscriber.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish a message built from its parts.
    pub fn publish(&self, kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) {
        self.send(Notification::new(kind, title, message));
    }

    /// Publish a message.
    pub fn send(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Error | NotificationKind::Warning => {
                tracing::warn!(title = %notification.title, message = %notification.message, "notification");
            }
            NotificationKind::Info | NotificationKind::Success => {
                tracing::info!(title = %notification.title, message = %notification.message, "notification");
            }
        }
        // No subscribers is fine; messages are not kept.
        let _ = self.tx.send(notification);
    }

    /// Start receiving messages published from now on.
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of one subscriber. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    rx: broadcast::Receiver<Notification>,
}

impl Subscription {
    /// Wait for the next message.
    ///
    /// Returns `None` once every sender is gone. Messages lost to a slow
    /// subscriber are skipped.
    pub async fn recv(&mut self) -> Option<Notification> {
        loop {
            match self.rx.recv().await {
                Ok(notification) => return Some(notification),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "notification subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Take the next message if one is waiting.
    pub fn try_recv(&mut self) -> Option<Notification> {
        loop {
            match self.rx.try_recv() {
                Ok(notification) => return Some(notification),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "notification subscriber lagged");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    /// Take every message currently waiting.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }

    /// Stop receiving.
    pub fn unsubscribe(self) {}
}
