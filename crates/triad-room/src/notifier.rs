//! Push delivery from rooms to connections.

use std::collections::HashMap;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use triad_protocol::ServerMessage;
use triad_transport::ConnectionId;

/// Delivers a message to one connection without waiting for it.
///
/// The coordinator calls this while holding a room lock, so
/// implementations must not block.
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, to: ConnectionId, message: ServerMessage);
}

/// Pushes a connection may have queued before it is cut off.
pub const DEFAULT_OUTBOX_CAPACITY: usize = 64;

/// [`Notifier`] backed by one bounded channel per connection.
///
/// Each connection task registers itself on start and drains its receiver
/// into the socket. Messages for unknown or already closed connections
/// are dropped. A connection whose queue is full is unregistered: its
/// receiver sees the channel close once drained, and the connection task
/// is expected to hang up.
pub struct ConnectionOutbox {
    capacity: usize,
    senders: RwLock<HashMap<ConnectionId, mpsc::Sender<ServerMessage>>>,
}

impl ConnectionOutbox {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_OUTBOX_CAPACITY)
    }

    /// # Panics
    /// If `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "outbox capacity must be non-zero");
        Self {
            capacity,
            senders: RwLock::new(HashMap::new()),
        }
    }

    /// Opens the outbound channel for `connection`. Registering the same
    /// connection again replaces its previous channel.
    pub fn register(&self, connection: ConnectionId) -> mpsc::Receiver<ServerMessage> {
        let (tx, rx) = mpsc::channel(self.capacity);
        self.senders.write().insert(connection, tx);
        rx
    }

    pub fn unregister(&self, connection: ConnectionId) {
        self.senders.write().remove(&connection);
    }

    pub fn len(&self) -> usize {
        self.senders.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ConnectionOutbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ConnectionOutbox {
    fn notify(&self, to: ConnectionId, message: ServerMessage) {
        let result = match self.senders.read().get(&to) {
            Some(tx) => tx.try_send(message),
            None => {
                tracing::debug!(conn_id = %to, "no outbound channel, dropping push");
                return;
            }
        };
        match result {
            Ok(()) => {}
            Err(TrySendError::Closed(_)) => {
                tracing::debug!(conn_id = %to, "outbound channel closed, dropping push");
            }
            Err(TrySendError::Full(_)) => {
                tracing::warn!(
                    conn_id = %to,
                    capacity = self.capacity,
                    "outbound queue full, cutting connection off"
                );
                self.unregister(to);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_delivers_to_registered_connection() {
        let outbox = ConnectionOutbox::new();
        let mut rx = outbox.register(ConnectionId::new(1));

        outbox.notify(ConnectionId::new(1), ServerMessage::RematchAccepted);
        assert_eq!(rx.try_recv().unwrap(), ServerMessage::RematchAccepted);
    }

    #[test]
    fn test_notify_unknown_connection_is_dropped() {
        let outbox = ConnectionOutbox::new();
        let mut rx = outbox.register(ConnectionId::new(1));

        outbox.notify(ConnectionId::new(2), ServerMessage::RematchAccepted);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_unregister_stops_delivery() {
        let outbox = ConnectionOutbox::new();
        let _rx = outbox.register(ConnectionId::new(1));
        assert_eq!(outbox.len(), 1);

        outbox.unregister(ConnectionId::new(1));
        assert!(outbox.is_empty());
        // must not panic
        outbox.notify(ConnectionId::new(1), ServerMessage::RematchAccepted);
    }

    #[test]
    fn test_notify_full_queue_unregisters_connection() {
        use tokio::sync::mpsc::error::TryRecvError;

        let outbox = ConnectionOutbox::with_capacity(2);
        let mut rx = outbox.register(ConnectionId::new(1));
        let _other = outbox.register(ConnectionId::new(2));

        for _ in 0..3 {
            outbox.notify(ConnectionId::new(1), ServerMessage::RematchAccepted);
        }

        assert_eq!(outbox.len(), 1);
        assert_eq!(rx.try_recv().unwrap(), ServerMessage::RematchAccepted);
        assert_eq!(rx.try_recv().unwrap(), ServerMessage::RematchAccepted);
        assert_eq!(rx.try_recv(), Err(TryRecvError::Disconnected));
    }

    #[test]
    fn test_notify_after_receiver_dropped_does_not_panic() {
        let outbox = ConnectionOutbox::new();
        drop(outbox.register(ConnectionId::new(1)));
        outbox.notify(ConnectionId::new(1), ServerMessage::RematchAccepted);
    }
}
