//! Per-connection handler: decode requests, route them, write pushes.
//!
//! Each accepted connection gets its own Tokio task running
//! [`handle_connection`]. The flow is:
//!   1. Register an outbound channel for the connection
//!   2. Spawn a writer that drains the channel into the socket
//!   3. Loop: receive frames → decode → hand to the coordinator, until the
//!      peer leaves or the writer stops (send failure, queue overflow)
//!   4. The guard runs the disconnect path, also on panic
//!   5. Close the socket

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use triad_protocol::{ClientMessage, Codec, Envelope, ServerMessage};
use triad_room::Notifier;
use triad_transport::{Connection, ConnectionId, WebSocketConnection};

use crate::server::ServerState;

/// Upper bound on the close handshake with a peer that stopped reading.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

/// Drop guard that takes a connection out of its room when the handler
/// exits, whichever way it exits.
///
/// `Drop` is synchronous, so the async part runs in a spawned task.
struct ConnectionGuard<C: Codec> {
    conn_id: ConnectionId,
    state: Arc<ServerState<C>>,
}

impl<C: Codec> Drop for ConnectionGuard<C> {
    fn drop(&mut self) {
        let conn_id = self.conn_id;
        self.state.outbox.unregister(conn_id);

        let state = Arc::clone(&self.state);
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    state.coordinator.handle_disconnect(conn_id).await;
                });
            }
            Err(_) => {
                tracing::warn!(%conn_id, "runtime gone, skipping disconnect cleanup");
            }
        }
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<C: Codec>(
    conn: WebSocketConnection,
    state: Arc<ServerState<C>>,
) {
    let conn_id = conn.id();
    let conn = Arc::new(conn);
    tracing::debug!(%conn_id, "handling new connection");

    let outbound = state.outbox.register(conn_id);
    let guard = ConnectionGuard {
        conn_id,
        state: Arc::clone(&state),
    };
    let mut writer = tokio::spawn(write_loop(
        Arc::clone(&conn),
        Arc::clone(&state),
        outbound,
    ));

    loop {
        let received = tokio::select! {
            received = conn.recv() => received,
            _ = &mut writer => {
                tracing::info!(%conn_id, "writer stopped, hanging up");
                break;
            }
        };
        let data = match received {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::info!(%conn_id, "connection closed");
                break;
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                break;
            }
        };

        let envelope: Envelope<ClientMessage> = match state.codec.decode(&data) {
            Ok(env) => env,
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "failed to decode envelope");
                state.outbox.notify(
                    conn_id,
                    ServerMessage::Error {
                        message: format!("Invalid message: {e}"),
                    },
                );
                continue;
            }
        };

        state.coordinator.dispatch(conn_id, envelope.payload).await;
    }

    writer.abort();
    // Leave the room before waiting on the peer for the close handshake.
    drop(guard);
    match tokio::time::timeout(CLOSE_TIMEOUT, conn.close()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::debug!(%conn_id, error = %e, "close failed"),
        Err(_) => tracing::debug!(%conn_id, "close timed out"),
    }
}

/// Drains one connection's outbound channel into its socket, numbering
/// messages as it goes.
async fn write_loop<C: Codec>(
    conn: Arc<WebSocketConnection>,
    state: Arc<ServerState<C>>,
    mut outbound: mpsc::Receiver<ServerMessage>,
) {
    let conn_id = conn.id();
    let start = Instant::now();
    let mut seq: u64 = 1;

    while let Some(message) = outbound.recv().await {
        let envelope = Envelope::new(
            next_seq(&mut seq),
            start.elapsed().as_millis() as u64,
            message,
        );
        let bytes = match state.codec.encode(&envelope) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(%conn_id, error = %e, "failed to encode push");
                continue;
            }
        };
        if let Err(e) = conn.send(&bytes).await {
            tracing::debug!(%conn_id, error = %e, "send failed, stopping writer");
            break;
        }
    }
}

/// Increments and returns the next sequence number.
fn next_seq(seq: &mut u64) -> u64 {
    let current = *seq;
    *seq += 1;
    current
}
