//! `TriadServer` builder and accept loop.
//!
//! Ties the layers together: transport → protocol → coordinator.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use triad_protocol::{Codec, JsonCodec};
use triad_room::{ConnectionOutbox, Coordinator, Registry, RoomConfig, spawn_sweeper};
use triad_transport::{Handshake, PendingWebSocket, Transport, WebSocketTransport};

use crate::TriadError;
use crate::handler::handle_connection;

/// How long a peer gets to finish the WebSocket upgrade.
pub const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared server state passed to each connection task.
pub(crate) struct ServerState<C: Codec> {
    pub(crate) coordinator: Coordinator<ConnectionOutbox>,
    pub(crate) outbox: Arc<ConnectionOutbox>,
    pub(crate) codec: C,
}

/// Builder for configuring and starting a Triad server.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use triad::prelude::*;
///
/// # async fn start() -> Result<(), TriadError> {
/// let server = TriadServer::builder()
///     .bind("127.0.0.1:8080")
///     .room_config(RoomConfig {
///         max_age: Duration::from_secs(3600),
///         ..RoomConfig::default()
///     })
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct TriadServerBuilder {
    bind_addr: String,
    room_config: RoomConfig,
}

impl TriadServerBuilder {
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            room_config: RoomConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets room retention and sweeping.
    pub fn room_config(mut self, config: RoomConfig) -> Self {
        self.room_config = config;
        self
    }

    /// Binds the listener. Uses [`JsonCodec`] on the wire.
    pub async fn build(self) -> Result<TriadServer<JsonCodec>, TriadError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;

        let registry = Arc::new(Registry::new());
        let outbox = Arc::new(ConnectionOutbox::new());
        let state = Arc::new(ServerState {
            coordinator: Coordinator::new(Arc::clone(&registry), Arc::clone(&outbox)),
            outbox,
            codec: JsonCodec,
        });

        Ok(TriadServer {
            transport,
            state,
            registry,
            room_config: self.room_config,
        })
    }
}

impl Default for TriadServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Stops the sweeper when the accept loop goes away.
struct SweeperGuard(JoinHandle<()>);

impl Drop for SweeperGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// A bound Triad server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct TriadServer<C: Codec = JsonCodec> {
    transport: WebSocketTransport,
    state: Arc<ServerState<C>>,
    registry: Arc<Registry>,
    room_config: RoomConfig,
}

impl TriadServer<JsonCodec> {
    pub fn builder() -> TriadServerBuilder {
        TriadServerBuilder::new()
    }
}

impl<C: Codec> TriadServer<C> {
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, TriadError> {
        Ok(self.transport.local_addr()?)
    }

    /// The room registry, for introspection.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Runs the accept loop and the room sweeper.
    ///
    /// Spawns one task per accepted peer; the WebSocket upgrade runs in
    /// that task under [`HANDSHAKE_TIMEOUT`]. A failed accept is logged and
    /// does not stop the loop; the future only ends when dropped.
    pub async fn run(mut self) -> Result<(), TriadError> {
        let _sweeper = SweeperGuard(spawn_sweeper(
            Arc::clone(&self.registry),
            &self.room_config,
        ));
        tracing::info!(addr = %self.local_addr()?, "Triad server running");

        loop {
            match self.transport.accept().await {
                Ok(pending) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(upgrade_and_handle(pending, state));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "accept failed");
                }
            }
        }
    }
}

/// Finishes the upgrade for one peer, then hands it to the handler.
async fn upgrade_and_handle<C: Codec>(pending: PendingWebSocket, state: Arc<ServerState<C>>) {
    let peer = pending.peer_addr();
    match tokio::time::timeout(HANDSHAKE_TIMEOUT, pending.complete()).await {
        Ok(Ok(conn)) => handle_connection(conn, state).await,
        Ok(Err(e)) => tracing::debug!(%peer, error = %e, "handshake failed"),
        Err(_) => tracing::debug!(%peer, "handshake timed out"),
    }
}
