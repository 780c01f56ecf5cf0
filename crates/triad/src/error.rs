//! Unified error type for the Triad server.

use triad_protocol::ProtocolError;
use triad_room::RoomError;
use triad_transport::TransportError;

/// Top-level error that wraps the errors of every layer.
///
/// The `#[from]` attributes let `?` convert layer errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum TriadError {
    /// Binding, accepting, or talking over a socket failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A value could not be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A room request was refused.
    #[error(transparent)]
    Room(#[from] RoomError),
}
