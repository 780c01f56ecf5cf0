//! Wire protocol for Triad.
//!
//! This crate defines what clients and the server say to each other:
//!
//! - **Messages** ([`ClientMessage`], [`ServerMessage`], [`RoomView`]):
//!   the logical message set of the real-time channel, wrapped in an
//!   [`Envelope`] on the wire.
//! - **Room codes** ([`RoomCode`]): the short human-shareable names of
//!   rooms.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how messages and
//!   persisted game states become bytes and back.
//! - **Errors** ([`ProtocolError`]).
//!
//! # Architecture
//!
//! The protocol layer knows nothing about sockets or locks. It sits
//! between the transport (raw frames) and the room layer (who plays where):
//!
//! ```text
//! Transport (frames) -> Protocol (Envelope<ClientMessage>) -> Coordinator
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod code;
mod codec;
mod error;
mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use code::{RoomCode, CODE_ALPHABET, CODE_LEN};
pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{ClientMessage, Envelope, RoomView, ServerMessage};

/// The game state type carried inside room messages.
pub use triad_board::{GameState, Mark};
