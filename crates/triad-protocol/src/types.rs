//! Message types for Triad's real-time channel.
//!
//! Everything here travels "on the wire": it is serialized by a
//! [`Codec`](crate::Codec), written to a WebSocket frame, and decoded on the
//! other side. Messages are internally tagged, so a move looks like
//! `{"type": "MakeMove", "row": 0, "col": 2}` which is easy to build and
//! switch on from JavaScript.

use serde::{Deserialize, Serialize};
use triad_board::{GameState, Mark};

use crate::RoomCode;

// ---------------------------------------------------------------------------
// Envelope: the top-level wire format
// ---------------------------------------------------------------------------

/// Wrapper around every message on the wire.
///
/// ```text
/// ┌──────────────────────────────────┐
/// │ seq: 42                          │  <- per-direction counter
/// │ timestamp: 15000                 │  <- ms since the sender started
/// │ ┌──────────────────────────────┐ │
/// │ │ payload: MakeMove {0, 2}     │ │  <- the actual message
/// │ └──────────────────────────────┘ │
/// └──────────────────────────────────┘
/// ```
///
/// Browser clients may omit `seq` and `timestamp`; both default to 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<P> {
    /// Auto-incrementing sequence number. The server numbers its own
    /// outbound messages per connection.
    #[serde(default)]
    pub seq: u64,

    /// Milliseconds since the sender started.
    #[serde(default)]
    pub timestamp: u64,

    /// The message itself.
    pub payload: P,
}

impl<P> Envelope<P> {
    pub fn new(seq: u64, timestamp: u64, payload: P) -> Self {
        Self {
            seq,
            timestamp,
            payload,
        }
    }
}

// ---------------------------------------------------------------------------
// Client -> Server
// ---------------------------------------------------------------------------

/// Everything a client can ask for. Disconnecting is implicit: closing
/// the socket (or losing it) is the disconnect message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Open a new room and take the X seat.
    CreateRoom { display_name: String },

    /// Take the free seat of an existing room. `code` is raw user input;
    /// the server canonicalizes it.
    JoinRoom { code: String, display_name: String },

    /// Place the sender's mark. Signed so that a negative coordinate is
    /// refused as out of bounds instead of failing to decode.
    MakeMove { row: i64, col: i64 },

    /// Ask the opponent for another game.
    RequestRematch,

    /// Reset the room to a fresh game.
    AcceptRematch,
}

// ---------------------------------------------------------------------------
// Server -> Client
// ---------------------------------------------------------------------------

/// One occupant's view of a room.
///
/// The same room produces two different views, one per seat: each player
/// sees their own mark, the other player's name, and whether it is their
/// turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomView {
    pub code: RoomCode,
    /// The recipient's own mark.
    pub mark: Mark,
    /// The other seat's display name, `None` while the seat is empty.
    pub opponent_name: Option<String>,
    /// Both seats are taken.
    pub is_game_started: bool,
    /// `current_turn == mark && !game_over`.
    pub is_your_turn: bool,
    pub game_state: GameState,
}

/// Everything the server pushes to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Reply to `CreateRoom`.
    RoomCreated(RoomView),

    /// Reply to a successful `JoinRoom`.
    RoomJoined(RoomView),

    /// Pushed to the waiting occupant when the other seat fills.
    OpponentJoined(RoomView),

    /// Pushed to both occupants after every move attempt and rematch.
    GameUpdated(RoomView),

    /// The other occupant left.
    OpponentDisconnected { opponent_name: String },

    /// The other occupant wants another game.
    RematchRequested { requester_name: String },

    /// The room was reset to a fresh game.
    RematchAccepted,

    /// A refused request, explained for humans.
    Error { message: String },
}

// =========================================================================
// Tests
// =========================================================================
