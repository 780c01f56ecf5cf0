//! Error types for the room layer.
//!
//! The `Display` texts are shown to players verbatim inside
//! `ServerMessage::Error`, so they are phrased for humans.

use triad_protocol::RoomCode;

/// A request the room layer refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    /// The connection does not occupy any room.
    #[error("You are not in a room")]
    NoRoom,

    /// No live room has this code. Carries the code as the player typed it.
    #[error("Room {0} not found")]
    RoomNotFound(String),

    /// Both seats are taken.
    #[error("Room {0} is full")]
    RoomFull(RoomCode),

    /// The room still waits for its second player.
    #[error("Waiting for an opponent to join")]
    GameNotStarted,

    /// The other player is to move.
    #[error("It's not your turn")]
    NotYourTurn,

    /// The connection already sits in a room and must leave it first.
    #[error("You are already in room {0}")]
    AlreadyInRoom(RoomCode),
}
