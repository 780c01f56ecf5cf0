//! Error types for the protocol layer.
//!
//! Each crate in Triad defines its own error enum. A `ProtocolError`
//! always means bytes could not be turned into a message (or back), or a
//! value broke a wire-format rule such as the room code alphabet.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust value into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust value).
    ///
    /// Common causes: malformed JSON, an unknown message `type`, missing
    /// fields, or a persisted game state whose board is not square.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A room code that cannot exist: wrong length or a character outside
    /// the code alphabet.
    #[error("invalid room code {0:?}")]
    InvalidRoomCode(String),
}
