//! Single-device play without a server-side session.
//!
//! Both players share one screen, so there is no room and no turn check:
//! whoever holds the turn moves. The caller keeps the game between
//! requests (a cookie, local storage, a session store) as the bytes in
//! [`SoloReply::persist`] and hands them back on the next call.

use serde::Serialize;
use triad_board::{Anonymous, GameState};
use triad_protocol::{Codec, JsonCodec};

use crate::TriadError;

/// Result of one single-device request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoloReply {
    /// The state to show, also the response body.
    pub game_state: GameState,
    /// The state encoded for the caller to store.
    #[serde(skip)]
    pub persist: Vec<u8>,
}

/// Stateless single-device game adapter.
///
/// Stored bytes that are missing or cannot be decoded into a valid game
/// are replaced by a fresh game; a bad cookie never locks a player out.
#[derive(Debug, Clone, Default)]
pub struct SoloGame {
    codec: JsonCodec,
}

impl SoloGame {
    pub fn new() -> Self {
        Self { codec: JsonCodec }
    }

    /// The stored game, or a fresh one.
    pub fn state(&self, stored: Option<&[u8]>) -> Result<SoloReply, TriadError> {
        self.reply(self.load(stored))
    }

    /// Discards whatever was stored and starts over.
    pub fn new_game(&self) -> Result<SoloReply, TriadError> {
        self.reply(GameState::started(&Anonymous))
    }

    /// Plays one move on the stored game for whoever holds the turn.
    ///
    /// Refused moves are not errors: the reply carries the unchanged game
    /// with the explanation in its message.
    pub fn make_move(
        &self,
        stored: Option<&[u8]>,
        row: i64,
        col: i64,
    ) -> Result<SoloReply, TriadError> {
        let mut game = self.load(stored);
        let outcome = game.apply_move(row, col, &Anonymous);
        tracing::debug!(row, col, ?outcome, "single-device move");
        self.reply(game)
    }

    fn load(&self, stored: Option<&[u8]>) -> GameState {
        let Some(bytes) = stored else {
            return GameState::new();
        };
        match self.codec.decode(bytes) {
            Ok(game) => game,
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable stored game");
                GameState::new()
            }
        }
    }

    fn reply(&self, game_state: GameState) -> Result<SoloReply, TriadError> {
        let persist = self.codec.encode(&game_state)?;
        Ok(SoloReply {
            game_state,
            persist,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triad_board::Mark;

    #[test]
    fn test_state_without_stored_bytes_is_fresh() {
        let reply = SoloGame::new().state(None).unwrap();
        assert_eq!(reply.game_state, GameState::new());
        assert!(!reply.persist.is_empty());
    }

    #[test]
    fn test_new_game_announces_player_x() {
        let reply = SoloGame::new().new_game().unwrap();
        assert_eq!(reply.game_state.message(), "New game! Player X's turn");
        assert_eq!(reply.game_state.current_turn(), Mark::X);
    }

    #[test]
    fn test_reply_body_omits_persist_bytes() {
        let reply = SoloGame::new().state(None).unwrap();
        let json = serde_json::to_value(&reply).unwrap();
        assert!(json.get("persist").is_none());
        assert_eq!(json["game_state"]["board_size"], 3);
    }
}
