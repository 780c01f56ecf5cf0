//! Game state and the one-move state machine.

use serde::{Deserialize, Serialize};

use crate::{Board, BoardError, Cell, Mark, MoveError, Narrator};

/// What a single move attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The mover completed a run of three.
    Won(Mark),
    /// The move filled the board; it doubled and `next` moves again.
    Expanded { size: usize, next: Mark },
    /// Ordinary move; the turn passed to `next`.
    Continued { next: Mark },
    /// Nothing changed except the status message.
    Rejected(MoveError),
}

impl MoveOutcome {
    /// Returns `true` if a mark was placed.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }
}

/// The full state of one game.
///
/// Owns exactly one [`Board`]. Fields are private so that the only way to
/// change a game is [`apply_move`](Self::apply_move), which either applies
/// a move completely or leaves everything but the message untouched.
///
/// Serializes to the wire shape shared by both play modes:
///
/// ```json
/// {
///   "board": [["X", "", ""], ["", "O", ""], ["", "", ""]],
///   "current_player": "X",
///   "board_size": 3,
///   "game_over": false,
///   "winner": null,
///   "message": "Player X's turn",
///   "board_expanded": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "GameStateRepr", try_from = "GameStateRepr")]
pub struct GameState {
    board: Board,
    current_turn: Mark,
    is_over: bool,
    winner: Option<Mark>,
    message: String,
    board_just_expanded: bool,
}

impl GameState {
    /// A fresh 3×3 game with X to move and an empty message.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_turn: Mark::X,
            is_over: false,
            winner: None,
            message: String::new(),
            board_just_expanded: false,
        }
    }

    /// A fresh game whose message announces the start.
    pub fn started<N: Narrator + ?Sized>(narrator: &N) -> Self {
        Self {
            message: narrator.new_game(),
            ..Self::new()
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The mark that moves next.
    pub fn current_turn(&self) -> Mark {
        self.current_turn
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn winner(&self) -> Option<Mark> {
        self.winner
    }

    /// The latest status text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// `true` only right after the move that doubled the board.
    pub fn board_just_expanded(&self) -> bool {
        self.board_just_expanded
    }

    /// Attempts one move for the player whose turn it is.
    ///
    /// Validation happens before any mutation: game over, then bounds,
    /// then occupancy. A refusal only rewrites the message. An accepted
    /// move places the mark and resolves, in order, a win, a full board
    /// (which expands and keeps the same mover), or a turn switch.
    pub fn apply_move<N: Narrator + ?Sized>(
        &mut self,
        row: i64,
        col: i64,
        narrator: &N,
    ) -> MoveOutcome {
        self.board_just_expanded = false;

        if let Err(error) = self.try_place(row, col) {
            self.message = narrator.rejected(&error);
            return MoveOutcome::Rejected(error);
        }

        let mark = self.current_turn;
        // try_place validated both coordinates as in-bounds indices.
        let (row, col) = (row as usize, col as usize);

        if self.board.check_win(row, col, mark) {
            self.is_over = true;
            self.winner = Some(mark);
            self.message = narrator.win(mark);
            MoveOutcome::Won(mark)
        } else if self.board.is_full() {
            self.board = self.board.expand();
            self.board_just_expanded = true;
            let size = self.board.size();
            self.message = narrator.expanded(size, mark);
            MoveOutcome::Expanded { size, next: mark }
        } else {
            self.current_turn = mark.opponent();
            self.message = narrator.turn(self.current_turn);
            MoveOutcome::Continued {
                next: self.current_turn,
            }
        }
    }

    fn try_place(&mut self, row: i64, col: i64) -> Result<(), MoveError> {
        if self.is_over {
            return Err(MoveError::GameOver);
        }
        let size = self.board.size();
        let out_of_bounds = MoveError::OutOfBounds { row, col, size };
        let r = usize::try_from(row).map_err(|_| out_of_bounds.clone())?;
        let c = usize::try_from(col).map_err(|_| out_of_bounds.clone())?;
        if r >= size || c >= size {
            return Err(out_of_bounds);
        }
        self.board.place(r, c, self.current_turn)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Wire representation
// ---------------------------------------------------------------------------

/// Flat serde mirror of [`GameState`]. Converting back validates the
/// board shape so a tampered or truncated payload cannot produce a state
/// the engine would index out of bounds.
#[derive(Serialize, Deserialize)]
struct GameStateRepr {
    board: Vec<Vec<Cell>>,
    current_player: Mark,
    board_size: usize,
    game_over: bool,
    winner: Option<Mark>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    board_expanded: bool,
}

impl From<GameState> for GameStateRepr {
    fn from(state: GameState) -> Self {
        Self {
            board_size: state.board.size(),
            board: state.board.to_rows(),
            current_player: state.current_turn,
            game_over: state.is_over,
            winner: state.winner,
            message: state.message,
            board_expanded: state.board_just_expanded,
        }
    }
}

impl TryFrom<GameStateRepr> for GameState {
    type Error = BoardError;

    fn try_from(repr: GameStateRepr) -> Result<Self, Self::Error> {
        if repr.board.len() != repr.board_size {
            return Err(BoardError::SizeMismatch {
                declared: repr.board_size,
                actual: repr.board.len(),
            });
        }
        if repr.winner.is_some() && !repr.game_over {
            return Err(BoardError::WinnerWithoutGameOver);
        }
        Ok(Self {
            board: Board::from_rows(repr.board)?,
            current_turn: repr.current_player,
            is_over: repr.game_over,
            winner: repr.winner,
            message: repr.message,
            board_just_expanded: repr.board_expanded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Anonymous;

    #[test]
    fn test_new_is_fresh() {
        let state = GameState::new();
        assert_eq!(state.board().size(), 3);
        assert_eq!(state.current_turn(), Mark::X);
        assert!(!state.is_over());
        assert_eq!(state.winner(), None);
        assert_eq!(state.message(), "");
        assert!(!state.board_just_expanded());
    }

    #[test]
    fn test_apply_move_switches_turn() {
        let mut state = GameState::new();
        let outcome = state.apply_move(0, 0, &Anonymous);
        assert_eq!(outcome, MoveOutcome::Continued { next: Mark::O });
        assert_eq!(state.current_turn(), Mark::O);
        assert_eq!(state.message(), "Player O's turn");
    }

    #[test]
    fn test_apply_move_negative_coordinates_out_of_bounds() {
        let mut state = GameState::new();
        let outcome = state.apply_move(-1, 0, &Anonymous);
        assert!(matches!(
            outcome,
            MoveOutcome::Rejected(MoveError::OutOfBounds { row: -1, .. })
        ));
    }

    #[test]
    fn test_apply_move_after_win_rejected() {
        let mut state = GameState::new();
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            state.apply_move(row, col, &Anonymous);
        }
        assert_eq!(state.winner(), Some(Mark::X));

        let outcome = state.apply_move(2, 2, &Anonymous);
        assert_eq!(outcome, MoveOutcome::Rejected(MoveError::GameOver));
        assert_eq!(state.message(), "The game is already over");
        assert_eq!(state.board().get(2, 2), Some(Cell::Empty));
    }

    #[test]
    fn test_serialize_wire_shape() {
        let mut state = GameState::new();
        state.apply_move(0, 0, &Anonymous);
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["board"][0][0], "X");
        assert_eq!(json["board"][0][1], "");
        assert_eq!(json["board"].as_array().unwrap().len(), 3);
        assert_eq!(json["current_player"], "O");
        assert_eq!(json["board_size"], 3);
        assert_eq!(json["game_over"], false);
        assert!(json["winner"].is_null());
        assert_eq!(json["message"], "Player O's turn");
        assert_eq!(json["board_expanded"], false);
    }

    #[test]
    fn test_deserialize_rejects_size_mismatch() {
        let json = r#"{
            "board": [["", "", ""], ["", "", ""], ["", "", ""]],
            "current_player": "X",
            "board_size": 6,
            "game_over": false,
            "winner": null,
            "message": "",
            "board_expanded": false
        }"#;
        assert!(serde_json::from_str::<GameState>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_winner_on_running_game() {
        let json = r#"{
            "board": [["", "", ""], ["", "", ""], ["", "", ""]],
            "current_player": "X",
            "board_size": 3,
            "game_over": false,
            "winner": "O",
            "message": "",
            "board_expanded": false
        }"#;
        assert!(serde_json::from_str::<GameState>(json).is_err());
    }
}
