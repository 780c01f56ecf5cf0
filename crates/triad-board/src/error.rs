//! Error types for the board engine.

/// Why a single move was refused.
///
/// A refused move never changes the board, the turn, or the result.
/// Only the status message of the [`GameState`](crate::GameState) is
/// rewritten to explain the refusal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The game already has a winner.
    #[error("the game is already over")]
    GameOver,

    /// The coordinates fall outside `[0, size)`.
    #[error("({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: i64, col: i64, size: usize },

    /// The target cell already holds a mark.
    #[error("cell ({row}, {col}) is already taken")]
    CellOccupied { row: usize, col: usize },
}

/// A board or game state that violates the engine's structural invariants.
///
/// Only produced when building a board from outside data, e.g. a
/// persisted single-player state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Side length is not 3 doubled zero or more times.
    #[error("invalid board size {0}: must be 3 doubled zero or more times")]
    InvalidSize(usize),

    /// A row's length differs from the number of rows.
    #[error("board is not square: row {row} has {len} cells, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },

    /// The declared `board_size` disagrees with the actual grid.
    #[error("declared board size {declared} but the grid has {actual} rows")]
    SizeMismatch { declared: usize, actual: usize },

    /// A winner is recorded on a game that is not over.
    #[error("winner recorded but the game is not over")]
    WinnerWithoutGameOver,
}
