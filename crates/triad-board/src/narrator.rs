//! Human-readable status texts.
//!
//! Every message a player reads in [`GameState::message`](crate::GameState::message)
//! is produced here. Implementors only decide how a player is called via
//! [`Narrator::label`]; the provided methods compose the sentences. A
//! translation overrides the provided methods as well.

use crate::{Mark, MoveError};

/// Produces status texts for one game.
pub trait Narrator {
    /// How the player holding `mark` is referred to, e.g. `"Player X"`.
    fn label(&self, mark: Mark) -> String;

    /// Announces the winner.
    fn win(&self, winner: Mark) -> String {
        format!("🎉 {} wins!", self.label(winner))
    }

    /// Announces that the board grew to `size`×`size` and who moves next.
    fn expanded(&self, size: usize, next: Mark) -> String {
        format!(
            "The board is full! Expanded to {size}x{size}. {}'s turn",
            self.label(next)
        )
    }

    /// Announces whose turn it is.
    fn turn(&self, next: Mark) -> String {
        format!("{}'s turn", self.label(next))
    }

    /// Announces a freshly started game.
    fn new_game(&self) -> String {
        format!("New game! {}'s turn", self.label(Mark::X))
    }

    /// Explains why a move was refused.
    fn rejected(&self, error: &MoveError) -> String {
        match error {
            MoveError::GameOver => "The game is already over".to_string(),
            MoveError::OutOfBounds { .. } => {
                "Invalid move: outside the board".to_string()
            }
            MoveError::CellOccupied { .. } => {
                "That cell is taken! Pick another one".to_string()
            }
        }
    }
}

/// Narrator for games without player names (single-player mode).
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl Narrator for Anonymous {
    fn label(&self, mark: Mark) -> String {
        format!("Player {mark}")
    }
}
