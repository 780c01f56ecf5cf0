//! Board engine for Triad.
//!
//! Pure game logic with no I/O and no concurrency concerns:
//!
//! - [`Board`]: a square grid that starts at 3×3 and only ever doubles
//! - [`GameState`]: one board plus turn, result, and status message
//! - [`Narrator`]: where every human-readable status text comes from
//!
//! Both play modes (the stateless single-player adapter and the
//! networked rooms) drive moves through [`GameState::apply_move`], so the
//! win and expansion rules exist exactly once.
//!
//! # The rules in one paragraph
//!
//! Players alternate placing their [`Mark`]. Three consecutive equal marks
//! in any row, column, or diagonal win, on a board of any size. If a move
//! fills the board without winning, the board doubles in size, the old
//! contents are re-centered, and the same player moves again.

mod board;
mod error;
mod mark;
mod narrator;
mod state;

pub use board::{Board, INITIAL_SIZE};
pub use error::{BoardError, MoveError};
pub use mark::{Cell, Mark};
pub use narrator::{Anonymous, Narrator};
pub use state::{GameState, MoveOutcome};
