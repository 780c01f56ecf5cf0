//! Player marks and board cells.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One of the two player symbols.
///
/// Serializes as the plain strings `"X"` and `"O"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Both marks in seating order.
    pub const ALL: [Mark; 2] = [Mark::X, Mark::O];

    /// Returns the other player's mark.
    pub fn opponent(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    /// Seat index: 0 for X, 1 for O.
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::O => 1,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::O => write!(f, "O"),
        }
    }
}

/// The content of one board square.
///
/// On the wire an empty cell is the empty string `""` and an occupied
/// cell is its mark (`"X"` / `"O"`). `null` is accepted as empty when
/// reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Mark),
}

impl Cell {
    /// Returns `true` if no mark is on this square.
    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the mark on this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Self::Empty => None,
            Self::Occupied(mark) => Some(mark),
        }
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        Self::Occupied(mark)
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Empty => serializer.serialize_str(""),
            Self::Occupied(Mark::X) => serializer.serialize_str("X"),
            Self::Occupied(Mark::O) => serializer.serialize_str("O"),
        }
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") => Ok(Self::Empty),
            Some("X") => Ok(Self::Occupied(Mark::X)),
            Some("O") => Ok(Self::Occupied(Mark::O)),
            Some(other) => Err(D::Error::custom(format!(
                "unknown cell marker {other:?}"
            ))),
        }
    }
}
