//! The growing square board.

use crate::{BoardError, Cell, Mark, MoveError};

/// Side length of every fresh board.
pub const INITIAL_SIZE: usize = 3;

/// Length of a winning run.
const RUN: isize = 3;

/// The four line directions as (row step, col step): horizontal,
/// vertical, main diagonal, anti-diagonal.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A square grid of cells stored row-major.
///
/// The side length is always `3 * 2^k`. The only way to grow a board is
/// [`expand`](Board::expand).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty 3×3 board.
    pub fn new() -> Self {
        Self::empty(INITIAL_SIZE)
    }

    /// Creates an empty board of the given side length.
    ///
    /// # Errors
    /// Returns [`BoardError::InvalidSize`] unless `size` is 3 doubled
    /// zero or more times.
    pub fn with_size(size: usize) -> Result<Self, BoardError> {
        if !is_valid_size(size) {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self::empty(size))
    }

    /// Builds a board from row-major rows, validating shape and size.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, BoardError> {
        let size = rows.len();
        if !is_valid_size(size) {
            return Err(BoardError::InvalidSize(size));
        }
        let mut cells = Vec::with_capacity(size * size);
        for (row, line) in rows.into_iter().enumerate() {
            if line.len() != size {
                return Err(BoardError::NotSquare {
                    row,
                    len: line.len(),
                    size,
                });
            }
            cells.extend(line);
        }
        Ok(Self { size, cells })
    }

    fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Current side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the cell at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.size && col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    /// Iterates over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    /// Copies the grid into nested row vectors (the wire layout).
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(<[Cell]>::to_vec).collect()
    }

    /// Puts `mark` on an empty cell. No turn or win logic.
    ///
    /// # Errors
    /// - [`MoveError::OutOfBounds`] if the cell is off the board
    /// - [`MoveError::CellOccupied`] if the cell already holds a mark
    pub fn place(
        &mut self,
        row: usize,
        col: usize,
        mark: Mark,
    ) -> Result<(), MoveError> {
        let cell = self.get(row, col).ok_or(MoveError::OutOfBounds {
            row: row as i64,
            col: col as i64,
            size: self.size,
        })?;
        if !cell.is_empty() {
            return Err(MoveError::CellOccupied { row, col });
        }
        self.cells[row * self.size + col] = Cell::Occupied(mark);
        Ok(())
    }

    /// Returns `true` if a run of three `mark`s passes through
    /// `(last_row, last_col)`.
    ///
    /// Only windows containing the last-placed cell are examined. That is
    /// exact for single-cell moves because no other cell changed. A move
    /// that writes several cells at once would need a full-board scan.
    pub fn check_win(&self, last_row: usize, last_col: usize, mark: Mark) -> bool {
        let (row, col) = (last_row as isize, last_col as isize);
        DIRECTIONS.iter().any(|&(dr, dc)| {
            // Slide a 3-cell window so that the last cell sits at each of
            // its three positions in turn.
            (0..RUN).any(|back| {
                let (start_row, start_col) = (row - back * dr, col - back * dc);
                (0..RUN).all(|step| {
                    self.mark_at(start_row + step * dr, start_col + step * dc)
                        == Some(mark)
                })
            })
        })
    }

    fn mark_at(&self, row: isize, col: isize) -> Option<Mark> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        self.get(row, col)?.mark()
    }

    /// Returns `true` when no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Returns a board with twice the side length and this board's
    /// contents copied to offset `size / 2` on both axes.
    pub fn expand(&self) -> Board {
        let mut grown = Self::empty(self.size * 2);
        let offset = self.size / 2;
        for (row, line) in self.rows().enumerate() {
            let start = (row + offset) * grown.size + offset;
            grown.cells[start..start + self.size].copy_from_slice(line);
        }
        grown
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// `3 * 2^k` for some `k >= 0`.
fn is_valid_size(size: usize) -> bool {
    size % INITIAL_SIZE == 0 && (size / INITIAL_SIZE).is_power_of_two()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(rows: &[&str]) -> Board {
        let rows = rows
            .iter()
            .map(|line| {
                line.chars()
                    .map(|c| match c {
                        'X' => Cell::Occupied(Mark::X),
                        'O' => Cell::Occupied(Mark::O),
                        _ => Cell::Empty,
                    })
                    .collect()
            })
            .collect();
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn test_new_is_empty_three_by_three() {
        let board = Board::new();
        assert_eq!(board.size(), 3);
        assert!(board.rows().flatten().all(|c| c.is_empty()));
    }

    #[test]
    fn test_with_size_accepts_doublings_only() {
        assert!(Board::with_size(3).is_ok());
        assert!(Board::with_size(6).is_ok());
        assert!(Board::with_size(24).is_ok());
        assert_eq!(Board::with_size(4), Err(BoardError::InvalidSize(4)));
        assert_eq!(Board::with_size(9), Err(BoardError::InvalidSize(9)));
        assert_eq!(Board::with_size(0), Err(BoardError::InvalidSize(0)));
    }

    #[test]
    fn test_from_rows_rejects_ragged_grid() {
        let rows = vec![
            vec![Cell::Empty; 3],
            vec![Cell::Empty; 2],
            vec![Cell::Empty; 3],
        ];
        assert!(matches!(
            Board::from_rows(rows),
            Err(BoardError::NotSquare { row: 1, len: 2, size: 3 })
        ));
    }

    #[test]
    fn test_place_out_of_bounds_fails() {
        let mut board = Board::new();
        assert!(matches!(
            board.place(3, 0, Mark::X),
            Err(MoveError::OutOfBounds { size: 3, .. })
        ));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_place_occupied_cell_fails() {
        let mut board = Board::new();
        board.place(1, 1, Mark::X).unwrap();
        assert_eq!(
            board.place(1, 1, Mark::O),
            Err(MoveError::CellOccupied { row: 1, col: 1 })
        );
        assert_eq!(board.get(1, 1), Some(Cell::Occupied(Mark::X)));
    }

    #[test]
    fn test_check_win_top_row() {
        let board = board_from(&["XXX", "...", "..."]);
        assert!(board.check_win(0, 2, Mark::X));
        assert!(board.check_win(0, 0, Mark::X));
        assert!(!board.check_win(0, 2, Mark::O));
    }

    #[test]
    fn test_check_win_incomplete_subsets_fail() {
        for rows in [
            ["XX.", "...", "..."],
            ["X.X", "...", "..."],
            [".XX", "...", "..."],
        ] {
            let board = board_from(&rows);
            for col in 0..3 {
                assert!(!board.check_win(0, col, Mark::X), "{rows:?}");
            }
        }
    }

    #[test]
    fn test_check_win_all_directions() {
        assert!(board_from(&["O..", "O..", "O.."]).check_win(2, 0, Mark::O));
        assert!(board_from(&["X..", ".X.", "..X"]).check_win(1, 1, Mark::X));
        assert!(board_from(&["..O", ".O.", "O.."]).check_win(0, 2, Mark::O));
    }

    #[test]
    fn test_check_win_ignores_lines_not_through_last_move() {
        // Row 0 is a win, but the last move was elsewhere.
        let board = board_from(&["XXX", "...", "..X"]);
        assert!(!board.check_win(2, 2, Mark::X));
    }

    #[test]
    fn test_check_win_finds_run_inside_longer_line() {
        let board = board_from(&[
            "......", "XXXX..", "......", "......", "......", "......",
        ]);
        assert!(board.check_win(1, 3, Mark::X));
        assert!(board.check_win(1, 1, Mark::X));
    }

    #[test]
    fn test_check_win_anywhere_on_large_board() {
        let board = board_from(&[
            "......", "......", "......", "...O..", "....O.", ".....O",
        ]);
        assert!(board.check_win(4, 4, Mark::O));
        assert!(board.check_win(5, 5, Mark::O));
    }

    #[test]
    fn test_is_full() {
        assert!(!Board::new().is_full());
        assert!(board_from(&["XOX", "XOO", "OXX"]).is_full());
    }

    #[test]
    fn test_expand_recenters_contents() {
        let board = board_from(&["XOX", "XOO", "OXX"]);
        let grown = board.expand();

        assert_eq!(grown.size(), 6);
        for row in 0..6 {
            for col in 0..6 {
                let inside = (1..4).contains(&row) && (1..4).contains(&col);
                let expected = if inside {
                    board.get(row - 1, col - 1).unwrap()
                } else {
                    Cell::Empty
                };
                assert_eq!(grown.get(row, col), Some(expected), "({row}, {col})");
            }
        }
    }

    #[test]
    fn test_expand_twice_uses_offset_of_current_size() {
        let mut board = Board::new();
        board.place(0, 0, Mark::X).unwrap();
        let twelve = board.expand().expand();
        assert_eq!(twelve.size(), 12);
        // (0,0) -> (1,1) on 6x6 -> (4,4) on 12x12.
        assert_eq!(twelve.get(4, 4), Some(Cell::Occupied(Mark::X)));
    }
}
