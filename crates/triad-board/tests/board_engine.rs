//! Behavioural tests for the move state machine.

use triad_board::{
    Anonymous, Board, Cell, GameState, Mark, MoveError, MoveOutcome, Narrator,
};

/// Plays the moves in order, asserting each one is accepted.
fn play(state: &mut GameState, moves: &[(i64, i64)]) {
    for &(row, col) in moves {
        let outcome = state.apply_move(row, col, &Anonymous);
        assert!(outcome.is_accepted(), "move ({row}, {col}): {outcome:?}");
    }
}

/// Fills the 3×3 board without any three in a row, ending on X's move:
///
/// ```text
///  X | O | X
///  X | O | O
///  O | X | X
/// ```
const DRAWN_FILL: [(i64, i64); 9] = [
    (0, 0), // X
    (0, 1), // O
    (0, 2), // X
    (1, 1), // O
    (1, 0), // X
    (1, 2), // O
    (2, 1), // X
    (2, 0), // O
    (2, 2), // X fills the board
];

#[test]
fn test_apply_move_turn_alternates() {
    let mut state = GameState::new();
    let mut expected = Mark::X;
    for (row, col) in [(0, 0), (1, 1), (2, 2), (0, 1), (2, 1), (1, 2)] {
        assert_eq!(state.current_turn(), expected);
        state.apply_move(row, col, &Anonymous);
        expected = expected.opponent();
    }
    assert_eq!(state.current_turn(), expected);
    assert!(!state.is_over());
}

#[test]
fn test_apply_move_top_row_wins_for_x() {
    let mut state = GameState::new();
    play(&mut state, &[(0, 0), (1, 0), (0, 1), (1, 1)]);

    let outcome = state.apply_move(0, 2, &Anonymous);

    assert_eq!(outcome, MoveOutcome::Won(Mark::X));
    assert!(state.is_over());
    assert_eq!(state.winner(), Some(Mark::X));
    assert_eq!(state.message(), Anonymous.win(Mark::X));
    // The winner keeps the turn; nobody can move any more.
    assert_eq!(state.current_turn(), Mark::X);
}

#[test]
fn test_apply_move_full_board_expands_and_keeps_mover() {
    let mut state = GameState::new();
    play(&mut state, &DRAWN_FILL[..8]);
    let before = state.board().clone();

    let outcome = state.apply_move(2, 2, &Anonymous);

    assert_eq!(outcome, MoveOutcome::Expanded { size: 6, next: Mark::X });
    assert!(state.board_just_expanded());
    assert!(!state.is_over());
    assert_eq!(state.current_turn(), Mark::X);
    assert_eq!(state.message(), Anonymous.expanded(6, Mark::X));

    let board = state.board();
    assert_eq!(board.size(), 6);
    for row in 0..6 {
        for col in 0..6 {
            let inside = (1..4).contains(&row) && (1..4).contains(&col);
            let expected = if inside {
                if (row, col) == (3, 3) {
                    Cell::Occupied(Mark::X)
                } else {
                    before.get(row - 1, col - 1).unwrap()
                }
            } else {
                Cell::Empty
            };
            assert_eq!(board.get(row, col), Some(expected), "({row}, {col})");
        }
    }
}

#[test]
fn test_apply_move_expanded_flag_resets_on_next_attempt() {
    let mut state = GameState::new();
    play(&mut state, &DRAWN_FILL);
    assert!(state.board_just_expanded());

    // Even a rejected attempt clears the transient flag.
    state.apply_move(99, 0, &Anonymous);
    assert!(!state.board_just_expanded());
}

#[test]
fn test_apply_move_win_on_expanded_board() {
    let mut state = GameState::new();
    play(&mut state, &DRAWN_FILL);
    // X moves again after the expansion; extend the X at (3,3) to a
    // diagonal with (4,4) and (5,5).
    play(&mut state, &[(4, 4), (0, 0)]);
    let outcome = state.apply_move(5, 5, &Anonymous);
    assert_eq!(outcome, MoveOutcome::Won(Mark::X));
}

#[test]
fn test_apply_move_rejections_only_touch_message() {
    let mut state = GameState::new();
    play(&mut state, &[(1, 1), (0, 0)]);

    for (row, col, expected) in [
        (1, 1, MoveError::CellOccupied { row: 1, col: 1 }),
        (3, 0, MoveError::OutOfBounds { row: 3, col: 0, size: 3 }),
        (0, -4, MoveError::OutOfBounds { row: 0, col: -4, size: 3 }),
    ] {
        let board = state.board().clone();
        let turn = state.current_turn();
        let outcome = state.apply_move(row, col, &Anonymous);

        assert_eq!(outcome, MoveOutcome::Rejected(expected.clone()));
        assert_eq!(state.board(), &board);
        assert_eq!(state.current_turn(), turn);
        assert!(!state.is_over());
        assert_eq!(state.winner(), None);
        assert_eq!(state.message(), Anonymous.rejected(&expected));
    }
}

#[test]
fn test_game_state_json_round_trip_after_expansion() {
    let mut state = GameState::new();
    play(&mut state, &DRAWN_FILL);

    let json = serde_json::to_string(&state).unwrap();
    let decoded: GameState = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded, state);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["board_size"], 6);
    assert_eq!(value["board"].as_array().unwrap().len(), 6);
    assert!(value["board"]
        .as_array()
        .unwrap()
        .iter()
        .all(|row| row.as_array().unwrap().len() == 6));
}

#[test]
fn test_board_with_size_matches_expand() {
    let grown = Board::new().expand();
    assert_eq!(grown, Board::with_size(6).unwrap());
}
