//! Integration tests for single-device play over persisted bytes.

use triad::prelude::*;

/// Plays `moves` in order, feeding each reply's bytes into the next call.
fn play(game: &SoloGame, moves: &[(i64, i64)]) -> SoloReply {
    let mut reply = game.new_game().unwrap();
    for &(row, col) in moves {
        reply = game.make_move(Some(&reply.persist), row, col).unwrap();
    }
    reply
}

#[test]
fn test_make_move_alternates_players_across_requests() {
    let game = SoloGame::new();
    let reply = play(&game, &[(0, 0), (1, 1)]);

    let board = reply.game_state.board();
    assert_eq!(board.get(0, 0), Some(Cell::Occupied(Mark::X)));
    assert_eq!(board.get(1, 1), Some(Cell::Occupied(Mark::O)));
    assert_eq!(reply.game_state.current_turn(), Mark::X);
    assert_eq!(reply.game_state.message(), "Player X's turn");
}

#[test]
fn test_make_move_win_is_final() {
    let game = SoloGame::new();
    let reply = play(&game, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
    assert!(reply.game_state.is_over());
    assert_eq!(reply.game_state.winner(), Some(Mark::X));
    assert_eq!(reply.game_state.message(), "🎉 Player X wins!");

    let after = game.make_move(Some(&reply.persist), 2, 2).unwrap();
    assert_eq!(after.game_state.board(), reply.game_state.board());
    assert_eq!(after.game_state.message(), "The game is already over");
}

#[test]
fn test_make_move_full_board_expands_and_keeps_mover() {
    let game = SoloGame::new();
    let reply = play(
        &game,
        &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)],
    );

    let state = &reply.game_state;
    assert_eq!(state.board().size(), 6);
    assert!(state.board_just_expanded());
    assert_eq!(state.current_turn(), Mark::X);
    assert_eq!(state.board().get(1, 1), Some(Cell::Occupied(Mark::X)));
    assert_eq!(
        state.message(),
        "The board is full! Expanded to 6x6. Player X's turn"
    );

    // The flag only lasts for the move that caused it.
    let next = game.make_move(Some(&reply.persist), 0, 0).unwrap();
    assert!(!next.game_state.board_just_expanded());
}

#[test]
fn test_make_move_out_of_bounds_changes_only_message() {
    let game = SoloGame::new();
    let before = play(&game, &[(0, 0)]);
    let after = game.make_move(Some(&before.persist), 3, 0).unwrap();

    assert_eq!(after.game_state.board(), before.game_state.board());
    assert_eq!(after.game_state.current_turn(), before.game_state.current_turn());
    assert_eq!(after.game_state.message(), "Invalid move: outside the board");
}

#[test]
fn test_state_with_garbage_bytes_starts_fresh() {
    let game = SoloGame::new();
    let reply = game.state(Some(b"{not a game")).unwrap();
    assert_eq!(reply.game_state, GameState::new());
}

#[test]
fn test_state_with_inconsistent_board_starts_fresh() {
    let game = SoloGame::new();
    let lying = br#"{
        "board": [["X", "", ""], ["", "", ""]],
        "current_player": "O",
        "board_size": 3,
        "game_over": false,
        "winner": null,
        "message": "",
        "board_expanded": false
    }"#;
    let reply = game.state(Some(lying)).unwrap();
    assert_eq!(reply.game_state, GameState::new());
}

#[test]
fn test_state_round_trips_stored_game() {
    let game = SoloGame::new();
    let played = play(&game, &[(2, 2), (0, 0)]);
    let reloaded = game.state(Some(&played.persist)).unwrap();
    assert_eq!(reloaded.game_state, played.game_state);
}

#[test]
fn test_make_move_without_stored_state_plays_on_fresh_board() {
    let game = SoloGame::new();
    let reply = game.make_move(None, 1, 1).unwrap();
    assert_eq!(reply.game_state.board().get(1, 1), Some(Cell::Occupied(Mark::X)));
    assert_eq!(reply.game_state.current_turn(), Mark::O);
}
