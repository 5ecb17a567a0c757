//! Session tests - stepping, commands, locking, and cross-player rules

use gridfall::core::{Board, GameSession, Shape};
use gridfall::types::{Command, RotateDir};

fn bottom_extent(shape: &Shape) -> i16 {
    shape
        .offsets()
        .iter()
        .map(|&(_, dy)| dy as i16)
        .max()
        .unwrap()
}

#[test]
fn test_step_moves_every_shape_down_by_one() {
    let mut session = GameSession::new(10, 10, 3);
    session.add_player(1);
    session.add_player(2);

    let rows_before: Vec<i16> = session.shapes().map(|s| s.row).collect();
    session.step();
    let rows_after: Vec<i16> = session.shapes().map(|s| s.row).collect();

    assert_eq!(rows_before.len(), 2);
    for (before, after) in rows_before.iter().zip(rows_after.iter()) {
        assert_eq!(after - before, 1);
    }
}

#[test]
fn test_grounded_shape_locks_and_respawns() {
    let mut session = GameSession::new(10, 20, 3);
    session.add_player(1);

    let shape = *session.shape(1).unwrap();
    let resting_row = 19 - bottom_extent(&shape);

    // Step until the shape reaches its resting row, one more tick grounds
    // and locks it.
    for _ in 0..resting_row {
        session.step();
    }
    assert_eq!(session.shape(1).unwrap().row, resting_row);
    session.step();

    // Locked cells belong to player 1 and a fresh shape sits at the top.
    for (col, row) in shape.cells_at(resting_row, shape.col, shape.rotation as i32) {
        assert_eq!(session.board().occupant(row, col), Some(1));
    }
    assert_eq!(session.shape(1).unwrap().row, 0);
    assert!(!session.is_game_over());
}

#[test]
fn test_falling_shapes_may_overlap_until_one_locks() {
    let mut session = GameSession::new(10, 20, 11);
    session.add_player(1);
    session.add_player(2);

    // Both spawn at the same origin; at rotation 0 any two kinds share at
    // least one cell there.
    let cells_1 = session.shape(1).unwrap().cells();
    let cells_2 = session.shape(2).unwrap().cells();
    let overlap = cells_1.iter().any(|c| cells_2.contains(c));
    assert!(overlap, "spawned shapes should overlap in the air");

    // Overlap is not an error: both players still hold live shapes after a
    // step, and nothing locked.
    session.step();
    assert!(session.shape(1).is_some());
    assert!(session.shape(2).is_some());
    let occupied = (0..20)
        .flat_map(|row| (0..10).map(move |col| (row, col)))
        .filter(|&(row, col)| session.board().occupant(row, col).is_some())
        .count();
    assert_eq!(occupied, 0);
}

#[test]
fn test_same_tick_grounding_first_locks_second_respawns() {
    let mut session = GameSession::new(10, 20, 11);
    session.add_player(1);
    session.add_player(2);

    // Lockstep descent: both ground on the same tick at the same origin.
    let shape_1 = *session.shape(1).unwrap();
    let max_extent = bottom_extent(&shape_1).max(bottom_extent(session.shape(2).unwrap()));
    let tie_row = 19 - max_extent;
    for _ in 0..tie_row {
        session.step();
    }

    // One more step grounds both. Player 1 is processed first, locks, and
    // the overlap invalidates player 2's stale shape, which respawns.
    session.step();

    // Player ids iterate in ascending order, so player 1 is the one that
    // locked; every rotation-0 state covers offset (1, 1).
    assert_eq!(session.board().occupant(19, shape_1.col + 1), Some(1));
    // Both players got fresh shapes at the top: player 1 by its own lock,
    // player 2 by invalidation.
    assert_eq!(session.shape(1).unwrap().row, 0);
    assert_eq!(session.shape(2).unwrap().row, 0);
    assert!(!session.is_game_over());
}

#[test]
fn test_move_to_free_column_and_reject_out_of_bounds() {
    let mut session = GameSession::new(10, 10, 5);
    session.add_player(1);
    for _ in 0..3 {
        session.step();
    }
    assert_eq!(session.shape(1).unwrap().col, 5);
    assert_eq!(session.shape(1).unwrap().row, 3);

    session.move_shape(1, 7);
    // Widest kinds still fit at col 7 only when their rightmost offset
    // allows it; compute instead of assuming.
    let width_extent = session
        .shape(1)
        .unwrap()
        .offsets()
        .iter()
        .map(|&(dx, _)| dx as i16)
        .max()
        .unwrap();
    if 7 + width_extent < 10 {
        assert_eq!(session.shape(1).unwrap().col, 7);
    } else {
        assert_eq!(session.shape(1).unwrap().col, 5);
    }

    // A column pushing the leftmost cell past the board edge is rejected
    // outright, whatever the kind's leftmost offset is.
    let min_dx = session
        .shape(1)
        .unwrap()
        .offsets()
        .iter()
        .map(|&(dx, _)| dx as i16)
        .min()
        .unwrap();
    let col_before = session.shape(1).unwrap().col;
    session.move_shape(1, -1 - min_dx);
    assert_eq!(session.shape(1).unwrap().col, col_before);
}

#[test]
fn test_move_into_locked_cells_is_rejected() {
    let mut board = Board::new(10, 10);
    for row in 0..10 {
        for col in 0..3 {
            board.set(row, col, Some(9));
        }
    }
    let mut session = GameSession::with_board(board, 5);
    session.add_player(1);

    // Columns 0..3 are a solid wall; moving there must leave col unchanged.
    session.move_shape(1, 0);
    assert_eq!(session.shape(1).unwrap().col, 5);
}

#[test]
fn test_rotate_left_from_zero_wraps_to_last_state() {
    let mut session = GameSession::new(10, 20, 9);
    session.add_player(1);
    // Mid-board, every rotation state fits.
    for _ in 0..5 {
        session.step();
    }

    let kind = session.shape(1).unwrap().kind;
    session.rotate_shape(1, RotateDir::Left);
    let expected = (kind.state_count() - 1) as u8;
    assert_eq!(session.shape(1).unwrap().rotation, expected);

    session.rotate_shape(1, RotateDir::Right);
    assert_eq!(session.shape(1).unwrap().rotation, 0);
}

#[test]
fn test_drop_command_locks_and_respawns() {
    let mut session = GameSession::new(10, 20, 13);
    session.add_player(1);
    let shape = *session.shape(1).unwrap();
    let resting_row = 19 - bottom_extent(&shape);

    session.on_command(1, Command::Drop);

    for (col, row) in shape.cells_at(resting_row, shape.col, shape.rotation as i32) {
        assert_eq!(session.board().occupant(row, col), Some(1));
    }
    assert_eq!(session.shape(1).unwrap().row, 0);
}

#[test]
fn test_drop_invalidates_overlapping_faller() {
    let mut session = GameSession::new(10, 20, 11);
    session.add_player(1);
    session.add_player(2);

    // Descend both near the floor, still falling and overlapping.
    let max_extent = bottom_extent(session.shape(1).unwrap())
        .max(bottom_extent(session.shape(2).unwrap()));
    for _ in 0..(19 - max_extent) {
        session.step();
    }
    let stale_2 = *session.shape(2).unwrap();
    assert!(stale_2.row > 0);

    // Player 1 drops in place and locks; player 2's overlapping shape is
    // replaced with a fresh spawn.
    session.on_command(1, Command::Drop);
    assert!(!session.board().can_place(&stale_2));
    assert_eq!(session.shape(2).unwrap().row, 0);
}

#[test]
fn test_blocked_spawn_triggers_game_over() {
    let mut board = Board::new(10, 20);
    // Wall off the spawn area: rows 0..4, columns 4..9.
    for row in 0..4 {
        for col in 4..9 {
            board.set(row, col, Some(9));
        }
    }
    let mut session = GameSession::with_board(board, 21);
    session.add_player(1);

    assert!(session.is_game_over());
    assert!(session.shape(1).is_none());
    // The board was replaced with a fresh empty one.
    assert_eq!(session.board().occupant(0, 4), None);
    // Players stay registered through a game over, just shapeless.
    assert_eq!(session.player_count(), 1);
    let slot = session.players().next().unwrap();
    assert_eq!(slot.id(), 1);
    assert!(slot.shape().is_none());
}

#[test]
fn test_step_is_a_no_op_after_game_over() {
    let mut board = Board::new(10, 20);
    for col in 4..9 {
        board.set(0, col, Some(9));
        board.set(1, col, Some(9));
    }
    let mut session = GameSession::with_board(board, 21);
    session.add_player(1);
    assert!(session.is_game_over());

    session.add_player(2);
    let before = session.clone();
    session.step();
    assert_eq!(session, before);
}

#[test]
fn test_commands_are_ignored_after_game_over() {
    let mut board = Board::new(10, 20);
    for col in 0..10 {
        board.set(0, col, Some(9));
        board.set(1, col, Some(9));
    }
    // Rows 0 and 1 are full but that is irrelevant: the spawn is blocked.
    let mut session = GameSession::with_board(board, 21);
    session.add_player(1);
    assert!(session.is_game_over());

    session.on_command(1, Command::Move { col: 2 });
    session.on_command(
        1,
        Command::Rotate {
            direction: RotateDir::Right,
        },
    );
    session.on_command(1, Command::Drop);
    assert!(session.shape(1).is_none());
    assert!(session.is_game_over());
}

#[test]
fn test_missing_shape_commands_are_no_ops() {
    let mut session = GameSession::new(10, 20, 1);
    session.add_player(1);
    session.remove_player(1);

    session.on_command(1, Command::Move { col: 2 });
    session.on_command(1, Command::Drop);
    assert!(!session.is_game_over());
    assert_eq!(session.player_count(), 0);
}
