//! Engine scenario tests through the public GameState API

use blockfall::core::scoring::{get_drop_interval_ms, level_for_lines, line_clear_points};
use blockfall::core::{Board, GameState, PieceQueue, ScriptedRng, Tetromino};
use blockfall::types::{GameStatus, PieceKind, Rotation, RotationDirection};

/// Game whose bags are always O T S Z J L I
fn scripted_game() -> GameState<ScriptedRng> {
    GameState::with_rng(0, ScriptedRng::zeros())
}

fn well_board(rows: usize) -> Board {
    let row = "IIIIIIIII.";
    Board::from_rows(&vec![row; rows])
}

#[test]
fn test_fresh_game() {
    let state = scripted_game();
    assert_eq!(state.status(), GameStatus::Idle);
    assert_eq!(state.active().map(|p| p.kind), Some(PieceKind::O));
    assert_eq!(state.queue().peek(), Some(PieceKind::T));
    assert!(state.queue().len() >= 5);
    assert_eq!(state.board().filled_count(), 0);
    assert_eq!((state.score(), state.level(), state.lines()), (0, 1, 0));
    assert!(state.can_hold());
    assert_eq!(state.hold(), None);
}

#[test]
fn test_tetris_scores_800_plus_drop_bonus() {
    let mut state = scripted_game();
    *state.board_mut() = well_board(4);
    state.set_active(Some(Tetromino {
        kind: PieceKind::I,
        rotation: Rotation::East,
        x: 7,
        y: 10,
    }));

    // Rows 10..=13 down to 16..=19
    assert_eq!(state.hard_drop(), 6);
    assert_eq!(state.score(), 800 + 12);
    assert_eq!(state.lines(), 4);
    assert_eq!(state.last_cleared_lines(), 4);
    assert_eq!(state.board().filled_count(), 0);

    let lock = state.take_last_lock().unwrap();
    assert_eq!(lock.kind, Some(PieceKind::I));
    assert_eq!(lock.lines_cleared, 4);
    assert_eq!(lock.points, 800);
    assert!(!lock.block_out);
    assert!(state.take_last_lock().is_none());
}

#[test]
fn test_line_clear_scales_with_level() {
    assert_eq!(line_clear_points(1, 1), 100);
    assert_eq!(line_clear_points(2, 3), 900);
    assert_eq!(line_clear_points(3, 2), 1000);
    assert_eq!(line_clear_points(4, 10), 8000);
    assert_eq!(line_clear_points(0, 5), 0);
    assert_eq!(line_clear_points(5, 1), 0);
}

#[test]
fn test_level_and_gravity_curve() {
    assert_eq!(level_for_lines(0), 1);
    assert_eq!(level_for_lines(9), 1);
    assert_eq!(level_for_lines(10), 2);
    assert_eq!(level_for_lines(95), 10);
    assert_eq!(level_for_lines(500), 10);

    let speeds: Vec<u32> = (1..=10).map(get_drop_interval_ms).collect();
    assert_eq!(speeds, vec![1000, 793, 618, 473, 355, 262, 190, 135, 94, 64]);
    assert_eq!(get_drop_interval_ms(-3), 1000);
    assert_eq!(get_drop_interval_ms(11), 64);
}

#[test]
fn test_reaching_ten_lines_speeds_up_gravity() {
    let mut state = scripted_game();
    for _ in 0..3 {
        *state.board_mut() = well_board(4);
        state.set_active(Some(Tetromino {
            kind: PieceKind::I,
            rotation: Rotation::East,
            x: 7,
            y: 16,
        }));
        state.hard_drop();
    }

    assert_eq!(state.lines(), 12);
    assert_eq!(state.level(), 2);
    assert_eq!(state.drop_interval_ms(), 793);
    // Third tetris already scored at level 1; the level rises after scoring
    assert_eq!(state.score(), 3 * 800);
}

#[test]
fn test_tick_moves_then_locks() {
    let mut state = scripted_game();
    let start_y = state.active().unwrap().y;
    assert!(state.tick());
    assert_eq!(state.active().unwrap().y, start_y + 1);

    // O falls until its bottom row sits on row 19
    while state.active().map(|p| p.kind) == Some(PieceKind::O) {
        assert!(state.tick());
    }
    assert_eq!(state.board().filled_count(), 4);
    assert!(state.board().is_occupied(4, 19));
    assert_eq!(state.active().map(|p| p.kind), Some(PieceKind::T));
    assert_eq!(state.score(), 0);
}

#[test]
fn test_soft_drop_scores_per_row() {
    let mut state = scripted_game();
    assert!(state.soft_drop());
    assert!(state.soft_drop());
    assert_eq!(state.score(), 2);

    state.set_active(Some(Tetromino {
        kind: PieceKind::O,
        rotation: Rotation::North,
        x: 3,
        y: 18,
    }));
    assert!(!state.soft_drop());
    assert_eq!(state.score(), 2);
}

#[test]
fn test_moves_respect_walls() {
    let mut state = scripted_game();
    let mut steps = 0;
    while state.try_move(-1, 0) {
        steps += 1;
    }
    // O occupies columns 4 and 5 at spawn
    assert_eq!(steps, 4);
    assert!(!state.try_move(-1, 0));
    assert!(state.try_move(1, 0));
}

#[test]
fn test_rotate_180_and_back() {
    let mut state = scripted_game();
    state.set_active(Some(Tetromino::spawn(PieceKind::T)));
    state.try_move(0, 5);

    assert!(state.try_rotate(RotationDirection::Half));
    assert_eq!(state.active().unwrap().rotation, Rotation::South);
    assert!(state.try_rotate(RotationDirection::CounterClockwise));
    assert_eq!(state.active().unwrap().rotation, Rotation::East);
}

#[test]
fn test_hold_stash_then_swap() {
    let mut state = scripted_game();

    assert!(state.hold_piece());
    assert_eq!(state.hold(), Some(PieceKind::O));
    assert_eq!(state.active().map(|p| p.kind), Some(PieceKind::T));
    assert!(!state.can_hold());
    assert!(!state.hold_piece());

    state.hard_drop();
    assert!(state.can_hold());
    assert_eq!(state.active().map(|p| p.kind), Some(PieceKind::S));

    assert!(state.hold_piece());
    assert_eq!(state.hold(), Some(PieceKind::S));
    let active = state.active().unwrap();
    assert_eq!(active.kind, PieceKind::O);
    assert_eq!(active.rotation, Rotation::North);
    assert_eq!((active.x, active.y), (3, -2));
    assert!(!state.can_hold());
}

#[test]
fn test_block_out_ends_game() {
    let mut state = scripted_game();
    // Column 4 filled to the top: the O cannot leave the buffer area
    let rows: Vec<&str> = vec!["....I....."; 20];
    *state.board_mut() = Board::from_rows(&rows);

    state.hard_drop();
    assert_eq!(state.status(), GameStatus::Over);
    assert!(state.active().is_none());
    assert!(state.take_last_lock().unwrap().block_out);
    assert!(!state.tick());
}

#[test]
fn test_failed_spawn_ends_game() {
    let mut state = scripted_game();
    state.set_queue(PieceQueue::from_pieces([PieceKind::T; 6]));
    // Row 0 blocks the spawn cell (4, 0) of a T; the locking I lands elsewhere
    let mut rows: Vec<&str> = vec!["....T....."];
    rows.extend(vec![".........."; 19]);
    *state.board_mut() = Board::from_rows(&rows);
    state.set_active(Some(Tetromino {
        kind: PieceKind::I,
        rotation: Rotation::North,
        x: 0,
        y: 18,
    }));

    state.hard_drop();
    assert_eq!(state.status(), GameStatus::Over);
    assert!(state.active().is_none());
    assert!(!state.take_last_lock().unwrap().block_out);
}

#[test]
fn test_best_score_tracks_score() {
    let mut state = GameState::with_rng(10, ScriptedRng::zeros());
    state.hard_drop();
    // O from (3, -2) to the floor: 20 rows
    assert_eq!(state.score(), 40);
    assert_eq!(state.best_score(), 40);

    state.reset(state.best_score());
    assert_eq!(state.score(), 0);
    assert_eq!(state.best_score(), 40);
}

#[test]
fn test_ghost_marks_landing_spot() {
    let state = scripted_game();
    let ghost = state.ghost_piece().unwrap();
    assert_eq!(ghost.kind, PieceKind::O);
    assert_eq!(ghost.y, 18);
    assert_eq!(state.ghost_blocks().len(), 4);
    assert!(state.ghost_blocks().contains(&(4, 19)));
}
