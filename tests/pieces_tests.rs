//! Pieces module tests: shape tables and the simplified kick system

use blockfall::core::pieces::{get_kicks, get_shape, try_rotate, BASIC_KICKS, I_KICKS, SPAWN_POSITION};
use blockfall::core::{get_piece_blocks, Tetromino};
use blockfall::types::{PieceKind, Rotation, RotationDirection};

const ROTATIONS: [Rotation; 4] = [Rotation::North, Rotation::East, Rotation::South, Rotation::West];

fn in_bounds(x: i8, y: i8) -> bool {
    (0..10).contains(&x) && y < 20
}

// ============== Shape Tests ==============

#[test]
fn test_every_shape_has_four_distinct_cells_in_4x4_box() {
    for kind in PieceKind::ALL {
        for rotation in ROTATIONS {
            let shape = get_shape(kind, rotation);
            for (i, &(x, y)) in shape.iter().enumerate() {
                assert!((0..4).contains(&x) && (0..4).contains(&y), "{kind:?} {rotation:?}");
                assert!(!shape[i + 1..].contains(&(x, y)), "{kind:?} {rotation:?} repeats a cell");
            }
        }
    }
}

#[test]
fn test_i_piece_shapes() {
    assert_eq!(get_shape(PieceKind::I, Rotation::North), [(0, 1), (1, 1), (2, 1), (3, 1)]);
    assert_eq!(get_shape(PieceKind::I, Rotation::East), [(2, 0), (2, 1), (2, 2), (2, 3)]);
}

#[test]
fn test_o_piece_is_rotation_invariant() {
    let north = get_shape(PieceKind::O, Rotation::North);
    for rotation in ROTATIONS {
        assert_eq!(get_shape(PieceKind::O, rotation), north);
    }
}

#[test]
fn test_spawned_piece_blocks() {
    let piece = Tetromino::spawn(PieceKind::T);
    assert_eq!((piece.x, piece.y), SPAWN_POSITION);
    assert_eq!(piece.rotation, Rotation::North);
    assert_eq!(get_piece_blocks(&piece), [(3, -1), (4, -1), (5, -1), (4, 0)]);
}

// ============== Kick Tests ==============

#[test]
fn test_kick_tables() {
    assert_eq!(get_kicks(PieceKind::I), &I_KICKS);
    for kind in [PieceKind::O, PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
        assert_eq!(get_kicks(kind), &BASIC_KICKS);
    }
    assert_eq!(get_kicks(PieceKind::T)[0], (0, 0));
}

#[test]
fn test_rotate_in_open_space_uses_no_kick() {
    let result = try_rotate(PieceKind::T, Rotation::North, 3, 5, RotationDirection::Clockwise, in_bounds);
    assert_eq!(result, Some((Rotation::East, (0, 0))));

    let result = try_rotate(PieceKind::J, Rotation::North, 3, 5, RotationDirection::Half, in_bounds);
    assert_eq!(result, Some((Rotation::South, (0, 0))));
}

#[test]
fn test_t_kicks_off_left_wall() {
    // East T hugging the wall: column -1 holds nothing, column 0 the stem
    let result = try_rotate(PieceKind::T, Rotation::East, -1, 5, RotationDirection::Clockwise, in_bounds);
    assert_eq!(result, Some((Rotation::South, (1, 0))));
}

#[test]
fn test_i_kicks_off_left_wall() {
    let result = try_rotate(PieceKind::I, Rotation::East, -1, 5, RotationDirection::Clockwise, in_bounds);
    assert_eq!(result, Some((Rotation::South, (1, 0))));
}

#[test]
fn test_rotation_fails_when_every_kick_collides() {
    let result = try_rotate(PieceKind::L, Rotation::North, 3, 5, RotationDirection::CounterClockwise, |_, _| false);
    assert_eq!(result, None);
}

#[test]
fn test_rotation_can_kick_upward() {
    // Rows 8 and below are blocked. East at anchor row 6 would reach row 8.
    let blocked_row = 8;
    let is_open = |x: i8, y: i8| in_bounds(x, y) && y < blocked_row;
    let result = try_rotate(PieceKind::T, Rotation::North, 3, 6, RotationDirection::Clockwise, is_open);
    assert_eq!(result, Some((Rotation::East, (0, -1))));
}
