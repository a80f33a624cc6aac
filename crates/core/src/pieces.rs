//! Pieces module - tetromino shapes and the kick tables
//!
//! Every rotation state is pre-tabulated rather than computed, so each kind's
//! placement after a turn is exactly what the table says (including the O
//! piece, which sits in the same cells in all four states).
//!
//! Kicks use one table per kind instead of per-transition tables: the I piece
//! has its own 5-entry table and every other kind shares a 6-entry table.
//! Both start with (0, 0), so the plain rotation is always tried first.

use crate::types::{PieceKind, Point, Rotation, RotationDirection, SPAWN_POSITION_X, SPAWN_POSITION_Y};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Four rotation states of one kind, indexed by [`Rotation::index`]
pub type RotationTable = [PieceShape; 4];

const I_SHAPES: RotationTable = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
    [(0, 2), (1, 2), (2, 2), (3, 2)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
];

const O_SHAPES: RotationTable = [
    [(1, 0), (2, 0), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (2, 1)],
];

const T_SHAPES: RotationTable = [
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (1, 1), (1, 2), (2, 1)],
    [(0, 1), (1, 1), (2, 1), (1, 0)],
    [(1, 0), (1, 1), (1, 2), (0, 1)],
];

const S_SHAPES: RotationTable = [
    [(1, 1), (2, 1), (0, 2), (1, 2)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
    [(1, 1), (2, 1), (0, 2), (1, 2)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
];

const Z_SHAPES: RotationTable = [
    [(0, 1), (1, 1), (1, 2), (2, 2)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (1, 2), (2, 2)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
];

const J_SHAPES: RotationTable = [
    [(0, 1), (0, 2), (1, 2), (2, 2)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_SHAPES: RotationTable = [
    [(2, 1), (0, 2), (1, 2), (2, 2)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (0, 2), (1, 1), (2, 1)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

/// All four rotation states of a kind
pub fn rotation_table(kind: PieceKind) -> &'static RotationTable {
    match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::Z => &Z_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
    }
}

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    rotation_table(kind)[rotation.index()]
}

/// Kicks tried by every kind except I, in priority order
pub const BASIC_KICKS: [MinoOffset; 6] = [(0, 0), (-1, 0), (1, 0), (0, -1), (-1, -1), (1, -1)];

/// Kicks tried by the I piece, in priority order
pub const I_KICKS: [MinoOffset; 5] = [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)];

/// Kick candidates for a kind
pub fn get_kicks(kind: PieceKind) -> &'static [MinoOffset] {
    match kind {
        PieceKind::I => &I_KICKS,
        _ => &BASIC_KICKS,
    }
}

/// Try to rotate a piece with wall kicks
///
/// `is_open` is the placement rule for a single absolute cell. Returns the new
/// rotation and the kick that was applied, or `None` when every kick collides.
pub fn try_rotate(
    kind: PieceKind,
    rotation: Rotation,
    x: i8,
    y: i8,
    direction: RotationDirection,
    is_open: impl Fn(i8, i8) -> bool,
) -> Option<(Rotation, MinoOffset)> {
    let new_rotation = rotation.rotate(direction);
    let new_shape = get_shape(kind, new_rotation);

    for &(dx, dy) in get_kicks(kind) {
        let new_x = x.saturating_add(dx);
        let new_y = y.saturating_add(dy);

        let fits = new_shape
            .iter()
            .all(|&(mx, my)| is_open(new_x.saturating_add(mx), new_y.saturating_add(my)));

        if fits {
            return Some((new_rotation, (dx, dy)));
        }
    }

    None
}

/// Spawn anchor for new pieces (x, y)
pub const SPAWN_POSITION: Point = (SPAWN_POSITION_X, SPAWN_POSITION_Y);
