//! Core types module - shared data structures and rule constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic, so they can be shared by the
//! engine, the session driver, input mapping and rendering alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19), plus 1 buffer row drawn above row 0
//! - **Spawn anchor**: (3, -2), i.e. pieces enter partly above the board
//!
//! # Gravity by Level
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 793ms |
//! | 3 | 618ms |
//! | 4 | 473ms |
//! | 5 | 355ms |
//! | 6 | 262ms |
//! | 7 | 190ms |
//! | 8 | 135ms |
//! | 9 | 94ms |
//! | 10 | 64ms |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, Rotation, RotationDirection};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! let rotated = Rotation::North.rotate(RotationDirection::Clockwise);
//! assert_eq!(rotated, Rotation::East);
//! assert_eq!(Rotation::North.rotate(RotationDirection::Half), Rotation::South);
//!
//! assert_eq!(GameAction::from_str("rotate-180"), Some(GameAction::Rotate180));
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Hidden buffer rows drawn above the board
pub const BUFFER_ROWS: u8 = 1;

/// Rows a host displays: board rows plus the buffer
pub const VISIBLE_ROWS: u8 = BOARD_HEIGHT + BUFFER_ROWS;

/// Spawn anchor column
pub const SPAWN_POSITION_X: i8 = 3;

/// Spawn anchor row (negative: above the visible board)
pub const SPAWN_POSITION_Y: i8 = -2;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity interval per level in milliseconds (index 0 = level 1)
pub const LEVEL_SPEEDS_MS: [u32; 10] = [1000, 793, 618, 473, 355, 262, 190, 135, 94, 64];

/// Highest reachable level
pub const MAX_LEVEL: u32 = LEVEL_SPEEDS_MS.len() as u32;

/// Base points for clearing N lines at once (index = lines), multiplied by level.
pub const LINE_CLEAR_POINTS: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per cell for a soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per cell for a hard drop
pub const HARD_DROP_POINTS: u32 = 2;

/// The queue is refilled with whole bags whenever it is shorter than this
pub const QUEUE_MIN_LENGTH: usize = 5;

/// Number of queue entries shown as the "next" preview
pub const PREVIEW_LENGTH: usize = 5;

/// Pieces per bag
pub const BAG_SIZE: usize = 7;

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind in canonical bag order.
    pub const ALL: [PieceKind; BAG_SIZE] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Upper-case letter used by the preview panel and logs
    pub fn letter(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// Rotation states, indexed 0-3 (North = spawn orientation = 0)
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotation index in 0..4
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build from any integer index, wrapping modulo 4.
    pub fn from_index(index: i32) -> Self {
        match index.rem_euclid(4) {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Apply a rotation direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::{Rotation, RotationDirection};
    ///
    /// assert_eq!(Rotation::North.rotate(RotationDirection::CounterClockwise), Rotation::West);
    /// assert_eq!(Rotation::West.rotate(RotationDirection::Clockwise), Rotation::North);
    /// assert_eq!(Rotation::East.rotate(RotationDirection::Half), Rotation::West);
    /// ```
    pub fn rotate(&self, direction: RotationDirection) -> Self {
        Self::from_index(self.index() as i32 + direction.delta())
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Which way to turn the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
    /// 180° turn
    Half,
}

impl RotationDirection {
    /// Rotation-index delta (mod 4)
    pub fn delta(&self) -> i32 {
        match self {
            RotationDirection::Clockwise => 1,
            RotationDirection::CounterClockwise => -1,
            RotationDirection::Half => 2,
        }
    }
}

/// Game actions a host can dispatch to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (with soft drop scoring)
    SoftDrop,
    /// Drop to the lowest valid position and lock
    HardDrop,
    /// Rotate 90° clockwise
    RotateCw,
    /// Rotate 90° counter-clockwise
    RotateCcw,
    /// Rotate 180°
    Rotate180,
    /// Stash or swap the active piece
    Hold,
    Pause,
    Resume,
}

impl GameAction {
    /// Parse action from its kebab-case name
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("move-left"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("Hard-Drop"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("warp"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "move-left" => Some(GameAction::MoveLeft),
            "move-right" => Some(GameAction::MoveRight),
            "soft-drop" => Some(GameAction::SoftDrop),
            "hard-drop" => Some(GameAction::HardDrop),
            "rotate-cw" => Some(GameAction::RotateCw),
            "rotate-ccw" => Some(GameAction::RotateCcw),
            "rotate-180" => Some(GameAction::Rotate180),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "resume" => Some(GameAction::Resume),
            _ => None,
        }
    }

    /// Kebab-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "move-left",
            GameAction::MoveRight => "move-right",
            GameAction::SoftDrop => "soft-drop",
            GameAction::HardDrop => "hard-drop",
            GameAction::RotateCw => "rotate-cw",
            GameAction::RotateCcw => "rotate-ccw",
            GameAction::Rotate180 => "rotate-180",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Resume => "resume",
        }
    }
}

/// Lifecycle of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Created but not started by the host
    #[default]
    Idle,
    Running,
    Paused,
    /// Terminal until an explicit reset
    Over,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Idle => "idle",
            GameStatus::Running => "running",
            GameStatus::Paused => "paused",
            GameStatus::Over => "over",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked block of that kind
pub type Cell = Option<PieceKind>;

/// Integer board coordinate `(x, y)`; y grows downward, negative y is above the board.
pub type Point = (i8, i8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_constants_parity() {
        assert_eq!(BOARD_WIDTH, 10);
        assert_eq!(BOARD_HEIGHT, 20);
        assert_eq!(VISIBLE_ROWS, 21);
        assert_eq!((SPAWN_POSITION_X, SPAWN_POSITION_Y), (3, -2));
        assert_eq!(QUEUE_MIN_LENGTH, 5);
        assert_eq!(SOFT_DROP_POINTS, 1);
        assert_eq!(HARD_DROP_POINTS, 2);
        assert_eq!(LINE_CLEAR_POINTS[1..], [100, 300, 500, 800]);
        assert_eq!(MAX_LEVEL, 10);
        assert_eq!(LINES_PER_LEVEL, 10);
    }

    #[test]
    fn rotation_index_wraps() {
        assert_eq!(Rotation::from_index(-1), Rotation::West);
        assert_eq!(Rotation::from_index(4), Rotation::North);
        assert_eq!(Rotation::from_index(6), Rotation::South);
        for r in [Rotation::North, Rotation::East, Rotation::South, Rotation::West] {
            assert_eq!(Rotation::from_index(r.index() as i32), r);
        }
    }

    #[test]
    fn half_turn_twice_is_identity() {
        let r = Rotation::East;
        assert_eq!(
            r.rotate(RotationDirection::Half).rotate(RotationDirection::Half),
            r
        );
    }

    #[test]
    fn action_names_parse_back() {
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::SoftDrop,
            GameAction::HardDrop,
            GameAction::RotateCw,
            GameAction::RotateCcw,
            GameAction::Rotate180,
            GameAction::Hold,
            GameAction::Pause,
            GameAction::Resume,
        ] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }
}
