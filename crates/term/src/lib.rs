//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget/layout libraries and renders into a simple framebuffer that is
//! flushed to the terminal with crossterm.
//!
//! - [`matrix`]: board + active piece + ghost as 21 display rows
//! - [`game_view`]: paints the matrix, side panel and overlays (pure, no I/O)
//! - [`fb`]: styled character framebuffer
//! - [`renderer`]: diffing flush to a real terminal

pub mod fb;
pub mod game_view;
pub mod matrix;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, AnchorY, GameView, Viewport};
pub use matrix::{build_matrix, visible_matrix, RenderCell, VisibleMatrix};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
