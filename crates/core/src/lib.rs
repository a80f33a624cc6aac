//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules and state transitions. It has **zero
//! dependencies** on terminals, storage or clocks:
//!
//! - **Passive**: the host drives gravity by calling `tick()` on its own cadence
//! - **Deterministic**: inject a seeded or scripted [`rng::RandomSource`] to replay games
//! - **Testable**: rule outcomes are plain `bool`/`u32` returns, never errors
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 playfield, placement rule, locking and line clearing
//! - [`game_state`]: the game aggregate with move/rotate/drop/hold/tick
//! - [`pieces`]: pre-tabulated rotation states and per-kind kick tables
//! - [`rng`]: 7-bag randomizer over a pluggable random source
//! - [`scoring`]: line clear points, drop bonuses, level and gravity tables
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameState, SimpleRng};
//! use blockfall_core::types::RotationDirection;
//!
//! let mut game = GameState::with_rng(0, SimpleRng::new(12345));
//! assert!(game.active().is_some());
//!
//! game.try_move(1, 0);
//! game.try_rotate(RotationDirection::Clockwise);
//! let distance = game.hard_drop();
//!
//! assert!(distance > 0);
//! assert_eq!(game.score(), distance * 2);
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{get_piece_blocks, GameState, LockEvent, Tetromino};
pub use pieces::{get_kicks, get_shape, try_rotate};
pub use rng::{create_bag, EntropyRng, PieceQueue, RandomSource, ScriptedRng, SimpleRng};
pub use scoring::get_drop_interval_ms;
