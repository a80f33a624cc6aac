//! Session driver, persistence and event log for blockfall hosts
//!
//! - [`session`]: lifecycle, action gating and the gravity accumulator
//! - [`settings`]: player toggles (ghost piece, hard drop, j/k swap)
//! - [`storage`]: best score and settings as JSON files in a data directory
//! - [`event_log`]: append-only JSONL record of what each session did
//! - [`config`]: environment-driven host configuration
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{GameSession, Settings};
//! use blockfall_engine::core::SimpleRng;
//! use blockfall_engine::types::{GameAction, GameStatus};
//!
//! let mut session = GameSession::with_rng(Settings::default(), 0, SimpleRng::new(7));
//! session.start();
//! assert_eq!(session.status(), GameStatus::Running);
//!
//! session.handle_action(GameAction::HardDrop);
//! assert!(session.statistics().score > 0);
//! ```

pub mod config;
pub mod event_log;
pub mod session;
pub mod settings;
pub mod storage;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use config::Config;
pub use event_log::{EventLog, SessionEvent};
pub use session::{GameSession, Statistics};
pub use settings::Settings;
pub use storage::Storage;
