//! Terminal input module (engine-facing).
//!
//! Independent of any UI framework. [`bindings`] describes the control scheme
//! as data (also used to draw the help panel) and [`map`] turns `crossterm`
//! key events into [`ControlAction`]s through a [`KeyMap`] built from it.

pub mod bindings;
pub mod map;

pub use blockfall_types as types;

pub use bindings::{build_control_bindings, ControlAction, ControlBinding, Key};
pub use map::{normalize_key, setting_toggle, should_quit, KeyMap, SettingToggle};
