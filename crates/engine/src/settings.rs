//! Player settings
//!
//! Persisted as a JSON object. Every field has a default, so partial or older
//! files still load: missing keys fall back to [`Settings::default`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Draw the landing preview under the active piece
    pub ghost_piece_enabled: bool,
    /// Allow the hard drop action at all
    pub hard_drop_enabled: bool,
    /// Swap the j/k letter keys between counter-clockwise and clockwise
    pub jk_rotation_reversed: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ghost_piece_enabled: true,
            hard_drop_enabled: true,
            jk_rotation_reversed: false,
        }
    }
}

impl Settings {
    pub fn toggle_ghost_piece(&mut self) {
        self.ghost_piece_enabled = !self.ghost_piece_enabled;
    }

    pub fn toggle_hard_drop(&mut self) {
        self.hard_drop_enabled = !self.hard_drop_enabled;
    }

    pub fn toggle_jk_rotation(&mut self) {
        self.jk_rotation_reversed = !self.jk_rotation_reversed;
    }
}
