//! Key mapping from terminal events to control actions.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

use crate::bindings::{build_control_bindings, ControlAction, ControlBinding, Key};

/// Normalized key to action lookup
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    map: HashMap<Key, ControlAction>,
}

impl KeyMap {
    /// Index every key of every binding. A later binding wins on conflicts.
    pub fn new(bindings: &[ControlBinding]) -> Self {
        let mut map = HashMap::new();
        for binding in bindings {
            for &key in &binding.keys {
                map.insert(normalize(key), binding.action);
            }
        }
        Self { map }
    }

    /// Key map for the default scheme, optionally with j/k swapped
    pub fn with_swap(swap_jk: bool) -> Self {
        Self::new(&build_control_bindings(swap_jk))
    }

    pub fn lookup(&self, key: Key) -> Option<ControlAction> {
        self.map.get(&normalize(key)).copied()
    }

    /// Map a terminal key event. Key releases never act; repeats do.
    pub fn handle_key_event(&self, key: KeyEvent) -> Option<ControlAction> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        normalize_key(key).and_then(|k| self.lookup(k))
    }
}

fn normalize(key: Key) -> Key {
    match key {
        Key::Char(c) => Key::Char(c.to_lowercase().next().unwrap_or(c)),
        other => other,
    }
}

/// Translate a crossterm event into a [`Key`]; single characters are lower-cased.
pub fn normalize_key(key: KeyEvent) -> Option<Key> {
    let key = match key.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab | KeyCode::BackTab => Key::Tab,
        KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) => Key::Shift,
        _ => return None,
    };
    Some(normalize(key))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Settings the player can flip from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingToggle {
    GhostPiece,
    HardDrop,
    JkRotation,
}

/// F2 ghost piece, F3 hard drop, F4 j/k swap
pub fn setting_toggle(key: KeyEvent) -> Option<SettingToggle> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::F(2) => Some(SettingToggle::GhostPiece),
        KeyCode::F(3) => Some(SettingToggle::HardDrop),
        KeyCode::F(4) => Some(SettingToggle::JkRotation),
        _ => None,
    }
}
