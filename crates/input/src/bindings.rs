//! Control scheme as data.

use arrayvec::ArrayVec;

use crate::types::GameAction;

/// What a bound key asks the host to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    Game(GameAction),
    /// Begin a new game
    Start,
    /// Pause when running, resume when paused
    TogglePause,
}

impl ControlAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlAction::Game(action) => action.as_str(),
            ControlAction::Start => "start",
            ControlAction::TogglePause => "toggle-pause",
        }
    }
}

/// A normalized key. Letters are always lower case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Left,
    Right,
    Up,
    Down,
    Enter,
    Escape,
    Tab,
    Shift,
}

/// One row of the control scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlBinding {
    pub action: ControlAction,
    pub description: &'static str,
    pub keys: ArrayVec<Key, 3>,
    /// Labels for the help panel, one per key
    pub display: ArrayVec<&'static str, 3>,
}

impl ControlBinding {
    fn new(action: ControlAction, description: &'static str, keys: &[Key], display: &[&'static str]) -> Self {
        Self {
            action,
            description,
            keys: keys.iter().copied().collect(),
            display: display.iter().copied().collect(),
        }
    }
}

/// The full control scheme.
///
/// With `swap_jk` the letter keys j and k trade places between
/// counter-clockwise and clockwise rotation.
pub fn build_control_bindings(swap_jk: bool) -> Vec<ControlBinding> {
    let (ccw_letter, ccw_label, cw_letter, cw_label) = if swap_jk {
        ('k', "K", 'j', "J")
    } else {
        ('j', "J", 'k', "K")
    };

    vec![
        ControlBinding::new(
            ControlAction::Game(GameAction::MoveLeft),
            "Move Left",
            &[Key::Left, Key::Char('a')],
            &["←", "A"],
        ),
        ControlBinding::new(
            ControlAction::Game(GameAction::MoveRight),
            "Move Right",
            &[Key::Right, Key::Char('d')],
            &["→", "D"],
        ),
        ControlBinding::new(
            ControlAction::Game(GameAction::SoftDrop),
            "Soft Drop",
            &[Key::Down, Key::Char('s')],
            &["↓", "S"],
        ),
        ControlBinding::new(
            ControlAction::Game(GameAction::HardDrop),
            "Hard Drop",
            &[Key::Char(' ')],
            &["Space"],
        ),
        ControlBinding::new(
            ControlAction::Game(GameAction::RotateCcw),
            "Rotate Counter-Clockwise",
            &[Key::Char('z'), Key::Char(ccw_letter)],
            &["Z", ccw_label],
        ),
        ControlBinding::new(
            ControlAction::Game(GameAction::RotateCw),
            "Rotate Clockwise",
            &[Key::Up, Key::Char('x'), Key::Char(cw_letter)],
            &["↑", "X", cw_label],
        ),
        ControlBinding::new(
            ControlAction::Game(GameAction::Rotate180),
            "Rotate 180°",
            &[Key::Char('c')],
            &["C"],
        ),
        ControlBinding::new(
            ControlAction::Game(GameAction::Hold),
            "Hold Piece",
            &[Key::Shift, Key::Tab],
            &["Shift", "Tab"],
        ),
        ControlBinding::new(
            ControlAction::TogglePause,
            "Pause / Resume",
            &[Key::Char('p'), Key::Escape],
            &["P", "Esc"],
        ),
        ControlBinding::new(ControlAction::Start, "Start New Game", &[Key::Enter], &["Enter"]),
    ]
}
