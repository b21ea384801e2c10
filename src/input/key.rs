//! Logical key events

/// Control byte produced by Ctrl+`letter`
///
/// `ctrl(b'q') == 0x11`. Works for upper and lower case letters.
pub const fn ctrl(letter: u8) -> u8 {
    letter & 0x1f
}

/// A decoded input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable (or high) byte
    Char(u8),
    /// C0 control byte, e.g. Ctrl+Q is `Control(0x11)`
    Control(u8),

    // Cursor keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Editing
    Delete,
    Backspace,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,
    JumpTop,
    JumpBottom,

    // Shift + navigation, extending the selection
    SelectHome,
    SelectEnd,
    SelectArrowUp,
    SelectArrowDown,
    SelectArrowLeft,
    SelectArrowRight,

    // Tabs
    NextTab,
    PrevTab,

    // Mouse
    ScrollUp,
    ScrollDown,
    MouseIgnored,
    /// Mouse report with button code 0
    CloseRequested,

    /// Close the active tab (same as Ctrl+Q)
    Quit,
}

impl Key {
    /// True for Ctrl+`letter`
    pub fn is_ctrl(self, letter: u8) -> bool {
        self == Key::Control(ctrl(letter))
    }

    /// Cursor direction and selection flag for arrow keys
    pub fn arrow(self) -> Option<(Direction, bool)> {
        match self {
            Key::ArrowUp => Some((Direction::Up, false)),
            Key::ArrowDown => Some((Direction::Down, false)),
            Key::ArrowLeft => Some((Direction::Left, false)),
            Key::ArrowRight => Some((Direction::Right, false)),
            Key::SelectArrowUp => Some((Direction::Up, true)),
            Key::SelectArrowDown => Some((Direction::Down, true)),
            Key::SelectArrowLeft => Some((Direction::Left, true)),
            Key::SelectArrowRight => Some((Direction::Right, true)),
            _ => None,
        }
    }
}

/// Direction of a single cursor step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}
