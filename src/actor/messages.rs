//! Input events delivered by the event reader thread.

use std::fmt::Write;

/// A key, without modifiers.
///
/// A subset of crossterm's key codes, enough for dashboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Character key, as typed.
    Char(char),
    /// `F1` through `F12`.
    F(u8),
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Tab key.
    Tab,
    /// Backtab (Shift+Tab).
    BackTab,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Escape key.
    Esc,
}

impl KeyCode {
    fn name(self) -> String {
        match self {
            Self::Char(' ') => "<Space>".to_string(),
            Self::Char(c) => c.to_string(),
            Self::F(n) => format!("<F{n}>"),
            Self::Backspace => "<Backspace>".to_string(),
            Self::Enter => "<Enter>".to_string(),
            Self::Left => "<Left>".to_string(),
            Self::Right => "<Right>".to_string(),
            Self::Up => "<Up>".to_string(),
            Self::Down => "<Down>".to_string(),
            Self::Home => "<Home>".to_string(),
            Self::End => "<End>".to_string(),
            Self::PageUp => "<PageUp>".to_string(),
            Self::PageDown => "<PageDown>".to_string(),
            Self::Tab => "<Tab>".to_string(),
            Self::BackTab => "<Backtab>".to_string(),
            Self::Delete => "<Delete>".to_string(),
            Self::Insert => "<Insert>".to_string(),
            Self::Esc => "<Escape>".to_string(),
        }
    }
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Shift key held.
    pub shift: bool,
    /// Control key held.
    pub control: bool,
    /// Alt/Option key held.
    pub alt: bool,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    /// Control only.
    pub const CONTROL: Self = Self {
        shift: false,
        control: true,
        alt: false,
    };

    /// At least one modifier held.
    pub const fn any(&self) -> bool {
        self.shift || self.control || self.alt
    }
}

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button.
    Middle,
}

/// Mouse event details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
    /// Button pressed or held; `None` for plain movement.
    pub button: Option<MouseButton>,
    /// Modifiers held at the time.
    pub modifiers: KeyModifiers,
}

/// Something the user or the terminal did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    Key {
        /// The key code.
        code: KeyCode,
        /// Modifiers held.
        modifiers: KeyModifiers,
    },

    /// Mouse button pressed.
    MouseDown(MouseEvent),

    /// Button let go.
    MouseUp(MouseEvent),

    /// Mouse moved, with the dragged button if any.
    MouseMove(MouseEvent),

    /// Mouse scroll.
    MouseScroll {
        /// X coordinate.
        x: u16,
        /// Y coordinate.
        y: u16,
        /// `1` for up, `-1` for down.
        delta: i16,
    },

    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Focus gained.
    FocusGained,

    /// Focus lost.
    FocusLost,

    /// Text delivered by bracketed paste.
    Paste(String),

    /// Reading input failed; the reader keeps going.
    Error(String),

    /// Last event before the reader thread exits.
    Shutdown,
}

impl InputEvent {
    /// Short identifier for matching in event loops.
    ///
    /// Keys map to their character (`"q"`) or a bracketed name
    /// (`"<Enter>"`), prefixed by `C-`, `M-` and `S-` for held modifiers
    /// (`"<C-c>"`). Mouse and terminal events map to `"<MouseLeft>"`,
    /// `"<MouseWheelUp>"`, `"<Resize>"` and similar.
    pub fn id(&self) -> String {
        match self {
            Self::Key { code, modifiers } => key_id(*code, *modifiers),
            Self::MouseDown(mouse) => match mouse.button {
                Some(MouseButton::Left) => "<MouseLeft>".to_string(),
                Some(MouseButton::Right) => "<MouseRight>".to_string(),
                Some(MouseButton::Middle) => "<MouseMiddle>".to_string(),
                None => "<Mouse>".to_string(),
            },
            Self::MouseUp(_) => "<MouseRelease>".to_string(),
            Self::MouseMove(_) => "<MouseMove>".to_string(),
            Self::MouseScroll { delta, .. } if *delta > 0 => "<MouseWheelUp>".to_string(),
            Self::MouseScroll { .. } => "<MouseWheelDown>".to_string(),
            Self::Resize { .. } => "<Resize>".to_string(),
            Self::FocusGained => "<FocusGained>".to_string(),
            Self::FocusLost => "<FocusLost>".to_string(),
            Self::Paste(_) => "<Paste>".to_string(),
            Self::Error(_) => "<Error>".to_string(),
            Self::Shutdown => "<Shutdown>".to_string(),
        }
    }
}

fn key_id(code: KeyCode, modifiers: KeyModifiers) -> String {
    let name = code.name();
    if !modifiers.any() {
        return name;
    }

    let mut prefix = String::new();
    if modifiers.control {
        prefix.push_str("C-");
    }
    if modifiers.alt {
        prefix.push_str("M-");
    }
    // Shifted characters already carry their case.
    if modifiers.shift && !matches!(code, KeyCode::Char(_)) {
        prefix.push_str("S-");
    }
    if prefix.is_empty() {
        return name;
    }

    let bare = name.trim_start_matches('<').trim_end_matches('>');
    let mut id = String::with_capacity(prefix.len() + bare.len() + 2);
    let _ = write!(id, "<{prefix}{bare}>");
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> InputEvent {
        InputEvent::Key { code, modifiers }
    }

    #[test]
    fn test_plain_key_ids() {
        assert_eq!(key(KeyCode::Char('q'), KeyModifiers::NONE).id(), "q");
        assert_eq!(key(KeyCode::Char(' '), KeyModifiers::NONE).id(), "<Space>");
        assert_eq!(key(KeyCode::Esc, KeyModifiers::NONE).id(), "<Escape>");
        assert_eq!(key(KeyCode::F(5), KeyModifiers::NONE).id(), "<F5>");
    }

    #[test]
    fn test_modified_key_ids() {
        assert_eq!(key(KeyCode::Char('c'), KeyModifiers::CONTROL).id(), "<C-c>");

        let shift = KeyModifiers { shift: true, ..KeyModifiers::NONE };
        assert_eq!(key(KeyCode::Char('Q'), shift).id(), "Q");
        assert_eq!(key(KeyCode::Up, shift).id(), "<S-Up>");

        let alt = KeyModifiers { alt: true, ..KeyModifiers::NONE };
        assert_eq!(key(KeyCode::Enter, alt).id(), "<M-Enter>");
    }

    #[test]
    fn test_mouse_and_terminal_ids() {
        let mouse = MouseEvent {
            x: 1,
            y: 2,
            button: Some(MouseButton::Left),
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(InputEvent::MouseDown(mouse).id(), "<MouseLeft>");
        assert_eq!(InputEvent::MouseUp(mouse).id(), "<MouseRelease>");
        assert_eq!(InputEvent::MouseScroll { x: 0, y: 0, delta: 1 }.id(), "<MouseWheelUp>");
        assert_eq!(InputEvent::MouseScroll { x: 0, y: 0, delta: -1 }.id(), "<MouseWheelDown>");
        assert_eq!(InputEvent::Resize { width: 80, height: 24 }.id(), "<Resize>");
    }
}
