//! Keyboard event types.

use bitflags::bitflags;

bitflags! {
    /// Keyboard modifier flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        /// Shift key.
        const SHIFT = 0b0000_0001;
        /// Alt/Option key.
        const ALT = 0b0000_0010;
        /// Control key.
        const CTRL = 0b0000_0100;
        /// Meta key (Command on Apple keyboards, Windows key elsewhere).
        const META = 0b0000_1000;
    }
}

/// A key the editor reacts to.
///
/// Keys outside this set never reach the controller; hosts let the native
/// field handle them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Down arrow key.
    Down,
    /// Tab key. Shift+Tab is `Tab` with [`KeyModifiers::SHIFT`].
    Tab,
    /// A character key (includes space). Carries the produced character,
    /// so Shift+9 on a US layout arrives as `Char('(')`.
    Char(char),
    /// Escape key.
    Esc,
}

impl KeyCode {
    /// Map a host key name (`KeyboardEvent.key` style) to a key code.
    ///
    /// Returns `None` for names the editor has no use for (e.g. `"Shift"`,
    /// `"ArrowLeft"`, `"F5"`); hosts treat those as pass-through.
    #[must_use]
    pub fn from_key_name(name: &str) -> Option<Self> {
        let code = match name {
            "Backspace" => Self::Backspace,
            "Enter" => Self::Enter,
            "ArrowDown" | "Down" => Self::Down,
            "Tab" => Self::Tab,
            "Escape" | "Esc" => Self::Esc,
            "Spacebar" => Self::Char(' '),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }
}

/// A keyboard event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code.
    pub code: KeyCode,
    /// Modifier keys held.
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    /// Create a new key event.
    #[must_use]
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a key event with no modifiers.
    #[must_use]
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// Create a character key event.
    #[must_use]
    pub fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }

    /// Create a Shift+key event.
    #[must_use]
    pub fn with_shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }

    /// Build an event from a host key name and modifiers.
    #[must_use]
    pub fn from_key_name(name: &str, modifiers: KeyModifiers) -> Option<Self> {
        KeyCode::from_key_name(name).map(|code| Self::new(code, modifiers))
    }

    /// Check if Shift is held.
    #[must_use]
    pub fn shift(&self) -> bool {
        self.modifiers.contains(KeyModifiers::SHIFT)
    }

    /// Check if Ctrl is held.
    #[must_use]
    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(KeyModifiers::CTRL)
    }

    /// Check if Alt is held.
    #[must_use]
    pub fn alt(&self) -> bool {
        self.modifiers.contains(KeyModifiers::ALT)
    }

    /// Check if Meta is held.
    #[must_use]
    pub fn meta(&self) -> bool {
        self.modifiers.contains(KeyModifiers::META)
    }

    /// The pressed letter, lowercased, if this is an ASCII letter key.
    #[must_use]
    pub fn letter(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if c.is_ascii_alphabetic() => Some(c.to_ascii_lowercase()),
            _ => None,
        }
    }

    /// Check if this is Escape.
    #[must_use]
    pub fn is_esc(&self) -> bool {
        self.code == KeyCode::Esc
    }
}
