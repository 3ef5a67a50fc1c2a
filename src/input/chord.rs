//! Platform-sensitive editor chords (undo, redo, capture toggle).

use crate::input::keyboard::KeyEvent;

/// Host platform, as far as shortcut conventions are concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Platform {
    /// macOS / iOS: Command is the primary modifier.
    Apple,
    /// Everything else: Control is the primary modifier.
    Other,
}

impl Platform {
    /// The platform this crate was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(any(target_os = "macos", target_os = "ios")) {
            Self::Apple
        } else {
            Self::Other
        }
    }

    /// Whether the primary shortcut modifier is held on this platform.
    #[must_use]
    pub fn primary_held(self, event: &KeyEvent) -> bool {
        match self {
            Self::Apple => event.meta(),
            Self::Other => event.ctrl(),
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

/// A recognized editor chord.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Chord {
    /// Step back through edit history.
    Undo,
    /// Step forward through edit history.
    Redo,
    /// Toggle whether Tab is captured for indentation.
    ToggleCapture,
}

/// Detect an undo/redo/capture-toggle chord.
///
/// - Undo: primary+Z, without Shift or Alt.
/// - Redo: Command+Shift+Z on Apple; Ctrl+Y or Ctrl+Shift+Z elsewhere;
///   never with Alt.
/// - Capture toggle: Ctrl+M (Ctrl+Shift+M on Apple, where Ctrl+M is taken
///   by the system).
#[must_use]
pub fn detect_chord(event: &KeyEvent, platform: Platform) -> Option<Chord> {
    let letter = event.letter()?;
    let primary = platform.primary_held(event);

    if primary && letter == 'z' && !event.shift() && !event.alt() {
        return Some(Chord::Undo);
    }

    let redo = match platform {
        Platform::Apple => primary && letter == 'z' && event.shift(),
        Platform::Other => {
            event.ctrl() && (letter == 'y' || (letter == 'z' && event.shift()))
        }
    };
    if redo && !event.alt() {
        return Some(Chord::Redo);
    }

    let toggle = letter == 'm'
        && event.ctrl()
        && match platform {
            Platform::Apple => event.shift(),
            Platform::Other => true,
        };
    toggle.then_some(Chord::ToggleCapture)
}
