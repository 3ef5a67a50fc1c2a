//! Keyboard input for the editor.
//!
//! Hosts translate their native key events into [`KeyEvent`]s (see
//! [`KeyCode::from_key_name`] for `KeyboardEvent.key`-style names) and hand
//! them to the session controller. Chord detection is platform-sensitive.

mod chord;
mod keyboard;

pub use chord::{Chord, Platform, detect_chord};
pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
