//! Keystroke-to-edit transformation.
//!
//! [`transform`] is a pure function of a key event and the field's current
//! text and selection. It either lets the native field handle the key or
//! computes the complete replacement text and selection; it never touches
//! history or the field itself.
//!
//! | key                         | condition              | effect                          |
//! |-----------------------------|------------------------|---------------------------------|
//! | ArrowDown                   | always                 | stop propagation to the shell   |
//! | Tab                         | capturing, indent on   | indent / insert unit            |
//! | Shift+Tab                   | capturing, indent on   | outdent touched lines           |
//! | Backspace                   | caret after a unit     | delete the whole unit           |
//! | Enter                       | caret                  | newline + inherited indentation |
//! | `(` `{` `[` `'` `"` `` ` `` | non-empty selection    | wrap selection in the pair      |
//!
//! # Examples
//!
//! ```
//! use codearea::input::{KeyCode, KeyEvent};
//! use codearea::text::Selection;
//! use codearea::transform::{transform, EditContext, IndentConfig, KeyAction};
//!
//! let indent = IndentConfig::default();
//! let ctx = EditContext::new("if (x) {", Selection::caret(8), &indent);
//! match transform(&KeyEvent::key(KeyCode::Enter), &ctx) {
//!     KeyAction::Apply(edit) => {
//!         assert_eq!(edit.value, "if (x) {\n  ");
//!         assert_eq!(edit.selection, Selection::caret(11));
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

mod indent;
mod pairs;

use crate::input::{KeyCode, KeyEvent};
use crate::text::{Selection, char_len};
use serde::{Deserialize, Serialize};

/// Default visual width of one indentation level.
pub const DEFAULT_TAB_SIZE: usize = 2;

/// Indentation character style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndentStyle {
    /// One `\t` per level; its visual width is the host's business.
    Tab,
    /// `tab_size` spaces per level.
    #[default]
    Spaces,
}

/// Indentation settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndentConfig {
    /// Spaces per level when indenting with spaces.
    pub tab_size: usize,
    /// Tabs or spaces.
    pub style: IndentStyle,
    /// Whether Tab/Shift+Tab indent at all.
    pub indent_on_tab: bool,
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            tab_size: DEFAULT_TAB_SIZE,
            style: IndentStyle::Spaces,
            indent_on_tab: true,
        }
    }
}

impl IndentConfig {
    /// The text of one indentation level.
    #[must_use]
    pub fn unit(&self) -> String {
        match self.style {
            IndentStyle::Spaces => " ".repeat(self.tab_size),
            IndentStyle::Tab => "\t".to_string(),
        }
    }
}

/// A computed replacement for the field's text and selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edit {
    /// New field text.
    pub value: String,
    /// New field selection.
    pub selection: Selection,
}

impl Edit {
    fn new(value: String, selection: Selection) -> Self {
        let selection = selection.clamp(char_len(&value));
        Self { value, selection }
    }
}

/// What the host should do with a key event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Not intercepted; the native field handles the key.
    Native,
    /// Native handling proceeds, but the event must not reach the shell.
    StopPropagation,
    /// Native handling is suppressed and nothing changes.
    Suppress,
    /// Native handling is suppressed and this edit replaces the field state.
    Apply(Edit),
}

impl KeyAction {
    /// The edit, if one was computed.
    #[must_use]
    pub fn edit(&self) -> Option<&Edit> {
        match self {
            Self::Apply(edit) => Some(edit),
            _ => None,
        }
    }

    /// Whether native handling must be suppressed.
    #[must_use]
    pub fn prevents_default(&self) -> bool {
        matches!(self, Self::Suppress | Self::Apply(_))
    }
}

/// Field state and settings a key is evaluated against.
#[derive(Clone, Copy, Debug)]
pub struct EditContext<'a> {
    /// Current field text.
    pub value: &'a str,
    /// Current field selection.
    pub selection: Selection,
    /// Indentation settings.
    pub indent: &'a IndentConfig,
    /// Whether Tab is currently captured for indentation.
    pub capture: bool,
}

impl<'a> EditContext<'a> {
    /// Create a context with Tab capture on.
    #[must_use]
    pub fn new(value: &'a str, selection: Selection, indent: &'a IndentConfig) -> Self {
        Self {
            value,
            selection,
            indent,
            capture: true,
        }
    }

    /// Set the capture flag (builder pattern).
    #[must_use]
    pub fn with_capture(mut self, capture: bool) -> Self {
        self.capture = capture;
        self
    }
}

/// Evaluate a key event against the field state.
///
/// Out-of-range selections are clamped first, so every input is accepted.
#[must_use]
pub fn transform(event: &KeyEvent, ctx: &EditContext<'_>) -> KeyAction {
    let selection = ctx.selection.clamp(char_len(ctx.value));
    let unit = ctx.indent.unit();

    match event.code {
        KeyCode::Down => KeyAction::StopPropagation,
        KeyCode::Tab => {
            if !ctx.indent.indent_on_tab || !ctx.capture {
                KeyAction::Native
            } else if event.shift() {
                indent::outdent_lines(ctx.value, selection, &unit)
                    .map_or(KeyAction::Suppress, KeyAction::Apply)
            } else if selection.is_collapsed() {
                KeyAction::Apply(indent::insert_unit(ctx.value, selection, &unit))
            } else {
                KeyAction::Apply(indent::indent_lines(ctx.value, selection, &unit))
            }
        }
        KeyCode::Backspace if selection.is_collapsed() => {
            indent::delete_unit(ctx.value, selection.start, &unit)
                .map_or(KeyAction::Native, KeyAction::Apply)
        }
        KeyCode::Enter if selection.is_collapsed() => {
            indent::newline(ctx.value, selection.start, &unit)
                .map_or(KeyAction::Native, KeyAction::Apply)
        }
        KeyCode::Char(open) if !selection.is_collapsed() => pairs::closing(open)
            .map_or(KeyAction::Native, |close| {
                KeyAction::Apply(pairs::wrap(ctx.value, selection, open, close))
            }),
        _ => KeyAction::Native,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyModifiers;

    fn run(key: KeyEvent, value: &str, selection: (usize, usize)) -> KeyAction {
        let indent = IndentConfig::default();
        let ctx = EditContext::new(value, selection.into(), &indent);
        transform(&key, &ctx)
    }

    fn applied(action: KeyAction) -> (String, (usize, usize)) {
        match action {
            KeyAction::Apply(edit) => (edit.value, (edit.selection.start, edit.selection.end)),
            other => panic!("expected an edit, got {other:?}"),
        }
    }

    #[test]
    fn test_unit() {
        let mut indent = IndentConfig::default();
        assert_eq!(indent.unit(), "  ");
        indent.tab_size = 4;
        assert_eq!(indent.unit(), "    ");
        indent.style = IndentStyle::Tab;
        assert_eq!(indent.unit(), "\t");
    }

    #[test]
    fn test_arrow_down_stops_propagation() {
        let action = run(KeyEvent::key(KeyCode::Down), "a\nb", (0, 0));
        assert_eq!(action, KeyAction::StopPropagation);
        assert!(!action.prevents_default());
    }

    #[test]
    fn test_tab_without_capture_is_native() {
        let indent = IndentConfig::default();
        let ctx = EditContext::new("abc", Selection::caret(1), &indent).with_capture(false);
        assert_eq!(transform(&KeyEvent::key(KeyCode::Tab), &ctx), KeyAction::Native);

        let indent = IndentConfig {
            indent_on_tab: false,
            ..IndentConfig::default()
        };
        let ctx = EditContext::new("abc", Selection::caret(1), &indent);
        assert_eq!(transform(&KeyEvent::key(KeyCode::Tab), &ctx), KeyAction::Native);
    }

    #[test]
    fn test_tab_inserts_unit_at_caret() {
        let action = run(KeyEvent::key(KeyCode::Tab), "ab", (1, 1));
        assert_eq!(applied(action), ("a  b".to_string(), (3, 3)));
    }

    #[test]
    fn test_tab_style_inserts_single_tab() {
        let indent = IndentConfig {
            tab_size: 8,
            style: IndentStyle::Tab,
            indent_on_tab: true,
        };
        let ctx = EditContext::new("x", Selection::caret(0), &indent);
        let action = transform(&KeyEvent::key(KeyCode::Tab), &ctx);
        assert_eq!(applied(action), ("\tx".to_string(), (1, 1)));
    }

    #[test]
    fn test_shift_tab_on_unindented_line_suppresses() {
        let action = run(KeyEvent::with_shift(KeyCode::Tab), "abc", (1, 1));
        assert_eq!(action, KeyAction::Suppress);
        assert!(action.prevents_default());
    }

    #[test]
    fn test_bracket_wrap() {
        let action = run(KeyEvent::char('('), "abc", (1, 2));
        assert_eq!(applied(action), ("a(b)c".to_string(), (1, 4)));
    }

    #[test]
    fn test_quote_wraps_with_itself() {
        let action = run(KeyEvent::char('`'), "say hi", (4, 6));
        assert_eq!(applied(action), ("say `hi`".to_string(), (4, 8)));
    }

    #[test]
    fn test_bracket_with_caret_is_native() {
        assert_eq!(run(KeyEvent::char('('), "abc", (1, 1)), KeyAction::Native);
        assert_eq!(run(KeyEvent::char('x'), "abc", (1, 2)), KeyAction::Native);
        assert_eq!(run(KeyEvent::char(')'), "abc", (1, 2)), KeyAction::Native);
    }

    #[test]
    fn test_enter_with_selection_is_native() {
        assert_eq!(run(KeyEvent::key(KeyCode::Enter), "{ab", (1, 3)), KeyAction::Native);
    }

    #[test]
    fn test_backspace_with_selection_is_native() {
        assert_eq!(run(KeyEvent::key(KeyCode::Backspace), "    ", (0, 4)), KeyAction::Native);
    }

    #[test]
    fn test_other_keys_are_native() {
        assert_eq!(run(KeyEvent::char('a'), "", (0, 0)), KeyAction::Native);
        assert_eq!(run(KeyEvent::key(KeyCode::Esc), "", (0, 0)), KeyAction::Native);
        let undo = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::CTRL);
        assert_eq!(run(undo, "abc", (1, 1)), KeyAction::Native);
    }

    #[test]
    fn test_out_of_range_selection_is_clamped() {
        let action = run(KeyEvent::key(KeyCode::Tab), "ab", (7, 9));
        assert_eq!(applied(action), ("ab  ".to_string(), (4, 4)));
    }
}
