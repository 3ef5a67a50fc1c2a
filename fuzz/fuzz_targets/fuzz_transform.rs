//! Fuzz target for the edit transformer.
//!
//! Feeds arbitrary text, selections and keys through `transform` and checks
//! that every computed edit keeps its selection inside the new text.

#![no_main]

use arbitrary::Arbitrary;
use codearea::input::{KeyCode, KeyEvent, KeyModifiers};
use codearea::text::Selection;
use codearea::transform::{EditContext, IndentConfig, IndentStyle, KeyAction, transform};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct TransformInput {
    text: String,
    start: usize,
    end: usize,
    key: Key,
    modifiers: u8,
    tab_size: u8,
    tabs: bool,
    capture: bool,
}

#[derive(Arbitrary, Debug)]
enum Key {
    Tab,
    Enter,
    Backspace,
    Down,
    Char(char),
}

fuzz_target!(|input: TransformInput| {
    let indent = IndentConfig {
        tab_size: usize::from(input.tab_size % 9),
        style: if input.tabs { IndentStyle::Tab } else { IndentStyle::Spaces },
        indent_on_tab: true,
    };
    let code = match input.key {
        Key::Tab => KeyCode::Tab,
        Key::Enter => KeyCode::Enter,
        Key::Backspace => KeyCode::Backspace,
        Key::Down => KeyCode::Down,
        Key::Char(c) => KeyCode::Char(c),
    };
    let event = KeyEvent::new(code, KeyModifiers::from_bits_truncate(input.modifiers));
    let ctx = EditContext::new(&input.text, Selection::new(input.start, input.end), &indent)
        .with_capture(input.capture);

    if let KeyAction::Apply(edit) = transform(&event, &ctx) {
        assert!(edit.selection.is_within(edit.value.chars().count()));
    }
});
