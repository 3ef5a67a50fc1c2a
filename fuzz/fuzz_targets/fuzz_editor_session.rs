//! Fuzz target for the editor controller.
//!
//! Drives a `CodeArea` with an arbitrary stream of changes, selections and
//! keys, and checks the field and history stay consistent after each step.

#![no_main]

use arbitrary::Arbitrary;
use codearea::input::{KeyCode, KeyEvent, KeyModifiers, Platform};
use codearea::text::Selection;
use codearea::{CodeArea, CodeAreaOptions};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Step {
    Change { value: String, start: usize, end: usize, elapsed: u16 },
    Select { start: usize, end: usize },
    Key { code: u8, c: char, modifiers: u8 },
}

fuzz_target!(|steps: Vec<Step>| {
    let options = CodeAreaOptions::new()
        .with_platform(Platform::Other)
        .with_history_limit(8);
    let now = std::rc::Rc::new(std::cell::Cell::new(0u64));
    let clock = std::rc::Rc::clone(&now);
    let mut editor = CodeArea::new(options).with_clock(move || clock.get());
    editor.attach();

    for step in steps.into_iter().take(256) {
        match step {
            Step::Change { value, start, end, elapsed } => {
                now.set(now.get() + u64::from(elapsed));
                editor.handle_change(value, Selection::new(start, end));
            }
            Step::Select { start, end } => editor.select(Selection::new(start, end)),
            Step::Key { code, c, modifiers } => {
                let code = match code % 6 {
                    0 => KeyCode::Tab,
                    1 => KeyCode::Enter,
                    2 => KeyCode::Backspace,
                    3 => KeyCode::Esc,
                    4 => KeyCode::Down,
                    _ => KeyCode::Char(c),
                };
                let event = KeyEvent::new(code, KeyModifiers::from_bits_truncate(modifiers));
                editor.handle_key_down(&event);
            }
        }

        let field = editor.field();
        assert!(field.selection.is_within(field.value.chars().count()));
        assert!(editor.history().len() <= 8);
        assert!(editor.history().validate().is_ok());
    }
});
