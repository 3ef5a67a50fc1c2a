//! Property-based tests for history bookkeeping and indentation edits.
//!
//! Uses proptest to verify invariants that must hold across all valid inputs.

use codearea::history::{EditRecord, HISTORY_LIMIT, HISTORY_TIME_GAP, History};
use codearea::input::{KeyCode, KeyEvent};
use codearea::text::Selection;
use codearea::transform::{EditContext, IndentConfig, IndentStyle, KeyAction, transform};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

#[derive(Clone, Debug)]
enum Op {
    Record(bool),
    Undo,
    Redo,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<bool>().prop_map(Op::Record),
        1 => Just(Op::Undo),
        1 => Just(Op::Redo),
    ]
}

/// Lines with optional leading spaces or tabs, joined by `\n`.
fn source_lines() -> impl Strategy<Value = String> {
    prop::collection::vec("[ \t]{0,4}[a-z(){}]{1,6}", 1..6).prop_map(|lines| lines.join("\n"))
}

/// Text plus a non-empty selection inside it.
fn text_with_selection() -> impl Strategy<Value = (String, Selection)> {
    source_lines().prop_flat_map(|text| {
        let len = text.chars().count();
        (Just(text), 0..len).prop_flat_map(move |(text, start)| {
            (Just(text), Just(start), start + 1..=len)
                .prop_map(|(text, start, end)| (text, Selection::new(start, end)))
        })
    })
}

fn indent_configs() -> impl Strategy<Value = IndentConfig> {
    (1usize..=8, any::<bool>()).prop_map(|(tab_size, tabs)| IndentConfig {
        tab_size,
        style: if tabs { IndentStyle::Tab } else { IndentStyle::Spaces },
        indent_on_tab: true,
    })
}

fn record(history: &mut History, i: usize, overwrite: bool, now: u64) {
    let value = format!("v{i} ");
    let caret = value.chars().count();
    history.record(EditRecord::new(value, Selection::caret(caret)), overwrite, now);
}

fn apply(action: KeyAction) -> Option<(String, Selection)> {
    match action {
        KeyAction::Apply(edit) => Some((edit.value, edit.selection)),
        _ => None,
    }
}

// ============================================================================
// History Properties
// ============================================================================

proptest! {
    /// More than `HISTORY_LIMIT` records leave exactly the newest ones.
    #[test]
    fn cap_keeps_newest_records(extra in 1usize..200) {
        let mut history = History::new();
        let total = HISTORY_LIMIT + extra;
        for i in 0..total {
            record(&mut history, i, false, i as u64);
        }
        let state = history.state();
        prop_assert_eq!(state.len(), HISTORY_LIMIT);
        prop_assert_eq!(state.offset(), Some(HISTORY_LIMIT - 1));
        let oldest = format!("v{} ", total - HISTORY_LIMIT);
        prop_assert_eq!(&state.stack()[0].value, &oldest);
    }

    /// No sequence of operations breaks the cap or the offset.
    #[test]
    fn offset_always_addresses_stack(
        ops in prop::collection::vec(op(), 0..300),
        limit in 1usize..20,
    ) {
        let mut history = History::with_limits(limit, HISTORY_TIME_GAP);
        for (i, op) in ops.iter().enumerate() {
            match op {
                Op::Record(overwrite) => record(&mut history, i, *overwrite, i as u64 * 10),
                Op::Undo => {
                    history.undo(None);
                }
                Op::Redo => {
                    history.redo();
                }
            }
            let state = history.state();
            prop_assert!(state.len() <= limit);
            prop_assert!(state.validate().is_ok());
        }
    }

    /// A fresh record after undo makes the old redo tail unreachable.
    #[test]
    fn record_after_undo_truncates_redo(count in 2usize..30, undos in 1usize..30) {
        let mut history = History::new();
        for i in 0..count {
            record(&mut history, i, false, i as u64 * 10_000);
        }
        let undos = undos.min(count - 1);
        for _ in 0..undos {
            prop_assert!(history.undo(None).is_some());
        }
        prop_assert!(history.state().can_redo());

        history.record(EditRecord::new("fresh", None), false, 1_000_000);
        prop_assert!(history.redo().is_none());
        prop_assert_eq!(history.state().len(), count - undos + 1);
        prop_assert_eq!(
            history.state().current().map(|r| r.value.as_str()),
            Some("fresh")
        );
    }

    /// Typing one word quickly coalesces into a single record.
    #[test]
    fn word_burst_is_one_record(word in "[a-zA-Z0-9]{1,16}", step in 0u64..HISTORY_TIME_GAP) {
        let mut history = History::new();
        history.record(EditRecord::new("let ", Selection::caret(4)), false, 0);
        let mut value = "let ".to_string();
        let mut now = 0;
        for c in word.chars() {
            value.push(c);
            now += step;
            let caret = value.chars().count();
            history.record(EditRecord::new(value.clone(), Selection::caret(caret)), true, now);
        }
        prop_assert_eq!(history.state().len(), 2);
        prop_assert_eq!(history.state().current().map(|r| r.value.clone()), Some(value));
    }

    /// Keystrokes further apart than the gap never coalesce.
    #[test]
    fn slow_keystrokes_are_separate(word in "[a-z]{2,8}", extra in 0u64..10_000) {
        let step = HISTORY_TIME_GAP + extra;
        let mut history = History::new();
        history.record(EditRecord::new("x ", Selection::caret(2)), false, 0);
        let mut value = "x ".to_string();
        let mut now = 0;
        for c in word.chars() {
            value.push(c);
            now += step;
            let caret = value.chars().count();
            history.record(EditRecord::new(value.clone(), Selection::caret(caret)), true, now);
        }
        prop_assert_eq!(history.state().len(), word.len() + 1);
    }
}

// ============================================================================
// Indentation Properties
// ============================================================================

proptest! {
    /// Tab then Shift+Tab restores text and selection.
    #[test]
    fn indent_then_outdent_round_trips(
        (text, selection) in text_with_selection(),
        indent in indent_configs(),
    ) {
        let ctx = EditContext::new(&text, selection, &indent);
        let (indented, indented_sel) = apply(transform(&KeyEvent::key(KeyCode::Tab), &ctx))
            .ok_or_else(|| TestCaseError::fail("tab did not edit"))?;

        let ctx = EditContext::new(&indented, indented_sel, &indent);
        let (restored, restored_sel) =
            apply(transform(&KeyEvent::with_shift(KeyCode::Tab), &ctx))
                .ok_or_else(|| TestCaseError::fail("shift+tab did not edit"))?;

        prop_assert_eq!(restored, text);
        prop_assert_eq!(restored_sel, selection);
    }

    /// Every resulting selection lies inside the resulting text.
    #[test]
    fn edits_keep_selection_in_bounds(
        (text, selection) in text_with_selection(),
        key in prop::sample::select(vec![
            KeyEvent::key(KeyCode::Tab),
            KeyEvent::with_shift(KeyCode::Tab),
            KeyEvent::key(KeyCode::Enter),
            KeyEvent::key(KeyCode::Backspace),
            KeyEvent::char('('),
            KeyEvent::char('"'),
        ]),
        collapse in any::<bool>(),
    ) {
        let indent = IndentConfig::default();
        let selection = if collapse { Selection::caret(selection.end) } else { selection };
        let ctx = EditContext::new(&text, selection, &indent);
        if let Some((value, sel)) = apply(transform(&key, &ctx)) {
            prop_assert!(sel.is_within(value.chars().count()));
        }
    }

    /// Wrapping adds the pair around the selected text.
    #[test]
    fn wrap_surrounds_selection((text, selection) in text_with_selection()) {
        let indent = IndentConfig::default();
        let ctx = EditContext::new(&text, selection, &indent);
        let (value, sel) = apply(transform(&KeyEvent::char('['), &ctx))
            .ok_or_else(|| TestCaseError::fail("bracket did not wrap"))?;

        let chars: Vec<char> = text.chars().collect();
        let inner: String = chars[selection.start..selection.end].iter().collect();
        let wrapped: String = value.chars().skip(sel.start).take(sel.len()).collect();
        prop_assert_eq!(wrapped, format!("[{inner}]"));
        prop_assert_eq!(value.chars().count(), chars.len() + 2);
    }
}
