//! Indentation rules: Tab, Shift+Tab, Backspace over a unit, Enter.

use super::Edit;
use crate::text::{EditRope, Selection, char_len};

/// Chars that open a block when they end the trimmed line.
const BLOCK_OPENERS: [char; 3] = ['{', '[', '('];

/// Replace the (collapsed) selection with one unit.
pub(super) fn insert_unit(value: &str, selection: Selection, unit: &str) -> Edit {
    let mut rope = EditRope::from_str(value);
    rope.remove(selection.start..selection.end);
    rope.insert(selection.start, unit);
    let caret = selection.start + char_len(unit);
    Edit::new(rope.to_string(), Selection::caret(caret))
}

/// Prepend one unit to every line the selection touches.
///
/// The selection start only shifts when there is non-blank text before it on
/// its line; otherwise the new indentation becomes part of the selection.
pub(super) fn indent_lines(value: &str, selection: Selection, unit: &str) -> Edit {
    let mut rope = EditRope::from_str(value);
    let first = rope.line_of(selection.start);
    let last = rope.line_of(selection.end);
    let before_start = rope.line_prefix(selection.start);

    for line in (first..=last).rev() {
        let at = rope.line_start(line);
        rope.insert(at, unit);
    }

    let width = char_len(unit);
    let start = if before_start.chars().any(|c| !c.is_whitespace()) {
        selection.start + width
    } else {
        selection.start
    };
    let end = selection.end + width * (last - first + 1);
    Edit::new(rope.to_string(), Selection::new(start, end))
}

/// Strip one leading unit from every touched line that has one.
///
/// Mirrors [`indent_lines`]: the selection start moves back one unit only
/// when there is non-blank text before it. A start inside the indentation
/// stays put unless the indentation shrinks past it.
///
/// Returns `None` when no line changed.
pub(super) fn outdent_lines(value: &str, selection: Selection, unit: &str) -> Option<Edit> {
    let mut rope = EditRope::from_str(value);
    let first = rope.line_of(selection.start);
    let last = rope.line_of(selection.end);
    let before_start = rope.line_prefix(selection.start);
    let first_start = rope.line_start(first);
    let first_indent = rope.line_indent(first);
    let first_outdented = rope.line_starts_with(first, unit);
    let width = char_len(unit);

    let mut removed = 0;
    for line in (first..=last).rev() {
        if rope.line_starts_with(line, unit) {
            let at = rope.line_start(line);
            rope.remove(at..at + width);
            removed += width;
        }
    }
    if removed == 0 {
        return None;
    }

    let after_text = before_start.chars().any(|c| !c.is_whitespace());
    let start = match (first_outdented, after_text) {
        (false, _) => selection.start,
        (true, true) => selection.start - width,
        (true, false) => selection.start.min(first_start + first_indent - width),
    };
    let end = selection.end.saturating_sub(removed);
    Some(Edit::new(rope.to_string(), Selection::new(start.min(end), end)))
}

/// Delete a whole unit sitting right before the caret.
pub(super) fn delete_unit(value: &str, caret: usize, unit: &str) -> Option<Edit> {
    let mut rope = EditRope::from_str(value);
    if !rope.ends_with_before(caret, unit) {
        return None;
    }
    let start = caret - char_len(unit);
    rope.remove(start..caret);
    Some(Edit::new(rope.to_string(), Selection::caret(start)))
}

/// Break the line at the caret, carrying its indentation over.
///
/// The new line inherits the leading whitespace of the current line (up to
/// the caret), plus one unit when the trimmed line ends with a block opener.
/// Returns `None` when the new line would not be indented, so the native
/// newline goes through untouched.
pub(super) fn newline(value: &str, caret: usize, unit: &str) -> Option<Edit> {
    let mut rope = EditRope::from_str(value);
    let line = rope.line_prefix(caret);

    let mut indent: String = line.chars().take_while(|c| c.is_whitespace()).collect();
    if line
        .trim()
        .chars()
        .next_back()
        .is_some_and(|c| BLOCK_OPENERS.contains(&c))
    {
        indent.push_str(unit);
    }
    if indent.is_empty() {
        return None;
    }

    let inserted = format!("\n{indent}");
    rope.insert(caret, &inserted);
    let caret = caret + char_len(&inserted);
    Some(Edit::new(rope.to_string(), Selection::caret(caret)))
}
