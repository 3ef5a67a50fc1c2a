//! Wrapping a selection in brackets or quotes.

use super::Edit;
use crate::text::{EditRope, Selection};

/// The closing half for an opening bracket or quote.
pub(super) fn closing(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '{' => Some('}'),
        '[' => Some(']'),
        '\'' | '"' | '`' => Some(open),
        _ => None,
    }
}

/// Surround the selection with `open`/`close`.
///
/// The start stays put so the opener becomes part of the selection; the end
/// moves past the closer.
pub(super) fn wrap(value: &str, selection: Selection, open: char, close: char) -> Edit {
    let mut rope = EditRope::from_str(value);
    rope.insert(selection.end, close.encode_utf8(&mut [0; 4]));
    rope.insert(selection.start, open.encode_utf8(&mut [0; 4]));
    Edit::new(
        rope.to_string(),
        Selection::new(selection.start, selection.end + 2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closing_pairs() {
        assert_eq!(closing('('), Some(')'));
        assert_eq!(closing('{'), Some('}'));
        assert_eq!(closing('['), Some(']'));
        assert_eq!(closing('"'), Some('"'));
        assert_eq!(closing('\''), Some('\''));
        assert_eq!(closing('`'), Some('`'));
        assert_eq!(closing('<'), None);
        assert_eq!(closing(']'), None);
    }

    #[test]
    fn test_wrap_multiline_selection() {
        let edit = wrap("a\nb\nc", Selection::new(0, 3), '{', '}');
        assert_eq!(edit.value, "{a\nb}\nc");
        assert_eq!(edit.selection, Selection::new(0, 5));
    }

    #[test]
    fn test_wrap_whole_text() {
        let edit = wrap("ü", Selection::new(0, 1), '"', '"');
        assert_eq!(edit.value, "\"ü\"");
        assert_eq!(edit.selection, Selection::new(0, 3));
    }
}
