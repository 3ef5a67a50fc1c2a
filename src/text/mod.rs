//! Text primitives shared by the transformer and the history store.
//!
//! Offsets everywhere in this crate are char (Unicode scalar) indices, never
//! byte indices. [`EditRope`] provides the `\n`-line lookups the indentation
//! rules need; [`Selection`] is the field's selection.
//!
//! ```
//! use codearea::text::{EditRope, Selection};
//!
//! let rope = EditRope::from_str("if ok {\n    body");
//! assert_eq!(rope.line_of(10), 1);
//! assert_eq!(rope.line_prefix(12), "    ");
//! assert!(Selection::caret(3).is_collapsed());
//! ```

mod rope;
mod selection;

pub use rope::EditRope;
pub use selection::Selection;

/// Number of chars in `s`.
#[must_use]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}
