//! Field selection.

use serde::{Deserialize, Serialize};

/// A selection in the field, as char offsets into its value.
///
/// `start <= end`; a collapsed selection (`start == end`) is a caret.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    /// Offset of the first selected char.
    pub start: usize,
    /// Offset one past the last selected char.
    pub end: usize,
}

impl Selection {
    /// Create a selection. Bounds are taken as given; see [`clamp`](Self::clamp).
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a collapsed selection.
    #[must_use]
    pub const fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Whether the selection is a caret.
    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Number of selected chars.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the selection lies within a text of `len` chars and is ordered.
    #[must_use]
    pub const fn is_within(&self, len: usize) -> bool {
        self.start <= self.end && self.end <= len
    }

    /// Clamp both bounds into `0..=len`.
    ///
    /// A start past the end collapses onto the end, the way native text
    /// fields resolve a backwards assignment.
    #[must_use]
    pub fn clamp(self, len: usize) -> Self {
        let end = self.end.min(len);
        let start = self.start.min(end);
        Self { start, end }
    }
}

impl From<(usize, usize)> for Selection {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}
