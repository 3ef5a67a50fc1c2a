//! Line-addressable editing text backed by ropey.
//!
//! The crate builds ropey without `unicode_lines`/`cr_lines`, so the only
//! line break is `\n`: line `n` here is segment `n` of `value.split('\n')`.

use ropey::Rope;
use std::ops::Range;

/// Editing text with char-indexed line lookups.
#[derive(Clone, Debug, Default)]
pub struct EditRope {
    rope: Rope,
}

impl EditRope {
    /// Create from a string.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }

    /// Number of chars.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Index of the line containing `char_idx` (clamped to the text).
    #[must_use]
    pub fn line_of(&self, char_idx: usize) -> usize {
        self.rope.char_to_line(char_idx.min(self.len_chars()))
    }

    /// Char offset where `line` starts.
    #[must_use]
    pub fn line_start(&self, line: usize) -> usize {
        self.rope.line_to_char(line.min(self.rope.len_lines()))
    }

    /// Text of the line containing `char_idx`, from its start up to `char_idx`.
    #[must_use]
    pub fn line_prefix(&self, char_idx: usize) -> String {
        let end = char_idx.min(self.len_chars());
        let start = self.line_start(self.line_of(end));
        self.rope.slice(start..end).to_string()
    }

    /// Whether `line` begins with `pattern`.
    #[must_use]
    pub fn line_starts_with(&self, line: usize, pattern: &str) -> bool {
        if line >= self.rope.len_lines() {
            return false;
        }
        let mut chars = self.rope.line(line).chars();
        !pattern.is_empty() && pattern.chars().all(|p| chars.next() == Some(p))
    }

    /// Number of leading whitespace chars on `line`.
    #[must_use]
    pub fn line_indent(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }
        self.rope
            .line(line)
            .chars()
            .take_while(|&c| c != '\n' && c.is_whitespace())
            .count()
    }

    /// Whether the text before `char_idx` ends with `pattern`.
    #[must_use]
    pub fn ends_with_before(&self, char_idx: usize, pattern: &str) -> bool {
        let n = pattern.chars().count();
        let end = char_idx.min(self.len_chars());
        if n == 0 || n > end {
            return false;
        }
        self.rope.slice(end - n..end).chars().eq(pattern.chars())
    }

    /// Insert text at a char offset.
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        let idx = char_idx.min(self.len_chars());
        self.rope.insert(idx, text);
    }

    /// Remove a char range.
    pub fn remove(&mut self, range: Range<usize>) {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start < end {
            self.rope.remove(start..end);
        }
    }
}

impl std::fmt::Display for EditRope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}
