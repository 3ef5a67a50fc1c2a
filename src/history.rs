//! Undo/redo history of field snapshots.
//!
//! Unlike an operation log, every [`EditRecord`] is a full snapshot of the
//! field (text plus selection), and navigation simply moves an offset through
//! the stack. Rapid keystrokes that keep extending the same word are
//! coalesced into the current record so that one undo removes the word.
//!
//! # Examples
//!
//! ```
//! use codearea::history::{EditRecord, History};
//! use codearea::text::Selection;
//!
//! let mut history = History::new();
//! history.record(EditRecord::new("", Selection::caret(0)), false, 0);
//! history.record(EditRecord::new("let x", Selection::caret(5)), false, 10_000);
//! history.record(EditRecord::new("let xy", Selection::caret(6)), true, 10_500);
//! assert_eq!(history.state().len(), 2);
//!
//! let previous = history.undo(None).map(|r| r.value.clone());
//! assert_eq!(previous.as_deref(), Some(""));
//! ```

use crate::error::{Error, Result};
use crate::event::{EditorEvent, emit_event};
use crate::text::Selection;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Maximum number of records kept in a history.
pub const HISTORY_LIMIT: usize = 100;

/// Keystrokes closer together than this (in milliseconds) may coalesce.
pub const HISTORY_TIME_GAP: u64 = 3000;

/// Source of wall-clock milliseconds for record timestamps.
pub trait Clock {
    /// Current time in milliseconds.
    fn now_ms(&self) -> u64;
}

/// The system wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

impl<F> Clock for F
where
    F: Fn() -> u64,
{
    fn now_ms(&self) -> u64 {
        self()
    }
}

/// One addressable point in edit history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRecord {
    /// Full field text.
    pub value: String,
    /// Field selection, if the field reported one.
    pub selection: Option<Selection>,
    /// Wall-clock milliseconds at record time.
    pub timestamp: u64,
}

impl EditRecord {
    /// Create an unstamped record; [`History::record`] assigns the timestamp.
    #[must_use]
    pub fn new(value: impl Into<String>, selection: impl Into<Option<Selection>>) -> Self {
        Self {
            value: value.into(),
            selection: selection.into(),
            timestamp: 0,
        }
    }

    /// Offset of the selection start, 0 when unknown.
    #[must_use]
    pub fn caret(&self) -> usize {
        self.selection.map_or(0, |s| s.start)
    }
}

/// The stack of records and the offset of the current one.
///
/// This is the persisted part of a session: hosts extract it before tearing
/// an editor down and hand it to the next instance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    stack: Vec<EditRecord>,
    /// `None` until the first record.
    offset: Option<usize>,
}

impl HistoryState {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a history from parts. Use [`validate`](Self::validate) before
    /// trusting parts that came from outside.
    #[must_use]
    pub fn from_parts(stack: Vec<EditRecord>, offset: Option<usize>) -> Self {
        Self { stack, offset }
    }

    /// All records, oldest first.
    #[must_use]
    pub fn stack(&self) -> &[EditRecord] {
        &self.stack
    }

    /// Index of the current record.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    /// The current record.
    #[must_use]
    pub fn current(&self) -> Option<&EditRecord> {
        self.offset.and_then(|o| self.stack.get(o))
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether no record exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Whether an older record is reachable.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.offset.is_some_and(|o| o > 0 && o < self.stack.len())
    }

    /// Whether a newer record is reachable.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.offset.is_some_and(|o| o + 1 < self.stack.len())
    }

    /// Check that the offset addresses the stack.
    pub fn validate(&self) -> Result<()> {
        let len = self.stack.len();
        match self.offset {
            None if len == 0 => Ok(()),
            Some(offset) if offset < len => Ok(()),
            offset => Err(Error::InvalidSession { offset, len }),
        }
    }
}

/// Result of [`History::record`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A new record was pushed.
    Pushed,
    /// The current record was replaced (same word, within the time gap).
    Merged,
}

/// Snapshot history with a size cap and word coalescing.
#[derive(Clone, Debug)]
pub struct History {
    state: HistoryState,
    limit: usize,
    time_gap_ms: u64,
}

impl Default for History {
    fn default() -> Self {
        Self {
            state: HistoryState::new(),
            limit: HISTORY_LIMIT,
            time_gap_ms: HISTORY_TIME_GAP,
        }
    }
}

impl History {
    /// Create an empty history with the default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history with a custom cap and coalescing gap.
    ///
    /// A cap of zero is raised to one.
    #[must_use]
    pub fn with_limits(limit: usize, time_gap_ms: u64) -> Self {
        Self {
            limit: limit.max(1),
            time_gap_ms,
            ..Self::default()
        }
    }

    /// Maximum number of records kept.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Coalescing gap in milliseconds.
    #[must_use]
    pub fn time_gap_ms(&self) -> u64 {
        self.time_gap_ms
    }

    /// The stack and offset.
    #[must_use]
    pub fn state(&self) -> &HistoryState {
        &self.state
    }

    /// Replace the stack and offset wholesale.
    ///
    /// Invalid states are rejected and the current one is kept. A state
    /// longer than the cap loses its oldest records, as after a push.
    pub fn replace_state(&mut self, state: HistoryState) -> Result<()> {
        state.validate()?;
        self.state = state;
        self.enforce_limit();
        Ok(())
    }

    /// Record a snapshot stamped at `now`.
    ///
    /// Drops the redo tail, enforces the cap, and then either pushes the
    /// snapshot or, when `overwrite` is set, replaces the current record if
    /// the snapshot only extends the word being typed there.
    pub fn record(&mut self, entry: EditRecord, overwrite: bool, now: u64) -> RecordOutcome {
        match self.state.offset {
            Some(offset) => self.state.stack.truncate(offset + 1),
            None => self.state.stack.clear(),
        }
        self.enforce_limit();

        let entry = EditRecord {
            timestamp: now,
            ..entry
        };

        if overwrite && self.extends_current_word(&entry) {
            if let Some(last) = self.state.stack.last_mut() {
                *last = entry;
                return RecordOutcome::Merged;
            }
        }

        self.state.stack.push(entry);
        self.state.offset = Some(self.state.stack.len() - 1);
        self.enforce_limit();
        RecordOutcome::Pushed
    }

    /// Overwrite the current record's selection.
    pub fn patch_selection(&mut self, selection: Selection) {
        if let Some(current) = self.state.offset.and_then(|o| self.state.stack.get_mut(o)) {
            current.selection = Some(selection);
        }
    }

    /// Step back one record.
    ///
    /// `live` is the field's selection right now; it is saved into the record
    /// being left so that redo lands the caret where the user left it.
    pub fn undo(&mut self, live: Option<Selection>) -> Option<&EditRecord> {
        let offset = self.state.offset?;
        let target = offset.checked_sub(1)?;
        if target >= self.state.stack.len() {
            return None;
        }
        if let Some(selection) = live {
            self.patch_selection(selection);
        }
        self.state.offset = Some(target);
        self.state.stack.get(target)
    }

    /// Step forward one record.
    pub fn redo(&mut self) -> Option<&EditRecord> {
        let target = self.state.offset? + 1;
        if target >= self.state.stack.len() {
            return None;
        }
        self.state.offset = Some(target);
        self.state.stack.get(target)
    }

    fn extends_current_word(&self, entry: &EditRecord) -> bool {
        let Some(last) = self.state.current() else {
            return false;
        };
        if entry.timestamp.saturating_sub(last.timestamp) >= self.time_gap_ms {
            return false;
        }
        match (
            trailing_word(&last.value, last.caret()),
            trailing_word(&entry.value, entry.caret()),
        ) {
            (Some(previous), Some(current)) => current.starts_with(previous),
            _ => false,
        }
    }

    fn enforce_limit(&mut self) {
        let len = self.state.stack.len();
        if len <= self.limit {
            return;
        }
        let excess = len - self.limit;
        self.state.stack.drain(..excess);
        self.state.offset = self.state.offset.map(|o| o.saturating_sub(excess));
        emit_event(EditorEvent::HistoryEvicted { count: excess });
    }
}

/// The ASCII alphanumeric run ending at `caret` on its line.
///
/// The run must be preceded by some other char on the same line; a word
/// flush against the line start does not count.
fn trailing_word(value: &str, caret: usize) -> Option<&str> {
    let end = value.char_indices().nth(caret).map_or(value.len(), |(i, _)| i);
    let line = value[..end].rsplit('\n').next().unwrap_or_default();
    let (idx, boundary) = line
        .char_indices()
        .rev()
        .find(|(_, c)| !c.is_ascii_alphanumeric())?;
    let run = &line[idx + boundary.len_utf8()..];
    (!run.is_empty()).then_some(run)
}
