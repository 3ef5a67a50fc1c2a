//! Diagnostic and state-change callbacks.
//!
//! The crate never prints. Diagnostics (clamped selections, repaired options,
//! ignored misuse) go to the log sink, and notable state changes go to the
//! event sink as [`EditorEvent`]s. Hosts install whichever sinks they use,
//! e.g. a bridge into `tracing`.

use std::fmt;
use std::sync::{Mutex, MutexGuard, OnceLock};

/// Severity of a diagnostic message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        })
    }
}

/// A state change worth telling the host about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorEvent {
    /// Tab capture was switched; `capture` is the new state.
    CaptureToggled { capture: bool },
    /// The history cap dropped `count` of the oldest records.
    HistoryEvicted { count: usize },
}

impl EditorEvent {
    /// Stable short name, for hosts that key events by string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CaptureToggled { .. } => "capture",
            Self::HistoryEvicted { .. } => "history_evicted",
        }
    }
}

type EventSink = Box<dyn Fn(&EditorEvent) + Send + Sync + 'static>;
type LogSink = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

#[derive(Default)]
struct Sinks {
    event: Option<EventSink>,
    log: Option<LogSink>,
}

fn sinks() -> Option<MutexGuard<'static, Sinks>> {
    static SINKS: OnceLock<Mutex<Sinks>> = OnceLock::new();
    SINKS.get_or_init(Mutex::default).lock().ok()
}

/// Install the global event sink, replacing any previous one.
pub fn set_event_callback<F>(callback: F)
where
    F: Fn(&EditorEvent) + Send + Sync + 'static,
{
    if let Some(mut sinks) = sinks() {
        sinks.event = Some(Box::new(callback));
    }
}

/// Remove the global event sink.
pub fn clear_event_callback() {
    if let Some(mut sinks) = sinks() {
        sinks.event = None;
    }
}

/// Install the global log sink, replacing any previous one.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    if let Some(mut sinks) = sinks() {
        sinks.log = Some(Box::new(callback));
    }
}

/// Remove the global log sink.
pub fn clear_log_callback() {
    if let Some(mut sinks) = sinks() {
        sinks.log = None;
    }
}

pub(crate) fn emit_event(event: EditorEvent) {
    if let Some(callback) = sinks().as_ref().and_then(|s| s.event.as_ref()) {
        callback(&event);
    }
}

pub(crate) fn emit_log(level: LogLevel, message: &str) {
    if let Some(callback) = sinks().as_ref().and_then(|s| s.log.as_ref()) {
        callback(level, message);
    }
}
