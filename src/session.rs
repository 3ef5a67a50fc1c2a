//! Session controller: wires key, change and focus events to the edit
//! transformer, history and focus state of one editor instance.
//!
//! The controller owns the live field state (text plus selection) and is
//! driven synchronously by the host. Every handler either mutates state and
//! tells the host what to do with the native event, or leaves both alone.
//!
//! # Examples
//!
//! ```
//! use codearea::config::CodeAreaOptions;
//! use codearea::input::{KeyCode, KeyEvent, KeyModifiers, Platform};
//! use codearea::session::{CodeArea, Command};
//! use codearea::text::Selection;
//!
//! let options = CodeAreaOptions::new()
//!     .with_default_value("if (x) {")
//!     .with_platform(Platform::Other);
//! let mut editor = CodeArea::new(options);
//! editor.attach();
//! editor.select(Selection::caret(8));
//!
//! let response = editor.handle_key_down(&KeyEvent::key(KeyCode::Enter));
//! assert!(response.default_prevented());
//! assert_eq!(editor.value(), "if (x) {\n  ");
//!
//! let undo = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::CTRL);
//! assert_eq!(editor.handle_key_down(&undo).command, Some(Command::Undo));
//! assert_eq!(editor.value(), "if (x) {");
//! ```

use crate::config::{CodeAreaOptions, Description, DiagnosticMode};
use crate::error::Result;
use crate::event::{EditorEvent, LogLevel, emit_event, emit_log};
use crate::focus::{FocusNode, FocusState};
use crate::history::{Clock, EditRecord, History, HistoryState, SystemClock};
use crate::input::{Chord, KeyCode, KeyEvent, Platform, detect_chord};
use crate::text::{Selection, char_len};
use crate::transform::{Edit, EditContext, IndentConfig, KeyAction, transform};
use crate::view::{self, EditorContext, Highlight, PlainText, ShellView, Slots};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
    /// What the host must do with the native event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Disposition: u8 {
        /// Suppress the native default action.
        const PREVENT_DEFAULT = 0b01;
        /// Keep the event from reaching the shell.
        const STOP_PROPAGATION = 0b10;
    }
}

/// The editor command a key event triggered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Edit,
    Undo,
    Redo,
    ToggleCapture,
}

/// Result of handling one key event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyResponse {
    pub disposition: Disposition,
    /// Node the host should move focus to.
    pub focus: Option<FocusNode>,
    /// At most one command fires per event.
    pub command: Option<Command>,
}

impl KeyResponse {
    fn prevented(command: Command) -> Self {
        Self {
            disposition: Disposition::PREVENT_DEFAULT,
            focus: None,
            command: Some(command),
        }
    }

    /// Whether the native default action must be suppressed.
    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.disposition.contains(Disposition::PREVENT_DEFAULT)
    }

    /// Whether the event must not propagate to the shell.
    #[must_use]
    pub fn propagation_stopped(&self) -> bool {
        self.disposition.contains(Disposition::STOP_PROPAGATION)
    }
}

/// The extractable part of an editor, carried across instances.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub history: HistoryState,
}

/// Imperative surface exposed to hosts.
pub trait SessionHandle {
    /// Snapshot the session.
    fn get_session(&self) -> Session;

    /// Replace the live session wholesale.
    ///
    /// A history longer than the editor's cap keeps only its newest records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSession`](crate::Error::InvalidSession) when
    /// the history offset does not address its stack; the live session is
    /// left untouched.
    fn set_session(&mut self, session: Session) -> Result<()>;
}

/// Text and selection of the native field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub selection: Selection,
}

type ValueCallback = Box<dyn FnMut(&str)>;

/// One editor instance.
pub struct CodeArea {
    indent: IndentConfig,
    platform: Platform,
    description: Description,
    id: String,
    diagnostics: DiagnosticMode,
    controlled: bool,
    /// Rendered value: the controlled value, or the internally owned one.
    value: String,
    field: FieldState,
    history: History,
    focus: FocusState,
    attached: bool,
    on_value_change: Option<ValueCallback>,
    highlighter: Box<dyn Highlight>,
    clock: Box<dyn Clock>,
}

impl fmt::Debug for CodeArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeArea")
            .field("id", &self.id)
            .field("controlled", &self.controlled)
            .field("value", &self.value)
            .field("field", &self.field)
            .field("history", &self.history)
            .field("focus", &self.focus)
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}

impl Default for CodeArea {
    fn default() -> Self {
        Self::new(CodeAreaOptions::default())
    }
}

impl CodeArea {
    /// Create an editor. Controlled mode is decided here, once.
    #[must_use]
    pub fn new(options: CodeAreaOptions) -> Self {
        let CodeAreaOptions {
            default_value,
            value,
            indent,
            description,
            id,
            platform,
            history_limit,
            history_time_gap_ms,
            diagnostics,
        } = options.normalized();

        let controlled = value.is_some();
        let value = value.or(default_value).unwrap_or_default();
        Self {
            indent,
            platform,
            description,
            id: id.unwrap_or_else(view::next_id),
            diagnostics,
            controlled,
            field: FieldState {
                value: value.clone(),
                selection: Selection::caret(0),
            },
            value,
            history: History::with_limits(history_limit, history_time_gap_ms),
            focus: FocusState::new(),
            attached: false,
            on_value_change: None,
            highlighter: Box::new(PlainText),
            clock: Box::new(SystemClock),
        }
    }

    /// Use `clock` for history timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Use `highlighter` for the formatted output.
    #[must_use]
    pub fn with_highlighter(mut self, highlighter: impl Highlight + 'static) -> Self {
        self.highlighter = Box::new(highlighter);
        self
    }

    /// Call `callback` with the full text after every committed change.
    #[must_use]
    pub fn with_on_value_change(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_value_change = Some(Box::new(callback));
        self
    }

    /// Replace the change callback.
    pub fn set_on_value_change(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_value_change = Some(Box::new(callback));
    }

    /// The field was placed; seed history with its initial state.
    ///
    /// Only the first call has an effect. Returns whether it did.
    pub fn attach(&mut self) -> bool {
        if self.attached {
            return false;
        }
        self.attached = true;
        let now = self.clock.now_ms();
        self.history.record(
            EditRecord::new(self.field.value.clone(), self.field.selection),
            false,
            now,
        );
        emit_log(LogLevel::Debug, &format!("codearea {} attached", self.id));
        true
    }

    /// Like [`attach`](Self::attach), also seeding whether the shell was
    /// already focused when it was placed.
    pub fn attach_with_focus(&mut self, shell_focused: bool) -> bool {
        if self.attached {
            return false;
        }
        self.focus.set_shell_focused(shell_focused);
        self.attach()
    }

    /// Whether [`attach`](Self::attach) has run.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether the text is owned by the host.
    #[must_use]
    pub fn is_controlled(&self) -> bool {
        self.controlled
    }

    /// The rendered text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The live field state.
    #[must_use]
    pub fn field(&self) -> &FieldState {
        &self.field
    }

    /// The live field selection.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.field.selection
    }

    /// The live history.
    #[must_use]
    pub fn history(&self) -> &HistoryState {
        self.history.state()
    }

    /// Indentation settings.
    #[must_use]
    pub fn indent(&self) -> &IndentConfig {
        &self.indent
    }

    /// Shortcut conventions in use.
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Element id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether Tab is captured for indentation.
    #[must_use]
    pub fn capture(&self) -> bool {
        self.focus.capture()
    }

    /// Whether the shell itself holds focus.
    #[must_use]
    pub fn shell_has_focus(&self) -> bool {
        self.focus.shell_has_focus()
    }

    /// Feed a new controlled value in.
    ///
    /// The field follows when its text differs. Ignored with a warning on an
    /// uncontrolled editor.
    pub fn sync_value(&mut self, value: impl Into<String>) {
        if !self.controlled {
            emit_log(
                LogLevel::Warn,
                "sync_value called on an uncontrolled editor, ignoring",
            );
            return;
        }
        let value = value.into();
        if self.field.value != value {
            self.field.selection = self.field.selection.clamp(char_len(&value));
            self.field.value.clone_from(&value);
        }
        self.value = value;
    }

    /// The native field changed on its own (typing, paste, cut).
    pub fn handle_change(&mut self, value: impl Into<String>, selection: Selection) {
        let value = value.into();
        let selection = self.clamped(selection, &value);
        let now = self.clock.now_ms();
        self.history
            .record(EditRecord::new(value.clone(), selection), true, now);
        self.apply(value, selection);
    }

    /// The caret or selection moved without a text change.
    pub fn select(&mut self, selection: Selection) {
        self.field.selection = self.clamped(selection, &self.field.value);
    }

    /// A key went down inside the field.
    pub fn handle_key_down(&mut self, event: &KeyEvent) -> KeyResponse {
        let action = {
            let ctx = EditContext::new(&self.field.value, self.field.selection, &self.indent)
                .with_capture(self.focus.capture());
            transform(event, &ctx)
        };

        match action {
            KeyAction::Apply(edit) => {
                self.commit(edit);
                return KeyResponse::prevented(Command::Edit);
            }
            KeyAction::Suppress => {
                return KeyResponse {
                    disposition: Disposition::PREVENT_DEFAULT,
                    ..KeyResponse::default()
                };
            }
            KeyAction::StopPropagation => {
                return KeyResponse {
                    disposition: Disposition::STOP_PROPAGATION,
                    ..KeyResponse::default()
                };
            }
            KeyAction::Native => {}
        }

        match detect_chord(event, self.platform) {
            Some(Chord::Undo) => {
                self.undo();
                KeyResponse::prevented(Command::Undo)
            }
            Some(Chord::Redo) => {
                self.redo();
                KeyResponse::prevented(Command::Redo)
            }
            Some(Chord::ToggleCapture) => {
                self.toggle_capture();
                KeyResponse::prevented(Command::ToggleCapture)
            }
            None if event.is_esc() => KeyResponse {
                focus: Some(FocusNode::Shell),
                ..KeyResponse::default()
            },
            None => KeyResponse::default(),
        }
    }

    /// A key went down on the shell itself.
    ///
    /// ArrowDown moves focus into the field whatever modifiers are held.
    pub fn handle_shell_key_down(&self, event: &KeyEvent) -> KeyResponse {
        if event.code == KeyCode::Down {
            return KeyResponse {
                disposition: Disposition::PREVENT_DEFAULT,
                focus: Some(FocusNode::Field),
                command: None,
            };
        }
        KeyResponse::default()
    }

    /// Focus landed on `target` inside the shell.
    pub fn handle_focus(&mut self, target: FocusNode) {
        self.focus.on_focus(target);
    }

    /// Focus left the shell or one of its parts for `related`.
    pub fn handle_blur(&mut self, related: Option<FocusNode>) {
        self.focus.on_blur(related);
    }

    /// Step back through history. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        let live = self.field.selection;
        let Some(record) = self.history.undo(Some(live)).cloned() else {
            emit_log(LogLevel::Debug, "nothing to undo");
            return false;
        };
        emit_log(LogLevel::Debug, "undo");
        self.restore(record);
        true
    }

    /// Step forward through history. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        let Some(record) = self.history.redo().cloned() else {
            emit_log(LogLevel::Debug, "nothing to redo");
            return false;
        };
        emit_log(LogLevel::Debug, "redo");
        self.restore(record);
        true
    }

    /// Flip Tab capture and return the new value.
    pub fn toggle_capture(&mut self) -> bool {
        let capture = self.focus.toggle_capture();
        let state = if capture { "on" } else { "off" };
        emit_log(LogLevel::Debug, &format!("tab capture {state}"));
        emit_event(EditorEvent::CaptureToggled { capture });
        capture
    }

    /// The context the view parts are built from.
    #[must_use]
    pub fn context(&self) -> EditorContext<'_> {
        EditorContext {
            value: &self.value,
            highlight: self.highlighter.as_ref(),
            indent_on_tab: self.indent.indent_on_tab,
            description: &self.description,
            shell_has_focus: self.focus.shell_has_focus(),
            id: &self.id,
        }
    }

    /// Build the view with the given slots.
    #[must_use]
    pub fn view(&self, slots: &Slots) -> ShellView {
        view::render_shell(&self.context(), slots)
    }

    fn commit(&mut self, edit: Edit) {
        self.history.patch_selection(self.field.selection);
        let now = self.clock.now_ms();
        self.history.record(
            EditRecord::new(edit.value.clone(), edit.selection),
            false,
            now,
        );
        self.apply(edit.value, edit.selection);
    }

    fn restore(&mut self, record: EditRecord) {
        let selection = record
            .selection
            .unwrap_or_default()
            .clamp(char_len(&record.value));
        self.apply(record.value, selection);
    }

    fn apply(&mut self, value: String, selection: Selection) {
        if !self.controlled {
            self.value.clone_from(&value);
        }
        self.field = FieldState { value, selection };
        if let Some(callback) = self.on_value_change.as_mut() {
            callback(&self.field.value);
        }
    }

    fn clamped(&self, selection: Selection, value: &str) -> Selection {
        let len = char_len(value);
        if !selection.is_within(len) {
            let level = match self.diagnostics {
                DiagnosticMode::Development => LogLevel::Warn,
                DiagnosticMode::Production => LogLevel::Debug,
            };
            emit_log(
                level,
                &format!(
                    "selection {}..{} out of range for {len} chars, clamping",
                    selection.start, selection.end
                ),
            );
        }
        selection.clamp(len)
    }
}

impl SessionHandle for CodeArea {
    fn get_session(&self) -> Session {
        Session {
            history: self.history.state().clone(),
        }
    }

    fn set_session(&mut self, session: Session) -> Result<()> {
        self.history.replace_state(session.history).inspect_err(|err| {
            emit_log(LogLevel::Warn, &format!("rejected session: {err}"));
        })
    }
}
