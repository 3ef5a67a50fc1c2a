//! `codearea` - code-editing behaviour for plain text fields
//!
//! Turns a native multi-line text field into a small code editor: Tab and
//! Shift+Tab indent and outdent, Enter carries indentation over, brackets wrap
//! selections, and undo/redo runs on an own history that coalesces typing
//! into whole words. Rendering is left to the host; the crate exposes a view
//! model describing what to draw.
//!
//! The [`CodeArea`] controller is driven synchronously by host events:
//!
//! ```
//! use codearea::{CodeArea, CodeAreaOptions, KeyCode, KeyEvent, Selection};
//!
//! let mut editor = CodeArea::new(CodeAreaOptions::new().with_default_value("if ready {"));
//! editor.attach();
//! editor.select(Selection::caret(10));
//! editor.handle_key_down(&KeyEvent::key(KeyCode::Enter));
//! assert_eq!(editor.value(), "if ready {\n  ");
//! ```

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)] // Allow history::HistoryState etc
#![allow(clippy::struct_excessive_bools)] // Context structs carry several flags
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::should_implement_trait)] // from_str naming is intentional
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine

pub mod config;
pub mod error;
pub mod event;
pub mod focus;
pub mod history;
pub mod input;
pub mod refs;
pub mod session;
pub mod text;
pub mod transform;
pub mod view;

// Re-export core types at crate root
pub use config::{CodeAreaOptions, Description, DiagnosticMode};
pub use error::{Error, Result};
pub use event::{
    EditorEvent, LogLevel, clear_event_callback, clear_log_callback, set_event_callback,
    set_log_callback,
};
pub use focus::{FocusNode, FocusState};
pub use history::{Clock, EditRecord, History, HistoryState, SystemClock};
pub use session::{CodeArea, Command, Disposition, KeyResponse, Session, SessionHandle};
pub use text::Selection;

// Re-export input types
pub use input::{Chord, KeyCode, KeyEvent, KeyModifiers, Platform};

// Re-export editing types
pub use transform::{Edit, EditContext, IndentConfig, IndentStyle, KeyAction, transform};
pub use view::{EditorContext, Highlight, Markup, PlainText, ShellView, Slots, Span};
