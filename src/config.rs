//! Editor configuration.

use crate::event::{LogLevel, emit_log};
use crate::history::{HISTORY_LIMIT, HISTORY_TIME_GAP};
use crate::input::Platform;
use crate::transform::{DEFAULT_TAB_SIZE, IndentConfig, IndentStyle};

/// Accessible description of the shell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Description {
    /// Use the built-in description.
    #[default]
    Default,
    /// Use this text.
    Custom(String),
    /// Render no description; the host provides its own.
    Suppressed,
}

impl Description {
    /// The text to render, or `None` when suppressed.
    #[must_use]
    pub fn resolve<'a>(&'a self, default: &'a str) -> Option<&'a str> {
        match self {
            Self::Default => Some(default),
            Self::Custom(text) if text.is_empty() => Some(default),
            Self::Custom(text) => Some(text),
            Self::Suppressed => None,
        }
    }
}

impl From<Option<&str>> for Description {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Suppressed, |text| Self::Custom(text.to_string()))
    }
}

/// How host misuse is reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagnosticMode {
    /// Misuse surfaces as an error.
    Development,
    /// Misuse is logged and ignored.
    Production,
}

impl Default for DiagnosticMode {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }
}

/// Editor configuration options.
///
/// Passing [`value`](Self::value) puts the editor in controlled mode for its
/// whole lifetime; otherwise [`default_value`](Self::default_value) seeds an
/// internally owned value.
#[derive(Clone, Debug)]
pub struct CodeAreaOptions {
    /// Initial text of an uncontrolled editor.
    pub default_value: Option<String>,
    /// Externally owned text; `Some` makes the editor controlled.
    pub value: Option<String>,
    /// Indentation settings.
    pub indent: IndentConfig,
    /// Shell description.
    pub description: Description,
    /// Element id used to derive description ids.
    pub id: Option<String>,
    /// Shortcut conventions.
    pub platform: Platform,
    /// Maximum number of history records.
    pub history_limit: usize,
    /// Coalescing gap between keystrokes, in milliseconds.
    pub history_time_gap_ms: u64,
    /// Misuse reporting.
    pub diagnostics: DiagnosticMode,
}

impl Default for CodeAreaOptions {
    fn default() -> Self {
        Self {
            default_value: None,
            value: None,
            indent: IndentConfig::default(),
            description: Description::Default,
            id: None,
            platform: Platform::current(),
            history_limit: HISTORY_LIMIT,
            history_time_gap_ms: HISTORY_TIME_GAP,
            diagnostics: DiagnosticMode::default(),
        }
    }
}

impl CodeAreaOptions {
    /// Create default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an uncontrolled editor.
    #[must_use]
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Make the editor controlled, starting at `value`.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the spaces per indentation level.
    #[must_use]
    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.indent.tab_size = tab_size;
        self
    }

    /// Set the indentation style.
    #[must_use]
    pub fn with_indent_style(mut self, style: IndentStyle) -> Self {
        self.indent.style = style;
        self
    }

    /// Enable or disable Tab indentation.
    #[must_use]
    pub fn with_indent_on_tab(mut self, enabled: bool) -> Self {
        self.indent.indent_on_tab = enabled;
        self
    }

    /// Set the shell description.
    #[must_use]
    pub fn with_description(mut self, description: Description) -> Self {
        self.description = description;
        self
    }

    /// Set the element id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the shortcut platform.
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Set the history cap.
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Set the coalescing gap.
    #[must_use]
    pub fn with_history_time_gap(mut self, gap_ms: u64) -> Self {
        self.history_time_gap_ms = gap_ms;
        self
    }

    /// Set the diagnostic mode.
    #[must_use]
    pub fn with_diagnostics(mut self, mode: DiagnosticMode) -> Self {
        self.diagnostics = mode;
        self
    }

    /// Whether the editor is controlled.
    #[must_use]
    pub fn is_controlled(&self) -> bool {
        self.value.is_some()
    }

    /// Repair values the editor cannot work with.
    ///
    /// A zero tab size with space indentation and a zero history limit fall
    /// back to the defaults, each with a warning.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.indent.style == IndentStyle::Spaces && self.indent.tab_size == 0 {
            emit_log(
                LogLevel::Warn,
                &format!("tab size 0 is not usable, using {DEFAULT_TAB_SIZE}"),
            );
            self.indent.tab_size = DEFAULT_TAB_SIZE;
        }
        if self.history_limit == 0 {
            emit_log(
                LogLevel::Warn,
                &format!("history limit 0 is not usable, using {HISTORY_LIMIT}"),
            );
            self.history_limit = HISTORY_LIMIT;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CodeAreaOptions::default();
        assert_eq!(options.indent.tab_size, 2);
        assert_eq!(options.indent.style, IndentStyle::Spaces);
        assert!(options.indent.indent_on_tab);
        assert_eq!(options.history_limit, 100);
        assert_eq!(options.history_time_gap_ms, 3000);
        assert!(!options.is_controlled());
    }

    #[test]
    fn test_builders() {
        let options = CodeAreaOptions::new()
            .with_value("x")
            .with_tab_size(4)
            .with_indent_style(IndentStyle::Tab)
            .with_indent_on_tab(false)
            .with_id("editor");
        assert!(options.is_controlled());
        assert_eq!(options.indent.unit(), "\t");
        assert!(!options.indent.indent_on_tab);
        assert_eq!(options.id.as_deref(), Some("editor"));
    }

    #[test]
    fn test_normalized_repairs_zeroes() {
        let options = CodeAreaOptions::new()
            .with_tab_size(0)
            .with_history_limit(0)
            .normalized();
        assert_eq!(options.indent.tab_size, 2);
        assert_eq!(options.history_limit, 100);
    }

    #[test]
    fn test_zero_tab_size_is_fine_for_tabs() {
        let options = CodeAreaOptions::new()
            .with_indent_style(IndentStyle::Tab)
            .with_tab_size(0)
            .normalized();
        assert_eq!(options.indent.tab_size, 0);
        assert_eq!(options.indent.unit(), "\t");
    }

    #[test]
    fn test_description_resolution() {
        assert_eq!(Description::Default.resolve("d"), Some("d"));
        assert_eq!(Description::Custom("c".into()).resolve("d"), Some("c"));
        assert_eq!(Description::Custom(String::new()).resolve("d"), Some("d"));
        assert_eq!(Description::Suppressed.resolve("d"), None);
        assert_eq!(Description::from(None), Description::Suppressed);
        assert_eq!(Description::from(Some("x")), Description::Custom("x".into()));
    }
}
