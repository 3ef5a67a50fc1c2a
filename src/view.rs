//! Host-agnostic view model for the editor parts.
//!
//! The editor renders as a shell (the focusable container) holding up to
//! three optional parts: a focus label, the editable field, and the formatted
//! (highlighted) output drawn underneath the field. Each part is built from
//! an explicit [`EditorContext`]; hosts map the resulting structs onto their
//! own widgets or markup.

use crate::config::Description;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shell description used when none is configured.
pub const DEFAULT_SHELL_DESCRIPTION: &str = "Press the down arrow to edit";
/// Field description when Tab indents.
pub const DEFAULT_FIELD_DESCRIPTION: &str = "Press Escape then Tab to exit the text editor";
/// Field description when Tab moves focus.
pub const NO_TAB_FIELD_DESCRIPTION: &str = "Press Tab to exit the text editor";
/// Accessible label of the shell.
pub const SHELL_LABEL: &str = "Code editor";

/// Generate a process-unique element id.
#[must_use]
pub fn next_id() -> String {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    NEXT.fetch_add(1, Ordering::Relaxed).to_string()
}

/// A run of highlighted text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    /// The text.
    pub text: String,
    /// Style class, if any.
    pub class: Option<String>,
}

impl Span {
    /// Create an unstyled span.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: None,
        }
    }

    /// Create a span with a style class.
    #[must_use]
    pub fn styled(text: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: Some(class.into()),
        }
    }
}

/// Output of a highlighter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Markup {
    /// Trusted markup, rendered as-is.
    Html(String),
    /// Structured runs.
    Spans(Vec<Span>),
}

/// A syntax highlighter: a pure function from text to markup.
pub trait Highlight {
    /// Highlight `text`.
    fn highlight(&self, text: &str) -> Markup;
}

impl<F> Highlight for F
where
    F: Fn(&str) -> Markup,
{
    fn highlight(&self, text: &str) -> Markup {
        self(text)
    }
}

/// Highlighter that renders the text unstyled.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainText;

impl Highlight for PlainText {
    fn highlight(&self, text: &str) -> Markup {
        Markup::Html(escape_html(text))
    }
}

/// Escape text for inclusion in HTML.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Everything the parts need, passed explicitly to each builder.
#[derive(Clone, Copy)]
pub struct EditorContext<'a> {
    /// Text to display.
    pub value: &'a str,
    /// Highlighter for the formatted output.
    pub highlight: &'a dyn Highlight,
    /// Whether Tab indents.
    pub indent_on_tab: bool,
    /// Shell description setting.
    pub description: &'a Description,
    /// Whether the shell itself is focused.
    pub shell_has_focus: bool,
    /// Element id.
    pub id: &'a str,
}

impl std::fmt::Debug for EditorContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorContext")
            .field("value", &self.value)
            .field("indent_on_tab", &self.indent_on_tab)
            .field("description", &self.description)
            .field("shell_has_focus", &self.shell_has_focus)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Focus label slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FocusLabelSlot {
    /// Label text overriding the description.
    pub text: Option<String>,
}

/// Field slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldSlot {
    /// Host-provided description id; replaces the built-in description.
    pub described_by: Option<String>,
}

/// Which parts to render, and their overrides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slots {
    pub focus_label: Option<FocusLabelSlot>,
    pub field: Option<FieldSlot>,
    /// Whether to render the formatted output.
    pub formatted: bool,
}

impl Default for Slots {
    fn default() -> Self {
        Self {
            focus_label: Some(FocusLabelSlot::default()),
            field: Some(FieldSlot::default()),
            formatted: true,
        }
    }
}

impl Slots {
    /// No parts; the host composes them itself.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            focus_label: None,
            field: None,
            formatted: false,
        }
    }
}

/// A visually hidden description and the id that references it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DescriptionView {
    pub id: String,
    pub text: String,
}

/// The "press down arrow" hint shown while the shell is focused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusLabelView {
    pub text: String,
    pub hidden: bool,
}

/// The editable field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldView {
    pub value: String,
    pub description: Option<DescriptionView>,
    /// Id the field's `aria-describedby` points at.
    pub described_by: Option<String>,
}

/// The highlighted output under the field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormattedView {
    pub output: Markup,
}

/// The whole editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShellView {
    pub label: &'static str,
    pub description: Option<DescriptionView>,
    pub described_by: Option<String>,
    pub focus_label: Option<FocusLabelView>,
    pub field: Option<FieldView>,
    pub formatted: Option<FormattedView>,
}

/// Build the shell and the requested parts.
#[must_use]
pub fn render_shell(ctx: &EditorContext<'_>, slots: &Slots) -> ShellView {
    let description = ctx
        .description
        .resolve(DEFAULT_SHELL_DESCRIPTION)
        .map(|text| DescriptionView {
            id: format!("codearea-shell-description-{}", ctx.id),
            text: text.to_string(),
        });
    ShellView {
        label: SHELL_LABEL,
        described_by: description.as_ref().map(|d| d.id.clone()),
        description,
        focus_label: slots
            .focus_label
            .as_ref()
            .map(|slot| render_focus_label(ctx, slot)),
        field: slots.field.as_ref().map(|slot| render_field(ctx, slot)),
        formatted: slots.formatted.then(|| render_formatted(ctx)),
    }
}

/// Build the focus label.
#[must_use]
pub fn render_focus_label(ctx: &EditorContext<'_>, slot: &FocusLabelSlot) -> FocusLabelView {
    let text = slot
        .text
        .clone()
        .or_else(|| match ctx.description {
            Description::Custom(text) if !text.is_empty() => Some(text.clone()),
            _ => None,
        })
        .unwrap_or_else(|| DEFAULT_SHELL_DESCRIPTION.to_string());
    FocusLabelView {
        text,
        hidden: !ctx.shell_has_focus,
    }
}

/// Build the field.
#[must_use]
pub fn render_field(ctx: &EditorContext<'_>, slot: &FieldSlot) -> FieldView {
    if let Some(id) = &slot.described_by {
        return FieldView {
            value: ctx.value.to_string(),
            description: None,
            described_by: Some(id.clone()),
        };
    }
    let description = DescriptionView {
        id: format!("codearea-field-description-{}", ctx.id),
        text: if ctx.indent_on_tab {
            DEFAULT_FIELD_DESCRIPTION
        } else {
            NO_TAB_FIELD_DESCRIPTION
        }
        .to_string(),
    };
    FieldView {
        value: ctx.value.to_string(),
        described_by: Some(description.id.clone()),
        description: Some(description),
    }
}

/// Build the formatted output.
///
/// HTML output gets a trailing line break so that a trailing newline in the
/// field still occupies a line in the overlay.
#[must_use]
pub fn render_formatted(ctx: &EditorContext<'_>) -> FormattedView {
    let output = match ctx.highlight.highlight(ctx.value) {
        Markup::Html(html) => Markup::Html(html + "<br />"),
        spans @ Markup::Spans(_) => spans,
    };
    FormattedView { output }
}
