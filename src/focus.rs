//! Container focus and Tab-capture state.

/// A node focus can be on, from the editor's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FocusNode {
    /// The outer container.
    Shell,
    /// The editable text field.
    Field,
    /// Anything outside the editor.
    Outside,
}

/// Whether the shell is focused and whether Tab is captured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusState {
    shell_has_focus: bool,
    capture: bool,
}

impl Default for FocusState {
    fn default() -> Self {
        Self {
            shell_has_focus: false,
            capture: true,
        }
    }
}

impl FocusState {
    /// Create the default state: shell unfocused, Tab captured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the shell itself holds focus (drives the focus label).
    #[must_use]
    pub fn shell_has_focus(&self) -> bool {
        self.shell_has_focus
    }

    /// Whether Tab indents instead of moving focus.
    #[must_use]
    pub fn capture(&self) -> bool {
        self.capture
    }

    /// Seed shell focus when the shell is first placed (it may already be
    /// the active element).
    pub fn set_shell_focused(&mut self, focused: bool) {
        self.shell_has_focus = focused;
    }

    /// A focus event reached the shell; `target` is the node that gained focus.
    pub fn on_focus(&mut self, target: FocusNode) {
        if target == FocusNode::Shell {
            self.shell_has_focus = true;
        }
    }

    /// A blur event reached the shell; `related` is where focus is going.
    ///
    /// Focus landing back on the shell keeps the flag, so a round trip
    /// field -> shell never flickers the label off and on.
    pub fn on_blur(&mut self, related: Option<FocusNode>) {
        if related != Some(FocusNode::Shell) {
            self.shell_has_focus = false;
        }
    }

    /// Flip Tab capture and return the new value.
    pub fn toggle_capture(&mut self) -> bool {
        self.capture = !self.capture;
        self.capture
    }
}
