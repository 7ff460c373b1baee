// SPDX-License-Identifier: GPL-3.0-only

//! The host input connection and Enter-key resolution.

use serde::{Deserialize, Serialize};

/// Action the focused editor declares for its Enter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorAction {
    /// Run a search
    Search,
    /// Send a message
    Send,
    /// Navigate to the entered target
    Go,
    /// Move to the next field
    Next,
    /// Close the keyboard
    Done,
    /// No declared action; Enter inserts a newline
    #[default]
    None,
}

/// How the host should apply a `SubmitOrNewline` text action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterResolution {
    /// Invoke the editor's declared action
    PerformEditorAction(EditorAction),
    /// Send a plain Enter key (newline)
    Newline,
}

/// Resolves Enter against the editor's declared action.
pub fn resolve_enter(action: EditorAction) -> EnterResolution {
    match action {
        EditorAction::Search
        | EditorAction::Send
        | EditorAction::Go
        | EditorAction::Next
        | EditorAction::Done => EnterResolution::PerformEditorAction(action),
        EditorAction::None => EnterResolution::Newline,
    }
}

/// The text field the keyboard is typing into.
pub trait InputSink {
    /// Inserts text at the cursor.
    fn commit_text(&mut self, text: &str);

    /// Deletes up to `count` characters before the cursor.
    fn delete_backward(&mut self, count: usize);

    /// Performs the editor's declared action.
    fn perform_editor_action(&mut self, action: EditorAction);

    /// Sends a plain Enter key press and release.
    fn send_enter_key(&mut self);

    /// Returns the action the focused editor declares for Enter.
    fn editor_action(&self) -> EditorAction {
        EditorAction::None
    }
}

/// In-memory text field.
///
/// Enter inserts `'\n'` unless an editor action is set, in which case the
/// performed actions are recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    editor_action: EditorAction,
    performed: Vec<EditorAction>,
}

impl TextBuffer {
    /// Creates an empty buffer with no editor action.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer pre-filled with `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Sets the declared editor action.
    pub fn with_editor_action(mut self, action: EditorAction) -> Self {
        self.editor_action = action;
        self
    }

    /// Returns the current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the editor actions performed so far.
    pub fn performed_actions(&self) -> &[EditorAction] {
        &self.performed
    }
}

impl InputSink for TextBuffer {
    fn commit_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn delete_backward(&mut self, count: usize) {
        for _ in 0..count {
            if self.text.pop().is_none() {
                break;
            }
        }
    }

    fn perform_editor_action(&mut self, action: EditorAction) {
        self.performed.push(action);
    }

    fn send_enter_key(&mut self) {
        self.text.push('\n');
    }

    fn editor_action(&self) -> EditorAction {
        self.editor_action
    }
}
