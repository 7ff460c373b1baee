// SPDX-License-Identifier: GPL-3.0-only

//! Abstract text-editing actions emitted by the keyboard engine.

use serde::{Deserialize, Serialize};

/// What the host input connection should do in response to a key tap.
///
/// The engine never touches a text buffer; it only describes the edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAction {
    /// Insert text at the cursor.
    InsertText(String),
    /// Delete `count` characters before the cursor.
    DeleteBackward(usize),
    /// Perform the editor's action if it declares one, else insert a newline.
    SubmitOrNewline,
}

impl TextAction {
    /// Creates an insert action.
    pub fn insert(text: impl Into<String>) -> Self {
        TextAction::InsertText(text.into())
    }
}
