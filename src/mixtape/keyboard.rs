//! Reply-markup model handed to the transport alongside outgoing text.

use crate::callback::CallbackAction;

/// An inline button: a label plus the action its press reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: CallbackAction,
}

impl Button {
    pub fn new(label: impl Into<String>, action: CallbackAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// Persistent menu of plain text labels; pressing one sends the label
    /// back as an ordinary text message.
    Reply(Vec<Vec<String>>),
    /// Buttons attached to a single message, reported as callback events.
    Inline(Vec<Vec<Button>>),
}

impl Keyboard {
    pub fn reply(rows: &[&[&str]]) -> Self {
        Keyboard::Reply(
            rows.iter()
                .map(|row| row.iter().map(|label| label.to_string()).collect())
                .collect(),
        )
    }
}
