//! Per-conversation pending interaction state.
//!
//! A conversation has at most one pending multi-step interaction; setting
//! a new one silently replaces whatever was there. Consuming always clears
//! the slot regardless of what the consumer then does with it, so a failed
//! playlist creation still forces the user to restart the flow. Pending
//! state never expires; an abandoned interaction stays pending until it is
//! consumed or replaced.

use crate::transport::ChatId;
use std::collections::HashMap;

/// The single in-flight multi-step action a conversation is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    /// "Create playlist" was requested; the next text message is the name.
    AwaitingPlaylistName,
    /// A target playlist was chosen; the next audio message goes into it.
    AwaitingAudio { playlist: String },
}

#[derive(Debug, Default)]
pub struct Sessions {
    pending: HashMap<ChatId, Pending>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pending interaction for a conversation.
    pub fn set(&mut self, chat: ChatId, pending: Pending) {
        self.pending.insert(chat, pending);
    }

    /// Consume and clear the pending interaction, if any.
    pub fn take(&mut self, chat: ChatId) -> Option<Pending> {
        self.pending.remove(&chat)
    }

    pub fn peek(&self, chat: ChatId) -> Option<&Pending> {
        self.pending.get(&chat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_consumes() {
        let mut sessions = Sessions::new();
        sessions.set(1, Pending::AwaitingPlaylistName);

        assert_eq!(sessions.take(1), Some(Pending::AwaitingPlaylistName));
        assert_eq!(sessions.take(1), None);
    }

    #[test]
    fn set_replaces_previous_pending() {
        let mut sessions = Sessions::new();
        sessions.set(1, Pending::AwaitingPlaylistName);
        sessions.set(
            1,
            Pending::AwaitingAudio {
                playlist: "Chill".to_string(),
            },
        );

        assert_eq!(
            sessions.take(1),
            Some(Pending::AwaitingAudio {
                playlist: "Chill".to_string()
            })
        );
    }

    #[test]
    fn conversations_are_independent() {
        let mut sessions = Sessions::new();
        sessions.set(1, Pending::AwaitingPlaylistName);

        assert_eq!(sessions.peek(2), None);
        assert!(sessions.peek(1).is_some());
    }
}
