//! The chat-network boundary.
//!
//! The bot core never talks to a chat network directly; it goes through
//! the [`Transport`] trait, which is the whole surface the core needs from
//! the outside world: send text (optionally with a keyboard), send a
//! previously uploaded audio file by its opaque id, and resolve the bot's
//! own handle for building share links.
//!
//! Failures surface as [`MixtapeError::Transport`] and follow the batch
//! policy in [`crate::router`]: the first failure aborts the rest of a
//! batch send, with no retry and no rollback.

use crate::error::Result;
use crate::keyboard::Keyboard;

/// Stable identifier of a conversation, assigned by the transport.
pub type ChatId = i64;

pub trait Transport {
    fn send_text(&mut self, chat: ChatId, text: &str, keyboard: Option<Keyboard>) -> Result<()>;

    fn send_audio(&mut self, chat: ChatId, file_id: &str, caption: Option<&str>) -> Result<()>;

    /// The bot's own handle, used to build share links.
    fn username(&mut self) -> Result<String>;
}

#[cfg(any(test, feature = "test_utils"))]
pub mod mock {
    use super::*;
    use crate::error::MixtapeError;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Sent {
        Text {
            chat: ChatId,
            text: String,
            keyboard: Option<Keyboard>,
        },
        Audio {
            chat: ChatId,
            file_id: String,
            caption: Option<String>,
        },
    }

    /// Records outgoing traffic and can be scripted to start failing after
    /// a given number of successful sends.
    pub struct MockTransport {
        pub sent: Vec<Sent>,
        username: String,
        fail_from: Option<usize>,
        fail_one: Option<usize>,
        username_fails: bool,
        attempted: usize,
    }

    impl Default for MockTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self {
                sent: Vec::new(),
                username: "mixtape_bot".to_string(),
                fail_from: None,
                fail_one: None,
                username_fails: false,
                attempted: 0,
            }
        }

        /// Sends numbered `n` and later (0-based) fail.
        pub fn fail_sends_from(mut self, n: usize) -> Self {
            self.fail_from = Some(n);
            self
        }

        /// Only send number `n` (0-based) fails.
        pub fn fail_send(mut self, n: usize) -> Self {
            self.fail_one = Some(n);
            self
        }

        pub fn with_failing_username(mut self) -> Self {
            self.username_fails = true;
            self
        }

        fn gate(&mut self) -> Result<()> {
            let attempt = self.attempted;
            self.attempted += 1;
            let fails = matches!(self.fail_from, Some(n) if attempt >= n)
                || self.fail_one == Some(attempt);
            if fails {
                return Err(MixtapeError::Transport("scripted send failure".to_string()));
            }
            Ok(())
        }

        /// All text payloads sent so far, in order.
        pub fn texts(&self) -> Vec<&str> {
            self.sent
                .iter()
                .filter_map(|s| match s {
                    Sent::Text { text, .. } => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }

        /// All audio file ids sent so far, in order.
        pub fn audio_ids(&self) -> Vec<&str> {
            self.sent
                .iter()
                .filter_map(|s| match s {
                    Sent::Audio { file_id, .. } => Some(file_id.as_str()),
                    _ => None,
                })
                .collect()
        }

        pub fn last_keyboard(&self) -> Option<&Keyboard> {
            self.sent.iter().rev().find_map(|s| match s {
                Sent::Text { keyboard, .. } => keyboard.as_ref(),
                _ => None,
            })
        }
    }

    impl Transport for MockTransport {
        fn send_text(
            &mut self,
            chat: ChatId,
            text: &str,
            keyboard: Option<Keyboard>,
        ) -> Result<()> {
            self.gate()?;
            self.sent.push(Sent::Text {
                chat,
                text: text.to_string(),
                keyboard,
            });
            Ok(())
        }

        fn send_audio(&mut self, chat: ChatId, file_id: &str, caption: Option<&str>) -> Result<()> {
            self.gate()?;
            self.sent.push(Sent::Audio {
                chat,
                file_id: file_id.to_string(),
                caption: caption.map(str::to_string),
            });
            Ok(())
        }

        fn username(&mut self) -> Result<String> {
            if self.username_fails {
                return Err(MixtapeError::Transport(
                    "scripted identity failure".to_string(),
                ));
            }
            Ok(self.username.clone())
        }
    }
}
