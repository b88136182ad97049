//! Event dispatch: turns transport events into registry calls and replies.
//!
//! One handler per intent, dispatched from [`Router::handle`]. Handlers
//! never block waiting for the user's next message; multi-step flows park
//! their state in [`Sessions`] and resume when the matching event arrives.
//! Domain failures (unknown playlist, duplicate name, bad index) become
//! user-visible messages at the point of detection and never propagate.
//! Transport failures on a direct reply do propagate; during a batch send
//! the first failure aborts the remainder and reports a single failure
//! message instead.

use crate::api::MixtapeApi;
use crate::callback::CallbackAction;
use crate::error::{MixtapeError, Result};
use crate::keyboard::{Button, Keyboard};
use crate::model::Song;
use crate::session::{Pending, Sessions};
use crate::shares::{self, SHARE_PAYLOAD_PREFIX};
use crate::store::Store;
use crate::transport::{ChatId, Transport};

pub const BTN_CREATE_PLAYLIST: &str = "➕ Create Playlist";
pub const BTN_ADD_MUSIC: &str = "🎵 Add Music";
pub const BTN_MY_PLAYLISTS: &str = "🎶 My Playlists";
pub const BTN_HELP: &str = "❓ Help";

const HELP_TEXT: &str = "Here are the available commands:\n\
    - /start: Start the bot and show the main menu.\n\
    - ➕ Create Playlist: Create a new playlist.\n\
    - 🎵 Add Music: Add music to a playlist.\n\
    - 🎶 My Playlists: View your playlists.\n\
    - /list_playlists [user_id]: List playlists of a specific user.\n\
    - ❓ Help: Show this help message.";

/// An incoming transport event, attributed to a stable user id and a
/// conversation.
#[derive(Debug, Clone)]
pub enum Event {
    /// First contact or a deep link; the payload is the start parameter.
    Start {
        chat: ChatId,
        user: String,
        payload: Option<String>,
    },
    Text {
        chat: ChatId,
        user: String,
        text: String,
    },
    Audio {
        chat: ChatId,
        user: String,
        file_id: String,
        file_name: Option<String>,
    },
    /// An inline keyboard button press.
    Callback {
        chat: ChatId,
        user: String,
        data: String,
    },
}

/// Exact command match: the name must be followed by end-of-string or
/// whitespace, so `/list_playlistsX` is not `/list_playlists`.
fn is_command(text: &str, command: &str) -> bool {
    text.strip_prefix(command)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

pub struct Router<S: Store, T: Transport> {
    api: MixtapeApi<S>,
    transport: T,
    sessions: Sessions,
    share_host: String,
}

impl<S: Store, T: Transport> Router<S, T> {
    pub fn new(api: MixtapeApi<S>, transport: T, share_host: impl Into<String>) -> Self {
        Self {
            api,
            transport,
            sessions: Sessions::new(),
            share_host: share_host.into(),
        }
    }

    pub fn api(&self) -> &MixtapeApi<S> {
        &self.api
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn handle(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Start {
                chat,
                user,
                payload,
            } => self.on_start(chat, &user, payload.as_deref()),
            Event::Text { chat, user, text } => self.on_text(chat, &user, text.trim()),
            Event::Audio {
                chat,
                user,
                file_id,
                file_name,
            } => self.on_audio(chat, &user, file_id, file_name),
            Event::Callback { chat, user, data } => self.on_callback(chat, &user, &data),
        }
    }

    fn on_start(&mut self, chat: ChatId, user: &str, payload: Option<&str>) -> Result<()> {
        self.api.ensure_user(user)?;

        if let Some(token) = payload.and_then(|p| p.strip_prefix(SHARE_PAYLOAD_PREFIX)) {
            return self.deliver_shared(chat, token);
        }

        let menu = Keyboard::reply(&[
            &[BTN_CREATE_PLAYLIST, BTN_ADD_MUSIC],
            &[BTN_MY_PLAYLISTS, BTN_HELP],
        ]);
        self.transport
            .send_text(chat, "🎵 Welcome!\nChoose an action:", Some(menu))
    }

    fn on_text(&mut self, chat: ChatId, user: &str, text: &str) -> Result<()> {
        // A pending name prompt swallows whatever text comes next, button
        // labels included, and is cleared no matter how creation goes.
        if self.sessions.peek(chat) == Some(&Pending::AwaitingPlaylistName) {
            self.sessions.take(chat);
            return self.finish_create_playlist(chat, user, text);
        }

        match text {
            BTN_CREATE_PLAYLIST => {
                self.sessions.set(chat, Pending::AwaitingPlaylistName);
                self.transport
                    .send_text(chat, "Please enter the name of the new playlist:", None)
            }
            BTN_ADD_MUSIC => self.prompt_playlist_choice(chat, user),
            BTN_MY_PLAYLISTS => self.show_my_playlists(chat, user),
            BTN_HELP | "/help" => self.transport.send_text(chat, HELP_TEXT, None),
            _ if is_command(text, "/list_playlists") => self.list_playlists_for(chat, text),
            _ if text.starts_with(SHARE_PAYLOAD_PREFIX) => {
                // A pasted deep-link payload works like the deep link.
                let token = &text[SHARE_PAYLOAD_PREFIX.len()..];
                self.deliver_shared(chat, token)
            }
            _ => {
                tracing::debug!("Ignoring unhandled text from {}", user);
                Ok(())
            }
        }
    }

    fn finish_create_playlist(&mut self, chat: ChatId, user: &str, name: &str) -> Result<()> {
        if name.is_empty() {
            return self
                .transport
                .send_text(chat, "Playlist name cannot be empty.", None);
        }
        match self.api.create_playlist(user, name) {
            Ok(()) => self
                .transport
                .send_text(chat, &format!("Playlist {} created!", name), None),
            Err(MixtapeError::DuplicatePlaylist(_)) => self.transport.send_text(
                chat,
                "Playlist name already exists. Please choose another name.",
                None,
            ),
            Err(e) => Err(e),
        }
    }

    fn prompt_playlist_choice(&mut self, chat: ChatId, user: &str) -> Result<()> {
        let names = self.api.playlist_names(user);
        if names.is_empty() {
            return self.transport.send_text(
                chat,
                "You don't have any playlists. Create one first.",
                None,
            );
        }
        let rows = names
            .into_iter()
            .map(|name| {
                vec![Button::new(
                    name.clone(),
                    CallbackAction::SelectPlaylist(name),
                )]
            })
            .collect();
        self.transport.send_text(
            chat,
            "Select a playlist to add music to:",
            Some(Keyboard::Inline(rows)),
        )
    }

    fn show_my_playlists(&mut self, chat: ChatId, user: &str) -> Result<()> {
        let names = self.api.playlist_names(user);
        if names.is_empty() {
            return self
                .transport
                .send_text(chat, "You don't have any playlists.", None);
        }
        let rows = names
            .into_iter()
            .map(|name| {
                vec![
                    Button::new(name.clone(), CallbackAction::ViewPlaylist(name.clone())),
                    Button::new("🔗 Share", CallbackAction::SharePlaylist(name.clone())),
                    Button::new(
                        "❌ Delete Playlist",
                        CallbackAction::ConfirmDeletePlaylist(name),
                    ),
                ]
            })
            .collect();
        self.transport
            .send_text(chat, "Your playlists:", Some(Keyboard::Inline(rows)))
    }

    fn on_audio(
        &mut self,
        chat: ChatId,
        user: &str,
        file_id: String,
        file_name: Option<String>,
    ) -> Result<()> {
        let playlist = match self.sessions.peek(chat) {
            Some(Pending::AwaitingAudio { playlist }) => playlist.clone(),
            _ => {
                tracing::debug!("Ignoring audio from {} with no playlist selected", user);
                return Ok(());
            }
        };
        self.sessions.take(chat);

        let song = Song::new(file_id, file_name);
        let song_name = song.file_name.clone();
        match self.api.add_song(user, &playlist, song) {
            Ok(()) => self.transport.send_text(
                chat,
                &format!("✅ Song {} added to {}!", song_name, playlist),
                None,
            ),
            Err(MixtapeError::PlaylistNotFound(_)) => {
                tracing::error!("Error saving music: playlist {} is gone", playlist);
                self.transport
                    .send_text(chat, "❌ Sorry, there was an error saving the song.", None)
            }
            Err(e) => Err(e),
        }
    }

    fn on_callback(&mut self, chat: ChatId, user: &str, data: &str) -> Result<()> {
        let Some(action) = CallbackAction::parse(data) else {
            tracing::debug!("Ignoring unrecognized callback data: {}", data);
            return Ok(());
        };

        match action {
            CallbackAction::SelectPlaylist(name) => {
                self.sessions.set(
                    chat,
                    Pending::AwaitingAudio {
                        playlist: name.clone(),
                    },
                );
                self.transport.send_text(
                    chat,
                    &format!("Send me the audio file to add to {}.", name),
                    None,
                )
            }
            CallbackAction::ViewPlaylist(name) => self.view_playlist(chat, user, &name),
            CallbackAction::SendAllMusic(name) => self.send_all_music(chat, user, &name),
            CallbackAction::PlaySong(name, number) => self.play_song(chat, user, &name, number),
            CallbackAction::ConfirmDeleteSong(name, number) => {
                let keyboard = Keyboard::Inline(vec![vec![
                    Button::new("✅ Yes", CallbackAction::DeleteSong(name.clone(), number)),
                    Button::new("❌ No", CallbackAction::ViewPlaylist(name.clone())),
                ]]);
                self.transport.send_text(
                    chat,
                    &format!(
                        "Are you sure you want to delete song number {} from {}?",
                        number, name
                    ),
                    Some(keyboard),
                )
            }
            CallbackAction::DeleteSong(name, number) => {
                self.delete_song(chat, user, &name, number)
            }
            CallbackAction::SharePlaylist(name) => self.share_playlist(chat, user, &name),
            CallbackAction::ConfirmDeletePlaylist(name) => {
                let keyboard = Keyboard::Inline(vec![vec![
                    Button::new("✅ Yes", CallbackAction::DeletePlaylist(name.clone())),
                    Button::new("❌ No", CallbackAction::CancelDelete),
                ]]);
                self.transport.send_text(
                    chat,
                    &format!("Are you sure you want to delete playlist {}?", name),
                    Some(keyboard),
                )
            }
            CallbackAction::DeletePlaylist(name) => match self.api.delete_playlist(user, &name) {
                Ok(()) => self
                    .transport
                    .send_text(chat, &format!("Playlist {} deleted.", name), None),
                Err(MixtapeError::PlaylistNotFound(_)) => {
                    self.transport.send_text(chat, "Playlist not found.", None)
                }
                Err(e) => Err(e),
            },
            CallbackAction::CancelDelete => {
                self.transport.send_text(chat, "Deletion cancelled.", None)
            }
        }
    }

    fn view_playlist(&mut self, chat: ChatId, user: &str, name: &str) -> Result<()> {
        let songs = match self.api.songs(user, name) {
            Ok(songs) => songs.to_vec(),
            Err(MixtapeError::PlaylistNotFound(_)) => {
                return self.transport.send_text(chat, "Playlist not found.", None);
            }
            Err(e) => return Err(e),
        };
        if songs.is_empty() {
            return self
                .transport
                .send_text(chat, &format!("Playlist {} is empty.", name), None);
        }

        let mut rows = vec![vec![Button::new(
            "🎧 Send All Music",
            CallbackAction::SendAllMusic(name.to_string()),
        )]];
        for (number, song) in songs.iter().enumerate().map(|(i, s)| (i + 1, s)) {
            rows.push(vec![
                Button::new(
                    format!("🎵 {}. {}", number, song.file_name),
                    CallbackAction::PlaySong(name.to_string(), number),
                ),
                Button::new(
                    "❌",
                    CallbackAction::ConfirmDeleteSong(name.to_string(), number),
                ),
            ]);
        }
        self.transport.send_text(
            chat,
            &format!("Songs in {}:", name),
            Some(Keyboard::Inline(rows)),
        )
    }

    fn send_all_music(&mut self, chat: ChatId, user: &str, name: &str) -> Result<()> {
        let songs = match self.api.songs(user, name) {
            Ok(songs) => songs.to_vec(),
            Err(MixtapeError::PlaylistNotFound(_)) => {
                return self.transport.send_text(chat, "Playlist not found.", None);
            }
            Err(e) => return Err(e),
        };
        if songs.is_empty() {
            return self.transport.send_text(chat, "Playlist is empty.", None);
        }

        for song in &songs {
            if let Err(e) = self
                .transport
                .send_audio(chat, &song.file_id, Some(&song.file_name))
            {
                // Stop sending if one song fails; songs already sent stay sent.
                tracing::error!("Error sending audio: {}", e);
                return self
                    .transport
                    .send_text(chat, "Could not send this song due to an error.", None);
            }
        }
        self.transport.send_text(chat, "All songs sent!", None)
    }

    fn play_song(&mut self, chat: ChatId, user: &str, name: &str, number: usize) -> Result<()> {
        let song = match self.api.songs(user, name) {
            Ok(songs) if number >= 1 && number <= songs.len() => songs[number - 1].clone(),
            Ok(_) => {
                return self
                    .transport
                    .send_text(chat, "Invalid song number.", None);
            }
            Err(MixtapeError::PlaylistNotFound(_)) => {
                return self.transport.send_text(chat, "Playlist not found.", None);
            }
            Err(e) => return Err(e),
        };
        if let Err(e) = self
            .transport
            .send_audio(chat, &song.file_id, Some(&song.file_name))
        {
            tracing::error!("Error sending audio: {}", e);
            return self
                .transport
                .send_text(chat, "Could not send this song due to an error.", None);
        }
        Ok(())
    }

    fn delete_song(&mut self, chat: ChatId, user: &str, name: &str, number: usize) -> Result<()> {
        match self.api.delete_song(user, name, number) {
            Ok(removed) => self.transport.send_text(
                chat,
                &format!("✅ Song {} deleted from {}!", removed.file_name, name),
                None,
            ),
            Err(MixtapeError::InvalidSongNumber(_)) => {
                self.transport.send_text(chat, "Invalid song number.", None)
            }
            Err(MixtapeError::PlaylistNotFound(_)) => {
                self.transport.send_text(chat, "Playlist not found.", None)
            }
            Err(e) => Err(e),
        }
    }

    fn share_playlist(&mut self, chat: ChatId, user: &str, name: &str) -> Result<()> {
        // The share entry is stored before the link is built; existence is
        // only ever checked at resolve time.
        let token = self.api.share(user, name)?;
        let username = match self.transport.username() {
            Ok(username) => username,
            Err(e) => {
                tracing::error!("Error fetching bot username: {}", e);
                return self
                    .transport
                    .send_text(chat, "❌ Could not generate shareable link.", None);
            }
        };
        let link = shares::share_link(&self.share_host, &username, &token);
        self.transport.send_text(
            chat,
            &format!("Share this link to share your playlist {}:\n{}", name, link),
            None,
        )
    }

    /// Operator/debug command: enumerate any user's playlist names. There
    /// is deliberately no authorization check here.
    fn list_playlists_for(&mut self, chat: ChatId, text: &str) -> Result<()> {
        let Some(target) = text.split_whitespace().nth(1) else {
            return self.transport.send_text(
                chat,
                "Please provide a user ID. Example: /list_playlists 123456789",
                None,
            );
        };
        if !self.api.user_known(target) {
            return self.transport.send_text(chat, "User not found.", None);
        }
        let names = self.api.playlist_names(target);
        if names.is_empty() {
            return self
                .transport
                .send_text(chat, "This user has no playlists.", None);
        }
        self.transport.send_text(
            chat,
            &format!("Playlists for user {}:\n{}", target, names.join("\n")),
            None,
        )
    }

    fn deliver_shared(&mut self, chat: ChatId, token: &str) -> Result<()> {
        let Some(entry) = self.api.resolve_share(token).cloned() else {
            return self.transport.send_text(chat, "Playlist not found.", None);
        };
        let songs = match self.api.songs(&entry.user_id, &entry.playlist_name) {
            Ok(songs) => songs.to_vec(),
            Err(MixtapeError::PlaylistNotFound(_)) => {
                return self.transport.send_text(
                    chat,
                    "Playlist not found or is no longer available.",
                    None,
                );
            }
            Err(e) => return Err(e),
        };
        if songs.is_empty() {
            return self.transport.send_text(
                chat,
                &format!("Playlist {} is empty.", entry.playlist_name),
                None,
            );
        }

        self.transport
            .send_text(chat, &format!("Playlist {}:", entry.playlist_name), None)?;
        for (number, song) in songs.iter().enumerate().map(|(i, s)| (i + 1, s)) {
            let delivery = self
                .transport
                .send_text(chat, &format!("{}. {}", number, song.file_name), None)
                .and_then(|()| self.transport.send_audio(chat, &song.file_id, None));
            if let Err(e) = delivery {
                tracing::error!("Error sending audio: {}", e);
                return self
                    .transport
                    .send_text(chat, "❌ Could not send this song due to an error.", None);
            }
        }
        Ok(())
    }
}
