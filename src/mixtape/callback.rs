//! Typed form of the callback data carried by inline keyboard buttons.
//!
//! On the wire a callback is `verb:playlist` or `verb:playlist:number`.
//! Index-bearing variants split the number off from the right, so playlist
//! names containing `:` survive the round trip.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    /// Target playlist chosen for the add-music flow.
    SelectPlaylist(String),
    ViewPlaylist(String),
    SharePlaylist(String),
    SendAllMusic(String),
    PlaySong(String, usize),
    ConfirmDeleteSong(String, usize),
    DeleteSong(String, usize),
    ConfirmDeletePlaylist(String),
    DeletePlaylist(String),
    CancelDelete,
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CallbackAction::*;
        match self {
            SelectPlaylist(name) => write!(f, "select_playlist:{}", name),
            ViewPlaylist(name) => write!(f, "view_playlist:{}", name),
            SharePlaylist(name) => write!(f, "share_playlist:{}", name),
            SendAllMusic(name) => write!(f, "send_all_music:{}", name),
            PlaySong(name, n) => write!(f, "play_song:{}:{}", name, n),
            ConfirmDeleteSong(name, n) => write!(f, "confirm_delete_song:{}:{}", name, n),
            DeleteSong(name, n) => write!(f, "delete_song:{}:{}", name, n),
            ConfirmDeletePlaylist(name) => write!(f, "confirm_delete:{}", name),
            DeletePlaylist(name) => write!(f, "delete_playlist:{}", name),
            CancelDelete => write!(f, "cancel_delete"),
        }
    }
}

impl CallbackAction {
    /// Parse callback data. Unknown or malformed data yields `None`; the
    /// router ignores such presses.
    pub fn parse(data: &str) -> Option<Self> {
        use CallbackAction::*;
        if data == "cancel_delete" {
            return Some(CancelDelete);
        }
        let (verb, rest) = data.split_once(':')?;
        match verb {
            "select_playlist" => Some(SelectPlaylist(rest.to_string())),
            "view_playlist" => Some(ViewPlaylist(rest.to_string())),
            "share_playlist" => Some(SharePlaylist(rest.to_string())),
            "send_all_music" => Some(SendAllMusic(rest.to_string())),
            "confirm_delete" => Some(ConfirmDeletePlaylist(rest.to_string())),
            "delete_playlist" => Some(DeletePlaylist(rest.to_string())),
            "play_song" => split_indexed(rest).map(|(name, n)| PlaySong(name, n)),
            "confirm_delete_song" => split_indexed(rest).map(|(name, n)| ConfirmDeleteSong(name, n)),
            "delete_song" => split_indexed(rest).map(|(name, n)| DeleteSong(name, n)),
            _ => None,
        }
    }
}

fn split_indexed(rest: &str) -> Option<(String, usize)> {
    let (name, number) = rest.rsplit_once(':')?;
    Some((name.to_string(), number.parse().ok()?))
}
