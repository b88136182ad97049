//! Playlist registry: the per-user map of playlist name -> ordered song
//! list. These functions hold all the domain invariants (unique names per
//! user, 1-based display indices, append-only song lists) and nothing else;
//! persistence is the caller's job (see [`crate::api`]).

use crate::error::{MixtapeError, Result};
use crate::model::{Document, Song, UserRecord};

/// Idempotently create an empty record for a first-contact user.
/// Returns true when the record was actually created.
pub fn ensure_user(doc: &mut Document, user_id: &str) -> bool {
    if doc.users.contains_key(user_id) {
        return false;
    }
    doc.users.insert(user_id.to_string(), UserRecord::new());
    true
}

pub fn user_known(doc: &Document, user_id: &str) -> bool {
    doc.users.contains_key(user_id)
}

/// Create an empty playlist. Fails with `DuplicatePlaylist` when the name
/// is already taken for this user.
pub fn create_playlist(doc: &mut Document, user_id: &str, name: &str) -> Result<()> {
    let record = doc
        .users
        .entry(user_id.to_string())
        .or_insert_with(UserRecord::new);
    if record.contains_key(name) {
        return Err(MixtapeError::DuplicatePlaylist(name.to_string()));
    }
    record.insert(name.to_string(), Vec::new());
    Ok(())
}

/// Playlist names in creation order. Empty for an unknown user.
pub fn list_playlists<'a>(doc: &'a Document, user_id: &str) -> Vec<&'a str> {
    doc.users
        .get(user_id)
        .map(|record| record.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

/// Remove a playlist and every song in it.
pub fn delete_playlist(doc: &mut Document, user_id: &str, name: &str) -> Result<()> {
    let record = doc
        .users
        .get_mut(user_id)
        .ok_or_else(|| MixtapeError::PlaylistNotFound(name.to_string()))?;
    // shift_remove keeps the creation order of the remaining playlists.
    record
        .shift_remove(name)
        .map(|_| ())
        .ok_or_else(|| MixtapeError::PlaylistNotFound(name.to_string()))
}

/// Append a song to the end of a playlist. No duplicate detection: the
/// same file may be added twice.
pub fn add_song(doc: &mut Document, user_id: &str, name: &str, song: Song) -> Result<()> {
    songs_mut(doc, user_id, name)?.push(song);
    Ok(())
}

pub fn songs<'a>(doc: &'a Document, user_id: &str, name: &str) -> Result<&'a [Song]> {
    doc.users
        .get(user_id)
        .and_then(|record| record.get(name))
        .map(Vec::as_slice)
        .ok_or_else(|| MixtapeError::PlaylistNotFound(name.to_string()))
}

/// Remove the song at a 1-based display index and return it. Later songs
/// shift down by one.
pub fn delete_song(doc: &mut Document, user_id: &str, name: &str, number: usize) -> Result<Song> {
    let songs = songs_mut(doc, user_id, name)?;
    if number < 1 || number > songs.len() {
        return Err(MixtapeError::InvalidSongNumber(number));
    }
    Ok(songs.remove(number - 1))
}

fn songs_mut<'a>(doc: &'a mut Document, user_id: &str, name: &str) -> Result<&'a mut Vec<Song>> {
    doc.users
        .get_mut(user_id)
        .and_then(|record| record.get_mut(name))
        .ok_or_else(|| MixtapeError::PlaylistNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::DocumentFixture;

    #[test]
    fn ensure_user_is_idempotent() {
        let mut doc = Document::default();
        assert!(ensure_user(&mut doc, "1"));
        assert!(!ensure_user(&mut doc, "1"));
        assert!(user_known(&doc, "1"));
        assert!(!user_known(&doc, "2"));
    }

    #[test]
    fn created_playlist_lists_once_in_order() {
        let mut doc = Document::default();
        create_playlist(&mut doc, "1", "Chill").unwrap();
        create_playlist(&mut doc, "1", "Workout").unwrap();
        create_playlist(&mut doc, "1", "Autumn").unwrap();

        assert_eq!(list_playlists(&doc, "1"), vec!["Chill", "Workout", "Autumn"]);
    }

    #[test]
    fn duplicate_name_leaves_existing_songs_alone() {
        let mut doc = DocumentFixture::new().with_songs("1", "Chill", 2).doc;
        match create_playlist(&mut doc, "1", "Chill") {
            Err(MixtapeError::DuplicatePlaylist(name)) => assert_eq!(name, "Chill"),
            other => panic!("Expected DuplicatePlaylist, got {:?}", other),
        }
        assert_eq!(songs(&doc, "1", "Chill").unwrap().len(), 2);
    }

    #[test]
    fn same_name_allowed_for_different_users() {
        let mut doc = Document::default();
        create_playlist(&mut doc, "1", "Chill").unwrap();
        create_playlist(&mut doc, "2", "Chill").unwrap();
        assert_eq!(list_playlists(&doc, "1"), vec!["Chill"]);
        assert_eq!(list_playlists(&doc, "2"), vec!["Chill"]);
    }

    #[test]
    fn list_for_unknown_user_is_empty() {
        let doc = Document::default();
        assert!(list_playlists(&doc, "nobody").is_empty());
    }

    #[test]
    fn add_song_appends() {
        let mut doc = DocumentFixture::new().with_playlist("1", "Chill").doc;
        add_song(&mut doc, "1", "Chill", Song::new("A", Some("x.mp3".into()))).unwrap();
        add_song(&mut doc, "1", "Chill", Song::new("B", Some("y.mp3".into()))).unwrap();

        let songs = songs(&doc, "1", "Chill").unwrap();
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[1].file_id, "B");
    }

    #[test]
    fn add_song_allows_duplicates() {
        let mut doc = DocumentFixture::new().with_playlist("1", "Chill").doc;
        let song = Song::new("A", Some("x.mp3".into()));
        add_song(&mut doc, "1", "Chill", song.clone()).unwrap();
        add_song(&mut doc, "1", "Chill", song).unwrap();
        assert_eq!(songs(&doc, "1", "Chill").unwrap().len(), 2);
    }

    #[test]
    fn add_song_to_missing_playlist_fails() {
        let mut doc = DocumentFixture::new().with_user("1").doc;
        let result = add_song(&mut doc, "1", "Nope", Song::new("A", None));
        assert!(matches!(result, Err(MixtapeError::PlaylistNotFound(_))));
    }

    #[test]
    fn delete_song_shifts_later_indices() {
        let mut doc = DocumentFixture::new().with_songs("1", "Chill", 3).doc;

        let removed = delete_song(&mut doc, "1", "Chill", 2).unwrap();
        assert_eq!(removed.file_name, "song-2.mp3");

        let remaining = songs(&doc, "1", "Chill").unwrap();
        assert_eq!(remaining[0].file_name, "song-1.mp3");
        assert_eq!(remaining[1].file_name, "song-3.mp3");
    }

    #[test]
    fn delete_song_rejects_out_of_range() {
        let mut doc = DocumentFixture::new().with_songs("1", "Chill", 2).doc;
        assert!(matches!(
            delete_song(&mut doc, "1", "Chill", 0),
            Err(MixtapeError::InvalidSongNumber(0))
        ));
        assert!(matches!(
            delete_song(&mut doc, "1", "Chill", 3),
            Err(MixtapeError::InvalidSongNumber(3))
        ));
        assert_eq!(songs(&doc, "1", "Chill").unwrap().len(), 2);
    }

    #[test]
    fn delete_playlist_cascades() {
        let mut doc = DocumentFixture::new()
            .with_songs("1", "Chill", 2)
            .with_playlist("1", "Workout")
            .doc;

        delete_playlist(&mut doc, "1", "Chill").unwrap();
        assert_eq!(list_playlists(&doc, "1"), vec!["Workout"]);
        assert!(matches!(
            songs(&doc, "1", "Chill"),
            Err(MixtapeError::PlaylistNotFound(_))
        ));
    }

    #[test]
    fn delete_missing_playlist_fails() {
        let mut doc = DocumentFixture::new().with_user("1").doc;
        assert!(matches!(
            delete_playlist(&mut doc, "1", "Nope"),
            Err(MixtapeError::PlaylistNotFound(_))
        ));
    }

    #[test]
    fn create_delete_scenario() {
        // U1 creates "Chill", adds A and B, deletes index 1.
        let mut doc = Document::default();
        ensure_user(&mut doc, "U1");
        create_playlist(&mut doc, "U1", "Chill").unwrap();
        add_song(&mut doc, "U1", "Chill", Song::new("A", Some("x.mp3".into()))).unwrap();
        add_song(&mut doc, "U1", "Chill", Song::new("B", Some("y.mp3".into()))).unwrap();

        let removed = delete_song(&mut doc, "U1", "Chill", 1).unwrap();
        assert_eq!(removed.file_id, "A");

        let remaining = songs(&doc, "U1", "Chill").unwrap();
        assert_eq!(remaining, [Song::new("B", Some("y.mp3".into()))]);
    }
}
