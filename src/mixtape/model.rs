use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Placeholder used when the transport delivers an audio file without a name.
pub const UNKNOWN_FILE_NAME: &str = "Unknown.mp3";

/// A reference to an externally stored audio object plus a display name.
///
/// Songs are immutable once stored; they are only ever appended to or
/// removed from a playlist, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Transport-assigned, opaque file reference.
    pub file_id: String,
    #[serde(default = "unknown_file_name")]
    pub file_name: String,
}

fn unknown_file_name() -> String {
    UNKNOWN_FILE_NAME.to_string()
}

impl Song {
    pub fn new(file_id: impl Into<String>, file_name: Option<String>) -> Self {
        Self {
            file_id: file_id.into(),
            file_name: file_name.unwrap_or_else(unknown_file_name),
        }
    }
}

/// One user's playlists: name -> ordered song list, in creation order.
pub type UserRecord = IndexMap<String, Vec<Song>>;

/// A share token's target. Never mutated and never expired; the playlist it
/// points to may have been deleted since, which makes the entry dangling
/// (resolves, then the playlist lookup fails).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareEntry {
    pub user_id: String,
    pub playlist_name: String,
}

/// The root persisted object.
///
/// The wire shape is flat: user records sit at the root keyed by user id,
/// with the `shared_playlists` map as a sibling key. Existing data files
/// depend on this, so the user map is flattened rather than nested under a
/// `users` wrapper.
///
/// ```json
/// {
///   "1001": { "Chill": [ {"file_id": "A", "file_name": "x.mp3"} ] },
///   "shared_playlists": { "<token>": {"user_id": "1001", "playlist_name": "Chill"} }
/// }
/// ```
///
/// Both keys may be absent on first load; absence means empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub shared_playlists: IndexMap<String, ShareEntry>,

    #[serde(flatten)]
    pub users: IndexMap<String, UserRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_defaults_file_name() {
        let song = Song::new("abc", None);
        assert_eq!(song.file_name, UNKNOWN_FILE_NAME);

        let named = Song::new("abc", Some("track.mp3".to_string()));
        assert_eq!(named.file_name, "track.mp3");
    }

    #[test]
    fn document_serializes_flat() {
        let mut doc = Document::default();
        let mut record = UserRecord::new();
        record.insert("Chill".to_string(), vec![Song::new("A", Some("x.mp3".into()))]);
        doc.users.insert("1001".to_string(), record);
        doc.shared_playlists.insert(
            "tok".to_string(),
            ShareEntry {
                user_id: "1001".to_string(),
                playlist_name: "Chill".to_string(),
            },
        );

        let json: serde_json::Value = serde_json::to_value(&doc).unwrap();
        // User records and shared_playlists are siblings at the root.
        assert!(json.get("1001").is_some());
        assert!(json.get("shared_playlists").is_some());
        assert!(json.get("users").is_none());
    }

    #[test]
    fn empty_document_has_no_share_key() {
        let json = serde_json::to_string(&Document::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn missing_root_keys_mean_empty() {
        let doc: Document = serde_json::from_str("{}").unwrap();
        assert!(doc.users.is_empty());
        assert!(doc.shared_playlists.is_empty());
    }

    #[test]
    fn shared_playlists_key_is_not_a_user() {
        let raw = r#"{
            "42": { "Mix": [] },
            "shared_playlists": { "t": {"user_id": "42", "playlist_name": "Mix"} }
        }"#;
        let doc: Document = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.users.len(), 1);
        assert!(doc.users.contains_key("42"));
        assert_eq!(doc.shared_playlists.len(), 1);
    }

    #[test]
    fn round_trip_preserves_everything() {
        let raw = r#"{
            "7": {
                "Road Trip": [
                    {"file_id": "A", "file_name": "x.mp3"},
                    {"file_id": "B", "file_name": "y.mp3"}
                ],
                "Empty": []
            },
            "8": {},
            "shared_playlists": { "t1": {"user_id": "7", "playlist_name": "Road Trip"} }
        }"#;
        let doc: Document = serde_json::from_str(raw).unwrap();
        let back: Document = serde_json::from_str(&serde_json::to_string(&doc).unwrap()).unwrap();
        assert_eq!(doc, back);
    }

    #[test]
    fn song_without_file_name_gets_placeholder() {
        let song: Song = serde_json::from_str(r#"{"file_id": "A"}"#).unwrap();
        assert_eq!(song.file_name, UNKNOWN_FILE_NAME);
    }
}
