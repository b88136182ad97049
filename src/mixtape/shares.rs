//! Share registry: opaque token -> (owner, playlist name). An independent
//! namespace inside the same document. Entries are created once and never
//! mutated or expired; whether the playlist still exists is checked only
//! when a token is resolved.

use crate::model::{Document, ShareEntry};
use uuid::Uuid;

/// Deep-link payload prefix; a share link carries `playlist_<token>` as
/// its start parameter.
pub const SHARE_PAYLOAD_PREFIX: &str = "playlist_";

/// Register a share for a playlist and return the minted token. The
/// playlist is not required to exist, now or later.
pub fn share(doc: &mut Document, user_id: &str, playlist_name: &str) -> String {
    let token = Uuid::new_v4().to_string();
    doc.shared_playlists.insert(
        token.clone(),
        ShareEntry {
            user_id: user_id.to_string(),
            playlist_name: playlist_name.to_string(),
        },
    );
    token
}

/// Look a token up. Returns the entry as stored, which may point at a
/// playlist that has since been deleted.
pub fn resolve<'a>(doc: &'a Document, token: &str) -> Option<&'a ShareEntry> {
    doc.shared_playlists.get(token)
}

/// Build the user-visible share link for a token.
pub fn share_link(host: &str, bot_username: &str, token: &str) -> String {
    format!(
        "{}/{}?start={}{}",
        host, bot_username, SHARE_PAYLOAD_PREFIX, token
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlists;
    use crate::store::memory::fixtures::DocumentFixture;

    #[test]
    fn share_then_resolve() {
        let mut doc = DocumentFixture::new().with_playlist("U1", "Chill").doc;
        let token = share(&mut doc, "U1", "Chill");

        let entry = resolve(&doc, &token).unwrap();
        assert_eq!(entry.user_id, "U1");
        assert_eq!(entry.playlist_name, "Chill");
    }

    #[test]
    fn unknown_token_resolves_to_nothing() {
        let doc = Document::default();
        assert!(resolve(&doc, "nope").is_none());
    }

    #[test]
    fn tokens_are_unique() {
        let mut doc = Document::default();
        let a = share(&mut doc, "U1", "Chill");
        let b = share(&mut doc, "U1", "Chill");
        assert_ne!(a, b);
        assert_eq!(doc.shared_playlists.len(), 2);
    }

    #[test]
    fn deleted_playlist_leaves_share_dangling() {
        let mut doc = DocumentFixture::new().with_songs("U1", "Chill", 1).doc;
        let token = share(&mut doc, "U1", "Chill");

        playlists::delete_playlist(&mut doc, "U1", "Chill").unwrap();

        // The entry still resolves, but the playlist behind it is gone.
        let entry = resolve(&doc, &token).unwrap();
        assert_eq!(entry.playlist_name, "Chill");
        assert!(playlists::songs(&doc, "U1", "Chill").is_err());
    }

    #[test]
    fn share_link_format() {
        assert_eq!(
            share_link("t.me", "mix_bot", "abc"),
            "t.me/mix_bot?start=playlist_abc"
        );
    }
}
