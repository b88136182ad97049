use super::Store;
use crate::error::{MixtapeError, Result};
use crate::model::Document;
use std::cell::{Cell, RefCell};

/// In-memory document storage for tests. No persistence across instances.
#[derive(Default)]
pub struct InMemoryStore {
    doc: RefCell<Option<Document>>,
    fail_next_save: Cell<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(doc: Document) -> Self {
        Self {
            doc: RefCell::new(Some(doc)),
            fail_next_save: Cell::new(false),
        }
    }

    /// Make the next `save` call fail, to exercise the best-effort
    /// durability path.
    pub fn fail_next_save(&self) {
        self.fail_next_save.set(true);
    }

    /// The last document written, if any.
    pub fn saved(&self) -> Option<Document> {
        self.doc.borrow().clone()
    }
}

impl Store for InMemoryStore {
    fn load(&self) -> Document {
        self.doc.borrow().clone().unwrap_or_default()
    }

    fn save(&self, doc: &Document) -> Result<()> {
        if self.fail_next_save.take() {
            return Err(MixtapeError::Io(std::io::Error::other(
                "injected save failure",
            )));
        }
        *self.doc.borrow_mut() = Some(doc.clone());
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::model::{Document, ShareEntry, Song, UserRecord};

    /// Builder for documents used across the test suite.
    #[derive(Default)]
    pub struct DocumentFixture {
        pub doc: Document,
    }

    impl DocumentFixture {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_user(mut self, user_id: &str) -> Self {
            self.doc
                .users
                .entry(user_id.to_string())
                .or_insert_with(UserRecord::new);
            self
        }

        pub fn with_playlist(mut self, user_id: &str, name: &str) -> Self {
            self.doc
                .users
                .entry(user_id.to_string())
                .or_insert_with(UserRecord::new)
                .entry(name.to_string())
                .or_default();
            self
        }

        pub fn with_songs(mut self, user_id: &str, name: &str, count: usize) -> Self {
            let songs = self
                .doc
                .users
                .entry(user_id.to_string())
                .or_insert_with(UserRecord::new)
                .entry(name.to_string())
                .or_default();
            for i in 1..=count {
                songs.push(Song::new(
                    format!("file-{}", i),
                    Some(format!("song-{}.mp3", i)),
                ));
            }
            self
        }

        pub fn with_share(mut self, token: &str, user_id: &str, name: &str) -> Self {
            self.doc.shared_playlists.insert(
                token.to_string(),
                ShareEntry {
                    user_id: user_id.to_string(),
                    playlist_name: name.to_string(),
                },
            );
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::DocumentFixture;
    use super::*;
    use crate::error::MixtapeError;

    #[test]
    fn fresh_store_loads_empty() {
        let store = InMemoryStore::new();
        assert_eq!(store.load(), Document::default());
    }

    #[test]
    fn save_then_load() {
        let store = InMemoryStore::new();
        let doc = DocumentFixture::new().with_songs("1", "Chill", 2).doc;
        store.save(&doc).unwrap();
        assert_eq!(store.load(), doc);
    }

    #[test]
    fn injected_failure_hits_once() {
        let store = InMemoryStore::new();
        let doc = DocumentFixture::new().with_user("1").doc;

        store.fail_next_save();
        match store.save(&doc) {
            Err(MixtapeError::Io(_)) => {}
            other => panic!("Expected Io error, got {:?}", other),
        }
        // Nothing was written by the failed save.
        assert!(store.saved().is_none());

        store.save(&doc).unwrap();
        assert_eq!(store.saved(), Some(doc));
    }
}
