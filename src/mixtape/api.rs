//! # API Facade
//!
//! [`MixtapeApi`] is the single mediating component through which every
//! read-modify-persist sequence flows. Mutating operations change the
//! in-memory document via the registry functions and then write the whole
//! document back through the [`Store`], so a per-user lock could later be
//! added here without touching any call site.
//!
//! ## Durability
//!
//! The default mode is [`Durability::BestEffort`], matching the observed
//! behavior this crate reproduces: a failed save is logged and the
//! operation still reports success, so the in-memory state and the
//! persisted state may diverge. [`Durability::Strict`] is the opt-in hook
//! for callers that want persistence failures surfaced instead.
//!
//! ## Concurrency
//!
//! The document is one shared mutable object with no locking. The facade
//! is built for a single logical thread of control; two interleaved
//! interactions for the same user can race on it, and the last save wins.

use crate::error::Result;
use crate::model::{Document, ShareEntry, Song};
use crate::store::Store;
use crate::{playlists, shares};

/// What to do when a save fails after a successful in-memory mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Durability {
    /// Log the failure and report success anyway.
    #[default]
    BestEffort,
    /// Propagate the failure to the caller.
    Strict,
}

pub struct MixtapeApi<S: Store> {
    doc: Document,
    store: S,
    durability: Durability,
}

impl<S: Store> MixtapeApi<S> {
    /// Load the document once; from here on the in-memory copy is the
    /// single source of truth for reads.
    pub fn load(store: S) -> Self {
        let doc = store.load();
        Self {
            doc,
            store,
            durability: Durability::default(),
        }
    }

    pub fn with_durability(mut self, durability: Durability) -> Self {
        self.durability = durability;
        self
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    fn persist(&self) -> Result<()> {
        match self.store.save(&self.doc) {
            Ok(()) => Ok(()),
            Err(e) => match self.durability {
                Durability::BestEffort => {
                    tracing::error!("Error saving data: {}", e);
                    Ok(())
                }
                Durability::Strict => Err(e),
            },
        }
    }

    /// Lazily create the user's record on first contact. Persists only
    /// when something was actually created.
    pub fn ensure_user(&mut self, user_id: &str) -> Result<()> {
        if playlists::ensure_user(&mut self.doc, user_id) {
            self.persist()?;
        }
        Ok(())
    }

    pub fn user_known(&self, user_id: &str) -> bool {
        playlists::user_known(&self.doc, user_id)
    }

    pub fn create_playlist(&mut self, user_id: &str, name: &str) -> Result<()> {
        playlists::create_playlist(&mut self.doc, user_id, name)?;
        self.persist()
    }

    pub fn playlist_names(&self, user_id: &str) -> Vec<String> {
        playlists::list_playlists(&self.doc, user_id)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn delete_playlist(&mut self, user_id: &str, name: &str) -> Result<()> {
        playlists::delete_playlist(&mut self.doc, user_id, name)?;
        self.persist()
    }

    pub fn add_song(&mut self, user_id: &str, name: &str, song: Song) -> Result<()> {
        playlists::add_song(&mut self.doc, user_id, name, song)?;
        self.persist()
    }

    pub fn songs(&self, user_id: &str, name: &str) -> Result<&[Song]> {
        playlists::songs(&self.doc, user_id, name)
    }

    pub fn delete_song(&mut self, user_id: &str, name: &str, number: usize) -> Result<Song> {
        let removed = playlists::delete_song(&mut self.doc, user_id, name, number)?;
        self.persist()?;
        Ok(removed)
    }

    pub fn share(&mut self, user_id: &str, name: &str) -> Result<String> {
        let token = shares::share(&mut self.doc, user_id, name);
        self.persist()?;
        Ok(token)
    }

    pub fn resolve_share(&self, token: &str) -> Option<&ShareEntry> {
        shares::resolve(&self.doc, token)
    }
}
