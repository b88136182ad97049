//! # Storage Layer
//!
//! The [`Store`] trait abstracts where the playlist document lives so the
//! rest of the crate never touches the filesystem directly.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage — one pretty-printed UTF-8 JSON
//!   file holding the whole document.
//! - [`memory::InMemoryStore`]: in-memory storage for tests, with a switch
//!   to simulate write failures.
//!
//! ## Contract
//!
//! `load` is best-effort recovery: a missing file is a cold start and an
//! unparseable file is logged and treated as a cold start. Neither is an
//! error to the caller, so startup never fails on bad data.
//!
//! `save` always rewrites the *entire* document, even when only one
//! sub-tree changed. There is no partial write and no atomicity; a crash
//! mid-write can corrupt the file. Whether a failed save is surfaced or
//! swallowed is decided one layer up (see [`crate::api::Durability`]),
//! not here.

use crate::error::Result;
use crate::model::Document;

pub mod fs;
pub mod memory;

/// Abstract interface for document persistence.
pub trait Store {
    /// Load the persisted document. Missing or corrupt data yields an
    /// empty document, never an error.
    fn load(&self) -> Document;

    /// Overwrite the backing store with the full document.
    fn save(&self, doc: &Document) -> Result<()>;
}
