use super::Store;
use crate::error::Result;
use crate::model::Document;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// File-based document storage: the whole document in one JSON file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Store for FileStore {
    fn load(&self) -> Document {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Document::default(),
            Err(e) => {
                tracing::error!("Could not read {}: {}", self.path.display(), e);
                return Document::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(doc) => doc,
            Err(e) => {
                // The file might be corrupted; start cold rather than fail.
                tracing::error!("Could not decode {}: {}", self.path.display(), e);
                Document::default()
            }
        }
    }

    fn save(&self, doc: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(doc)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}
