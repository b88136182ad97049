use thiserror::Error;

#[derive(Error, Debug)]
pub enum MixtapeError {
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),

    #[error("Playlist already exists: {0}")]
    DuplicatePlaylist(String),

    #[error("Invalid song number: {0}")]
    InvalidSongNumber(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, MixtapeError>;
