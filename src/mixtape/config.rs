use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_DATA_FILE: &str = "music_data.json";
const DEFAULT_SHARE_HOST: &str = "t.me";

/// Bot configuration, stored as JSON. Every field has a default so a
/// partial (or missing) file just fills in the rest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BotConfig {
    /// Path of the JSON data file holding the playlist document.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Host used when building share links.
    #[serde(default = "default_share_host")]
    pub share_host: String,

    /// Surface persistence failures instead of logging and reporting
    /// success (see [`crate::api::Durability`]).
    #[serde(default)]
    pub strict_durability: bool,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_share_host() -> String {
    DEFAULT_SHARE_HOST.to_string()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            share_host: default_share_host(),
            strict_durability: false,
        }
    }
}

impl BotConfig {
    /// Load config from the given file, or return defaults if it does not
    /// exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: BotConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = BotConfig::default();
        assert_eq!(config.data_file, PathBuf::from("music_data.json"));
        assert_eq!(config.share_host, "t.me");
        assert!(!config.strict_durability);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BotConfig::load(dir.path().join("nope.json")).unwrap();
        assert_eq!(config, BotConfig::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"share_host": "example.org"}"#).unwrap();

        let config = BotConfig::load(&path).unwrap();
        assert_eq!(config.share_host, "example.org");
        assert_eq!(config.data_file, PathBuf::from("music_data.json"));
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = BotConfig {
            data_file: PathBuf::from("elsewhere.json"),
            share_host: "example.org".to_string(),
            strict_durability: true,
        };
        config.save(&path).unwrap();
        assert_eq!(BotConfig::load(&path).unwrap(), config);
    }
}
