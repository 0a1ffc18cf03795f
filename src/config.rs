use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{error::PryError, search::SearchOptions};

/// Viewer preferences, read from `config.toml` in the user's config dir.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Characters of a string value shown before it is cut with `…`.
    pub string_preview_chars: usize,
    /// Characters of unparseable input shown in the error panel.
    pub error_preview_chars: usize,
    pub search: SearchOptions,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            string_preview_chars: 80,
            error_preview_chars: 200,
            search: SearchOptions::default(),
        }
    }
}

impl ViewerConfig {
    /// `<config dir>/pry/config.toml`, if the platform has a config dir.
    pub fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pry").join("config.toml"))
    }

    pub fn from_toml_str(text: &str) -> Result<Self, PryError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PryError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Like [`ViewerConfig::load`], but a missing or broken file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("ignoring config at {}: {e}", path.display());
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = ViewerConfig::from_toml_str("string_preview_chars = 40\n").unwrap();
        assert_eq!(config.string_preview_chars, 40);
        assert_eq!(config.error_preview_chars, 200);
        assert_eq!(config.search, SearchOptions::default());
    }

    #[test]
    fn search_table_is_read() {
        let config = ViewerConfig::from_toml_str("[search]\ncase_sensitive = true\nregex = true\n").unwrap();
        assert!(config.search.case_sensitive);
        assert!(config.search.regex);
        assert!(!config.search.whole_word);
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        let err = ViewerConfig::from_toml_str("string_preview_chars = \"many\"").unwrap_err();
        assert!(matches!(err, PryError::Config(_)));
    }

    #[test]
    fn load_or_default_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.toml");
        assert_eq!(ViewerConfig::load_or_default(&missing), ViewerConfig::default());

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[[[").unwrap();
        assert_eq!(ViewerConfig::load_or_default(&broken), ViewerConfig::default());

        let good = dir.path().join("good.toml");
        std::fs::write(&good, "error_preview_chars = 10\n").unwrap();
        assert_eq!(ViewerConfig::load(&good).unwrap().error_preview_chars, 10);
    }
}
