use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::CoreError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
///
/// The OMDb API key is deliberately absent: it is read from the environment
/// when a client is built and never written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    /// Term searched while the query text is empty.
    pub default_term: String,
    /// Media type restriction applied to the default search only.
    pub default_media_type: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: marquee_api::DEFAULT_BASE_URL.into(),
            default_term: "batman".into(),
            default_media_type: Some("movie".into()),
            timeout_secs: 10,
        }
    }
}

impl ProviderConfig {
    pub fn base_url(&self) -> Result<Url, CoreError> {
        Url::parse(&self.base_url).map_err(|e| CoreError::Config(format!("invalid base_url: {e}")))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Options offered by the genre picker, besides "all genres".
    pub genres: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            genres: vec!["Action".into(), "Comedy".into(), "Drama".into()],
        }
    }
}

impl AppConfig {
    /// Load config: user file (if exists) merged over built-in defaults.
    pub fn load() -> Result<Self, CoreError> {
        let user_path = Self::config_path();
        if user_path.exists() {
            Self::load_from(&user_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load a config file. Missing sections and keys take their defaults.
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CoreError::Config(e.to_string()))?;
        toml::from_str(&content).map_err(|e| CoreError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), CoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CoreError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "marquee")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert_eq!(config.provider.base_url, marquee_api::DEFAULT_BASE_URL);
        assert_eq!(config.provider.default_term, "batman");
        assert_eq!(config.provider.default_media_type.as_deref(), Some("movie"));
        assert_eq!(config.provider.timeout(), Duration::from_secs(10));
        assert_eq!(config.search.genres, ["Action", "Comedy", "Drama"]);
    }

    #[test]
    fn test_builtin_file_matches_section_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.provider, ProviderConfig::default());
        assert_eq!(config.search, SearchConfig::default());
    }

    #[test]
    fn test_partial_user_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[provider]\ndefault_term = \"alien\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.provider.default_term, "alien");
        assert_eq!(config.provider.timeout_secs, 10);
        assert_eq!(config.search, SearchConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.search.genres.push("Horror".into());

        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_base_url() {
        let provider = ProviderConfig {
            base_url: "not a url".into(),
            ..Default::default()
        };
        assert!(matches!(provider.base_url(), Err(CoreError::Config(_))));
    }
}
