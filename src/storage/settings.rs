//! Settings storage
//!
//! Manages persistence of user preferences and application settings.

use crate::storage::{get_data_dir, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default random quote endpoint
pub const DEFAULT_API_URL: &str = "https://api.quotable.io/random";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const MAX_TIMEOUT_SECS: u64 = 120;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSettings {
    /// Endpoint returning one random quote as JSON
    pub api_url: String,
    /// Timeout for a single quote fetch, in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// User-Agent header sent with every fetch
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Directory holding the key-value files (defaults to `<data_dir>/store`)
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    format!("Quotebook/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
            storage_dir: None,
        }
    }
}

impl QuoteSettings {
    /// Validate settings values
    ///
    /// Repairs anything that would make the client unusable.
    pub fn validate(&mut self) {
        let url = self.api_url.trim();
        if url.is_empty() || reqwest::Url::parse(url).is_err() {
            tracing::warn!("Invalid api_url {:?}, using default", self.api_url);
            self.api_url = DEFAULT_API_URL.to_string();
        } else if url.len() != self.api_url.len() {
            self.api_url = url.to_string();
        }

        self.request_timeout_secs = self.request_timeout_secs.clamp(1, MAX_TIMEOUT_SECS);

        if self.user_agent.trim().is_empty() {
            self.user_agent = default_user_agent();
        }

        if matches!(&self.storage_dir, Some(dir) if dir.as_os_str().is_empty()) {
            self.storage_dir = None;
        }
    }

    /// Directory the key-value store should live in
    pub fn resolved_storage_dir(&self) -> Result<PathBuf, StorageError> {
        match &self.storage_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(get_data_dir()?.join("store")),
        }
    }
}

/// Get the settings file path
fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join("settings.json"))
}

/// Load settings from disk
///
/// Returns default settings if the file doesn't exist or is corrupted. On first run
/// the defaults are written out so they can be edited.
pub fn load_settings() -> QuoteSettings {
    let loaded = get_settings_path().and_then(|path| load_or_create_settings(&path));
    match loaded {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            QuoteSettings::default()
        }
    }
}

fn load_or_create_settings(path: &Path) -> Result<QuoteSettings, StorageError> {
    if path.exists() {
        return load_settings_from(path);
    }

    let settings = QuoteSettings::default();
    if let Err(e) = save_settings_to(&settings, path) {
        tracing::warn!("Failed to write default settings: {}", e);
    }
    Ok(settings)
}

/// Load settings from a specific file
pub fn load_settings_from(path: &Path) -> Result<QuoteSettings, StorageError> {
    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(QuoteSettings::default());
    }

    let json = fs::read_to_string(path)?;
    let mut settings: QuoteSettings = serde_json::from_str(&json)?;
    settings.validate();

    tracing::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Save settings to a specific file
pub fn save_settings_to(settings: &QuoteSettings, path: &Path) -> Result<(), StorageError> {
    // Ensure the parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;

    tracing::debug!("Saved settings to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = QuoteSettings::default();
        assert_eq!(settings.api_url, "https://api.quotable.io/random");
        assert_eq!(settings.request_timeout_secs, 10);
        assert!(settings.user_agent.starts_with("Quotebook/"));
        assert!(settings.storage_dir.is_none());
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = QuoteSettings::default();

        settings.api_url = "not a url".to_string();
        settings.validate();
        assert_eq!(settings.api_url, DEFAULT_API_URL);

        settings.api_url = "  http://localhost:8080/random  ".to_string();
        settings.validate();
        assert_eq!(settings.api_url, "http://localhost:8080/random");

        settings.request_timeout_secs = 0;
        settings.validate();
        assert_eq!(settings.request_timeout_secs, 1);

        settings.request_timeout_secs = 10_000;
        settings.validate();
        assert_eq!(settings.request_timeout_secs, 120);

        settings.user_agent = "   ".to_string();
        settings.validate();
        assert!(settings.user_agent.starts_with("Quotebook/"));

        settings.storage_dir = Some(PathBuf::new());
        settings.validate();
        assert!(settings.storage_dir.is_none());
    }

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let json = r#"{"api_url": "http://localhost:9000/quote"}"#;
        let settings: QuoteSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.api_url, "http://localhost:9000/quote");
        assert_eq!(settings.request_timeout_secs, 10);
        assert!(settings.storage_dir.is_none());
    }

    #[test]
    fn test_settings_persistence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("settings.json");

        let mut settings = QuoteSettings::default();
        settings.api_url = "http://localhost:9000/quote".to_string();
        settings.storage_dir = Some(dir.path().join("store"));
        save_settings_to(&settings, &path).unwrap();

        let loaded = load_settings_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_settings_from(&dir.path().join("settings.json")).unwrap();
        assert_eq!(loaded, QuoteSettings::default());
    }

    #[test]
    fn test_first_run_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let created = load_or_create_settings(&path).unwrap();
        assert_eq!(created, QuoteSettings::default());
        assert!(path.exists());
        assert_eq!(load_settings_from(&path).unwrap(), created);
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"api_url": "http://localhost:9000/quote"}"#).unwrap();

        let loaded = load_or_create_settings(&path).unwrap();
        assert_eq!(loaded.api_url, "http://localhost:9000/quote");
        assert!(fs::read_to_string(&path).unwrap().contains("localhost:9000"));
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_settings_from(&path), Err(StorageError::Json(_))));
    }

    #[test]
    fn test_explicit_storage_dir_wins() {
        let mut settings = QuoteSettings::default();
        settings.storage_dir = Some(PathBuf::from("/tmp/quotes"));
        assert_eq!(
            settings.resolved_storage_dir().unwrap(),
            PathBuf::from("/tmp/quotes")
        );
    }
}
