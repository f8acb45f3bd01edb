//! Persistent storage
//!
//! This module handles all data persistence: the key-value backend, saved quotes and settings.

pub mod kv;
pub mod quotes;
pub mod settings;

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating or touching files in the data directory
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Could not determine the application data directory")]
    NoDataDir,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Get the application data directory
///
/// Linux: ~/.local/share/Quotebook
/// macOS: ~/Library/Application Support/com.Quotebook.Quotebook
/// Windows: %APPDATA%\Quotebook\Quotebook\data
pub fn get_data_dir() -> Result<PathBuf, StorageError> {
    directories::ProjectDirs::from("com", "Quotebook", "Quotebook")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StorageError::NoDataDir)
}
