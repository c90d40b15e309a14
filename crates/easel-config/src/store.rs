//! Persisted settings: one JSON blob per storage key
//!
//! Blobs are overwritten wholesale on every save and carry no schema version

use std::io::Write as _;
use std::path::{Path, PathBuf};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{ApiConfig, AuthConfig, Config};

/// Storage key of the last-saved configuration
pub const CONFIG_KEY: &str = "aws_config";

/// Storage key of cached credentials, removed by [`SettingsStore::clear`]
pub const CREDENTIALS_KEY: &str = "aws_credentials";

/// Settings store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing a blob failed
    #[error("settings io error: {0}")]
    Io(#[from] std::io::Error),

    /// A blob could not be encoded or decoded
    #[error("settings serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Refused to save a configuration that is missing required pieces
    #[error("incomplete configuration: {0}")]
    Incomplete(String),
}

/// Configuration snapshot as persisted under [`CONFIG_KEY`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoredConfig {
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    #[serde(default)]
    pub api: ApiConfig,
    /// When the snapshot was saved
    pub timestamp: Timestamp,
}

/// Key-value blob store backed by a directory
#[derive(Debug, Clone)]
pub struct SettingsStore {
    dir: PathBuf,
}

impl SettingsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a raw blob, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written
    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;

        // Write-then-rename so a crash never leaves a truncated blob
        let mut file = tempfile::NamedTempFile::new_in(&self.dir)?;
        file.write_all(value.as_bytes())?;
        file.persist(self.path_for(key)).map_err(|e| e.error)?;

        Ok(())
    }

    /// Read a raw blob
    ///
    /// # Errors
    ///
    /// Returns an error if the blob exists but cannot be read
    pub fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove several blobs; missing keys are ignored
    ///
    /// # Errors
    ///
    /// Returns an error if an existing blob cannot be removed
    pub fn remove_items(&self, keys: &[&str]) -> Result<(), StoreError> {
        for key in keys {
            match std::fs::remove_file(self.path_for(key)) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(())
    }

    /// Persist the identity and endpoint portion of a configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is incomplete or cannot be written
    pub fn save_config(&self, config: &Config) -> Result<StoredConfig, StoreError> {
        config
            .check_complete()
            .map_err(|e| StoreError::Incomplete(e.to_string()))?;

        let stored = StoredConfig {
            region: config.region.clone(),
            auth: config.auth.clone(),
            api: config.api.clone(),
            timestamp: Timestamp::now(),
        };

        self.set_item(CONFIG_KEY, &serde_json::to_string(&stored)?)?;

        tracing::debug!(dir = %self.dir.display(), "saved configuration");

        Ok(stored)
    }

    /// Load the last-saved configuration
    ///
    /// A missing or unreadable blob yields `None`; failures are logged
    pub fn load_config(&self) -> Option<StoredConfig> {
        let raw = match self.get_item(CONFIG_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!(error = %e, "failed to read saved configuration");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(stored) => Some(stored),
            Err(e) => {
                tracing::error!(error = %e, "failed to parse saved configuration");
                None
            }
        }
    }

    /// Remove saved configuration and cached credentials
    ///
    /// # Errors
    ///
    /// Returns an error if a blob cannot be removed
    pub fn clear(&self) -> Result<(), StoreError> {
        self.remove_items(&[CONFIG_KEY, CREDENTIALS_KEY])
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}
