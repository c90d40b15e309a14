use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Location of the persisted settings store
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsConfig {
    /// Directory holding one JSON blob per storage key
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self { dir: default_dir() }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from("settings")
}
