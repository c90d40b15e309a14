use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Album that receives every saved image
pub const DEFAULT_ALBUM_NAME: &str = "AI Generated Images";

/// Local media library configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MediaConfig {
    /// Root directory of the media library
    #[serde(default = "default_library_dir")]
    pub library_dir: PathBuf,
    /// Scratch directory for temporary image files, defaults to the system temp dir
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    /// Directory that shared images are handed off to; sharing is unavailable without it
    #[serde(default)]
    pub share_dir: Option<PathBuf>,
    /// Album name, looked up by name on every save
    #[serde(default = "default_album_name")]
    pub album_name: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            library_dir: default_library_dir(),
            cache_dir: None,
            share_dir: None,
            album_name: default_album_name(),
        }
    }
}

impl MediaConfig {
    /// Scratch directory to create temporary files in
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

fn default_library_dir() -> PathBuf {
    PathBuf::from("media")
}

fn default_album_name() -> String {
    DEFAULT_ALBUM_NAME.to_string()
}
