use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use easel_config::MediaConfig;
use tempfile::NamedTempFile;

use crate::data::{decode_data_url, normalize_base64_data, sanitize_file_stem};
use crate::error::{MediaError, Result};
use crate::library::{Asset, LocalMediaLibrary, MediaLibrary};
use crate::share::{OutboxShareTarget, ShareTarget};

/// Saves and shares generated images
///
/// Every operation writes the decoded image to a temporary file in the
/// cache directory, which is removed before the operation returns.
pub struct MediaStore {
    library: Arc<dyn MediaLibrary>,
    share_target: Option<Arc<dyn ShareTarget>>,
    cache_dir: PathBuf,
    album_name: String,
}

impl MediaStore {
    pub fn new(
        library: Arc<dyn MediaLibrary>,
        share_target: Option<Arc<dyn ShareTarget>>,
        cache_dir: impl Into<PathBuf>,
        album_name: impl Into<String>,
    ) -> Self {
        Self {
            library,
            share_target,
            cache_dir: cache_dir.into(),
            album_name: album_name.into(),
        }
    }

    /// Local library and outbox described by `config`
    pub fn from_config(config: &MediaConfig) -> Self {
        let share_target = config
            .share_dir
            .as_ref()
            .map(|dir| Arc::new(OutboxShareTarget::new(dir)) as Arc<dyn ShareTarget>);

        Self::new(
            Arc::new(LocalMediaLibrary::new(&config.library_dir)),
            share_target,
            config.cache_dir(),
            config.album_name.clone(),
        )
    }

    pub fn album_name(&self) -> &str {
        &self.album_name
    }

    /// Save an image into the album
    ///
    /// # Errors
    ///
    /// - [`MediaError::PermissionDenied`] when the library refuses writes
    /// - [`MediaError::InvalidImageData`] or [`MediaError::Decode`] for a bad payload
    /// - [`MediaError::Io`] when writing or importing fails
    pub fn persist(&self, image_data: &str, filename: &str) -> Result<Asset> {
        self.library.request_write_permission().inspect_err(|e| {
            tracing::warn!(error = %e, "media library permission denied");
        })?;

        let (temp, _) = self.write_temp(image_data, filename)?;

        let asset = self.library.create_asset(temp.path())?;
        match self.library.find_album(&self.album_name)? {
            Some(album) => self.library.add_to_album(&album, &asset)?,
            None => {
                self.library.create_album(&self.album_name, &asset)?;
            }
        }

        temp.close()?;

        tracing::info!(asset_id = %asset.id, album = %self.album_name, "image saved");
        Ok(asset)
    }

    /// Hand an image to the share target
    ///
    /// # Errors
    ///
    /// - [`MediaError::SharingUnavailable`] without a usable share target
    /// - [`MediaError::InvalidImageData`] or [`MediaError::Decode`] for a bad payload
    /// - [`MediaError::Io`] when writing or sharing fails
    pub fn share(&self, image_data: &str, filename: &str) -> Result<()> {
        let target = self
            .share_target
            .as_ref()
            .filter(|target| target.is_available())
            .ok_or(MediaError::SharingUnavailable)?;

        let (temp, mime_type) = self.write_temp(image_data, filename)?;
        target.share(temp.path(), &mime_type)?;
        temp.close()?;

        Ok(())
    }

    /// Assets in the album, newest first
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::Io`] if the library cannot be read
    pub fn gallery(&self) -> Result<Vec<Asset>> {
        let Some(album) = self.library.find_album(&self.album_name)? else {
            return Ok(Vec::new());
        };

        let mut assets = self.library.album_assets(&album)?;
        assets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(assets)
    }

    /// Decode `image_data` into a temporary file named after `filename`
    ///
    /// The file is deleted when the returned handle is dropped
    fn write_temp(&self, image_data: &str, filename: &str) -> Result<(NamedTempFile, String)> {
        let url = normalize_base64_data(image_data)
            .ok_or_else(|| MediaError::InvalidImageData("image data is empty".to_string()))?;
        let image = decode_data_url(&url)?;

        std::fs::create_dir_all(&self.cache_dir).map_err(|e| MediaError::from_io("cache directory", e))?;

        let mut temp = tempfile::Builder::new()
            .prefix(&format!("{}-", sanitize_file_stem(filename)))
            .suffix(&format!(".{}", image.extension()))
            .tempfile_in(&self.cache_dir)
            .map_err(|e| MediaError::from_io("temporary file", e))?;
        temp.write_all(&image.bytes)?;
        temp.flush()?;

        tracing::debug!(path = %temp.path().display(), bytes = image.bytes.len(), "image written to temporary file");

        Ok((temp, image.mime_type))
    }
}
