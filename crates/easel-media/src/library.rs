use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{MediaError, Result};

/// Asset stored in the media library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Library-assigned identifier
    pub id: String,
    /// Name of the file the asset was imported from
    pub filename: String,
    /// Location of the stored copy
    pub path: PathBuf,
    pub created_at: Timestamp,
}

/// Named collection of assets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub title: String,
}

/// Device media store
///
/// Albums are looked up by title; renaming one outside the application
/// starts a new album on the next save
pub trait MediaLibrary: Send + Sync {
    /// Make sure the library accepts writes
    fn request_write_permission(&self) -> Result<()>;

    /// Import a file as a new asset
    fn create_asset(&self, file: &Path) -> Result<Asset>;

    fn find_album(&self, title: &str) -> Result<Option<Album>>;

    /// Create an album holding `asset`
    fn create_album(&self, title: &str, asset: &Asset) -> Result<Album>;

    fn add_to_album(&self, album: &Album, asset: &Asset) -> Result<()>;

    /// Assets of an album in insertion order
    fn album_assets(&self, album: &Album) -> Result<Vec<Asset>>;
}

/// On-disk album index
#[derive(Debug, Default, Serialize, Deserialize)]
struct AlbumIndex {
    albums: IndexMap<String, AlbumEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AlbumEntry {
    id: String,
    assets: Vec<Asset>,
}

/// Media library rooted in a directory
///
/// Assets are copied to `assets/<id>.<ext>`; albums live in `albums.json`
/// keyed by title
#[derive(Debug, Clone)]
pub struct LocalMediaLibrary {
    root: PathBuf,
}

impl LocalMediaLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn assets_dir(&self) -> PathBuf {
        self.root.join("assets")
    }

    fn index_path(&self) -> PathBuf {
        self.root.join("albums.json")
    }

    fn read_index(&self) -> Result<AlbumIndex> {
        match fs::read(self.index_path()) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| MediaError::Io(std::io::Error::other(e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AlbumIndex::default()),
            Err(e) => Err(MediaError::from_io("reading album index", e)),
        }
    }

    fn write_index(&self, index: &AlbumIndex) -> Result<()> {
        let json = serde_json::to_vec_pretty(index).map_err(|e| MediaError::Io(std::io::Error::other(e)))?;
        let mut file = NamedTempFile::new_in(&self.root).map_err(|e| MediaError::from_io("writing album index", e))?;
        file.write_all(&json)?;
        file.persist(self.index_path()).map_err(|e| MediaError::from_io("writing album index", e.error))?;
        Ok(())
    }
}

impl MediaLibrary for LocalMediaLibrary {
    fn request_write_permission(&self) -> Result<()> {
        let assets = self.assets_dir();
        fs::create_dir_all(&assets).map_err(|e| MediaError::from_io("media library", e))?;

        let metadata = fs::metadata(&assets).map_err(|e| MediaError::from_io("media library", e))?;
        if metadata.permissions().readonly() {
            return Err(MediaError::PermissionDenied(format!(
                "media library at {} is read-only",
                self.root.display()
            )));
        }
        Ok(())
    }

    fn create_asset(&self, file: &Path) -> Result<Asset> {
        let id = uuid::Uuid::new_v4().to_string();
        let filename = file
            .file_name()
            .map_or_else(|| id.clone(), |name| name.to_string_lossy().into_owned());
        let stored = match file.extension() {
            Some(ext) => self.assets_dir().join(format!("{id}.{}", ext.to_string_lossy())),
            None => self.assets_dir().join(&id),
        };

        fs::copy(file, &stored).map_err(|e| MediaError::from_io("importing asset", e))?;

        tracing::debug!(asset_id = %id, path = %stored.display(), "asset created");

        Ok(Asset {
            id,
            filename,
            path: stored,
            created_at: Timestamp::now(),
        })
    }

    fn find_album(&self, title: &str) -> Result<Option<Album>> {
        Ok(self.read_index()?.albums.get(title).map(|entry| Album {
            id: entry.id.clone(),
            title: title.to_string(),
        }))
    }

    fn create_album(&self, title: &str, asset: &Asset) -> Result<Album> {
        let mut index = self.read_index()?;
        let id = uuid::Uuid::new_v4().to_string();
        index.albums.insert(
            title.to_string(),
            AlbumEntry {
                id: id.clone(),
                assets: vec![asset.clone()],
            },
        );
        self.write_index(&index)?;

        tracing::info!(album = %title, "album created");

        Ok(Album {
            id,
            title: title.to_string(),
        })
    }

    fn add_to_album(&self, album: &Album, asset: &Asset) -> Result<()> {
        let mut index = self.read_index()?;
        let entry = index
            .albums
            .get_mut(&album.title)
            .ok_or_else(|| MediaError::Io(std::io::Error::other(format!("album '{}' no longer exists", album.title))))?;
        entry.assets.push(asset.clone());
        self.write_index(&index)
    }

    fn album_assets(&self, album: &Album) -> Result<Vec<Asset>> {
        Ok(self
            .read_index()?
            .albums
            .shift_remove(&album.title)
            .map(|entry| entry.assets)
            .unwrap_or_default())
    }
}
