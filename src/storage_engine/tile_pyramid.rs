use crate::storage_engine::constants::TILES_EXTENSION;
use crate::storage_engine::tile_grid::validate_zoom;
use crate::storage_engine::{Result, TileMap, TileMapOptions, TileStoreError};
use std::collections::BTreeMap;
use std::io;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A directory of tile maps, one `<zoom>.tiles` file per zoom level.
///
/// Each zoom's [`TileMap`] keeps its own lock; the pyramid only guards the
/// zoom → map table.
#[derive(Debug)]
pub struct TilePyramid {
    dir: PathBuf,
    options: TileMapOptions,
    maps: RwLock<BTreeMap<u8, Arc<TileMap>>>,
}

impl TilePyramid {
    /// `<dir>/<zoom>.tiles`
    pub fn tile_path<P: AsRef<Path>>(dir: P, zoom: u8) -> PathBuf {
        dir.as_ref().join(format!("{zoom}.{TILES_EXTENSION}"))
    }

    /// Parses the zoom level out of a `<zoom>.tiles` file name.
    ///
    /// # Returns:
    /// - `Ok(Some(zoom))`: For a `.tiles` file with a numeric stem.
    /// - `Ok(None)`: If the file does not have the `.tiles` extension.
    /// - `Err(TileStoreError)`: `InvalidTilePath` for a non-numeric stem,
    ///   `InvalidDimension` for a zoom above 16.
    pub fn zoom_from_path<P: AsRef<Path>>(path: P) -> Result<Option<u8>> {
        let path = path.as_ref();
        if path.extension().and_then(|ext| ext.to_str()) != Some(TILES_EXTENSION) {
            return Ok(None);
        }

        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| TileStoreError::InvalidTilePath(path.display().to_string()))?;

        let zoom: u8 = stem
            .parse()
            .map_err(|_| TileStoreError::InvalidTilePath(path.display().to_string()))?;
        validate_zoom(zoom)?;

        Ok(Some(zoom))
    }

    /// Opens every `<zoom>.tiles` file found under `dir` (recursively) read-only.
    ///
    /// Files without the `.tiles` extension are ignored. If any file fails to
    /// open, or two files claim the same zoom, the maps opened so far are
    /// closed and the error is returned.
    pub fn open_read_only<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let options = TileMapOptions::new().read_only(true);
        let mut maps = BTreeMap::new();

        if let Err(err) = Self::load_dir(dir, &options, &mut maps) {
            for map in maps.values() {
                if let Err(close_err) = map.close() {
                    warn!(
                        "Error closing {} after failed load: {}",
                        map.path().display(),
                        close_err
                    );
                }
            }
            return Err(err);
        }

        debug!(
            "Loaded {} tile maps from {}: zooms {:?}.",
            maps.len(),
            dir.display(),
            maps.keys().collect::<Vec<_>>()
        );

        Ok(Self {
            dir: dir.to_path_buf(),
            options,
            maps: RwLock::new(maps),
        })
    }

    fn load_dir(
        dir: &Path,
        options: &TileMapOptions,
        maps: &mut BTreeMap<u8, Arc<TileMap>>,
    ) -> Result<()> {
        if !dir.is_dir() {
            return Err(TileStoreError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Directory does not exist: {}", dir.display()),
            )));
        }

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(zoom) = Self::zoom_from_path(entry.path())? else {
                continue;
            };
            if maps.contains_key(&zoom) {
                return Err(TileStoreError::DuplicateZoom { zoom });
            }

            let map = TileMap::open_with_options(entry.path(), zoom, options.clone())?;
            maps.insert(zoom, Arc::new(map));
        }

        Ok(())
    }

    /// Opens (creating as needed) one writable map per zoom in `zooms`.
    pub fn create<P: AsRef<Path>>(dir: P, zooms: RangeInclusive<u8>) -> Result<Self> {
        let pyramid = Self::open_writable(dir)?;
        for zoom in zooms {
            pyramid.map_for_write(zoom)?;
        }
        Ok(pyramid)
    }

    /// A writable pyramid whose maps are opened the first time a zoom is written.
    pub fn open_writable<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Self::open_writable_with_options(dir, TileMapOptions::new())
    }

    pub fn open_writable_with_options<P: AsRef<Path>>(
        dir: P,
        options: TileMapOptions,
    ) -> Result<Self> {
        let dir = dir.as_ref();
        if dir.as_os_str().is_empty() {
            return Err(TileStoreError::InvalidPath);
        }
        if !dir.is_dir() {
            return Err(TileStoreError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Directory does not exist: {}", dir.display()),
            )));
        }

        Ok(Self {
            dir: dir.to_path_buf(),
            options: options.read_only(false),
            maps: RwLock::new(BTreeMap::new()),
        })
    }

    fn map_for_write(&self, zoom: u8) -> Result<Arc<TileMap>> {
        if let Some(map) = self.map(zoom)? {
            return Ok(map);
        }

        let mut maps = self.maps.write().map_err(|_| TileStoreError::LockPoisoned)?;
        // Another writer may have opened it while the lock was released.
        if let Some(map) = maps.get(&zoom) {
            return Ok(Arc::clone(map));
        }

        let map = Arc::new(TileMap::open_with_options(
            Self::tile_path(&self.dir, zoom),
            zoom,
            self.options.clone(),
        )?);
        maps.insert(zoom, Arc::clone(&map));
        Ok(map)
    }

    /// Stores a tile, opening the zoom's map on first use.
    pub fn add(&self, zoom: u8, x: u32, y: u32, body: &[u8]) -> Result<()> {
        if self.options.read_only {
            return Err(TileStoreError::ReadOnly);
        }
        validate_zoom(zoom)?;
        self.map_for_write(zoom)?.add(x, y, body)
    }

    /// Reads a tile; `Ok(None)` if the zoom has no map or the tile was never written.
    pub fn get_tile(&self, zoom: u8, x: u32, y: u32) -> Result<Option<Vec<u8>>> {
        match self.map(zoom)? {
            Some(map) => map.get_tile(x, y),
            None => Ok(None),
        }
    }

    pub fn map(&self, zoom: u8) -> Result<Option<Arc<TileMap>>> {
        let maps = self.maps.read().map_err(|_| TileStoreError::LockPoisoned)?;
        Ok(maps.get(&zoom).cloned())
    }

    /// Zoom levels that currently have an open map, ascending.
    pub fn zooms(&self) -> Result<Vec<u8>> {
        let maps = self.maps.read().map_err(|_| TileStoreError::LockPoisoned)?;
        Ok(maps.keys().copied().collect())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_read_only(&self) -> bool {
        self.options.read_only
    }

    /// Closes every map. Keeps going past failures and returns the last one.
    pub fn close(&self) -> Result<()> {
        let maps = self.maps.read().map_err(|_| TileStoreError::LockPoisoned)?;
        let mut result = Ok(());
        for map in maps.values() {
            if let Err(err) = map.close() {
                result = Err(err);
            }
        }
        result
    }
}
