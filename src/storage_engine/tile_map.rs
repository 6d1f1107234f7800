use crate::storage_engine::copy_on_write::CopyOnWriteControl;
use crate::storage_engine::dedup_index::DedupIndex;
use crate::storage_engine::digest::compute_content_hash;
use crate::storage_engine::index_region::IndexRegion;
use crate::storage_engine::positioned_io::{read_exact_at, write_at};
use crate::storage_engine::preallocate::ensure_size;
use crate::storage_engine::tile_grid::*;
use crate::storage_engine::{
    Datapointer, MAX_DATAPOINTER_OFFSET, Result, TileMapOptions, TileStoreError,
};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, trace, warn};

/// Storage for one zoom level: a fixed grid of `2^zoom x 2^zoom` tiles.
///
/// ## File Layout
///
/// - **Bytes `0` → `tile_count * 10`**: index region, one [`Datapointer`] slot
///   per tile id (`x * 2^zoom + y`). Memory-mapped for the life of the handle.
/// - **Bytes `tile_count * 10` → EOF**: data region, tile bodies appended
///   back-to-back. Bodies are written and read with positioned file I/O,
///   never through the mapping.
///
/// ## Concurrency
///
/// One `RwLock` guards the mapping, the file handle, the write cursor and the
/// dedup index. `get_tile` takes the shared lock, so readers run in parallel.
/// `add` holds the exclusive lock for the whole call (hash, append, slot
/// write), which blocks readers until it finishes.
///
/// A single process is expected to write a given file.
pub struct TileMap {
    path: PathBuf,
    zoom: u8,
    options: TileMapOptions,
    state: RwLock<MapState>,
}

enum MapState {
    Open(OpenMap),
    Closed,
}

struct OpenMap {
    file: File,
    index: IndexRegion,

    /// End of the data region. Equal to EOF at open and advanced by every append.
    write_cursor: u64,

    /// Created on the first `add` of this session.
    dedup: Option<DedupIndex>,
}

/// Point-in-time summary of a tile map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMapStats {
    pub zoom: u8,
    pub dimension: u64,
    pub slots: u64,
    pub written_slots: u64,
    pub index_region_len: u64,
    pub data_region_len: u64,
    pub file_len: u64,
    pub read_only: bool,
}

impl std::fmt::Debug for TileMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileMap")
            .field("path", &self.path)
            .field("zoom", &self.zoom)
            .field("read_only", &self.options.read_only)
            .finish_non_exhaustive()
    }
}

impl TileMap {
    /// Opens the tile file for `zoom` at `path`.
    ///
    /// Read-write mode creates the file if needed and grows it to the size of
    /// the index region. Read-only mode requires an existing file that is at
    /// least that large and never changes it.
    ///
    /// # Returns:
    /// - `Ok(TileMap)`: An open handle, with its write cursor at end-of-file.
    /// - `Err(TileStoreError)`: `InvalidDimension` for a zoom above 16,
    ///   `InvalidPath` for an empty path, `FileOpen` if the file cannot be
    ///   opened, `InvalidRegionSize` for an undersized file.
    pub fn open<P: AsRef<Path>>(path: P, zoom: u8, read_only: bool) -> Result<Self> {
        Self::open_with_options(path, zoom, TileMapOptions::new().read_only(read_only))
    }

    /// Same as [`TileMap::open`], with explicit options.
    pub fn open_with_options<P: AsRef<Path>>(
        path: P,
        zoom: u8,
        options: TileMapOptions,
    ) -> Result<Self> {
        let path = path.as_ref();
        validate_zoom(zoom)?;
        if path.as_os_str().is_empty() {
            return Err(TileStoreError::InvalidPath);
        }

        let required = index_region_len(zoom);

        let (file, index) = if options.read_only {
            let file = File::open(path).map_err(|source| TileStoreError::FileOpen {
                path: path.to_path_buf(),
                source,
            })?;

            let actual = file.metadata()?.len();
            if actual < required {
                return Err(TileStoreError::InvalidRegionSize { required, actual });
            }

            let index = IndexRegion::map_read_only(&file, required)?;
            (file, index)
        } else {
            let file = Self::open_file_in_write_mode(path)?;
            Self::disable_copy_on_write(options.copy_on_write.as_ref(), &file, path);

            let size = ensure_size(&file, required, options.preallocation)?;
            debug!(
                "Prepared {} for zoom {}: index region {} bytes, file {} bytes.",
                path.display(),
                zoom,
                required,
                size
            );

            let index = IndexRegion::map_read_write(&file, required)?;
            (file, index)
        };

        let eof = file.metadata()?.len();
        if eof < required {
            return Err(TileStoreError::InvalidRegionSize {
                required,
                actual: eof,
            });
        }

        debug!(
            "Opened {} (zoom {}, {}), data region ends at {}.",
            path.display(),
            zoom,
            if options.read_only { "read-only" } else { "read-write" },
            eof
        );

        Ok(Self {
            path: path.to_path_buf(),
            zoom,
            options,
            state: RwLock::new(MapState::Open(OpenMap {
                file,
                index,
                write_cursor: eof,
                dedup: None,
            })),
        })
    }

    fn open_file_in_write_mode(path: &Path) -> Result<File> {
        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|source| TileStoreError::FileOpen {
                path: path.to_path_buf(),
                source,
            })
    }

    fn disable_copy_on_write(control: &dyn CopyOnWriteControl, file: &File, path: &Path) {
        if let Err(err) = control.disable_copy_on_write(file) {
            debug!(
                "Could not disable copy-on-write for {}: {}",
                path.display(),
                err
            );
        }
    }

    /// Stores `body` as the tile at `(x, y)`.
    ///
    /// If a body with the same content hash was already stored during this
    /// session, the slot is pointed at the existing bytes and nothing is
    /// appended. Otherwise the body is appended to the data region.
    ///
    /// Writing a coordinate again replaces its datapointer; the previously
    /// appended bytes stay in the file.
    ///
    /// # Returns:
    /// - `Ok(())`: The datapointer for `(x, y)` has been written.
    /// - `Err(TileStoreError)`: `ReadOnly`, `Closed`, `InvalidCoordinate`,
    ///   `InvalidTileBuffer`, `PartialWrite`, or `TileIo` with the coordinates.
    pub fn add(&self, x: u32, y: u32, body: &[u8]) -> Result<()> {
        let mut guard = self.write_state()?;
        let MapState::Open(open) = &mut *guard else {
            return Err(TileStoreError::Closed);
        };

        if self.options.read_only {
            return Err(TileStoreError::ReadOnly);
        }
        validate_coordinate(self.zoom, x, y)?;
        validate_tile_buffer(body)?;

        let OpenMap {
            file,
            index,
            write_cursor,
            dedup,
        } = open;
        let dedup = dedup.get_or_insert_with(|| DedupIndex::for_zoom(self.zoom));

        let tid = tile_id(self.zoom, x, y);
        let content_hash = compute_content_hash(body, self.options.content_hash_seed);

        let existing = match dedup.get(content_hash) {
            Some(entry) if self.options.verify_dedup => {
                let mut stored = vec![0u8; entry.pointer.size as usize];
                read_exact_at(file, &mut stored, entry.pointer.offset)
                    .map_err(|source| self.tile_io(x, y, source))?;
                (stored == body).then_some(entry)
            }
            entry => entry,
        };

        let pointer = match existing {
            Some(entry) => {
                trace!(
                    "Dedup hit for {}/{}/{}: sharing body of tile id {}.",
                    self.zoom, x, y, entry.tile_id
                );
                entry.pointer
            }
            None => {
                let pointer = self.append_body(file, write_cursor, x, y, body)?;
                // On a verified collision the first body keeps the hash.
                if !self.options.verify_dedup || dedup.get(content_hash).is_none() {
                    dedup.insert(content_hash, tid, pointer);
                }
                pointer
            }
        };

        index.write_datapointer(tid, pointer)
    }

    fn append_body(
        &self,
        file: &File,
        write_cursor: &mut u64,
        x: u32,
        y: u32,
        body: &[u8],
    ) -> Result<Datapointer> {
        let offset = *write_cursor;
        let end = offset + body.len() as u64;
        if end > MAX_DATAPOINTER_OFFSET {
            return Err(TileStoreError::OffsetOverflow { offset });
        }

        let mut written = 0usize;
        while written < body.len() {
            match write_at(file, &body[written..], offset + written as u64) {
                Ok(0) => {
                    return Err(TileStoreError::PartialWrite {
                        expected: body.len(),
                        written,
                    });
                }
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(source) => return Err(self.tile_io(x, y, source)),
            }
        }

        *write_cursor = end;
        Ok(Datapointer::new(offset, body.len() as u32))
    }

    /// Reads the tile at `(x, y)`.
    ///
    /// # Returns:
    /// - `Ok(Some(bytes))`: The stored body.
    /// - `Ok(None)`: The slot was never written.
    /// - `Err(TileStoreError)`: `InvalidCoordinate`, `Closed`,
    ///   `InvalidDatapointer` if the slot points outside the data region, or
    ///   `TileIo` if the read fails.
    pub fn get_tile(&self, x: u32, y: u32) -> Result<Option<Vec<u8>>> {
        let guard = self.read_state()?;
        let MapState::Open(open) = &*guard else {
            return Err(TileStoreError::Closed);
        };

        validate_coordinate(self.zoom, x, y)?;
        let pointer = open.index.read_datapointer(tile_id(self.zoom, x, y))?;
        if pointer.is_unset() {
            return Ok(None);
        }

        let data_start = open.index.len();
        let data_end = open.write_cursor;
        if pointer.size == 0 || pointer.offset < data_start || pointer.end() > data_end {
            return Err(TileStoreError::InvalidDatapointer {
                start: pointer.offset,
                end: pointer.end(),
                data_start,
                data_end,
            });
        }

        let mut body = vec![0u8; pointer.size as usize];
        read_exact_at(&open.file, &mut body, pointer.offset)
            .map_err(|source| self.tile_io(x, y, source))?;

        Ok(Some(body))
    }

    /// Releases the dedup index, the mapping and the file handle.
    ///
    /// Writable maps flush the index region and sync the file first. If the
    /// flush fails the file is still closed and the flush error is returned;
    /// otherwise a failing sync is returned. Closing twice is a no-op.
    pub fn close(&self) -> Result<()> {
        let state = {
            let mut guard = self.write_state()?;
            std::mem::replace(&mut *guard, MapState::Closed)
        };

        let MapState::Open(open) = state else {
            return Ok(());
        };

        let OpenMap {
            file,
            index,
            write_cursor,
            dedup,
        } = open;
        drop(dedup);

        let read_only = self.options.read_only;
        let mapping_result = if read_only { Ok(()) } else { index.flush() };
        drop(index);

        let close_result = if read_only { Ok(()) } else { file.sync_all() };
        drop(file);

        let result = match (mapping_result, close_result) {
            (Err(e), _) => Err(TileStoreError::Io(e)),
            (Ok(()), Err(e)) => Err(TileStoreError::Io(e)),
            (Ok(()), Ok(())) => Ok(()),
        };

        match &result {
            Ok(()) => debug!(
                "Closed {} (zoom {}), data region ended at {}.",
                self.path.display(),
                self.zoom,
                write_cursor
            ),
            Err(err) => warn!("Error closing {}: {}", self.path.display(), err),
        }

        result
    }

    /// Returns a snapshot of the map's sizes and slot usage.
    pub fn stats(&self) -> Result<TileMapStats> {
        let guard = self.read_state()?;
        let MapState::Open(open) = &*guard else {
            return Err(TileStoreError::Closed);
        };

        let index_region_len = open.index.len();
        Ok(TileMapStats {
            zoom: self.zoom,
            dimension: grid_dimension(self.zoom),
            slots: tile_count(self.zoom),
            written_slots: open.index.count_written(),
            index_region_len,
            data_region_len: open.write_cursor.saturating_sub(index_region_len),
            file_len: open.file.metadata()?.len(),
            read_only: self.options.read_only,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn is_read_only(&self) -> bool {
        self.options.read_only
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state.read().as_deref(), Ok(MapState::Closed))
    }

    /// Offset at which the next new body will be appended.
    pub fn write_cursor(&self) -> Result<u64> {
        let guard = self.read_state()?;
        match &*guard {
            MapState::Open(open) => Ok(open.write_cursor),
            MapState::Closed => Err(TileStoreError::Closed),
        }
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, MapState>> {
        self.state.read().map_err(|_| TileStoreError::LockPoisoned)
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, MapState>> {
        self.state.write().map_err(|_| TileStoreError::LockPoisoned)
    }

    fn tile_io(&self, x: u32, y: u32, source: io::Error) -> TileStoreError {
        TileStoreError::TileIo {
            zoom: self.zoom,
            x,
            y,
            source,
        }
    }
}
