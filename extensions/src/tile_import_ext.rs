use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::Path;
use tile_r_drive::utils::parse_tile_path;
use tile_r_drive::{Result, TilePyramid, TileStoreError};
use tracing::{debug, info};

/// Read buffer used by `import_tar_file` (1 MiB).
pub const TAR_READ_BUFFER_SIZE: usize = 1 << 20;

/// Counts reported by an import run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Tiles handed to the pyramid.
    pub added: u64,

    /// Tiles ignored because their zoom is above `max_zoom`.
    pub skipped: u64,
}

/// Loads pre-rendered `<zoom>/<x>/<y>.png` tiles into a writable pyramid.
///
/// Maps are opened on demand, one per zoom encountered. Any tile name that
/// does not follow the naming scheme aborts the import with
/// `InvalidTilePath`; tiles already added stay in the pyramid.
pub trait TilePyramidImportExt {
    /// Imports every regular file of a tar stream.
    ///
    /// # Arguments
    /// - `reader`: The tar stream (uncompressed).
    /// - `max_zoom`: Tiles above this zoom are skipped.
    fn import_tar<R: Read>(&self, reader: R, max_zoom: u8) -> Result<ImportSummary>;

    /// Opens a tar archive on disk behind a `TAR_READ_BUFFER_SIZE` buffer and
    /// imports it with [`Self::import_tar`].
    fn import_tar_file<P: AsRef<Path>>(&self, path: P, max_zoom: u8) -> Result<ImportSummary>;

    /// Recursively walks `base_dir` and imports every regular file. Names are
    /// the Unix-style paths relative to `base_dir`.
    fn import_dir<P: AsRef<Path>>(&self, base_dir: P, max_zoom: u8) -> Result<ImportSummary>;
}

impl TilePyramidImportExt for TilePyramid {
    fn import_tar<R: Read>(&self, reader: R, max_zoom: u8) -> Result<ImportSummary> {
        let mut archive = tar::Archive::new(reader);
        let mut summary = ImportSummary::default();

        for entry in archive.entries()? {
            let mut entry = entry?;
            if !entry.header().entry_type().is_file() {
                continue;
            }

            let name = entry.path()?.to_string_lossy().into_owned();
            let (zoom, x, y) = parse_tile_path(&name)?;
            if zoom > max_zoom {
                summary.skipped += 1;
                continue;
            }

            let mut body = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut body)?;
            self.add(zoom, x, y, &body)?;
            summary.added += 1;
            debug!("Imported {} ({} bytes)", name, body.len());
        }

        info!(
            "Tar import finished: {} added, {} skipped",
            summary.added, summary.skipped
        );
        Ok(summary)
    }

    fn import_tar_file<P: AsRef<Path>>(&self, path: P, max_zoom: u8) -> Result<ImportSummary> {
        let file = File::open(path.as_ref())?;
        self.import_tar(BufReader::with_capacity(TAR_READ_BUFFER_SIZE, file), max_zoom)
    }

    fn import_dir<P: AsRef<Path>>(&self, base_dir: P, max_zoom: u8) -> Result<ImportSummary> {
        let base = base_dir.as_ref();
        if !base.is_dir() {
            return Err(TileStoreError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Directory does not exist: {}", base.display()),
            )));
        }

        let mut summary = ImportSummary::default();

        for entry in walkdir::WalkDir::new(base).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let rel_path = path
                .strip_prefix(base)
                .map_err(|_| TileStoreError::InvalidTilePath(path.display().to_string()))?;
            let name = to_unix_path(rel_path);

            let (zoom, x, y) = parse_tile_path(&name)?;
            if zoom > max_zoom {
                summary.skipped += 1;
                continue;
            }

            let body = fs::read(path)?;
            self.add(zoom, x, y, &body)?;
            summary.added += 1;
            debug!("Imported {} ({} bytes)", name, body.len());
        }

        info!(
            "Directory import finished: {} added, {} skipped",
            summary.added, summary.skipped
        );
        Ok(summary)
    }
}

fn to_unix_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
