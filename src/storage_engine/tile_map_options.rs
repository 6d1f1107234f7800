use crate::storage_engine::constants::DEFAULT_CONTENT_HASH_SEED;
use crate::storage_engine::copy_on_write::{CopyOnWriteControl, PlatformCopyOnWrite};
use crate::storage_engine::preallocate::Preallocation;
use std::sync::Arc;

/// Knobs for opening a [`TileMap`](crate::TileMap).
///
/// ```
/// use tile_r_drive::{Preallocation, TileMapOptions};
///
/// let options = TileMapOptions::new()
///     .verify_dedup(true)
///     .preallocation(Preallocation::ZeroFill);
/// assert!(!options.is_read_only());
/// ```
#[derive(Debug, Clone)]
pub struct TileMapOptions {
    pub(crate) read_only: bool,
    pub(crate) content_hash_seed: u64,
    pub(crate) verify_dedup: bool,
    pub(crate) preallocation: Preallocation,
    pub(crate) copy_on_write: Arc<dyn CopyOnWriteControl>,
}

impl Default for TileMapOptions {
    fn default() -> Self {
        Self {
            read_only: false,
            content_hash_seed: DEFAULT_CONTENT_HASH_SEED,
            verify_dedup: false,
            preallocation: Preallocation::default(),
            copy_on_write: Arc::new(PlatformCopyOnWrite),
        }
    }
}

impl TileMapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the file without write access; `add` fails with `ReadOnly`.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Seed mixed into the content hash used for dedup.
    pub fn content_hash_seed(mut self, seed: u64) -> Self {
        self.content_hash_seed = seed;
        self
    }

    /// When enabled, a dedup hit compares stored bytes before sharing
    /// storage. A mismatch (hash collision) is stored as a new body.
    pub fn verify_dedup(mut self, verify: bool) -> Self {
        self.verify_dedup = verify;
        self
    }

    pub fn preallocation(mut self, strategy: Preallocation) -> Self {
        self.preallocation = strategy;
        self
    }

    /// Replaces the copy-on-write hint applied to writable files.
    pub fn copy_on_write(mut self, control: Arc<dyn CopyOnWriteControl>) -> Self {
        self.copy_on_write = control;
        self
    }

    #[inline]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    #[inline]
    pub fn get_content_hash_seed(&self) -> u64 {
        self.content_hash_seed
    }

    #[inline]
    pub fn is_verify_dedup(&self) -> bool {
        self.verify_dedup
    }

    #[inline]
    pub fn get_preallocation(&self) -> Preallocation {
        self.preallocation
    }
}
