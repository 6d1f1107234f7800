pub use tile_r_drive_datapointer::constants::*;

/// Highest supported zoom level. A zoom-16 grid is 65536 x 65536 tiles.
pub const MAX_ZOOM: u8 = 16;

/// Smallest tile body accepted by `add`.
pub const MIN_TILE_SIZE: usize = 1;

/// Largest tile body accepted by `add` (16 MiB).
pub const MAX_TILE_SIZE: usize = 1 << 24;

/// Cap on the initial capacity of the in-memory dedup map.
pub const MAX_DEDUP_INIT_CAPACITY: usize = 16_000_000;

/// Chunk size used when zero-filling a file that cannot be preallocated.
pub const ZERO_FILL_CHUNK_SIZE: usize = 64 * 1024; // 64 KB

/// Default seed for the content hash used by the dedup index.
pub const DEFAULT_CONTENT_HASH_SEED: u64 = 0xDEAD_BEEF_FEED_FEBE;

/// File extension of per-zoom tile files (`<zoom>.tiles`).
pub const TILES_EXTENSION: &str = "tiles";
