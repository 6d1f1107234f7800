pub mod constants;
pub use constants::*;

mod error;
pub use error::{Result, TileStoreError};

pub mod digest;

mod dedup_index;
pub use dedup_index::{DedupEntry, DedupIndex};

mod index_region;

mod positioned_io;

pub mod preallocate;
pub use preallocate::Preallocation;

pub mod copy_on_write;
pub use copy_on_write::{CopyOnWriteControl, NoCopyOnWriteControl, PlatformCopyOnWrite};

mod tile_grid;
pub use tile_grid::*;

mod tile_map_options;
pub use tile_map_options::TileMapOptions;

mod tile_map;
pub use tile_map::{TileMap, TileMapStats};

mod tile_pyramid;
pub use tile_pyramid::TilePyramid;

pub mod traits;

pub use tile_r_drive_datapointer::{Datapointer, DatapointerError};
