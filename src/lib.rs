//! # tile-r-drive
//!
//! Fixed-grid tile storage. Each zoom level is one file: a memory-mapped
//! index of 10-byte datapointers, one per tile of the `2^zoom x 2^zoom` grid,
//! followed by an append-only region of tile bodies. Identical bodies written
//! during one session are stored once.
//!
//! ```
//! use tile_r_drive::TileMap;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! let path = dir.path().join("2.tiles");
//!
//! let map = TileMap::open(&path, 2, false).unwrap();
//! map.add(2, 3, b"tile bytes").unwrap();
//! assert_eq!(map.get_tile(2, 3).unwrap().as_deref(), Some(&b"tile bytes"[..]));
//! assert_eq!(map.get_tile(0, 0).unwrap(), None);
//! map.close().unwrap();
//! ```

pub mod storage_engine;
pub use storage_engine::*;

pub mod cli;
pub mod utils;
