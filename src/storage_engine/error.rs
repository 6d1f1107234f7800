use crate::storage_engine::constants::{MAX_TILE_SIZE, MAX_ZOOM};
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tile_r_drive_datapointer::DatapointerError;

pub type Result<T> = std::result::Result<T, TileStoreError>;

/// Errors surfaced by tile maps and tile pyramids.
///
/// Nothing is retried or repaired internally. Each variant carries enough
/// context (coordinates, offsets, sizes) to diagnose the failure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TileStoreError {
    #[error("invalid tile zoom {zoom}, must be between 0 and {}", MAX_ZOOM)]
    InvalidDimension { zoom: u8 },

    #[error("invalid path")]
    InvalidPath,

    #[error("invalid tile coordinate {x}/{y} for zoom {zoom}")]
    InvalidCoordinate { zoom: u8, x: u32, y: u32 },

    #[error("invalid tile buffer of {size} bytes, must be between 1 and {}", MAX_TILE_SIZE)]
    InvalidTileBuffer { size: usize },

    #[error("invalid tile id {tile_id}: slot end {slot_end} > {region_len}")]
    InvalidTileId {
        tile_id: u64,
        slot_end: u64,
        region_len: u64,
    },

    #[error(
        "invalid tile datapointer region size, file may be corrupt: need {required} bytes, file has {actual}"
    )]
    InvalidRegionSize { required: u64, actual: u64 },

    #[error(
        "datapointer invalid, file may be corrupt: {start:#x}:{end:#x} outside data region {data_start:#x}:{data_end:#x}"
    )]
    InvalidDatapointer {
        start: u64,
        end: u64,
        data_start: u64,
        data_end: u64,
    },

    #[error("data region offset {offset:#x} exceeds the 48-bit datapointer range")]
    OffsetOverflow { offset: u64 },

    #[error("partial write: {written} of {expected} bytes")]
    PartialWrite { expected: usize, written: usize },

    #[error("tile map is read-only")]
    ReadOnly,

    #[error("tile map is closed")]
    Closed,

    #[error("failed to acquire tile map lock")]
    LockPoisoned,

    #[error("invalid zoom range: {0}")]
    InvalidZoomRange(String),

    #[error("invalid tile path: {0}")]
    InvalidTilePath(String),

    #[error("tile map for zoom level {zoom} is already loaded")]
    DuplicateZoom { zoom: u8 },

    #[error("failed to open {}: {source}", .path.display())]
    FileOpen { path: PathBuf, source: io::Error },

    #[error("I/O failure on tile {zoom}/{x}/{y}: {source}")]
    TileIo {
        zoom: u8,
        x: u32,
        y: u32,
        source: io::Error,
    },

    #[error(transparent)]
    Codec(#[from] DatapointerError),

    #[error(transparent)]
    Io(#[from] io::Error),
}
