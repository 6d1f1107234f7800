use crate::storage_engine::constants::*;
use crate::storage_engine::{Result, TileStoreError};

/// Number of tiles along one edge of the grid at `zoom` (`2^zoom`).
#[inline]
pub fn grid_dimension(zoom: u8) -> u64 {
    1u64 << zoom
}

/// Total number of tile slots at `zoom` (`(2^zoom)^2`).
#[inline]
pub fn tile_count(zoom: u8) -> u64 {
    let dim = grid_dimension(zoom);
    dim * dim
}

/// Size in bytes of the index region for `zoom`; the data region starts here.
#[inline]
pub fn index_region_len(zoom: u8) -> u64 {
    tile_count(zoom) * DATAPOINTER_SIZE as u64
}

/// Linear slot index of `(x, y)` within the zoom's grid (`x * 2^zoom + y`).
///
/// Zoom 0 is a 1x1 grid and always maps to slot 0, whatever the coordinates.
/// Callers validate coordinates with [`validate_coordinate`] first.
#[inline]
pub fn tile_id(zoom: u8, x: u32, y: u32) -> u64 {
    let dim = grid_dimension(zoom);
    if dim == 1 {
        return 0;
    }
    x as u64 * dim + y as u64
}

/// Byte offset of a tile's datapointer slot within the index region.
#[inline]
pub fn slot_offset(tile_id: u64) -> u64 {
    tile_id * DATAPOINTER_SIZE as u64
}

pub fn validate_zoom(zoom: u8) -> Result<()> {
    if zoom > MAX_ZOOM {
        return Err(TileStoreError::InvalidDimension { zoom });
    }
    Ok(())
}

pub fn validate_coordinate(zoom: u8, x: u32, y: u32) -> Result<()> {
    let dim = grid_dimension(zoom);
    if x as u64 >= dim || y as u64 >= dim {
        return Err(TileStoreError::InvalidCoordinate { zoom, x, y });
    }
    Ok(())
}

pub fn validate_tile_buffer(body: &[u8]) -> Result<()> {
    if body.len() < MIN_TILE_SIZE || body.len() > MAX_TILE_SIZE {
        return Err(TileStoreError::InvalidTileBuffer { size: body.len() });
    }
    Ok(())
}
