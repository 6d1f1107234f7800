use crate::storage_engine::Result;

pub trait TileMapWriter {
    /// Stores `body` at `(x, y)`, sharing storage with identical bodies written
    /// earlier in the same session.
    ///
    /// # Parameters:
    /// - `x`, `y`: Grid coordinates, each in `[0, 2^zoom)`.
    /// - `body`: Between 1 byte and 16 MiB.
    ///
    /// # Returns:
    /// - `Ok(())`: The tile's datapointer has been written.
    /// - `Err(TileStoreError)`: On a read-only or closed store, invalid
    ///   input, a short write, or I/O failure.
    fn add(&self, x: u32, y: u32, body: &[u8]) -> Result<()>;
}

impl TileMapWriter for crate::storage_engine::TileMap {
    #[inline]
    fn add(&self, x: u32, y: u32, body: &[u8]) -> Result<()> {
        crate::storage_engine::TileMap::add(self, x, y, body)
    }
}
