use crate::storage_engine::Result;

pub trait TileMapReader {
    /// Retrieves the body stored at `(x, y)`.
    ///
    /// Takes the store's shared lock; any number of readers may run at once.
    ///
    /// # Parameters:
    /// - `x`, `y`: Grid coordinates, each in `[0, 2^zoom)`.
    ///
    /// # Returns:
    /// - `Ok(Some(Vec<u8>))`: A fresh copy of the stored body.
    /// - `Ok(None)`: If the tile was never written.
    /// - `Err(TileStoreError)`: On invalid coordinates, a corrupt datapointer,
    ///   or I/O failure.
    fn get_tile(&self, x: u32, y: u32) -> Result<Option<Vec<u8>>>;
}

impl TileMapReader for crate::storage_engine::TileMap {
    #[inline]
    fn get_tile(&self, x: u32, y: u32) -> Result<Option<Vec<u8>>> {
        crate::storage_engine::TileMap::get_tile(self, x, y)
    }
}
