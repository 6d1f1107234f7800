use crate::storage_engine::constants::DATAPOINTER_SIZE;
use crate::storage_engine::tile_grid::slot_offset;
use crate::storage_engine::{Datapointer, Result, TileStoreError};
use memmap2::{Mmap, MmapMut, MmapOptions};
use std::fs::File;
use std::io;

/// Memory-mapped view of a tile file's index region.
///
/// The mapping covers exactly `[0, index_region_len)` and never grows; tile
/// bodies are always accessed through positioned file I/O instead.
pub(crate) enum IndexRegion {
    ReadWrite(MmapMut),
    ReadOnly(Mmap),
}

impl IndexRegion {
    /// Maps the first `len` bytes of `file` for shared read/write access.
    pub fn map_read_write(file: &File, len: u64) -> Result<Self> {
        let len = mapping_len(len)?;
        // SAFETY: the file handle is held for the lifetime of the mapping and
        // the index region is only mutated through this mapping.
        let mmap = unsafe { MmapOptions::new().len(len).map_mut(file)? };
        Ok(Self::ReadWrite(mmap))
    }

    /// Maps the first `len` bytes of `file` read-only.
    pub fn map_read_only(file: &File, len: u64) -> Result<Self> {
        let len = mapping_len(len)?;
        // SAFETY: as above; writers in other processes are not supported.
        let mmap = unsafe { MmapOptions::new().len(len).map(file)? };
        Ok(Self::ReadOnly(mmap))
    }

    #[inline]
    fn bytes(&self) -> &[u8] {
        match self {
            Self::ReadWrite(mmap) => &mmap[..],
            Self::ReadOnly(mmap) => &mmap[..],
        }
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.bytes().len() as u64
    }

    /// Decodes the datapointer stored in the slot for `tile_id`.
    pub fn read_datapointer(&self, tile_id: u64) -> Result<Datapointer> {
        let range = self.slot_range(tile_id)?;
        Ok(Datapointer::decode(&self.bytes()[range])?)
    }

    /// Encodes `pointer` into the slot for `tile_id`.
    pub fn write_datapointer(&mut self, tile_id: u64, pointer: Datapointer) -> Result<()> {
        let range = self.slot_range(tile_id)?;
        match self {
            Self::ReadWrite(mmap) => Ok(pointer.encode(&mut mmap[range])?),
            Self::ReadOnly(_) => Err(TileStoreError::ReadOnly),
        }
    }

    /// Flushes dirty index pages to the file. No-op for read-only mappings.
    pub fn flush(&self) -> io::Result<()> {
        match self {
            Self::ReadWrite(mmap) => mmap.flush(),
            Self::ReadOnly(_) => Ok(()),
        }
    }

    /// Counts slots holding a non-zero datapointer.
    pub fn count_written(&self) -> u64 {
        self.bytes()
            .chunks_exact(DATAPOINTER_SIZE)
            .filter(|slot| slot.iter().any(|&b| b != 0))
            .count() as u64
    }

    fn slot_range(&self, tile_id: u64) -> Result<std::ops::Range<usize>> {
        let start = slot_offset(tile_id);
        let slot_end = start + DATAPOINTER_SIZE as u64;
        let region_len = self.len();
        if slot_end > region_len {
            return Err(TileStoreError::InvalidTileId {
                tile_id,
                slot_end,
                region_len,
            });
        }
        Ok(start as usize..slot_end as usize)
    }
}

fn mapping_len(len: u64) -> Result<usize> {
    usize::try_from(len).map_err(|_| {
        TileStoreError::Io(io::Error::other(format!(
            "index region of {len} bytes cannot be mapped on this platform"
        )))
    })
}
