use crate::storage_engine::constants::MAX_DEDUP_INIT_CAPACITY;
use crate::storage_engine::digest::Xxh3BuildHasher;
use crate::storage_engine::tile_count;
use std::collections::HashMap;
use tile_r_drive_datapointer::Datapointer;

/// What the dedup index remembers about the first tile that stored a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupEntry {
    /// Tile id of the first slot that stored this content.
    pub tile_id: u32,

    /// The datapointer that slot was given. Kept alongside the id so a later
    /// rewrite of that same slot does not redirect earlier content.
    pub pointer: Datapointer,
}

/// In‑memory content hash → first tile map used to avoid storing the same body twice.
///
/// The index lives only for one open session of a tile map. It is created
/// lazily on the first write, starts empty on every open, and is dropped on
/// close; it is never persisted or rebuilt from file contents.
///
/// Lookups trust the 64-bit hash: two different bodies that collide share
/// storage unless the map was opened with `verify_dedup`.
#[derive(Debug)]
pub struct DedupIndex {
    index: HashMap<u64, DedupEntry, Xxh3BuildHasher>,
}

impl DedupIndex {
    /// Creates an empty index presized for a grid at `zoom`, capped at
    /// `MAX_DEDUP_INIT_CAPACITY` entries.
    pub fn for_zoom(zoom: u8) -> Self {
        Self {
            index: HashMap::with_capacity_and_hasher(
                Self::initial_capacity(zoom),
                Xxh3BuildHasher,
            ),
        }
    }

    /// `min(tile_count(zoom), MAX_DEDUP_INIT_CAPACITY)`
    #[inline]
    pub fn initial_capacity(zoom: u8) -> usize {
        tile_count(zoom).min(MAX_DEDUP_INIT_CAPACITY as u64) as usize
    }

    #[inline]
    pub fn get(&self, content_hash: u64) -> Option<DedupEntry> {
        self.index.get(&content_hash).copied()
    }

    /// Records `content_hash → (tile_id, pointer)`, returning the previous entry, if any.
    #[inline]
    pub fn insert(
        &mut self,
        content_hash: u64,
        tile_id: u64,
        pointer: Datapointer,
    ) -> Option<DedupEntry> {
        debug_assert!(tile_id <= u32::MAX as u64, "tile id exceeds 32-bit range");
        self.index.insert(
            content_hash,
            DedupEntry {
                tile_id: tile_id as u32,
                pointer,
            },
        )
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.index.capacity()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_is_capped() {
        assert_eq!(DedupIndex::initial_capacity(0), 1);
        assert_eq!(DedupIndex::initial_capacity(2), 16);
        assert_eq!(DedupIndex::initial_capacity(11), 4_194_304);
        assert_eq!(DedupIndex::initial_capacity(12), MAX_DEDUP_INIT_CAPACITY);
        assert_eq!(DedupIndex::initial_capacity(16), MAX_DEDUP_INIT_CAPACITY);

        let small = DedupIndex::for_zoom(2);
        assert!(small.capacity() >= 16);
        assert!(small.is_empty());
    }

    #[test]
    fn test_insert_and_get() {
        let mut index = DedupIndex::for_zoom(4);
        let pointer = Datapointer::new(2560, 42);
        assert!(index.insert(7, 3, pointer).is_none());

        let entry = index.get(7).expect("entry should exist");
        assert_eq!(entry.tile_id, 3);
        assert_eq!(entry.pointer, pointer);
        assert!(index.get(8).is_none());
        assert_eq!(index.len(), 1);
    }
}
