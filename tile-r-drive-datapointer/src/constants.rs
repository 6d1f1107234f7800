use std::ops::Range;

// Datapointer record (fixed 10 bytes per index slot)
pub const DATAPOINTER_SIZE: usize = 10;

pub const OFFSET_LOW_RANGE: Range<usize> = 0..2;
pub const OFFSET_HIGH_RANGE: Range<usize> = 2..6;
pub const SIZE_RANGE: Range<usize> = 6..10;

/// Width of the offset field in bits.
pub const OFFSET_BITS: u32 = 48;

/// Largest byte offset a datapointer can address (2^48 - 1, ~256 TiB).
pub const MAX_DATAPOINTER_OFFSET: u64 = (1u64 << OFFSET_BITS) - 1;
