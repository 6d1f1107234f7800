use crate::constants::*;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DatapointerError {
    #[error("invalid buffer size: need {} bytes, got {len}", DATAPOINTER_SIZE)]
    BufferTooSmall { len: usize },
}

/// Location of one tile body inside the data region.
///
/// Every index slot holds exactly one `Datapointer`. A slot that has never been
/// written decodes to the all-zero default, which is never a valid location
/// because offset `0` always falls inside the index region.
///
/// ## Slot Layout
///
/// All fields are little-endian:
///
/// - **Offset `0` → `2`**: low 16 bits of the 48-bit body offset
/// - **Offset `2` → `6`**: high 32 bits of the body offset (bits 16..48)
/// - **Offset `6` → `10`**: body size in bytes
///
/// **Total Size**: `10` bytes.
///
/// ## Notes
/// - Offsets above `2^48 - 1` are truncated by the encoding. Callers enforce
///   bounds before building a datapointer; the codec only checks buffer length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Datapointer {
    pub offset: u64,
    pub size: u32,
}

impl Datapointer {
    #[inline]
    pub fn new(offset: u64, size: u32) -> Self {
        Self { offset, size }
    }

    /// `true` for the all-zero slot value of a tile that was never written.
    #[inline]
    pub fn is_unset(&self) -> bool {
        self.offset == 0 && self.size == 0
    }

    /// Exclusive end offset of the referenced body.
    #[inline]
    pub fn end(&self) -> u64 {
        self.offset + self.size as u64
    }

    /// Encodes the datapointer into the first 10 bytes of `buf`.
    ///
    /// # Errors
    /// - `DatapointerError::BufferTooSmall` if `buf` is shorter than 10 bytes.
    #[inline]
    pub fn encode(&self, buf: &mut [u8]) -> Result<(), DatapointerError> {
        if buf.len() < DATAPOINTER_SIZE {
            return Err(DatapointerError::BufferTooSmall { len: buf.len() });
        }

        buf[..DATAPOINTER_SIZE].copy_from_slice(&self.serialize());
        Ok(())
    }

    /// Decodes a datapointer from the first 10 bytes of `buf`.
    ///
    /// An empty slice stands in for an absent buffer and is rejected like any
    /// other short buffer.
    ///
    /// # Errors
    /// - `DatapointerError::BufferTooSmall` if `buf` is shorter than 10 bytes.
    #[inline]
    pub fn decode(buf: &[u8]) -> Result<Self, DatapointerError> {
        if buf.len() < DATAPOINTER_SIZE {
            return Err(DatapointerError::BufferTooSmall { len: buf.len() });
        }

        let low = u16::from_le_bytes([buf[0], buf[1]]) as u64;
        let high = u32::from_le_bytes([buf[2], buf[3], buf[4], buf[5]]) as u64;
        let size = u32::from_le_bytes([buf[6], buf[7], buf[8], buf[9]]);

        Ok(Self {
            offset: low | (high << 16),
            size,
        })
    }

    /// Serializes into a standalone fixed-size record.
    #[inline]
    pub fn serialize(&self) -> [u8; DATAPOINTER_SIZE] {
        let mut buf = [0u8; DATAPOINTER_SIZE];
        buf[OFFSET_LOW_RANGE].copy_from_slice(&(self.offset as u16).to_le_bytes());
        buf[OFFSET_HIGH_RANGE].copy_from_slice(&((self.offset >> 16) as u32).to_le_bytes());
        buf[SIZE_RANGE].copy_from_slice(&self.size.to_le_bytes());
        buf
    }
}
