use xxhash_rust::xxh3::xxh3_64_with_seed;

/// Computes the 64-bit content hash of a tile body.
///
/// XXH3 is a fast, non-cryptographic hash. The seed is a fixed, caller-supplied
/// key (see `TileMapOptions::content_hash_seed`) so the same body always hashes
/// to the same value within and across processes.
///
/// # Parameters
/// - `body`: The raw tile bytes.
/// - `seed`: The hash key. Defaults to `DEFAULT_CONTENT_HASH_SEED`.
///
/// # Returns
/// - A `u64` digest used as the dedup index key.
#[inline]
pub fn compute_content_hash(body: &[u8], seed: u64) -> u64 {
    xxh3_64_with_seed(body, seed)
}
