mod compute_hash;
pub use compute_hash::compute_content_hash;

mod xxh3_build_hasher;
pub use xxh3_build_hasher::{Xxh3BuildHasher, Xxh3Hasher};
