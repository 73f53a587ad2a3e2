//! Deterministic seed derivation and chunk digests.
//!
//! Every chunk gets its own draw-stream seed derived from the world seed and
//! its address, so chunks decorated on different threads (or in a different
//! order) produce identical results.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use glade_voxel::{Chunk, ChunkPos};

/// Derive a u64 seed for a chunk from the world seed and chunk address.
///
/// Uses SipHash (via std's `DefaultHasher`) to combine the world seed with
/// the chunk address into a well-distributed u64.
pub fn derive_chunk_seed(world_seed: u64, pos: ChunkPos) -> u64 {
    let mut hasher = DefaultHasher::new();
    world_seed.hash(&mut hasher);
    pos.x.hash(&mut hasher);
    pos.z.hash(&mut hasher);
    hasher.finish()
}

/// Hash the contents of a chunk to a u64 digest for determinism comparison.
///
/// Hashes every cell, x varying fastest, then y, then z.
pub fn hash_chunk(chunk: &Chunk) -> u64 {
    let mut hasher = DefaultHasher::new();
    let dims = chunk.dims();
    for z in 0..dims.depth {
        for y in 0..dims.height {
            for x in 0..dims.width {
                chunk.get(x, y, z).0.hash(&mut hasher);
            }
        }
    }
    hasher.finish()
}
