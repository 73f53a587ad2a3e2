//! Chunk storage: a fixed-size 3D grid of block ids at a world offset.
//!
//! Chunks tile the world horizontally and span the full world height, so a
//! cell's world y equals its local y. Out-of-bounds access is handled
//! gracefully without panics.

use serde::{Deserialize, Serialize};

use crate::block::BlockId;
use crate::registry::BlockRegistry;

/// Chunk extents on each axis, in cells. Read-only once constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Extent along the x axis.
    pub width: u32,
    /// Extent along the y (vertical) axis; the world ceiling.
    pub height: u32,
    /// Extent along the z axis.
    pub depth: u32,
}

impl Dimensions {
    /// Creates chunk extents from per-axis cell counts.
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Total number of cells in a chunk of these extents.
    pub const fn volume(&self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }

    /// Returns `true` if the local coordinate lies inside the chunk.
    pub const fn contains(&self, x: u32, y: u32, z: u32) -> bool {
        x < self.width && y < self.height && z < self.depth
    }
}

impl Default for Dimensions {
    /// The default world shape: 16×128×16 cells per chunk.
    fn default() -> Self {
        Self::new(16, 128, 16)
    }
}

/// Horizontal chunk address in chunk units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkPos {
    /// Chunk column along the world x axis.
    pub x: i32,
    /// Chunk column along the world z axis.
    pub z: i32,
}

impl ChunkPos {
    /// Creates a chunk address from column indices.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

/// A chunk of block ids with bounds-checked access and world-coordinate
/// conversion.
///
/// Out-of-bounds reads return Air and out-of-bounds writes are ignored,
/// both with a warning log.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Chunk {
    pos: ChunkPos,
    dims: Dimensions,
    /// Flat cell storage, x varying fastest, then y, then z.
    cells: Vec<BlockId>,
}

impl Chunk {
    /// Creates a chunk filled with Air.
    pub fn new_air(pos: ChunkPos, dims: Dimensions) -> Self {
        Self::new_filled(pos, dims, BlockId::AIR)
    }

    /// Creates a chunk filled with the given block id.
    pub fn new_filled(pos: ChunkPos, dims: Dimensions, id: BlockId) -> Self {
        Self {
            pos,
            dims,
            cells: vec![id; dims.volume()],
        }
    }

    /// The chunk's horizontal address.
    pub fn pos(&self) -> ChunkPos {
        self.pos
    }

    /// The chunk's extents.
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// Returns the block id at `(x, y, z)`.
    ///
    /// Returns Air if any coordinate is out of bounds.
    pub fn get(&self, x: u32, y: u32, z: u32) -> BlockId {
        if !self.dims.contains(x, y, z) {
            tracing::warn!("Chunk::get out of bounds: ({}, {}, {})", x, y, z);
            return BlockId::AIR;
        }
        self.cells[self.linear_index(x, y, z)]
    }

    /// Sets the block id at `(x, y, z)`.
    ///
    /// No-op if any coordinate is out of bounds.
    pub fn set(&mut self, x: u32, y: u32, z: u32, id: BlockId) {
        if !self.dims.contains(x, y, z) {
            tracing::warn!("Chunk::set out of bounds: ({}, {}, {})", x, y, z);
            return;
        }
        let index = self.linear_index(x, y, z);
        self.cells[index] = id;
    }

    /// Fills every cell with the given block id.
    pub fn fill(&mut self, id: BlockId) {
        self.cells.fill(id);
    }

    /// World x coordinate of a local x.
    pub fn world_x(&self, x: u32) -> i64 {
        self.pos.x as i64 * self.dims.width as i64 + x as i64
    }

    /// World y coordinate of a local y. Chunks span the full world height.
    pub fn world_y(&self, y: u32) -> i64 {
        y as i64
    }

    /// World z coordinate of a local z.
    pub fn world_z(&self, z: u32) -> i64 {
        self.pos.z as i64 * self.dims.depth as i64 + z as i64
    }

    /// Returns `true` if no sky-occluding block exists strictly above
    /// `(x, y, z)` up to the world ceiling.
    ///
    /// Occlusion is decided by the registry's transparency data. Cells at or
    /// above the ceiling are vacuously sky-visible.
    pub fn sky_above(&self, registry: &BlockRegistry, x: u32, y: u32, z: u32) -> bool {
        if x >= self.dims.width || z >= self.dims.depth {
            tracing::warn!("Chunk::sky_above out of bounds: ({}, {}, {})", x, y, z);
            return false;
        }
        for yy in y.saturating_add(1)..self.dims.height {
            if !registry.is_transparent(self.get(x, yy, z)) {
                return false;
            }
        }
        true
    }

    /// Converts `(x, y, z)` to a flat cell index (x varies fastest).
    fn linear_index(&self, x: u32, y: u32, z: u32) -> usize {
        debug_assert!(self.dims.contains(x, y, z));
        x as usize
            + y as usize * self.dims.width as usize
            + z as usize * self.dims.width as usize * self.dims.height as usize
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
