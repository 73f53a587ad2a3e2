//! Accessor seams between the decoration stages and their collaborators.
//!
//! The stages see the chunk being decorated and the surrounding world only
//! through these traits, so the pass can be driven by the real pipeline or
//! by test stubs interchangeably.

use glam::I64Vec3;

use glade_voxel::{BlockId, BlockRegistry, Chunk, Dimensions};

/// Read/write access to the chunk being decorated.
pub trait ChunkAccess {
    /// The block id at a local cell.
    fn block(&self, x: u32, y: u32, z: u32) -> BlockId;

    /// Overwrite a local cell.
    fn set_block(&mut self, x: u32, y: u32, z: u32, id: BlockId);

    /// The world position of a local cell.
    fn world_pos(&self, x: u32, y: u32, z: u32) -> I64Vec3;

    /// True when no sky-occluding block exists strictly above the local cell
    /// up to the world ceiling.
    fn sky_above(&self, x: u32, y: u32, z: u32) -> bool;

    /// The chunk extents; loop bounds derive from these.
    fn dimensions(&self) -> Dimensions;
}

/// Carves a tree shape into the world at a planting position.
///
/// Generators mutate world blocks directly and may write outside the chunk
/// currently being decorated; that cross-chunk write is an accepted side
/// effect. A generator must tolerate being invoked at an origin that was
/// already cleared to air.
pub trait TreeShapeGenerator {
    /// Carve a tree with its trunk base at `origin` (world coordinates).
    fn generate(&mut self, origin: I64Vec3, replant: bool);
}

/// Queries and collaborators owned by the surrounding world.
pub trait WorldAccess {
    /// True when the world position is enclosed by enough adjacent blocks to
    /// be considered non-plantable.
    fn is_surrounded(&self, pos: I64Vec3) -> bool;

    /// The pine tree shape generator.
    fn pine_tree_generator(&mut self) -> &mut dyn TreeShapeGenerator;

    /// The standard (broadleaf) tree shape generator.
    fn standard_tree_generator(&mut self) -> &mut dyn TreeShapeGenerator;
}

/// A [`Chunk`] and the registry that interprets its block ids, bound into a
/// [`ChunkAccess`].
pub struct ChunkView<'a> {
    chunk: &'a mut Chunk,
    registry: &'a BlockRegistry,
}

impl<'a> ChunkView<'a> {
    /// Borrow a chunk and registry for decoration.
    pub fn new(chunk: &'a mut Chunk, registry: &'a BlockRegistry) -> Self {
        Self { chunk, registry }
    }
}

impl ChunkAccess for ChunkView<'_> {
    fn block(&self, x: u32, y: u32, z: u32) -> BlockId {
        self.chunk.get(x, y, z)
    }

    fn set_block(&mut self, x: u32, y: u32, z: u32, id: BlockId) {
        self.chunk.set(x, y, z, id);
    }

    fn world_pos(&self, x: u32, y: u32, z: u32) -> I64Vec3 {
        I64Vec3::new(
            self.chunk.world_x(x),
            self.chunk.world_y(y),
            self.chunk.world_z(z),
        )
    }

    fn sky_above(&self, x: u32, y: u32, z: u32) -> bool {
        self.chunk.sky_above(self.registry, x, y, z)
    }

    fn dimensions(&self) -> Dimensions {
        self.chunk.dims()
    }
}
