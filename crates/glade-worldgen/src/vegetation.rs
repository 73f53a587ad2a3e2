//! The vegetation decoration pass: grass tufts, flowers, and trees.
//!
//! Sweeps every cell of a shaped chunk exactly once and applies the grass
//! and flower rule, then the tree rule. Placement is driven by two density
//! fields sampled at world coordinates plus a chunk-local draw stream, so
//! the result is a pure function of (world seed, draw seed, chunk input).
//!
//! Draw consumption is part of the contract: a rule whose precondition
//! fails consumes nothing, and each decision takes its draws in a fixed
//! order. The flower decision is applied after the grass decision and its
//! write wins the cell; that ordering is load-bearing and must not be
//! collapsed into an either/or choice.

use glade_voxel::Block;

use crate::access::{ChunkAccess, WorldAccess};
use crate::density::DensityField;
use crate::draw::DrawSource;
use crate::stage::GenerationStage;

/// Thresholds and rates of the vegetation rules.
///
/// The defaults are calibrated against the standard-normal draw stream;
/// changing any of them shifts acceptance probabilities.
#[derive(Clone, Debug)]
pub struct VegetationConfig {
    /// Normal-draw tail below which a flower is attempted. Default: -2.0
    /// (roughly one cell in forty-four).
    pub flower_tail: f64,
    /// Uniform acceptance rate for tree placement. Default: 0.04.
    pub tree_chance: f64,
    /// World height at or below which trees never grow. Default: 32.
    pub tree_line: i64,
}

impl Default for VegetationConfig {
    fn default() -> Self {
        Self {
            flower_tail: -2.0,
            tree_chance: 0.04,
            tree_line: 32,
        }
    }
}

/// Decorates shaped terrain chunks with grass tufts, flowers, and trees.
pub struct VegetationPass {
    grass: DensityField,
    forest: DensityField,
    config: VegetationConfig,
}

impl VegetationPass {
    /// A pass with the standard density fields and thresholds for a world
    /// seed.
    pub fn new(world_seed: u64) -> Self {
        Self::with_fields(
            DensityField::grass(world_seed),
            DensityField::forest(world_seed),
            VegetationConfig::default(),
        )
    }

    /// A pass over explicit density fields and thresholds.
    pub fn with_fields(
        grass: DensityField,
        forest: DensityField,
        config: VegetationConfig,
    ) -> Self {
        Self {
            grass,
            forest,
            config,
        }
    }

    /// Run the pass over every cell of the chunk, once.
    ///
    /// The sweep order is fixed (y outermost, then x, then z, grass rule
    /// before tree rule per cell) so draw consumption is reproducible
    /// cell by cell for a given stream seed.
    pub fn decorate(
        &self,
        chunk: &mut dyn ChunkAccess,
        world: &mut dyn WorldAccess,
        draws: &mut dyn DrawSource,
    ) {
        let dims = chunk.dimensions();
        for y in 0..dims.height {
            for x in 0..dims.width {
                for z in 0..dims.depth {
                    self.place_grass_and_flowers(chunk, x, y, z, draws);
                    self.place_tree(chunk, world, x, y, z, draws);
                }
            }
        }
    }

    /// The grass and flower rule for one cell.
    ///
    /// Precondition: the cell holds a surface block and the grass density at
    /// its world position is positive; otherwise nothing is drawn. Two
    /// decisions follow in fixed order: the tall-grass draw (sign picks the
    /// variant; the draw is consumed even when the sky is occluded), then
    /// the flower draw (tail event; the species boolean is only consumed
    /// when the tail is hit). A flower write overwrites a grass write.
    fn place_grass_and_flowers(
        &self,
        chunk: &mut dyn ChunkAccess,
        x: u32,
        y: u32,
        z: u32,
        draws: &mut dyn DrawSource,
    ) {
        if chunk.block(x, y, z) != Block::Surface.id() {
            return;
        }
        if self.grass.sample(chunk.world_pos(x, y, z)) <= 0.0 {
            return;
        }

        if draws.normal() > 0.0 {
            if chunk.sky_above(x, y + 1, z) {
                chunk.set_block(x, y + 1, z, Block::TallGrassA.id());
            }
        } else if chunk.sky_above(x, y + 1, z) {
            chunk.set_block(x, y + 1, z, Block::TallGrassB.id());
        }

        if draws.normal() < self.config.flower_tail {
            if draws.boolean() {
                if chunk.sky_above(x, y + 1, z) {
                    chunk.set_block(x, y + 1, z, Block::FlowerA.id());
                }
            } else if chunk.sky_above(x, y + 1, z) {
                chunk.set_block(x, y + 1, z, Block::FlowerB.id());
            }
        }
    }

    /// The tree rule for one cell.
    ///
    /// Cheap gates run first: a surrounded or sky-occluded planting cell
    /// skips the cell before the forest density is sampled and before any
    /// draw is consumed. Acceptance then requires positive forest density,
    /// a surface block, elevation above the tree line, and a uniform draw
    /// under the acceptance rate. The planting cell is cleared to air
    /// before the shape generator runs, so the trunk origin is never
    /// obstructed by an earlier decoration.
    fn place_tree(
        &self,
        chunk: &mut dyn ChunkAccess,
        world: &mut dyn WorldAccess,
        x: u32,
        y: u32,
        z: u32,
        draws: &mut dyn DrawSource,
    ) {
        let target = chunk.world_pos(x, y + 1, z);
        if world.is_surrounded(target) || !chunk.sky_above(x, y + 1, z) {
            return;
        }

        if self.forest.sample(chunk.world_pos(x, y, z)) <= 0.0 {
            return;
        }
        if chunk.block(x, y, z) != Block::Surface.id() {
            return;
        }
        if chunk.world_pos(x, y, z).y <= self.config.tree_line {
            return;
        }

        if draws.uniform() >= self.config.tree_chance {
            return;
        }

        let pine = draws.boolean();
        chunk.set_block(x, y + 1, z, Block::Air.id());
        if pine {
            tracing::trace!(
                "planting pine tree at ({}, {}, {})",
                target.x,
                target.y,
                target.z
            );
            world.pine_tree_generator().generate(target, false);
        } else {
            tracing::trace!(
                "planting standard tree at ({}, {}, {})",
                target.x,
                target.y,
                target.z
            );
            world.standard_tree_generator().generate(target, false);
        }
    }
}

impl GenerationStage for VegetationPass {
    fn name(&self) -> &str {
        "vegetation"
    }

    fn apply(
        &self,
        chunk: &mut dyn ChunkAccess,
        world: &mut dyn WorldAccess,
        draws: &mut dyn DrawSource,
    ) {
        self.decorate(chunk, world, draws);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
