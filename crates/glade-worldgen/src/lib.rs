//! Deterministic vegetation decoration for voxel terrain chunks.
//!
//! Takes a fully shaped terrain chunk and stochastically overlays grass
//! tufts, flowers, and trees, driven by continuous noise density fields
//! evaluated at world coordinates. Per-chunk draw streams are derived from
//! the world seed and chunk address, so decoration is reproducible and safe
//! to run concurrently across chunks.

pub mod access;
pub mod density;
pub mod draw;
pub mod seed;
pub mod stage;
pub mod vegetation;
pub mod worker;

pub use access::{ChunkAccess, ChunkView, TreeShapeGenerator, WorldAccess};
pub use density::{DensityField, OctaveNoise, SimplexOctaves};
pub use draw::{DrawSource, DrawStream};
pub use seed::{derive_chunk_seed, hash_chunk};
pub use stage::{GenerationStage, StagePipeline};
pub use vegetation::{VegetationConfig, VegetationPass};
pub use worker::{DecoratedChunk, DecorationPool, DecorationTask, decorate_chunk_sync};
