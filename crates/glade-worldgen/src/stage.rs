//! Ordered generation stages composed over a chunk.
//!
//! Decoration concerns are peer stages behind one trait, applied to a chunk
//! in a fixed order by a [`StagePipeline`]. New concerns (ore seams, snow
//! cover, ...) slot in as additional stages instead of extending a base
//! generator.

use crate::access::{ChunkAccess, WorldAccess};
use crate::draw::DrawSource;

/// One decoration stage applied to a shaped chunk.
pub trait GenerationStage: Send + Sync {
    /// Stable stage name for diagnostics.
    fn name(&self) -> &str;

    /// Apply this stage to the chunk, consuming draws from the stream.
    fn apply(
        &self,
        chunk: &mut dyn ChunkAccess,
        world: &mut dyn WorldAccess,
        draws: &mut dyn DrawSource,
    );
}

/// An ordered list of generation stages.
///
/// Stages run in insertion order; each sees the writes of the stages before
/// it. The pipeline itself holds no per-chunk state.
#[derive(Default)]
pub struct StagePipeline {
    stages: Vec<Box<dyn GenerationStage>>,
}

impl StagePipeline {
    /// An empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage, builder style.
    pub fn with_stage(mut self, stage: Box<dyn GenerationStage>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Append a stage.
    pub fn push(&mut self, stage: Box<dyn GenerationStage>) {
        self.stages.push(stage);
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` if no stages are registered.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Apply every stage to the chunk, in order.
    pub fn apply(
        &self,
        chunk: &mut dyn ChunkAccess,
        world: &mut dyn WorldAccess,
        draws: &mut dyn DrawSource,
    ) {
        for stage in &self.stages {
            tracing::trace!("applying generation stage '{}'", stage.name());
            stage.apply(chunk, world, draws);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use glam::I64Vec3;

    use glade_voxel::{Block, BlockRegistry, Chunk, ChunkPos, Dimensions};

    use crate::access::{ChunkView, TreeShapeGenerator};
    use crate::draw::DrawStream;

    struct NoopTree;

    impl TreeShapeGenerator for NoopTree {
        fn generate(&mut self, _origin: I64Vec3, _replant: bool) {}
    }

    struct OpenWorld {
        pine: NoopTree,
        standard: NoopTree,
    }

    impl OpenWorld {
        fn new() -> Self {
            Self {
                pine: NoopTree,
                standard: NoopTree,
            }
        }
    }

    impl WorldAccess for OpenWorld {
        fn is_surrounded(&self, _pos: I64Vec3) -> bool {
            false
        }

        fn pine_tree_generator(&mut self) -> &mut dyn TreeShapeGenerator {
            &mut self.pine
        }

        fn standard_tree_generator(&mut self) -> &mut dyn TreeShapeGenerator {
            &mut self.standard
        }
    }

    struct RecordingStage {
        name: String,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl GenerationStage for RecordingStage {
        fn name(&self) -> &str {
            &self.name
        }

        fn apply(
            &self,
            _chunk: &mut dyn ChunkAccess,
            _world: &mut dyn WorldAccess,
            _draws: &mut dyn DrawSource,
        ) {
            self.log.lock().unwrap().push(self.name.clone());
        }
    }

    struct MarkerStage;

    impl GenerationStage for MarkerStage {
        fn name(&self) -> &str {
            "marker"
        }

        fn apply(
            &self,
            chunk: &mut dyn ChunkAccess,
            _world: &mut dyn WorldAccess,
            _draws: &mut dyn DrawSource,
        ) {
            chunk.set_block(0, 0, 0, Block::Bedrock.id());
        }
    }

    #[test]
    fn test_stages_run_in_insertion_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline = StagePipeline::new()
            .with_stage(Box::new(RecordingStage {
                name: "first".into(),
                log: Arc::clone(&log),
            }))
            .with_stage(Box::new(RecordingStage {
                name: "second".into(),
                log: Arc::clone(&log),
            }));

        let registry = BlockRegistry::with_defaults();
        let mut chunk = Chunk::new_air(ChunkPos::new(0, 0), Dimensions::new(2, 2, 2));
        let mut world = OpenWorld::new();
        let mut draws = DrawStream::from_seed(0);
        pipeline.apply(
            &mut ChunkView::new(&mut chunk, &registry),
            &mut world,
            &mut draws,
        );

        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_stage_writes_reach_the_chunk() {
        let pipeline = StagePipeline::new().with_stage(Box::new(MarkerStage));

        let registry = BlockRegistry::with_defaults();
        let mut chunk = Chunk::new_air(ChunkPos::new(0, 0), Dimensions::new(2, 2, 2));
        let mut world = OpenWorld::new();
        let mut draws = DrawStream::from_seed(0);
        pipeline.apply(
            &mut ChunkView::new(&mut chunk, &registry),
            &mut world,
            &mut draws,
        );

        assert_eq!(chunk.get(0, 0, 0), Block::Bedrock.id());
    }

    #[test]
    fn test_empty_pipeline_is_a_no_op() {
        let pipeline = StagePipeline::new();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.len(), 0);
    }
}
