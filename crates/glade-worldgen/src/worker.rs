//! Background chunk decoration with a configurable thread pool.
//!
//! Offloads decoration of many chunks to worker threads. Every task carries
//! its own chunk and world handle, and every worker derives a chunk-local
//! draw stream from the world seed and chunk address, so concurrent
//! decoration shares no mutable random state and stays reproducible.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};
use dashmap::DashMap;

use glade_voxel::{BlockRegistry, Chunk, ChunkPos};

use crate::access::{ChunkView, WorldAccess};
use crate::draw::DrawStream;
use crate::stage::StagePipeline;

/// A request to decorate a single shaped chunk.
pub struct DecorationTask {
    /// The shaped chunk to decorate, mutated in place.
    pub chunk: Chunk,
    /// Handle to the surrounding world (surrounding queries, tree
    /// generators). Dropped once decoration completes.
    pub world: Box<dyn WorldAccess + Send>,
    /// World seed; combined with the chunk address to seed the draw stream.
    pub world_seed: u64,
}

/// A fully decorated chunk ready for hand-off to the next pipeline step.
#[derive(Debug)]
pub struct DecoratedChunk {
    /// The decorated chunk, carrying its original address.
    pub chunk: Chunk,
    /// Decoration time in microseconds (for profiling).
    pub decoration_time_us: u64,
}

/// Internal wrapper that carries the task and its cancellation flag.
struct QueuedTask {
    task: DecorationTask,
    cancelled: Arc<AtomicBool>,
}

/// Manages background chunk decoration across a thread pool.
pub struct DecorationPool {
    /// Sender for submitting decoration tasks.
    task_sender: Sender<QueuedTask>,
    /// Receiver for collecting decorated chunks on the caller's thread.
    result_receiver: Receiver<DecoratedChunk>,
    /// Shared cancellation flag per task (keyed by chunk address).
    active_tasks: Arc<DashMap<ChunkPos, Arc<AtomicBool>>>,
    /// Current number of in-flight tasks.
    in_flight: Arc<AtomicU64>,
}

impl DecorationPool {
    /// Create a pool with the specified thread count and queue capacities.
    ///
    /// # Arguments
    /// - `thread_count`: Number of worker threads.
    /// - `max_concurrent`: Maximum in-flight tasks. Excess submissions are
    ///   rejected.
    /// - `result_capacity`: Bounded channel capacity for decorated chunks.
    /// - `registry`: Block registry shared by all workers.
    /// - `pipeline`: The stage pipeline applied to every chunk.
    pub fn new(
        thread_count: usize,
        max_concurrent: usize,
        result_capacity: usize,
        registry: Arc<BlockRegistry>,
        pipeline: Arc<StagePipeline>,
    ) -> Self {
        let (task_sender, task_receiver) = bounded::<QueuedTask>(max_concurrent * 2);
        let (result_sender, result_receiver) = bounded::<DecoratedChunk>(result_capacity);
        let in_flight = Arc::new(AtomicU64::new(0));

        for _ in 0..thread_count {
            let receiver = task_receiver.clone();
            let sender = result_sender.clone();
            let in_flight = Arc::clone(&in_flight);
            let registry = Arc::clone(&registry);
            let pipeline = Arc::clone(&pipeline);

            std::thread::Builder::new()
                .name("chunk-decorate-worker".into())
                .spawn(move || {
                    while let Ok(queued) = receiver.recv() {
                        // Check cancellation before starting work.
                        if queued.cancelled.load(Ordering::Relaxed) {
                            in_flight.fetch_sub(1, Ordering::Relaxed);
                            continue;
                        }

                        let QueuedTask {
                            mut task,
                            cancelled,
                        } = queued;

                        let start = std::time::Instant::now();
                        decorate_chunk_sync(
                            &mut task.chunk,
                            &registry,
                            &pipeline,
                            task.world.as_mut(),
                            task.world_seed,
                        );
                        let elapsed = start.elapsed().as_micros() as u64;

                        // Check cancellation after decoration.
                        if !cancelled.load(Ordering::Relaxed) {
                            let _ = sender.send(DecoratedChunk {
                                chunk: task.chunk,
                                decoration_time_us: elapsed,
                            });
                        }

                        in_flight.fetch_sub(1, Ordering::Relaxed);
                    }
                })
                .expect("Failed to spawn chunk decoration worker thread");
        }

        Self {
            task_sender,
            result_receiver,
            active_tasks: Arc::new(DashMap::new()),
            in_flight,
        }
    }

    /// Create a pool with a sensible thread count based on CPU cores.
    pub fn with_defaults(registry: Arc<BlockRegistry>, pipeline: Arc<StagePipeline>) -> Self {
        let cpus = num_cpus::get().max(2);
        let threads = (cpus - 2).max(1);
        Self::new(threads, 64, 128, registry, pipeline)
    }

    /// Submit a chunk for background decoration.
    ///
    /// Returns `Ok(())` if the task was queued, or `Err(task)` if the queue
    /// is full.
    #[allow(clippy::result_large_err)]
    pub fn submit(&self, task: DecorationTask) -> Result<(), DecorationTask> {
        let pos = task.chunk.pos();
        let cancelled = Arc::new(AtomicBool::new(false));
        self.active_tasks.insert(pos, Arc::clone(&cancelled));
        self.in_flight.fetch_add(1, Ordering::Relaxed);

        let queued = QueuedTask { task, cancelled };
        self.task_sender.try_send(queued).map_err(|e| {
            self.in_flight.fetch_sub(1, Ordering::Relaxed);
            self.active_tasks.remove(&pos);
            e.into_inner().task
        })
    }

    /// Cancel a pending or in-progress decoration task.
    ///
    /// If the task has already completed, this is a no-op.
    pub fn cancel(&self, pos: &ChunkPos) {
        if let Some((_, cancelled)) = self.active_tasks.remove(pos) {
            cancelled.store(true, Ordering::Relaxed);
        }
    }

    /// Drain all decorated chunks from the result channel.
    pub fn drain_results(&self) -> Vec<DecoratedChunk> {
        let mut results = Vec::new();
        while let Ok(decorated) = self.result_receiver.try_recv() {
            self.active_tasks.remove(&decorated.chunk.pos());
            results.push(decorated);
        }
        results
    }

    /// Number of tasks currently in flight (queued or executing).
    pub fn in_flight_count(&self) -> u64 {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Returns `true` if a task for the given address is currently pending.
    pub fn is_pending(&self, pos: &ChunkPos) -> bool {
        self.active_tasks.contains_key(pos)
    }
}

/// Decorate one chunk synchronously: derive its draw stream and run the
/// stage pipeline over it.
///
/// This is the single entry point of the decoration core. Side effects are
/// confined to the chunk and to invoked tree-shape generators, which may
/// write into neighboring chunks through the world handle.
pub fn decorate_chunk_sync(
    chunk: &mut Chunk,
    registry: &BlockRegistry,
    pipeline: &StagePipeline,
    world: &mut dyn WorldAccess,
    world_seed: u64,
) {
    let mut draws = DrawStream::for_chunk(world_seed, chunk.pos());
    let mut view = ChunkView::new(chunk, registry);
    pipeline.apply(&mut view, world, &mut draws);
}
