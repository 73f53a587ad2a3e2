//! Block vocabulary, block registry, and chunk storage for the Glade world generator.

pub mod block;
pub mod chunk;
pub mod registry;

pub use block::{Block, BlockId};
pub use chunk::{Chunk, ChunkPos, Dimensions};
pub use registry::{BlockDef, BlockRegistry, RegistryError, Transparency};
