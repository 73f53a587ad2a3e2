//! Block registry: maps compact [`BlockId`] values to [`BlockDef`] metadata.
//!
//! The registry is built once during generator startup. Air is always id 0 so
//! that zero-initialized chunk memory represents empty space.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::block::{Block, BlockId};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Transparency mode for a block type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transparency {
    /// Fully blocks light and sky visibility.
    Opaque,
    /// Lets light through (e.g. water, leaves); does not occlude the sky.
    SemiTransparent,
    /// Completely transparent (e.g. air, grass tufts, flowers).
    FullyTransparent,
}

/// Full descriptor for a block type.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockDef {
    /// Human-readable name (e.g. "surface", "tall_grass_a").
    pub name: String,
    /// Whether entities collide with this block.
    pub solid: bool,
    /// Transparency mode.
    pub transparency: Transparency,
}

/// Errors that can occur during block registration.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A type with the same name has already been registered.
    #[error("duplicate block name: {0}")]
    DuplicateName(String),
    /// All 256 id slots have been consumed.
    #[error("block registry is full (max 256 types)")]
    RegistryFull,
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Maps [`BlockId`] → [`BlockDef`] with O(1) lookup by index and O(1)
/// reverse lookup by name.
pub struct BlockRegistry {
    /// Dense array where `index == BlockId.0`.
    types: Vec<BlockDef>,
    /// Reverse lookup: name → id.
    name_to_id: HashMap<String, BlockId>,
}

impl BlockRegistry {
    /// Creates a new registry with Air pre-registered as id 0.
    pub fn new() -> Self {
        let air = BlockDef {
            name: "air".to_string(),
            solid: false,
            transparency: Transparency::FullyTransparent,
        };

        let mut name_to_id = HashMap::new();
        name_to_id.insert("air".to_string(), BlockId::AIR);

        Self {
            types: vec![air],
            name_to_id,
        }
    }

    /// Creates a registry holding the full named vocabulary of [`Block`],
    /// registered in id order so that `lookup_by_name(b.name()) == b.id()`
    /// for every variant.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for block in Block::ALL {
            if block == Block::Air {
                continue;
            }
            let (solid, transparency) = match block {
                Block::Air => unreachable!(),
                Block::Surface
                | Block::Dirt
                | Block::Stone
                | Block::Trunk
                | Block::Sand
                | Block::Bedrock => (true, Transparency::Opaque),
                Block::Water => (false, Transparency::SemiTransparent),
                Block::Leaves => (true, Transparency::SemiTransparent),
                Block::FlowerA | Block::FlowerB | Block::TallGrassA | Block::TallGrassB => {
                    (false, Transparency::FullyTransparent)
                }
            };
            let def = BlockDef {
                name: block.name().to_string(),
                solid,
                transparency,
            };
            let id = registry
                .register(def)
                .expect("default block table registers without collisions");
            debug_assert_eq!(id, block.id());
        }
        registry
    }

    /// Registers a new block type and returns its assigned id.
    ///
    /// Ids are assigned sequentially starting from 1 (0 is Air).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if a type with the same name
    /// already exists, or [`RegistryError::RegistryFull`] if all 256 slots
    /// are consumed.
    pub fn register(&mut self, def: BlockDef) -> Result<BlockId, RegistryError> {
        if self.name_to_id.contains_key(&def.name) {
            return Err(RegistryError::DuplicateName(def.name));
        }
        if self.types.len() > u8::MAX as usize {
            return Err(RegistryError::RegistryFull);
        }

        let id = BlockId(self.types.len() as u8);
        self.name_to_id.insert(def.name.clone(), id);
        self.types.push(def);
        Ok(id)
    }

    /// Returns the definition for a given id, or `None` for unregistered ids.
    pub fn get(&self, id: BlockId) -> Option<&BlockDef> {
        self.types.get(id.0 as usize)
    }

    /// Returns the id for a named block type, or `None` if not found.
    pub fn lookup_by_name(&self, name: &str) -> Option<BlockId> {
        self.name_to_id.get(name).copied()
    }

    /// Returns the total number of registered types (including Air).
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if only Air is registered.
    pub fn is_empty(&self) -> bool {
        self.types.len() <= 1
    }

    /// Returns `true` if the given block type is air (id 0).
    pub fn is_air(&self, id: BlockId) -> bool {
        id == BlockId::AIR
    }

    /// Returns `true` if the given block type does not occlude the sky
    /// (fully or semi transparent).
    ///
    /// Air is transparent. Returns `true` for unknown ids as a conservative
    /// fallback (treat missing types like air).
    pub fn is_transparent(&self, id: BlockId) -> bool {
        match self.types.get(id.0 as usize) {
            Some(def) => def.transparency != Transparency::Opaque,
            None => true,
        }
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn moss_def() -> BlockDef {
        BlockDef {
            name: "moss".to_string(),
            solid: true,
            transparency: Transparency::Opaque,
        }
    }

    #[test]
    fn test_air_is_id_zero() {
        let registry = BlockRegistry::new();
        let air = registry.get(BlockId::AIR).unwrap();
        assert_eq!(air.name, "air");
        assert!(!air.solid);
        assert_eq!(air.transparency, Transparency::FullyTransparent);
    }

    #[test]
    fn test_defaults_match_block_table() {
        let registry = BlockRegistry::with_defaults();
        for block in Block::ALL {
            assert_eq!(
                registry.lookup_by_name(block.name()),
                Some(block.id()),
                "registry id for '{}' must match the Block table",
                block.name()
            );
        }
        assert_eq!(registry.len(), Block::ALL.len());
    }

    #[test]
    fn test_surface_is_opaque_and_vegetation_is_not() {
        let registry = BlockRegistry::with_defaults();
        assert!(!registry.is_transparent(Block::Surface.id()));
        assert!(registry.is_transparent(Block::TallGrassA.id()));
        assert!(registry.is_transparent(Block::TallGrassB.id()));
        assert!(registry.is_transparent(Block::FlowerA.id()));
        assert!(registry.is_transparent(Block::FlowerB.id()));
    }

    #[test]
    fn test_leaves_do_not_occlude_sky() {
        let registry = BlockRegistry::with_defaults();
        assert!(registry.is_transparent(Block::Leaves.id()));
    }

    #[test]
    fn test_register_returns_sequential_ids() {
        let mut registry = BlockRegistry::with_defaults();
        let next = registry.len() as u8;
        let id = registry.register(moss_def()).unwrap();
        assert_eq!(id, BlockId(next));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = BlockRegistry::new();
        registry.register(moss_def()).unwrap();
        let result = registry.register(moss_def());
        assert!(matches!(result, Err(RegistryError::DuplicateName(_))));
    }

    #[test]
    fn test_unknown_ids_treated_like_air() {
        let registry = BlockRegistry::with_defaults();
        assert!(registry.is_transparent(BlockId(0xFE)));
        assert!(registry.get(BlockId(0xFE)).is_none());
    }
}
