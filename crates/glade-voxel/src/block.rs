//! Named block vocabulary and its id-mapping table.
//!
//! Placement rules reference [`Block`] variants, never raw numeric ids.
//! The numeric mapping lives in exactly one place ([`Block::id`]) so the
//! ruleset stays testable and self-documenting.

use serde::{Deserialize, Serialize};

/// Compact identifier stored inside every chunk cell (1 byte).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(pub u8);

impl BlockId {
    /// The id of empty space.
    pub const AIR: Self = Self(0);
}

/// The named block vocabulary of the generator.
///
/// Ids outside this table are opaque to the decoration rules: they are read,
/// compared, and passed through untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Block {
    /// Empty space.
    Air,
    /// Topsoil; the only block eligible to host vegetation above it.
    Surface,
    /// Subsoil beneath the surface layer.
    Dirt,
    /// Base rock.
    Stone,
    /// Still water.
    Water,
    /// Tree trunk segment.
    Trunk,
    /// Tree canopy.
    Leaves,
    /// Beach and riverbed sand.
    Sand,
    /// Unbreakable world floor.
    Bedrock,
    /// First flower variant.
    FlowerA,
    /// Second flower variant.
    FlowerB,
    /// First tall-grass tuft variant.
    TallGrassA,
    /// Second tall-grass tuft variant.
    TallGrassB,
}

impl Block {
    /// Every named variant, in id order.
    pub const ALL: [Block; 13] = [
        Block::Air,
        Block::Surface,
        Block::Dirt,
        Block::Stone,
        Block::Water,
        Block::Trunk,
        Block::Leaves,
        Block::Sand,
        Block::Bedrock,
        Block::FlowerA,
        Block::FlowerB,
        Block::TallGrassA,
        Block::TallGrassB,
    ];

    /// The id-mapping table.
    pub const fn id(self) -> BlockId {
        match self {
            Block::Air => BlockId(0x0),
            Block::Surface => BlockId(0x1),
            Block::Dirt => BlockId(0x2),
            Block::Stone => BlockId(0x3),
            Block::Water => BlockId(0x4),
            Block::Trunk => BlockId(0x5),
            Block::Leaves => BlockId(0x6),
            Block::Sand => BlockId(0x7),
            Block::Bedrock => BlockId(0x8),
            Block::FlowerA => BlockId(0x9),
            Block::FlowerB => BlockId(0xA),
            Block::TallGrassA => BlockId(0xB),
            Block::TallGrassB => BlockId(0xC),
        }
    }

    /// Reverse lookup. Returns `None` for ids outside the named vocabulary.
    pub const fn from_id(id: BlockId) -> Option<Block> {
        match id.0 {
            0x0 => Some(Block::Air),
            0x1 => Some(Block::Surface),
            0x2 => Some(Block::Dirt),
            0x3 => Some(Block::Stone),
            0x4 => Some(Block::Water),
            0x5 => Some(Block::Trunk),
            0x6 => Some(Block::Leaves),
            0x7 => Some(Block::Sand),
            0x8 => Some(Block::Bedrock),
            0x9 => Some(Block::FlowerA),
            0xA => Some(Block::FlowerB),
            0xB => Some(Block::TallGrassA),
            0xC => Some(Block::TallGrassB),
            _ => None,
        }
    }

    /// Stable lowercase name, matching the registry entry for this block.
    pub const fn name(self) -> &'static str {
        match self {
            Block::Air => "air",
            Block::Surface => "surface",
            Block::Dirt => "dirt",
            Block::Stone => "stone",
            Block::Water => "water",
            Block::Trunk => "trunk",
            Block::Leaves => "leaves",
            Block::Sand => "sand",
            Block::Bedrock => "bedrock",
            Block::FlowerA => "flower_a",
            Block::FlowerB => "flower_b",
            Block::TallGrassA => "tall_grass_a",
            Block::TallGrassB => "tall_grass_b",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_mapping_round_trips() {
        for block in Block::ALL {
            assert_eq!(
                Block::from_id(block.id()),
                Some(block),
                "id mapping must round-trip for {block:?}"
            );
        }
    }

    #[test]
    fn test_ids_are_unique() {
        for (i, a) in Block::ALL.iter().enumerate() {
            for b in &Block::ALL[i + 1..] {
                assert_ne!(a.id(), b.id(), "{a:?} and {b:?} share an id");
            }
        }
    }

    #[test]
    fn test_air_is_id_zero() {
        assert_eq!(Block::Air.id(), BlockId::AIR);
    }

    #[test]
    fn test_unknown_ids_are_passthrough() {
        assert_eq!(Block::from_id(BlockId(0xD)), None);
        assert_eq!(Block::from_id(BlockId(0xFF)), None);
    }

    #[test]
    fn test_vegetation_ids_match_original_table() {
        assert_eq!(Block::FlowerA.id(), BlockId(0x9));
        assert_eq!(Block::FlowerB.id(), BlockId(0xA));
        assert_eq!(Block::TallGrassA.id(), BlockId(0xB));
        assert_eq!(Block::TallGrassB.id(), BlockId(0xC));
    }
}
