//! World-level building blocks: chunk coordinates, the generated chunk
//! buffer, and terrain generation.

pub mod generation;

use std::fmt::{self, Display};

use plotworld_core::BlockId;

/// The biome every generated column belongs to. A generator instance uses one
/// constant biome for the whole world.
pub const BIOME_PLAINS: u8 = 1;

/// The position of a chunk.
///
/// The position is _not_ measured in world coordinates. It can be viewed as a
/// signed 2D-index over the plane of 16x16 column regions, where `(0, 0)`
/// contains the world origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkPos {
    /// chunk index along the x axis
    pub x: i64,
    /// chunk index along the z axis
    pub z: i64,
}

impl ChunkPos {
    /// number of bit shifts to perform in order to convert between world and
    /// chunk coordinates.
    pub const SIZE_BITS: u32 = 4;
    /// Number of columns per chunk in each dimension.
    pub const SIZE: u32 = 1 << Self::SIZE_BITS;
    /// Mask to be used to address the bits of a world coordinate that make up
    /// the position within its chunk.
    pub const SIZE_MASK: u32 = Self::SIZE - 1;
    /// number of columns within a single chunk
    pub const COLUMN_COUNT: u32 = Self::SIZE * Self::SIZE;

    /// Converts a world column coordinate into that of the containing chunk.
    ///
    /// The arithmetic right shift performs the floor division, so negative
    /// coordinates land in the correct chunk.
    #[must_use]
    pub const fn for_column(x: i64, z: i64) -> Self {
        Self {
            x: x >> Self::SIZE_BITS,
            z: z >> Self::SIZE_BITS,
        }
    }

    /// Returns the minimum world coordinate covered by this chunk.
    #[must_use]
    pub const fn column_origin(self) -> (i64, i64) {
        (self.x << Self::SIZE_BITS, self.z << Self::SIZE_BITS)
    }
}

impl Display for ChunkPos {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        // double square brackets indicate that a chunk is bigger than a single column
        write!(formatter, "[[{x}, {z}]]", x = self.x, z = self.z)
    }
}

/// The block contents of one generated 16x16 chunk, layered from y = 0
/// upwards. Layers nobody wrote to consist of air.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    pos: ChunkPos,
    biome: u8,
    layer_count: i32,
    blocks: Vec<BlockId>,
}

impl Chunk {
    /// Creates an air-filled chunk with the given number of vertical layers.
    #[must_use]
    pub fn new(pos: ChunkPos, layer_count: i32, biome: u8) -> Self {
        let layers = usize::try_from(layer_count).unwrap_or(0).max(1);
        Self {
            pos,
            biome,
            layer_count: layer_count.max(1),
            blocks: vec![BlockId::AIR; layers * Self::layer_len()],
        }
    }

    const fn layer_len() -> usize {
        ChunkPos::COLUMN_COUNT as usize
    }

    fn index(&self, local_x: u32, y: i32, local_z: u32) -> Option<usize> {
        if y < 0 || y >= self.layer_count {
            return None;
        }
        let layer = usize::try_from(y).ok()?;
        let local_x = (local_x & ChunkPos::SIZE_MASK) as usize;
        let local_z = (local_z & ChunkPos::SIZE_MASK) as usize;
        Some(layer * Self::layer_len() + local_z * ChunkPos::SIZE as usize + local_x)
    }

    /// Writes one block. Local coordinates wrap into the chunk; writes above
    /// the top layer or below the floor are dropped.
    pub fn set_block(&mut self, local_x: u32, y: i32, local_z: u32, block: BlockId) {
        if let Some(index) = self.index(local_x, y, local_z) {
            if let Some(slot) = self.blocks.get_mut(index) {
                *slot = block;
            }
        }
    }

    /// Reads one block. Anything outside the buffer is air.
    #[must_use]
    pub fn block(&self, local_x: u32, y: i32, local_z: u32) -> BlockId {
        self.index(local_x, y, local_z)
            .and_then(|index| self.blocks.get(index))
            .copied()
            .unwrap_or(BlockId::AIR)
    }

    /// Location of this chunk within the world.
    #[must_use]
    pub const fn pos(&self) -> ChunkPos {
        self.pos
    }

    /// The biome of every column of this chunk.
    #[must_use]
    pub const fn biome(&self) -> u8 {
        self.biome
    }

    /// Number of vertical layers this chunk holds.
    #[must_use]
    pub const fn layer_count(&self) -> i32 {
        self.layer_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_pos_floor_divides() {
        assert_eq!(ChunkPos { x: 0, z: 0 }, ChunkPos::for_column(0, 15));
        assert_eq!(ChunkPos { x: 1, z: 0 }, ChunkPos::for_column(16, 3));
        assert_eq!(ChunkPos { x: -1, z: -1 }, ChunkPos::for_column(-1, -16));
        assert_eq!(ChunkPos { x: -2, z: 2 }, ChunkPos::for_column(-17, 32));
    }

    #[test]
    fn chunk_pos_round_trips_through_origin() {
        let pos = ChunkPos { x: -3, z: 7 };
        let (x, z) = pos.column_origin();
        assert_eq!(pos, ChunkPos::for_column(x, z));
        assert_eq!((-48, 112), (x, z));
    }

    #[test]
    fn blocks_default_to_air() {
        let chunk = Chunk::new(ChunkPos { x: 0, z: 0 }, 4, BIOME_PLAINS);
        assert_eq!(BlockId::AIR, chunk.block(3, 2, 5));
        assert_eq!(BlockId::AIR, chunk.block(3, 9, 5));
    }

    #[test]
    fn out_of_range_writes_are_dropped() {
        let mut chunk = Chunk::new(ChunkPos { x: 0, z: 0 }, 4, BIOME_PLAINS);
        chunk.set_block(0, -1, 0, BlockId::BEDROCK);
        chunk.set_block(0, 4, 0, BlockId::BEDROCK);
        chunk.set_block(1, 2, 1, BlockId::DIRT);
        assert_eq!(BlockId::AIR, chunk.block(0, 3, 0));
        assert_eq!(BlockId::DIRT, chunk.block(1, 2, 1));
    }
}
