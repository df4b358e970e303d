pub mod plots;

use glam::I64Vec3;

use super::{Chunk, ChunkPos};

/// A source of freshly generated chunks.
///
/// Implementations must be pure functions of the chunk position and their own
/// immutable configuration. The host may generate independent chunks from
/// several threads at once, so no per-call state may be kept.
pub trait ChunkGenerator: Send + Sync {
    /// The generator's registered name.
    fn name(&self) -> &'static str;

    /// Produces the chunk at the given position.
    fn generate_chunk(&self, pos: ChunkPos) -> Chunk;

    /// The world's fixed spawn point.
    fn spawn_point(&self) -> I64Vec3;
}
