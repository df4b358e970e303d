use std::sync::Arc;

use glam::I64Vec3;
use plotworld_core::{CellKind, PlotGrid};

use super::ChunkGenerator;
use crate::settings::PlotLevelSettings;
use crate::settings::preset::GeneratorPreset;
use crate::world::{BIOME_PLAINS, Chunk, ChunkPos};

/// The plot world generator: a bottom layer, a solid fill up to the ground
/// height, and a surface drawn from the grid classification, with the wall
/// ring raised one layer above the road.
pub struct MapgenPlots {
    settings: Arc<PlotLevelSettings>,
    grid: PlotGrid,
}

impl MapgenPlots {
    /// Name under which hosts register this generator.
    pub const NAME: &'static str = "plotworld";

    /// Creates a generator for the given world settings.
    #[must_use]
    pub fn new(settings: Arc<PlotLevelSettings>) -> Self {
        let grid = settings.grid();
        Self { settings, grid }
    }

    /// The canonical preset this generator was created with, in the form
    /// hosts persist alongside the world.
    #[must_use]
    pub fn preset(&self) -> GeneratorPreset {
        self.settings.preset()
    }
}

impl ChunkGenerator for MapgenPlots {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn generate_chunk(&self, pos: ChunkPos) -> Chunk {
        let settings = &*self.settings;
        let ground = settings.ground_height;
        // one layer above the ground for the wall ring
        let mut chunk = Chunk::new(pos, ground + 2, BIOME_PLAINS);
        let (origin_x, origin_z) = pos.column_origin();

        for local_z in 0..ChunkPos::SIZE {
            for local_x in 0..ChunkPos::SIZE {
                chunk.set_block(local_x, 0, local_z, settings.bottom_block);
                for y in 1..ground {
                    chunk.set_block(local_x, y, local_z, settings.plot_fill_block);
                }
                let x = origin_x + i64::from(local_x);
                let z = origin_z + i64::from(local_z);
                match self.grid.classify(x, z) {
                    CellKind::Plot => {
                        chunk.set_block(local_x, ground, local_z, settings.plot_floor_block);
                    }
                    CellKind::Road => {
                        chunk.set_block(local_x, ground, local_z, settings.road_block);
                    }
                    CellKind::Wall => {
                        // the wall band's walking surface is road material
                        chunk.set_block(local_x, ground, local_z, settings.road_block);
                        chunk.set_block(local_x, ground + 1, local_z, settings.wall_block);
                    }
                }
            }
        }

        chunk
    }

    fn spawn_point(&self) -> I64Vec3 {
        I64Vec3::new(0, i64::from(self.settings.ground_height) + 1, 0)
    }
}
