//! Per-world configuration assembled from the generator preset and the
//! world-scoped settings file.

pub mod preset;
pub mod worlds;

use flexstr::SharedStr;
use log::warn;
use plotworld_core::{BlockId, PlotGrid};

use crate::settings::preset::GeneratorPreset;
use crate::settings::worlds::WorldConfig;

/// Everything the generator and the rule engine need to know about one world.
///
/// Created on world load from the generator preset plus the world's override
/// file and immutable afterwards; a world reload recreates it. The grid
/// parameters in particular must never change while the world is live, since
/// every previously computed plot boundary depends on them.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotLevelSettings {
    /// name of the world these settings belong to
    pub name: SharedStr,
    /// side length of a plot interior
    pub plot_size: i64,
    /// width of the road band between plot interiors
    pub road_width: i64,
    /// height of the generated ground layer
    pub ground_height: i32,
    /// road surface material
    pub road_block: BlockId,
    /// material of the raised wall ring
    pub wall_block: BlockId,
    /// plot interior surface material
    pub plot_floor_block: BlockId,
    /// material below the surface
    pub plot_fill_block: BlockId,
    /// material of the world floor at y = 0
    pub bottom_block: BlockId,
    /// whether plot owners may edit bordering road/wall blocks
    pub edit_border_blocks: bool,
    /// whether non-liquid spread outside plots is allowed
    pub allow_outside_plot_spread: bool,
    /// whether liquids inside plots update at all
    pub update_plot_liquids: bool,
    /// whether non-player entities are frozen in place
    pub restrict_entity_movement: bool,
    /// whether combat between players is forbidden outside plots
    pub restrict_pvp: bool,
    /// whether entering a plot shows the status popup
    pub show_plot_popup: bool,
    /// whether the host should leave fire random-ticking enabled
    pub allow_fire_ticking: bool,
    /// rate limit for the bulk plot fill operation
    pub fill_blocks_per_tick: u32,
}

impl PlotLevelSettings {
    /// Assembles the settings for a named world.
    ///
    /// Malformed block ids in the preset fall back to their documented
    /// defaults; world load never fails over configuration.
    #[must_use]
    pub fn new(name: SharedStr, preset: &GeneratorPreset, config: &WorldConfig) -> Self {
        Self {
            name,
            plot_size: preset.plot_size.max(1),
            road_width: preset.road_width.max(1),
            ground_height: preset.ground_height.max(1),
            road_block: parse_block(&preset.road_block, BlockId::PLANKS),
            wall_block: parse_block(&preset.wall_block, BlockId::STONE_SLAB),
            plot_floor_block: parse_block(&preset.plot_floor_block, BlockId::GRASS),
            plot_fill_block: parse_block(&preset.plot_fill_block, BlockId::DIRT),
            bottom_block: parse_block(&preset.bottom_block, BlockId::BEDROCK),
            edit_border_blocks: config.edit_border_blocks,
            allow_outside_plot_spread: config.allow_outside_plot_spread,
            update_plot_liquids: config.update_plot_liquids,
            restrict_entity_movement: config.restrict_entity_movement,
            restrict_pvp: config.restrict_pvp,
            show_plot_popup: config.show_plot_popup,
            allow_fire_ticking: config.allow_fire_ticking,
            fill_blocks_per_tick: config.fill_blocks_per_tick,
        }
    }

    /// Returns the partition grid these settings describe.
    #[must_use]
    pub const fn grid(&self) -> PlotGrid {
        PlotGrid::new(self.plot_size, self.road_width)
    }

    /// Re-encodes the generator parameters as their canonical preset.
    #[must_use]
    pub fn preset(&self) -> GeneratorPreset {
        GeneratorPreset {
            road_block: self.road_block.to_string(),
            wall_block: self.wall_block.to_string(),
            plot_floor_block: self.plot_floor_block.to_string(),
            plot_fill_block: self.plot_fill_block.to_string(),
            bottom_block: self.bottom_block.to_string(),
            road_width: self.road_width,
            plot_size: self.plot_size,
            ground_height: self.ground_height,
        }
    }
}

fn parse_block(text: &str, default: BlockId) -> BlockId {
    text.parse().unwrap_or_else(|error| {
        warn!("invalid block id '{text}', falling back to {default}: {error}");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_palette() {
        let settings = PlotLevelSettings::new(
            "plots".into(),
            &GeneratorPreset::default(),
            &WorldConfig::default(),
        );
        assert_eq!(32, settings.plot_size);
        assert_eq!(7, settings.road_width);
        assert_eq!(64, settings.ground_height);
        assert_eq!(BlockId::PLANKS, settings.road_block);
        assert_eq!(BlockId::STONE_SLAB, settings.wall_block);
        assert_eq!(BlockId::GRASS, settings.plot_floor_block);
        assert_eq!(BlockId::DIRT, settings.plot_fill_block);
        assert_eq!(BlockId::BEDROCK, settings.bottom_block);
        assert!(settings.edit_border_blocks);
        assert!(settings.restrict_entity_movement);
        assert!(!settings.restrict_pvp);
        assert_eq!(256, settings.fill_blocks_per_tick);
    }

    #[test]
    fn malformed_blocks_fall_back_per_field() {
        let preset = GeneratorPreset {
            road_block: "1:1".into(),
            wall_block: "slab".into(),
            ..GeneratorPreset::default()
        };
        let settings =
            PlotLevelSettings::new("plots".into(), &preset, &WorldConfig::default());
        assert_eq!(BlockId::new(1, 1), settings.road_block);
        assert_eq!(BlockId::STONE_SLAB, settings.wall_block);
    }

    #[test]
    fn degenerate_sizes_are_clamped() {
        let preset = GeneratorPreset {
            plot_size: 0,
            road_width: -3,
            ground_height: -1,
            ..GeneratorPreset::default()
        };
        let settings =
            PlotLevelSettings::new("plots".into(), &preset, &WorldConfig::default());
        assert_eq!(1, settings.plot_size);
        assert_eq!(1, settings.road_width);
        assert_eq!(1, settings.ground_height);
    }

    #[test]
    fn preset_survives_the_settings_round_trip() {
        let preset = GeneratorPreset {
            wall_block: "44:2".into(),
            plot_size: 16,
            ..GeneratorPreset::default()
        };
        let settings =
            PlotLevelSettings::new("plots".into(), &preset, &WorldConfig::default());
        assert_eq!(preset, settings.preset());
    }
}
