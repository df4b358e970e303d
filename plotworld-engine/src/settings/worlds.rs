//! The world-scoped settings file and the registry of loaded worlds.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use flexstr::SharedStr;
use log::{debug, warn};
use serde::Deserialize;

use super::PlotLevelSettings;

/// The runtime flags a world's settings file may override.
///
/// These are the knobs not embedded in the generator preset; a missing file
/// or a missing key means the documented default.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct WorldConfig {
    /// whether plot owners may edit bordering road/wall blocks
    #[serde(rename = "EditBorderBlocks", default = "defaults::enabled")]
    pub edit_border_blocks: bool,
    /// whether non-liquid spread outside plots is allowed
    #[serde(rename = "AllowOutsidePlotSpread", default)]
    pub allow_outside_plot_spread: bool,
    /// whether liquids inside plots update at all
    #[serde(rename = "UpdatePlotLiquids", default)]
    pub update_plot_liquids: bool,
    /// whether non-player entities are frozen in place
    #[serde(rename = "RestrictEntityMovement", default = "defaults::enabled")]
    pub restrict_entity_movement: bool,
    /// whether combat between players is forbidden outside plots
    #[serde(rename = "RestrictPVP", default)]
    pub restrict_pvp: bool,
    /// whether entering a plot shows the status popup
    #[serde(rename = "ShowPlotPopup", default = "defaults::enabled")]
    pub show_plot_popup: bool,
    /// whether the host should leave fire random-ticking enabled
    #[serde(rename = "AllowFireTicking", default)]
    pub allow_fire_ticking: bool,
    /// rate limit for the bulk plot fill operation
    #[serde(rename = "FillBlocksPerTick", default = "defaults::fill_blocks_per_tick")]
    pub fill_blocks_per_tick: u32,
}

mod defaults {
    pub(super) const fn enabled() -> bool {
        true
    }

    pub(super) const fn fill_blocks_per_tick() -> u32 {
        256
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            edit_border_blocks: true,
            allow_outside_plot_spread: false,
            update_plot_liquids: false,
            restrict_entity_movement: true,
            restrict_pvp: false,
            show_plot_popup: true,
            allow_fire_ticking: false,
            fill_blocks_per_tick: 256,
        }
    }
}

impl WorldConfig {
    /// Parses a settings file's contents, falling back to the defaults on any
    /// malformed input.
    #[must_use]
    pub fn decode(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_else(|error| {
            warn!("could not parse world config, falling back to defaults: {error}");
            Self::default()
        })
    }

    /// Loads the settings file for a world.
    ///
    /// A missing file is the common case for worlds that never overrode
    /// anything and yields the defaults without a warning.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => Self::decode(&text),
            Err(error) => {
                debug!("no world config at {path}: {error}", path = path.display());
                Self::default()
            }
        }
    }
}

/// The settings of all currently loaded worlds, keyed by world name.
///
/// World load/unload bookkeeping itself is the host's concern; this registry
/// only owns the settings those lifecycle events produce.
#[derive(Default)]
pub struct WorldSettingsRegistry {
    worlds: HashMap<SharedStr, Arc<PlotLevelSettings>>,
}

impl WorldSettingsRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the settings of a freshly loaded world, replacing any stale
    /// entry from a previous load of the same world.
    pub fn insert(&mut self, settings: PlotLevelSettings) -> Arc<PlotLevelSettings> {
        let settings = Arc::new(settings);
        debug!("plot world '{name}' loaded", name = settings.name);
        self.worlds
            .insert(settings.name.clone(), Arc::clone(&settings));
        settings
    }

    /// Drops the settings of an unloaded world.
    /// Returns whether the world was actually registered.
    pub fn remove(&mut self, name: &str) -> bool {
        let removed = self.worlds.remove(name).is_some();
        if removed {
            debug!("plot world '{name}' unloaded");
        }
        removed
    }

    /// Returns the settings of a loaded world.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<PlotLevelSettings>> {
        self.worlds.get(name).cloned()
    }

    /// Returns whether a world of this name is currently loaded.
    #[must_use]
    pub fn is_loaded(&self, name: &str) -> bool {
        self.worlds.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::preset::GeneratorPreset;

    #[test]
    fn decode_overrides_and_defaults() {
        let config = WorldConfig::decode(r#"{"RestrictPVP":true,"UpdatePlotLiquids":true}"#);
        assert!(config.restrict_pvp);
        assert!(config.update_plot_liquids);
        assert!(config.edit_border_blocks);
        assert!(config.show_plot_popup);
        assert_eq!(256, config.fill_blocks_per_tick);
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        assert_eq!(WorldConfig::default(), WorldConfig::decode("not json"));
    }

    #[test]
    fn registry_tracks_loaded_worlds() {
        let mut registry = WorldSettingsRegistry::new();
        let settings = PlotLevelSettings::new(
            "plots".into(),
            &GeneratorPreset::default(),
            &WorldConfig::default(),
        );

        assert!(!registry.is_loaded("plots"));
        registry.insert(settings);
        assert!(registry.is_loaded("plots"));
        assert_eq!(
            Some(32),
            registry.get("plots").map(|settings| settings.plot_size)
        );

        assert!(registry.remove("plots"));
        assert!(!registry.remove("plots"));
        assert!(registry.get("plots").is_none());
    }
}
