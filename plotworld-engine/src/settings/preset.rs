//! The serializable generator preset.

use log::warn;
use serde::{Deserialize, Serialize};

/// The preset a world's generator was created with.
///
/// Hosts persist this string alongside the world, so the encoding has to be
/// canonical: decoding a previously encoded preset and encoding it again
/// yields the identical byte sequence. Block fields use the textual
/// `id[:meta]` form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratorPreset {
    /// road surface material
    #[serde(rename = "RoadBlock", default = "defaults::road_block")]
    pub road_block: String,
    /// wall ring material
    #[serde(rename = "WallBlock", default = "defaults::wall_block")]
    pub wall_block: String,
    /// plot interior surface material
    #[serde(rename = "PlotFloorBlock", default = "defaults::plot_floor_block")]
    pub plot_floor_block: String,
    /// material below the surface
    #[serde(rename = "PlotFillBlock", default = "defaults::plot_fill_block")]
    pub plot_fill_block: String,
    /// world floor material
    #[serde(rename = "BottomBlock", default = "defaults::bottom_block")]
    pub bottom_block: String,
    /// width of the road band
    #[serde(rename = "RoadWidth", default = "defaults::road_width")]
    pub road_width: i64,
    /// side length of a plot interior
    #[serde(rename = "PlotSize", default = "defaults::plot_size")]
    pub plot_size: i64,
    /// height of the generated ground layer
    #[serde(rename = "GroundHeight", default = "defaults::ground_height")]
    pub ground_height: i32,
}

/// Field defaults, shared between `serde` and `Default`.
mod defaults {
    pub(super) fn road_block() -> String {
        "5".to_owned()
    }

    pub(super) fn wall_block() -> String {
        "44".to_owned()
    }

    pub(super) fn plot_floor_block() -> String {
        "2".to_owned()
    }

    pub(super) fn plot_fill_block() -> String {
        "3".to_owned()
    }

    pub(super) fn bottom_block() -> String {
        "7".to_owned()
    }

    pub(super) const fn road_width() -> i64 {
        7
    }

    pub(super) const fn plot_size() -> i64 {
        32
    }

    pub(super) const fn ground_height() -> i32 {
        64
    }
}

impl Default for GeneratorPreset {
    fn default() -> Self {
        Self {
            road_block: defaults::road_block(),
            wall_block: defaults::wall_block(),
            plot_floor_block: defaults::plot_floor_block(),
            plot_fill_block: defaults::plot_fill_block(),
            bottom_block: defaults::bottom_block(),
            road_width: defaults::road_width(),
            plot_size: defaults::plot_size(),
            ground_height: defaults::ground_height(),
        }
    }
}

impl GeneratorPreset {
    /// Decodes a preset string.
    ///
    /// A malformed preset falls back to the documented defaults; fields
    /// missing from an otherwise valid preset keep their individual default.
    /// World load never fails over a bad preset.
    #[must_use]
    pub fn decode(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_else(|error| {
            warn!("could not parse generator preset, falling back to defaults: {error}");
            Self::default()
        })
    }

    /// Encodes this preset into its canonical string form.
    #[must_use]
    pub fn encode(&self) -> String {
        #[expect(
            clippy::expect_used,
            reason = "a struct of plain strings and integers always serializes"
        )]
        serde_json::to_string(self).expect("preset serialization cannot fail")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_is_canonical() {
        let expected = concat!(
            r#"{"RoadBlock":"5","WallBlock":"44","PlotFloorBlock":"2","#,
            r#""PlotFillBlock":"3","BottomBlock":"7","RoadWidth":7,"#,
            r#""PlotSize":32,"GroundHeight":64}"#
        );
        assert_eq!(expected, GeneratorPreset::default().encode());
    }

    #[test]
    fn decode_then_encode_is_byte_identical() {
        let presets = [
            GeneratorPreset::default(),
            GeneratorPreset {
                road_block: "198:6".into(),
                wall_block: "44:2".into(),
                road_width: 5,
                plot_size: 48,
                ground_height: 80,
                ..GeneratorPreset::default()
            },
        ];
        for preset in presets {
            let encoded = preset.encode();
            assert_eq!(encoded, GeneratorPreset::decode(&encoded).encode());
        }
    }

    #[test]
    fn malformed_preset_falls_back_to_defaults() {
        assert_eq!(GeneratorPreset::default(), GeneratorPreset::decode("{"));
        assert_eq!(GeneratorPreset::default(), GeneratorPreset::decode(""));
        assert_eq!(
            GeneratorPreset::default(),
            GeneratorPreset::decode(r#"{"RoadWidth":"seven"}"#)
        );
    }

    #[test]
    fn partial_preset_keeps_field_defaults() {
        let preset = GeneratorPreset::decode(r#"{"PlotSize":16,"RoadBlock":"1"}"#);
        assert_eq!(16, preset.plot_size);
        assert_eq!("1", preset.road_block);
        assert_eq!(7, preset.road_width);
        assert_eq!("44", preset.wall_block);
    }
}
