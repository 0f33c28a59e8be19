//! Terrain size text input.
//!
//! The terrain fields never reject input: anything that is not an integer
//! falls back to the minimum extent, and integers are clamped into range.

use crowdscape_core::Vec3;
use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;

/// Which horizontal extent a text field edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainAxis {
    /// X extent
    Width,
    /// Z extent (shown as "height" in the terrain panel)
    Depth,
}

/// Allowed range for a terrain extent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtentLimits {
    pub min: i64,
    pub max: i64,
    /// Used for empty or non-numeric input
    pub fallback: i64,
}

impl Default for ExtentLimits {
    fn default() -> Self {
        Self {
            min: 10,
            max: 200,
            fallback: 10,
        }
    }
}

impl ExtentLimits {
    /// Parse a field's text into an extent.
    pub fn parse_extent(&self, text: &str) -> i64 {
        match text.trim().parse::<i64>() {
            Ok(value) => value.clamp(self.min, self.max),
            // Integers past i64 still clamp
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => self.max,
            Err(e) if *e.kind() == IntErrorKind::NegOverflow => self.min,
            Err(_) => self.fallback,
        }
    }
}

/// Terrain size with one axis replaced by the parsed text.
///
/// Returns the new size and the normalized text to write back to the field.
pub fn apply_extent(
    current: Vec3,
    axis: TerrainAxis,
    text: &str,
    limits: &ExtentLimits,
) -> (Vec3, String) {
    let extent = limits.parse_extent(text);
    let mut size = current;
    match axis {
        TerrainAxis::Width => size.x = extent as f32,
        TerrainAxis::Depth => size.z = extent as f32,
    }
    (size, extent.to_string())
}

/// Text shown in a terrain field for the given size
pub fn extent_text(size: Vec3, axis: TerrainAxis) -> String {
    let value = match axis {
        TerrainAxis::Width => size.x,
        TerrainAxis::Depth => size.z,
    };
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forgiving_parse() {
        let limits = ExtentLimits::default();
        assert_eq!(limits.parse_extent("abc"), 10);
        assert_eq!(limits.parse_extent("500"), 200);
        assert_eq!(limits.parse_extent(""), 10);
        assert_eq!(limits.parse_extent("75"), 75);
    }

    #[test]
    fn clamps_low_and_tolerates_whitespace() {
        let limits = ExtentLimits::default();
        assert_eq!(limits.parse_extent("-40"), 10);
        assert_eq!(limits.parse_extent(" 120 "), 120);
        assert_eq!(limits.parse_extent("12.5"), 10);
    }

    #[test]
    fn oversized_integers_clamp() {
        let limits = ExtentLimits::default();
        assert_eq!(limits.parse_extent("99999999999999999999999"), 200);
        assert_eq!(limits.parse_extent("-99999999999999999999999"), 10);
        assert_eq!(limits.parse_extent("+99999999999999999999999 "), 200);
    }

    #[test]
    fn apply_replaces_only_one_axis() {
        let limits = ExtentLimits::default();
        let current = Vec3::new(30.0, 600.0, 30.0);

        let (size, text) = apply_extent(current, TerrainAxis::Width, "500", &limits);
        assert_eq!(size, Vec3::new(200.0, 600.0, 30.0));
        assert_eq!(text, "200");

        let (size, text) = apply_extent(current, TerrainAxis::Depth, "", &limits);
        assert_eq!(size, Vec3::new(30.0, 600.0, 10.0));
        assert_eq!(text, "10");
    }

    #[test]
    fn field_text_for_size() {
        let size = Vec3::new(75.0, 600.0, 40.0);
        assert_eq!(extent_text(size, TerrainAxis::Width), "75");
        assert_eq!(extent_text(size, TerrainAxis::Depth), "40");
    }
}
