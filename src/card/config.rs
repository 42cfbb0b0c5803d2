//! Tunable card parameters.
//!
//! Distances are in world units (pixels for a 2D camera at scale 1),
//! durations in seconds.

use super::direction::Axis;
use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// How far the card must be dragged left or right before it leaves
    pub horizontal_edge_offset: f32,
    /// How far the card must be dragged up or down before it leaves
    pub vertical_edge_offset: f32,

    /// Overshoot past rest in the first rubber band pass.
    ///
    /// This is the full overshoot for releases at least this far from rest.
    /// Closer releases scale both passes by `distance / rubber_band_first_pass`,
    /// so a card nudged a few pixels does not swing further than it moved.
    pub rubber_band_first_pass: f32,
    /// Overshoot back toward the release side in the second pass (must not
    /// exceed the first). Scaled with the first pass.
    pub rubber_band_second_pass: f32,
    /// Total duration of the three rubber band passes
    pub rubber_band_duration: f32,

    pub leave_duration: f32,
    pub show_duration: f32,
    /// Time a demo spends "dragging" before it leaves
    pub demo_drag_duration: f32,

    /// 1.0 rotates a quarter turn at a full frame-width drag, less rotates less
    pub rotation_factor: f32,
    /// How quickly an overlay fades in relative to the edge offset
    pub overlay_opacity_factor: f32,
    /// How quickly the card fades when dragged toward an edge with an overlay
    pub view_opacity_factor: f32,
    /// How quickly the card fades when dragged sideways without an overlay
    pub view_rotation_opacity_factor: f32,
    /// The card never fades below this while on screen
    pub min_view_opacity: f32,

    /// Starting rotation for `show_from_left`/`show_from_right`
    pub start_rotation_degrees: f32,
    /// How many frame extents a leaving card travels
    pub leave_travel_factor: f32,
    /// Seconds of release velocity added to the offset before threshold checks.
    /// 0.0 disables flinging.
    pub velocity_projection: f32,

    /// Whether scripted demo exits notify the delegate
    pub demo_notifies_delegate: bool,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            horizontal_edge_offset: 65.0,
            vertical_edge_offset: 65.0,
            rubber_band_first_pass: 25.0,
            rubber_band_second_pass: 10.0,
            rubber_band_duration: 0.75,
            leave_duration: 0.5,
            show_duration: 0.5,
            demo_drag_duration: 0.6,
            rotation_factor: 0.25,
            overlay_opacity_factor: 0.5,
            view_opacity_factor: 0.15,
            view_rotation_opacity_factor: 0.5,
            min_view_opacity: 0.2,
            start_rotation_degrees: 60.0,
            leave_travel_factor: 1.5,
            velocity_projection: 0.0,
            demo_notifies_delegate: false,
        }
    }
}

impl CardConfig {
    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: CardConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn edge_offset(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.horizontal_edge_offset,
            Axis::Vertical => self.vertical_edge_offset,
        }
    }

    pub fn start_rotation(&self) -> f32 {
        self.start_rotation_degrees.to_radians()
    }

    pub fn with_edge_offsets(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal_edge_offset = horizontal;
        self.vertical_edge_offset = vertical;
        self
    }

    pub fn with_demo_notifies_delegate(mut self, notify: bool) -> Self {
        self.demo_notifies_delegate = notify;
        self
    }

    pub fn with_velocity_projection(mut self, seconds: f32) -> Self {
        self.velocity_projection = seconds;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("horizontal_edge_offset", self.horizontal_edge_offset),
            ("vertical_edge_offset", self.vertical_edge_offset),
            ("rubber_band_duration", self.rubber_band_duration),
            ("leave_duration", self.leave_duration),
            ("show_duration", self.show_duration),
            ("demo_drag_duration", self.demo_drag_duration),
            ("leave_travel_factor", self.leave_travel_factor),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }

        let non_negative = [
            ("rubber_band_first_pass", self.rubber_band_first_pass),
            ("rubber_band_second_pass", self.rubber_band_second_pass),
            ("rotation_factor", self.rotation_factor),
            ("overlay_opacity_factor", self.overlay_opacity_factor),
            ("view_opacity_factor", self.view_opacity_factor),
            (
                "view_rotation_opacity_factor",
                self.view_rotation_opacity_factor,
            ),
            ("start_rotation_degrees", self.start_rotation_degrees),
            ("velocity_projection", self.velocity_projection),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }

        if self.rubber_band_second_pass > self.rubber_band_first_pass {
            return Err(ConfigError::OutOfRange {
                field: "rubber_band_second_pass",
                value: self.rubber_band_second_pass,
            });
        }
        if self.rotation_factor > 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "rotation_factor",
                value: self.rotation_factor,
            });
        }
        if !(0.0..1.0).contains(&self.min_view_opacity) {
            return Err(ConfigError::OutOfRange {
                field: "min_view_opacity",
                value: self.min_view_opacity,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(CardConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CardConfig::from_json(r#"{ "horizontal_edge_offset": 90.0 }"#).unwrap();

        assert_eq!(config.horizontal_edge_offset, 90.0);
        assert_eq!(config.vertical_edge_offset, 65.0);
        assert!(!config.demo_notifies_delegate);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = CardConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CardConfig::load("/definitely/not/here/card_config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_embedded_demo_config_is_valid() {
        let json = include_str!("../../assets/card_config.json");
        assert!(CardConfig::from_json(json).is_ok());
    }

    #[test]
    fn test_rejects_zero_threshold() {
        let err = CardConfig::from_json(r#"{ "vertical_edge_offset": 0.0 }"#).unwrap_err();
        assert_eq!(
            err,
            ConfigError::OutOfRange {
                field: "vertical_edge_offset",
                value: 0.0
            }
        );
    }

    #[test]
    fn test_rejects_second_pass_larger_than_first() {
        let config = CardConfig {
            rubber_band_first_pass: 5.0,
            rubber_band_second_pass: 10.0,
            ..CardConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "rubber_band_second_pass",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_full_transparency_floor() {
        let config = CardConfig {
            min_view_opacity: 1.0,
            ..CardConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
