use super::config::CardConfig;
use super::direction::{AllowedDirections, Axis, Direction, DirectionMap};
use bevy::math::Vec2;
use std::f32::consts::FRAC_PI_2;

/// Everything a renderer needs to draw the card at one offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardVisuals {
    /// Radians, counter-clockwise positive; negative when dragged right
    pub rotation: f32,
    pub opacity: f32,
    pub overlays: DirectionMap<f32>,
}

impl CardVisuals {
    pub const REST: CardVisuals = CardVisuals {
        rotation: 0.0,
        opacity: 1.0,
        overlays: DirectionMap {
            left: 0.0,
            right: 0.0,
            up: 0.0,
            down: 0.0,
        },
    };
}

/// Maps a drag offset to rotation, card opacity and overlay opacity
#[derive(Debug, Clone, Copy)]
pub struct VisualMapper<'a> {
    config: &'a CardConfig,
    frame_size: Vec2,
    allowed: AllowedDirections,
    has_overlay: DirectionMap<bool>,
}

impl<'a> VisualMapper<'a> {
    pub fn new(
        config: &'a CardConfig,
        frame_size: Vec2,
        allowed: AllowedDirections,
        has_overlay: DirectionMap<bool>,
    ) -> Self {
        VisualMapper {
            config,
            frame_size,
            allowed,
            has_overlay,
        }
    }

    pub fn map(&self, offset: Vec2) -> CardVisuals {
        let offset = self.allowed.mask(offset);

        CardVisuals {
            rotation: self.rotation(offset.x),
            opacity: self.opacity(offset),
            overlays: self.overlays(offset),
        }
    }

    /// Largest rotation magnitude the mapper will produce
    pub fn max_rotation(&self) -> f32 {
        self.config.rotation_factor * FRAC_PI_2
    }

    fn rotation(&self, x: f32) -> f32 {
        if self.frame_size.x <= 0.0 {
            return 0.0;
        }
        // Dragging right tips the card clockwise, which is a negative z rotation
        let progress = (x / self.frame_size.x).clamp(-1.0, 1.0);
        -progress * self.max_rotation()
    }

    fn opacity(&self, offset: Vec2) -> f32 {
        let horizontal = self.axis_opacity(Axis::Horizontal, offset.x);
        let vertical = self.axis_opacity(Axis::Vertical, offset.y);
        horizontal
            .min(vertical)
            .clamp(self.config.min_view_opacity, 1.0)
    }

    fn axis_opacity(&self, axis: Axis, value: f32) -> f32 {
        let Some(direction) = Direction::from_component(axis, value) else {
            return 1.0;
        };
        let factor = match (axis, *self.has_overlay.get(direction)) {
            (_, true) => self.config.view_opacity_factor,
            (Axis::Horizontal, false) => self.config.view_rotation_opacity_factor,
            (Axis::Vertical, false) => 0.0,
        };
        1.0 - factor * self.progress(axis, value)
    }

    fn overlays(&self, offset: Vec2) -> DirectionMap<f32> {
        let mut overlays = DirectionMap::splat(0.0);
        let Some((direction, progress)) = self.active_direction(offset) else {
            return overlays;
        };
        if *self.has_overlay.get(direction) {
            *overlays.get_mut(direction) = (self.config.overlay_opacity_factor * progress).min(1.0);
        }
        overlays
    }

    /// The direction the card is mostly being pulled toward, relative to
    /// each axis' threshold. Horizontal wins ties.
    fn active_direction(&self, offset: Vec2) -> Option<(Direction, f32)> {
        let horizontal = self.progress(Axis::Horizontal, offset.x);
        let vertical = self.progress(Axis::Vertical, offset.y);

        if horizontal == 0.0 && vertical == 0.0 {
            return None;
        }
        if horizontal >= vertical {
            Direction::from_component(Axis::Horizontal, offset.x).map(|d| (d, horizontal))
        } else {
            Direction::from_component(Axis::Vertical, offset.y).map(|d| (d, vertical))
        }
    }

    /// Distance along an axis as a fraction of that axis' edge offset
    fn progress(&self, axis: Axis, value: f32) -> f32 {
        value.abs() / self.config.edge_offset(axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Vec2 = Vec2::new(300.0, 400.0);

    fn mapper(config: &CardConfig, overlays: bool) -> VisualMapper<'_> {
        VisualMapper::new(
            config,
            FRAME,
            AllowedDirections::all(),
            DirectionMap::splat(overlays),
        )
    }

    #[test]
    fn test_rest_maps_to_rest_visuals() {
        let config = CardConfig::default();
        assert_eq!(mapper(&config, true).map(Vec2::ZERO), CardVisuals::REST);
    }

    #[test]
    fn test_rotation_zero_without_horizontal_offset() {
        let config = CardConfig::default();
        let visuals = mapper(&config, false).map(Vec2::new(0.0, 120.0));
        assert_eq!(visuals.rotation, 0.0);
    }

    #[test]
    fn test_rotation_monotonic_until_clamp() {
        let config = CardConfig::default();
        let mapper = mapper(&config, false);

        let mut previous = mapper.map(Vec2::new(-FRAME.x, 0.0)).rotation;
        let mut x = -FRAME.x + 10.0;
        while x <= FRAME.x {
            let rotation = mapper.map(Vec2::new(x, 0.0)).rotation;
            assert!(
                rotation < previous,
                "rotation should strictly decrease as x grows: {} !< {} at x={}",
                rotation,
                previous,
                x
            );
            previous = rotation;
            x += 10.0;
        }

        let clamped = mapper.map(Vec2::new(FRAME.x * 3.0, 0.0)).rotation;
        assert!((clamped + mapper.max_rotation()).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_sign_follows_drag() {
        let config = CardConfig::default();
        let mapper = mapper(&config, false);
        assert!(mapper.map(Vec2::new(30.0, 0.0)).rotation < 0.0);
        assert!(mapper.map(Vec2::new(-30.0, 0.0)).rotation > 0.0);
    }

    #[test]
    fn test_opacity_never_below_floor() {
        let config = CardConfig::default();
        let visuals = mapper(&config, false).map(Vec2::new(-10_000.0, 0.0));
        assert_eq!(visuals.opacity, config.min_view_opacity);
    }

    #[test]
    fn test_overlay_fades_in_only_for_active_direction() {
        let config = CardConfig::default();
        let visuals = mapper(&config, true).map(Vec2::new(65.0, -20.0));

        assert!((visuals.overlays.right - 0.5).abs() < 1e-6);
        assert_eq!(visuals.overlays.left, 0.0);
        assert_eq!(visuals.overlays.up, 0.0);
        assert_eq!(visuals.overlays.down, 0.0);

        let far = mapper(&config, true).map(Vec2::new(0.0, -1000.0));
        assert_eq!(far.overlays.down, 1.0);
    }

    #[test]
    fn test_overlay_fade_slows_card_fade() {
        let config = CardConfig::default();
        let with_overlay = mapper(&config, true).map(Vec2::new(65.0, 0.0));
        let without_overlay = mapper(&config, false).map(Vec2::new(65.0, 0.0));

        assert!((with_overlay.opacity - 0.85).abs() < 1e-6);
        assert!((without_overlay.opacity - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_disallowed_direction_has_no_visual_effect() {
        let config = CardConfig::default();
        let allowed = AllowedDirections {
            left: false,
            ..AllowedDirections::all()
        };
        let mapper = VisualMapper::new(&config, FRAME, allowed, DirectionMap::splat(true));

        assert_eq!(mapper.map(Vec2::new(-200.0, 0.0)), CardVisuals::REST);
    }
}
