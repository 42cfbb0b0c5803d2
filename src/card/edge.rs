use super::config::CardConfig;
use super::direction::{AllowedDirections, Axis, Direction};
use bevy::math::Vec2;

/// Outcome of letting go of a dragged card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    Leave(Direction),
    RubberBand,
}

/// Decide whether a released card leaves or springs back.
///
/// Thresholds are inclusive. When both axes cross, horizontal wins.
/// With `velocity_projection` set, the release velocity extends the offset
/// before it is compared.
pub fn evaluate_release(
    offset: Vec2,
    velocity: Option<Vec2>,
    allowed: &AllowedDirections,
    config: &CardConfig,
) -> Release {
    let projected = match velocity {
        Some(v) if config.velocity_projection > 0.0 => offset + v * config.velocity_projection,
        _ => offset,
    };

    [Axis::Horizontal, Axis::Vertical]
        .into_iter()
        .find_map(|axis| crossed_edge(axis, projected, allowed, config))
        .map_or(Release::RubberBand, Release::Leave)
}

fn crossed_edge(
    axis: Axis,
    offset: Vec2,
    allowed: &AllowedDirections,
    config: &CardConfig,
) -> Option<Direction> {
    let value = axis.component(offset);
    let direction = Direction::from_component(axis, value)?;

    (allowed.allows(direction) && value.abs() >= config.edge_offset(axis)).then_some(direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(x: f32, y: f32) -> Release {
        evaluate_release(
            Vec2::new(x, y),
            None,
            &AllowedDirections::all(),
            &CardConfig::default(),
        )
    }

    #[test]
    fn test_below_threshold_rubber_bands() {
        for (x, y) in [(0.0, 0.0), (64.9, 0.0), (-64.9, 64.9), (30.0, -50.0)] {
            assert_eq!(release(x, y), Release::RubberBand, "offset ({}, {})", x, y);
        }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(release(65.0, 0.0), Release::Leave(Direction::Right));
        assert_eq!(release(-65.0, 0.0), Release::Leave(Direction::Left));
        assert_eq!(release(0.0, 65.0), Release::Leave(Direction::Up));
        assert_eq!(release(0.0, -65.0), Release::Leave(Direction::Down));
    }

    #[test]
    fn test_horizontal_takes_precedence() {
        assert_eq!(release(70.0, 500.0), Release::Leave(Direction::Right));
        assert_eq!(release(-70.0, -500.0), Release::Leave(Direction::Left));
    }

    #[test]
    fn test_disallowed_horizontal_falls_through_to_vertical() {
        let allowed = AllowedDirections {
            right: false,
            ..AllowedDirections::all()
        };
        let result = evaluate_release(
            Vec2::new(200.0, -80.0),
            None,
            &allowed,
            &CardConfig::default(),
        );
        assert_eq!(result, Release::Leave(Direction::Down));
    }

    #[test]
    fn test_disallowed_left_never_leaves() {
        let allowed = AllowedDirections {
            left: false,
            ..AllowedDirections::all()
        };
        let config = CardConfig::default();

        for x in [-65.0, -100.0, -1_000.0, -1.0e6] {
            assert_eq!(
                evaluate_release(Vec2::new(x, 0.0), None, &allowed, &config),
                Release::RubberBand
            );
        }
    }

    #[test]
    fn test_axes_use_their_own_threshold() {
        let config = CardConfig::default().with_edge_offsets(100.0, 40.0);
        let allowed = AllowedDirections::all();

        assert_eq!(
            evaluate_release(Vec2::new(80.0, 0.0), None, &allowed, &config),
            Release::RubberBand
        );
        assert_eq!(
            evaluate_release(Vec2::new(80.0, 45.0), None, &allowed, &config),
            Release::Leave(Direction::Up)
        );
    }

    #[test]
    fn test_velocity_ignored_unless_projection_enabled() {
        let fling = Some(Vec2::new(-2_000.0, 0.0));
        let allowed = AllowedDirections::all();

        let default = CardConfig::default();
        assert_eq!(
            evaluate_release(Vec2::new(-20.0, 0.0), fling, &allowed, &default),
            Release::RubberBand
        );

        let flingy = CardConfig::default().with_velocity_projection(0.05);
        assert_eq!(
            evaluate_release(Vec2::new(-20.0, 0.0), fling, &allowed, &flingy),
            Release::Leave(Direction::Left)
        );
    }
}
