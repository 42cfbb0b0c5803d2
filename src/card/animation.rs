//! Keyframed card motion: rubber band returns, exits, entrances and demos.
//!
//! An [`Animation`] is a list of [`Segment`]s played back to back. Each
//! segment moves the offset between two points with an easing curve and may
//! fade the card or override its rotation. The card samples the animation
//! every frame and runs the offset through the visual mapper, so rotation and
//! opacity track the animated offset the same way they track a drag.

use super::config::CardConfig;
use super::direction::{Axis, Direction};
use super::easing::{Easing, ease_in_out_cubic, ease_out_cubic, ease_out_quad};
use bevy::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fade {
    None,
    /// Opacity scale goes 0 -> 1 over the segment
    In,
    /// Opacity scale goes 1 -> 0 over the segment
    Out,
}

#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
    pub duration: f32,
    pub easing: Easing,
    pub fade: Fade,
    /// Replaces the mapped rotation, interpolated from `.0` to `.1`
    pub rotation: Option<(f32, f32)>,
}

impl Segment {
    pub fn new(from: Vec2, to: Vec2, duration: f32, easing: Easing) -> Self {
        Segment {
            from,
            to,
            duration,
            easing,
            fade: Fade::None,
            rotation: None,
        }
    }

    pub fn with_fade(mut self, fade: Fade) -> Self {
        self.fade = fade;
        self
    }

    pub fn with_rotation(mut self, from: f32, to: f32) -> Self {
        self.rotation = Some((from, to));
        self
    }

    fn sample(&self, t: f32) -> AnimationFrame {
        let eased = (self.easing)(t);
        let opacity_scale = match self.fade {
            Fade::None => 1.0,
            Fade::In => t,
            Fade::Out => 1.0 - t,
        };
        AnimationFrame {
            offset: self.from.lerp(self.to, eased),
            opacity_scale,
            rotation: self
                .rotation
                .map(|(from, to)| from + (to - from) * eased),
        }
    }
}

/// One sampled point of an animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub offset: Vec2,
    /// Multiplied into the mapped card opacity
    pub opacity_scale: f32,
    pub rotation: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct Animation {
    segments: Vec<Segment>,
    elapsed: f32,
}

impl Animation {
    pub fn new(segments: Vec<Segment>) -> Self {
        Animation {
            segments,
            elapsed: 0.0,
        }
    }

    /// Two-pass overshoot back to rest: past rest on the far side by the
    /// first pass, back by the second pass, then exactly onto `(0, 0)`.
    ///
    /// Releases closer to rest than the first pass overshoot proportionally
    /// less. Returns `None` when already at rest.
    pub fn rubber_band(from: Vec2, config: &CardConfig) -> Option<Self> {
        let distance = from.length();
        if distance == 0.0 {
            return None;
        }

        let toward = from / distance;
        let scale = if config.rubber_band_first_pass > 0.0 {
            (distance / config.rubber_band_first_pass).min(1.0)
        } else {
            0.0
        };
        let first = -toward * config.rubber_band_first_pass * scale;
        let second = toward * config.rubber_band_second_pass * scale;
        let pass = config.rubber_band_duration / 3.0;

        Some(Animation::new(vec![
            Segment::new(from, first, pass, ease_in_out_cubic),
            Segment::new(first, second, pass, ease_in_out_cubic),
            Segment::new(second, Vec2::ZERO, pass, ease_in_out_cubic),
        ]))
    }

    /// Carry the card off screen through `direction`, fading it out
    pub fn leave(from: Vec2, direction: Direction, frame_size: Vec2, config: &CardConfig) -> Self {
        let to = exit_point(from, direction, frame_size, config);
        Animation::new(vec![
            Segment::new(from, to, config.leave_duration, ease_out_quad).with_fade(Fade::Out),
        ])
    }

    /// Bring the card in from off screen on the `from` side, fading it in.
    /// Horizontal entrances also unwind from the configured start rotation.
    pub fn show(from: Direction, frame_size: Vec2, config: &CardConfig) -> Self {
        let start = exit_point(Vec2::ZERO, from, frame_size, config);
        let mut segment =
            Segment::new(start, Vec2::ZERO, config.show_duration, ease_out_cubic).with_fade(Fade::In);
        if from.axis() == Axis::Horizontal {
            // Same tilt a drag toward that side would produce
            segment = segment.with_rotation(-from.sign() * config.start_rotation(), 0.0);
        }
        Animation::new(vec![segment])
    }

    /// Pretend a user dragged the card past the threshold and let go
    pub fn demo(direction: Direction, frame_size: Vec2, config: &CardConfig) -> Self {
        let past_edge = direction.unit()
            * (config.edge_offset(direction.axis()) + config.rubber_band_first_pass);

        let mut segments = vec![Segment::new(
            Vec2::ZERO,
            past_edge,
            config.demo_drag_duration,
            ease_in_out_cubic,
        )];
        segments.extend(Animation::leave(past_edge, direction, frame_size, config).segments);
        Animation::new(segments)
    }

    pub fn duration(&self) -> f32 {
        self.segments.iter().map(|s| s.duration).sum()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration()
    }

    /// Step forward by `dt` seconds. Returns true once the animation is done.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration());
        self.is_finished()
    }

    pub fn sample(&self) -> AnimationFrame {
        let mut start = 0.0;
        for segment in &self.segments {
            let end = start + segment.duration;
            if self.elapsed < end {
                let t = if segment.duration > 0.0 {
                    (self.elapsed - start) / segment.duration
                } else {
                    1.0
                };
                return segment.sample(t.clamp(0.0, 1.0));
            }
            start = end;
        }

        match self.segments.last() {
            Some(last) => last.sample(1.0),
            None => AnimationFrame {
                offset: Vec2::ZERO,
                opacity_scale: 1.0,
                rotation: None,
            },
        }
    }
}

/// Off-screen point in `direction`, keeping the cross-axis offset
fn exit_point(from: Vec2, direction: Direction, frame_size: Vec2, config: &CardConfig) -> Vec2 {
    let axis = direction.axis();
    let travel = axis.component(frame_size) * config.leave_travel_factor;
    let already = axis.component(from) * direction.sign();
    let distance = travel.max(already) * direction.sign();

    match axis {
        Axis::Horizontal => Vec2::new(distance, from.y),
        Axis::Vertical => Vec2::new(from.x, distance),
    }
}
