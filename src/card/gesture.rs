use bevy::math::Vec2;
use std::collections::VecDeque;

/// Samples older than this (relative to the newest) don't count toward velocity
const VELOCITY_WINDOW_SECS: f64 = 0.1;
const MAX_SAMPLES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    position: Vec2,
    time: f64,
}

/// What the tracker reports when a gesture ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureRelease {
    /// Movement between the last move sample and the release point
    pub delta: Vec2,
    /// Units per second over the recent samples, if the timestamps allow it
    pub velocity: Option<Vec2>,
}

/// Turns a begin/move/end stream of pointer positions into deltas
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    samples: VecDeque<Sample>,
    active: bool,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start a gesture, discarding anything left from a previous one
    pub fn begin(&mut self, position: Vec2, time: f64) {
        self.samples.clear();
        self.samples.push_back(Sample { position, time });
        self.active = true;
    }

    /// Returns the delta since the previous sample, or `None` outside a gesture
    pub fn move_to(&mut self, position: Vec2, time: f64) -> Option<Vec2> {
        if !self.active {
            return None;
        }
        let last = self.samples.back()?.position;
        self.push(Sample { position, time });
        Some(position - last)
    }

    /// Finish the gesture. `None` when no gesture was active.
    pub fn end(&mut self, position: Vec2, time: f64) -> Option<GestureRelease> {
        if !self.active {
            return None;
        }
        let last = self.samples.back()?.position;
        self.push(Sample { position, time });

        let release = GestureRelease {
            delta: position - last,
            velocity: self.velocity(),
        };
        self.active = false;
        self.samples.clear();
        Some(release)
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.samples.clear();
    }

    fn push(&mut self, sample: Sample) {
        if self.samples.len() == MAX_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    fn velocity(&self) -> Option<Vec2> {
        let newest = self.samples.back()?;
        let oldest = self
            .samples
            .iter()
            .find(|s| newest.time - s.time <= VELOCITY_WINDOW_SECS)?;

        let dt = (newest.time - oldest.time) as f32;
        if dt <= f32::EPSILON {
            return None;
        }
        Some((newest.position - oldest.position) / dt)
    }
}
