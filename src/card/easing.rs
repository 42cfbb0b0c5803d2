//! Progress curves for card animations. Each maps `t` in `[0, 1]` onto
//! `[0, 1]` with `f(0) = 0` and `f(1) = 1`.

pub type Easing = fn(f32) -> f32;

/// Rubber band passes and the demo drag. Zero velocity at both ends, so
/// consecutive passes reverse without a jolt.
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t.powi(3)
    } else {
        1.0 - (2.0 - 2.0 * t).powi(3) / 2.0
    }
}

/// Entrances: the card arrives quickly and settles onto rest
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Exits. Keeps most of the release speed instead of stalling at the start.
pub fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(2)
}
