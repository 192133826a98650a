//! 2D vector helpers on top of `glam::Vec2`
//!
//! glam covers add/scale/length; these fill in the angle math the steering
//! code needs.

use glam::Vec2;

use crate::wrap_angle;

/// Unit vector in the direction of `v`, or zero for zero/non-finite input
#[inline]
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    if !v.is_finite() {
        return Vec2::ZERO;
    }
    v.try_normalize().unwrap_or(Vec2::ZERO)
}

/// Heading of a vector in radians (atan2)
#[inline]
pub fn angle_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Signed shortest rotation taking `from` onto `to`, in (-π, π]
#[inline]
pub fn shortest_angle_between(from: f32, to: f32) -> f32 {
    wrap_angle(to - from)
}
