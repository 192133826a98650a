//! Steering toward a pointed-to target
//!
//! Velocity always points straight at the target at full speed; facing turns
//! toward the velocity at a capped rate so the sprite doesn't snap around.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Entity;
use super::vector::{angle_of, normalize_or_zero, shortest_angle_between};
use crate::wrap_angle;

/// Velocity at full speed toward `target`, or zero when already there
pub fn compute_velocity(current: Vec2, target: Vec2, max_speed: f32) -> Vec2 {
    let offset = target - current;
    if offset.length_squared() == 0.0 {
        return Vec2::ZERO;
    }
    normalize_or_zero(offset) * max_speed
}

/// Turn `current_rotation` toward the heading of `velocity`, by at most
/// `max_rotation_rate * dt`
pub fn update_facing(current_rotation: f32, velocity: Vec2, max_rotation_rate: f32, dt: f32) -> f32 {
    if velocity == Vec2::ZERO {
        return current_rotation;
    }
    let diff = shortest_angle_between(current_rotation, angle_of(velocity));
    let step = (max_rotation_rate * dt).min(diff.abs());
    wrap_angle(current_rotation + diff.signum() * step)
}

/// Per-entity steering state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Steering {
    /// Last commanded target (cleared on arrival)
    pub target: Option<Vec2>,
    pub max_speed: f32,
    /// Radians per second
    pub max_rotation_rate: f32,
}

impl Steering {
    pub fn new(max_speed: f32, max_rotation_rate: f32) -> Self {
        Self {
            target: None,
            max_speed,
            max_rotation_rate,
        }
    }

    pub fn set_target(&mut self, point: Vec2) {
        self.target = Some(point);
    }

    /// Advance `entity` one frame toward the target.
    ///
    /// A target within one frame's travel is reached exactly: the entity lands
    /// on it with zero velocity and the target is consumed. With no target the
    /// entity coasts on its current velocity.
    pub fn steer(&mut self, entity: &mut Entity, dt: f32) {
        if let Some(target) = self.target {
            let offset = target - entity.pos;
            if offset.length() <= self.max_speed * dt {
                entity.pos = target;
                entity.vel = Vec2::ZERO;
                self.target = None;
                return;
            }
            entity.vel = compute_velocity(entity.pos, target, self.max_speed);
        }

        entity.pos += entity.vel * dt;
        if let Some(rotation) = entity.rotation {
            entity.rotation = Some(update_facing(
                rotation,
                entity.vel,
                self.max_rotation_rate,
                dt,
            ));
        }
    }
}
