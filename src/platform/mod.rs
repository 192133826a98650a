//! Platform abstraction layer
//!
//! What the simulation needs from the outside world, and what it tells it:
//! - Frame timing (monotonic timestamps in, clamped deltas out)
//! - Pointer input
//! - Presentation hooks (rendering, audio, scene transitions)

use glam::Vec2;

use crate::sim::collision::HitKind;
use crate::sim::script::Script;
use crate::sim::state::{Entity, GameSummary, RemovalReason};

/// Input sampled for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Latest pointer/touch location in world coordinates, if any
    pub pointer: Option<Vec2>,
}

impl FrameInput {
    pub fn pointer(point: Vec2) -> Self {
        Self {
            pointer: Some(point),
        }
    }
}

/// Turns a monotonic timestamp stream into per-frame deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous frame. The first frame is always 0 and a
    /// clock that runs backwards yields 0.
    pub fn delta(&mut self, now: f64) -> f32 {
        let dt = match self.last_time {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        self.last_time = Some(now);
        dt as f32
    }
}

/// Hooks the presentation layer implements. All are fire-and-forget and
/// default to doing nothing.
pub trait Presentation {
    /// A hostile or friendly entered the world and should start `script`
    fn on_entity_spawned(&mut self, _entity: &Entity, _script: &Script) {}

    /// Stop drawing `entity`
    fn on_entity_removed(&mut self, _entity: &Entity, _reason: RemovalReason) {}

    /// Play the hit sound for `kind`
    fn on_hit(&mut self, _kind: HitKind) {}

    /// Damage cooldown started (true) or ended (false); drives the flicker
    fn on_invincibility_changed(&mut self, _invincible: bool) {}

    /// Transition to the end scene. Called exactly once per session.
    fn on_game_over(&mut self, _summary: &GameSummary) {}
}

/// No hooks
impl Presentation for () {}
