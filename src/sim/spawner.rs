//! Timed spawning of hostiles and friendlies
//!
//! Two independent repeating timers, one per kind. Placement is randomized
//! against the current camera rect using the session's seeded RNG.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::script::Script;
use super::state::{Entity, EntityKind};
use crate::settings::Tuning;

/// Repeating interval timer driven by frame deltas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub interval: f32,
    pub elapsed: f32,
}

impl SpawnTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Accumulate `dt`; fires at most once per call and carries the remainder
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt.max(0.0);
        if self.elapsed < self.interval {
            return false;
        }
        // A long stall fires once, not a burst
        self.elapsed = (self.elapsed - self.interval) % self.interval;
        true
    }
}

/// Uniform sample over [lo, hi]; a degenerate range yields its midpoint
fn uniform(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.random_range(lo..=hi)
    } else {
        (lo + hi) / 2.0
    }
}

/// Hostile start: just past the leading (right) edge, random height
pub fn hostile_spawn_pos(rng: &mut impl Rng, view: &Rect, size: Vec2) -> Vec2 {
    let half = size / 2.0;
    let lane = view.inset(half);
    let y = uniform(rng, lane.min.y, lane.max.y);
    Vec2::new(view.max.x + half.x, y)
}

/// Friendly start: anywhere inside the view
pub fn friendly_spawn_pos(rng: &mut impl Rng, view: &Rect) -> Vec2 {
    Vec2::new(
        uniform(rng, view.min.x, view.max.x),
        uniform(rng, view.min.y, view.max.y),
    )
}

/// A freshly spawned entity and the sequence it plays
#[derive(Debug, Clone)]
pub struct Spawned {
    pub entity: Entity,
    pub script: Script,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    pub hostile_timer: SpawnTimer,
    pub friendly_timer: SpawnTimer,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            hostile_timer: SpawnTimer::new(tuning.hostile_spawn_interval),
            friendly_timer: SpawnTimer::new(tuning.friendly_spawn_interval),
        }
    }

    /// Run both timers and build whatever fired this frame.
    ///
    /// `next_id` hands out entity ids; `scene_width` sets how far a hostile
    /// travels.
    pub fn update(
        &mut self,
        dt: f32,
        view: &Rect,
        scene_width: f32,
        tuning: &Tuning,
        rng: &mut impl Rng,
        mut next_id: impl FnMut() -> u32,
    ) -> Vec<Spawned> {
        let mut spawned = Vec::new();

        if self.hostile_timer.tick(dt) {
            let size = tuning.hostile_size;
            let pos = hostile_spawn_pos(rng, view, size);
            let script = Script::traverse(
                Vec2::new(-(scene_width + size.x), 0.0),
                tuning.hostile_traverse_secs,
            );
            spawned.push(Self::build(next_id(), EntityKind::Hostile, pos, size, script));
        }

        if self.friendly_timer.tick(dt) {
            let pos = friendly_spawn_pos(rng, view);
            let script = Script::pulse(tuning);
            spawned.push(Self::build(
                next_id(),
                EntityKind::Friendly,
                pos,
                tuning.friendly_size,
                script,
            ));
        }

        spawned
    }

    fn build(id: u32, kind: EntityKind, pos: Vec2, size: Vec2, script: Script) -> Spawned {
        let mut entity = Entity::new(id, kind, pos, size);
        let lifetime = script.lifetime();
        entity.lifetime = Some(lifetime);
        // Scripted motion becomes a constant velocity the collision checks can follow
        if lifetime > 0.0 {
            entity.vel = script.action.displacement() / lifetime;
        }
        log::debug!(
            "Spawned {:?} #{} at ({:.0}, {:.0}), lifetime {:.1}s",
            kind,
            id,
            pos.x,
            pos.y,
            lifetime
        );
        Spawned { entity, script }
    }
}
