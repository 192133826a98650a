//! Per-frame simulation step
//!
//! A [`Session`] owns everything for one play-through. The platform calls
//! [`Session::step`] once per rendered frame with a monotonic timestamp; the
//! order inside a step is fixed:
//! input -> steering -> camera -> bounds -> spawning -> aging -> cooldown ->
//! collisions -> win/lose.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bounds;
use super::camera::{self, BackgroundTile, Camera};
use super::collision;
use super::rect::Rect;
use super::spawner::Spawner;
use super::state::{Entity, EntityKind, GamePhase, GameState, GameSummary, RemovalReason};
use super::steering::Steering;
use crate::error::ConfigError;
use crate::platform::{FrameClock, FrameInput, Presentation};
use crate::settings::Tuning;

/// Seed used by [`Session::init`]
pub const DEFAULT_SEED: u64 = 0x5EED_C4A5E;

/// One play-through: protagonist, camera, spawned entities and game state
#[derive(Debug, Clone)]
pub struct Session {
    tuning: Tuning,
    scene_size: Vec2,
    playable: Rect,
    seed: u64,
    rng: Pcg32,
    clock: FrameClock,
    frame_count: u64,
    elapsed_secs: f64,
    protagonist: Entity,
    steering: Steering,
    camera: Camera,
    background: [BackgroundTile; 2],
    spawner: Spawner,
    /// Live hostiles (sorted by id)
    hostiles: Vec<Entity>,
    /// Live friendlies (sorted by id)
    friendlies: Vec<Entity>,
    state: GameState,
    next_id: u32,
}

impl Session {
    /// Start a session with default tuning
    pub fn init(scene_size: Vec2, playable_aspect: f32) -> Result<Self, ConfigError> {
        Self::new(scene_size, playable_aspect, Tuning::default(), DEFAULT_SEED)
    }

    /// Start a session; fails fast on an unusable scene or tuning
    pub fn new(
        scene_size: Vec2,
        playable_aspect: f32,
        tuning: Tuning,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        if !(scene_size.x > 0.0 && scene_size.y > 0.0 && scene_size.is_finite()) {
            return Err(ConfigError::NonPositiveSceneSize {
                width: scene_size.x,
                height: scene_size.y,
            });
        }
        if !(playable_aspect > 0.0 && playable_aspect.is_finite()) {
            return Err(ConfigError::NonPositiveAspect(playable_aspect));
        }
        tuning.validate()?;

        let playable = camera::playable_rect(scene_size, playable_aspect);
        let camera = Camera::new(scene_size, tuning.camera_speed);
        let view = camera::camera_rect(camera.pos, scene_size, &playable);
        let (start, _) = bounds::clamp(tuning.protagonist_start, Vec2::ZERO, &view);

        let mut session = Self {
            scene_size,
            playable,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            clock: FrameClock::new(),
            frame_count: 0,
            elapsed_secs: 0.0,
            protagonist: Entity::protagonist(0, start, tuning.protagonist_size),
            steering: Steering::new(tuning.protagonist_speed, tuning.protagonist_rotation_rate),
            camera,
            background: camera::background_tiles(scene_size.x),
            spawner: Spawner::new(&tuning),
            hostiles: Vec::new(),
            friendlies: Vec::new(),
            state: GameState::new(tuning.starting_lives),
            next_id: 1,
            tuning,
        };
        session.protagonist.id = session.next_entity_id();

        log::info!(
            "Session started: scene {}x{}, playable {:?}, seed {:#x}",
            scene_size.x,
            scene_size.y,
            playable,
            seed
        );
        Ok(session)
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Advance one frame. A no-op once the game is over.
    pub fn step(&mut self, now: f64, input: &FrameInput, presentation: &mut impl Presentation) {
        if self.state.terminated() {
            log::trace!("Step ignored: game already over");
            return;
        }

        let dt = self.clock.delta(now);
        log::trace!("{:.3} ms since last update", dt * 1000.0);
        self.frame_count += 1;
        self.elapsed_secs += f64::from(dt);

        // Steering
        if let Some(target) = input.pointer {
            self.steering.set_target(target);
        }
        self.steering.steer(&mut self.protagonist, dt);

        // Camera and background
        self.camera.advance(dt);
        let view = self.camera_rect();
        if camera::recycle_background(&mut self.background, &view) > 0 {
            log::trace!("Background recycled at camera x {:.0}", self.camera.pos.x);
        }

        // Bounds, against this frame's view
        let (pos, vel) = bounds::clamp(self.protagonist.pos, self.protagonist.vel, &view);
        self.protagonist.pos = pos;
        self.protagonist.vel = vel;

        // Age before spawning so new entities start where they were reported
        for entity in self.hostiles.iter_mut().chain(self.friendlies.iter_mut()) {
            entity.pos += entity.vel * dt;
            entity.age += dt;
        }
        self.spawn(dt, &view, presentation);

        sweep(&mut self.hostiles, &view, presentation);
        sweep(&mut self.friendlies, &view, presentation);

        if self.state.tick_invincibility(dt) {
            log::debug!("Invincibility ended");
            presentation.on_invincibility_changed(false);
        }

        // Collisions
        let was_invincible = self.state.invincible;
        let events = collision::evaluate(
            &self.protagonist,
            &self.hostiles,
            &mut self.friendlies,
            &mut self.state,
            &self.tuning,
        );
        for event in &events {
            log::debug!(
                "{:?} #{} (lives {}, rescued {})",
                event.kind(),
                event.entity_id(),
                self.state.lives,
                self.state.rescue_count
            );
            presentation.on_hit(event.kind());
        }
        if self.state.invincible && !was_invincible {
            presentation.on_invincibility_changed(true);
        }
        sweep(&mut self.friendlies, &view, presentation);

        // Win/lose
        if let Some(phase) = self.state.check_termination(self.tuning.win_threshold) {
            let summary = self.summary();
            log::info!(
                "Game over ({:?}) after {:.1}s: {} lives left, {} rescued",
                phase,
                summary.elapsed_secs,
                summary.lives,
                summary.rescue_count
            );
            presentation.on_game_over(&summary);
        }
    }

    fn spawn(&mut self, dt: f32, view: &Rect, presentation: &mut impl Presentation) {
        let next_id = &mut self.next_id;
        let spawned = self.spawner.update(
            dt,
            view,
            self.scene_size.x,
            &self.tuning,
            &mut self.rng,
            || {
                let id = *next_id;
                *next_id += 1;
                id
            },
        );

        for s in spawned {
            presentation.on_entity_spawned(&s.entity, &s.script);
            match s.entity.kind {
                EntityKind::Hostile => self.hostiles.push(s.entity),
                EntityKind::Friendly => self.friendlies.push(s.entity),
                EntityKind::Protagonist => {}
            }
        }
    }

    // === Read-only accessors ===

    pub fn protagonist(&self) -> &Entity {
        &self.protagonist
    }

    pub fn protagonist_rotation(&self) -> f32 {
        self.protagonist.rotation.unwrap_or(0.0)
    }

    /// False during the "off" half of each damage-flicker blink
    pub fn protagonist_visible(&self) -> bool {
        self.state
            .flicker_visible(self.tuning.invincibility_secs, self.tuning.blink_count)
    }

    /// Current steering target, if still travelling
    pub fn target(&self) -> Option<Vec2> {
        self.steering.target
    }

    pub fn camera_position(&self) -> Vec2 {
        self.camera.pos
    }

    /// Playable area under the camera; the protagonist's clamp region
    pub fn camera_rect(&self) -> Rect {
        camera::camera_rect(self.camera.pos, self.scene_size, &self.playable)
    }

    /// Letterboxed playable area in scene coordinates (before scrolling)
    pub fn playable_rect(&self) -> Rect {
        self.playable
    }

    pub fn scene_size(&self) -> Vec2 {
        self.scene_size
    }

    pub fn background(&self) -> &[BackgroundTile] {
        &self.background
    }

    pub fn hostiles(&self) -> &[Entity] {
        &self.hostiles
    }

    pub fn friendlies(&self) -> &[Entity] {
        &self.friendlies
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            won: self.state.phase == GamePhase::Won,
            lives: self.state.lives,
            rescue_count: self.state.rescue_count,
            elapsed_secs: self.elapsed_secs,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Drop entities that were consumed, finished their script, or fell behind
/// the camera, telling the presentation layer about each
fn sweep(entities: &mut Vec<Entity>, view: &Rect, presentation: &mut impl Presentation) {
    entities.retain(|e| {
        let reason = if !e.alive {
            RemovalReason::Rescued
        } else if e.script_finished() {
            RemovalReason::ScriptFinished
        } else if e.bounds().max.x < view.min.x {
            RemovalReason::LeftWorld
        } else {
            return true;
        };
        log::debug!("Removed {:?} #{}: {:?}", e.kind, e.id, reason);
        presentation.on_entity_removed(e, reason);
        false
    });
}
