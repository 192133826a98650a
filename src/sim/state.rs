//! Entities and game state
//!
//! Everything a presentation layer reads back after a step lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Entity category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// The player-controlled chaser (exactly one per session)
    Protagonist,
    /// Costs a life on contact
    Hostile,
    /// Rescued on contact
    Friendly,
}

/// Why a spawned entity left the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalReason {
    /// Scripted sequence ran to completion
    ScriptFinished,
    /// Fell behind the scrolling camera
    LeftWorld,
    /// Consumed by a rescue
    Rescued,
}

/// A simulated entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Centre of the bounding box
    pub pos: Vec2,
    /// Bounding box (width, height)
    pub size: Vec2,
    /// Facing (radians); only entities that turn carry one
    pub rotation: Option<f32>,
    pub vel: Vec2,
    /// Seconds since spawn
    pub age: f32,
    /// Total scripted lifetime (None = lives until removed otherwise)
    pub lifetime: Option<f32>,
    pub alive: bool,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            size,
            rotation: None,
            vel: Vec2::ZERO,
            age: 0.0,
            lifetime: None,
            alive: true,
        }
    }

    /// The protagonist, facing along +x
    pub fn protagonist(id: u32, pos: Vec2, size: Vec2) -> Self {
        Self {
            rotation: Some(0.0),
            ..Self::new(id, EntityKind::Protagonist, pos, size)
        }
    }

    /// Axis-aligned bounding box
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.pos, self.size)
    }

    /// True once the scripted sequence has run its full duration
    pub fn script_finished(&self) -> bool {
        self.lifetime.is_some_and(|life| self.age >= life)
    }
}

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Rescue threshold reached (terminal)
    Won,
    /// Out of lives (terminal)
    Lost,
}

/// Final stats handed to the presentation layer on game over
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub won: bool,
    pub lives: u32,
    pub rescue_count: u32,
    pub elapsed_secs: f64,
}

/// Lives, rescues, damage cooldown and the win/lose state machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub lives: u32,
    pub rescue_count: u32,
    pub invincible: bool,
    /// Seconds left in the damage cooldown
    pub invincible_remaining: f32,
    pub phase: GamePhase,
}

impl GameState {
    pub fn new(lives: u32) -> Self {
        Self {
            lives,
            rescue_count: 0,
            invincible: false,
            invincible_remaining: 0.0,
            phase: GamePhase::Playing,
        }
    }

    /// Won or lost; never reverts
    #[inline]
    pub fn terminated(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    pub fn record_rescue(&mut self) {
        if self.terminated() {
            return;
        }
        self.rescue_count += 1;
    }

    /// Take a life and start the cooldown. Returns false (and changes nothing)
    /// while invincible or after termination.
    pub fn record_damage(&mut self, cooldown: f32) -> bool {
        if self.terminated() || self.invincible {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.invincible = true;
        self.invincible_remaining = cooldown;
        true
    }

    /// Run down the damage cooldown. Returns true on the frame it expires.
    pub fn tick_invincibility(&mut self, dt: f32) -> bool {
        if !self.invincible || self.terminated() {
            return false;
        }
        self.invincible_remaining -= dt;
        if self.invincible_remaining <= 0.0 {
            self.invincible_remaining = 0.0;
            self.invincible = false;
            return true;
        }
        false
    }

    /// One-way transition out of `Playing`. Win is checked before loss.
    /// Returns the new phase only on the call that makes the transition.
    pub fn check_termination(&mut self, win_threshold: u32) -> Option<GamePhase> {
        if self.terminated() {
            return None;
        }
        if self.rescue_count >= win_threshold {
            self.phase = GamePhase::Won;
        } else if self.lives == 0 {
            self.phase = GamePhase::Lost;
        } else {
            return None;
        }
        Some(self.phase)
    }

    /// Protagonist visibility during the damage flicker
    pub fn flicker_visible(&self, cooldown: f32, blink_count: u32) -> bool {
        if !self.invincible || blink_count == 0 {
            return true;
        }
        let slice = cooldown / blink_count as f32;
        let elapsed = (cooldown - self.invincible_remaining).max(0.0);
        elapsed % slice <= slice / 2.0
    }
}
