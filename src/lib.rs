//! Hero Chase - a scrolling 2D chase game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (steering, bounds, spawning, collisions, game state)
//! - `platform`: Hooks into the presentation layer (rendering, audio, scene transitions)
//! - `settings`: Data-driven game tuning
//! - `error`: Configuration errors

pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use platform::{FrameInput, Presentation};
pub use settings::Tuning;
pub use sim::Session;

/// Default gameplay constants (all overridable through [`Tuning`])
pub mod consts {
    use std::f32::consts::PI;

    /// Widest playable aspect ratio; taller scenes get letterboxed
    pub const MAX_PLAYABLE_ASPECT: f32 = 16.0 / 9.0;

    /// Protagonist movement speed (units/s)
    pub const PROTAGONIST_SPEED: f32 = 480.0;
    /// Protagonist turn rate (radians/s)
    pub const PROTAGONIST_ROTATION_RATE: f32 = 4.0 * PI;
    /// Protagonist starting position in scene coordinates
    pub const PROTAGONIST_START: (f32, f32) = (400.0, 400.0);

    /// Camera scroll speed (units/s, horizontal only)
    pub const CAMERA_SPEED: f32 = 200.0;

    /// Seconds between hostile spawns
    pub const HOSTILE_SPAWN_INTERVAL: f32 = 2.0;
    /// Seconds a hostile takes to cross the scene
    pub const HOSTILE_TRAVERSE_SECS: f32 = 2.0;

    /// Seconds between friendly spawns
    pub const FRIENDLY_SPAWN_INTERVAL: f32 = 1.0;
    pub const FRIENDLY_APPEAR_SECS: f32 = 0.5;
    pub const FRIENDLY_PULSE_CYCLES: u32 = 10;
    pub const FRIENDLY_PULSE_SECS: f32 = 1.0;
    pub const FRIENDLY_DISAPPEAR_SECS: f32 = 0.5;

    /// Lives at session start
    pub const STARTING_LIVES: u32 = 5;
    /// Rescues needed to win
    pub const WIN_THRESHOLD: u32 = 15;
    /// Damage cooldown (seconds)
    pub const INVINCIBILITY_SECS: f32 = 3.0;
    /// Flicker blinks during the damage cooldown
    pub const BLINK_COUNT: u32 = 10;

    /// Bounding box sizes (width, height)
    pub const PROTAGONIST_SIZE: (f32, f32) = (150.0, 100.0);
    pub const HOSTILE_SIZE: (f32, f32) = (170.0, 110.0);
    pub const FRIENDLY_SIZE: (f32, f32) = (90.0, 80.0);
}

/// Wrap an angle into (-π, π]
#[inline]
pub fn wrap_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if !angle.is_finite() {
        return 0.0;
    }
    angle %= TAU;
    if angle > PI {
        angle -= TAU;
    } else if angle <= -PI {
        angle += TAU;
    }
    angle
}
