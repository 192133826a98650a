//! Gameplay tuning
//!
//! Every balance constant lives here so a presentation layer can ship its own
//! JSON overrides. Missing fields fall back to [`crate::consts`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Game balance and geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Protagonist ===
    /// Movement speed (units/s)
    pub protagonist_speed: f32,
    /// Turn rate (radians/s)
    pub protagonist_rotation_rate: f32,
    /// Bounding box (width, height)
    pub protagonist_size: Vec2,
    /// Start position, clamped into the first camera rect
    pub protagonist_start: Vec2,

    // === Camera ===
    /// Horizontal scroll speed (units/s)
    pub camera_speed: f32,

    // === Hostiles ===
    pub hostile_spawn_interval: f32,
    pub hostile_traverse_secs: f32,
    pub hostile_size: Vec2,

    // === Friendlies ===
    pub friendly_spawn_interval: f32,
    pub friendly_appear_secs: f32,
    pub friendly_pulse_cycles: u32,
    pub friendly_pulse_secs: f32,
    pub friendly_disappear_secs: f32,
    pub friendly_size: Vec2,

    // === Rules ===
    pub starting_lives: u32,
    pub win_threshold: u32,
    /// Damage cooldown (seconds)
    pub invincibility_secs: f32,
    /// Flicker blinks over the damage cooldown
    pub blink_count: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            protagonist_speed: PROTAGONIST_SPEED,
            protagonist_rotation_rate: PROTAGONIST_ROTATION_RATE,
            protagonist_size: Vec2::from(PROTAGONIST_SIZE),
            protagonist_start: Vec2::from(PROTAGONIST_START),

            camera_speed: CAMERA_SPEED,

            hostile_spawn_interval: HOSTILE_SPAWN_INTERVAL,
            hostile_traverse_secs: HOSTILE_TRAVERSE_SECS,
            hostile_size: Vec2::from(HOSTILE_SIZE),

            friendly_spawn_interval: FRIENDLY_SPAWN_INTERVAL,
            friendly_appear_secs: FRIENDLY_APPEAR_SECS,
            friendly_pulse_cycles: FRIENDLY_PULSE_CYCLES,
            friendly_pulse_secs: FRIENDLY_PULSE_SECS,
            friendly_disappear_secs: FRIENDLY_DISAPPEAR_SECS,
            friendly_size: Vec2::from(FRIENDLY_SIZE),

            starting_lives: STARTING_LIVES,
            win_threshold: WIN_THRESHOLD,
            invincibility_secs: INVINCIBILITY_SECS,
            blink_count: BLINK_COUNT,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("protagonist_speed", self.protagonist_speed),
            ("protagonist_rotation_rate", self.protagonist_rotation_rate),
            ("camera_speed", self.camera_speed),
            ("hostile_spawn_interval", self.hostile_spawn_interval),
            ("hostile_traverse_secs", self.hostile_traverse_secs),
            ("friendly_spawn_interval", self.friendly_spawn_interval),
            ("friendly_appear_secs", self.friendly_appear_secs),
            ("friendly_pulse_secs", self.friendly_pulse_secs),
            ("friendly_disappear_secs", self.friendly_disappear_secs),
            ("invincibility_secs", self.invincibility_secs),
            ("friendly_pulse_cycles", self.friendly_pulse_cycles as f32),
            ("blink_count", self.blink_count as f32),
        ];
        for (field, value) in scalars {
            positive(field, value)?;
        }

        let sizes = [
            ("protagonist_size", self.protagonist_size),
            ("hostile_size", self.hostile_size),
            ("friendly_size", self.friendly_size),
        ];
        for (field, size) in sizes {
            positive(field, size.x)?;
            positive(field, size.y)?;
        }

        if self.starting_lives == 0 {
            return Err(ConfigError::ZeroLives);
        }
        if self.win_threshold == 0 {
            return Err(ConfigError::ZeroWinThreshold);
        }
        Ok(())
    }

    /// Total lifetime of a friendly's scripted sequence
    pub fn friendly_lifetime(&self) -> f32 {
        self.friendly_appear_secs
            + self.friendly_pulse_cycles as f32 * self.friendly_pulse_secs
            + self.friendly_disappear_secs
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    // NaN fails this comparison too
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert!((tuning.friendly_lifetime() - 11.0).abs() < 1e-5);
    }

    #[test]
    fn test_partial_json_override() {
        let tuning = Tuning::from_json(r#"{ "camera_speed": 120.0, "win_threshold": 3 }"#).unwrap();
        assert_eq!(tuning.camera_speed, 120.0);
        assert_eq!(tuning.win_threshold, 3);
        // Untouched fields keep their defaults
        assert_eq!(tuning.starting_lives, STARTING_LIVES);
        assert_eq!(tuning.hostile_size, Vec2::from(HOSTILE_SIZE));
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let err = Tuning::from_json(r#"{ "protagonist_speed": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonPositive { field: "protagonist_speed", .. }
        ));
    }

    #[test]
    fn test_rejects_zero_lives_and_threshold() {
        let tuning = Tuning {
            starting_lives: 0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(ConfigError::ZeroLives)));

        let tuning = Tuning {
            win_threshold: 0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(ConfigError::ZeroWinThreshold)));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_degenerate_size() {
        let tuning = Tuning {
            friendly_size: Vec2::new(10.0, -1.0),
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NonPositive { field: "friendly_size", .. })
        ));
    }
}
