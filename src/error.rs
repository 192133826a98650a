//! Configuration errors
//!
//! The simulation itself cannot fail; only a bad scene or tuning rejects a
//! session at start-up.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("scene size must be positive, got {width}x{height}")]
    NonPositiveSceneSize { width: f32, height: f32 },

    #[error("playable aspect ratio must be positive, got {0}")]
    NonPositiveAspect(f32),

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("starting lives must be at least 1")]
    ZeroLives,

    #[error("win threshold must be at least 1")]
    ZeroWinThreshold,

    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
