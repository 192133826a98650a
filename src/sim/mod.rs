//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only comes in through `Session::step`
//! - Seeded RNG only
//! - Stable iteration order (entities kept in spawn/id order)
//! - No rendering or platform dependencies beyond the hook trait

pub mod bounds;
pub mod camera;
pub mod collision;
pub mod rect;
pub mod script;
pub mod spawner;
pub mod state;
pub mod steering;
pub mod tick;
pub mod vector;

pub use camera::{BackgroundTile, Camera};
pub use collision::{HitEvent, HitKind, evaluate};
pub use rect::Rect;
pub use script::{Action, Script, ScriptKind};
pub use spawner::{SpawnTimer, Spawner};
pub use state::{Entity, EntityKind, GamePhase, GameState, GameSummary, RemovalReason};
pub use steering::Steering;
pub use tick::{DEFAULT_SEED, Session};
