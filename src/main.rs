//! Hero Chase headless runner
//!
//! Plays one session without a renderer: the "pointer" chases the nearest
//! friendly while every presentation hook is logged. Pass a tuning JSON file
//! as the first argument to override the defaults; set `RUST_LOG=debug` to see
//! spawns and hits.

use glam::Vec2;

use hero_chase::consts::MAX_PLAYABLE_ASPECT;
use hero_chase::sim::{DEFAULT_SEED, Entity, GameSummary, HitKind, RemovalReason, Script};
use hero_chase::{FrameInput, Presentation, Session, Tuning};

/// Scene size of the reference device (4:3 retina iPad)
const SCENE_SIZE: Vec2 = Vec2::new(2048.0, 1536.0);
const FRAME_SECS: f64 = 1.0 / 60.0;
/// Give up after this long if nobody wins or loses
const MAX_SECS: f64 = 300.0;

/// Logs every hook and keeps the final summary
#[derive(Default)]
struct LogPresentation {
    summary: Option<GameSummary>,
}

impl Presentation for LogPresentation {
    fn on_entity_spawned(&mut self, entity: &Entity, script: &Script) {
        log::debug!(
            "spawn {:?} #{} ({:?}, {:.1}s)",
            entity.kind,
            entity.id,
            script.kind,
            script.lifetime()
        );
    }

    fn on_entity_removed(&mut self, entity: &Entity, reason: RemovalReason) {
        log::debug!("remove #{} ({:?})", entity.id, reason);
    }

    fn on_hit(&mut self, kind: HitKind) {
        log::info!("hit: {kind:?}");
    }

    fn on_invincibility_changed(&mut self, invincible: bool) {
        log::debug!("invincible: {invincible}");
    }

    fn on_game_over(&mut self, summary: &GameSummary) {
        self.summary = Some(*summary);
    }
}

fn load_tuning() -> Result<Tuning, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            log::info!("Using tuning from {path}");
            Ok(Tuning::from_json(&json)?)
        }
        None => Ok(Tuning::default()),
    }
}

/// Where the simulated player points: the nearest friendly, else mid-view
fn pick_pointer(session: &Session) -> Vec2 {
    let hero = session.protagonist().pos;
    session
        .friendlies()
        .iter()
        .min_by(|a, b| {
            a.pos
                .distance_squared(hero)
                .partial_cmp(&b.pos.distance_squared(hero))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|f| f.pos)
        .unwrap_or_else(|| session.camera_rect().center())
}

fn run() -> Result<GameSummary, Box<dyn std::error::Error>> {
    let tuning = load_tuning()?;
    let mut session = Session::new(SCENE_SIZE, MAX_PLAYABLE_ASPECT, tuning, DEFAULT_SEED)?;
    let mut presentation = LogPresentation::default();

    let mut now = 0.0;
    while presentation.summary.is_none() && now < MAX_SECS {
        let input = FrameInput::pointer(pick_pointer(&session));
        session.step(now, &input, &mut presentation);
        now += FRAME_SECS;
    }

    Ok(presentation.summary.unwrap_or_else(|| session.summary()))
}

fn main() {
    env_logger::init();
    log::info!("Hero Chase (headless) starting...");

    match run() {
        Ok(summary) => {
            let outcome = if summary.won { "won" } else { "did not win" };
            println!(
                "Player {outcome}: {} rescued, {} lives left, {:.1}s",
                summary.rescue_count, summary.lives, summary.elapsed_secs
            );
        }
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    }
}
