//! Collision detection and resolution
//!
//! One pass per frame between the protagonist and every live spawned entity.
//! Friendlies are resolved first and are never blocked by invincibility;
//! hostiles are skipped entirely while the damage cooldown runs, and at most
//! one hostile can land a hit per frame because the first hit starts it.

use serde::{Deserialize, Serialize};

use super::state::{Entity, GameState};
use crate::settings::Tuning;

/// Hit category, as reported to the audio hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitKind {
    Rescue,
    Damage,
}

/// Something that happened during collision resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitEvent {
    /// Friendly `id` was rescued (and consumed)
    Rescue { id: u32 },
    /// Hostile `id` cost a life
    Damage { id: u32 },
}

impl HitEvent {
    pub fn kind(&self) -> HitKind {
        match self {
            HitEvent::Rescue { .. } => HitKind::Rescue,
            HitEvent::Damage { .. } => HitKind::Damage,
        }
    }

    pub fn entity_id(&self) -> u32 {
        match self {
            HitEvent::Rescue { id } | HitEvent::Damage { id } => *id,
        }
    }
}

/// Resolve overlaps for this frame.
///
/// Rescued friendlies are marked dead (the caller sweeps them). Hostiles are
/// left alive; the cooldown covers their continued overlap. Does nothing once
/// the game has terminated, and skips hostiles once the rescues reach the win
/// threshold.
pub fn evaluate(
    protagonist: &Entity,
    hostiles: &[Entity],
    friendlies: &mut [Entity],
    state: &mut GameState,
    tuning: &Tuning,
) -> Vec<HitEvent> {
    let mut events = Vec::new();
    if state.terminated() {
        return events;
    }

    let hero = protagonist.bounds();

    for friendly in friendlies.iter_mut().filter(|f| f.alive) {
        if hero.intersects(&friendly.bounds()) {
            friendly.alive = false;
            state.record_rescue();
            events.push(HitEvent::Rescue { id: friendly.id });
        }
    }

    // The winning rescue ends the game before any hostile can land
    if state.rescue_count >= tuning.win_threshold {
        return events;
    }

    if !state.invincible {
        let hit = hostiles
            .iter()
            .filter(|h| h.alive)
            .find(|h| hero.intersects(&h.bounds()));
        if let Some(hostile) = hit {
            if state.record_damage(tuning.invincibility_secs) {
                events.push(HitEvent::Damage { id: hostile.id });
            }
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EntityKind, GamePhase};
    use glam::Vec2;
    use proptest::prelude::*;

    fn hero() -> Entity {
        Entity::protagonist(1, Vec2::new(100.0, 100.0), Vec2::new(50.0, 50.0))
    }

    fn hostile(id: u32, x: f32) -> Entity {
        Entity::new(id, EntityKind::Hostile, Vec2::new(x, 100.0), Vec2::new(40.0, 40.0))
    }

    fn friendly(id: u32, x: f32) -> Entity {
        Entity::new(id, EntityKind::Friendly, Vec2::new(x, 100.0), Vec2::new(20.0, 20.0))
    }

    /// Resolve then run the state machine, as the session step does
    fn resolve(
        hostiles: &[Entity],
        friendlies: &mut [Entity],
        state: &mut GameState,
    ) -> Vec<HitEvent> {
        let tuning = Tuning::default();
        let events = evaluate(&hero(), hostiles, friendlies, state, &tuning);
        state.check_termination(tuning.win_threshold);
        events
    }

    #[test]
    fn test_last_life_lost() {
        let mut state = GameState::new(1);
        let events = resolve(&[hostile(2, 110.0)], &mut [], &mut state);

        assert_eq!(events, vec![HitEvent::Damage { id: 2 }]);
        assert_eq!(state.lives, 0);
        assert!(state.invincible);
        assert_eq!(state.phase, GamePhase::Lost);
    }

    #[test]
    fn test_final_rescue_wins() {
        let mut state = GameState::new(5);
        state.rescue_count = 14;
        let mut friendlies = [friendly(3, 100.0)];
        let events = resolve(&[], &mut friendlies, &mut state);

        assert_eq!(events, vec![HitEvent::Rescue { id: 3 }]);
        assert_eq!(state.rescue_count, 15);
        assert!(!friendlies[0].alive);
        assert_eq!(state.phase, GamePhase::Won);
    }

    #[test]
    fn test_winning_rescue_blocks_damage() {
        let mut state = GameState::new(1);
        state.rescue_count = 14;
        let mut friendlies = [friendly(3, 100.0)];
        let events = resolve(&[hostile(2, 100.0)], &mut friendlies, &mut state);

        assert_eq!(events, vec![HitEvent::Rescue { id: 3 }]);
        assert_eq!(state.lives, 1);
        assert!(!state.invincible);
        assert_eq!(state.phase, GamePhase::Won);
    }

    #[test]
    fn test_two_hostiles_cost_one_life() {
        let mut state = GameState::new(5);
        let events = resolve(&[hostile(2, 90.0), hostile(3, 110.0)], &mut [], &mut state);

        assert_eq!(events, vec![HitEvent::Damage { id: 2 }]);
        assert_eq!(state.lives, 4);
        assert!(state.invincible);
    }

    #[test]
    fn test_invincible_still_rescues() {
        let mut state = GameState::new(5);
        state.record_damage(3.0);
        let mut friendlies = [friendly(4, 95.0), friendly(5, 500.0)];
        let events = resolve(&[hostile(2, 100.0)], &mut friendlies, &mut state);

        assert_eq!(events, vec![HitEvent::Rescue { id: 4 }]);
        assert_eq!(state.lives, 4);
        assert_eq!(state.rescue_count, 1);
        assert!(friendlies[1].alive);
    }

    #[test]
    fn test_dead_entities_ignored() {
        let mut state = GameState::new(5);
        let mut gone = hostile(2, 100.0);
        gone.alive = false;
        let mut eaten = friendly(3, 100.0);
        eaten.alive = false;
        let events = resolve(&[gone], &mut [eaten], &mut state);
        assert!(events.is_empty());
        assert_eq!(state, GameState::new(5));
    }

    #[test]
    fn test_touching_edges_miss() {
        // Hero spans x 75..125, hostile at 145 spans 125..165
        let mut state = GameState::new(5);
        let events = resolve(&[hostile(2, 145.0)], &mut [], &mut state);
        assert!(events.is_empty());
    }

    #[test]
    fn test_noop_after_termination() {
        let mut state = GameState::new(1);
        resolve(&[hostile(2, 100.0)], &mut [], &mut state);
        assert_eq!(state.phase, GamePhase::Lost);

        let before = state.clone();
        let mut friendlies = [friendly(3, 100.0)];
        let events = resolve(&[hostile(4, 100.0)], &mut friendlies, &mut state);
        assert!(events.is_empty());
        assert_eq!(state, before);
        assert!(friendlies[0].alive);
    }

    #[test]
    fn test_event_accessors() {
        let e = HitEvent::Damage { id: 9 };
        assert_eq!(e.kind(), HitKind::Damage);
        assert_eq!(e.entity_id(), 9);
        assert_eq!(HitEvent::Rescue { id: 1 }.kind(), HitKind::Rescue);
    }

    proptest! {
        #[test]
        fn prop_counters_monotone(
            frames in prop::collection::vec(
                (prop::collection::vec(0.0f32..300.0, 0..4), prop::collection::vec(0.0f32..300.0, 0..4), any::<bool>()),
                1..40,
            )
        ) {
            let mut state = GameState::new(3);
            let mut next = 2;
            for (hostile_xs, friendly_xs, cool_down) in frames {
                let hostiles: Vec<_> = hostile_xs.iter().map(|&x| { next += 1; hostile(next, x) }).collect();
                let mut friendlies: Vec<_> = friendly_xs.iter().map(|&x| { next += 1; friendly(next, x) }).collect();
                let before = state.clone();

                let events = resolve(&hostiles, &mut friendlies, &mut state);

                prop_assert!(state.rescue_count >= before.rescue_count);
                prop_assert!(state.lives <= before.lives);
                prop_assert!(before.lives - state.lives <= 1);
                if before.invincible {
                    prop_assert!(events.iter().all(|e| e.kind() == HitKind::Rescue));
                }
                if before.terminated() {
                    prop_assert_eq!(&state, &before);
                    prop_assert!(events.is_empty());
                }
                if cool_down {
                    state.tick_invincibility(10.0);
                }
            }
        }
    }
}
