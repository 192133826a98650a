//! Declarative scripted sequences
//!
//! Spawned entities carry a tree of timed actions describing how they animate.
//! The presentation layer plays them back; the simulation only needs the total
//! duration to know when the entity goes away.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Tuning;

/// Which canned sequence an entity runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptKind {
    /// Straight line across the view, then removal (hostiles)
    Traverse,
    /// Scale in, wiggle/pulse a few times, scale out, then removal (friendlies)
    Pulse,
}

/// A single timed action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    MoveBy { delta: Vec2, secs: f32 },
    ScaleTo { scale: f32, secs: f32 },
    /// Multiplicative scale change
    ScaleBy { factor: f32, secs: f32 },
    RotateBy { radians: f32, secs: f32 },
    Wait { secs: f32 },
    /// Run children one after another
    Sequence(Vec<Action>),
    /// Run children together; lasts as long as the longest
    Group(Vec<Action>),
    Repeat { action: Box<Action>, count: u32 },
    /// Remove the entity from the scene (instant)
    Remove,
}

impl Action {
    /// Total running time in seconds
    pub fn duration(&self) -> f32 {
        match self {
            Action::MoveBy { secs, .. }
            | Action::ScaleTo { secs, .. }
            | Action::ScaleBy { secs, .. }
            | Action::RotateBy { secs, .. }
            | Action::Wait { secs } => *secs,
            Action::Sequence(actions) => actions.iter().map(Action::duration).sum(),
            Action::Group(actions) => actions.iter().map(Action::duration).fold(0.0, f32::max),
            Action::Repeat { action, count } => action.duration() * *count as f32,
            Action::Remove => 0.0,
        }
    }

    /// Net translation over the whole action
    pub fn displacement(&self) -> Vec2 {
        match self {
            Action::MoveBy { delta, .. } => *delta,
            Action::Sequence(actions) | Action::Group(actions) => {
                actions.iter().map(Action::displacement).sum()
            }
            Action::Repeat { action, count } => action.displacement() * *count as f32,
            _ => Vec2::ZERO,
        }
    }

    /// Play forward then backward
    pub fn there_and_back(self) -> Action {
        let back = self.reversed();
        Action::Sequence(vec![self, back])
    }

    /// The inverse motion, where one exists
    pub fn reversed(&self) -> Action {
        match self {
            Action::MoveBy { delta, secs } => Action::MoveBy {
                delta: -*delta,
                secs: *secs,
            },
            Action::ScaleBy { factor, secs } => Action::ScaleBy {
                factor: 1.0 / factor,
                secs: *secs,
            },
            Action::RotateBy { radians, secs } => Action::RotateBy {
                radians: -radians,
                secs: *secs,
            },
            Action::Sequence(actions) => {
                Action::Sequence(actions.iter().rev().map(Action::reversed).collect())
            }
            Action::Group(actions) => Action::Group(actions.iter().map(Action::reversed).collect()),
            Action::Repeat { action, count } => Action::Repeat {
                action: Box::new(action.reversed()),
                count: *count,
            },
            other => other.clone(),
        }
    }
}

/// A named sequence handed to the presentation layer at spawn time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub kind: ScriptKind,
    pub action: Action,
}

impl Script {
    /// Scripted lifetime of the entity
    pub fn lifetime(&self) -> f32 {
        self.action.duration()
    }

    /// Move by `delta` over `secs`, then remove
    pub fn traverse(delta: Vec2, secs: f32) -> Self {
        Self {
            kind: ScriptKind::Traverse,
            action: Action::Sequence(vec![Action::MoveBy { delta, secs }, Action::Remove]),
        }
    }

    /// Appear, pulse `tuning.friendly_pulse_cycles` times, vanish, remove
    pub fn pulse(tuning: &Tuning) -> Self {
        let cycle = tuning.friendly_pulse_secs;
        // Each cycle wiggles left and right while growing and shrinking
        let quarter = cycle / 4.0;
        let wiggle = Action::Sequence(vec![
            Action::RotateBy {
                radians: -std::f32::consts::PI / 16.0,
                secs: quarter,
            }
            .there_and_back(),
            Action::RotateBy {
                radians: std::f32::consts::PI / 16.0,
                secs: quarter,
            }
            .there_and_back(),
        ]);
        let pulse = Action::ScaleBy {
            factor: 1.2,
            secs: cycle / 2.0,
        }
        .there_and_back();

        Self {
            kind: ScriptKind::Pulse,
            action: Action::Sequence(vec![
                Action::ScaleTo {
                    scale: 1.0,
                    secs: tuning.friendly_appear_secs,
                },
                Action::Repeat {
                    action: Box::new(Action::Group(vec![wiggle, pulse])),
                    count: tuning.friendly_pulse_cycles,
                },
                Action::ScaleTo {
                    scale: 0.0,
                    secs: tuning.friendly_disappear_secs,
                },
                Action::Remove,
            ]),
        }
    }
}
