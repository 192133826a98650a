//! Keep an entity inside a rect, bouncing off the walls
//!
//! Each axis is handled on its own: touching or crossing a wall pins the
//! position to it, and a velocity still heading into the wall is reflected.

use glam::Vec2;

use super::rect::Rect;

pub fn clamp(position: Vec2, velocity: Vec2, rect: &Rect) -> (Vec2, Vec2) {
    let (x, vx) = clamp_axis(position.x, velocity.x, rect.min.x, rect.max.x);
    let (y, vy) = clamp_axis(position.y, velocity.y, rect.min.y, rect.max.y);
    (Vec2::new(x, y), Vec2::new(vx, vy))
}

fn clamp_axis(pos: f32, vel: f32, min: f32, max: f32) -> (f32, f32) {
    if pos <= min {
        (min, if vel < 0.0 { -vel } else { vel })
    } else if pos >= max {
        (max, if vel > 0.0 { -vel } else { vel })
    } else {
        (pos, vel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arena() -> Rect {
        Rect::new(Vec2::new(0.0, 100.0), Vec2::new(1000.0, 600.0))
    }

    #[test]
    fn test_left_wall_reflects() {
        let (pos, vel) = clamp(Vec2::new(0.0, 300.0), Vec2::new(-10.0, 0.0), &arena());
        assert_eq!(pos.x, 0.0);
        assert_eq!(vel.x, 10.0);
    }

    #[test]
    fn test_past_wall_is_pulled_back() {
        let (pos, vel) = clamp(Vec2::new(1040.0, 50.0), Vec2::new(30.0, -5.0), &arena());
        assert_eq!(pos, Vec2::new(1000.0, 100.0));
        assert_eq!(vel, Vec2::new(-30.0, 5.0));
    }

    #[test]
    fn test_moving_away_from_wall_is_kept() {
        // Already heading back inside: no double flip
        let (pos, vel) = clamp(Vec2::new(-5.0, 300.0), Vec2::new(25.0, 0.0), &arena());
        assert_eq!(pos.x, 0.0);
        assert_eq!(vel.x, 25.0);
    }

    #[test]
    fn test_interior_untouched() {
        let p = Vec2::new(500.0, 300.0);
        let v = Vec2::new(-3.0, 7.0);
        assert_eq!(clamp(p, v, &arena()), (p, v));
    }

    proptest! {
        #[test]
        fn prop_clamped_inside_and_reflected(
            px in -5000.0f32..5000.0,
            py in -5000.0f32..5000.0,
            vx in -1000.0f32..1000.0,
            vy in -1000.0f32..1000.0,
        ) {
            let rect = arena();
            let (pos, vel) = clamp(Vec2::new(px, py), Vec2::new(vx, vy), &rect);

            prop_assert!(rect.contains(pos));
            // Same speed per axis, only the sign may change
            prop_assert_eq!(vel.x.abs(), vx.abs());
            prop_assert_eq!(vel.y.abs(), vy.abs());

            if px <= rect.min.x { prop_assert!(vel.x >= 0.0); }
            if px >= rect.max.x { prop_assert!(vel.x <= 0.0); }
            if py <= rect.min.y { prop_assert!(vel.y >= 0.0); }
            if py >= rect.max.y { prop_assert!(vel.y <= 0.0); }
        }
    }
}
