//! Scrolling camera and tiling background
//!
//! The camera slides right at a constant speed. Two background tiles leapfrog
//! each other so the world never runs out, and the camera rect (the playable
//! area under the camera) is what the protagonist is clamped to.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Centre of the view in world coordinates
    pub pos: Vec2,
    /// Scroll velocity (units/s)
    pub velocity: Vec2,
}

impl Camera {
    /// Camera centred on the scene, scrolling right at `speed`
    pub fn new(scene_size: Vec2, speed: f32) -> Self {
        Self {
            pos: scene_size / 2.0,
            velocity: Vec2::new(speed, 0.0),
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos = advance(self.pos, self.velocity.x, dt);
    }
}

/// Move the camera horizontally; y never changes
pub fn advance(camera_pos: Vec2, speed: f32, dt: f32) -> Vec2 {
    Vec2::new(camera_pos.x + speed * dt, camera_pos.y)
}

/// Playable area for a scene, letterboxed to at most `max_aspect`
/// (width / height). Spans the full width.
pub fn playable_rect(scene_size: Vec2, max_aspect: f32) -> Rect {
    let height = (scene_size.x / max_aspect).min(scene_size.y);
    let margin = (scene_size.y - height) / 2.0;
    Rect::from_origin_size(Vec2::new(0.0, margin), Vec2::new(scene_size.x, height))
}

/// The playable rect as seen through a camera at `camera_pos`
pub fn camera_rect(camera_pos: Vec2, scene_size: Vec2, playable: &Rect) -> Rect {
    let size = playable.size();
    let origin = camera_pos - scene_size / 2.0 + (scene_size - size) / 2.0;
    Rect::from_origin_size(origin, size)
}

/// One background segment; `x` is its left edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackgroundTile {
    pub index: u32,
    pub x: f32,
    pub width: f32,
}

/// The two alternating tiles covering a scene of the given width
pub fn background_tiles(width: f32) -> [BackgroundTile; 2] {
    [
        BackgroundTile {
            index: 0,
            x: 0.0,
            width,
        },
        BackgroundTile {
            index: 1,
            x: width,
            width,
        },
    ]
}

/// Jump any tile that scrolled fully off the left of the camera rect two
/// widths ahead. Returns how many tiles moved.
pub fn recycle_background(tiles: &mut [BackgroundTile], camera_rect: &Rect) -> usize {
    let mut moved = 0;
    for tile in tiles.iter_mut() {
        if tile.x + tile.width < camera_rect.min.x {
            tile.x += tile.width * 2.0;
            moved += 1;
        }
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: Vec2 = Vec2::new(2048.0, 1536.0);

    #[test]
    fn test_playable_rect_letterboxes() {
        let rect = playable_rect(SCENE, 16.0 / 9.0);
        assert_eq!(rect.width(), 2048.0);
        assert!((rect.height() - 1152.0).abs() < 1e-3);
        assert!((rect.min.y - 192.0).abs() < 1e-3);
    }

    #[test]
    fn test_playable_rect_never_exceeds_scene() {
        // Scene wider than the max aspect: full height, no margin
        let rect = playable_rect(Vec2::new(4000.0, 1000.0), 16.0 / 9.0);
        assert_eq!(rect.height(), 1000.0);
        assert_eq!(rect.min.y, 0.0);
    }

    #[test]
    fn test_camera_rect_tracks_camera() {
        let playable = playable_rect(SCENE, 16.0 / 9.0);
        let start = camera_rect(SCENE / 2.0, SCENE, &playable);
        assert!((start.min - playable.min).length() < 1e-3);
        assert!((start.max - playable.max).length() < 1e-3);

        let moved = camera_rect(SCENE / 2.0 + Vec2::new(500.0, 0.0), SCENE, &playable);
        assert!((moved.min.x - 500.0).abs() < 1e-3);
        assert!((moved.min.y - playable.min.y).abs() < 1e-3);
        assert_eq!(moved.size(), playable.size());
    }

    #[test]
    fn test_advance_is_horizontal() {
        let mut camera = Camera::new(SCENE, 200.0);
        camera.advance(0.5);
        assert_eq!(camera.pos, Vec2::new(1124.0, 768.0));
        assert_eq!(advance(Vec2::new(0.0, 5.0), 200.0, 0.0), Vec2::new(0.0, 5.0));
    }

    #[test]
    fn test_background_leapfrogs() {
        let mut tiles = background_tiles(100.0);
        let view = |min_x: f32| Rect::from_origin_size(Vec2::new(min_x, 0.0), Vec2::new(100.0, 50.0));

        // Trailing edge exactly at the camera edge: not yet recycled
        assert_eq!(recycle_background(&mut tiles, &view(100.0)), 0);

        assert_eq!(recycle_background(&mut tiles, &view(101.0)), 1);
        assert_eq!(tiles[0].x, 200.0);
        assert_eq!(tiles[1].x, 100.0);

        assert_eq!(recycle_background(&mut tiles, &view(201.0)), 1);
        assert_eq!(tiles[1].x, 300.0);

        // The two tiles always sit one width apart
        assert_eq!((tiles[1].x - tiles[0].x).abs(), 100.0);
    }
}
