//! Scrolling road tiles
//!
//! Purely visual: a fixed ring of tiles slides toward the player and wraps
//! back to the far end, giving the illusion of forward motion.

use glam::Vec3;

use crate::catalog::ROAD_TILE_MESH;
use crate::consts::*;
use crate::scene::{DrawableId, Scene, Transform};

#[derive(Debug)]
pub struct RoadTiles {
    tiles: Vec<(DrawableId, Transform)>,
}

impl RoadTiles {
    pub fn new(scene: &mut Scene) -> Self {
        let tiles = (0..ROAD_TILE_COUNT)
            .map(|i| {
                let transform = Transform::from_position(Vec3::new(
                    0.0,
                    i as f32 * ROAD_TILE_DEPTH - 10.0,
                    0.0,
                ));
                (scene.attach(ROAD_TILE_MESH, transform), transform)
            })
            .collect();
        Self { tiles }
    }

    pub fn update(&mut self, dt: f32, scene: &mut Scene) {
        let span = ROAD_TILE_COUNT as f32 * ROAD_TILE_DEPTH;
        for (id, transform) in &mut self.tiles {
            transform.position.y -= ROAD_SPEED * dt;
            if transform.position.y <= ROAD_WRAP_Y {
                transform.position.y += span;
            }
            scene.set_transform(*id, *transform);
        }
    }

    #[cfg(test)]
    fn tile_ys(&self) -> Vec<f32> {
        self.tiles.iter().map(|(_, t)| t.position.y).collect()
    }
}
