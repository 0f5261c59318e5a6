//! Convex polygon collider for static walls.
//!
//! Vertices are stored in local space and transformed by the owning entity's
//! [`Motion`]: scaled by `scale`, rotated by `angle`, then translated to
//! `position`. The default shape is the unit square centred on the pivot, so
//! a wall's `scale` is simply its width and height.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use smallvec::{SmallVec, smallvec};

use super::motion::Motion;
use crate::geometry::{Aabb, bounding_box};

/// Polygon vertex list; walls are almost always quads.
pub type Vertices = SmallVec<[Vec2; 8]>;

#[derive(Component, Clone, Debug, PartialEq)]
pub struct PolygonCollider {
    pub vertices: Vertices,
}

impl Default for PolygonCollider {
    fn default() -> Self {
        Self {
            vertices: smallvec![
                Vec2::new(-0.5, -0.5),
                Vec2::new(0.5, -0.5),
                Vec2::new(0.5, 0.5),
                Vec2::new(-0.5, 0.5),
            ],
        }
    }
}

impl PolygonCollider {
    pub fn new(vertices: impl IntoIterator<Item = Vec2>) -> Self {
        Self {
            vertices: vertices.into_iter().collect(),
        }
    }

    /// Vertices in world space for the given transform.
    pub fn world_vertices(&self, motion: &Motion) -> Vertices {
        let rotation = Vec2::from_angle(motion.angle);
        self.vertices
            .iter()
            .map(|v| motion.position + rotation.rotate(*v * motion.scale))
            .collect()
    }

    pub fn world_aabb(&self, motion: &Motion) -> Aabb {
        bounding_box(&self.world_vertices(motion))
    }
}
