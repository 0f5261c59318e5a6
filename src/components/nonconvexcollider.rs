//! Thick poly-line wall collider.
//!
//! A [`NonConvexCollider`] is a ribbon of constant thickness traced around a
//! sequence of hinge points. Each hinge-to-hinge segment becomes one quad
//! (four vertices, two triangles), so the collider is a triangle list that is
//! not convex as a whole but is convex piece by piece. Player-built walls use
//! this shape; they have their own [`Health`](super::health::Health) and are
//! standalone entities (no [`Motion`](super::motion::Motion)).
//!
//! Vertex layout per segment `i` (between hinges `h1` and `h2`, with `dir` the
//! unit direction and `normal` its left perpendicular):
//!
//! ```text
//! 4i + 0 = h1 + ( normal - dir) * t      4i + 2 = h2 + ( normal + dir) * t
//! 4i + 1 = h1 + (-normal - dir) * t      4i + 3 = h2 + (-normal + dir) * t
//! ```
//!
//! `4i -> 4i + 2` and `4i + 1 -> 4i + 3` are the two long edges that bullets
//! are tested against.

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::geometry::{Aabb, bounding_box, segment_intersect};

#[derive(Component, Clone, Debug, PartialEq)]
pub struct NonConvexCollider {
    pub vertices: Vec<Vec2>,
    /// Triangle list into `vertices`, for rendering.
    pub indices: Vec<u32>,
    /// Cached world-space bounding box of every vertex.
    pub bounds: Aabb,
}

impl NonConvexCollider {
    /// Build the ribbon around `hinges` with half-thickness `thickness`.
    ///
    /// Returns `None` when fewer than two hinges are given. Coincident
    /// consecutive hinges are skipped since they have no direction.
    pub fn from_hinges(thickness: f32, hinges: &[Vec2]) -> Option<Self> {
        let mut vertices = Vec::with_capacity(hinges.len().saturating_sub(1) * 4);
        let mut indices = Vec::with_capacity(hinges.len().saturating_sub(1) * 6);

        for pair in hinges.windows(2) {
            let (h1, h2) = (pair[0], pair[1]);
            let Some(dir) = (h2 - h1).try_normalize() else {
                continue;
            };
            let normal = Vec2::new(-dir.y, dir.x);
            let base = vertices.len() as u32;

            vertices.push(h1 + (normal - dir) * thickness);
            vertices.push(h1 + (-normal - dir) * thickness);
            vertices.push(h2 + (normal + dir) * thickness);
            vertices.push(h2 + (-normal + dir) * thickness);

            indices.extend_from_slice(&[base, base + 1, base + 2, base + 1, base + 2, base + 3]);
        }

        if vertices.is_empty() {
            return None;
        }
        let bounds = bounding_box(&vertices);
        Some(Self {
            vertices,
            indices,
            bounds,
        })
    }

    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// The two long edges of every segment.
    pub fn long_edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.vertices
            .chunks_exact(4)
            .flat_map(|quad| [(quad[0], quad[2]), (quad[1], quad[3])])
    }

    /// Each segment as a convex quad in perimeter order, for shadow casting.
    pub fn quads(&self) -> impl Iterator<Item = [Vec2; 4]> + '_ {
        self.vertices
            .chunks_exact(4)
            .map(|quad| [quad[0], quad[2], quad[3], quad[1]])
    }

    /// Whether the segment `from -> to` properly crosses one of the long edges.
    pub fn path_crosses(&self, from: Vec2, to: Vec2) -> bool {
        self.long_edges()
            .any(|(a, b)| segment_intersect(from, to, a, b).is_some())
    }
}
