//! Spatial primitives shared by the collision, visibility and debug systems.
//!
//! Everything here is a pure function over [`glam::Vec2`]. Degenerate input
//! (parallel segments, zero-length edges, points exactly on an edge) resolves
//! to "no intersection" / "outside" instead of an error. The only hard
//! precondition is that [`bounding_box`] receives at least one vertex.
//!
//! Coordinate conventions follow the rest of the crate: world units, +Y down,
//! angles from `atan2(y, x)` in radians.

use glam::Vec2;
use std::f32::consts::PI;

/// Axis-aligned bounding box stored as `(min_x, min_y, max_x, max_y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Aabb {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Box centred on `center` spanning `half_extents` on each side.
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min_x: center.x - half_extents.x,
            min_y: center.y - half_extents.y,
            max_x: center.x + half_extents.x,
            max_y: center.y + half_extents.y,
        }
    }

    /// Same box moved by `offset`.
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        aabb_overlap(self, other)
    }
}

/// 2D cross product `a.x * b.y - b.x * a.y`.
///
/// Positive when `b` is counter-clockwise from `a` in a +Y-up frame.
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - b.x * a.y
}

/// Wrap an angle into `[-PI, PI]` with a single correction step.
///
/// Inputs are expected to be the difference of two `atan2` results, so one
/// step is always enough.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    if angle > PI {
        angle - 2.0 * PI
    } else if angle < -PI {
        angle + 2.0 * PI
    } else {
        angle
    }
}

/// Tight bounding box of a vertex list.
///
/// # Panics
///
/// Panics if `vertices` is empty. Every collider in the world has at least one
/// vertex, so an empty list is a bug in world setup.
pub fn bounding_box(vertices: &[Vec2]) -> Aabb {
    assert!(
        !vertices.is_empty(),
        "bounding_box requires at least one vertex"
    );
    let first = vertices[0];
    let mut bb = Aabb::new(first.x, first.y, first.x, first.y);
    for v in &vertices[1..] {
        bb.min_x = bb.min_x.min(v.x);
        bb.min_y = bb.min_y.min(v.y);
        bb.max_x = bb.max_x.max(v.x);
        bb.max_y = bb.max_y.max(v.y);
    }
    bb
}

/// Strict AABB overlap. Boxes that only touch do not collide.
#[inline]
pub fn aabb_overlap(a: &Aabb, b: &Aabb) -> bool {
    a.min_x < b.max_x && a.max_x > b.min_x && a.min_y < b.max_y && a.max_y > b.min_y
}

/// Point containment for a convex polygon given in either winding.
///
/// The vertices are walked counter-clockwise (reversed around vertex 0 when
/// they come in clockwise). The fan from vertex 0 is scanned for the first
/// vertex that lies counter-clockwise of the point direction; the point is
/// inside iff it lies strictly on the inner side of the edge closing that
/// wedge. Points on the boundary and polygons with fewer than three vertices
/// are reported as outside.
pub fn point_in_convex_polygon(point: Vec2, vertices: &[Vec2]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let clockwise = signed_area(vertices) < 0.0;
    // vertex i of the counter-clockwise walk
    let at = |i: usize| -> Vec2 {
        if clockwise && i != 0 {
            vertices[n - i]
        } else {
            vertices[i]
        }
    };

    let origin = at(0);
    let dir = point - origin;

    // on or to the right of the first edge
    if cross(at(1) - origin, dir) <= 0.0 {
        return false;
    }

    let mut index = 2;
    while index < n {
        if cross(dir, at(index) - origin) > 0.0 {
            break;
        }
        index += 1;
    }

    if index == n {
        return false;
    }

    let edge_start = at(index - 1);
    cross(at(index) - edge_start, point - edge_start) > 0.0
}

/// Shoelace signed area; positive for counter-clockwise winding in a +Y-up frame.
pub fn signed_area(vertices: &[Vec2]) -> f32 {
    let n = vertices.len();
    let mut twice_area = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        twice_area += a.x * b.y - b.x * a.y;
    }
    twice_area * 0.5
}

/// Parametric intersection of segments `p1 -> p2` and `q1 -> q2`.
///
/// Returns `(t, u)` with `p1 + t * (p2 - p1) == q1 + u * (q2 - q1)` when both
/// parameters lie in the open interval `(0, 1)`. Parallel segments (zero
/// determinant) and touches at an endpoint return `None`.
pub fn segment_intersect(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> Option<(f32, f32)> {
    let d1 = p2 - p1;
    let d2 = q2 - q1;

    let det = cross(d1, d2);
    if det == 0.0 {
        return None;
    }

    let k = p1 - q1;
    let t = (d2.x * k.y - d2.y * k.x) / det;
    let u = (d1.x * k.y - d1.y * k.x) / det;

    if t > 0.0 && t < 1.0 && u > 0.0 && u < 1.0 {
        Some((t, u))
    } else {
        None
    }
}
