//! Shadow casting and line of sight.
//!
//! The player's field of view is a star-shaped "light polygon" rebuilt every
//! frame by casting rays from the player toward every wall corner in view.
//! The same polygon drives two things: the fog-of-war mesh stored in the
//! [`LightSource`] entity, and [`Enemy::is_visible`].
//!
//! # Algorithm
//!
//! 1. A rectangle centred on the observer, half the viewport plus a padding
//!    on each side, bounds the view. Its four edges are always occluders and
//!    its four corners are always ray targets.
//! 2. Every wall edge (in observer-relative coordinates) whose bounding box
//!    overlaps the view rectangle becomes an occluder; its endpoints,
//!    clamped to the rectangle, become ray targets.
//! 3. Target angles are sorted and exact duplicates dropped.
//! 4. Two rays per angle, nudged by ±[`RAY_EPSILON`], so that a ray grazing a
//!    corner sees both the corner and what lies behind it. Each ray stops at
//!    the closest occluder it properly crosses, or at the ray length
//!    (`half_w + half_h`, always beyond the view rectangle).
//! 5. The contact points, in angle order, plus the observer as the fan
//!    centre, form the polygon.
//!
//! The work is O(edges × rays) and redone from scratch each frame since
//! walls can be built and destroyed at any time.
//!
//! # Related
//!
//! - [`crate::geometry::segment_intersect`] – ray/edge test
//! - [`crate::components::lightsource::LightSource`] – the per-frame output

use bevy_ecs::prelude::*;
use glam::{Vec2, Vec3};

use crate::components::enemy::Enemy;
use crate::components::lightsource::LightSource;
use crate::components::motion::Motion;
use crate::components::nonconvexcollider::NonConvexCollider;
use crate::components::player::Player;
use crate::components::polygoncollider::PolygonCollider;
use crate::components::wall::Wall;
use crate::geometry::{Aabb, aabb_overlap, bounding_box, cross, segment_intersect};
use crate::resources::gameconfig::GameConfig;

/// Angular offset of the two rays cast toward each target, in radians.
pub const RAY_EPSILON: f32 = 1e-5;

/// Result of [`compute_light_polygon`], relative to the observer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightPolygon {
    /// Ray contact points sorted by angle. The fan centre is not included.
    pub contact_points: Vec<Vec2>,
    /// Angle of the ray that produced each contact point.
    pub angles: Vec<f32>,
}

impl LightPolygon {
    /// Mesh vertex count: every contact point plus the centre.
    pub fn vertex_count(&self) -> usize {
        self.contact_points.len() + 1
    }

    /// Whether a point, given relative to the observer, is lit.
    ///
    /// The two rays bracketing the point's bearing are found (wrapping from
    /// the last ray back to the first) and the point is lit when it lies on
    /// the observer's side of the segment joining their contact points.
    pub fn is_visible(&self, relative: Vec2) -> bool {
        let n = self.angles.len();
        if n == 0 {
            return false;
        }
        let angle = relative.y.atan2(relative.x);
        let last = self.angles[n - 1];

        let j = self
            .angles
            .iter()
            .position(|a| angle < *a || angle > last)
            .unwrap_or(0);
        let previous = if j == 0 { n - 1 } else { j - 1 };

        let dir1 = self.contact_points[previous] - self.contact_points[j];
        let dir2 = relative - self.contact_points[j];
        cross(dir1, dir2) <= 0.0
    }

    /// Viewport-normalised mesh vertices, y up, with the centre last.
    pub fn screen_vertices(&self, window_width: f32, window_height: f32) -> Vec<Vec3> {
        self.contact_points
            .iter()
            .map(|p| Vec3::new(p.x * 2.0 / window_width, -p.y * 2.0 / window_height, 0.0))
            .chain(std::iter::once(Vec3::ZERO))
            .collect()
    }
}

/// Cast the light polygon for an observer at `observer`.
///
/// `walls` are closed polygons in world coordinates (the last vertex
/// connects back to the first). `half_extents` is half the size of the view
/// rectangle, padding included.
pub fn compute_light_polygon<W: AsRef<[Vec2]>>(
    observer: Vec2,
    walls: &[W],
    half_extents: Vec2,
) -> LightPolygon {
    let (hw, hh) = (half_extents.x, half_extents.y);
    let ray_length = hw + hh;

    let corners = [
        Vec2::new(-hw, -hh),
        Vec2::new(hw, -hh),
        Vec2::new(hw, hh),
        Vec2::new(-hw, hh),
    ];
    let view: Aabb = bounding_box(&corners);

    let mut angles: Vec<f32> = corners.iter().map(|c| c.y.atan2(c.x)).collect();
    let mut segments: Vec<(Vec2, Vec2)> = (0..4).map(|i| (corners[i], corners[(i + 1) % 4])).collect();

    let clamped_angle = |v: Vec2| -> f32 { v.y.clamp(-hh, hh).atan2(v.x.clamp(-hw, hw)) };

    for wall in walls {
        let vertices = wall.as_ref();
        for i in 0..vertices.len() {
            let v1 = vertices[i] - observer;
            let v2 = vertices[(i + 1) % vertices.len()] - observer;
            if aabb_overlap(&view, &bounding_box(&[v1, v2])) {
                segments.push((v1, v2));
                angles.push(clamped_angle(v1));
                angles.push(clamped_angle(v2));
            }
        }
    }

    angles.sort_by(|a, b| a.total_cmp(b));
    angles.dedup();

    let mut polygon = LightPolygon {
        contact_points: Vec::with_capacity(angles.len() * 2),
        angles: Vec::with_capacity(angles.len() * 2),
    };

    for angle in angles {
        for ray_angle in [angle - RAY_EPSILON, angle + RAY_EPSILON] {
            let ray = Vec2::from_angle(ray_angle) * ray_length;
            let closest = segments
                .iter()
                .filter_map(|(a, b)| segment_intersect(Vec2::ZERO, ray, *a, *b))
                .map(|(t, _)| t)
                .fold(1.0f32, f32::min);
            polygon.contact_points.push(ray * closest);
            polygon.angles.push(ray_angle);
        }
    }

    polygon
}

/// Triangle-fan indices for a light polygon mesh of `vertex_count` vertices
/// whose last vertex is the centre: triangle `i` is
/// `(n - 1, i, (i + 1) % (n - 1))`.
///
/// # Panics
///
/// Panics if `vertex_count <= 8`; a light polygon always has at least the
/// eight rays toward the view corners plus its centre.
pub fn light_polygon_indices(vertex_count: usize) -> Vec<u32> {
    assert!(
        vertex_count > 8,
        "light polygon needs more than 8 vertices, got {}",
        vertex_count
    );
    let centre = (vertex_count - 1) as u32;
    (0..centre)
        .flat_map(|i| [centre, i, (i + 1) % centre])
        .collect()
}

/// Rebuild the player's light polygon and refresh enemy visibility.
///
/// Every existing [`LightSource`] is despawned and exactly one new one is
/// spawned. Occluders are the convex walls and each segment quad of the
/// non-convex walls.
///
/// # Panics
///
/// Panics if the world has no [`Player`].
pub fn visibility_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    player: Query<&Motion, With<Player>>,
    walls: Query<(&Motion, &PolygonCollider), With<Wall>>,
    non_convex: Query<&NonConvexCollider>,
    lights: Query<Entity, With<LightSource>>,
    mut enemies: Query<(&Motion, &mut Enemy)>,
) {
    let Ok(player) = player.single() else {
        panic!("visibility needs exactly one player with Motion");
    };
    let observer = player.position;

    for light in lights.iter() {
        commands.entity(light).despawn();
    }

    let mut occluders: Vec<Vec<Vec2>> = walls
        .iter()
        .map(|(motion, collider)| collider.world_vertices(motion).to_vec())
        .collect();
    for wall in non_convex.iter() {
        occluders.extend(wall.quads().map(|quad| quad.to_vec()));
    }

    let (width, height) = (config.window_width as f32, config.window_height as f32);
    let half_extents = Vec2::new(
        width / 2.0 + config.visibility_padding,
        height / 2.0 + config.visibility_padding,
    );
    let polygon = compute_light_polygon(observer, &occluders, half_extents);

    for (motion, mut enemy) in enemies.iter_mut() {
        enemy.is_visible = polygon.is_visible(motion.position - observer);
    }

    let vertices = polygon.screen_vertices(width, height);
    let indices = light_polygon_indices(vertices.len());
    commands.spawn(LightSource {
        origin: observer,
        contact_points: polygon.contact_points,
        angles: polygon.angles,
        vertices,
        indices,
    });
}

/// Whether `entity` was inside the player's light polygon at the end of the
/// last physics step. Entities that are not enemies are never visible.
pub fn is_visible(world: &World, entity: Entity) -> bool {
    world
        .get::<Enemy>(entity)
        .is_some_and(|enemy| enemy.is_visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF: Vec2 = Vec2::new(650.0, 450.0);

    fn square(center: Vec2, half: f32) -> Vec<Vec2> {
        vec![
            center + Vec2::new(-half, -half),
            center + Vec2::new(half, -half),
            center + Vec2::new(half, half),
            center + Vec2::new(-half, half),
        ]
    }

    #[test]
    fn open_field_reaches_the_view_rectangle() {
        let walls: Vec<Vec<Vec2>> = Vec::new();
        let polygon = compute_light_polygon(Vec2::new(1000.0, 1000.0), &walls, HALF);
        assert_eq!(polygon.contact_points.len(), 8);
        assert_eq!(polygon.vertex_count(), 9);
        for p in &polygon.contact_points {
            let on_x = (p.x.abs() - HALF.x).abs() < 0.5;
            let on_y = (p.y.abs() - HALF.y).abs() < 0.5;
            assert!(on_x || on_y, "{p:?} not on the view rectangle");
        }
        assert!(polygon.is_visible(Vec2::new(300.0, 0.0)));
        assert!(polygon.is_visible(Vec2::new(-100.0, 200.0)));
        assert!(!polygon.is_visible(Vec2::new(900.0, 0.0)));
    }

    #[test]
    fn angles_are_sorted() {
        let walls = vec![square(Vec2::new(200.0, 0.0), 20.0), square(Vec2::new(0.0, -300.0), 50.0)];
        let polygon = compute_light_polygon(Vec2::ZERO, &walls, HALF);
        assert!(polygon.angles.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(polygon.angles.len(), polygon.contact_points.len());
    }

    #[test]
    fn wall_casts_a_shadow() {
        let walls = vec![vec![Vec2::new(100.0, -50.0), Vec2::new(100.0, 50.0)]];
        let polygon = compute_light_polygon(Vec2::ZERO, &walls, HALF);
        assert!(!polygon.is_visible(Vec2::new(200.0, 0.0)));
        assert!(polygon.is_visible(Vec2::new(50.0, 0.0)));
        // beside the wall, out of its shadow
        assert!(polygon.is_visible(Vec2::new(200.0, 150.0)));
    }

    #[test]
    fn far_walls_are_ignored() {
        let walls = vec![square(Vec2::new(3000.0, 0.0), 100.0)];
        let polygon = compute_light_polygon(Vec2::ZERO, &walls, HALF);
        assert_eq!(polygon.contact_points.len(), 8);
    }

    #[test]
    fn indices_form_a_closed_fan() {
        let indices = light_polygon_indices(9);
        assert_eq!(indices.len(), 24);
        assert_eq!(&indices[..3], &[8, 0, 1]);
        assert_eq!(&indices[21..], &[8, 7, 0]);
    }

    #[test]
    #[should_panic(expected = "more than 8 vertices")]
    fn indices_reject_tiny_polygons() {
        light_polygon_indices(8);
    }

    #[test]
    fn screen_vertices_flip_y_and_end_with_centre() {
        let polygon = LightPolygon {
            contact_points: vec![Vec2::new(600.0, 400.0)],
            angles: vec![0.6],
        };
        let verts = polygon.screen_vertices(1200.0, 800.0);
        assert_eq!(verts, vec![Vec3::new(1.0, -1.0, 0.0), Vec3::ZERO]);
    }
}
