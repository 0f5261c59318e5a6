use bevy_ecs::prelude::Component;

pub const WALL_HEALTH: i32 = 50;
pub const NON_CONVEX_WALL_THICKNESS: f32 = 20.0;
pub const NON_CONVEX_WALL_HEALTH: i32 = 300;

/// Static convex wall. Paired with a
/// [`PolygonCollider`](super::polygoncollider::PolygonCollider) and a
/// [`Motion`](super::motion::Motion).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Wall;

/// Walls with this marker lose [`Health`](super::health::Health) when shot
/// and disappear at zero.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Destroyable;
