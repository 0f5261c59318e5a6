use bevy_ecs::prelude::Component;

/// Marks an entity whose collision shape is its position alone (bullets).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct PointCollider;
