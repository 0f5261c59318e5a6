use bevy_ecs::prelude::Component;

/// Circle collider centred on the entity position. Used by avatars (player and
/// enemies) and by item pickups.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct CircleCollider {
    pub radius: f32,
}

impl CircleCollider {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}
