use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Seconds an item stays hidden after being collected.
pub const ITEM_RESPAWN_DELAY: f32 = 15.0;
/// Pickup radius of an item.
pub const ITEM_RADIUS: f32 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    HealthRegen,
    SpeedBoost,
}

/// A pickup. While `active` the entity also carries a
/// [`CircleCollider`](super::circlecollider::CircleCollider); collecting it
/// removes the collider and the item comes back `respawn_timer` seconds
/// later.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Item {
    pub position: Vec2,
    pub item_type: ItemType,
    pub active: bool,
    pub respawn_timer: f32,
}

impl Item {
    pub fn new(position: Vec2, item_type: ItemType) -> Self {
        Self {
            position,
            item_type,
            active: true,
            respawn_timer: ITEM_RESPAWN_DELAY,
        }
    }
}
