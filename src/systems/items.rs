//! Item respawn countdown.
//!
//! Collected items stay in the world, inactive and without a collider. Each
//! frame their `respawn_timer` counts down; at zero they become active again,
//! get their [`CircleCollider`] back and the timer is rearmed to
//! [`ITEM_RESPAWN_DELAY`] for the next pickup.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::circlecollider::CircleCollider;
use crate::components::item::{ITEM_RADIUS, ITEM_RESPAWN_DELAY, Item};
use crate::resources::worldtime::WorldTime;

pub fn item_respawn_system(
    time: Res<WorldTime>,
    mut items: Query<(Entity, &mut Item)>,
    mut commands: Commands,
) {
    let dt = time.delta;
    for (entity, mut item) in items.iter_mut() {
        if item.active {
            continue;
        }
        item.respawn_timer -= dt;
        if item.respawn_timer <= 0.0 {
            item.active = true;
            item.respawn_timer = ITEM_RESPAWN_DELAY;
            commands.entity(entity).insert(CircleCollider::new(ITEM_RADIUS));
            debug!("{:?} {:?} respawned", item.item_type, entity);
        }
    }
}
