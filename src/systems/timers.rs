//! Effect countdowns.
//!
//! # System Flow
//!
//! Each frame:
//!
//! 1. Every [`Boost`] loses `delta` seconds; it is removed from its entity
//!    once the timer reaches zero.
//! 2. Every [`ShockwaveSource`] gains `delta` seconds; the entity is despawned
//!    once it has lived longer than [`SHOCKWAVE_LIFETIME`].
//!
//! Both use the scaled [`WorldTime::delta`], so slow motion stretches them.

use bevy_ecs::prelude::*;

use crate::components::boost::Boost;
use crate::components::shockwave::{SHOCKWAVE_LIFETIME, ShockwaveSource};
use crate::resources::worldtime::WorldTime;

pub fn expire_timers_system(
    world_time: Res<WorldTime>,
    mut boosts: Query<(Entity, &mut Boost)>,
    mut shockwaves: Query<(Entity, &mut ShockwaveSource)>,
    mut commands: Commands,
) {
    let dt = world_time.delta;

    for (entity, mut boost) in boosts.iter_mut() {
        boost.timer -= dt;
        if boost.timer <= 0.0 {
            commands.entity(entity).remove::<Boost>();
        }
    }

    for (entity, mut shockwave) in shockwaves.iter_mut() {
        shockwave.time_elapsed += dt;
        if shockwave.time_elapsed > SHOCKWAVE_LIFETIME {
            commands.entity(entity).try_despawn();
        }
    }
}
