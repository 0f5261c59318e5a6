//! Velocity integration and drag.
//!
//! Every entity with a [`Motion`] moves by `velocity * delta`. Entities that
//! also carry [`Physics`] (knocked back by a push) then lose speed at
//! [`GameConfig::deceleration`]; once slower than
//! [`GameConfig::stop_speed`] they drop the marker and keep whatever velocity
//! they have left.

use bevy_ecs::prelude::*;

use crate::components::motion::Motion;
use crate::components::physics::Physics;
use crate::resources::gameconfig::GameConfig;
use crate::resources::worldtime::WorldTime;

pub fn movement_system(
    mut query: Query<(Entity, &mut Motion, Has<Physics>)>,
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    mut commands: Commands,
) {
    let dt = time.delta;
    for (entity, mut motion, decelerating) in query.iter_mut() {
        let delta = motion.velocity * dt;
        motion.position += delta;

        if decelerating {
            let dir = -motion.velocity.normalize_or_zero();
            motion.velocity += dir * config.deceleration * dt;
            if motion.velocity.length() < config.stop_speed {
                commands.entity(entity).remove::<Physics>();
            }
        }
    }
}
