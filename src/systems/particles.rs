//! Particle burst system.
//!
//! Advances every [`ParticleSource`]: each particle moves along its own
//! velocity, the source's remaining life shrinks by the frame delta and its
//! `alpha` follows. A source whose life is used up is despawned as a whole.
//!
//! Bursts are spawned by [`spawn_particle_burst`](crate::game::spawn_particle_burst),
//! normally in reaction to a bullet impact.

use bevy_ecs::prelude::*;

use crate::components::particlesource::ParticleSource;
use crate::resources::worldtime::WorldTime;

pub fn particle_system(
    time: Res<WorldTime>,
    mut sources: Query<(Entity, &mut ParticleSource)>,
    mut commands: Commands,
) {
    let dt = time.delta;
    for (entity, mut source) in sources.iter_mut() {
        source.life_span -= dt;
        if source.life_span <= 0.0 {
            commands.entity(entity).try_despawn();
            continue;
        }
        source.alpha = if source.max_life_span > 0.0 {
            (source.life_span / source.max_life_span).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let ParticleSource {
            positions,
            velocities,
            ..
        } = &mut *source;
        for (position, velocity) in positions.iter_mut().zip(velocities.iter()) {
            *position += *velocity * dt;
        }
    }
}
