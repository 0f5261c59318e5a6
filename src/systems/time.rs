//! Simulation clock.
//!
//! [`update_world_time`] is called by [`PhysicsStep::run`](crate::physics::PhysicsStep::run)
//! before any system, so every system of a step reads the same `delta`.

use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Advance [`WorldTime`] by one frame of `dt` real seconds.
///
/// `delta` becomes `dt * time_scale` and is added to `elapsed`; the frame
/// counter goes up by one even when the scaled delta is zero (paused).
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut clock = world.resource_mut::<WorldTime>();
    clock.delta = dt * clock.time_scale;
    clock.elapsed += clock.delta;
    clock.frame_count += 1;
}
