//! The per-frame physics step.
//!
//! [`PhysicsStep`] owns a [`Schedule`] with the simulation systems chained in
//! a fixed order, so that integration always precedes collision resolution,
//! which always precedes visibility:
//!
//! 1. [`movement_system`] – integrate velocities, apply drag
//! 2. [`expire_timers_system`] – speed boosts and shockwaves
//! 3. [`bullet_collision_system`] – bullets vs bounds, walls and avatars
//! 4. [`item_pickup_system`] – player vs items
//! 5. [`avatar_wall_collision_system`] – back avatars out of walls
//! 6. [`push_area_system`] – sector impulses
//! 7. [`visibility_system`] – light polygon and enemy visibility
//! 8. [`debug_overlay_system`] – only while debug mode is on
//!
//! Chaining inserts a command flush between systems, so entities despawned by
//! one system are gone for the next. [`PhysicsStep::run`] returns only after
//! the whole chain has run; callers never see a half-updated frame.
//!
//! # Messages
//!
//! Bullet impacts and item pickups are written as messages and drained into
//! the returned [`StepReport`]. They do not carry over to the next step.

use bevy_ecs::message::Messages;
use bevy_ecs::prelude::*;

use crate::events::collision::{BulletImpact, ItemCollected};
use crate::systems::collision::{
    avatar_wall_collision_system, bullet_collision_system, item_pickup_system, push_area_system,
};
use crate::systems::debug::debug_overlay_system;
use crate::systems::movement::movement_system;
use crate::systems::time::update_world_time;
use crate::systems::timers::expire_timers_system;
use crate::systems::visibility::visibility_system;

/// What happened during one [`PhysicsStep::run`] that the caller must react to.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StepReport {
    pub impacts: Vec<BulletImpact>,
    pub pickups: Vec<ItemCollected>,
}

impl StepReport {
    pub fn is_empty(&self) -> bool {
        self.impacts.is_empty() && self.pickups.is_empty()
    }
}

pub struct PhysicsStep {
    schedule: Schedule,
}

impl Default for PhysicsStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsStep {
    pub fn new() -> Self {
        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                movement_system,
                expire_timers_system,
                bullet_collision_system,
                item_pickup_system,
                avatar_wall_collision_system,
                push_area_system,
                visibility_system,
                debug_overlay_system,
            )
                .chain(),
        );
        Self { schedule }
    }

    /// Insert the message queues the step writes to. Safe to call twice.
    pub fn init_world(world: &mut World) {
        world.init_resource::<Messages<BulletImpact>>();
        world.init_resource::<Messages<ItemCollected>>();
    }

    /// Advance the world by `dt` seconds.
    ///
    /// The world must hold [`WorldTime`](crate::resources::worldtime::WorldTime),
    /// [`GameConfig`](crate::resources::gameconfig::GameConfig) and exactly
    /// one player.
    pub fn run(&mut self, world: &mut World, dt: f32) -> StepReport {
        Self::init_world(world);
        update_world_time(world, dt);
        self.schedule.run(world);

        StepReport {
            impacts: world
                .resource_mut::<Messages<BulletImpact>>()
                .drain()
                .collect(),
            pickups: world
                .resource_mut::<Messages<ItemCollected>>()
                .drain()
                .collect(),
        }
    }
}
