//! Messages emitted by the collision systems.
//!
//! The physics step never applies damage to avatars or pickup effects
//! itself. It reports what happened through these messages; [`PhysicsStep`]
//! drains them into its [`StepReport`] and the caller (by default the
//! consumers in [`crate::game`]) decides what they mean.
//!
//! [`PhysicsStep`]: crate::physics::PhysicsStep
//! [`StepReport`]: crate::physics::StepReport
use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;
use glam::Vec2;

use crate::components::item::ItemType;

/// A bullet hit an avatar or a non-convex wall.
///
/// Written at most once per bullet per frame. The bullet has already been
/// despawned when this is read; `position` and `velocity` are its last state.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct BulletImpact {
    pub bullet: Entity,
    pub target: Entity,
    pub position: Vec2,
    pub velocity: Vec2,
}

/// The player walked over an active item.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct ItemCollected {
    pub player: Entity,
    pub item: Entity,
    pub item_type: ItemType,
}
