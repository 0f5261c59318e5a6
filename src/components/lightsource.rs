//! The player's light polygon.
//!
//! Rebuilt from scratch by the visibility system every frame; exactly one
//! entity carries a [`LightSource`] after each physics step.

use bevy_ecs::prelude::Component;
use glam::{Vec2, Vec3};

#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct LightSource {
    /// Observer position in world units.
    pub origin: Vec2,
    /// Ray contact points relative to `origin`, sorted by angle. The fan
    /// centre is only in `vertices`, as its last entry.
    pub contact_points: Vec<Vec2>,
    /// Ray angles, parallel to `contact_points`.
    pub angles: Vec<f32>,
    /// Screen-normalised mesh vertices.
    pub vertices: Vec<Vec3>,
    /// Triangle-fan indices into `vertices`.
    pub indices: Vec<u32>,
}
