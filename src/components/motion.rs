//! Position, orientation, velocity and size of an entity.
//!
//! [`Motion`] is the one component every simulated entity carries. The
//! movement system integrates `velocity` into `position` each frame; the
//! collision systems read it back and may push the entity out of walls.
//! `scale` is both the render size and the transform scale applied to a
//! [`PolygonCollider`](super::polygoncollider::PolygonCollider).

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    /// World position (pivot) in world units.
    pub position: Vec2,
    /// Orientation in radians.
    pub angle: f32,
    /// World units per second.
    pub velocity: Vec2,
    pub scale: Vec2,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            angle: 0.0,
            velocity: Vec2::ZERO,
            scale: Vec2::splat(10.0),
        }
    }
}

impl Motion {
    /// Motionless entity at `position` with the default scale.
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}
