//! Knockback and drag marker.
//!
//! An entity carrying [`Physics`] is decelerating: the movement system bleeds
//! its speed every frame and removes the component once the entity has nearly
//! stopped. While present it also makes wall collisions bounce (the velocity
//! component is flipped instead of kept) and provides the mass used by push
//! impulses.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Physics {
    pub mass: f32,
}

impl Default for Physics {
    fn default() -> Self {
        Self { mass: 1.0 }
    }
}
