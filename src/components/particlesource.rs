use bevy_ecs::prelude::Component;
use glam::{Vec2, Vec3};

pub const PARTICLE_COUNT: usize = 50;
pub const PARTICLE_RADIUS: f32 = 2.0;
pub const PARTICLE_LIFE_SPAN: f32 = 1.0;
pub const PARTICLE_SPEED: f32 = 150.0;
pub const PARTICLE_SPREAD: f32 = std::f32::consts::FRAC_PI_3;

/// A burst of short-lived debris particles.
///
/// `life_span` counts down from `max_life_span`; `alpha` follows the ratio of
/// the two and the entity is despawned when it reaches zero.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct ParticleSource {
    pub positions: Vec<Vec2>,
    pub velocities: Vec<Vec2>,
    pub radius: f32,
    pub alpha: f32,
    pub life_span: f32,
    pub max_life_span: f32,
    /// RGB in 0..=1.
    pub color: Vec3,
}
