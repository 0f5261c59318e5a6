use bevy_ecs::prelude::Component;
use glam::Vec2;

/// How long a shockwave effect lives, in seconds.
pub const SHOCKWAVE_LIFETIME: f32 = 1.0;

/// Visual shockwave spawned when a push area knocks an enemy back.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct ShockwaveSource {
    pub position: Vec2,
    pub time_elapsed: f32,
}

impl ShockwaveSource {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            time_elapsed: 0.0,
        }
    }
}
