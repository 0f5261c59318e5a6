use bevy_ecs::prelude::Component;

pub const BULLET_SPEED: f32 = 1000.0;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Bullet {
    pub speed: f32,
}

impl Default for Bullet {
    fn default() -> Self {
        Self {
            speed: BULLET_SPEED,
        }
    }
}
