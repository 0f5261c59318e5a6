use bevy_ecs::prelude::Component;
use glam::Vec2;

pub const ENEMY_RADIUS: f32 = 45.0;
pub const ENEMY_MAX_HEALTH: i32 = 100;

/// AI-controlled avatar.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Enemy {
    /// Inside the player's light polygon this frame.
    pub is_visible: bool,
    /// Has noticed the player at least once.
    pub is_activated: bool,
    /// Holds `guard_post` instead of chasing.
    pub guard_mode: bool,
    pub guard_post: Vec2,
}

impl Enemy {
    pub fn new(guard_post: Vec2) -> Self {
        Self {
            is_visible: false,
            is_activated: false,
            guard_mode: false,
            guard_post,
        }
    }

    pub fn guarding(mut self) -> Self {
        self.guard_mode = true;
        self
    }
}
