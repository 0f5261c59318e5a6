use bevy_ecs::prelude::Component;

pub const PLAYER_RADIUS: f32 = 50.0;
pub const PLAYER_MAX_HEALTH: i32 = 1000;

/// The observer. Exactly one entity carries this marker while a round runs.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Player;
