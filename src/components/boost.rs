use bevy_ecs::prelude::Component;

/// Temporary speed multiplier granted by a speed-boost item.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Boost {
    /// Seconds left before the boost is removed.
    pub timer: f32,
    pub speed_multiplier: f32,
}

impl Default for Boost {
    fn default() -> Self {
        Self {
            timer: 2.0,
            speed_multiplier: 1.5,
        }
    }
}
