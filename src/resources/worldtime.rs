use bevy_ecs::prelude::Resource;

/// Simulation clock. `delta` is the scaled length of the current frame in
/// seconds; every system reads it instead of taking `dt` as an argument.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    /// Clock already advanced by one frame of `delta` seconds.
    pub fn with_delta(delta: f32) -> Self {
        WorldTime {
            delta,
            ..Default::default()
        }
    }
}
