//! Debug toggle resource.
//!
//! The mere presence of this resource enables the debug overlay (axes, wall
//! edges, world grid and velocity arrows). Remove it to disable.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the debug overlay system emits lines.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct DebugMode {}
