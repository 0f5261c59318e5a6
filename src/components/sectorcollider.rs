use bevy_ecs::prelude::Component;
use glam::Vec2;

pub const PUSH_DISTANCE: f32 = 500.0;
pub const PUSH_SPAN: f32 = std::f32::consts::FRAC_PI_3;

/// Circular sector used by push areas.
///
/// `angle` is the direction of the sector's bisector in radians (as returned
/// by `atan2(y, x)`), `span` its full opening angle.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct SectorCollider {
    pub position: Vec2,
    pub distance: f32,
    pub angle: f32,
    pub span: f32,
}

/// One-shot push query. Evaluated and despawned on the next physics step.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct PushArea;
