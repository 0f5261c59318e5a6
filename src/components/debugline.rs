use bevy_ecs::prelude::Component;
use glam::Vec2;

/// A rectangle drawn by the debug overlay, centred on `position`, rotated by
/// `angle` and `size` wide/tall. Regenerated each frame while debug mode is on.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct DebugLine {
    pub position: Vec2,
    pub angle: f32,
    pub size: Vec2,
}
