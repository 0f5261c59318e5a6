//! Debug overlay geometry.
//!
//! While [`DebugMode`] is present the overlay system replaces last frame's
//! [`DebugLine`]s with:
//!
//! - a short cross along the local axes of every entity with a [`Motion`]
//! - the outline of every convex wall
//! - the pathfinding grid (one line every [`CELL_SIZE`] world units)
//! - a velocity arrow for anything moving faster than 1 unit/s
//!
//! Lines are plain entities so any renderer can draw them as thin rotated
//! rectangles.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::debugline::DebugLine;
use crate::components::motion::Motion;
use crate::components::polygoncollider::PolygonCollider;
use crate::resources::debugmode::DebugMode;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gridmap::CELL_SIZE;

const LINE_WIDTH: f32 = 3.0;
const AXIS_LENGTH: f32 = 50.0;
const ARROW_LENGTH: f32 = 100.0;

pub fn debug_overlay_system(
    mut commands: Commands,
    debug: Option<Res<DebugMode>>,
    config: Res<GameConfig>,
    old_lines: Query<Entity, With<DebugLine>>,
    bodies: Query<(&Motion, Option<&PolygonCollider>)>,
) {
    if debug.is_none() {
        return;
    }

    for line in old_lines.iter() {
        commands.entity(line).despawn();
    }

    let mut lines: Vec<DebugLine> = Vec::new();

    for (motion, collider) in bodies.iter() {
        lines.push(DebugLine {
            position: motion.position,
            angle: motion.angle,
            size: Vec2::new(AXIS_LENGTH, LINE_WIDTH),
        });
        lines.push(DebugLine {
            position: motion.position,
            angle: motion.angle,
            size: Vec2::new(LINE_WIDTH, AXIS_LENGTH),
        });

        if let Some(collider) = collider {
            let vertices = collider.world_vertices(motion);
            for i in 0..vertices.len() {
                let v1 = vertices[i];
                let v2 = vertices[(i + 1) % vertices.len()];
                let edge = v2 - v1;
                lines.push(DebugLine {
                    position: (v1 + v2) / 2.0,
                    angle: edge.y.atan2(edge.x),
                    size: Vec2::new(edge.length(), LINE_WIDTH),
                });
            }
        }
    }

    let size = config.world_size;
    let cells = (size / CELL_SIZE) as i32;
    for i in 1..cells {
        let offset = i as f32 * CELL_SIZE;
        lines.push(DebugLine {
            position: Vec2::new(offset, size / 2.0),
            angle: 0.0,
            size: Vec2::new(LINE_WIDTH, size),
        });
        lines.push(DebugLine {
            position: Vec2::new(size / 2.0, offset),
            angle: 0.0,
            size: Vec2::new(size, LINE_WIDTH),
        });
    }

    for (motion, _) in bodies.iter() {
        if motion.velocity.length() > 1.0 {
            lines.push(DebugLine {
                position: motion.position + AXIS_LENGTH * motion.velocity.normalize(),
                angle: motion.velocity.y.atan2(motion.velocity.x),
                size: Vec2::new(ARROW_LENGTH, LINE_WIDTH),
            });
        }
    }

    commands.spawn_batch(lines);
}
