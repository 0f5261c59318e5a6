//! Enemy navigation.
//!
//! Enemies with a [`Chase`] component head for a target cell on the current
//! map's occupancy grid: the player's cell, or their guard post when in
//! guard mode. The route comes from [`GridMaps::a_star`] and is refreshed
//! every `repath_interval` seconds; in between, the enemy walks toward the
//! centre of the next cell of the stored route at its chase speed. When no
//! route exists (target unreachable, blocked or already reached) the enemy
//! stands still.
//!
//! Enemies still sliding from a push ([`Physics`] present) are left alone
//! until drag has stopped them. An enemy that is not guarding stays put
//! until it has been visible to the player once; from then on it is
//! activated and hunts the player for the rest of the round.
//!
//! # Related
//!
//! - [`crate::pathfinding::a_star`] – the search itself
//! - [`crate::systems::visibility`] – sets [`Enemy::is_visible`]

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::chase::Chase;
use crate::components::enemy::Enemy;
use crate::components::motion::Motion;
use crate::components::physics::Physics;
use crate::components::player::Player;
use crate::resources::gridmap::{CELL_SIZE, CurrentMap, GridMaps};
use crate::resources::worldtime::WorldTime;

/// Distance at which a waypoint counts as reached.
const ARRIVAL_RADIUS: f32 = CELL_SIZE / 4.0;

/// # Panics
///
/// Panics if the world has no [`Player`].
pub fn chase_system(
    time: Res<WorldTime>,
    maps: Res<GridMaps>,
    current_map: Res<CurrentMap>,
    player: Query<&Motion, With<Player>>,
    mut enemies: Query<(Entity, &mut Motion, &mut Enemy, &mut Chase), (Without<Player>, Without<Physics>)>,
) {
    let Ok(player) = player.single() else {
        panic!("chase needs exactly one player with Motion");
    };
    let player_position = player.position;
    let grid = maps.grid(current_map.0);

    for (entity, mut motion, mut enemy, mut chase) in enemies.iter_mut() {
        if enemy.is_visible && !enemy.is_activated {
            debug!("{:?} activated", entity);
            enemy.is_activated = true;
        }
        if !enemy.guard_mode && !enemy.is_activated {
            motion.velocity = glam::Vec2::ZERO;
            continue;
        }

        chase.repath_timer -= time.delta;
        if chase.repath_timer <= 0.0 {
            chase.repath_timer = chase.repath_interval;
            let target = if enemy.guard_mode {
                enemy.guard_post
            } else {
                player_position
            };
            let start = grid.cell_at(motion.position);
            let goal = grid.cell_at(target);
            chase.route = maps
                .a_star(start, goal, current_map.0)
                .into_iter()
                .skip(1)
                .map(|node| node.cell)
                .collect();
            if chase.route.is_empty() && start != goal {
                debug!("{:?} has no route from {:?} to {:?}", entity, start, goal);
            }
        }

        while let Some(next) = chase.route.front() {
            if grid.cell_center(*next).distance(motion.position) <= ARRIVAL_RADIUS {
                chase.route.pop_front();
            } else {
                break;
            }
        }

        motion.velocity = match chase.route.front() {
            Some(next) => (grid.cell_center(*next) - motion.position).normalize_or_zero() * chase.speed,
            None => glam::Vec2::ZERO,
        };
    }
}
