//! Collision detection and response.
//!
//! Four systems, run in this order by [`PhysicsStep`](crate::physics::PhysicsStep)
//! right after movement:
//!
//! - [`bullet_collision_system`] – bullets against the world bounds, convex
//!   walls, non-convex walls and avatars; at most one hit per bullet
//! - [`item_pickup_system`] – the player against active items
//! - [`avatar_wall_collision_system`] – pushes avatars back out of walls and
//!   the world bounds, bouncing knocked-back ones
//! - [`push_area_system`] – one-shot sector impulses against enemies
//!
//! Hits that the physics step does not resolve by itself are reported as
//! [`BulletImpact`] and [`ItemCollected`] messages.
//!
//! Query order in bevy_ecs is unspecified, so every system that depends on
//! processing order sorts its entities by [`Entity::index_u32`] first. The
//! derived `Ord` on [`Entity`] does not follow spawn order and is never used
//! for this. Within one round a higher index means a later spawn, except
//! where the index of a despawned entity has been handed out again.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info};

use crate::components::bullet::Bullet;
use crate::components::circlecollider::CircleCollider;
use crate::components::enemy::Enemy;
use crate::components::health::Health;
use crate::components::item::Item;
use crate::components::motion::Motion;
use crate::components::nonconvexcollider::NonConvexCollider;
use crate::components::physics::Physics;
use crate::components::player::Player;
use crate::components::pointcollider::PointCollider;
use crate::components::polygoncollider::PolygonCollider;
use crate::components::sectorcollider::{PushArea, SectorCollider};
use crate::components::shockwave::ShockwaveSource;
use crate::components::wall::{Destroyable, Wall};
use crate::events::collision::{BulletImpact, ItemCollected};
use crate::game::spawn_shockwave;
use crate::geometry::{Aabb, aabb_overlap, wrap_angle};
use crate::resources::gameconfig::GameConfig;
use crate::resources::worldtime::WorldTime;

/// Damage a bullet deals to a destroyable convex wall.
pub const WALL_BULLET_DAMAGE: i32 = 10;

/// Static wall boxes for this frame, in ascending index order.
fn wall_boxes<'a>(
    walls: impl Iterator<Item = (Entity, &'a Motion, &'a PolygonCollider)>,
) -> Vec<(Entity, Aabb)> {
    let mut boxes: Vec<(Entity, Aabb)> = walls
        .map(|(entity, motion, collider)| (entity, collider.world_aabb(motion)))
        .collect();
    boxes.sort_by_key(|(entity, _)| entity.index_u32());
    boxes
}

/// Resolve bullets against the world.
///
/// Bullets are handled from the highest index down. Convex walls are
/// scanned from the lowest index up; non-convex walls and avatars from the
/// highest index down. For each bullet:
///
/// 1. Outside `[0, world_size]` on either axis: despawned.
/// 2. Inside a convex wall's bounding box: a [`Destroyable`] wall loses
///    [`WALL_BULLET_DAMAGE`] and is despawned at zero health; the bullet is
///    despawned. No message is written.
/// 3. Inside a non-convex wall's bounding box and its path over the last
///    frame (`position -> position - velocity * dt`) crosses one of the
///    wall's long edges: [`BulletImpact`] against the wall, bullet despawned.
/// 4. Closer to an avatar than its radius: [`BulletImpact`] against the
///    avatar, bullet despawned.
pub fn bullet_collision_system(
    mut commands: Commands,
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    bullets: Query<(Entity, &Motion), (With<Bullet>, With<PointCollider>)>,
    walls: Query<(Entity, &Motion, &PolygonCollider, Has<Destroyable>), With<Wall>>,
    mut wall_health: Query<&mut Health, With<Wall>>,
    non_convex: Query<(Entity, &NonConvexCollider)>,
    avatars: Query<(Entity, &Motion, &CircleCollider), Or<(With<Player>, With<Enemy>)>>,
    mut impacts: MessageWriter<BulletImpact>,
) {
    let dt = time.delta;
    let world_size = config.world_size;

    let mut wall_list: Vec<(Entity, Aabb, bool)> = walls
        .iter()
        .map(|(entity, motion, collider, destroyable)| {
            (entity, collider.world_aabb(motion), destroyable)
        })
        .collect();
    wall_list.sort_by_key(|(entity, _, _)| entity.index_u32());

    let mut non_convex: Vec<(Entity, &NonConvexCollider)> = non_convex.iter().collect();
    non_convex.sort_by_key(|(entity, _)| entity.index_u32());

    let mut avatars: Vec<(Entity, Vec2, f32)> = avatars
        .iter()
        .map(|(entity, motion, collider)| (entity, motion.position, collider.radius))
        .collect();
    avatars.sort_by_key(|(entity, _, _)| entity.index_u32());

    let mut bullets: Vec<(Entity, &Motion)> = bullets.iter().collect();
    bullets.sort_by_key(|(entity, _)| entity.index_u32());

    for (bullet, motion) in bullets.into_iter().rev() {
        let position = motion.position;
        if position.x < 0.0 || position.y < 0.0 || position.x > world_size || position.y > world_size {
            commands.entity(bullet).try_despawn();
            continue;
        }

        let bullet_bb = Aabb::from_center(position, Vec2::ZERO);

        // convex walls
        if let Some(index) = wall_list
            .iter()
            .position(|(_, bb, _)| aabb_overlap(&bullet_bb, bb))
        {
            let (wall, _, destroyable) = wall_list[index];
            if destroyable {
                if let Ok(mut health) = wall_health.get_mut(wall) {
                    if health.damage(WALL_BULLET_DAMAGE) {
                        info!("Wall {:?} destroyed", wall);
                        commands.entity(wall).try_despawn();
                        wall_list.remove(index);
                    }
                }
            }
            commands.entity(bullet).try_despawn();
            continue;
        }

        // non-convex walls
        let back = position - motion.velocity * dt;
        let hit_wall = non_convex.iter().rev().find(|(_, collider)| {
            aabb_overlap(&bullet_bb, &collider.bounds) && collider.path_crosses(position, back)
        });
        if let Some((wall, _)) = hit_wall {
            impacts.write(BulletImpact {
                bullet,
                target: *wall,
                position,
                velocity: motion.velocity,
            });
            commands.entity(bullet).try_despawn();
            continue;
        }

        // avatars
        let hit_avatar = avatars
            .iter()
            .rev()
            .find(|(_, center, radius)| position.distance(*center) < *radius);
        if let Some((avatar, _, _)) = hit_avatar {
            impacts.write(BulletImpact {
                bullet,
                target: *avatar,
                position,
                velocity: motion.velocity,
            });
            commands.entity(bullet).try_despawn();
        }
    }
}

/// Let the player collect items they overlap.
///
/// An item is picked up when the distance from the player to the item is
/// less than the sum of both radii. The item keeps existing but loses its
/// [`CircleCollider`] and becomes inactive until it respawns.
///
/// # Panics
///
/// Panics if the world has no [`Player`].
pub fn item_pickup_system(
    mut commands: Commands,
    player: Query<(Entity, &Motion, &CircleCollider), With<Player>>,
    mut items: Query<(Entity, &mut Item, &CircleCollider), Without<Player>>,
    mut collected: MessageWriter<ItemCollected>,
) {
    let Ok((player, player_motion, player_collider)) = player.single() else {
        panic!("item pickup needs exactly one player with Motion and CircleCollider");
    };

    for (entity, mut item, collider) in items.iter_mut() {
        if !item.active {
            continue;
        }
        if player_motion.position.distance(item.position) < player_collider.radius + collider.radius {
            collected.write(ItemCollected {
                player,
                item: entity,
                item_type: item.item_type,
            });
            commands.entity(entity).remove::<CircleCollider>();
            item.active = false;
        }
    }
}

/// Which axes of the last frame's movement to undo.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Restore {
    x: bool,
    y: bool,
    x_or_y: bool,
    x_and_y: bool,
}

/// Decide how to back an avatar out of the walls it overlaps.
///
/// `bb` is the avatar's box after this frame's move of `offset`. For each
/// overlapped wall the box is tentatively restored along x and along y; if
/// only one of them clears the wall, the other axis is undone. Undoing the
/// same axis twice, or a wall that neither restore clears, escalates to
/// undoing both axes.
fn resolve_walls(mut bb: Aabb, offset: Vec2, walls: &[Aabb], world_size: f32) -> Restore {
    let mut restore = Restore::default();
    let bb_restored_x = bb.translated(Vec2::new(-offset.x, 0.0));
    let bb_restored_y = bb.translated(Vec2::new(0.0, -offset.y));

    for wall in walls.iter().rev() {
        if !aabb_overlap(&bb, wall) {
            continue;
        }
        // with motion along one axis only, both restores are the same thing
        if offset.x == 0.0 || offset.y == 0.0 {
            restore.x_and_y = true;
            return restore;
        }

        let rx = aabb_overlap(&bb_restored_x, wall);
        let ry = aabb_overlap(&bb_restored_y, wall);

        if rx && ry {
            restore.x_and_y = true;
            return restore;
        } else if rx {
            if restore.x {
                restore.x_and_y = true;
                return restore;
            }
            bb = bb_restored_y;
            restore.y = true;
        } else if ry {
            if restore.y {
                restore.x_and_y = true;
                return restore;
            }
            bb = bb_restored_x;
            restore.x = true;
        } else {
            restore.x_or_y = true;
        }
    }

    let x_out = bb.min_x < 0.0 || bb.max_x > world_size;
    let y_out = bb.min_y < 0.0 || bb.max_y > world_size;
    if x_out && y_out {
        restore.x_and_y = true;
    } else if x_out {
        restore.x = true;
    } else if y_out {
        restore.y = true;
    }
    restore
}

/// Keep avatars out of static walls and inside the world.
///
/// Collision is resolved by undoing (part of) this frame's movement rather
/// than by computing a contact normal. An avatar with [`Physics`] bounces:
/// the velocity component(s) whose movement was undone are negated.
pub fn avatar_wall_collision_system(
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    walls: Query<(Entity, &Motion, &PolygonCollider), With<Wall>>,
    mut avatars: Query<
        (&mut Motion, &CircleCollider, Has<Physics>),
        (Or<(With<Player>, With<Enemy>)>, Without<Wall>),
    >,
) {
    let dt = time.delta;
    let walls: Vec<Aabb> = wall_boxes(walls.iter())
        .into_iter()
        .map(|(_, bb)| bb)
        .collect();

    for (mut motion, collider, bounces) in avatars.iter_mut() {
        let offset = motion.velocity * dt;
        let bb = Aabb::from_center(motion.position, Vec2::splat(collider.radius));
        let restore = resolve_walls(bb, offset, &walls, config.world_size);

        if restore.x_and_y || (restore.x && restore.y) {
            motion.position -= offset;
            if bounces {
                motion.velocity = -motion.velocity;
            }
        } else if restore.x {
            motion.position.x -= offset.x;
            if bounces {
                motion.velocity.x = -motion.velocity.x;
            }
        } else if restore.y {
            motion.position.y -= offset.y;
            if bounces {
                motion.velocity.y = -motion.velocity.y;
            }
        } else if restore.x_or_y {
            motion.position.x -= offset.x;
            if bounces {
                motion.velocity.x = -motion.velocity.x;
            }
        }
    }
}

/// Apply every pending push area to the enemies inside it, then consume it.
///
/// An enemy is inside when its centre is within `distance + radius` of the
/// sector origin and its bearing is within half the span of the sector
/// angle. It is launched radially away from the origin at
/// `push_acceleration / mass` and gets [`Physics`] (mass 1) if it had none,
/// so drag brings it back to rest. The first push in a world without a
/// shockwave spawns one at the enemy.
pub fn push_area_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    push_areas: Query<(Entity, &SectorCollider), With<PushArea>>,
    mut enemies: Query<(Entity, &mut Motion, &CircleCollider, Option<&Physics>), With<Enemy>>,
    shockwaves: Query<(), With<ShockwaveSource>>,
) {
    let mut shockwave_exists = !shockwaves.is_empty();

    let mut areas: Vec<(Entity, &SectorCollider)> = push_areas.iter().collect();
    areas.sort_by_key(|(entity, _)| entity.index_u32());

    for (area, sector) in areas.into_iter().rev() {
        for (enemy, mut motion, collider, physics) in enemies.iter_mut() {
            let dir = motion.position - sector.position;
            if dir.length() > collider.radius + sector.distance {
                continue;
            }

            let angle_diff = wrap_angle(dir.y.atan2(dir.x) - sector.angle);
            if angle_diff.abs() > sector.span / 2.0 {
                continue;
            }

            let mass = match physics {
                Some(physics) => physics.mass,
                None => {
                    let physics = Physics::default();
                    commands.entity(enemy).insert(physics);
                    physics.mass
                }
            };
            motion.velocity = dir.normalize_or_zero() * config.push_acceleration / mass;
            debug!("Pushed {:?} (angle diff {:.3})", enemy, angle_diff);

            if !shockwave_exists {
                spawn_shockwave(&mut commands, motion.position);
                shockwave_exists = true;
            }
        }
        commands.entity(area).try_despawn();
    }
}
