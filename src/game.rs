//! World setup and the default reactions to physics-step messages.
//!
//! The spawners here put together the component sets every archetype needs
//! (player, enemy, walls, bullets, items, push areas and effects) so the
//! systems can rely on them. They take [`Commands`] so they work both inside
//! systems and during setup (`world.commands()` followed by `world.flush()`).
//!
//! [`apply_bullet_impacts`] and [`apply_item_pickups`] are what the game does
//! with a [`StepReport`](crate::physics::StepReport) by default.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use fastrand::Rng;
use glam::{Vec2, Vec3};
use log::info;

use crate::components::boost::Boost;
use crate::components::bullet::{BULLET_SPEED, Bullet};
use crate::components::chase::Chase;
use crate::components::circlecollider::CircleCollider;
use crate::components::enemy::{ENEMY_MAX_HEALTH, ENEMY_RADIUS, Enemy};
use crate::components::health::Health;
use crate::components::item::{ITEM_RADIUS, Item, ItemType};
use crate::components::motion::Motion;
use crate::components::nonconvexcollider::NonConvexCollider;
use crate::components::particlesource::{
    PARTICLE_COUNT, PARTICLE_LIFE_SPAN, PARTICLE_RADIUS, PARTICLE_SPEED, PARTICLE_SPREAD,
    ParticleSource,
};
use crate::components::player::{PLAYER_MAX_HEALTH, PLAYER_RADIUS, Player};
use crate::components::pointcollider::PointCollider;
use crate::components::polygoncollider::PolygonCollider;
use crate::components::sectorcollider::{PUSH_DISTANCE, PUSH_SPAN, PushArea, SectorCollider};
use crate::components::shockwave::ShockwaveSource;
use crate::components::wall::{
    Destroyable, NON_CONVEX_WALL_HEALTH, NON_CONVEX_WALL_THICKNESS, WALL_HEALTH, Wall,
};
use crate::events::collision::{BulletImpact, ItemCollected};
use crate::events::switchdebug::switch_debug_observer;
use crate::physics::PhysicsStep;
use crate::resources::debugmode::DebugMode;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gridmap::{CurrentMap, GridMaps, OccupancyGrid};
use crate::resources::worldtime::WorldTime;

/// Damage a bullet deals to whatever it hits, by default.
pub const BULLET_DAMAGE: i32 = 20;
/// Health restored by a health pickup.
pub const HEALTH_REGEN: i32 = 500;
/// Chase speed of spawned enemies, units/s.
pub const ENEMY_SPEED: f32 = 200.0;
/// Seconds between two route searches of a chasing enemy.
pub const ENEMY_REPATH_INTERVAL: f32 = 0.5;

/// Muzzle offset of a shot, in the shooter's frame (forward, right).
const MUZZLE_FORWARD: f32 = 50.0;
const MUZZLE_SIDE: f32 = 35.0;

const AVATAR_SCALE: Vec2 = Vec2::new(100.0, 100.0);
const BULLET_SCALE: Vec2 = Vec2::new(10.0, 10.0);
const WALL_DEBRIS: Vec3 = Vec3::new(0.0, 0.0, 0.0);
const BLOOD: Vec3 = Vec3::new(1.0, 0.0, 0.0);

/// Insert the resources and observers a round needs.
///
/// Grid maps are taken as given; pass [`GridMaps::default`] to let every map
/// be walkable everywhere.
pub fn init_world(world: &mut World, config: GameConfig, maps: GridMaps) {
    let debug = config.debug;
    let map = config.map;
    world.insert_resource(WorldTime::default());
    world.insert_resource(config);
    world.insert_resource(maps);
    world.insert_resource(CurrentMap(map));
    PhysicsStep::init_world(world);
    if debug {
        world.insert_resource(DebugMode {});
    }
    world.spawn(Observer::new(switch_debug_observer));
    world.flush();
}

pub fn spawn_player(commands: &mut Commands, position: Vec2) -> Entity {
    commands
        .spawn((
            Player,
            Motion::at(position).with_scale(AVATAR_SCALE),
            CircleCollider::new(PLAYER_RADIUS),
            Health(PLAYER_MAX_HEALTH),
        ))
        .id()
}

/// Enemy that chases the player, or holds `guard_post` when one is given.
pub fn spawn_enemy(commands: &mut Commands, position: Vec2, guard_post: Option<Vec2>) -> Entity {
    let enemy = match guard_post {
        Some(post) => Enemy::new(post).guarding(),
        None => Enemy::new(position),
    };
    commands
        .spawn((
            enemy,
            Motion::at(position).with_scale(AVATAR_SCALE),
            CircleCollider::new(ENEMY_RADIUS),
            Health(ENEMY_MAX_HEALTH),
            Chase::new(ENEMY_SPEED, ENEMY_REPATH_INTERVAL),
        ))
        .id()
}

/// Rectangular wall centred on `position`, `scale` wide and tall.
pub fn spawn_wall(
    commands: &mut Commands,
    position: Vec2,
    scale: Vec2,
    angle: f32,
    destroyable: bool,
) -> Entity {
    let mut wall = commands.spawn((
        Wall,
        Motion::at(position).with_scale(scale).with_angle(angle),
        PolygonCollider::default(),
        Health(WALL_HEALTH),
    ));
    if destroyable {
        wall.insert(Destroyable);
    }
    wall.id()
}

/// Player-built wall along `hinges`. `None` if the hinges do not span at
/// least one segment.
pub fn spawn_non_convex_wall(commands: &mut Commands, hinges: &[Vec2]) -> Option<Entity> {
    let collider = NonConvexCollider::from_hinges(NON_CONVEX_WALL_THICKNESS, hinges)?;
    Some(
        commands
            .spawn((collider, Health(NON_CONVEX_WALL_HEALTH)))
            .id(),
    )
}

/// Bullet fired by a shooter at `origin` facing `angle` (0 = up, clockwise).
///
/// It leaves from the shooter's right-hand muzzle, outside the shooter's own
/// collider.
pub fn spawn_bullet(commands: &mut Commands, origin: Vec2, angle: f32) -> Entity {
    let (sin, cos) = angle.sin_cos();
    let position = origin
        + Vec2::new(
            MUZZLE_FORWARD * sin + MUZZLE_SIDE * cos,
            -MUZZLE_FORWARD * cos + MUZZLE_SIDE * sin,
        );
    let velocity = Vec2::new(BULLET_SPEED * sin, -BULLET_SPEED * cos);
    commands
        .spawn((
            Bullet::default(),
            PointCollider,
            Motion::at(position)
                .with_angle(angle)
                .with_velocity(velocity)
                .with_scale(BULLET_SCALE),
        ))
        .id()
}

pub fn spawn_item(commands: &mut Commands, position: Vec2, item_type: ItemType) -> Entity {
    commands
        .spawn((Item::new(position, item_type), CircleCollider::new(ITEM_RADIUS)))
        .id()
}

/// Push query from `origin` toward `angle` (`atan2` convention). Evaluated on
/// the next physics step.
pub fn spawn_push_area(commands: &mut Commands, origin: Vec2, angle: f32) -> Entity {
    commands
        .spawn((
            PushArea,
            SectorCollider {
                position: origin,
                distance: PUSH_DISTANCE,
                angle,
                span: PUSH_SPAN,
            },
        ))
        .id()
}

pub fn spawn_shockwave(commands: &mut Commands, position: Vec2) -> Entity {
    commands.spawn(ShockwaveSource::new(position)).id()
}

/// Burst of debris flying out around `angle` from `position`.
///
/// Each particle gets a direction within half [`PARTICLE_SPREAD`] of `angle`
/// and a speed within ±50% of [`PARTICLE_SPEED`].
pub fn spawn_particle_burst(
    commands: &mut Commands,
    rng: &mut Rng,
    position: Vec2,
    angle: f32,
    color: Vec3,
) -> Entity {
    let velocities: Vec<Vec2> = (0..PARTICLE_COUNT)
        .map(|_| {
            let direction = angle + (rng.f32() - 0.5) * PARTICLE_SPREAD;
            let speed = PARTICLE_SPEED * (1.0 + (rng.f32() - 0.5));
            Vec2::from_angle(direction) * speed
        })
        .collect();
    commands
        .spawn(ParticleSource {
            positions: vec![position; PARTICLE_COUNT],
            velocities,
            radius: PARTICLE_RADIUS,
            alpha: 1.0,
            life_span: PARTICLE_LIFE_SPAN,
            max_life_span: PARTICLE_LIFE_SPAN,
            color,
        })
        .id()
}

/// Rasterise every convex wall into a fresh occupancy grid.
pub fn grid_from_walls(world: &mut World) -> OccupancyGrid {
    let mut grid = OccupancyGrid::empty();
    let mut walls = world.query_filtered::<&Motion, With<Wall>>();
    for motion in walls.iter(world) {
        grid.mark_rect(motion.position, motion.scale);
    }
    grid
}

/// Consequences of a batch of bullet impacts.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ImpactOutcome {
    /// Targets despawned because their health ran out.
    pub destroyed: Vec<Entity>,
    /// The player's health ran out; the round is lost.
    pub player_dead: bool,
}

/// Default bullet-hit handling: [`BULLET_DAMAGE`] to the target, a particle
/// burst back along the bullet's path (dark for walls, red for avatars), and
/// removal of any non-player target whose health ran out.
pub fn apply_bullet_impacts(
    world: &mut World,
    impacts: &[BulletImpact],
    rng: &mut Rng,
) -> ImpactOutcome {
    let mut outcome = ImpactOutcome::default();

    for impact in impacts {
        let Ok(target) = world.get_entity(impact.target) else {
            continue;
        };
        let color = if target.contains::<NonConvexCollider>() {
            Some(WALL_DEBRIS)
        } else if target.contains::<Enemy>() || target.contains::<Player>() {
            Some(BLOOD)
        } else {
            None
        };
        let is_player = target.contains::<Player>();

        let depleted = match world.get_mut::<Health>(impact.target) {
            Some(mut health) => health.damage(BULLET_DAMAGE),
            None => false,
        };

        if let Some(color) = color {
            let back = -impact.velocity.normalize_or_zero();
            let mut commands = world.commands();
            spawn_particle_burst(&mut commands, rng, impact.position, back.y.atan2(back.x), color);
        }

        if depleted {
            if is_player {
                outcome.player_dead = true;
            } else {
                info!("{:?} destroyed", impact.target);
                world.despawn(impact.target);
                outcome.destroyed.push(impact.target);
            }
        }
    }

    world.flush();
    outcome
}

/// Set the player's velocity to `direction * speed`, scaled by the
/// multiplier of an active [`Boost`].
pub fn steer_player(world: &mut World, player: Entity, direction: Vec2, speed: f32) {
    let multiplier = world
        .get::<Boost>(player)
        .map_or(1.0, |boost| boost.speed_multiplier);
    if let Some(mut motion) = world.get_mut::<Motion>(player) {
        motion.velocity = direction * speed * multiplier;
    }
}

/// Default pickup handling: health regen heals up to the player's maximum,
/// speed boost (re)starts a [`Boost`].
pub fn apply_item_pickups(world: &mut World, pickups: &[ItemCollected]) {
    for pickup in pickups {
        match pickup.item_type {
            ItemType::HealthRegen => {
                if let Some(mut health) = world.get_mut::<Health>(pickup.player) {
                    health.0 = (health.0 + HEALTH_REGEN).min(PLAYER_MAX_HEALTH);
                }
            }
            ItemType::SpeedBoost => {
                if let Ok(mut player) = world.get_entity_mut(pickup.player) {
                    player.insert(Boost::default());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    #[test]
    fn bullet_leaves_from_the_right_muzzle() {
        let mut world = World::new();
        let bullet = {
            let mut commands = world.commands();
            spawn_bullet(&mut commands, Vec2::new(1000.0, 1000.0), 0.0)
        };
        world.flush();
        let motion = world.get::<Motion>(bullet).unwrap();
        // facing up: 50 ahead is -y, 35 to the right is +x
        assert!((motion.position - Vec2::new(1035.0, 950.0)).length() < EPSILON);
        assert!((motion.velocity - Vec2::new(0.0, -1000.0)).length() < EPSILON);
        assert!(world.get::<PointCollider>(bullet).is_some());
    }

    #[test]
    fn destroyable_walls_get_the_marker() {
        let mut world = World::new();
        let (plain, breakable) = {
            let mut commands = world.commands();
            (
                spawn_wall(&mut commands, Vec2::ZERO, Vec2::splat(100.0), 0.0, false),
                spawn_wall(&mut commands, Vec2::ZERO, Vec2::splat(100.0), 0.0, true),
            )
        };
        world.flush();
        assert!(world.get::<Destroyable>(plain).is_none());
        assert!(world.get::<Destroyable>(breakable).is_some());
        assert_eq!(world.get::<Health>(breakable), Some(&Health(WALL_HEALTH)));
    }

    #[test]
    fn particle_burst_spreads_within_the_cone() {
        let mut world = World::new();
        let mut rng = Rng::with_seed(7);
        let burst = {
            let mut commands = world.commands();
            spawn_particle_burst(&mut commands, &mut rng, Vec2::ZERO, 0.0, BLOOD)
        };
        world.flush();
        let source = world.get::<ParticleSource>(burst).unwrap();
        assert_eq!(source.velocities.len(), PARTICLE_COUNT);
        for v in &source.velocities {
            let angle = v.y.atan2(v.x);
            assert!(angle.abs() <= PARTICLE_SPREAD / 2.0 + EPSILON);
            let speed = v.length();
            assert!(speed >= PARTICLE_SPEED * 0.5 - EPSILON && speed <= PARTICLE_SPEED * 1.5 + EPSILON);
        }
    }

    #[test]
    fn grid_follows_wall_placement() {
        let mut world = World::new();
        {
            let mut commands = world.commands();
            spawn_wall(&mut commands, Vec2::new(250.0, 750.0), Vec2::splat(300.0), 0.0, false);
        }
        world.flush();
        let grid = grid_from_walls(&mut world);
        assert!(grid.is_blocked(crate::pathfinding::Cell::new(7, 2)));
        assert!(grid.is_blocked(crate::pathfinding::Cell::new(8, 3)));
        assert!(grid.is_walkable(crate::pathfinding::Cell::new(9, 2)));
    }
}
