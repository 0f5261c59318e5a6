//! Integration tests for round setup and the default reactions to the
//! impacts and pickups reported by a physics step.
#![allow(dead_code, unused_imports)]

use bevy_ecs::prelude::*;
use fastrand::Rng;
use glam::{Vec2, Vec3};

use bombsite::components::boost::Boost;
use bombsite::components::enemy::{ENEMY_MAX_HEALTH, Enemy};
use bombsite::components::health::Health;
use bombsite::components::item::ItemType;
use bombsite::components::motion::Motion;
use bombsite::components::nonconvexcollider::NonConvexCollider;
use bombsite::components::particlesource::{PARTICLE_COUNT, ParticleSource};
use bombsite::components::player::{PLAYER_MAX_HEALTH, Player};
use bombsite::events::collision::{BulletImpact, ItemCollected};
use bombsite::game::{
    BULLET_DAMAGE, apply_bullet_impacts, apply_item_pickups, init_world, spawn_bullet,
    spawn_enemy, spawn_item, spawn_non_convex_wall, spawn_player, steer_player,
};
use bombsite::physics::PhysicsStep;
use bombsite::resources::debugmode::DebugMode;
use bombsite::resources::gameconfig::GameConfig;
use bombsite::resources::gridmap::{CurrentMap, GridMaps};
use bombsite::resources::worldtime::WorldTime;
use bombsite::systems::particles::particle_system;

// ─── Helpers ────────────────────────────────────────────────────────────

const EPSILON: f32 = 1e-3;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_round() -> World {
    let mut world = World::new();
    init_world(&mut world, GameConfig::new(), GridMaps::new());
    world
}

fn spawn_with<F: FnOnce(&mut Commands) -> Entity>(world: &mut World, f: F) -> Entity {
    let entity = {
        let mut commands = world.commands();
        f(&mut commands)
    };
    world.flush();
    entity
}

fn impact_on(target: Entity, bullet: Entity) -> BulletImpact {
    BulletImpact {
        bullet,
        target,
        position: Vec2::new(1000.0, 1000.0),
        velocity: Vec2::new(1000.0, 0.0),
    }
}

fn particle_sources(world: &mut World) -> Vec<ParticleSource> {
    world
        .query::<&ParticleSource>()
        .iter(world)
        .cloned()
        .collect()
}

fn tick_particles(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(particle_system);
    schedule.run(world);
}

// ─── Setup ──────────────────────────────────────────────────────────────

#[test]
fn init_world_inserts_round_resources() {
    let mut config = GameConfig::new();
    config.map = 2;
    let mut world = World::new();
    init_world(&mut world, config, GridMaps::new());

    assert_eq!(world.resource::<CurrentMap>().0, 2);
    assert_eq!(world.resource::<WorldTime>().frame_count, 0);
    assert!(world.get_resource::<DebugMode>().is_none());
}

#[test]
fn init_world_honours_debug_flag() {
    let mut config = GameConfig::new();
    config.debug = true;
    let mut world = World::new();
    init_world(&mut world, config, GridMaps::new());

    assert!(world.get_resource::<DebugMode>().is_some());
}

#[test]
fn fired_bullet_hits_enemy_in_front() {
    let mut world = make_round();
    spawn_with(&mut world, |c| spawn_player(c, Vec2::new(2500.0, 2500.0)));
    // straight up from the right-hand muzzle at x + 35
    let enemy = spawn_with(&mut world, |c| spawn_enemy(c, Vec2::new(2535.0, 2200.0), None));
    spawn_with(&mut world, |c| spawn_bullet(c, Vec2::new(2500.0, 2500.0), 0.0));

    let mut step = PhysicsStep::new();
    let mut hits = Vec::new();
    for _ in 0..30 {
        let report = step.run(&mut world, 1.0 / 60.0);
        hits.extend(report.impacts);
    }

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].target, enemy);
}

// ─── Bullet impacts ─────────────────────────────────────────────────────

#[test]
fn impact_damages_enemy_and_bleeds() {
    let mut world = make_round();
    let enemy = spawn_with(&mut world, |c| spawn_enemy(c, Vec2::new(1000.0, 1000.0), None));
    let mut rng = Rng::with_seed(7);

    let outcome = apply_bullet_impacts(&mut world, &[impact_on(enemy, enemy)], &mut rng);

    assert!(outcome.destroyed.is_empty());
    assert!(!outcome.player_dead);
    assert_eq!(world.get::<Health>(enemy).unwrap().0, ENEMY_MAX_HEALTH - BULLET_DAMAGE);

    let sources = particle_sources(&mut world);
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].color, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(sources[0].positions.len(), PARTICLE_COUNT);
    // debris flies back toward the shooter
    assert!(sources[0].velocities.iter().all(|v| v.x < 0.0));
}

#[test]
fn enough_impacts_destroy_enemy() {
    let mut world = make_round();
    let enemy = spawn_with(&mut world, |c| spawn_enemy(c, Vec2::new(1000.0, 1000.0), None));
    let impacts: Vec<BulletImpact> = (0..5).map(|_| impact_on(enemy, enemy)).collect();
    let mut rng = Rng::with_seed(7);

    let outcome = apply_bullet_impacts(&mut world, &impacts, &mut rng);

    assert_eq!(outcome.destroyed, vec![enemy]);
    assert!(world.get_entity(enemy).is_err());
}

#[test]
fn impacts_on_a_vanished_target_are_skipped() {
    let mut world = make_round();
    let enemy = spawn_with(&mut world, |c| spawn_enemy(c, Vec2::new(1000.0, 1000.0), None));
    let impacts: Vec<BulletImpact> = (0..6).map(|_| impact_on(enemy, enemy)).collect();
    let mut rng = Rng::with_seed(7);

    let outcome = apply_bullet_impacts(&mut world, &impacts, &mut rng);

    assert_eq!(outcome.destroyed.len(), 1);
    assert_eq!(particle_sources(&mut world).len(), 5);
}

#[test]
fn player_death_ends_round_without_despawn() {
    let mut world = make_round();
    let player = spawn_with(&mut world, |c| spawn_player(c, Vec2::new(1000.0, 1000.0)));
    world.get_mut::<Health>(player).unwrap().0 = BULLET_DAMAGE;
    let mut rng = Rng::with_seed(7);

    let outcome = apply_bullet_impacts(&mut world, &[impact_on(player, player)], &mut rng);

    assert!(outcome.player_dead);
    assert!(outcome.destroyed.is_empty());
    assert!(world.get_entity(player).is_ok());
}

#[test]
fn non_convex_wall_crumbles_with_dark_debris() {
    let mut world = make_round();
    let wall = {
        let mut commands = world.commands();
        spawn_non_convex_wall(
            &mut commands,
            &[Vec2::new(900.0, 1000.0), Vec2::new(1100.0, 1000.0)],
        )
        .unwrap()
    };
    world.flush();
    let mut rng = Rng::with_seed(7);

    apply_bullet_impacts(&mut world, &[impact_on(wall, wall)], &mut rng);
    let sources = particle_sources(&mut world);
    assert_eq!(sources[0].color, Vec3::ZERO);
    assert_eq!(world.get::<Health>(wall).unwrap().0, 300 - BULLET_DAMAGE);

    let rest: Vec<BulletImpact> = (0..14).map(|_| impact_on(wall, wall)).collect();
    let outcome = apply_bullet_impacts(&mut world, &rest, &mut rng);
    assert_eq!(outcome.destroyed, vec![wall]);
    assert!(world.get_entity(wall).is_err());
}

#[test]
fn particles_fade_and_expire() {
    let mut world = make_round();
    let enemy = spawn_with(&mut world, |c| spawn_enemy(c, Vec2::new(1000.0, 1000.0), None));
    let mut rng = Rng::with_seed(7);
    apply_bullet_impacts(&mut world, &[impact_on(enemy, enemy)], &mut rng);

    world.resource_mut::<WorldTime>().delta = 0.25;
    tick_particles(&mut world);
    let sources = particle_sources(&mut world);
    assert!(approx_eq(sources[0].alpha, 0.75));
    assert!(sources[0].positions.iter().all(|p| p.x < 1000.0));

    world.resource_mut::<WorldTime>().delta = 0.75;
    tick_particles(&mut world);
    assert!(particle_sources(&mut world).is_empty());
}

// ─── Item pickups ───────────────────────────────────────────────────────

#[test]
fn health_pickup_heals_up_to_max() {
    let mut world = make_round();
    let player = spawn_with(&mut world, |c| spawn_player(c, Vec2::new(1000.0, 1000.0)));
    let item = spawn_with(&mut world, |c| spawn_item(c, Vec2::new(1000.0, 1000.0), ItemType::HealthRegen));
    let pickup = ItemCollected {
        player,
        item,
        item_type: ItemType::HealthRegen,
    };

    world.get_mut::<Health>(player).unwrap().0 = 300;
    apply_item_pickups(&mut world, &[pickup]);
    assert_eq!(world.get::<Health>(player).unwrap().0, 800);

    apply_item_pickups(&mut world, &[pickup]);
    assert_eq!(world.get::<Health>(player).unwrap().0, PLAYER_MAX_HEALTH);
}

#[test]
fn speed_pickup_restarts_boost() {
    let mut world = make_round();
    let player = spawn_with(&mut world, |c| spawn_player(c, Vec2::new(1000.0, 1000.0)));
    let item = spawn_with(&mut world, |c| spawn_item(c, Vec2::new(1000.0, 1000.0), ItemType::SpeedBoost));
    world.entity_mut(player).insert(Boost {
        timer: 0.5,
        speed_multiplier: 1.5,
    });

    apply_item_pickups(
        &mut world,
        &[ItemCollected {
            player,
            item,
            item_type: ItemType::SpeedBoost,
        }],
    );

    let boost = world.get::<Boost>(player).unwrap();
    assert!(approx_eq(boost.timer, 2.0));
    assert!(approx_eq(boost.speed_multiplier, 1.5));
}

#[test]
fn walking_over_an_item_is_reported_by_the_step() {
    let mut world = make_round();
    let player = spawn_with(&mut world, |c| spawn_player(c, Vec2::new(1000.0, 1000.0)));
    let item = spawn_with(&mut world, |c| spawn_item(c, Vec2::new(1090.0, 1000.0), ItemType::SpeedBoost));

    let report = PhysicsStep::new().run(&mut world, 1.0 / 60.0);
    assert_eq!(report.pickups.len(), 1);
    assert_eq!(report.pickups[0].item, item);

    apply_item_pickups(&mut world, &report.pickups);
    assert!(world.get::<Boost>(player).is_some());
}

// ─── Steering ───────────────────────────────────────────────────────────

fn distance_walked(boosted: bool) -> f32 {
    let mut world = make_round();
    let start = Vec2::new(2500.0, 2500.0);
    let player = spawn_with(&mut world, |c| spawn_player(c, start));
    if boosted {
        world.entity_mut(player).insert(Boost::default());
    }

    let mut step = PhysicsStep::new();
    for _ in 0..30 {
        steer_player(&mut world, player, Vec2::X, 300.0);
        step.run(&mut world, 1.0 / 60.0);
    }
    world.get::<Motion>(player).unwrap().position.distance(start)
}

#[test]
fn boosted_player_walks_further() {
    let plain = distance_walked(false);
    let boosted = distance_walked(true);

    assert!((plain - 150.0).abs() < 0.1);
    assert!((boosted - 1.5 * plain).abs() < 0.1);
}

#[test]
fn steering_falls_back_to_base_speed_when_the_boost_ends() {
    let mut world = make_round();
    let player = spawn_with(&mut world, |c| spawn_player(c, Vec2::new(2500.0, 2500.0)));
    world.entity_mut(player).insert(Boost {
        timer: 0.01,
        speed_multiplier: 1.5,
    });

    steer_player(&mut world, player, Vec2::Y, 300.0);
    assert!(approx_eq(world.get::<Motion>(player).unwrap().velocity.y, 450.0));

    PhysicsStep::new().run(&mut world, 1.0 / 60.0);
    assert!(world.get::<Boost>(player).is_none());

    steer_player(&mut world, player, Vec2::Y, 300.0);
    assert!(approx_eq(world.get::<Motion>(player).unwrap().velocity.y, 300.0));
}
