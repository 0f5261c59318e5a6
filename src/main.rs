use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use glam::Vec2;
use log::{error, info, warn};

use bombsite::components::enemy::Enemy;
use bombsite::components::item::ItemType;
use bombsite::components::motion::Motion;
use bombsite::components::player::Player;
use bombsite::game::{
    apply_bullet_impacts, apply_item_pickups, grid_from_walls, init_world, spawn_bullet,
    spawn_enemy, spawn_item, spawn_non_convex_wall, spawn_player, spawn_push_area, spawn_wall,
    steer_player,
};
use bombsite::physics::PhysicsStep;
use bombsite::resources::gameconfig::GameConfig;
use bombsite::resources::gridmap::{CurrentMap, GridMaps};
use bombsite::resources::worldtime::WorldTime;
use bombsite::systems::chase::chase_system;
use bombsite::systems::items::item_respawn_system;
use bombsite::systems::particles::particle_system;
use bombsite::systems::visibility::is_visible;

const FRAME_TIME: f32 = 1.0 / 60.0;
const PLAYER_SPEED: f32 = 300.0;
const FIRE_EVERY: u64 = 20;
const PUSH_EVERY: u64 = 90;

#[derive(Parser)]
#[command(version, about = "Headless bombsite round: physics, visibility and enemy pathfinding.")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Map id (1..=3), overrides the configuration.
    #[arg(long)]
    map: Option<u8>,

    /// JSON file with the pathfinding grids.
    #[arg(long, value_name = "PATH")]
    grids: Option<PathBuf>,

    /// Start with the debug overlay on.
    #[arg(long)]
    debug: bool,
}

fn spawn_demo_level(world: &mut World) {
    {
        let mut commands = world.commands();
        spawn_player(&mut commands, Vec2::new(2500.0, 2500.0));

        spawn_wall(&mut commands, Vec2::new(2850.0, 2450.0), Vec2::new(100.0, 500.0), 0.0, false);
        spawn_wall(&mut commands, Vec2::new(2150.0, 2850.0), Vec2::new(500.0, 100.0), 0.0, true);
        spawn_wall(&mut commands, Vec2::new(2050.0, 2150.0), Vec2::new(300.0, 300.0), 0.0, true);
        spawn_non_convex_wall(
            &mut commands,
            &[
                Vec2::new(2600.0, 2800.0),
                Vec2::new(2750.0, 2900.0),
                Vec2::new(2900.0, 2850.0),
            ],
        );

        spawn_enemy(&mut commands, Vec2::new(3250.0, 2450.0), None);
        spawn_enemy(&mut commands, Vec2::new(2450.0, 3350.0), None);
        spawn_enemy(&mut commands, Vec2::new(1650.0, 2050.0), Some(Vec2::new(1650.0, 2050.0)));

        spawn_item(&mut commands, Vec2::new(2500.0, 2250.0), ItemType::SpeedBoost);
        spawn_item(&mut commands, Vec2::new(2300.0, 2500.0), ItemType::HealthRegen);
    }
    world.flush();
}

/// Strafe in a slow circle, shoot at the closest visible enemy, push now and then.
fn drive_player(world: &mut World, frame: u64) {
    let player = {
        let mut players = world.query_filtered::<Entity, With<Player>>();
        match players.single(world) {
            Ok(player) => player,
            Err(_) => return,
        }
    };

    let t = frame as f32 * FRAME_TIME;
    steer_player(world, player, Vec2::new(t.cos(), t.sin()), PLAYER_SPEED);
    let Some(origin) = world.get::<Motion>(player).map(|motion| motion.position) else {
        return;
    };

    let target = {
        let mut enemies = world.query_filtered::<(Entity, &Motion), With<Enemy>>();
        let world: &World = world;
        enemies
            .iter(world)
            .filter(|(entity, _)| is_visible(world, *entity))
            .map(|(_, motion)| motion.position)
            .min_by(|a, b| a.distance(origin).total_cmp(&b.distance(origin)))
    };

    let Some(target) = target else {
        return;
    };
    let dir = target - origin;
    if let Some(mut motion) = world.get_mut::<Motion>(player) {
        // shots use 0 = up, clockwise
        motion.angle = dir.x.atan2(-dir.y);
    }

    {
        let mut commands = world.commands();
        if frame % FIRE_EVERY == 0 {
            spawn_bullet(&mut commands, origin, dir.x.atan2(-dir.y));
        }
        if frame % PUSH_EVERY == 0 {
            spawn_push_area(&mut commands, origin, dir.y.atan2(dir.x));
        }
    }
    world.flush();
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        warn!("{}, using defaults", e);
    }
    if let Some(map) = cli.map {
        config.map = map;
    }
    if cli.debug {
        config.debug = true;
    }

    let maps = match &cli.grids {
        Some(path) => GridMaps::load_from_file(path).unwrap_or_else(|e| {
            error!("{}", e);
            GridMaps::new()
        }),
        None => GridMaps::new(),
    };

    let mut world = World::new();
    init_world(&mut world, config, maps);
    spawn_demo_level(&mut world);

    let map = world.resource::<CurrentMap>().0;
    if world.resource::<GridMaps>().get(map).is_none() {
        let grid = grid_from_walls(&mut world);
        info!("No grid for map {}, derived {:?} from the walls", map, grid);
        world.resource_mut::<GridMaps>().insert(map, grid);
    }

    let mut step = PhysicsStep::new();
    let mut frame_systems = Schedule::default();
    frame_systems.add_systems((chase_system, item_respawn_system, particle_system).chain());
    frame_systems
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    let mut rng = fastrand::Rng::new();
    let mut hits = 0usize;
    let mut pickups = 0usize;

    for frame in 0..cli.frames {
        drive_player(&mut world, frame);

        let report = step.run(&mut world, FRAME_TIME);
        frame_systems.run(&mut world);

        hits += report.impacts.len();
        pickups += report.pickups.len();
        apply_item_pickups(&mut world, &report.pickups);
        let outcome = apply_bullet_impacts(&mut world, &report.impacts, &mut rng);
        world.clear_trackers();

        if outcome.player_dead {
            info!("Player down at frame {}", frame);
            break;
        }
        let enemies_left = world
            .query_filtered::<(), With<Enemy>>()
            .iter(&world)
            .count();
        if enemies_left == 0 {
            info!("All enemies down at frame {}", frame);
            break;
        }
    }

    let enemies_left = world
        .query_filtered::<(), With<Enemy>>()
        .iter(&world)
        .count();
    info!(
        "Simulated {} frame(s): {} hit(s), {} pickup(s), {} enemy(ies) left",
        world.resource::<WorldTime>().frame_count,
        hits,
        pickups,
        enemies_left
    );
}
