//! Headless Dread simulation
//!
//! Runs one level without rendering: the player walks from the spawn point
//! to the exit door while the monster does its thing.
//!
//! Usage: `dread_simulation [level.json]`

use bevy::prelude::*;
use dread_simulation::{
    create_level_app, log_error, log_info, spawn_level, step_fixed, GameOutcome, Health,
    LevelConfig, PlayerView, SprintInput, TICK_RATE_HZ,
};

/// Scripted sprint speed (m/s)
const WALK_SPEED: f32 = 2.5;

/// Two minutes of simulated time
const MAX_TICKS: usize = 60 * 120;

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => match LevelConfig::from_path(&path) {
            Ok(config) => config,
            Err(error) => {
                log_error(&format!("Could not load {}: {}", path, error));
                std::process::exit(1);
            }
        },
        None => LevelConfig::default(),
    };

    println!("Starting Dread headless simulation (seed: {})", config.seed);

    let mut app = create_level_app(config);
    let door_at = Vec3::new(0.0, 0.0, -30.0);
    let player = spawn_level(app.world_mut(), Vec3::new(0.0, 0.0, 30.0), Vec3::new(0.0, 0.0, 28.0), door_at);

    // Sprint held the whole way (camera shake, breathing)
    app.world_mut().insert_resource(SprintInput::sprinting(WALK_SPEED));

    let dt = (1.0 / TICK_RATE_HZ) as f32;

    for tick in 0..MAX_TICKS {
        walk_toward(app.world_mut(), player, door_at, dt);
        step_fixed(&mut app);

        let outcome = app.world().get_resource::<GameOutcome>().copied().unwrap_or_default();
        if !outcome.is_playing() {
            log_info(&format!("Level decided at tick {}: {:?}", tick, outcome));
            break;
        }

        if tick % 600 == 0 {
            let health = app.world().get::<Health>(player).copied().unwrap_or_default();
            println!("Tick {}: player health {}/{}", tick, health.current, health.max);
        }
    }

    println!("Simulation complete!");
}

/// Host stand-in: move the player and point the view along the walk
fn walk_toward(world: &mut World, player: Entity, target: Vec3, dt: f32) {
    let Ok(mut entity) = world.get_entity_mut(player) else {
        return;
    };
    let Some(mut transform) = entity.get_mut::<Transform>() else {
        return;
    };

    let to_target = (target - transform.translation).with_y(0.0);
    let direction = to_target.normalize_or_zero();
    let step = (WALK_SPEED * dt).min(to_target.length());
    transform.translation += direction * step;

    if direction != Vec3::ZERO {
        if let Some(mut view) = entity.get_mut::<PlayerView>() {
            view.direction = direction;
        }
    }
}
