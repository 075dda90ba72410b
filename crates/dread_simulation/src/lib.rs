//! Dread Simulation Core
//!
//! Headless ECS simulation (Bevy 0.16) of a small horror level: the monster
//! encounter cycle, player health, flashlight, exit door, UI timers and
//! sprint effects.
//!
//! The engine side (rendering, physics, audio, scene loading) stays outside:
//! it feeds player pose and input in, and reads transforms, flags, alpha
//! values, volumes and events out.

use bevy::ecs::event::event_update_system;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub mod config;
pub mod effects;
pub mod encounter;
pub mod flashlight;
pub mod input;
pub mod level;
pub mod logger;
pub mod player;
pub mod shared;

pub use config::{ConfigError, LevelConfig};
pub use effects::{EffectsPlugin, ScreenFlash, SprintBreathing, SprintShake};
pub use encounter::{
    EncounterActor, EncounterConfig, EncounterPhase, EncounterPlugin, EncounterPresenter,
    EncounterState, PlayerPose, SpawnRegion, TransitionCause,
};
pub use flashlight::{Flashlight, FlashlightPlugin, FlickerLamp};
pub use input::{FlashlightPressed, InputPlugin, InteractPressed, SprintInput};
pub use level::{ControlsPopup, Door, DoorOutcome, GameOutcome, LevelPlugin, SceneRequested};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, log_with_level, set_log_level, set_logger,
    LogLevel, LogPrinter,
};
pub use player::{Health, Player, PlayerPlugin, PlayerView};

/// Seed used when no level config provides one
pub const DEFAULT_SEED: u64 = 42;

/// Fixed simulation rate (Hz)
pub const TICK_RATE_HZ: f64 = 60.0;

/// Main simulation plugin (all domains)
///
/// Without a config the prototype defaults are used. With one, its seed
/// drives `DeterministicRng` and its sections are inserted as resources
/// for the level setup code.
#[derive(Default)]
pub struct SimulationPlugin {
    pub config: Option<LevelConfig>,
}

impl SimulationPlugin {
    pub fn from_config(config: LevelConfig) -> Self {
        Self {
            config: Some(config),
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = self.config.clone().unwrap_or_default();

        app
            // Fixed timestep 60Hz for the simulation tick
            .insert_resource(Time::<Fixed>::from_hz(TICK_RATE_HZ))
            .insert_resource(DeterministicRng::new(config.seed))
            .insert_resource(ScreenFlash::new(config.flash))
            .insert_resource(config)
            .add_plugins((
                InputPlugin,
                LevelPlugin,
                EncounterPlugin,
                PlayerPlugin,
                FlashlightPlugin,
                EffectsPlugin,
            ));
    }
}

/// Deterministic RNG resource (seeded)
///
/// Every random draw in the simulation goes through this.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Minimal Bevy App for headless simulation (no domain plugins)
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(TICK_RATE_HZ));

    app
}

/// Headless App with every domain plugin, configured from `config`
pub fn create_level_app(config: LevelConfig) -> App {
    let mut app = create_headless_app(config.seed);
    app.add_plugins(SimulationPlugin::from_config(config));
    app
}

/// Eye height of the player camera (local to the player)
pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 1.6, 0.0);

/// Ceiling lamp height above the exit door
pub const LAMP_HEIGHT: f32 = 2.5;

/// Spawn the level entities described by `config`
///
/// Player at `player_at` with a camera child (sprint shake + breathing),
/// one encounter actor, a flashlight on the floor, the exit door with a
/// flickering lamp above it, and the controls popup. Returns the player
/// entity.
pub fn spawn_level(world: &mut World, player_at: Vec3, flashlight_at: Vec3, door_at: Vec3) -> Entity {
    let config = world.get_resource::<LevelConfig>().cloned().unwrap_or_default();
    let mut rng = world
        .remove_resource::<DeterministicRng>()
        .unwrap_or_else(|| DeterministicRng::new(config.seed));

    let player = world
        .spawn((
            Player,
            Health::new(config.player_max_health),
            Transform::from_translation(player_at),
        ))
        .id();

    let camera_pose = Transform::from_translation(CAMERA_OFFSET);
    world.spawn((
        SprintShake::new(config.shake, camera_pose, &mut rng.rng),
        SprintBreathing::new(config.breathing),
        camera_pose,
        ChildOf(player),
    ));

    let spawn_at = config.encounter.spawn_region.center;
    world.spawn(EncounterActor::new(config.encounter.clone(), spawn_at, &mut rng.rng));

    world.spawn((
        Flashlight::on_floor(config.flashlight, flashlight_at),
        Transform::from_translation(flashlight_at),
    ));

    world.spawn((
        Door::new(config.door.clone(), Quat::IDENTITY),
        Transform::from_translation(door_at),
    ));
    world.spawn((
        FlickerLamp::new(config.lamp, &mut rng.rng),
        Transform::from_translation(door_at + Vec3::Y * LAMP_HEIGHT),
    ));

    world.spawn(ControlsPopup::new(config.popup));

    world.insert_resource(rng);
    player
}

/// Advance the simulation by exactly one fixed tick
///
/// Bypasses the wall clock, for tests and replays. Event buffers are
/// swapped first, the way `First` does in a running app, so a long replay
/// keeps only the last two ticks of events. `FixedPostUpdate` runs after
/// the simulation step when anything is scheduled there.
pub fn step_fixed(app: &mut App) {
    if let Err(error) = app.world_mut().run_system_once(event_update_system) {
        log_warning(&format!("step_fixed: event update failed: {}", error));
    }

    let world = app.world_mut();

    let Some(mut time) = world.get_resource_mut::<Time<Fixed>>() else {
        log_warning("step_fixed: no Time<Fixed> resource, tick skipped");
        return;
    };
    let step = time.timestep();
    time.advance_by(step);
    if world.try_run_schedule(FixedUpdate).is_err() {
        log_warning("step_fixed: FixedUpdate schedule missing");
    }
    let _ = world.try_run_schedule(FixedPostUpdate);
}

/// World snapshot for determinism comparison
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Sort by Entity ID for determinism
    entities.sort_by_key(|(entity, _)| entity.index());

    // Debug formatting is enough for byte comparison
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
