//! Level flow through the ECS: flashlight, door, popup.

mod common;

use bevy::prelude::*;
use common::{record, run_ticks, take};
use dread_simulation::flashlight::{FlashlightOffBlocked, FlashlightToggled};
use dread_simulation::level::{DoorOpened, PopupHidden, PopupShown};
use dread_simulation::{
    create_level_app, spawn_level, step_fixed, Door, DoorOutcome, Flashlight, FlashlightPressed,
    GameOutcome, InteractPressed, LevelConfig, SceneRequested,
};

/// Far from the default spawn region so the monster never interferes
const FAR: Vec3 = Vec3::new(200.0, 0.0, 200.0);

fn find<T: Component>(app: &mut App) -> Entity {
    let mut query = app.world_mut().query_filtered::<Entity, With<T>>();
    query.single(app.world()).unwrap()
}

#[test]
fn test_flashlight_pickup_and_toggle() {
    let mut app = create_level_app(LevelConfig::default());
    let player = spawn_level(app.world_mut(), FAR, FAR + Vec3::X, FAR + Vec3::new(50.0, 0.0, 0.0));
    let flashlight = find::<Flashlight>(&mut app);
    record::<FlashlightToggled>(&mut app);
    record::<FlashlightOffBlocked>(&mut app);

    assert!(app.world().get::<Flashlight>(flashlight).unwrap().is_lit());

    app.world_mut().send_event(InteractPressed);
    step_fixed(&mut app);

    let held = app.world().get::<Flashlight>(flashlight).unwrap();
    assert!(held.is_held());
    assert!(!held.is_lit());
    assert_eq!(held.owner(), Some(player));

    let transform = app.world().get::<Transform>(flashlight).unwrap();
    assert_eq!(transform.translation, held.config().slot_offset);
    assert_eq!(transform.rotation, Quat::IDENTITY);
    assert_eq!(app.world().get::<ChildOf>(flashlight).unwrap().parent(), player);

    // on, off ×4 with ons between, then the 5th OFF is refused
    for _ in 0..9 {
        app.world_mut().send_event(FlashlightPressed);
        step_fixed(&mut app);
    }
    assert!(take::<FlashlightOffBlocked>(&mut app).is_empty());
    assert!(app.world().get::<Flashlight>(flashlight).unwrap().is_lit());

    app.world_mut().send_event(FlashlightPressed);
    step_fixed(&mut app);
    assert_eq!(take::<FlashlightOffBlocked>(&mut app).len(), 1);
    assert!(app.world().get::<Flashlight>(flashlight).unwrap().is_lit());
    assert_eq!(take::<FlashlightToggled>(&mut app).len(), 9);
}

#[test]
fn test_interact_out_of_range_does_nothing() {
    let mut app = create_level_app(LevelConfig::default());
    spawn_level(app.world_mut(), FAR, FAR + Vec3::new(10.0, 0.0, 0.0), FAR + Vec3::new(50.0, 0.0, 0.0));
    let flashlight = find::<Flashlight>(&mut app);

    app.world_mut().send_event(InteractPressed);
    step_fixed(&mut app);

    assert!(!app.world().get::<Flashlight>(flashlight).unwrap().is_held());
    assert!(app.world().get::<ChildOf>(flashlight).is_none());
}

#[test]
fn test_door_wins_level_once() {
    let mut app = create_level_app(LevelConfig::default());
    spawn_level(app.world_mut(), FAR, FAR + Vec3::new(30.0, 0.0, 0.0), FAR + Vec3::new(1.0, 0.0, 0.0));
    let door = find::<Door>(&mut app);
    record::<DoorOpened>(&mut app);

    run_ticks(&mut app, 600);

    assert_eq!(*app.world().resource::<GameOutcome>(), GameOutcome::Won);
    assert_eq!(take::<DoorOpened>(&mut app).len(), 1);
    assert!(app.world().get::<Door>(door).unwrap().is_done());

    let rotation = app.world().get::<Transform>(door).unwrap().rotation;
    let open = Quat::from_rotation_y(90f32.to_radians());
    assert!(rotation.angle_between(open).to_degrees() < 1.0);
}

#[test]
fn test_door_requests_next_scene() {
    let mut config = LevelConfig::default();
    config.door.outcome = DoorOutcome::LoadScene {
        scene: "Corridor".to_string(),
    };
    config.door.delay = 0.5;

    let mut app = create_level_app(config);
    spawn_level(app.world_mut(), FAR, FAR + Vec3::new(30.0, 0.0, 0.0), FAR + Vec3::new(1.0, 0.0, 0.0));
    record::<SceneRequested>(&mut app);

    run_ticks(&mut app, 600);

    let scenes = take::<SceneRequested>(&mut app);
    assert_eq!(
        scenes,
        vec![SceneRequested {
            scene: "Corridor".to_string()
        }]
    );
    assert!(app.world().resource::<GameOutcome>().is_playing());
}

#[test]
fn test_controls_popup_shows_and_hides() {
    let mut app = create_level_app(LevelConfig::default());
    spawn_level(app.world_mut(), FAR, FAR + Vec3::new(30.0, 0.0, 0.0), FAR + Vec3::new(50.0, 0.0, 0.0));
    record::<PopupShown>(&mut app);
    record::<PopupHidden>(&mut app);

    run_ticks(&mut app, 59);
    assert!(take::<PopupShown>(&mut app).is_empty());

    step_fixed(&mut app);
    assert_eq!(take::<PopupShown>(&mut app).len(), 1);

    // 3s visible + 0.25s fade
    run_ticks(&mut app, 200);
    assert_eq!(take::<PopupHidden>(&mut app).len(), 1);
}
