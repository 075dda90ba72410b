//! Flashlight systems: pickup, toggle, auto-flicker lamps.

use bevy::prelude::*;

use crate::encounter::horizontal_distance;
use crate::flashlight::components::{Flashlight, PickupOutcome, ToggleOutcome};
use crate::flashlight::events::{
    FlashlightOffBlocked, FlashlightPickedUp, FlashlightToggled, LampClicked,
};
use crate::flashlight::flicker::FlickerLamp;
use crate::input::{FlashlightPressed, InteractPressed};
use crate::player::Player;
use crate::DeterministicRng;

/// System: Interact → pick up the nearest flashlight in range
///
/// One flashlight per press. The picked one is parented to the player and
/// its local pose reset to the socket offset.
pub fn pickup_flashlights(
    mut commands: Commands,
    mut interact: EventReader<InteractPressed>,
    players: Query<(Entity, &Transform), (With<Player>, Without<Flashlight>)>,
    mut flashlights: Query<(Entity, &mut Flashlight, &mut Transform), Without<Player>>,
    mut picked_up: EventWriter<FlashlightPickedUp>,
) {
    let presses = interact.read().count();
    if presses == 0 {
        return;
    }

    let Ok((player, player_transform)) = players.single() else {
        return;
    };
    let player_position = player_transform.translation;

    for _ in 0..presses {
        let nearest = flashlights
            .iter()
            .filter_map(|(entity, flashlight, _)| {
                flashlight
                    .world_position()
                    .map(|position| (entity, horizontal_distance(position, player_position)))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(entity, _)| entity);

        let Some(entity) = nearest else {
            return;
        };
        let Ok((_, mut flashlight, mut transform)) = flashlights.get_mut(entity) else {
            continue;
        };

        match flashlight.try_pickup(player, player_position) {
            PickupOutcome::PickedUp => {
                *transform = Transform::from_translation(flashlight.config().slot_offset);
                commands.entity(entity).insert(ChildOf(player));
                crate::log(&format!("🔦 Flashlight {:?} picked up by {:?}", entity, player));
                picked_up.write(FlashlightPickedUp {
                    flashlight: entity,
                    player,
                });
            }
            PickupOutcome::OutOfRange | PickupOutcome::AlreadyHeld => return,
        }
    }
}

/// System: Flashlight key → toggle every held flashlight
pub fn toggle_flashlights(
    mut presses: EventReader<FlashlightPressed>,
    mut flashlights: Query<(Entity, &mut Flashlight)>,
    mut toggled: EventWriter<FlashlightToggled>,
    mut blocked: EventWriter<FlashlightOffBlocked>,
) {
    for _ in presses.read() {
        for (entity, mut flashlight) in flashlights.iter_mut() {
            match flashlight.toggle() {
                ToggleOutcome::TurnedOn | ToggleOutcome::TurnedOff => {
                    toggled.write(FlashlightToggled {
                        flashlight: entity,
                        lit: flashlight.is_lit(),
                    });
                }
                ToggleOutcome::OffBlocked => {
                    crate::log(&format!("🔦 Flashlight {:?}: OFF refused", entity));
                    blocked.write(FlashlightOffBlocked { flashlight: entity });
                }
                ToggleOutcome::NotHeld => {}
            }
        }
    }
}

/// System: auto-toggle lamps (flicker before OFF)
pub fn tick_flicker_lamps(
    mut lamps: Query<(Entity, &mut FlickerLamp)>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
    mut clicks: EventWriter<LampClicked>,
) {
    let delta = time.delta_secs();

    for (entity, mut lamp) in lamps.iter_mut() {
        if let Some(click) = lamp.tick(delta, &mut rng.rng) {
            clicks.write(LampClicked { lamp: entity, click });
        }
    }
}
