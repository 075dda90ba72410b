//! Flashlight domain: floor pickup, player toggle, flickering lamps.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod flicker;
pub mod systems;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod components_tests;

pub use components::{
    Flashlight, FlashlightConfig, FlashlightHolder, PickupOutcome, ToggleOutcome,
};
pub use events::{FlashlightOffBlocked, FlashlightPickedUp, FlashlightToggled, LampClicked};
pub use flicker::{FlickerConfig, FlickerLamp, LampClick, LampState, SpanRange};

use crate::input::{FlashlightPressed, InteractPressed};
use crate::level::{gameplay_active, GameOutcome};
use crate::DeterministicRng;

/// Flashlight Plugin
///
/// Order (FixedUpdate, chained, after the encounter step): pickup → toggle
/// → lamps, so a toggle pressed on the pickup frame acts on the new flashlight.
pub struct FlashlightPlugin;

impl Plugin for FlashlightPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(crate::DEFAULT_SEED));
        }

        app.init_resource::<GameOutcome>()
            .add_event::<InteractPressed>()
            .add_event::<FlashlightPressed>()
            .add_event::<FlashlightPickedUp>()
            .add_event::<FlashlightToggled>()
            .add_event::<FlashlightOffBlocked>()
            .add_event::<LampClicked>()
            .register_type::<Flashlight>()
            .register_type::<FlickerLamp>()
            .add_systems(
                FixedUpdate,
                (
                    systems::pickup_flashlights,
                    systems::toggle_flashlights,
                    systems::tick_flicker_lamps,
                )
                    .chain()
                    .run_if(gameplay_active)
                    // Same DeterministicRng as the encounter step
                    .after(crate::encounter::systems::tick_encounters),
            );
    }
}
