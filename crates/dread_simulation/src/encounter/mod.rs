//! Encounter domain: the monster's hide / roam / ambush cycle.
//!
//! - `machine`: engine-agnostic state machine (`EncounterActor::tick`)
//! - `components`: state, config, spawn region, presentation flags
//! - `systems`: ECS host for the machine (FixedUpdate)
//! - `events`: transitions and catches for other domains

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod machine;
pub mod systems;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod machine_tests;

pub use components::{
    EncounterConfig, EncounterPhase, EncounterPresentation, EncounterState, SpawnRegion,
};
pub use events::{EncounterTransitioned, PlayerCaught};
pub use machine::{
    horizontal_distance, yaw_toward, EncounterActor, EncounterPresenter, EncounterTransition,
    PlayerPose, TransitionCause,
};

use crate::level::{gameplay_active, GameOutcome};
use crate::DeterministicRng;

/// Encounter Plugin
///
/// Order (FixedUpdate, chained):
/// 1. present_spawned_encounters: first presentation of new actors
/// 2. tick_encounters: FSM step, events
///
/// Frozen while the level outcome is not `Playing`.
pub struct EncounterPlugin;

impl Plugin for EncounterPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(crate::DEFAULT_SEED));
        }

        app.init_resource::<GameOutcome>()
            .add_event::<EncounterTransitioned>()
            .add_event::<PlayerCaught>()
            .register_type::<EncounterState>()
            .register_type::<EncounterPresentation>()
            .add_systems(
                FixedUpdate,
                (
                    systems::present_spawned_encounters,
                    systems::tick_encounters.run_if(gameplay_active),
                )
                    .chain(),
            );
    }
}
