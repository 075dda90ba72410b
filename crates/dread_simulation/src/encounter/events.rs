//! Encounter events: emitted by `tick_encounters` for other domains.

use bevy::prelude::*;

use super::components::EncounterPhase;
use super::machine::TransitionCause;

/// Monster changed state (logging, audio stingers, UI)
#[derive(Event, Debug, Clone)]
pub struct EncounterTransitioned {
    pub monster: Entity,
    pub from: EncounterPhase,
    pub to: EncounterPhase,
    pub cause: TransitionCause,
}

/// Monster reached the player (Chasing → Hidden)
///
/// The player domain turns this into damage.
#[derive(Event, Debug, Clone)]
pub struct PlayerCaught {
    pub monster: Entity,
    pub player: Entity,
    pub damage: u32,
}
