//! Level domain: exit door, controls popup, game outcome.

use bevy::prelude::*;

pub mod door;
pub mod events;
pub mod outcome;
pub mod popup;
pub mod systems;


pub use door::{Door, DoorConfig, DoorEvent, DoorOutcome, DoorState};
pub use events::{DoorOpened, PopupCloseRequested, PopupHidden, PopupShown, SceneRequested};
pub use outcome::{gameplay_active, GameOutcome};
pub use popup::{ControlsPopup, PopupConfig, PopupEvent, PopupState};

/// Level Plugin
///
/// Doors freeze once the level is decided; the popup keeps its own clock.
pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameOutcome>()
            .add_event::<SceneRequested>()
            .add_event::<DoorOpened>()
            .add_event::<PopupShown>()
            .add_event::<PopupHidden>()
            .add_event::<PopupCloseRequested>()
            .register_type::<GameOutcome>()
            .register_type::<Door>()
            .register_type::<ControlsPopup>()
            .add_systems(
                FixedUpdate,
                (
                    systems::tick_doors.run_if(gameplay_active),
                    systems::tick_controls_popups,
                ),
            );
    }
}
