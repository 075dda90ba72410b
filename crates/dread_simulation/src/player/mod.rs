//! Player domain: marker + view pose, health, damage and death.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

pub use components::{Health, Player, PlayerView};
pub use events::{DamageRequest, DamageTaken, PlayerDied};

use crate::effects::ScreenFlash;
use crate::encounter::PlayerCaught;
use crate::level::{gameplay_active, GameOutcome};

/// Player Plugin
///
/// Runs after the encounter step so a catch is applied in the same tick.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameOutcome>()
            .init_resource::<ScreenFlash>()
            .add_event::<PlayerCaught>()
            .add_event::<DamageRequest>()
            .add_event::<DamageTaken>()
            .add_event::<PlayerDied>()
            .register_type::<Player>()
            .register_type::<PlayerView>()
            .register_type::<Health>()
            .add_systems(
                FixedUpdate,
                systems::apply_player_damage
                    .run_if(gameplay_active)
                    .after(crate::encounter::systems::tick_encounters),
            );
    }
}
