//! Effects domain: screen flash, sprint camera shake, sprint breathing.
//!
//! Pure value producers. The renderer and audio host read alpha, offsets
//! and volume; nothing here draws or plays sound.

use bevy::prelude::*;

pub mod breathing;
pub mod screen_flash;
pub mod sprint_shake;
pub mod systems;


pub use breathing::{BreathingConfig, SprintBreathing};
pub use screen_flash::{FlashConfig, ScreenFlash};
pub use sprint_shake::{ShakeConfig, SprintShake};

use crate::input::SprintInput;

/// Effects Plugin
///
/// Not gated by the game outcome: the death flash must finish fading.
pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScreenFlash>()
            .init_resource::<SprintInput>()
            .register_type::<ScreenFlash>()
            .register_type::<SprintShake>()
            .register_type::<SprintBreathing>()
            .add_systems(
                FixedUpdate,
                (
                    systems::tick_screen_flash,
                    systems::apply_sprint_shake,
                    systems::update_sprint_breathing,
                ),
            );
    }
}
