//! Flashlight events (audio, UI prompt, logging).

use bevy::prelude::*;

use super::flicker::LampClick;

#[derive(Event, Debug, Clone, Copy)]
pub struct FlashlightPickedUp {
    pub flashlight: Entity,
    pub player: Entity,
}

/// Light switched (click sound)
#[derive(Event, Debug, Clone, Copy)]
pub struct FlashlightToggled {
    pub flashlight: Entity,
    pub lit: bool,
}

/// OFF attempt refused, light stays on
#[derive(Event, Debug, Clone, Copy)]
pub struct FlashlightOffBlocked {
    pub flashlight: Entity,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct LampClicked {
    pub lamp: Entity,
    pub click: LampClick,
}
