//! Level events.

use bevy::prelude::*;

/// Host should load a scene (door exit, menu buttons)
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SceneRequested {
    pub scene: String,
}

/// Door finished rotating open (delay countdown started)
#[derive(Event, Debug, Clone, Copy)]
pub struct DoorOpened {
    pub door: Entity,
}

/// Controls popup became visible
#[derive(Event, Debug, Clone, Copy)]
pub struct PopupShown {
    pub popup: Entity,
}

/// Controls popup finished hiding (host relocks the cursor)
#[derive(Event, Debug, Clone, Copy)]
pub struct PopupHidden {
    pub popup: Entity,
}

/// Close button on the controls popup was pressed
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct PopupCloseRequested;
