//! Host input layer → simulation.
//!
//! The simulation never polls devices. The host sends edge-triggered
//! events ("pressed this frame") and keeps the sprint hold flag current.

use bevy::prelude::*;

/// Interact key went down this frame (pickup)
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct InteractPressed;

/// Flashlight key went down this frame (toggle)
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct FlashlightPressed;

/// Sprint hold state, refreshed by the host every frame
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SprintInput {
    pub held: bool,
    /// Player horizontal speed (m/s), vertical ignored so jumps don't count
    pub horizontal_speed: f32,
    pub grounded: bool,
}

impl Default for SprintInput {
    fn default() -> Self {
        Self {
            held: false,
            horizontal_speed: 0.0,
            grounded: true,
        }
    }
}

impl SprintInput {
    pub fn sprinting(horizontal_speed: f32) -> Self {
        Self {
            held: true,
            horizontal_speed,
            grounded: true,
        }
    }

    /// Sprint key held and moving on the ground faster than `threshold`
    pub fn is_running(&self, threshold: f32) -> bool {
        self.held && self.grounded && self.horizontal_speed > threshold
    }
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<InteractPressed>()
            .add_event::<FlashlightPressed>()
            .init_resource::<SprintInput>();
    }
}
