//! Heavy breathing loop while sprinting.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::smooth_damp;

/// Below this the loop is considered silent and stopped
pub const SILENT_VOLUME: f32 = 0.01;

/// Shortest smoothing time accepted
const MIN_SMOOTH_TIME: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct BreathingConfig {
    pub max_volume: f32,
    pub fade_in: f32,
    pub fade_out: f32,
    /// Minimum horizontal speed (m/s) that counts as running
    pub move_speed_threshold: f32,
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            max_volume: 0.65,
            fade_in: 0.25,
            fade_out: 0.25,
            move_speed_threshold: 0.3,
        }
    }
}

/// Sprint breathing loop
///
/// The audio collaborator plays the loop while `playing()` and sets its
/// volume to `volume()`.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct SprintBreathing {
    config: BreathingConfig,
    volume: f32,
    velocity: f32,
    playing: bool,
}

impl SprintBreathing {
    pub fn new(config: BreathingConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &BreathingConfig {
        &self.config
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn playing(&self) -> bool {
        self.playing
    }

    /// Returns `true` when the playing flag changed this update
    pub fn update(&mut self, running: bool, dt: f32) -> bool {
        let was_playing = self.playing;

        if running {
            self.playing = true;
        }

        let (target, smooth_time) = if running {
            (self.config.max_volume, self.config.fade_in)
        } else {
            (0.0, self.config.fade_out)
        };
        self.volume = smooth_damp(
            self.volume,
            target,
            &mut self.velocity,
            smooth_time.max(MIN_SMOOTH_TIME),
            dt,
        );

        // Keep playing while fading out, stop once silent
        if !running && self.playing && self.volume < SILENT_VOLUME {
            self.playing = false;
        }

        was_playing != self.playing
    }
}
