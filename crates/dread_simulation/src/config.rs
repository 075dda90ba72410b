//! Level configuration (JSON).
//!
//! Every section is optional: a missing field falls back to the prototype's
//! inspector values. Loading rejects NaN/inf; everything else out of range is
//! clamped by `sanitized()`.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::effects::{BreathingConfig, FlashConfig, ShakeConfig};
use crate::encounter::EncounterConfig;
use crate::flashlight::{FlashlightConfig, FlickerConfig, SpanRange};
use crate::level::{DoorConfig, PopupConfig};

/// Errors while loading a level config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read level config {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse level config JSON")]
    Parse {
        #[from]
        source: serde_json::Error,
    },

    #[error("level config field `{field}` must be a finite number")]
    NonFinite { field: &'static str },
}

/// Whole-level tuning document
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Seed for `DeterministicRng`
    pub seed: u64,
    pub player_max_health: u32,
    pub encounter: EncounterConfig,
    pub flashlight: FlashlightConfig,
    pub lamp: FlickerConfig,
    pub flash: FlashConfig,
    pub shake: ShakeConfig,
    pub breathing: BreathingConfig,
    pub door: DoorConfig,
    pub popup: PopupConfig,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            seed: crate::DEFAULT_SEED,
            player_max_health: 100,
            encounter: EncounterConfig::default(),
            flashlight: FlashlightConfig::default(),
            lamp: FlickerConfig::default(),
            flash: FlashConfig::default(),
            shake: ShakeConfig::default(),
            breathing: BreathingConfig::default(),
            door: DoorConfig::default(),
            popup: PopupConfig::default(),
        }
    }
}

impl LevelConfig {
    /// Parse, validate and sanitize a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: LevelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config.sanitized())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_json_str(&json)?;
        crate::log_info(&format!("📄 Level config loaded from {}", path.display()));
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Apply every section's clamps
    pub fn sanitized(&self) -> Self {
        Self {
            seed: self.seed,
            player_max_health: self.player_max_health.max(1),
            encounter: self.encounter.sanitized(),
            flashlight: self.flashlight.sanitized(),
            lamp: self.lamp.sanitized(),
            flash: self.flash.sanitized(),
            shake: self.shake,
            breathing: BreathingConfig {
                max_volume: self.breathing.max_volume.clamp(0.0, 1.0),
                fade_in: self.breathing.fade_in.max(0.0),
                fade_out: self.breathing.fade_out.max(0.0),
                move_speed_threshold: self.breathing.move_speed_threshold.max(0.0),
            },
            door: self.door.sanitized(),
            popup: self.popup.sanitized(),
        }
    }

    /// Reject NaN / infinity (clamping can't fix those)
    pub fn validate(&self) -> Result<(), ConfigError> {
        let encounter = &self.encounter;
        let region = &encounter.spawn_region;
        let lamp = &self.lamp;

        let mut fields: Vec<(&'static str, f32)> = vec![
            ("encounter.spawn_region.center.x", region.center.x),
            ("encounter.spawn_region.center.y", region.center.y),
            ("encounter.spawn_region.center.z", region.center.z),
            ("encounter.spawn_region.radius_x", region.radius_x),
            ("encounter.spawn_region.radius_z", region.radius_z),
            ("encounter.min_dwell", encounter.min_dwell),
            ("encounter.max_dwell", encounter.max_dwell),
            ("encounter.run_duration", encounter.run_duration),
            ("encounter.chase_range", encounter.chase_range),
            ("encounter.catch_radius", encounter.catch_radius),
            ("encounter.normal_speed", encounter.normal_speed),
            ("encounter.chase_speed", encounter.chase_speed),
            ("encounter.appear_distance", encounter.appear_distance),
            ("encounter.appear_height_offset", encounter.appear_height_offset),
            ("encounter.turn_rate", encounter.turn_rate),
            ("flashlight.pickup_radius", self.flashlight.pickup_radius),
            ("flashlight.slot_offset.x", self.flashlight.slot_offset.x),
            ("flashlight.slot_offset.y", self.flashlight.slot_offset.y),
            ("flashlight.slot_offset.z", self.flashlight.slot_offset.z),
            ("lamp.intensity", lamp.intensity),
            ("lamp.min_intensity_factor", lamp.min_intensity_factor),
            ("lamp.blackout_chance", lamp.blackout_chance),
            ("flash.fade_in", self.flash.fade_in),
            ("flash.fade_out", self.flash.fade_out),
            ("flash.hit_alpha", self.flash.hit_alpha),
            ("flash.death_alpha", self.flash.death_alpha),
            ("shake.frequency", self.shake.frequency),
            ("shake.blend_in", self.shake.blend_in),
            ("shake.blend_out", self.shake.blend_out),
            ("breathing.max_volume", self.breathing.max_volume),
            ("breathing.fade_in", self.breathing.fade_in),
            ("breathing.fade_out", self.breathing.fade_out),
            ("breathing.move_speed_threshold", self.breathing.move_speed_threshold),
            ("door.trigger_radius", self.door.trigger_radius),
            ("door.open_angle", self.door.open_angle),
            ("door.open_speed", self.door.open_speed),
            ("door.delay", self.door.delay),
            ("popup.show_delay", self.popup.show_delay),
            ("popup.visible_seconds", self.popup.visible_seconds),
            ("popup.fade_seconds", self.popup.fade_seconds),
        ];

        let ranges: [(&'static str, &'static str, SpanRange); 4] = [
            ("lamp.on_duration.min", "lamp.on_duration.max", lamp.on_duration),
            ("lamp.off_duration.min", "lamp.off_duration.max", lamp.off_duration),
            ("lamp.flicker_total.min", "lamp.flicker_total.max", lamp.flicker_total),
            ("lamp.flicker_step.min", "lamp.flicker_step.max", lamp.flicker_step),
        ];
        for (min_field, max_field, range) in ranges {
            fields.push((min_field, range.min));
            fields.push((max_field, range.max));
        }

        let shake_vectors = [
            ("shake.position_amplitude", self.shake.position_amplitude),
            ("shake.rotation_amplitude", self.shake.rotation_amplitude),
        ];
        for (field, vector) in shake_vectors {
            if !vector.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        match fields.into_iter().find(|(_, value)| !value.is_finite()) {
            Some((field, _)) => Err(ConfigError::NonFinite { field }),
            None => Ok(()),
        }
    }
}
