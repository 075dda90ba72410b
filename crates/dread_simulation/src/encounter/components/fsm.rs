//! Encounter FSM components (state, config, spawn region, presentation).

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::shared::finite_or;

pub use crate::shared::{CONFIG_EPSILON, TIMER_EPSILON};

/// Encounter FSM states
///
/// Invariant: `Hidden` ⇒ not visible, `Roaming`/`Chasing` ⇒ visible.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub enum EncounterState {
    /// Hidden: invisible, counting down before reappearing
    Hidden {
        /// Seconds left before Hidden → Roaming
        dwell_remaining: f32,
    },

    /// Roaming: visible, running forward from a random spawn point
    Roaming {
        /// Seconds spent roaming since the last teleport
        run_elapsed: f32,
    },

    /// Chasing: ambushed the player, running at them
    Chasing,
}

impl EncounterState {
    pub fn phase(&self) -> EncounterPhase {
        match self {
            Self::Hidden { .. } => EncounterPhase::Hidden,
            Self::Roaming { .. } => EncounterPhase::Roaming,
            Self::Chasing => EncounterPhase::Chasing,
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden { .. })
    }
}

/// Data-free view of `EncounterState` (for events, logs, asserts)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum EncounterPhase {
    Hidden,
    Roaming,
    Chasing,
}

/// Rectangle (XZ plane) where the monster reappears
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnRegion {
    pub center: Vec3,
    pub radius_x: f32,
    pub radius_z: f32,
}

impl Default for SpawnRegion {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius_x: 20.0,
            radius_z: 20.0,
        }
    }
}

impl SpawnRegion {
    pub fn new(center: Vec3, radius_x: f32, radius_z: f32) -> Self {
        Self { center, radius_x, radius_z }
    }

    /// Uniform sample inside the rectangle, at the center's height
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let x = rng.gen_range(-self.radius_x..=self.radius_x);
        let z = rng.gen_range(-self.radius_z..=self.radius_z);
        self.center + Vec3::new(x, 0.0, z)
    }

    /// Inclusive XZ bounds check
    pub fn contains(&self, point: Vec3) -> bool {
        (point.x - self.center.x).abs() <= self.radius_x
            && (point.z - self.center.z).abs() <= self.radius_z
    }

    /// Non-finite values fall back to the defaults, negative radii clamp to 0
    pub fn sanitized(&self) -> Self {
        let fallback = Self::default();
        Self {
            center: if self.center.is_finite() {
                self.center
            } else {
                fallback.center
            },
            radius_x: finite_or(self.radius_x, fallback.radius_x).max(0.0),
            radius_z: finite_or(self.radius_z, fallback.radius_z).max(0.0),
        }
    }
}

/// Encounter parameters (defaults = the prototype's inspector values)
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    pub spawn_region: SpawnRegion,
    /// Hidden duration is drawn from [min_dwell, max_dwell] (seconds)
    pub min_dwell: f32,
    pub max_dwell: f32,
    /// Roaming lasts this long without spotting the player (seconds)
    pub run_duration: f32,
    /// Horizontal distance that triggers / sustains a chase (meters)
    pub chase_range: f32,
    /// Horizontal distance at which the player counts as caught (meters)
    pub catch_radius: f32,
    pub normal_speed: f32,
    pub chase_speed: f32,
    /// Ambush point distance in front of the player's view (meters)
    pub appear_distance: f32,
    /// Ambush height relative to the player's feet
    pub appear_height_offset: f32,
    /// Facing slerp rate while chasing (1/s)
    pub turn_rate: f32,
    /// Damage dealt to the player on catch
    pub catch_damage: u32,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            spawn_region: SpawnRegion::default(),
            min_dwell: 2.0,
            max_dwell: 5.0,
            run_duration: 3.0,
            chase_range: 4.0,
            catch_radius: 2.0,
            normal_speed: 5.0,
            chase_speed: 7.0,
            appear_distance: 3.0,
            appear_height_offset: 0.0,
            turn_rate: 10.0,
            catch_damage: 34,
        }
    }
}

impl EncounterConfig {
    /// Clamp out-of-range values instead of rejecting them
    ///
    /// NaN or infinite fields fall back to their defaults first, so a config
    /// built in code without going through `LevelConfig` validation still
    /// samples safely.
    pub fn sanitized(&self) -> Self {
        let fallback = Self::default();
        let positive = |value: f32, default: f32| finite_or(value, default).max(CONFIG_EPSILON);
        let min_dwell = positive(self.min_dwell, fallback.min_dwell);

        Self {
            spawn_region: self.spawn_region.sanitized(),
            min_dwell,
            max_dwell: finite_or(self.max_dwell, fallback.max_dwell).max(min_dwell),
            run_duration: positive(self.run_duration, fallback.run_duration),
            chase_range: positive(self.chase_range, fallback.chase_range),
            catch_radius: positive(self.catch_radius, fallback.catch_radius),
            normal_speed: positive(self.normal_speed, fallback.normal_speed),
            chase_speed: positive(self.chase_speed, fallback.chase_speed),
            appear_distance: positive(self.appear_distance, fallback.appear_distance),
            appear_height_offset: finite_or(self.appear_height_offset, fallback.appear_height_offset),
            turn_rate: positive(self.turn_rate, fallback.turn_rate),
            catch_damage: self.catch_damage,
        }
    }

    /// Draw one Hidden duration. Expects a sanitized config.
    pub fn sample_dwell<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.gen_range(self.min_dwell..=self.max_dwell)
    }
}

/// What the renderer / animator should show for an encounter actor
///
/// Written by the encounter systems, read by the host (mesh visibility,
/// "isRunning" animator flag).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct EncounterPresentation {
    pub visible: bool,
    pub running: bool,
}
