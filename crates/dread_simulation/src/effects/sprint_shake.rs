//! Camera shake while sprinting.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::shared::{move_towards, MIN_DURATION};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct ShakeConfig {
    /// Position amplitude (local metres)
    pub position_amplitude: Vec3,
    /// Rotation amplitude in degrees (x = pitch, y = yaw, z = roll)
    pub rotation_amplitude: Vec3,
    /// Noise speed
    pub frequency: f32,
    /// Seconds to reach full shake once sprinting
    pub blend_in: f32,
    /// Seconds to settle once sprint stops
    pub blend_out: f32,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            position_amplitude: Vec3::new(0.015, 0.02, 0.0),
            rotation_amplitude: Vec3::new(1.2, 0.4, 0.7),
            frequency: 12.0,
            blend_in: 0.15,
            blend_out: 0.2,
        }
    }
}

/// Offset between the position and rotation noise channels
const ROTATION_CHANNEL_OFFSET: f32 = 20.0;

/// Smooth noise in [-1, 1]
///
/// Two incommensurate sines, so the signal never repeats visibly and never
/// jumps between frames.
pub fn smooth_noise(seed: f32, t: f32) -> f32 {
    0.6 * (t + seed).sin() + 0.4 * (t * 1.73 + seed * 2.31).sin()
}

/// Sprint camera shake
///
/// Offsets are applied on top of the camera's base pose, never accumulated.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct SprintShake {
    config: ShakeConfig,
    base_translation: Vec3,
    base_rotation: Quat,
    /// 0..1 blend
    intensity: f32,
    /// Noise clock (only runs while intensity > 0)
    clock: f32,
    /// Per-axis seeds, drawn once
    seed: Vec3,
    position_offset: Vec3,
    rotation_offset: Vec3,
}

impl SprintShake {
    /// `base` is the camera's rest pose (local)
    pub fn new<R: Rng + ?Sized>(config: ShakeConfig, base: Transform, rng: &mut R) -> Self {
        Self {
            config,
            base_translation: base.translation,
            base_rotation: base.rotation,
            intensity: 0.0,
            clock: 0.0,
            seed: Vec3::new(
                rng.gen_range(0.0..10.0),
                rng.gen_range(0.0..10.0),
                rng.gen_range(0.0..10.0),
            ),
            position_offset: Vec3::ZERO,
            rotation_offset: Vec3::ZERO,
        }
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn position_offset(&self) -> Vec3 {
        self.position_offset
    }

    /// Rotation offset in degrees
    pub fn rotation_offset(&self) -> Vec3 {
        self.rotation_offset
    }

    pub fn update(&mut self, sprinting: bool, dt: f32) {
        let (target, blend) = if sprinting {
            (1.0, self.config.blend_in)
        } else {
            (0.0, self.config.blend_out)
        };
        let speed = 1.0 / blend.max(MIN_DURATION);
        self.intensity = move_towards(self.intensity, target, speed * dt);

        if self.intensity > 0.0 {
            self.clock += dt * self.config.frequency;
        }

        let t = self.clock;
        let seed = self.seed;
        let channel = |offset: f32| {
            Vec3::new(
                smooth_noise(seed.x + offset, t),
                smooth_noise(seed.y + offset, t),
                smooth_noise(seed.z + offset, t),
            )
        };

        self.position_offset = channel(0.0) * self.config.position_amplitude * self.intensity;
        self.rotation_offset =
            channel(ROTATION_CHANNEL_OFFSET) * self.config.rotation_amplitude * self.intensity;
    }

    /// Camera pose with the current offsets applied
    pub fn pose(&self) -> (Vec3, Quat) {
        let offset = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation_offset.x.to_radians(),
            self.rotation_offset.y.to_radians(),
            self.rotation_offset.z.to_radians(),
        );
        (
            self.base_translation + self.position_offset,
            self.base_rotation * offset,
        )
    }
}
