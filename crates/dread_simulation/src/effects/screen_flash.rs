//! Full-screen red flash on damage / death.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::{lerp_clamped, progress};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct FlashConfig {
    /// Pop-in duration (seconds)
    pub fade_in: f32,
    /// Fade-out duration (seconds)
    pub fade_out: f32,
    /// Peak alpha for a non-lethal hit
    pub hit_alpha: f32,
    /// Peak alpha on death
    pub death_alpha: f32,
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self {
            fade_in: 0.06,
            fade_out: 0.35,
            hit_alpha: 0.25,
            death_alpha: 0.65,
        }
    }
}

impl FlashConfig {
    pub fn sanitized(&self) -> Self {
        Self {
            fade_in: self.fade_in.max(0.0),
            fade_out: self.fade_out.max(0.0),
            hit_alpha: self.hit_alpha.clamp(0.0, 1.0),
            death_alpha: self.death_alpha.clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
enum FlashPhase {
    #[default]
    Idle,
    PopIn { elapsed: f32, target: f32 },
    FadeOut { elapsed: f32, from: f32 },
}

/// Screen flash service
///
/// Damage code calls `flash_hit` / `flash_death`; the renderer reads
/// `alpha()` every frame. A new flash restarts the timeline from 0.
#[derive(Resource, Debug, Clone, Default, Reflect)]
#[reflect(Resource)]
pub struct ScreenFlash {
    config: FlashConfig,
    phase: FlashPhase,
    alpha: f32,
}

impl ScreenFlash {
    pub fn new(config: FlashConfig) -> Self {
        Self {
            config: config.sanitized(),
            ..Default::default()
        }
    }

    pub fn config(&self) -> &FlashConfig {
        &self.config
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_active(&self) -> bool {
        self.phase != FlashPhase::Idle
    }

    pub fn flash_hit(&mut self) {
        self.start(self.config.hit_alpha);
    }

    pub fn flash_death(&mut self) {
        self.start(self.config.death_alpha);
    }

    fn start(&mut self, target: f32) {
        self.alpha = 0.0;
        self.phase = FlashPhase::PopIn {
            elapsed: 0.0,
            target,
        };
    }

    pub fn tick(&mut self, dt: f32) {
        match self.phase {
            FlashPhase::Idle => {}
            FlashPhase::PopIn { elapsed, target } => {
                let elapsed = elapsed + dt;
                if elapsed >= self.config.fade_in {
                    self.alpha = target;
                    self.phase = FlashPhase::FadeOut {
                        elapsed: 0.0,
                        from: target,
                    };
                } else {
                    self.alpha = lerp_clamped(0.0, target, progress(elapsed, self.config.fade_in));
                    self.phase = FlashPhase::PopIn { elapsed, target };
                }
            }
            FlashPhase::FadeOut { elapsed, from } => {
                let elapsed = elapsed + dt;
                if elapsed >= self.config.fade_out {
                    self.alpha = 0.0;
                    self.phase = FlashPhase::Idle;
                } else {
                    self.alpha = lerp_clamped(from, 0.0, progress(elapsed, self.config.fade_out));
                    self.phase = FlashPhase::FadeOut { elapsed, from };
                }
            }
        }
    }
}
