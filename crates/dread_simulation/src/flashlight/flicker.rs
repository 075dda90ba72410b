//! Auto-toggling lamp that flickers before going dark.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::shared::{finite_or, CONFIG_EPSILON, TIMER_EPSILON};

/// Inclusive random range (seconds or factor)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
pub struct SpanRange {
    pub min: f32,
    pub max: f32,
}

impl SpanRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Duration range: bounds clamp to `CONFIG_EPSILON`, an inverted range
    /// collapses to `min`, non-finite bounds take `fallback`'s
    pub fn sanitized(&self, fallback: SpanRange) -> Self {
        let min = finite_or(self.min, fallback.min).max(CONFIG_EPSILON);
        Self {
            min,
            max: finite_or(self.max, fallback.max).max(min),
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.gen_range(self.min..=self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct FlickerConfig {
    pub starts_on: bool,
    /// Full intensity
    pub intensity: f32,
    pub on_duration: SpanRange,
    pub off_duration: SpanRange,
    /// Flicker before every ON → OFF
    pub flicker_enabled: bool,
    pub flicker_total: SpanRange,
    pub flicker_step: SpanRange,
    /// Lowest intensity factor of a flicker step
    pub min_intensity_factor: f32,
    /// Chance a flicker step goes fully dark for its second half
    pub blackout_chance: f32,
}

impl Default for FlickerConfig {
    fn default() -> Self {
        Self {
            starts_on: true,
            intensity: 700.0,
            on_duration: SpanRange::new(2.5, 4.0),
            off_duration: SpanRange::new(1.2, 2.0),
            flicker_enabled: true,
            flicker_total: SpanRange::new(0.35, 0.75),
            flicker_step: SpanRange::new(0.03, 0.12),
            min_intensity_factor: 0.25,
            blackout_chance: 0.35,
        }
    }
}

impl FlickerConfig {
    /// Every span is a duration, so a zero step can't stall the flicker
    pub fn sanitized(&self) -> Self {
        let fallback = Self::default();
        Self {
            intensity: finite_or(self.intensity, fallback.intensity).max(0.0),
            on_duration: self.on_duration.sanitized(fallback.on_duration),
            off_duration: self.off_duration.sanitized(fallback.off_duration),
            flicker_total: self.flicker_total.sanitized(fallback.flicker_total),
            flicker_step: self.flicker_step.sanitized(fallback.flicker_step),
            min_intensity_factor: finite_or(self.min_intensity_factor, fallback.min_intensity_factor)
                .clamp(0.0, 1.0),
            blackout_chance: finite_or(self.blackout_chance, fallback.blackout_chance)
                .clamp(0.0, 1.0),
            ..*self
        }
    }
}

/// Sound cue for the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum LampClick {
    On,
    Off,
    FlickerTick,
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum LampState {
    /// Holding ON or OFF until the span runs out
    Steady { remaining: f32 },
    /// Dimmed half of a flicker step
    FlickerLit {
        remaining: f32,
        step: f32,
        elapsed: f32,
        total: f32,
    },
    /// Second half of a flicker step (lit or blacked out)
    FlickerRest {
        remaining: f32,
        elapsed: f32,
        total: f32,
    },
}

/// Flicker lamp
///
/// At most one step edge per tick; a flicker step shorter than the tick
/// lasts one tick. The flicker phase ends on time spent, not on the sum of
/// drawn steps.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct FlickerLamp {
    config: FlickerConfig,
    state: LampState,
    /// Logical ON/OFF (stays ON while flickering)
    on: bool,
    /// Light source enabled right now
    emitting: bool,
    intensity: f32,
}

impl FlickerLamp {
    pub fn new<R: Rng + ?Sized>(config: FlickerConfig, rng: &mut R) -> Self {
        let config = config.sanitized();
        let span = if config.starts_on {
            config.on_duration
        } else {
            config.off_duration
        };
        Self {
            state: LampState::Steady {
                remaining: span.sample(rng),
            },
            on: config.starts_on,
            emitting: config.starts_on,
            intensity: config.intensity,
            config,
        }
    }

    pub fn config(&self) -> &FlickerConfig {
        &self.config
    }

    pub fn state(&self) -> LampState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn is_flickering(&self) -> bool {
        !matches!(self.state, LampState::Steady { .. })
    }

    pub fn emitting(&self) -> bool {
        self.emitting
    }

    /// Current light intensity (0 when not emitting)
    pub fn intensity(&self) -> f32 {
        if self.emitting {
            self.intensity
        } else {
            0.0
        }
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> Option<LampClick> {
        match self.state {
            LampState::Steady { remaining } => {
                let remaining = remaining - dt;
                if remaining > TIMER_EPSILON {
                    self.state = LampState::Steady { remaining };
                    return None;
                }

                if self.on && self.config.flicker_enabled {
                    let total = self.config.flicker_total.sample(rng);
                    return Some(self.begin_step(0.0, total, rng));
                }

                self.set_steady(!self.on, rng);
                Some(if self.on { LampClick::On } else { LampClick::Off })
            }
            LampState::FlickerLit {
                remaining,
                step,
                elapsed,
                total,
            } => {
                let remaining = remaining - dt;
                let elapsed = elapsed + dt;
                if remaining > TIMER_EPSILON {
                    self.state = LampState::FlickerLit {
                        remaining,
                        step,
                        elapsed,
                        total,
                    };
                    return None;
                }

                self.state = LampState::FlickerRest {
                    remaining: step * 0.5,
                    elapsed,
                    total,
                };
                if rng.gen::<f32>() < self.config.blackout_chance {
                    self.emitting = false;
                    return Some(LampClick::FlickerTick);
                }
                None
            }
            LampState::FlickerRest {
                remaining,
                elapsed,
                total,
            } => {
                let remaining = remaining - dt;
                let elapsed = elapsed + dt;
                if remaining > TIMER_EPSILON {
                    self.state = LampState::FlickerRest {
                        remaining,
                        elapsed,
                        total,
                    };
                    return None;
                }

                if elapsed < total {
                    return Some(self.begin_step(elapsed, total, rng));
                }

                self.set_steady(false, rng);
                Some(LampClick::Off)
            }
        }
    }

    /// Start one flicker step: random dim, lit for the first half
    fn begin_step<R: Rng + ?Sized>(&mut self, elapsed: f32, total: f32, rng: &mut R) -> LampClick {
        let step = self.config.flicker_step.sample(rng);
        let factor = rng.gen_range(self.config.min_intensity_factor..=1.0);

        self.emitting = true;
        self.intensity = self.config.intensity * factor;
        self.state = LampState::FlickerLit {
            remaining: step * 0.5,
            step,
            elapsed,
            total,
        };
        LampClick::FlickerTick
    }

    /// Full intensity ON, or OFF, with a fresh span
    fn set_steady<R: Rng + ?Sized>(&mut self, on: bool, rng: &mut R) {
        self.on = on;
        self.emitting = on;
        self.intensity = self.config.intensity;
        let span = if on {
            self.config.on_duration
        } else {
            self.config.off_duration
        };
        self.state = LampState::Steady {
            remaining: span.sample(rng),
        };
    }
}
