//! Timed controls popup: appears after a delay, stays up, fades out.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::{lerp_clamped, progress, TIMER_EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct PopupConfig {
    /// Delay before the popup appears
    pub show_delay: f32,
    /// How long it stays up before auto-hiding
    pub visible_seconds: f32,
    /// Fade in/out duration (0 = instant)
    pub fade_seconds: f32,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            show_delay: 1.0,
            visible_seconds: 3.0,
            fade_seconds: 0.25,
        }
    }
}

impl PopupConfig {
    pub fn sanitized(&self) -> Self {
        Self {
            show_delay: self.show_delay.max(0.0),
            visible_seconds: self.visible_seconds.max(0.0),
            fade_seconds: self.fade_seconds.max(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum PopupState {
    Waiting { remaining: f32 },
    /// Fades in during the first `fade_seconds`
    Visible { elapsed: f32 },
    FadingOut { elapsed: f32, from: f32 },
    Done,
}

/// Edge reported by `ControlsPopup::tick`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupEvent {
    Shown,
    Hidden,
}

/// Controls popup sequence
///
/// Waiting → Visible → FadingOut → Done. The UI reads `alpha()`.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct ControlsPopup {
    config: PopupConfig,
    state: PopupState,
    alpha: f32,
}

impl Default for ControlsPopup {
    fn default() -> Self {
        Self::new(PopupConfig::default())
    }
}

impl ControlsPopup {
    pub fn new(config: PopupConfig) -> Self {
        let config = config.sanitized();
        Self {
            state: PopupState::Waiting {
                remaining: config.show_delay,
            },
            config,
            alpha: 0.0,
        }
    }

    pub fn state(&self) -> PopupState {
        self.state
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Panel should be active (visible or fading out)
    pub fn is_shown(&self) -> bool {
        matches!(
            self.state,
            PopupState::Visible { .. } | PopupState::FadingOut { .. }
        )
    }

    /// Close button: skip straight to fade-out
    ///
    /// Returns `false` once the sequence has already finished hiding.
    pub fn close_early(&mut self) -> bool {
        match self.state {
            PopupState::Waiting { .. } | PopupState::Visible { .. } => {
                self.state = PopupState::FadingOut {
                    elapsed: 0.0,
                    from: self.alpha,
                };
                true
            }
            PopupState::FadingOut { .. } | PopupState::Done => false,
        }
    }

    pub fn tick(&mut self, dt: f32) -> Option<PopupEvent> {
        match self.state {
            PopupState::Waiting { remaining } => {
                let remaining = remaining - dt;
                if remaining <= TIMER_EPSILON {
                    self.state = PopupState::Visible { elapsed: 0.0 };
                    self.alpha = progress(0.0, self.config.fade_seconds);
                    return Some(PopupEvent::Shown);
                }
                self.state = PopupState::Waiting { remaining };
                None
            }
            PopupState::Visible { elapsed } => {
                let elapsed = elapsed + dt;
                self.alpha = progress(elapsed, self.config.fade_seconds);

                if elapsed >= self.config.visible_seconds - TIMER_EPSILON {
                    self.state = PopupState::FadingOut {
                        elapsed: 0.0,
                        from: self.alpha,
                    };
                } else {
                    self.state = PopupState::Visible { elapsed };
                }
                None
            }
            PopupState::FadingOut { elapsed, from } => {
                let elapsed = elapsed + dt;
                let t = progress(elapsed, self.config.fade_seconds);
                self.alpha = lerp_clamped(from, 0.0, t);

                if elapsed >= self.config.fade_seconds - TIMER_EPSILON {
                    self.alpha = 0.0;
                    self.state = PopupState::Done;
                    return Some(PopupEvent::Hidden);
                }
                self.state = PopupState::FadingOut { elapsed, from };
                None
            }
            PopupState::Done => None,
        }
    }
}
