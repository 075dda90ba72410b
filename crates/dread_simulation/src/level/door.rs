//! Exit door: opens when the player walks up, then wins the level or
//! requests the next scene after a delay.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::{CONFIG_EPSILON, TIMER_EPSILON};

/// Rotation within this many degrees of the target counts as open
pub const DOOR_OPEN_TOLERANCE_DEG: f32 = 1.0;

/// What happens once the door has been open for `delay` seconds
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Reflect)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DoorOutcome {
    /// Show the win panel (outcome → Won)
    #[default]
    ShowWin,
    /// Ask the host to load another scene
    LoadScene { scene: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct DoorConfig {
    /// Horizontal distance at which the player "touches" the door
    pub trigger_radius: f32,
    /// Yaw added to the closed rotation (degrees)
    pub open_angle: f32,
    /// Slerp rate (per second)
    pub open_speed: f32,
    /// Seconds between fully open and the outcome
    pub delay: f32,
    pub outcome: DoorOutcome,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            trigger_radius: 1.5,
            open_angle: 90.0,
            open_speed: 2.0,
            delay: 1.0,
            outcome: DoorOutcome::ShowWin,
        }
    }
}

impl DoorConfig {
    pub fn sanitized(&self) -> Self {
        Self {
            trigger_radius: self.trigger_radius.max(0.0),
            open_speed: self.open_speed.max(CONFIG_EPSILON),
            delay: self.delay.max(0.0),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum DoorState {
    Closed,
    Opening,
    /// Fully open, counting down to the outcome
    Open { delay_remaining: f32 },
    /// Outcome fired (terminal)
    Done,
}

/// Edge reported by `Door::tick`
#[derive(Debug, Clone, PartialEq)]
pub enum DoorEvent {
    StartedOpening,
    Opened,
    Fired(DoorOutcome),
}

/// Door state machine
///
/// Fires its outcome exactly once per level.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Door {
    config: DoorConfig,
    state: DoorState,
    rotation: Quat,
    target: Quat,
}

impl Door {
    /// `closed` is the door's rotation at level start
    pub fn new(config: DoorConfig, closed: Quat) -> Self {
        let config = config.sanitized();
        let target = Quat::from_rotation_y(config.open_angle.to_radians()) * closed;
        Self {
            config,
            state: DoorState::Closed,
            rotation: closed,
            target,
        }
    }

    pub fn config(&self) -> &DoorConfig {
        &self.config
    }

    pub fn state(&self) -> DoorState {
        self.state
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn is_done(&self) -> bool {
        self.state == DoorState::Done
    }

    /// Step the door
    ///
    /// `player_in_range` only matters while closed: once opening, the door
    /// finishes regardless of where the player goes.
    pub fn tick(&mut self, dt: f32, player_in_range: bool) -> Option<DoorEvent> {
        match self.state {
            DoorState::Closed => {
                if player_in_range {
                    self.state = DoorState::Opening;
                    return Some(DoorEvent::StartedOpening);
                }
                None
            }
            DoorState::Opening => {
                let t = (dt * self.config.open_speed).clamp(0.0, 1.0);
                self.rotation = self.rotation.slerp(self.target, t);

                if self.rotation.angle_between(self.target).to_degrees() < DOOR_OPEN_TOLERANCE_DEG {
                    self.state = DoorState::Open {
                        delay_remaining: self.config.delay,
                    };
                    return Some(DoorEvent::Opened);
                }
                None
            }
            DoorState::Open { delay_remaining } => {
                let remaining = delay_remaining - dt;
                if remaining <= TIMER_EPSILON {
                    self.state = DoorState::Done;
                    return Some(DoorEvent::Fired(self.config.outcome.clone()));
                }
                self.state = DoorState::Open {
                    delay_remaining: remaining,
                };
                None
            }
            DoorState::Done => None,
        }
    }
}
