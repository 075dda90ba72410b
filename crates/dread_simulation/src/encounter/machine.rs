//! Encounter state machine: Hidden → Roaming → Chasing → Hidden.
//!
//! Engine-agnostic core. The host calls `tick(dt, player, rng)` once per
//! simulation step and pushes the result to its renderer/animator through
//! an `EncounterPresenter`. The ECS systems in `encounter::systems` are one
//! such host.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use super::components::{
    EncounterConfig, EncounterPhase, EncounterPresentation, EncounterState, TIMER_EPSILON,
};

/// Player snapshot supplied by value each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPose {
    pub position: Vec3,
    /// Camera forward; only the horizontal part is used
    pub view_direction: Vec3,
}

impl PlayerPose {
    pub fn new(position: Vec3, view_direction: Vec3) -> Self {
        Self { position, view_direction }
    }
}

/// Why a transition happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionCause {
    /// Hidden → Roaming
    DwellElapsed,
    /// Roaming → Chasing
    PlayerInRange,
    /// Roaming → Hidden
    RunElapsed,
    /// Chasing → Hidden (encounter resolved)
    PlayerCaught,
    /// Chasing → Roaming
    PlayerEscaped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncounterTransition {
    pub from: EncounterPhase,
    pub to: EncounterPhase,
    pub cause: TransitionCause,
}

/// Output seam: visibility toggle, transform sink, animation trigger
pub trait EncounterPresenter {
    fn set_visible(&mut self, visible: bool);
    fn set_position(&mut self, position: Vec3);
    fn set_facing(&mut self, facing: Quat);
    fn set_running(&mut self, running: bool);
}

/// The monster. Owns its pose, state and timers exclusively.
#[derive(Component, Debug, Clone)]
#[require(Transform, EncounterPresentation)]
pub struct EncounterActor {
    config: EncounterConfig,
    state: EncounterState,
    position: Vec3,
    /// Yaw-only rotation; forward is `facing * -Z`
    facing: Quat,
    /// Duration of the next Hidden phase (drawn at Hidden → Roaming)
    next_dwell: f32,
}

impl EncounterActor {
    /// New actor in `Hidden`. The first dwell is drawn here.
    pub fn new<R: Rng + ?Sized>(config: EncounterConfig, position: Vec3, rng: &mut R) -> Self {
        let config = config.sanitized();
        let dwell = config.sample_dwell(rng);

        Self {
            config,
            state: EncounterState::Hidden { dwell_remaining: dwell },
            position,
            facing: Quat::IDENTITY,
            next_dwell: dwell,
        }
    }

    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    pub fn state(&self) -> EncounterState {
        self.state
    }

    pub fn phase(&self) -> EncounterPhase {
        self.state.phase()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn facing(&self) -> Quat {
        self.facing
    }

    pub fn forward(&self) -> Vec3 {
        self.facing * Vec3::NEG_Z
    }

    pub fn is_visible(&self) -> bool {
        self.state.is_visible()
    }

    /// Running animation plays whenever the monster is out
    pub fn is_running(&self) -> bool {
        self.state.is_visible()
    }

    /// Advance one step. `None` player ⇒ no-op (state, timers, pose kept).
    ///
    /// At most one transition per tick; the transitioning tick does not move.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        player: Option<PlayerPose>,
        rng: &mut R,
    ) -> Option<EncounterTransition> {
        let player = player?;
        let dt = dt.max(0.0);
        let from = self.state.phase();

        let cause = match self.state {
            EncounterState::Hidden { dwell_remaining } => {
                let remaining = dwell_remaining - dt;
                if remaining <= TIMER_EPSILON {
                    self.enter_roaming(rng);
                    Some(TransitionCause::DwellElapsed)
                } else {
                    self.state = EncounterState::Hidden { dwell_remaining: remaining };
                    None
                }
            }

            EncounterState::Roaming { run_elapsed } => {
                let distance = horizontal_distance(self.position, player.position);
                if distance <= self.config.chase_range {
                    // Same-tick reaction, chase trigger wins over run expiry
                    self.enter_chasing(&player);
                    Some(TransitionCause::PlayerInRange)
                } else {
                    let elapsed = run_elapsed + dt;
                    if elapsed >= self.config.run_duration - TIMER_EPSILON {
                        self.enter_hidden();
                        Some(TransitionCause::RunElapsed)
                    } else {
                        self.state = EncounterState::Roaming { run_elapsed: elapsed };
                        self.advance(self.config.normal_speed, dt);
                        None
                    }
                }
            }

            EncounterState::Chasing => {
                let distance = horizontal_distance(self.position, player.position);
                if distance <= self.config.catch_radius {
                    self.enter_hidden();
                    Some(TransitionCause::PlayerCaught)
                } else if distance > self.config.chase_range {
                    self.enter_roaming(rng);
                    Some(TransitionCause::PlayerEscaped)
                } else {
                    self.turn_toward(player.position, dt);
                    self.advance(self.config.chase_speed, dt);
                    None
                }
            }
        };

        cause.map(|cause| EncounterTransition {
            from,
            to: self.state.phase(),
            cause,
        })
    }

    /// Push pose + flags to the host
    pub fn present<P: EncounterPresenter + ?Sized>(&self, presenter: &mut P) {
        presenter.set_position(self.position);
        presenter.set_facing(self.facing);
        presenter.set_visible(self.is_visible());
        presenter.set_running(self.is_running());
    }

    fn enter_hidden(&mut self) {
        self.state = EncounterState::Hidden {
            dwell_remaining: self.next_dwell,
        };
    }

    // The only place (besides `new`) that draws random numbers
    fn enter_roaming<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.position = self.config.spawn_region.sample(rng);
        self.facing = Quat::from_rotation_y(rng.gen_range(0.0..TAU));
        self.next_dwell = self.config.sample_dwell(rng);
        self.state = EncounterState::Roaming { run_elapsed: 0.0 };
    }

    fn enter_chasing(&mut self, player: &PlayerPose) {
        let direction = [
            flatten(player.view_direction),
            flatten(self.position - player.position),
            flatten(self.forward()),
        ]
        .into_iter()
        .map(Vec3::normalize_or_zero)
        .find(|dir| *dir != Vec3::ZERO)
        .unwrap_or(Vec3::NEG_Z);

        let mut appear = player.position + direction * self.config.appear_distance;
        appear.y = player.position.y + self.config.appear_height_offset;
        self.position = appear;

        if let Some(rotation) = yaw_toward(player.position - appear) {
            self.facing = rotation;
        }
        self.state = EncounterState::Chasing;
    }

    fn turn_toward(&mut self, target: Vec3, dt: f32) {
        if let Some(look) = yaw_toward(target - self.position) {
            let factor = (dt * self.config.turn_rate).clamp(0.0, 1.0);
            self.facing = self.facing.slerp(look, factor);
        }
    }

    fn advance(&mut self, speed: f32, dt: f32) {
        self.position += flatten(self.forward()) * speed * dt;
    }
}

/// Distance on the XZ plane (height ignored)
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x, a.z).distance(Vec2::new(b.x, b.z))
}

fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Yaw rotation whose forward (-Z) points along `direction` on the XZ plane
pub fn yaw_toward(direction: Vec3) -> Option<Quat> {
    let flat = flatten(direction);
    if flat.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(Quat::from_rotation_y(f32::atan2(-flat.x, -flat.z)))
}

/// ECS-side presenter: writes `Transform` + `EncounterPresentation`
pub struct EcsPresenter<'a> {
    pub transform: &'a mut Transform,
    pub presentation: &'a mut EncounterPresentation,
}

impl EncounterPresenter for EcsPresenter<'_> {
    fn set_visible(&mut self, visible: bool) {
        self.presentation.visible = visible;
    }

    fn set_position(&mut self, position: Vec3) {
        self.transform.translation = position;
    }

    fn set_facing(&mut self, facing: Quat) {
        self.transform.rotation = facing;
    }

    fn set_running(&mut self, running: bool) {
        self.presentation.running = running;
    }
}
