//! Flashlight components: holder, toggle with the blocked-OFF twist.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct FlashlightConfig {
    /// Horizontal distance at which Interact picks the flashlight up
    pub pickup_radius: f32,
    /// Every N-th OFF attempt is refused (0 = never)
    pub block_every: u32,
    /// Local offset of the flashlight socket on the player
    pub slot_offset: Vec3,
    /// Lit while lying on the floor
    pub lit_on_floor: bool,
}

impl Default for FlashlightConfig {
    fn default() -> Self {
        Self {
            pickup_radius: 1.5,
            block_every: 5,
            slot_offset: Vec3::new(0.25, 1.4, -0.3),
            lit_on_floor: true,
        }
    }
}

impl FlashlightConfig {
    pub fn sanitized(&self) -> Self {
        Self {
            pickup_radius: self.pickup_radius.max(0.0),
            ..*self
        }
    }
}

/// Who holds the flashlight
///
/// Pickup reassigns this in one step: never both, never neither.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum FlashlightHolder {
    /// Lying in the level
    World { position: Vec3 },
    /// Parented to the player's socket
    Player { owner: Entity, slot_offset: Vec3 },
}

/// Result of `Flashlight::try_pickup`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupOutcome {
    PickedUp,
    OutOfRange,
    AlreadyHeld,
}

/// Result of `Flashlight::toggle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    TurnedOn,
    TurnedOff,
    /// OFF refused, light stays on
    OffBlocked,
    /// Nobody holds it
    NotHeld,
}

/// Flashlight
///
/// The mesh always stays visible; only `lit` changes.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Flashlight {
    config: FlashlightConfig,
    holder: FlashlightHolder,
    lit: bool,
    /// OFF attempts since the last blocked one
    off_attempts: u32,
}

impl Flashlight {
    /// Flashlight lying at `position`
    pub fn on_floor(config: FlashlightConfig, position: Vec3) -> Self {
        let config = config.sanitized();
        Self {
            lit: config.lit_on_floor,
            config,
            holder: FlashlightHolder::World { position },
            off_attempts: 0,
        }
    }

    pub fn config(&self) -> &FlashlightConfig {
        &self.config
    }

    pub fn holder(&self) -> FlashlightHolder {
        self.holder
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn off_attempts(&self) -> u32 {
        self.off_attempts
    }

    pub fn is_held(&self) -> bool {
        matches!(self.holder, FlashlightHolder::Player { .. })
    }

    pub fn owner(&self) -> Option<Entity> {
        match self.holder {
            FlashlightHolder::Player { owner, .. } => Some(owner),
            FlashlightHolder::World { .. } => None,
        }
    }

    /// Floor position (None once held)
    pub fn world_position(&self) -> Option<Vec3> {
        match self.holder {
            FlashlightHolder::World { position } => Some(position),
            FlashlightHolder::Player { .. } => None,
        }
    }

    /// Interact pressed by `player` standing at `player_position`
    ///
    /// On success the light is left OFF so the player toggles it on.
    pub fn try_pickup(&mut self, player: Entity, player_position: Vec3) -> PickupOutcome {
        let FlashlightHolder::World { position } = self.holder else {
            return PickupOutcome::AlreadyHeld;
        };

        if crate::encounter::horizontal_distance(position, player_position) > self.config.pickup_radius {
            return PickupOutcome::OutOfRange;
        }

        self.holder = FlashlightHolder::Player {
            owner: player,
            slot_offset: self.config.slot_offset,
        };
        self.lit = false;
        self.off_attempts = 0;
        PickupOutcome::PickedUp
    }

    /// Flashlight key pressed
    ///
    /// ON always succeeds. Every `block_every`-th OFF attempt is refused
    /// and the counter starts over; allowed OFFs keep counting.
    pub fn toggle(&mut self) -> ToggleOutcome {
        if !self.is_held() {
            return ToggleOutcome::NotHeld;
        }

        if !self.lit {
            self.lit = true;
            return ToggleOutcome::TurnedOn;
        }

        self.off_attempts += 1;
        if self.config.block_every > 0 && self.off_attempts >= self.config.block_every {
            self.off_attempts = 0;
            return ToggleOutcome::OffBlocked;
        }

        self.lit = false;
        ToggleOutcome::TurnedOff
    }
}
