//! Player components: control marker, view direction, health.

use bevy::prelude::*;

/// Marker for the player-controlled entity
///
/// Encounter systems read the pose of the single entity carrying it.
/// Host input systems write its `Transform` and `PlayerView`.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform, PlayerView, Health)]
pub struct Player;

/// Camera forward of the player (world space)
///
/// Falls back to `Transform::forward` when the entity has none.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PlayerView {
    pub direction: Vec3,
}

impl Default for PlayerView {
    fn default() -> Self {
        Self { direction: Vec3::NEG_Z }
    }
}

/// Player health
///
/// Invariant: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100) // Default 100 HP
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    /// Restore to full (level restart)
    pub fn reset(&mut self) {
        self.current = self.max;
    }
}
