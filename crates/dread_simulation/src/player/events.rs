//! Player events

use bevy::prelude::*;

/// Request to damage an entity with `Health` (hazards, scripted events)
#[derive(Event, Debug, Clone)]
pub struct DamageRequest {
    pub target: Entity,
    pub amount: u32,
}

/// Damage was applied to the player
#[derive(Event, Debug, Clone)]
pub struct DamageTaken {
    pub target: Entity,
    pub amount: u32,
    pub remaining: u32,
}

/// Player health reached 0 (sent once per life)
#[derive(Event, Debug, Clone)]
pub struct PlayerDied {
    pub entity: Entity,
}
