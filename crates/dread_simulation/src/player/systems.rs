//! Player damage / death systems.

use bevy::prelude::*;

use crate::effects::ScreenFlash;
use crate::encounter::PlayerCaught;
use crate::level::GameOutcome;
use crate::player::components::{Health, Player};
use crate::player::events::{DamageRequest, DamageTaken, PlayerDied};

/// System: apply damage to the player
///
/// 1. Collect PlayerCaught (monster reached the player) + DamageRequest
/// 2. Subtract from Health (saturating)
/// 3. Hit flash while alive; death flash + PlayerDied + outcome Lost on 0
///
/// Damage to an already dead player is ignored.
pub fn apply_player_damage(
    mut caught_events: EventReader<PlayerCaught>,
    mut damage_requests: EventReader<DamageRequest>,
    mut players: Query<&mut Health, With<Player>>,
    mut damage_taken: EventWriter<DamageTaken>,
    mut player_died: EventWriter<PlayerDied>,
    mut flash: ResMut<ScreenFlash>,
    mut outcome: ResMut<GameOutcome>,
) {
    let hits: Vec<(Entity, u32)> = caught_events
        .read()
        .map(|event| (event.player, event.damage))
        .chain(damage_requests.read().map(|event| (event.target, event.amount)))
        .collect();

    for (target, amount) in hits {
        let Ok(mut health) = players.get_mut(target) else {
            crate::log_warning(&format!("Damage: target {:?} is not a player with Health", target));
            continue;
        };

        if !health.is_alive() {
            continue;
        }

        health.take_damage(amount);
        damage_taken.write(DamageTaken {
            target,
            amount,
            remaining: health.current,
        });

        if health.is_alive() {
            flash.flash_hit();
            crate::log(&format!(
                "💥 Player {:?} took {} damage ({}/{})",
                target, amount, health.current, health.max
            ));
        } else {
            flash.flash_death();
            player_died.write(PlayerDied { entity: target });
            outcome.lose();
            crate::log_info(&format!("☠️ Player {:?} died, game over", target));
        }
    }
}
