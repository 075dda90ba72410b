//! Encounter tick system (FSM step + presentation sync).

use bevy::prelude::*;

use crate::encounter::components::EncounterPresentation;
use crate::encounter::events::{EncounterTransitioned, PlayerCaught};
use crate::encounter::machine::{
    EcsPresenter, EncounterActor, PlayerPose, TransitionCause,
};
use crate::player::{Player, PlayerView};
use crate::DeterministicRng;

/// System: sync freshly spawned actors to their presentation
///
/// A Hidden actor is written once so the host never shows a default mesh
/// at the origin before the first tick.
pub fn present_spawned_encounters(
    mut actors: Query<
        (&EncounterActor, &mut Transform, &mut EncounterPresentation),
        Added<EncounterActor>,
    >,
) {
    for (actor, mut transform, mut presentation) in actors.iter_mut() {
        actor.present(&mut EcsPresenter {
            transform: &mut *transform,
            presentation: &mut *presentation,
        });
    }
}

/// System: encounter FSM step
///
/// Reads the single `Player` pose, ticks every actor with the fixed delta,
/// writes Transform/EncounterPresentation back and emits events.
/// No player (or several) ⇒ every actor holds its state this tick.
pub fn tick_encounters(
    mut actors: Query<
        (Entity, &mut EncounterActor, &mut Transform, &mut EncounterPresentation),
        Without<Player>,
    >,
    player_query: Query<(Entity, &Transform, Option<&PlayerView>), (With<Player>, Without<EncounterActor>)>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
    mut transitions: EventWriter<EncounterTransitioned>,
    mut caught: EventWriter<PlayerCaught>,
) {
    let delta = time.delta_secs();

    let player = player_query.single().ok().map(|(entity, transform, view)| {
        let view_direction = view
            .map(|v| v.direction)
            .unwrap_or_else(|| transform.forward().as_vec3());
        (entity, PlayerPose::new(transform.translation, view_direction))
    });

    let Some((player_entity, pose)) = player else {
        return;
    };

    for (entity, mut actor, mut transform, mut presentation) in actors.iter_mut() {
        let transition = actor.tick(delta, Some(pose), &mut rng.rng);

        actor.present(&mut EcsPresenter {
            transform: &mut *transform,
            presentation: &mut *presentation,
        });

        let Some(transition) = transition else {
            continue;
        };

        crate::log(&format!(
            "👹 Encounter {:?}: {:?} → {:?} ({:?}) at {:.2?}",
            entity,
            transition.from,
            transition.to,
            transition.cause,
            actor.position()
        ));

        if transition.cause == TransitionCause::PlayerCaught {
            caught.write(PlayerCaught {
                monster: entity,
                player: player_entity,
                damage: actor.config().catch_damage,
            });
        }

        transitions.write(EncounterTransitioned {
            monster: entity,
            from: transition.from,
            to: transition.to,
            cause: transition.cause,
        });
    }
}
