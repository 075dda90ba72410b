//! Level systems: door trigger and controls popup timers.

use bevy::prelude::*;

use crate::encounter::horizontal_distance;
use crate::level::door::{Door, DoorEvent, DoorOutcome};
use crate::level::events::{DoorOpened, PopupCloseRequested, PopupHidden, PopupShown, SceneRequested};
use crate::level::outcome::GameOutcome;
use crate::level::popup::{ControlsPopup, PopupEvent};
use crate::player::Player;

/// System: door trigger → open → delayed outcome
///
/// `ShowWin` decides the level (`GameOutcome::Won`), `LoadScene` hands the
/// scene name to the host. Writes the door rotation to `Transform`.
pub fn tick_doors(
    mut doors: Query<(Entity, &mut Door, &mut Transform), Without<Player>>,
    players: Query<&Transform, (With<Player>, Without<Door>)>,
    time: Res<Time<Fixed>>,
    mut outcome: ResMut<GameOutcome>,
    mut opened: EventWriter<DoorOpened>,
    mut scenes: EventWriter<SceneRequested>,
) {
    let delta = time.delta_secs();
    let player_position = players.single().ok().map(|transform| transform.translation);

    for (entity, mut door, mut transform) in doors.iter_mut() {
        let in_range = player_position.is_some_and(|position| {
            horizontal_distance(transform.translation, position) <= door.config().trigger_radius
        });

        let event = door.tick(delta, in_range);
        transform.rotation = door.rotation();

        match event {
            Some(DoorEvent::StartedOpening) => {
                crate::log(&format!("🚪 Door {:?}: player touched the door, opening", entity));
            }
            Some(DoorEvent::Opened) => {
                crate::log(&format!("🚪 Door {:?}: fully open", entity));
                opened.write(DoorOpened { door: entity });
            }
            Some(DoorEvent::Fired(DoorOutcome::ShowWin)) => {
                if outcome.win() {
                    crate::log_info(&format!("🏆 Door {:?}: level won", entity));
                }
            }
            Some(DoorEvent::Fired(DoorOutcome::LoadScene { scene })) => {
                crate::log_info(&format!("🚪 Door {:?}: loading scene '{}'", entity, scene));
                scenes.write(SceneRequested { scene });
            }
            None => {}
        }
    }
}

/// System: controls popup sequence
///
/// Close requests are applied before the tick so the fade starts this frame.
pub fn tick_controls_popups(
    mut popups: Query<(Entity, &mut ControlsPopup)>,
    mut close_requests: EventReader<PopupCloseRequested>,
    time: Res<Time<Fixed>>,
    mut shown: EventWriter<PopupShown>,
    mut hidden: EventWriter<PopupHidden>,
) {
    let delta = time.delta_secs();
    let close = close_requests.read().count() > 0;

    for (entity, mut popup) in popups.iter_mut() {
        if close && popup.close_early() {
            crate::log(&format!("📋 Popup {:?}: closed early", entity));
        }

        match popup.tick(delta) {
            Some(PopupEvent::Shown) => {
                crate::log(&format!("📋 Popup {:?}: shown", entity));
                shown.write(PopupShown { popup: entity });
            }
            Some(PopupEvent::Hidden) => {
                crate::log(&format!("📋 Popup {:?}: hidden", entity));
                hidden.write(PopupHidden { popup: entity });
            }
            None => {}
        }
    }
}
