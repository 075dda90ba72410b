//! Effect systems. Run every fixed tick, even after the level is decided.

use bevy::prelude::*;

use crate::effects::breathing::SprintBreathing;
use crate::effects::screen_flash::ScreenFlash;
use crate::effects::sprint_shake::SprintShake;
use crate::input::SprintInput;

/// System: advance the screen flash timeline
pub fn tick_screen_flash(time: Res<Time<Fixed>>, mut flash: ResMut<ScreenFlash>) {
    if flash.is_active() {
        flash.tick(time.delta_secs());
    }
}

/// System: sprint shake → camera Transform (base pose + offsets)
pub fn apply_sprint_shake(
    sprint: Res<SprintInput>,
    time: Res<Time<Fixed>>,
    mut cameras: Query<(&mut SprintShake, &mut Transform)>,
) {
    let delta = time.delta_secs();

    for (mut shake, mut transform) in cameras.iter_mut() {
        shake.update(sprint.held, delta);
        let (translation, rotation) = shake.pose();
        transform.translation = translation;
        transform.rotation = rotation;
    }
}

/// System: sprint breathing volume
pub fn update_sprint_breathing(
    sprint: Res<SprintInput>,
    time: Res<Time<Fixed>>,
    mut breathers: Query<(Entity, &mut SprintBreathing)>,
) {
    let delta = time.delta_secs();

    for (entity, mut breathing) in breathers.iter_mut() {
        let running = sprint.is_running(breathing.config().move_speed_threshold);
        if breathing.update(running, delta) {
            crate::log(&format!(
                "😮‍💨 Breathing {:?}: {}",
                entity,
                if breathing.playing() { "start" } else { "stop" }
            ));
        }
    }
}
