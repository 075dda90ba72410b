//! Test helpers shared by the integration tests.
//!
//! `step_fixed` swaps event buffers every tick, so anything counted over
//! more than two ticks is collected by a recorder in `FixedPostUpdate`.

#![allow(dead_code)]

use bevy::prelude::*;

/// Every `E` written since `record` was called
#[derive(Resource)]
pub struct Recorded<E: Event>(pub Vec<E>);

fn collect<E: Event + Clone>(mut events: EventReader<E>, mut recorded: ResMut<Recorded<E>>) {
    recorded.0.extend(events.read().cloned());
}

/// Start recording `E` after every fixed step
pub fn record<E: Event + Clone>(app: &mut App) {
    app.insert_resource(Recorded::<E>(Vec::new()))
        .add_systems(FixedPostUpdate, collect::<E>);
}

/// Take what was recorded so far
pub fn take<E: Event + Clone>(app: &mut App) -> Vec<E> {
    std::mem::take(&mut app.world_mut().resource_mut::<Recorded<E>>().0)
}

/// Run `ticks` fixed steps
pub fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        dread_simulation::step_fixed(app);
    }
}
