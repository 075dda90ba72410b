//! Tests for the encounter state machine.

#[cfg(test)]
mod tests {
    use crate::encounter::components::{
        EncounterConfig, EncounterPhase, EncounterState, SpawnRegion,
    };
    use crate::encounter::machine::{
        horizontal_distance, EncounterActor, EncounterPresenter, PlayerPose, TransitionCause,
    };
    use bevy::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const DT: f32 = 0.1;

    /// dwell=2.0, run=3.0, chase=4.0, catch=2.0, spawn fixed at origin
    fn scenario_config() -> EncounterConfig {
        EncounterConfig {
            spawn_region: SpawnRegion::new(Vec3::ZERO, 0.0, 0.0),
            min_dwell: 2.0,
            max_dwell: 2.0,
            run_duration: 3.0,
            chase_range: 4.0,
            catch_radius: 2.0,
            normal_speed: 0.5, // 1.5m per run, player stays > 4m away
            chase_speed: 7.0,
            appear_distance: 3.0,
            ..Default::default()
        }
    }

    fn far_player() -> PlayerPose {
        PlayerPose::new(Vec3::new(10.0, 0.0, 0.0), Vec3::NEG_Z)
    }

    fn new_actor(seed: u64) -> (EncounterActor, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let actor = EncounterActor::new(scenario_config(), Vec3::ZERO, &mut rng);
        (actor, rng)
    }

    /// Ticks Hidden → Roaming (20 × 0.1s)
    fn roaming_actor(seed: u64) -> (EncounterActor, ChaCha8Rng) {
        let (mut actor, mut rng) = new_actor(seed);
        for _ in 0..20 {
            actor.tick(DT, Some(far_player()), &mut rng);
        }
        assert_eq!(actor.phase(), EncounterPhase::Roaming);
        (actor, rng)
    }

    /// Roaming → Chasing with the player 3m east, looking east
    fn chasing_actor(seed: u64) -> (EncounterActor, ChaCha8Rng, PlayerPose) {
        let (mut actor, mut rng) = roaming_actor(seed);
        let player = PlayerPose::new(actor.position() + Vec3::new(3.0, 0.0, 0.0), Vec3::X);
        actor.tick(DT, Some(player), &mut rng);
        assert_eq!(actor.phase(), EncounterPhase::Chasing);
        (actor, rng, player)
    }

    fn assert_invariant(actor: &EncounterActor) {
        match actor.phase() {
            EncounterPhase::Hidden => assert!(!actor.is_visible()),
            EncounterPhase::Chasing => assert!(actor.is_visible()),
            EncounterPhase::Roaming => assert!(actor.is_visible()),
        }
    }

    #[test]
    fn test_starts_hidden() {
        let (actor, _) = new_actor(1);
        assert_eq!(actor.phase(), EncounterPhase::Hidden);
        assert!(!actor.is_visible());
        assert!(!actor.is_running());
    }

    #[test]
    fn test_dwell_then_roam_exactly_once() {
        let (mut actor, mut rng) = new_actor(1);
        let mut transitions = Vec::new();

        for tick in 0..20 {
            if let Some(t) = actor.tick(DT, Some(far_player()), &mut rng) {
                transitions.push((tick, t));
            }
            if tick < 19 {
                assert_eq!(actor.phase(), EncounterPhase::Hidden, "tick {}", tick);
            }
        }

        assert_eq!(transitions.len(), 1);
        let (tick, transition) = transitions[0];
        assert_eq!(tick, 19);
        assert_eq!(transition.from, EncounterPhase::Hidden);
        assert_eq!(transition.to, EncounterPhase::Roaming);
        assert_eq!(transition.cause, TransitionCause::DwellElapsed);
        assert!(actor.is_visible());
    }

    #[test]
    fn test_large_tick_transitions_once() {
        let (mut actor, mut rng) = new_actor(2);

        // One 10s tick: only Hidden → Roaming, no run expiry in the same tick
        let transition = actor.tick(10.0, Some(far_player()), &mut rng);
        assert_eq!(transition.map(|t| t.cause), Some(TransitionCause::DwellElapsed));
        assert_eq!(actor.state(), EncounterState::Roaming { run_elapsed: 0.0 });
    }

    #[test]
    fn test_scenario_roam_then_hide_again() {
        let (mut actor, mut rng) = roaming_actor(3);

        for tick in 0..29 {
            let transition = actor.tick(DT, Some(far_player()), &mut rng);
            assert!(transition.is_none(), "unexpected transition at roam tick {}", tick);
            assert!(horizontal_distance(actor.position(), far_player().position) > 4.0);
        }

        let transition = actor.tick(DT, Some(far_player()), &mut rng);
        assert_eq!(transition.map(|t| t.cause), Some(TransitionCause::RunElapsed));
        assert_eq!(actor.phase(), EncounterPhase::Hidden);
        assert!(!actor.is_visible());
    }

    #[test]
    fn test_roaming_moves_forward() {
        let (mut actor, mut rng) = roaming_actor(4);
        let start = actor.position();
        let forward = actor.forward();

        actor.tick(DT, Some(far_player()), &mut rng);

        let moved = actor.position() - start;
        assert!((moved.length() - 0.5 * DT).abs() < 1e-4);
        assert!(moved.normalize().dot(forward) > 0.999);
    }

    #[test]
    fn test_chase_same_tick_and_ambush_position() {
        let (mut actor, mut rng) = roaming_actor(5);
        let player = PlayerPose::new(actor.position() + Vec3::new(0.0, 0.0, 3.0), Vec3::X);

        let transition = actor.tick(DT, Some(player), &mut rng);

        assert_eq!(transition.map(|t| t.cause), Some(TransitionCause::PlayerInRange));
        assert_eq!(actor.phase(), EncounterPhase::Chasing);
        assert!(actor.is_visible());

        // Snapped 3m in front of the player's view, facing the player
        let expected = player.position + Vec3::X * 3.0;
        assert!(actor.position().abs_diff_eq(expected, 1e-4));
        assert!(horizontal_distance(actor.position(), player.position) <= 3.0 + 1e-4);
        assert!(actor.forward().abs_diff_eq(Vec3::NEG_X, 1e-4));
    }

    #[test]
    fn test_chase_ignores_vertical_offset() {
        let (mut actor, mut rng) = roaming_actor(6);
        let player = PlayerPose::new(actor.position() + Vec3::new(3.0, 50.0, 0.0), Vec3::Z);

        actor.tick(DT, Some(player), &mut rng);
        assert_eq!(actor.phase(), EncounterPhase::Chasing);
        // Appears at the player's feet height
        assert_eq!(actor.position().y, player.position.y);
    }

    #[test]
    fn test_ambush_with_vertical_view_falls_back() {
        let (mut actor, mut rng) = roaming_actor(7);
        let player = PlayerPose::new(actor.position() + Vec3::new(3.0, 0.0, 0.0), Vec3::NEG_Y);

        actor.tick(DT, Some(player), &mut rng);

        // Looking straight down: appear on the side the monster came from
        assert_eq!(actor.phase(), EncounterPhase::Chasing);
        let expected = player.position + Vec3::NEG_X * 3.0;
        assert!(actor.position().abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn test_chasing_closes_distance() {
        let (mut actor, mut rng, player) = chasing_actor(8);
        let before = horizontal_distance(actor.position(), player.position);

        let transition = actor.tick(DT, Some(player), &mut rng);

        assert!(transition.is_none());
        let after = horizontal_distance(actor.position(), player.position);
        assert!((before - after - 0.7).abs() < 1e-3, "before {} after {}", before, after);
    }

    #[test]
    fn test_catch_resolves_encounter() {
        let (mut actor, mut rng, _) = chasing_actor(9);
        let player = PlayerPose::new(actor.position() + Vec3::new(1.0, 0.0, 0.0), Vec3::X);

        let transition = actor.tick(DT, Some(player), &mut rng);

        assert_eq!(transition.map(|t| t.cause), Some(TransitionCause::PlayerCaught));
        assert_eq!(actor.phase(), EncounterPhase::Hidden);
        assert!(!actor.is_visible());
        assert!(!actor.is_running());
    }

    #[test]
    fn test_escape_returns_to_roaming() {
        let (mut actor, mut rng, _) = chasing_actor(10);
        let player = PlayerPose::new(actor.position() + Vec3::new(10.0, 0.0, 0.0), Vec3::X);

        let transition = actor.tick(DT, Some(player), &mut rng);

        assert_eq!(transition.map(|t| t.cause), Some(TransitionCause::PlayerEscaped));
        assert_eq!(actor.state(), EncounterState::Roaming { run_elapsed: 0.0 });
        // Re-entered Roaming through its entry action (teleport)
        assert_eq!(actor.position(), Vec3::ZERO);
    }

    #[test]
    fn test_missing_player_is_noop() {
        let (mut actor, mut rng, _) = chasing_actor(11);
        let state = actor.state();
        let position = actor.position();
        let facing = actor.facing();

        for _ in 0..100 {
            assert!(actor.tick(DT, None, &mut rng).is_none());
        }

        assert_eq!(actor.state(), state);
        assert_eq!(actor.position(), position);
        assert_eq!(actor.facing(), facing);

        let (mut hidden, mut rng) = new_actor(11);
        let before = hidden.state();
        hidden.tick(5.0, None, &mut rng);
        assert_eq!(hidden.state(), before);
    }

    #[test]
    fn test_infinite_config_does_not_panic() {
        let config = EncounterConfig {
            spawn_region: SpawnRegion::new(Vec3::ZERO, f32::INFINITY, f32::NEG_INFINITY),
            min_dwell: 0.5,
            max_dwell: f32::INFINITY,
            ..scenario_config()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut actor = EncounterActor::new(config, Vec3::ZERO, &mut rng);

        let mut reappeared = false;
        for _ in 0..100 {
            if let Some(transition) = actor.tick(DT, Some(far_player()), &mut rng) {
                if transition.cause == TransitionCause::DwellElapsed {
                    reappeared = true;
                    break;
                }
            }
        }

        assert!(reappeared);
        assert!(actor.position().is_finite());
        assert!(actor.config().max_dwell.is_finite());
    }

    #[test]
    fn test_invariant_holds_over_long_run() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let config = EncounterConfig {
            spawn_region: SpawnRegion::new(Vec3::ZERO, 6.0, 6.0),
            min_dwell: 0.5,
            max_dwell: 1.5,
            ..Default::default()
        };
        let mut actor = EncounterActor::new(config, Vec3::ZERO, &mut rng);
        let mut seen = std::collections::HashSet::new();

        for tick in 0..5000 {
            // Player walks a circle through the spawn region
            let angle = tick as f32 * 0.01;
            let player = PlayerPose::new(
                Vec3::new(angle.cos() * 5.0, 0.0, angle.sin() * 5.0),
                Vec3::new(-angle.sin(), 0.0, angle.cos()),
            );
            if let Some(t) = actor.tick(1.0 / 60.0, Some(player), &mut rng) {
                assert_ne!(t.from, t.to);
                seen.insert(t.cause);
            }
            assert_invariant(&actor);
        }

        assert!(seen.contains(&TransitionCause::DwellElapsed));
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let run = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut actor = EncounterActor::new(EncounterConfig::default(), Vec3::ZERO, &mut rng);
            let mut trace = Vec::new();
            for _ in 0..600 {
                actor.tick(1.0 / 60.0, Some(far_player()), &mut rng);
                trace.push((actor.phase(), actor.position()));
            }
            trace
        };

        assert_eq!(run(99), run(99));
    }

    #[derive(Default)]
    struct RecordingPresenter {
        visible: Option<bool>,
        running: Option<bool>,
        position: Option<Vec3>,
        facing: Option<Quat>,
    }

    impl EncounterPresenter for RecordingPresenter {
        fn set_visible(&mut self, visible: bool) {
            self.visible = Some(visible);
        }
        fn set_position(&mut self, position: Vec3) {
            self.position = Some(position);
        }
        fn set_facing(&mut self, facing: Quat) {
            self.facing = Some(facing);
        }
        fn set_running(&mut self, running: bool) {
            self.running = Some(running);
        }
    }

    #[test]
    fn test_present_pushes_pose_and_flags() {
        let (actor, _) = roaming_actor(13);
        let mut presenter = RecordingPresenter::default();

        actor.present(&mut presenter);

        assert_eq!(presenter.visible, Some(true));
        assert_eq!(presenter.running, Some(true));
        assert_eq!(presenter.position, Some(actor.position()));
        assert_eq!(presenter.facing, Some(actor.facing()));
    }
}
