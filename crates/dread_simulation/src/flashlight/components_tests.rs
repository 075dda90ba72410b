//! Tests for flashlight pickup and toggle.

#[cfg(test)]
mod tests {
    use crate::flashlight::components::{
        Flashlight, FlashlightConfig, FlashlightHolder, PickupOutcome, ToggleOutcome,
    };
    use bevy::prelude::*;

    fn player() -> Entity {
        Entity::from_raw(7)
    }

    fn held_flashlight() -> Flashlight {
        let mut flashlight = Flashlight::on_floor(FlashlightConfig::default(), Vec3::ZERO);
        assert_eq!(flashlight.try_pickup(player(), Vec3::new(1.0, 0.0, 0.0)), PickupOutcome::PickedUp);
        flashlight
    }

    #[test]
    fn test_floor_flashlight_is_lit_and_unheld() {
        let mut flashlight = Flashlight::on_floor(FlashlightConfig::default(), Vec3::new(2.0, 0.0, 2.0));
        assert!(flashlight.is_lit());
        assert!(!flashlight.is_held());
        assert_eq!(flashlight.world_position(), Some(Vec3::new(2.0, 0.0, 2.0)));

        // Toggle presses ignored on the floor
        assert_eq!(flashlight.toggle(), ToggleOutcome::NotHeld);
        assert!(flashlight.is_lit());
    }

    #[test]
    fn test_pickup_transfers_holder_and_turns_off() {
        let flashlight = held_flashlight();

        assert_eq!(
            flashlight.holder(),
            FlashlightHolder::Player {
                owner: player(),
                slot_offset: FlashlightConfig::default().slot_offset,
            }
        );
        assert_eq!(flashlight.owner(), Some(player()));
        assert_eq!(flashlight.world_position(), None);
        assert!(!flashlight.is_lit());
    }

    #[test]
    fn test_pickup_out_of_range() {
        let mut flashlight = Flashlight::on_floor(FlashlightConfig::default(), Vec3::ZERO);
        assert_eq!(
            flashlight.try_pickup(player(), Vec3::new(5.0, 0.0, 0.0)),
            PickupOutcome::OutOfRange
        );
        assert!(!flashlight.is_held());
    }

    #[test]
    fn test_pickup_ignores_height() {
        let mut flashlight = Flashlight::on_floor(FlashlightConfig::default(), Vec3::ZERO);
        assert_eq!(
            flashlight.try_pickup(player(), Vec3::new(0.5, 1.8, 0.0)),
            PickupOutcome::PickedUp
        );
    }

    #[test]
    fn test_second_pickup_ignored() {
        let mut flashlight = held_flashlight();
        let holder = flashlight.holder();

        assert_eq!(
            flashlight.try_pickup(Entity::from_raw(99), Vec3::ZERO),
            PickupOutcome::AlreadyHeld
        );
        assert_eq!(flashlight.holder(), holder);
    }

    #[test]
    fn test_every_fifth_off_is_blocked() {
        let mut flashlight = held_flashlight();
        let mut blocked_at = Vec::new();
        let mut off_attempt = 0;

        for _ in 0..40 {
            if !flashlight.is_lit() {
                assert_eq!(flashlight.toggle(), ToggleOutcome::TurnedOn);
                continue;
            }

            off_attempt += 1;
            match flashlight.toggle() {
                ToggleOutcome::OffBlocked => {
                    assert!(flashlight.is_lit());
                    blocked_at.push(off_attempt);
                }
                ToggleOutcome::TurnedOff => assert!(!flashlight.is_lit()),
                other => panic!("unexpected {:?}", other),
            }
        }

        assert_eq!(&blocked_at[..3], &[5, 10, 15]);
    }

    #[test]
    fn test_block_disabled_with_zero() {
        let config = FlashlightConfig {
            block_every: 0,
            ..Default::default()
        };
        let mut flashlight = Flashlight::on_floor(config, Vec3::ZERO);
        flashlight.try_pickup(player(), Vec3::ZERO);

        for _ in 0..20 {
            assert_eq!(flashlight.toggle(), ToggleOutcome::TurnedOn);
            assert_eq!(flashlight.toggle(), ToggleOutcome::TurnedOff);
        }
    }
}
