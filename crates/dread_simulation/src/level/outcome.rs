//! Level outcome (win / lose) and the run condition gameplay systems use.

use bevy::prelude::*;

/// Level result
///
/// Anything other than `Playing` freezes encounter, flashlight and door
/// systems. Effects and UI timers keep running.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Resource)]
pub enum GameOutcome {
    #[default]
    Playing,
    Lost,
    Won,
}

impl GameOutcome {
    pub fn is_playing(&self) -> bool {
        matches!(self, GameOutcome::Playing)
    }

    /// Player died. Returns `false` if the level was already decided.
    pub fn lose(&mut self) -> bool {
        self.decide(GameOutcome::Lost)
    }

    /// Player reached the exit. Returns `false` if the level was already decided.
    pub fn win(&mut self) -> bool {
        self.decide(GameOutcome::Won)
    }

    /// Back to gameplay (restart button); the host reloads the scene.
    pub fn restart(&mut self) {
        *self = GameOutcome::Playing;
    }

    fn decide(&mut self, outcome: GameOutcome) -> bool {
        if !self.is_playing() {
            return false;
        }
        *self = outcome;
        true
    }
}

/// Run condition: level still undecided
pub fn gameplay_active(outcome: Option<Res<GameOutcome>>) -> bool {
    outcome.is_none_or(|outcome| outcome.is_playing())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_decision_wins() {
        let mut outcome = GameOutcome::default();
        assert!(outcome.is_playing());

        assert!(outcome.lose());
        assert!(!outcome.win());
        assert_eq!(outcome, GameOutcome::Lost);
    }

    #[test]
    fn test_restart_returns_to_playing() {
        let mut outcome = GameOutcome::Won;
        outcome.restart();
        assert!(outcome.is_playing());
        assert!(outcome.lose());
    }
}
