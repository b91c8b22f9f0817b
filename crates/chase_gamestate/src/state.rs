//! Level state machine
//!
//! ```text
//! Loading -> LevelActive(n) -> Transitioning(n -> n+1) -> LevelActive(n+1) -> ... -> GameComplete
//!                  |                  |
//!                  +------------------+--> GameOver
//! GameOver | GameComplete --restart--> Loading
//! ```
//!
//! A transition moves through three phases: the portal is open, the old level
//! is being torn down, the new level is being spawned. Each phase only
//! advances on an explicit signal, so two teardown/spawn sequences can never
//! overlap and a second portal can never open for the same level.

use crate::level::LevelId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Phase of a level transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionPhase {
    /// Portal spawned, waiting for the player to enter it
    PortalOpen,
    /// Old level entities are being removed
    TearingDown,
    /// Next level is being built
    Spawning,
}

/// Level states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LevelState {
    /// Session is being prepared
    #[default]
    Loading,
    /// Playing a level
    LevelActive(LevelId),
    /// Leaving `from`; `to` is `None` when `from` is the final level
    Transitioning {
        from: LevelId,
        to: Option<LevelId>,
        phase: TransitionPhase,
    },
    /// Caught by an enemy
    GameOver { level: LevelId },
    /// Final portal entered
    GameComplete,
}

impl LevelState {
    /// Whether per-tick gameplay (movement, pursuit, pickups) runs
    pub fn is_playing(&self) -> bool {
        matches!(
            self,
            Self::LevelActive(_)
                | Self::Transitioning {
                    phase: TransitionPhase::PortalOpen,
                    ..
                }
        )
    }

    /// Game over or complete; only a restart leaves these
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::GameOver { .. } | Self::GameComplete)
    }

    /// The level whose entities are currently live
    pub fn level(&self) -> Option<LevelId> {
        match *self {
            Self::LevelActive(n) => Some(n),
            Self::Transitioning { from, .. } => Some(from),
            Self::GameOver { level } => Some(level),
            Self::Loading | Self::GameComplete => None,
        }
    }
}

/// Rejected state change
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("'{event}' is not valid in state {state:?}")]
    Illegal { state: LevelState, event: &'static str },
    #[error("portal already open for level {0}")]
    PortalAlreadyOpen(LevelId),
}

/// Recorded state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransition {
    pub from: LevelState,
    pub to: LevelState,
}

/// Drives level progression
///
/// Every event method either moves the machine or returns an error and
/// leaves it untouched; callers log the error and carry on.
#[derive(Debug, Default)]
pub struct LevelStateMachine {
    state: LevelState,
    history: Vec<StateTransition>,
}

impl LevelStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> LevelState {
        self.state
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, LevelState::Transitioning { .. })
    }

    fn set(&mut self, to: LevelState) {
        let transition = StateTransition { from: self.state, to };
        log::info!("Level state {:?} -> {:?}", transition.from, transition.to);
        self.state = to;
        self.history.push(transition);
    }

    fn illegal(&self, event: &'static str) -> TransitionError {
        TransitionError::Illegal {
            state: self.state,
            event,
        }
    }

    /// Loading finished; start playing `level`
    pub fn begin(&mut self, level: LevelId) -> Result<(), TransitionError> {
        match self.state {
            LevelState::Loading => {
                self.set(LevelState::LevelActive(level));
                Ok(())
            }
            _ => Err(self.illegal("begin")),
        }
    }

    /// The active level's completion conditions hold; open its portal
    ///
    /// `next` is the following level, `None` for the final one.
    pub fn on_level_complete(&mut self, next: Option<LevelId>) -> Result<(), TransitionError> {
        match self.state {
            LevelState::LevelActive(from) => {
                self.set(LevelState::Transitioning {
                    from,
                    to: next,
                    phase: TransitionPhase::PortalOpen,
                });
                Ok(())
            }
            LevelState::Transitioning { from, .. } => Err(TransitionError::PortalAlreadyOpen(from)),
            _ => Err(self.illegal("level complete")),
        }
    }

    /// Player entered the portal
    ///
    /// Returns the new state: teardown of the old level, or game complete
    /// when there is no next level.
    pub fn on_portal_entered(&mut self) -> Result<LevelState, TransitionError> {
        match self.state {
            LevelState::Transitioning {
                from,
                to,
                phase: TransitionPhase::PortalOpen,
            } => {
                let next = match to {
                    Some(_) => LevelState::Transitioning {
                        from,
                        to,
                        phase: TransitionPhase::TearingDown,
                    },
                    None => LevelState::GameComplete,
                };
                self.set(next);
                Ok(next)
            }
            _ => Err(self.illegal("portal entered")),
        }
    }

    /// Old level is fully removed
    pub fn on_teardown_complete(&mut self) -> Result<(), TransitionError> {
        match self.state {
            LevelState::Transitioning {
                from,
                to,
                phase: TransitionPhase::TearingDown,
            } => {
                self.set(LevelState::Transitioning {
                    from,
                    to,
                    phase: TransitionPhase::Spawning,
                });
                Ok(())
            }
            _ => Err(self.illegal("teardown complete")),
        }
    }

    /// Next level is built; returns its id
    pub fn on_level_spawned(&mut self) -> Result<LevelId, TransitionError> {
        match self.state {
            LevelState::Transitioning {
                to: Some(to),
                phase: TransitionPhase::Spawning,
                ..
            } => {
                self.set(LevelState::LevelActive(to));
                Ok(to)
            }
            _ => Err(self.illegal("level spawned")),
        }
    }

    /// An enemy caught the player
    pub fn on_enemy_collision(&mut self) -> Result<(), TransitionError> {
        if !self.state.is_playing() {
            return Err(self.illegal("enemy collision"));
        }
        let level = self.state.level().unwrap_or_default();
        self.set(LevelState::GameOver { level });
        Ok(())
    }

    /// Back to loading after game over or completion
    pub fn restart(&mut self) -> Result<(), TransitionError> {
        if !self.state.is_terminal() {
            return Err(self.illegal("restart"));
        }
        self.set(LevelState::Loading);
        Ok(())
    }

    pub fn history(&self) -> &[StateTransition] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(level: LevelId) -> LevelStateMachine {
        let mut machine = LevelStateMachine::new();
        machine.begin(level).unwrap();
        machine
    }

    #[test]
    fn test_full_progression() {
        let mut machine = active(1);
        machine.on_level_complete(Some(2)).unwrap();
        assert!(machine.current().is_playing());
        assert!(machine.is_transitioning());

        let state = machine.on_portal_entered().unwrap();
        assert!(matches!(
            state,
            LevelState::Transitioning {
                phase: TransitionPhase::TearingDown,
                ..
            }
        ));
        assert!(!machine.current().is_playing());

        machine.on_teardown_complete().unwrap();
        assert_eq!(machine.on_level_spawned().unwrap(), 2);
        assert_eq!(machine.current(), LevelState::LevelActive(2));
        assert!(!machine.is_transitioning());
    }

    #[test]
    fn test_final_portal_completes_game() {
        let mut machine = active(3);
        machine.on_level_complete(None).unwrap();
        assert_eq!(machine.on_portal_entered().unwrap(), LevelState::GameComplete);
        assert!(machine.current().is_terminal());
    }

    #[test]
    fn test_second_portal_rejected() {
        let mut machine = active(1);
        machine.on_level_complete(Some(2)).unwrap();
        let before = machine.current();
        assert_eq!(
            machine.on_level_complete(Some(2)),
            Err(TransitionError::PortalAlreadyOpen(1))
        );
        assert_eq!(machine.current(), before);
    }

    #[test]
    fn test_no_overlapping_transitions() {
        let mut machine = active(1);
        machine.on_level_complete(Some(2)).unwrap();
        machine.on_portal_entered().unwrap();
        assert!(machine.on_portal_entered().is_err());
        assert!(machine.on_level_spawned().is_err(), "spawn must wait for teardown");
    }

    #[test]
    fn test_game_over_and_restart() {
        let mut machine = active(2);
        assert!(machine.restart().is_err());

        machine.on_enemy_collision().unwrap();
        assert_eq!(machine.current(), LevelState::GameOver { level: 2 });
        assert!(machine.on_enemy_collision().is_err());
        assert!(machine.on_level_complete(Some(3)).is_err());

        machine.restart().unwrap();
        assert_eq!(machine.current(), LevelState::Loading);
        machine.begin(1).unwrap();
    }

    #[test]
    fn test_enemy_collision_while_portal_open() {
        let mut machine = active(1);
        machine.on_level_complete(Some(2)).unwrap();
        machine.on_enemy_collision().unwrap();
        assert_eq!(machine.current(), LevelState::GameOver { level: 1 });
    }

    #[test]
    fn test_transitions_recorded() {
        let mut machine = active(1);
        machine.on_enemy_collision().unwrap();
        let history = machine.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].from, LevelState::Loading);
        assert_eq!(history[1].to, LevelState::GameOver { level: 1 });
    }
}
