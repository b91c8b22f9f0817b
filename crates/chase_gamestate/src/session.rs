//! Play session state

use crate::level::LevelId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Points earned, in total and per level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsBreakdown {
    pub total: u32,
    pub by_level: BTreeMap<LevelId, u32>,
}

impl PointsBreakdown {
    pub fn level(&self, level: LevelId) -> u32 {
        self.by_level.get(&level).copied().unwrap_or(0)
    }
}

/// One play session, from start (or restart) to game over or completion
///
/// The per-level breakdown outlives each level so the end screen can
/// report it.
#[derive(Debug, Clone)]
pub struct GameSession {
    current_level: LevelId,
    points: PointsBreakdown,
    game_over: bool,
    /// Seconds of play since the session started
    elapsed: f64,
    completed_at: Option<f64>,
}

impl GameSession {
    pub fn new(first_level: LevelId) -> Self {
        Self {
            current_level: first_level,
            points: PointsBreakdown::default(),
            game_over: false,
            elapsed: 0.0,
            completed_at: None,
        }
    }

    pub fn current_level(&self) -> LevelId {
        self.current_level
    }

    pub fn cumulative_points(&self) -> u32 {
        self.points.total
    }

    pub fn points(&self) -> &PointsBreakdown {
        &self.points
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Advance the session clock; stops once the session has ended
    pub fn tick(&mut self, delta_time: f64) {
        if !self.game_over && self.completed_at.is_none() {
            self.elapsed += delta_time;
        }
    }

    /// Credit points earned in `level`
    pub fn award(&mut self, level: LevelId, points: u32) {
        self.points.total += points;
        *self.points.by_level.entry(level).or_insert(0) += points;
    }

    pub fn advance_to(&mut self, level: LevelId) {
        self.current_level = level;
    }

    pub fn mark_game_over(&mut self) {
        self.game_over = true;
    }

    pub fn mark_complete(&mut self) {
        if self.completed_at.is_none() {
            self.completed_at = Some(self.elapsed);
        }
    }

    /// Whole seconds from session start to completion
    pub fn game_time_secs(&self) -> Option<u64> {
        self.completed_at.map(|t| t.max(0.0).floor() as u64)
    }

    /// Back to a fresh session at `first_level`
    pub fn reset(&mut self, first_level: LevelId) {
        *self = Self::new(first_level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_award_tracks_breakdown() {
        let mut session = GameSession::new(1);
        session.award(1, 1);
        session.award(1, 1);
        session.advance_to(2);
        session.award(2, 1);

        assert_eq!(session.cumulative_points(), 3);
        assert_eq!(session.points().level(1), 2);
        assert_eq!(session.points().level(2), 1);
        assert_eq!(session.points().level(3), 0);
    }

    #[test]
    fn test_clock_stops_at_completion() {
        let mut session = GameSession::new(1);
        session.tick(61.7);
        session.mark_complete();
        session.tick(10.0);
        assert_eq!(session.game_time_secs(), Some(61));
    }

    #[test]
    fn test_reset() {
        let mut session = GameSession::new(1);
        session.advance_to(3);
        session.award(3, 4);
        session.mark_game_over();
        session.tick(5.0);

        session.reset(1);
        assert_eq!(session.current_level(), 1);
        assert_eq!(session.cumulative_points(), 0);
        assert!(!session.is_game_over());
        assert_eq!(session.elapsed(), 0.0);
    }
}
