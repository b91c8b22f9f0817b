//! Events the world publishes for the presentation layer

use chase_core::EntityId;
use chase_gamestate::{CollectibleKind, LevelId, PointsBreakdown, ScorePayload};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A level became active
    LevelChanged { level: LevelId },
    /// A collectible was picked up
    Collected {
        id: EntityId,
        level: LevelId,
        kind: CollectibleKind,
        level_points: u32,
        cumulative_points: u32,
    },
    /// The level's exit opened
    PortalOpened { level: LevelId, position: [f32; 3] },
    /// An enemy caught the player
    GameOver { level: LevelId, points: PointsBreakdown },
    /// The final portal was entered
    GameComplete { payload: ScorePayload, points: PointsBreakdown },
}
