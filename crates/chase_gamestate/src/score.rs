//! End-of-run score payload

use crate::session::PointsBreakdown;
use serde::{Deserialize, Serialize};

/// Points per level as submitted to the score service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPoints {
    pub level1: u32,
    pub level2: u32,
    pub level3: u32,
}

/// `{ totalPoints, pointsByLevel: { level1, level2, level3 }, gameTime? }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorePayload {
    pub total_points: u32,
    pub points_by_level: LevelPoints,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_time: Option<u64>,
}

impl ScorePayload {
    pub fn from_breakdown(points: &PointsBreakdown, game_time: Option<u64>) -> Self {
        Self {
            total_points: points.total,
            points_by_level: LevelPoints {
                level1: points.level(1),
                level2: points.level(2),
                level3: points.level(3),
            },
            game_time,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let mut points = PointsBreakdown::default();
        points.total = 14;
        points.by_level.insert(1, 4);
        points.by_level.insert(2, 10);

        let payload = ScorePayload::from_breakdown(&points, Some(95));
        let value: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
        assert_eq!(value["totalPoints"], 14);
        assert_eq!(value["pointsByLevel"]["level1"], 4);
        assert_eq!(value["pointsByLevel"]["level3"], 0);
        assert_eq!(value["gameTime"], 95);
    }

    #[test]
    fn test_game_time_optional() {
        let payload = ScorePayload::from_breakdown(&PointsBreakdown::default(), None);
        let json = payload.to_json().unwrap();
        assert!(!json.contains("gameTime"));

        let back: ScorePayload = serde_json::from_str(r#"{"totalPoints":1,"pointsByLevel":{"level1":1,"level2":0,"level3":0}}"#).unwrap();
        assert_eq!(back.game_time, None);
    }
}
