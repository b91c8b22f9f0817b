//! World tuning
//!
//! Every gameplay constant lives here. Delays are in milliseconds of
//! simulated time.

use chase_ai::PursuitConfig;
use chase_gamestate::LevelTable;
use chase_physics::PhysicsConfig;
use serde::{Deserialize, Serialize};

/// Placement retry budget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Candidates drawn at full separation for buildings
    pub max_attempts: u32,
    /// Relaxed pass budget as a fraction of the strict one
    pub relaxed_budget_ratio: f32,
    /// Separation multiplier for the relaxed pass, unless the caller gives one
    pub relaxed_factor: f32,
    /// Building bodies are this fraction of the scaled model size
    pub body_shrink: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            max_attempts: 150,
            relaxed_budget_ratio: 1.0 / 3.0,
            relaxed_factor: 0.5,
            body_shrink: 0.9,
        }
    }
}

impl PlacementConfig {
    /// Attempts for the relaxed pass; always at least one and never more than `max_attempts`
    pub fn relaxed_attempts(&self, max_attempts: u32) -> u32 {
        let budget = (max_attempts as f32 * self.relaxed_budget_ratio).round() as u32;
        budget.clamp(1, max_attempts.max(1))
    }
}

/// Player body and movement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub spawn: [f32; 3],
    pub radius: f32,
    pub mass: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    /// Force along the heading at full forward input
    pub move_force: f32,
    /// Heading change at full turn input (radians per second)
    pub turn_rate: f32,
    /// Planar speed cap
    pub max_speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: [0.0, 1.0, 0.0],
            radius: 0.4,
            mass: 2.0,
            linear_damping: 0.05,
            angular_damping: 0.9,
            move_force: 40.0,
            turn_rate: 3.0,
            max_speed: 12.0,
        }
    }
}

/// Enemy bodies and spawn ring
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Distance from the player at spawn
    pub spawn_distance: f32,
    pub spawn_height: f32,
    /// Clearance from buildings and other enemies at spawn
    pub min_separation: f32,
    pub max_attempts: u32,
    pub mass: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub pursuit: PursuitConfig,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            spawn_distance: 100.0,
            spawn_height: 1.0,
            min_separation: 1.0,
            max_attempts: 50,
            mass: 2.0,
            linear_damping: 0.1,
            angular_damping: 0.9,
            pursuit: PursuitConfig::default(),
        }
    }
}

/// Collectible pickup and dynamic spawning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectibleConfig {
    /// Pickup happens closer than this
    pub pickup_radius: f32,
    /// ...and only while the player moves faster than this
    pub pickup_min_speed: f32,
    pub points_per_item: u32,
    pub spawn_height: f32,
    pub spawn_inner_radius: f32,
    pub spawn_outer_radius: f32,
    pub min_separation: f32,
    pub footprint_radius: f32,
    pub max_attempts: u32,
}

impl Default for CollectibleConfig {
    fn default() -> Self {
        Self {
            pickup_radius: 1.2,
            pickup_min_speed: 0.5,
            points_per_item: 1,
            spawn_height: 0.3,
            spawn_inner_radius: 80.0,
            spawn_outer_radius: 100.0,
            min_separation: 1.5,
            footprint_radius: 0.5,
            max_attempts: 50,
        }
    }
}

/// Level exit portal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Distance from the player when it opens
    pub distance: f32,
    /// Entry radius
    pub radius: f32,
    pub min_separation: f32,
    pub max_attempts: u32,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            distance: 12.0,
            radius: 3.0,
            min_separation: 1.0,
            max_attempts: 50,
        }
    }
}

/// Deferred step delays (ms)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StepDelays {
    /// Between teardown of a level and spawning the next
    pub settle: u64,
    pub collectible_after_start: u64,
    pub collectible_after_transition: u64,
    pub collectible_after_restart: u64,
    pub collectible_after_collection: u64,
    pub enemies_after_start: u64,
    pub enemies_after_transition: u64,
    pub enemies_after_restart: u64,
    pub pickup_after_start: u64,
    pub pickup_after_restart: u64,
}

impl Default for StepDelays {
    fn default() -> Self {
        Self {
            settle: 100,
            collectible_after_start: 1000,
            collectible_after_transition: 2000,
            collectible_after_restart: 1500,
            collectible_after_collection: 500,
            enemies_after_start: 2000,
            enemies_after_transition: 1500,
            enemies_after_restart: 1000,
            pickup_after_start: 2000,
            pickup_after_restart: 2000,
        }
    }
}

/// Ground plane under every level
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorConfig {
    pub half_extent: f32,
    pub thickness: f32,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            half_extent: 1000.0,
            thickness: 1.0,
        }
    }
}

/// Road under the level 1 block town
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadConfig {
    pub padding: f32,
    pub min_size: f32,
}

impl Default for RoadConfig {
    fn default() -> Self {
        Self {
            padding: 50.0,
            min_size: 200.0,
        }
    }
}

/// Everything the world needs to run a session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for every random choice in a session
    pub seed: u64,
    pub levels: LevelTable,
    pub physics: PhysicsConfig,
    pub placement: PlacementConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub collectible: CollectibleConfig,
    pub portal: PortalConfig,
    pub delays: StepDelays,
    pub floor: FloorConfig,
    pub road: RoadConfig,
}

impl WorldConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_levels(mut self, levels: LevelTable) -> Self {
        self.levels = levels;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relaxed_attempts() {
        let placement = PlacementConfig::default();
        assert_eq!(placement.relaxed_attempts(150), 50);
        assert_eq!(placement.relaxed_attempts(1), 1);
        assert_eq!(placement.relaxed_attempts(0), 1);
        assert!(placement.relaxed_attempts(50) < 50);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: WorldConfig = serde_json::from_str(r#"{"seed": 7, "portal": {"distance": 20.0}}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.portal.distance, 20.0);
        assert_eq!(config.portal.radius, 3.0);
        assert_eq!(config.levels.len(), 3);
        assert_eq!(config.delays.collectible_after_collection, 500);
    }
}
