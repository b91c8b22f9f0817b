//! Level table
//!
//! Each level is described by a [`LevelSpec`]: where its buildings come from,
//! how many enemies chase the player, and how many dynamic collectibles must
//! be picked up. Specs are read-only once a level is active.

use crate::models::{BuildingModel, EnemyModel};
use serde::{Deserialize, Serialize};

/// Level identifier (1-based)
pub type LevelId = u32;

/// Size-bucketed scale rule
///
/// Larger raw models get smaller scale factors. `thresholds` are strictly
/// decreasing; a model whose largest raw dimension exceeds `thresholds[i]`
/// (and no earlier threshold) gets `scales[i]`. Anything at or below the last
/// threshold gets the final entry of `scales`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleBuckets {
    pub thresholds: Vec<f32>,
    pub scales: Vec<f32>,
}

impl ScaleBuckets {
    const THRESHOLDS: [f32; 6] = [1000.0, 500.0, 200.0, 100.0, 50.0, 20.0];

    /// Buckets for the medieval town
    pub fn town() -> Self {
        Self {
            thresholds: Self::THRESHOLDS.to_vec(),
            scales: vec![2.0, 3.0, 5.0, 8.0, 12.0, 20.0, 40.0],
        }
    }

    /// Buckets for the monster houses
    pub fn monster_houses() -> Self {
        Self {
            thresholds: Self::THRESHOLDS.to_vec(),
            scales: vec![0.5, 0.75, 1.25, 2.0, 3.0, 5.0, 10.0],
        }
    }

    /// Scale factor for a model whose largest raw dimension is `max_dimension`
    pub fn scale_for(&self, max_dimension: f32) -> f32 {
        for (threshold, scale) in self.thresholds.iter().zip(&self.scales) {
            if max_dimension > *threshold {
                return *scale;
            }
        }
        self.scales.last().copied().unwrap_or(1.0)
    }
}

/// Procedural building population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingPopulation {
    pub models: Vec<BuildingModel>,
    pub instances_per_model: u32,
    pub scale: ScaleBuckets,
    /// Extra clearance between footprints
    pub min_separation: f32,
    /// Separation multiplier for the relaxed pass
    pub relaxed_factor: f32,
    /// Footprints are never smaller than this
    pub min_footprint_radius: f32,
    /// Annulus around the player that candidates are drawn from
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub random_yaw: bool,
}

impl BuildingPopulation {
    /// Total number of buildings requested
    pub fn total(&self) -> usize {
        self.models.len() * self.instances_per_model as usize
    }
}

/// Where a level's buildings come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BuildingSource {
    /// Placed-object records from the level data source
    Blocks {
        /// Uniform scale applied to every block model
        scale: f32,
        /// Recentre records on the origin when their centroid is farther than this
        recenter_beyond: f32,
    },
    /// Randomly placed from a model pool
    Procedural(BuildingPopulation),
}

/// Static description of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub id: LevelId,
    pub name: String,
    pub buildings: BuildingSource,
    pub enemy_count: u32,
    pub enemy_models: Vec<EnemyModel>,
    /// Dynamic collectibles required to complete the level
    pub dynamic_target: u32,
    /// Whether the level lays down a road decoration under its buildings
    pub has_road: bool,
}

impl LevelSpec {
    /// Enemy model for the `index`th enemy, round-robin over the pool
    pub fn enemy_model(&self, index: usize) -> Option<EnemyModel> {
        if self.enemy_models.is_empty() {
            return None;
        }
        Some(self.enemy_models[index % self.enemy_models.len()])
    }
}

/// Ordered set of levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTable {
    levels: Vec<LevelSpec>,
}

impl LevelTable {
    /// Build a table; levels are sorted by id
    pub fn new(mut levels: Vec<LevelSpec>) -> Self {
        levels.sort_by_key(|l| l.id);
        levels.dedup_by_key(|l| l.id);
        Self { levels }
    }

    pub fn get(&self, id: LevelId) -> Option<&LevelSpec> {
        self.levels.iter().find(|l| l.id == id)
    }

    pub fn get_mut(&mut self, id: LevelId) -> Option<&mut LevelSpec> {
        self.levels.iter_mut().find(|l| l.id == id)
    }

    /// First level, where sessions start
    pub fn first(&self) -> Option<LevelId> {
        self.levels.first().map(|l| l.id)
    }

    /// Level after `id`, `None` when `id` is the last
    pub fn next(&self, id: LevelId) -> Option<LevelId> {
        self.levels.iter().map(|l| l.id).find(|&next| next > id)
    }

    pub fn is_final(&self, id: LevelId) -> bool {
        self.levels.last().map(|l| l.id) == Some(id)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelSpec> {
        self.levels.iter()
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        let enemies = EnemyModel::ALL.to_vec();
        Self::new(vec![
            LevelSpec {
                id: 1,
                name: "Block Town".into(),
                buildings: BuildingSource::Blocks {
                    scale: 0.05,
                    recenter_beyond: 10.0,
                },
                enemy_count: 1,
                enemy_models: enemies.clone(),
                dynamic_target: 10,
                has_road: true,
            },
            LevelSpec {
                id: 2,
                name: "Old Town".into(),
                buildings: BuildingSource::Procedural(BuildingPopulation {
                    models: BuildingModel::TOWN.to_vec(),
                    instances_per_model: 15,
                    scale: ScaleBuckets::town(),
                    min_separation: 0.5,
                    relaxed_factor: 0.5,
                    min_footprint_radius: 1.0,
                    inner_radius: 15.0,
                    outer_radius: 500.0,
                    random_yaw: false,
                }),
                enemy_count: 3,
                enemy_models: enemies.clone(),
                dynamic_target: 10,
                has_road: false,
            },
            LevelSpec {
                id: 3,
                name: "Monster Village".into(),
                buildings: BuildingSource::Procedural(BuildingPopulation {
                    models: BuildingModel::MONSTER_HOUSES.to_vec(),
                    instances_per_model: 15,
                    scale: ScaleBuckets::monster_houses(),
                    min_separation: 5.0,
                    relaxed_factor: 0.6,
                    min_footprint_radius: 0.5,
                    inner_radius: 15.0,
                    outer_radius: 500.0,
                    random_yaw: true,
                }),
                enemy_count: 5,
                enemy_models: enemies,
                dynamic_target: 10,
                has_road: false,
            },
        ])
    }
}
