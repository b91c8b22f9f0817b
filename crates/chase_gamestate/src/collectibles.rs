//! Collection tracking
//!
//! The registry is the only writer of [`LevelProgress`]. Every collectible
//! instance is registered before it can be collected, and collecting the same
//! instance twice is a logged no-op.

use crate::level::LevelId;
use chase_core::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Role of a scripted collectible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    #[serde(rename = "default")]
    Ordinary,
    #[serde(rename = "finalPrize")]
    FinalPrize,
}

impl Role {
    /// Parse the wire value; anything unrecognised counts as ordinary
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some("finalPrize") => Role::FinalPrize,
            _ => Role::Ordinary,
        }
    }
}

/// How a collectible came to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectibleKind {
    /// Loaded from level data
    Scripted(Role),
    /// Spawned near the player at runtime
    Dynamic,
}

/// A scripted collectible as read from level data
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedCollectible {
    pub id: EntityId,
    pub name: String,
    pub level: LevelId,
    pub role: Role,
    pub position: [f32; 3],
}

/// Scripted totals for one level, by role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptedCounts {
    pub ordinary: u32,
    pub final_prize: u32,
}

/// Per-level counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub ordinary_total: u32,
    pub ordinary_collected: u32,
    pub final_prize_total: u32,
    pub final_prize_collected: bool,
    pub dynamic_target: u32,
    pub dynamic_collected: u32,
    /// Points earned in this level
    pub points: u32,
}

impl LevelProgress {
    /// All three completion conditions hold at once
    pub fn is_complete(&self) -> bool {
        let ordinary_done = self.ordinary_collected >= self.ordinary_total;
        let prize_done = self.final_prize_collected || self.final_prize_total == 0;
        let dynamic_done = self.dynamic_collected >= self.dynamic_target;
        ordinary_done && prize_done && dynamic_done
    }

    /// Dynamic collectibles still needed
    pub fn dynamic_remaining(&self) -> u32 {
        self.dynamic_target.saturating_sub(self.dynamic_collected)
    }
}

/// Outcome of a successful collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionRecord {
    pub id: EntityId,
    pub level: LevelId,
    pub kind: CollectibleKind,
    /// Points awarded for this pickup
    pub points: u32,
    /// Level total after this pickup
    pub level_points: u32,
    /// Session total after this pickup
    pub cumulative_points: u32,
}

#[derive(Debug, Clone, Copy)]
struct Instance {
    level: LevelId,
    kind: CollectibleKind,
    collected: bool,
}

/// Tracks collection state for every level
#[derive(Debug, Clone)]
pub struct CollectibleRegistry {
    points_per_item: u32,
    progress: BTreeMap<LevelId, LevelProgress>,
    instances: HashMap<EntityId, Instance>,
    cumulative_points: u32,
}

impl CollectibleRegistry {
    /// Create a registry awarding `points_per_item` per pickup
    pub fn new(points_per_item: u32) -> Self {
        Self {
            points_per_item,
            progress: BTreeMap::new(),
            instances: HashMap::new(),
            cumulative_points: 0,
        }
    }

    pub fn points_per_item(&self) -> u32 {
        self.points_per_item
    }

    /// Register the scripted items that belong to `level`
    ///
    /// `items` may hold every level's records; only those declared for
    /// `level` are taken. Re-registering an instance id is ignored.
    pub fn load_scripted(&mut self, level: LevelId, items: &[ScriptedCollectible]) -> ScriptedCounts {
        let mut counts = ScriptedCounts::default();

        for item in items.iter().filter(|i| i.level == level) {
            if self.instances.contains_key(&item.id) {
                log::debug!("Collectible {} already registered", item.id);
                continue;
            }
            self.instances.insert(
                item.id,
                Instance {
                    level,
                    kind: CollectibleKind::Scripted(item.role),
                    collected: false,
                },
            );
            match item.role {
                Role::Ordinary => counts.ordinary += 1,
                Role::FinalPrize => counts.final_prize += 1,
            }
        }

        let progress = self.progress.entry(level).or_default();
        progress.ordinary_total += counts.ordinary;
        progress.final_prize_total += counts.final_prize;

        log::info!(
            "Level {}: {} ordinary collectibles, {} final prize",
            level,
            progress.ordinary_total,
            progress.final_prize_total
        );
        counts
    }

    /// Set how many dynamic collectibles complete `level`
    pub fn set_dynamic_target(&mut self, level: LevelId, target: u32) {
        self.progress.entry(level).or_default().dynamic_target = target;
    }

    /// Register a freshly spawned dynamic collectible
    pub fn register_dynamic(&mut self, level: LevelId, id: EntityId) -> bool {
        if self.instances.contains_key(&id) {
            log::warn!("Dynamic collectible {} registered twice", id);
            return false;
        }
        self.instances.insert(
            id,
            Instance {
                level,
                kind: CollectibleKind::Dynamic,
                collected: false,
            },
        );
        true
    }

    /// Count a pickup
    ///
    /// Returns `None`, and changes nothing, for unknown or already collected
    /// instances.
    pub fn record_collection(&mut self, id: EntityId) -> Option<CollectionRecord> {
        let Some(instance) = self.instances.get_mut(&id) else {
            log::warn!("Ignoring collection of unregistered collectible {}", id);
            return None;
        };
        if instance.collected {
            log::warn!("Ignoring second collection of collectible {}", id);
            return None;
        }
        instance.collected = true;
        let Instance { level, kind, .. } = *instance;

        let progress = self.progress.entry(level).or_default();
        match kind {
            CollectibleKind::Scripted(Role::Ordinary) => progress.ordinary_collected += 1,
            CollectibleKind::Scripted(Role::FinalPrize) => progress.final_prize_collected = true,
            CollectibleKind::Dynamic => progress.dynamic_collected += 1,
        }
        progress.points += self.points_per_item;
        self.cumulative_points += self.points_per_item;

        Some(CollectionRecord {
            id,
            level,
            kind,
            points: self.points_per_item,
            level_points: progress.points,
            cumulative_points: self.cumulative_points,
        })
    }

    pub fn is_collected(&self, id: EntityId) -> bool {
        self.instances.get(&id).is_some_and(|i| i.collected)
    }

    pub fn is_registered(&self, id: EntityId) -> bool {
        self.instances.contains_key(&id)
    }

    /// Whether every completion condition of `level` holds
    pub fn is_level_complete(&self, level: LevelId) -> bool {
        self.progress.get(&level).is_some_and(LevelProgress::is_complete)
    }

    pub fn progress(&self, level: LevelId) -> Option<&LevelProgress> {
        self.progress.get(&level)
    }

    pub fn cumulative_points(&self) -> u32 {
        self.cumulative_points
    }

    /// Zero every counter of `level` and forget its instances
    ///
    /// The dynamic target survives; it is level configuration, not progress.
    pub fn reset_for_level(&mut self, level: LevelId) {
        let dynamic_target = self.progress.get(&level).map_or(0, |p| p.dynamic_target);
        self.progress.insert(
            level,
            LevelProgress {
                dynamic_target,
                ..Default::default()
            },
        );
        self.instances.retain(|_, i| i.level != level);
    }

    /// Forget everything, including the cumulative total
    pub fn clear(&mut self) {
        self.progress.clear();
        self.instances.clear();
        self.cumulative_points = 0;
    }
}

impl Default for CollectibleRegistry {
    fn default() -> Self {
        Self::new(1)
    }
}
