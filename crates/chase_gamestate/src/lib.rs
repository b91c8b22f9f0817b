//! Chase GameState - level progression and session state
//!
//! This crate owns the rules of a play session, with no world geometry:
//!
//! # Features
//!
//! - Level table (building population, enemy quota, collectible targets)
//! - Collection tracking with idempotent recording and completion checks
//! - Session totals with a per-level point breakdown
//! - The level state machine (active, portal open, tearing down, spawning,
//!   game over, game complete)
//! - The score payload submitted at the end of a run
//!
//! # Example
//!
//! ```ignore
//! use chase_gamestate::prelude::*;
//!
//! let mut registry = CollectibleRegistry::new(1);
//! registry.load_scripted(1, &scripted_items);
//! registry.set_dynamic_target(1, 10);
//!
//! if let Some(record) = registry.record_collection(item_id) {
//!     session.award(record.level, record.points);
//! }
//! if registry.is_level_complete(1) {
//!     machine.on_level_complete(table.next(1))?;
//! }
//! ```

pub mod collectibles;
pub mod level;
pub mod models;
pub mod score;
pub mod session;
pub mod state;

pub mod prelude {
    pub use crate::collectibles::{
        CollectibleKind, CollectibleRegistry, CollectionRecord, LevelProgress, Role, ScriptedCollectible,
        ScriptedCounts,
    };
    pub use crate::level::{BuildingPopulation, BuildingSource, LevelId, LevelSpec, LevelTable, ScaleBuckets};
    pub use crate::models::{BuildingModel, EnemyModel};
    pub use crate::score::{LevelPoints, ScorePayload};
    pub use crate::session::{GameSession, PointsBreakdown};
    pub use crate::state::{LevelState, LevelStateMachine, StateTransition, TransitionError, TransitionPhase};
}

pub use prelude::*;
