//! # chase_world - The playable world
//!
//! Everything that turns a level table and a physics backend into a running
//! session.
//!
//! ## Features
//!
//! - **Spatial placement**: strict, relaxed and degraded passes that always terminate
//! - **Entity lifecycle**: paired body and visual creation, per-level teardown
//! - **Deferred steps**: epoch-cancelled scheduling against simulated time
//! - **World orchestrator**: fixed tick order over pursuit, pickups and portals
//!
//! ## Example
//!
//! ```ignore
//! use chase_world::prelude::*;
//! use chase_physics::PhysicsWorld;
//!
//! let config = WorldConfig::default().with_seed(42);
//! let resources = ResourceSet::load(ResourceManifest::builtin(), ResourceSet::REQUIRED)?;
//! let physics = PhysicsWorld::new(config.physics.clone());
//! let mut world = World::new(config, physics, InMemoryScene::new(), resources, blocks);
//!
//! world.start();
//! loop {
//!     world.tick(1.0 / 60.0, PlayerInput::new(1.0, 0.0));
//!     for event in world.drain_events() {
//!         // update the HUD
//!     }
//! }
//! ```

pub mod config;
pub mod events;
pub mod lifecycle;
pub mod placer;
pub mod player;
pub mod resources;
pub mod scene;
pub mod schedule;
pub mod world;

pub mod prelude {
    pub use crate::config::{
        CollectibleConfig, EnemyConfig, FloorConfig, PlacementConfig, PlayerConfig, PortalConfig, RoadConfig,
        StepDelays, WorldConfig,
    };
    pub use crate::events::GameEvent;
    pub use crate::lifecycle::{block_offset, EntityKind, EntityLifecycleManager, EntityRecord, SpawnReport};
    pub use crate::placer::{
        footprint_radius, AnnulusSampler, CandidateGenerator, Footprint, Placement, PlacementRequest, SpatialPlacer,
    };
    pub use crate::player::{PlayerController, PlayerInput};
    pub use crate::resources::{ModelInfo, ModelKey, ResourceManifest, ResourceSet};
    pub use crate::scene::{InMemoryScene, SceneGraph, Visual, VisualHandle};
    pub use crate::schedule::{DeferredStep, SpawnContext, StepScheduler};
    pub use crate::world::World;
}

pub use prelude::*;
