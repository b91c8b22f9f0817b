//! Chase Physics - physics world contract and Rapier 3D backend
//!
//! The game core never talks to Rapier directly. It sees a [`PhysicsBackend`]:
//! add a body, remove it, read its position and velocity, push it around.
//! [`PhysicsWorld`] is the production implementation on top of Rapier 3D.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │         PhysicsBackend (trait)            │
//! │  add_body / remove_body / position / ...  │
//! └───────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌───────────────────────────────────────────┐
//! │               PhysicsWorld                │
//! │  ┌─────────────┐  ┌─────────────┐         │
//! │  │ RigidBodySet│  │ ColliderSet │         │
//! │  └─────────────┘  └─────────────┘         │
//! │  ┌───────────────────────────────────────┐│
//! │  │ PhysicsPipeline (fixed timestep)      ││
//! │  └───────────────────────────────────────┘│
//! └───────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use chase_physics::prelude::*;
//!
//! let mut physics = PhysicsWorld::new(PhysicsConfig::default());
//!
//! // A zero-mass, non-kinematic body is fixed scenery
//! let wall = physics.add_body(BodyDesc::new(ColliderShape::cuboid(1.0, 2.0, 1.0), 0.0, [5.0, 2.0, 0.0], false));
//!
//! // A dynamic sphere
//! let ball = physics.add_body(BodyDesc::dynamic(ColliderShape::sphere(0.4)).with_position(0.0, 1.0, 0.0).with_mass(2.0));
//!
//! physics.apply_force(ball, [10.0, 0.0, 0.0])?;
//! physics.step(1.0 / 60.0);
//! ```

pub mod backend;
pub mod body;
pub mod collider;
pub mod config;
pub mod error;
pub mod world;

pub mod prelude {
    //! Common imports for physics functionality
    pub use crate::backend::{BodyHandle, ContactPair, PhysicsBackend};
    pub use crate::body::{BodyDesc, BodyKind};
    pub use crate::collider::ColliderShape;
    pub use crate::config::PhysicsConfig;
    pub use crate::error::{PhysicsError, Result};
    pub use crate::world::PhysicsWorld;
}

pub use prelude::*;
