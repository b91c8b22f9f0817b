//! Chase AI - steering and pursuit
//!
//! Enemies chase the player with a seek force and a speed cap, face their
//! direction of travel, and coast to a stop when the player is out of range.
//! Nothing here touches the physics world: a controller reads position and
//! velocity and returns a [`PursuitCommand`] for the caller to apply.

pub mod pursuit;
pub mod steering;

pub mod prelude {
    pub use crate::pursuit::{MotionState, PursuitCommand, PursuitConfig, PursuitController};
    pub use crate::steering::SteeringOutput;
}

pub use prelude::*;
