//! Chase Triggers - proximity trigger volumes
//!
//! Triggers here are pure geometry checks against a tracked point, with no
//! physics sensor behind them. Pickups and the level portal both use them.
//!
//! # Features
//!
//! - Sphere and vertical cylinder volumes
//! - Enter/Exit events
//! - Minimum-speed gate (a pickup only counts while the player is moving)
//! - One-shot and repeatable triggers
//!
//! # Example
//!
//! ```ignore
//! use chase_triggers::prelude::*;
//!
//! let mut triggers = TriggerSystem::new();
//! triggers.register(cheese_id, ProximityTrigger::new(TriggerVolume::sphere(1.2), position)
//!     .with_mode(TriggerMode::OneShot)
//!     .with_min_speed(0.5));
//!
//! for event in triggers.update(player_id, player_pos, player_speed) {
//!     // event.trigger == cheese_id
//! }
//! ```

pub mod events;
pub mod system;
pub mod trigger;
pub mod volume;

pub mod prelude {
    pub use crate::events::{TriggerEvent, TriggerEventType};
    pub use crate::system::TriggerSystem;
    pub use crate::trigger::{Crossing, ProximityTrigger, TriggerMode};
    pub use crate::volume::TriggerVolume;
}

pub use prelude::*;
