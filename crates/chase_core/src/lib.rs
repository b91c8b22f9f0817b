//! # chase_core - Cheese Chase Core
//!
//! Zero-dependency primitives shared by every other crate in the workspace:
//! - **Ids**: stable entity identifiers handed out per session
//! - **Handles**: generational handles so a stale body or visual reference
//!   is detected instead of silently aliasing a newer object
//! - **Errors**: the recoverable failure taxonomy of the game core
//! - **Math**: small helpers over `[f32; 3]` positions

pub mod error;
pub mod handle;
pub mod id;
pub mod math;

pub use error::*;
pub use handle::*;
pub use id::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Error, HandleError, MissingResourceError, Result};
    pub use crate::handle::{Handle, HandleAllocator};
    pub use crate::id::{EntityId, IdGenerator};
    pub use crate::math::{distance, planar_distance, planar_length, Vec3};
}
