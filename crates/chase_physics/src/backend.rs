//! The physics world contract consumed by the game core

use crate::body::BodyDesc;
use crate::error::Result;
use chase_core::Handle;

/// Handle to a body owned by a [`PhysicsBackend`]
pub type BodyHandle = Handle<BodyDesc>;

/// Two colliders that started touching during the last step, as user data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactPair {
    pub user_data1: u128,
    pub user_data2: u128,
}

/// Black-box rigid body simulation
///
/// Handles of removed bodies go stale: reads return `None`, writes return
/// `BodyNotFound`. Nothing panics on a stale handle.
pub trait PhysicsBackend {
    /// Add a body with its collider
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle;

    /// Remove a body and its collider. Returns false if it was already gone.
    fn remove_body(&mut self, handle: BodyHandle) -> bool;

    /// Whether the handle still refers to a live body
    fn contains(&self, handle: BodyHandle) -> bool;

    fn position(&self, handle: BodyHandle) -> Option<[f32; 3]>;

    fn velocity(&self, handle: BodyHandle) -> Option<[f32; 3]>;

    fn set_position(&mut self, handle: BodyHandle, position: [f32; 3]) -> Result<()>;

    fn set_velocity(&mut self, handle: BodyHandle, velocity: [f32; 3]) -> Result<()>;

    /// Set rotation about the Y axis
    fn set_yaw(&mut self, handle: BodyHandle, yaw: f32) -> Result<()>;

    /// Add a force for the next step
    fn apply_force(&mut self, handle: BodyHandle, force: [f32; 3]) -> Result<()>;

    /// Zero linear and angular velocity
    fn freeze(&mut self, handle: BodyHandle) -> Result<()>;

    /// Advance the simulation by `delta_time` seconds
    fn step(&mut self, delta_time: f32);

    /// Number of live bodies
    fn body_count(&self) -> usize;

    /// Contacts that started during the last step
    fn drain_contacts(&mut self) -> Vec<ContactPair> {
        Vec::new()
    }
}
