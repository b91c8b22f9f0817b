//! Error types for the physics system

use crate::backend::BodyHandle;
use thiserror::Error;

/// Physics system errors
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// Rigid body not found (never created, or already removed)
    #[error("Rigid body not found: {0:?}")]
    BodyNotFound(BodyHandle),

    /// Invalid configuration
    #[error("Invalid physics configuration: {0}")]
    InvalidConfig(String),

    /// Shape creation failed
    #[error("Failed to create collision shape: {0}")]
    ShapeCreationFailed(String),
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;

impl From<PhysicsError> for chase_core::Error {
    fn from(err: PhysicsError) -> Self {
        match err {
            PhysicsError::BodyNotFound(_) => chase_core::Error::Handle(chase_core::HandleError::Stale),
            other => chase_core::Error::Message(other.to_string().into()),
        }
    }
}
