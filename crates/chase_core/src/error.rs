//! Error taxonomy for the game core
//!
//! Every variant here is recoverable. The world logs them and keeps running
//! in a degraded but consistent state; nothing is surfaced to the player.

use std::fmt;

/// The core error type
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A referenced model or resource is absent
    ResourceMissing(MissingResourceError),
    /// The placer could not find a fully valid slot
    PlacementExhausted {
        /// Candidates tried across all passes
        attempts: u32,
        /// Separation violations of the accepted candidate
        violations: u32,
    },
    /// Level data or score service unreachable
    BackendUnavailable(String),
    /// A guard caught a double collection, a concurrent transition and the like
    InvariantViolation(String),
    /// Handle error
    Handle(HandleError),
    /// Generic error with message
    Message(Box<str>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ResourceMissing(e) => write!(f, "Resource missing: {}", e),
            Error::PlacementExhausted { attempts, violations } => write!(
                f,
                "Placement exhausted after {} attempts ({} separation violations)",
                attempts, violations
            ),
            Error::BackendUnavailable(msg) => write!(f, "Backend unavailable: {}", msg),
            Error::InvariantViolation(msg) => write!(f, "Invariant violation: {}", msg),
            Error::Handle(e) => write!(f, "Handle error: {}", e),
            Error::Message(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// One or more resources failed to resolve during the load phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingResourceError {
    /// Names of the missing resources
    pub missing: Vec<String>,
}

impl MissingResourceError {
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            missing: vec![name.into()],
        }
    }
}

impl fmt::Display for MissingResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.missing.join(", "))
    }
}

impl std::error::Error for MissingResourceError {}

impl From<MissingResourceError> for Error {
    fn from(e: MissingResourceError) -> Self {
        Error::ResourceMissing(e)
    }
}

/// Handle errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleError {
    /// Handle is null
    Null,
    /// Handle is stale (generation mismatch)
    Stale,
}

impl fmt::Display for HandleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandleError::Null => write!(f, "Handle is null"),
            HandleError::Stale => write!(f, "Handle is stale (already freed)"),
        }
    }
}

impl From<HandleError> for Error {
    fn from(e: HandleError) -> Self {
        Error::Handle(e)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Message(s.into())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Message(s.into_boxed_str())
    }
}
