//! Entity identifiers

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of a game entity (player, building, enemy, collectible, portal)
///
/// Ids are never reused within a session, so a stale id simply fails to
/// resolve instead of pointing at a newer entity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u64);

impl EntityId {
    /// Create an id from raw bits
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Create a null/invalid id
    #[inline]
    pub const fn null() -> Self {
        Self(u64::MAX)
    }

    /// Check if this id is null
    #[inline]
    pub const fn is_null(&self) -> bool {
        self.0 == u64::MAX
    }

    /// Get the raw bits
    #[inline]
    pub const fn raw(&self) -> u64 {
        self.0
    }

    /// Physics user data slot for this entity
    #[inline]
    pub const fn user_data(&self) -> u128 {
        self.0 as u128
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "EntityId(null)")
        } else {
            write!(f, "EntityId({})", self.0)
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "null")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::null()
    }
}

/// Monotonic id generator
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    /// Create a new id generator starting at zero
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// Generate the next unique id
    pub fn next(&self) -> EntityId {
        EntityId(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
