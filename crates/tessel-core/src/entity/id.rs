//! Entity identifiers and the authority that hands them out

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI32, Ordering};

/// Unique identifier for entities in the world
///
/// Equality and hashing of entities are defined purely by this value.
/// Negative values mean "not yet assigned".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(i32);

impl EntityId {
    /// Sentinel for an entity that has never been attached to a level
    pub const UNSET: EntityId = EntityId(-1);

    /// Get the raw value (useful for debugging/serialization)
    pub fn raw(&self) -> i32 {
        self.0
    }

    /// Create an EntityId from a raw value (host- or network-assigned)
    pub fn from_raw(id: i32) -> Self {
        EntityId(id)
    }

    pub fn is_set(&self) -> bool {
        self.0 >= 0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::UNSET
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Single source of entity identifiers
///
/// One authority is shared by every level of a world. Networked hosts plug in
/// an implementation that defers to the remote authority.
pub trait IdAuthority: Send + Sync {
    /// Hand out an identifier never returned before
    fn next_id(&self) -> EntityId;

    /// Record an identifier assigned elsewhere so it is never handed out again
    fn observe(&self, _id: EntityId) {}
}

/// Process-local authority backed by an atomic counter
#[derive(Debug)]
pub struct LocalIdAuthority {
    next: AtomicI32,
}

impl LocalIdAuthority {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: i32) -> Self {
        Self {
            next: AtomicI32::new(first.max(0)),
        }
    }
}

impl Default for LocalIdAuthority {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAuthority for LocalIdAuthority {
    fn next_id(&self) -> EntityId {
        let raw = self.next.fetch_add(1, Ordering::Relaxed);
        if raw == i32::MAX {
            log::error!("Entity id space exhausted; identifiers will repeat");
        }
        EntityId(raw)
    }

    fn observe(&self, id: EntityId) {
        if id.is_set() {
            self.next.fetch_max(id.raw().saturating_add(1), Ordering::Relaxed);
        }
    }
}
