//! Spatial index of entity hitboxes

use ahash::AHashMap;
use rstar::{AABB, RTree, RTreeObject};
use smallvec::SmallVec;

use crate::entity::EntityId;
use crate::simulation::Rect;

/// Entity hitbox stored in the R-tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct IndexedBounds {
    id: EntityId,
    bounds: Rect,
}

impl RTreeObject for IndexedBounds {
    type Envelope = AABB<[i32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let (lo, hi) = self.bounds.corners();
        AABB::from_corners(lo, hi)
    }
}

/// Entity-by-rectangle lookup, kept current on attach, move and detach
#[derive(Debug, Default)]
pub struct SpatialIndex {
    tree: RTree<IndexedBounds>,
    /// Bounds currently stored for each id
    bounds: AHashMap<EntityId, Rect>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or move `id` to `bounds`
    pub fn update(&mut self, id: EntityId, bounds: Rect) {
        if let Some(old) = self.bounds.insert(id, bounds) {
            if old == bounds {
                return;
            }
            self.tree.remove(&IndexedBounds { id, bounds: old });
        }
        self.tree.insert(IndexedBounds { id, bounds });
    }

    pub fn remove(&mut self, id: EntityId) -> bool {
        match self.bounds.remove(&id) {
            Some(bounds) => {
                self.tree.remove(&IndexedBounds { id, bounds });
                true
            }
            None => false,
        }
    }

    pub fn bounds_of(&self, id: EntityId) -> Option<Rect> {
        self.bounds.get(&id).copied()
    }

    /// Ids whose bounds overlap `area`, sorted ascending
    pub fn query(&self, area: &Rect) -> SmallVec<[EntityId; 8]> {
        let (lo, hi) = area.corners();
        let envelope = AABB::from_corners(lo, hi);
        let mut hits: SmallVec<[EntityId; 8]> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.bounds.intersects(area))
            .map(|entry| entry.id)
            .collect();
        hits.sort_unstable();
        hits
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }
}
