//! Per-position cell record

use crate::TileId;
use serde::{Deserialize, Serialize};

/// A single tile position in the world grid
///
/// All mutable per-position state lives here. Tile behaviors are shared
/// across every cell of their type and never hold cell data themselves.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Tile type (0 = grass)
    pub tile_id: u16,
    /// Behavior-owned scratch value (growth stage, accumulated damage, countdown)
    pub data: u8,
}

impl Cell {
    pub const GRASS: Cell = Cell {
        tile_id: TileId::GRASS,
        data: 0,
    };

    pub fn new(tile_id: u16) -> Self {
        Self { tile_id, data: 0 }
    }

    pub fn with_data(tile_id: u16, data: u8) -> Self {
        Self { tile_id, data }
    }

    /// Whether this cell holds a lit variant
    pub fn is_variant(&self) -> bool {
        TileId::is_variant(self.tile_id)
    }
}
