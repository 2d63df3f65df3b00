//! Tile data and coordinate rules for Tessel
//!
//! This crate provides the foundational data types for the tile world:
//! - Tile identifiers and the variant id-space partition (TileId)
//! - Per-position cell records (Cell)
//! - Fine/tile coordinate conversion (coords)
//! - Axis-aligned rectangles used for hitboxes (Rect)
//! - The legacy identifier table used when loading old worlds

mod cell;
pub mod coords;
mod legacy;
mod rect;
mod tile_id;

pub use cell::Cell;
pub use coords::{TILE_SHIFT, TILE_SIZE};
pub use legacy::{LEGACY_TABLE, legacy_tile_name};
pub use rect::Rect;
pub use tile_id::TileId;
