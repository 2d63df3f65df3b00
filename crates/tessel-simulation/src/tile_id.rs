//! Built-in tile identifiers and the id-space partition
//!
//! The numeric values here are persisted in world data. Changing any of them,
//! or the variant offset, breaks compatibility with existing worlds and must
//! come with an explicit format version bump.

/// Built-in tile IDs
pub struct TileId;

impl TileId {
    pub const GRASS: u16 = 0;
    pub const DIRT: u16 = 1;
    pub const FLOWER: u16 = 2;
    pub const HOLE: u16 = 3;
    pub const WATER: u16 = 6;
    pub const ROCK: u16 = 7;
    pub const SAND: u16 = 10;
    // Out of order because lava shipped after the water tiles
    pub const LAVA: u16 = 17;
    pub const EXPLODE: u16 = 19;
    pub const FARMLAND: u16 = 20;
    pub const PATH: u16 = 44;
    pub const SNOW: u16 = 66;
    pub const ICE_SPIKE: u16 = 74;
    pub const RAW_OBSIDIAN: u16 = 75;
    pub const JUNGLE_GRASS: u16 = 87;
    pub const ICE: u16 = 89;

    /// Placeholder returned for reads outside the grid. Never placed.
    pub const CONNECTOR: u16 = 255;

    /// Universal fallback for unknown ids and names
    pub const FALLBACK: u16 = Self::GRASS;

    /// Offset added to a base id to get its lit variant.
    ///
    /// Ids below the offset are base tiles, ids at or above it are variants.
    pub const VARIANT_OFFSET: u16 = 16384;

    /// Old saves stored ids as signed 16-bit values; negatives wrap by this amount.
    pub const SIGNED_WRAP: i32 = 32768;

    /// Whether `id` falls in the variant half of the id space
    pub fn is_variant(id: u16) -> bool {
        id >= Self::VARIANT_OFFSET
    }

    /// Variant id for a base id, or `None` if `id` is already a variant
    pub fn variant_of(id: u16) -> Option<u16> {
        if Self::is_variant(id) {
            None
        } else {
            Some(id + Self::VARIANT_OFFSET)
        }
    }

    /// Base id for a variant id (identity for base ids)
    pub fn base_of(id: u16) -> u16 {
        if Self::is_variant(id) {
            id - Self::VARIANT_OFFSET
        } else {
            id
        }
    }

    /// Normalise a signed id read from storage into the 16-bit id space
    pub fn from_signed(raw: i32) -> u16 {
        let wrapped = if raw < 0 { raw + Self::SIGNED_WRAP } else { raw };
        wrapped.clamp(0, u16::MAX as i32) as u16
    }
}
