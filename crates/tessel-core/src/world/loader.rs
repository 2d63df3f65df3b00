//! Best-effort decoding of stored tile streams into cells

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::{TileGrid, TileRegistry};
use crate::simulation::Cell;
use crate::world::tiles::split_encoded_name;

/// One stored cell, in whichever form the save wrote it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileSource {
    /// Current numeric id; negative values come from signed 16-bit storage
    Id(i32),
    /// Id from before the tile id rework
    Legacy(u16),
    /// `"<name>"` or `"<name>_<data>"`
    Name(String),
}

/// Tile stream decoder
///
/// Unknown ids and names are substituted with the fallback tile and logged;
/// only a broken registry configuration (runaway alias chains) aborts a load.
pub struct TileLoader;

impl TileLoader {
    /// Decode one stored cell
    pub fn decode_one(registry: &TileRegistry, source: &TileSource) -> anyhow::Result<Cell> {
        let cell = match source {
            TileSource::Id(raw) => Cell::new(registry.get_signed(*raw).id()),
            TileSource::Legacy(old) => Cell::new(
                registry
                    .from_legacy_id(*old)
                    .with_context(|| format!("Failed to resolve legacy tile id {}", old))?
                    .id(),
            ),
            TileSource::Name(encoded) => {
                let (name, data) = split_encoded_name(encoded);
                let tile = registry
                    .get_by_name(name)
                    .with_context(|| format!("Failed to resolve tile name '{}'", encoded))?;
                Cell::with_data(tile.id(), data.unwrap_or(0))
            }
        };
        Ok(cell)
    }

    /// Decode a whole stream in order
    pub fn decode(registry: &TileRegistry, sources: &[TileSource]) -> anyhow::Result<Vec<Cell>> {
        sources
            .iter()
            .enumerate()
            .map(|(i, source)| {
                Self::decode_one(registry, source)
                    .with_context(|| format!("Failed to decode cell {}", i))
            })
            .collect()
    }

    /// Decode a row-major stream into a grid
    pub fn load_grid(
        registry: &TileRegistry,
        width: i32,
        height: i32,
        sources: &[TileSource],
    ) -> anyhow::Result<TileGrid> {
        let cells = Self::decode(registry, sources)?;
        let grid = TileGrid::from_cells(width, height, cells)
            .with_context(|| format!("Tile stream does not fit a {}x{} level", width, height))?;
        log::debug!("[LOADER] Decoded {}x{} tile stream", width, height);
        Ok(grid)
    }
}
