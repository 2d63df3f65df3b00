//! Level management - tile grid, tile behaviors, spatial index, stepping

mod events;
mod grid;
mod level;
pub mod loader;
pub mod rng_trait;
mod spatial;
pub mod stats;
pub mod tiles;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use events::LevelEvent;
pub use grid::TileGrid;
pub use level::Level;
pub use loader::{TileLoader, TileSource};
pub use rng_trait::{LevelRng, WorldRng, step_rng, step_seed};
pub use spatial::SpatialIndex;
pub use stats::StepReport;
pub use tiles::{Tile, TileRef, TileRegistry, TileRegistryError};

/// Errors from level construction and grid writes
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LevelError {
    #[error("tile ({x}, {y}) is outside the level")]
    OutOfBounds { x: i32, y: i32 },

    #[error("expected {expected} cells, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Game difficulty; scales mob damage and drop tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Peaceful,
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// 0 for peaceful up to 3 for hard
    pub fn index(self) -> i32 {
        match self {
            Difficulty::Peaceful => 0,
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
        }
    }
}

/// Per-level gameplay switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LevelSettings {
    pub difficulty: Difficulty,
    /// Destructible tiles break on the first hit
    pub creative: bool,
}
