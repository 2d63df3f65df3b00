use super::Tile;
use crate::entity::Entity;
use crate::simulation::TileId;
use crate::world::Level;

/// Boundary tile reported for every coordinate outside the grid
///
/// Nothing may pass it, so entities can never leave a level by walking.
#[derive(Debug, Clone, Default)]
pub struct ConnectorTile;

impl ConnectorTile {
    pub fn new() -> Self {
        Self
    }
}

impl Tile for ConnectorTile {
    fn id(&self) -> u16 {
        TileId::CONNECTOR
    }

    fn name(&self) -> &str {
        "Connector"
    }

    fn may_pass(&self, _level: &Level, _x: i32, _y: i32, _entity: &Entity) -> bool {
        false
    }
}
