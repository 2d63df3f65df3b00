use super::Tile;
use crate::entity::Entity;
use crate::simulation::TileId;
use crate::world::Level;

/// Light emitted by a tile mid-explosion
const EXPLOSION_LIGHT: i32 = 3;

/// Tile left behind while an explosion plays out
///
/// Always passable and lit. It stays in place until something else replaces it.
#[derive(Debug, Clone, Default)]
pub struct ExplodedTile;

impl ExplodedTile {
    pub fn new() -> Self {
        Self
    }
}

impl Tile for ExplodedTile {
    fn id(&self) -> u16 {
        TileId::EXPLODE
    }

    fn name(&self) -> &str {
        "Explode"
    }

    fn may_pass(&self, _level: &Level, _x: i32, _y: i32, _entity: &Entity) -> bool {
        true
    }

    fn tick(&self, _level: &mut Level, _x: i32, _y: i32) -> bool {
        true
    }

    fn light_radius(&self, _level: &Level, _x: i32, _y: i32) -> i32 {
        EXPLOSION_LIGHT
    }
}
