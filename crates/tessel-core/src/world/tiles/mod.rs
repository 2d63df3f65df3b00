//! Tile behaviors and the registry that maps ids to them
//!
//! A tile behavior is a shared, immutable object serving every cell of its
//! type. Per-cell state lives in the level's [`Cell`](crate::simulation::Cell)
//! `data` byte; behaviors read and write it through the level.

mod connector;
mod destructible;
mod exploded;
mod farmland;
mod ground;
mod liquid;
mod registry;
mod torch;

use std::fmt;
use std::sync::Arc;

use crate::entity::{Direction, Entity, Tool};
use crate::simulation::coords;
use crate::world::{Level, WorldRng};

pub use connector::ConnectorTile;
pub use destructible::DestructibleTile;
pub use exploded::ExplodedTile;
pub use farmland::{FARMLAND_MAX_AGE, FarmTile};
pub use ground::{Dig, GroundTile, Spread};
pub use liquid::{IceTile, LiquidTile};
pub use registry::{MAX_NAME_DEPTH, TileRegistry, TileRegistryError, split_encoded_name};
pub use torch::{TORCH_LIGHT, TorchTile};

/// Shared handle to a tile behavior
pub type TileRef = Arc<dyn Tile>;

/// Per-type behavior of a tile cell
///
/// Every hook gets the level and the cell's tile coordinates. Expected
/// conditions (wrong tool, nothing to do) are signalled through return values.
pub trait Tile: Send + Sync + fmt::Debug {
    fn id(&self) -> u16;

    /// Display name, also the registry lookup key (case-insensitive)
    fn name(&self) -> &str;

    /// Whether `entity` may enter this cell. Must not mutate anything.
    fn may_pass(&self, _level: &Level, _x: i32, _y: i32, _entity: &Entity) -> bool {
        true
    }

    /// An entity's hitbox newly reached this cell, whether or not it may enter
    fn bumped_into(&self, _level: &mut Level, _x: i32, _y: i32, _entity: &mut Entity) {}

    /// An entity finished a move standing on this cell
    fn stepped_on(&self, _level: &mut Level, _x: i32, _y: i32, _entity: &mut Entity) {}

    /// Periodic update. Returns true if the cell needs a redraw.
    fn tick(&self, _level: &mut Level, _x: i32, _y: i32) -> bool {
        false
    }

    /// Deliberate use by a player. Returns true if the action was consumed.
    fn interact(
        &self,
        _level: &mut Level,
        _x: i32,
        _y: i32,
        _player: &mut Entity,
        _tool: Option<&mut Tool>,
        _dir: Direction,
    ) -> bool {
        false
    }

    /// Combat damage. Returns true if the tile reacted.
    fn hurt(
        &self,
        _level: &mut Level,
        _x: i32,
        _y: i32,
        _source: Option<&Entity>,
        _damage: i32,
        _dir: Direction,
    ) -> bool {
        false
    }

    fn light_radius(&self, _level: &Level, _x: i32, _y: i32) -> i32 {
        0
    }
}

/// Charge `player` stamina and `tool` durability for one use
pub(crate) fn use_tool(player: &mut Entity, tool: &mut Tool) -> bool {
    player.pay_stamina(tool.stamina_cost()) && tool.pay_durability()
}

/// One of the four orthogonal neighbours of `(x, y)`, chosen at random
pub(crate) fn random_neighbour(rng: &mut impl WorldRng, x: i32, y: i32) -> (i32, i32) {
    if rng.gen_bool() {
        (x + rng.gen_sign(), y)
    } else {
        (x, y + rng.gen_sign())
    }
}

/// Fine coordinates of the center of tile `(x, y)`, where drops spawn
pub(crate) fn drop_point(x: i32, y: i32) -> (i32, i32) {
    (coords::tile_center(x), coords::tile_center(y))
}

/// Every built-in tile, in id order
pub fn builtin_tiles() -> Vec<TileRef> {
    vec![
        Arc::new(GroundTile::grass()),
        Arc::new(GroundTile::dirt()),
        Arc::new(GroundTile::flower()),
        Arc::new(GroundTile::hole()),
        Arc::new(LiquidTile::water()),
        Arc::new(DestructibleTile::rock()),
        Arc::new(GroundTile::sand()),
        Arc::new(LiquidTile::lava()),
        Arc::new(ExplodedTile::new()),
        Arc::new(FarmTile::new()),
        Arc::new(GroundTile::path()),
        Arc::new(GroundTile::snow()),
        Arc::new(DestructibleTile::ice_spike()),
        Arc::new(GroundTile::raw_obsidian()),
        Arc::new(GroundTile::jungle_grass()),
        Arc::new(IceTile::new()),
        Arc::new(ConnectorTile::new()),
    ]
}
