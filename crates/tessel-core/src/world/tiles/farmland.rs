//! Tilled farmland

use super::{Tile, use_tool};
use crate::entity::{Direction, Entity, Tool, ToolKind};
use crate::simulation::TileId;
use crate::world::{Level, WorldRng};

/// Age at which farmland is fully grown and can be trampled
pub const FARMLAND_MAX_AGE: u8 = 5;

/// Farmland ages one step per tick up to [`FARMLAND_MAX_AGE`]
///
/// `data` holds the age. Fully grown farmland occasionally reverts to dirt
/// when a trampling entity walks over it.
#[derive(Debug, Clone, Default)]
pub struct FarmTile;

impl FarmTile {
    pub fn new() -> Self {
        Self
    }
}

impl Tile for FarmTile {
    fn id(&self) -> u16 {
        TileId::FARMLAND
    }

    fn name(&self) -> &str {
        "Farmland"
    }

    fn tick(&self, level: &mut Level, x: i32, y: i32) -> bool {
        let age = level.data(x, y);
        if age < FARMLAND_MAX_AGE {
            level.set_data(x, y, age + 1);
        }
        true
    }

    fn stepped_on(&self, level: &mut Level, x: i32, y: i32, entity: &mut Entity) {
        if !entity.tramples() {
            return;
        }
        if !level.rng().one_in(60) {
            return;
        }
        if level.data(x, y) < FARMLAND_MAX_AGE {
            return;
        }
        level.set_tile(x, y, TileId::DIRT);
        level.play_sound("farmland", entity.x(), entity.y());
    }

    fn interact(
        &self,
        level: &mut Level,
        x: i32,
        y: i32,
        player: &mut Entity,
        tool: Option<&mut Tool>,
        _dir: Direction,
    ) -> bool {
        match tool {
            Some(tool) if tool.kind == ToolKind::Shovel => {
                if !use_tool(player, tool) {
                    return false;
                }
                level.set_tile(x, y, TileId::DIRT);
                true
            }
            _ => false,
        }
    }
}
