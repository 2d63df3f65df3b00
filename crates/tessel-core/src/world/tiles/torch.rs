//! Lit variant of a base tile

use super::{Tile, TileRef, drop_point};
use crate::entity::{Direction, Entity, Tool, ToolKind};
use crate::simulation::TileId;
use crate::world::Level;

/// Light radius of a placed torch
pub const TORCH_LIGHT: i32 = 5;

/// A torch placed on a base tile
///
/// Lives at `base id + VARIANT_OFFSET` and is built by the registry the first
/// time that id is requested. Passability follows the base tile.
#[derive(Debug, Clone)]
pub struct TorchTile {
    id: u16,
    name: String,
    base: TileRef,
}

impl TorchTile {
    /// Lit variant of `base`, or `None` if `base` is itself a variant
    pub fn over(base: TileRef) -> Option<Self> {
        let id = TileId::variant_of(base.id())?;
        Some(Self {
            id,
            name: format!("Torch {}", base.name()),
            base,
        })
    }

    pub fn base(&self) -> &TileRef {
        &self.base
    }
}

impl Tile for TorchTile {
    fn id(&self) -> u16 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn may_pass(&self, level: &Level, x: i32, y: i32, entity: &Entity) -> bool {
        self.base.may_pass(level, x, y, entity)
    }

    fn interact(
        &self,
        level: &mut Level,
        x: i32,
        y: i32,
        _player: &mut Entity,
        tool: Option<&mut Tool>,
        _dir: Direction,
    ) -> bool {
        if !tool.is_some_and(|t| t.kind == ToolKind::PowerGlove) {
            return false;
        }
        level.set_tile(x, y, self.base.id());
        let (fx, fy) = drop_point(x, y);
        level.drop_item(fx, fy, "Torch", 1);
        level.play_sound("tile_hurt", fx, fy);
        true
    }

    fn light_radius(&self, _level: &Level, _x: i32, _y: i32) -> i32 {
        TORCH_LIGHT
    }
}
