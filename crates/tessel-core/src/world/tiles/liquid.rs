//! Liquids and ice

use super::{Tile, random_neighbour, use_tool};
use crate::entity::{Direction, Entity, Tool, ToolKind};
use crate::simulation::TileId;
use crate::world::{Level, WorldRng};

/// Water or lava: swimmers only, flows into neighbouring holes
#[derive(Debug, Clone)]
pub struct LiquidTile {
    id: u16,
    name: &'static str,
    light: i32,
    /// Flow attempt roughly once every `flow_rate` ticks
    flow_rate: i32,
}

impl LiquidTile {
    pub fn water() -> Self {
        Self {
            id: TileId::WATER,
            name: "Water",
            light: 0,
            flow_rate: 1,
        }
    }

    pub fn lava() -> Self {
        Self {
            id: TileId::LAVA,
            name: "Lava",
            light: 6,
            flow_rate: 2,
        }
    }
}

impl Tile for LiquidTile {
    fn id(&self) -> u16 {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn may_pass(&self, _level: &Level, _x: i32, _y: i32, entity: &Entity) -> bool {
        entity.can_swim()
    }

    fn tick(&self, level: &mut Level, x: i32, y: i32) -> bool {
        let rng = level.rng();
        if !rng.one_in(self.flow_rate) {
            return false;
        }
        let (xn, yn) = random_neighbour(rng, x, y);
        if level.cell(xn, yn).tile_id == TileId::HOLE {
            level.set_tile(xn, yn, self.id);
        }
        false
    }

    fn light_radius(&self, _level: &Level, _x: i32, _y: i32) -> i32 {
        self.light
    }
}

/// Ice freezes neighbouring lava into obsidian and fills holes with water
#[derive(Debug, Clone, Default)]
pub struct IceTile;

impl IceTile {
    pub fn new() -> Self {
        Self
    }
}

impl Tile for IceTile {
    fn id(&self) -> u16 {
        TileId::ICE
    }

    fn name(&self) -> &str {
        "Ice"
    }

    fn tick(&self, level: &mut Level, x: i32, y: i32) -> bool {
        let (xn, yn) = random_neighbour(level.rng(), x, y);
        if level.cell(xn, yn).tile_id == TileId::HOLE {
            level.set_tile(xn, yn, TileId::WATER);
        }

        for (xn, yn) in [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)] {
            if level.cell(xn, yn).tile_id == TileId::LAVA {
                level.set_tile(xn, yn, TileId::RAW_OBSIDIAN);
            }
        }
        false
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
            Some(tool) if tool.kind == ToolKind::Pickaxe => {
                if !use_tool(player, tool) {
                    return false;
                }
                level.set_tile(x, y, TileId::WATER);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Player, ToolTier};
    use crate::world::test_support::open_level;

    #[test]
    fn test_liquid_blocks_non_swimmers() {
        let mut level = open_level(4, 4);
        level.set_tile(1, 1, TileId::WATER);
        let player = Entity::new(4, 4, Player::new());
        assert!(!level.tile(1, 1).may_pass(&level, 1, 1, &player));
    }

    #[test]
    fn test_water_fills_hole() {
        let mut level = open_level(3, 1);
        level.set_tile(0, 0, TileId::WATER);
        level.set_tile(1, 0, TileId::HOLE);
        let water = level.tile(0, 0);
        for _ in 0..200 {
            water.tick(&mut level, 0, 0);
            if level.cell(1, 0).tile_id == TileId::WATER {
                return;
            }
        }
        panic!("water never flowed");
    }

    #[test]
    fn test_ice_freezes_adjacent_lava() {
        let mut level = open_level(3, 3);
        level.set_tile(1, 1, TileId::ICE);
        level.set_tile(0, 1, TileId::LAVA);
        level.set_tile(1, 2, TileId::LAVA);
        level.set_tile(0, 0, TileId::LAVA);
        let ice = level.tile(1, 1);
        ice.tick(&mut level, 1, 1);
        assert_eq!(level.cell(0, 1).tile_id, TileId::RAW_OBSIDIAN);
        assert_eq!(level.cell(1, 2).tile_id, TileId::RAW_OBSIDIAN);
        // Diagonals are left alone
        assert_eq!(level.cell(0, 0).tile_id, TileId::LAVA);
    }

    #[test]
    fn test_pickaxe_melts_ice_into_water() {
        let mut level = open_level(4, 4);
        level.set_tile(1, 1, TileId::ICE);
        let mut player = Entity::new(4, 4, Player::new());
        let ice = level.tile(1, 1);

        let mut shovel = Tool::new(ToolKind::Shovel, ToolTier::Rock);
        assert!(!ice.interact(&mut level, 1, 1, &mut player, Some(&mut shovel), Direction::Up));
        assert_eq!(level.cell(1, 1).tile_id, TileId::ICE);

        let mut pickaxe = Tool::new(ToolKind::Pickaxe, ToolTier::Rock);
        assert!(ice.interact(&mut level, 1, 1, &mut player, Some(&mut pickaxe), Direction::Up));
        assert_eq!(level.cell(1, 1).tile_id, TileId::WATER);
    }

    #[test]
    fn test_lava_emits_light() {
        let mut level = open_level(2, 2);
        level.set_tile(0, 0, TileId::LAVA);
        assert_eq!(level.light_radius(0, 0), 6);
        assert_eq!(level.light_radius(1, 1), 0);
    }
}
