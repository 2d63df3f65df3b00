//! Open ground tiles: grass, dirt, sand, flowers and the like

use super::{Tile, drop_point, random_neighbour, use_tool};
use crate::entity::{Direction, Entity, Tool, ToolKind};
use crate::simulation::TileId;
use crate::world::{Level, WorldRng};

/// What a tool turns this ground into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dig {
    pub tool: ToolKind,
    pub into: u16,
    pub drop: Option<&'static str>,
}

/// Slow spread of one tile type onto a neighbouring one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spread {
    /// Attempt roughly once every `rate` ticks
    pub rate: i32,
    pub onto: u16,
    pub into: u16,
}

const fn dig(tool: ToolKind, into: u16, drop: Option<&'static str>) -> Dig {
    Dig { tool, into, drop }
}

const GRASS_DIGS: &[Dig] = &[
    dig(ToolKind::Shovel, TileId::DIRT, None),
    dig(ToolKind::Hoe, TileId::DIRT, Some("Seeds")),
];
const DIRT_DIGS: &[Dig] = &[
    dig(ToolKind::Shovel, TileId::HOLE, Some("Dirt")),
    dig(ToolKind::Hoe, TileId::FARMLAND, None),
];
const FLOWER_DIGS: &[Dig] = &[dig(ToolKind::Shovel, TileId::GRASS, Some("Flower"))];
const SAND_DIGS: &[Dig] = &[dig(ToolKind::Shovel, TileId::DIRT, Some("Sand"))];
const PATH_DIGS: &[Dig] = &[dig(ToolKind::Shovel, TileId::DIRT, None)];
const SNOW_DIGS: &[Dig] = &[dig(ToolKind::Shovel, TileId::GRASS, Some("Snow Ball"))];
const RAW_OBSIDIAN_DIGS: &[Dig] = &[dig(ToolKind::Pickaxe, TileId::DIRT, Some("Raw Obsidian"))];
const JUNGLE_GRASS_DIGS: &[Dig] = &[
    dig(ToolKind::Shovel, TileId::DIRT, None),
    dig(ToolKind::Hoe, TileId::DIRT, None),
    dig(ToolKind::Pickaxe, TileId::PATH, None),
];

/// Walkable ground with optional digging, spreading and breakage
#[derive(Debug, Clone)]
pub struct GroundTile {
    id: u16,
    name: &'static str,
    digs: &'static [Dig],
    spread: Option<Spread>,
    /// Replacement and drop when hit in combat
    breaks_into: Option<(u16, &'static str)>,
    /// Only entities that can swim may enter
    swimmers_only: bool,
}

impl GroundTile {
    pub fn new(id: u16, name: &'static str) -> Self {
        Self {
            id,
            name,
            digs: &[],
            spread: None,
            breaks_into: None,
            swimmers_only: false,
        }
    }

    pub fn with_digs(mut self, digs: &'static [Dig]) -> Self {
        self.digs = digs;
        self
    }

    pub fn with_spread(mut self, spread: Spread) -> Self {
        self.spread = Some(spread);
        self
    }

    pub fn grass() -> Self {
        Self::new(TileId::GRASS, "Grass")
            .with_digs(GRASS_DIGS)
            .with_spread(Spread {
                rate: 40,
                onto: TileId::DIRT,
                into: TileId::GRASS,
            })
    }

    pub fn dirt() -> Self {
        Self::new(TileId::DIRT, "Dirt").with_digs(DIRT_DIGS)
    }

    pub fn flower() -> Self {
        let mut tile = Self::new(TileId::FLOWER, "Flower")
            .with_digs(FLOWER_DIGS)
            .with_spread(Spread {
                rate: 30,
                onto: TileId::DIRT,
                into: TileId::GRASS,
            });
        tile.breaks_into = Some((TileId::GRASS, "Flower"));
        tile
    }

    pub fn hole() -> Self {
        let mut tile = Self::new(TileId::HOLE, "Hole");
        tile.swimmers_only = true;
        tile
    }

    pub fn sand() -> Self {
        Self::new(TileId::SAND, "Sand").with_digs(SAND_DIGS)
    }

    pub fn path() -> Self {
        Self::new(TileId::PATH, "Path").with_digs(PATH_DIGS)
    }

    pub fn snow() -> Self {
        Self::new(TileId::SNOW, "Snow").with_digs(SNOW_DIGS)
    }

    pub fn raw_obsidian() -> Self {
        Self::new(TileId::RAW_OBSIDIAN, "Raw Obsidian").with_digs(RAW_OBSIDIAN_DIGS)
    }

    pub fn jungle_grass() -> Self {
        Self::new(TileId::JUNGLE_GRASS, "Jungle Grass")
            .with_digs(JUNGLE_GRASS_DIGS)
            .with_spread(Spread {
                rate: 40,
                onto: TileId::DIRT,
                into: TileId::JUNGLE_GRASS,
            })
    }
}

impl Tile for GroundTile {
    fn id(&self) -> u16 {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn may_pass(&self, _level: &Level, _x: i32, _y: i32, entity: &Entity) -> bool {
        !self.swimmers_only || entity.can_swim()
    }

    fn tick(&self, level: &mut Level, x: i32, y: i32) -> bool {
        let Some(spread) = self.spread else {
            return false;
        };
        let rng = level.rng();
        if !rng.check_probability(1.0 / spread.rate.max(1) as f32) {
            return false;
        }
        let (xn, yn) = random_neighbour(rng, x, y);
        if level.cell(xn, yn).tile_id == spread.onto {
            level.set_tile(xn, yn, spread.into);
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
        let Some(tool) = tool else {
            return false;
        };
        let Some(dig) = self.digs.iter().find(|d| d.tool == tool.kind) else {
            return false;
        };
        if !use_tool(player, tool) {
            return false;
        }

        level.set_tile(x, y, dig.into);
        let (fx, fy) = drop_point(x, y);
        if let Some(item) = dig.drop {
            level.drop_item(fx, fy, item, 1);
        }
        level.play_sound("tile_dig", fx, fy);
        true
    }

    fn hurt(
        &self,
        level: &mut Level,
        x: i32,
        y: i32,
        _source: Option<&Entity>,
        _damage: i32,
        _dir: Direction,
    ) -> bool {
        let Some((into, item)) = self.breaks_into else {
            return false;
        };
        let (fx, fy) = drop_point(x, y);
        level.drop_items(fx, fy, 0, 1, item);
        level.set_tile(x, y, into);
        true
    }
}
