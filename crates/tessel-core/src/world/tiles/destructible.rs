//! Cells that accumulate damage in their data byte until they break

use super::{Tile, drop_point, use_tool};
use crate::entity::{Direction, Entity, Tool, ToolKind};
use crate::simulation::TileId;
use crate::world::{Difficulty, Level, LevelEvent, WorldRng};

/// Item drop with an inclusive count range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DropRange {
    item: &'static str,
    min: i32,
    max: i32,
}

/// Impassable cell with a damage threshold
///
/// `data` holds accumulated damage. Once it reaches `health` the cell is
/// replaced by `into` and drops are spawned. Damage heals by one point per
/// tick while the cell stands.
#[derive(Debug, Clone)]
pub struct DestructibleTile {
    id: u16,
    name: &'static str,
    health: i32,
    into: u16,
    drop: DropRange,
    /// Extra drop when broken with the mining tool
    mined_drop: Option<DropRange>,
    /// Tool that mines this tile through interaction
    mined_by: Option<ToolKind>,
    /// Hurts living entities that walk into it
    bump_damage: bool,
}

impl DestructibleTile {
    /// Stone that gives coal when mined with a pickaxe
    pub fn rock() -> Self {
        Self {
            id: TileId::ROCK,
            name: "Rock",
            health: 50,
            into: TileId::DIRT,
            drop: DropRange {
                item: "Stone",
                min: 1,
                max: 4,
            },
            mined_drop: Some(DropRange {
                item: "Coal",
                min: 1,
                max: 2,
            }),
            mined_by: Some(ToolKind::Pickaxe),
            bump_damage: false,
        }
    }

    pub fn ice_spike() -> Self {
        Self {
            id: TileId::ICE_SPIKE,
            name: "Ice Spike",
            health: 10,
            into: TileId::SNOW,
            drop: DropRange {
                item: "Icicle",
                min: 2,
                max: 4,
            },
            mined_drop: None,
            mined_by: None,
            bump_damage: true,
        }
    }

    /// Damage needed to break this tile
    pub fn health(&self) -> i32 {
        self.health
    }

    fn damage(&self, level: &mut Level, x: i32, y: i32, amount: i32, mined: bool) {
        let total = if level.settings().creative {
            self.health
        } else {
            (level.data(x, y) as i32).saturating_add(amount.max(0))
        };

        if total < self.health {
            level.set_data(x, y, total as u8);
            level.push_event(LevelEvent::TileHurt {
                x,
                y,
                tile: self.id,
                damage: amount,
            });
            return;
        }

        let (fx, fy) = drop_point(x, y);
        match self.mined_drop.filter(|_| mined) {
            Some(bonus) => {
                // Mining yields less stone but adds the bonus drop; hard mode is stingier
                let (min, max) = if level.settings().difficulty == Difficulty::Hard {
                    (bonus.min - 1, bonus.max - 1)
                } else {
                    (bonus.min, bonus.max)
                };
                level.drop_items(fx, fy, self.drop.min, (self.drop.max / 2).max(1), self.drop.item);
                level.drop_items(fx, fy, min, max, bonus.item);
            }
            None => level.drop_items(fx, fy, self.drop.min, self.drop.max, self.drop.item),
        }
        level.set_tile(x, y, self.into);
        level.play_sound("tile_break", fx, fy);
        level.push_event(LevelEvent::TileDestroyed {
            x,
            y,
            from: self.id,
            to: self.into,
        });
    }
}

impl Tile for DestructibleTile {
    fn id(&self) -> u16 {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn may_pass(&self, _level: &Level, _x: i32, _y: i32, _entity: &Entity) -> bool {
        false
    }

    fn bumped_into(&self, level: &mut Level, x: i32, y: i32, entity: &mut Entity) {
        if !self.bump_damage {
            return;
        }
        let difficulty = level.settings().difficulty;
        if difficulty == Difficulty::Peaceful {
            return;
        }
        let (cx, cy) = drop_point(x, y);
        let dir = Direction::from_delta(entity.x() - cx, entity.y() - cy);
        entity.hurt(level, 1 + difficulty.index(), dir);
    }

    fn tick(&self, level: &mut Level, x: i32, y: i32) -> bool {
        let damage = level.data(x, y);
        if damage > 0 {
            level.set_data(x, y, damage - 1);
            return true;
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
        if Some(tool.kind) != self.mined_by || !use_tool(player, tool) {
            return false;
        }
        let damage = level.rng().gen_range_i32(0, 10) + tool.level() * 5 + 10;
        self.damage(level, x, y, damage, true);
        true
    }

    fn hurt(
        &self,
        level: &mut Level,
        x: i32,
        y: i32,
        _source: Option<&Entity>,
        damage: i32,
        _dir: Direction,
    ) -> bool {
        self.damage(level, x, y, damage, false);
        true
    }
}
