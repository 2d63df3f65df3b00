//! Demo level layout and the headless step loop

use std::collections::BTreeMap;
use std::sync::Arc;

use glam::IVec2;
use tessel_core::entity::{
    Direction, Entity, EntityId, IdAuthority, InteractionHandler, LocalIdAuthority, Mob, Player,
    Spark, Tool, ToolKind, ToolTier,
};
use tessel_core::simulation::{TileId, coords::tile_center};
use tessel_core::world::{
    Level, LevelEvent, LevelRng, StepReport, TileRegistry, WorldRng, step_rng,
};

use crate::config::SimConfig;

/// Steps between autopilot direction changes
const WALK_PERIOD: u64 = 30;
/// Steps between autopilot pickaxe swings
const SWING_PERIOD: u64 = 20;

/// Outcome of a headless run
#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    pub steps: u64,
    pub totals: StepReport,
    pub entities_left: usize,
    /// Tile id -> cell count after the last step
    pub tile_counts: BTreeMap<u16, usize>,
    pub items_dropped: u32,
    pub items_picked_up: u32,
    pub tiles_destroyed: u32,
    pub deaths: u32,
}

/// A demo level plus the players the autopilot drives
pub struct DemoScenario {
    pub level: Level,
    pub players: Vec<EntityId>,
    pickaxes: BTreeMap<EntityId, Tool>,
    headings: BTreeMap<EntityId, Direction>,
}

impl DemoScenario {
    /// Build the level and spawn the configured population
    pub fn build(config: &SimConfig) -> Self {
        let registry = Arc::new(TileRegistry::new());
        let ids: Arc<dyn IdAuthority> = Arc::new(LocalIdAuthority::new());
        Self::build_with(config, registry, ids)
    }

    pub fn build_with(
        config: &SimConfig,
        registry: Arc<TileRegistry>,
        ids: Arc<dyn IdAuthority>,
    ) -> Self {
        let world = &config.world;
        let mut level = Level::new(
            world.depth,
            world.width.max(8),
            world.height.max(8),
            registry,
            ids,
            world.seed,
            config.simulation.level_settings(),
        );
        lay_out(&mut level);

        let mut scenario = Self {
            level,
            players: Vec::new(),
            pickaxes: BTreeMap::new(),
            headings: BTreeMap::new(),
        };
        scenario.spawn(config);
        scenario
    }

    fn spawn(&mut self, config: &SimConfig) {
        let size = IVec2::new(self.level.width(), self.level.height());
        let center = size / 2;
        let mut rng = step_rng(self.level.seed(), self.level.depth(), u64::MAX);

        for i in 0..config.spawn.players as i32 {
            let at = (center + IVec2::new(i * 2, 0)).min(size - IVec2::splat(2));
            let id = self.level.add(
                Entity::new(4, 3, Player::new()),
                tile_center(at.x),
                tile_center(at.y),
            );
            self.players.push(id);
            self.pickaxes
                .insert(id, Tool::new(ToolKind::Pickaxe, ToolTier::Iron));
        }

        let random_spot = |rng: &mut LevelRng| {
            IVec2::new(
                rng.gen_range_i32(2, size.x - 2),
                rng.gen_range_i32(2, size.y - 2),
            )
        };
        for _ in 0..config.spawn.mobs {
            let at = random_spot(&mut rng);
            self.level.add(
                Entity::new(4, 3, Mob::pig()),
                tile_center(at.x),
                tile_center(at.y),
            );
        }
        for _ in 0..config.spawn.zombies {
            let at = random_spot(&mut rng);
            self.level.add(
                Entity::new(4, 3, Mob::zombie()),
                tile_center(at.x),
                tile_center(at.y),
            );
        }
        for _ in 0..config.spawn.sparks {
            let at = random_spot(&mut rng);
            let (xa, ya) = (rng.gen_f32() as f64 - 0.5, rng.gen_f32() as f64 - 0.5);
            self.level.add(
                Entity::new(0, 0, Spark::new(EntityId::UNSET, xa, ya, 120)),
                tile_center(at.x),
                tile_center(at.y),
            );
        }

        log::info!(
            "[SCENARIO] Spawned {} entities on a {}x{} level",
            self.level.entity_count(),
            size.x,
            size.y
        );
    }

    /// Drive players: walk in a heading that changes every few steps, and
    /// swing a pickaxe at the facing tile now and then
    fn drive_players(&mut self) {
        let step = self.level.step();
        let mut rng = step_rng(self.level.seed() ^ 0xA5A5, self.level.depth(), step);
        let turn = step % WALK_PERIOD == 0;
        let swing = step % SWING_PERIOD == 0;

        for &id in &self.players {
            let heading = self.headings.entry(id).or_insert(Direction::Right);
            if turn {
                *heading = match rng.gen_range_i32(0, 4) {
                    0 => Direction::Up,
                    1 => Direction::Down,
                    2 => Direction::Left,
                    _ => Direction::Right,
                };
            }
            let dir = *heading;
            let mut pickaxe = self.pickaxes.remove(&id);

            self.level.with_entity_mut(id, |player, level| {
                let (dx, dy) = dir.delta();
                if let Some(p) = player.behavior_mut::<Player>() {
                    p.request_move(dx, dy);
                }
                if swing {
                    let (xt, yt) = InteractionHandler::facing_tile(player, dir);
                    let tool = pickaxe.as_mut().filter(|t| !t.is_broken());
                    InteractionHandler::interact_tile(level, xt, yt, player, tool, dir);
                }
            });

            if let Some(tool) = pickaxe {
                self.pickaxes.insert(id, tool);
            }
        }
    }

    /// Run `steps` steps and summarise what happened
    pub fn run(&mut self, steps: u64) -> RunSummary {
        let mut summary = RunSummary::default();
        for _ in 0..steps {
            self.drive_players();
            let report = self.level.tick();
            summary.totals.accumulate(&report);

            for event in self.level.drain_events() {
                match event {
                    LevelEvent::ItemDropped { .. } => summary.items_dropped += 1,
                    LevelEvent::ItemPickedUp { .. } => summary.items_picked_up += 1,
                    LevelEvent::TileDestroyed { x, y, from, to } => {
                        summary.tiles_destroyed += 1;
                        log::debug!("[SCENARIO] Tile ({}, {}) {} -> {}", x, y, from, to);
                    }
                    LevelEvent::EntityDied { id, kind, .. } => {
                        summary.deaths += 1;
                        log::debug!("[SCENARIO] {} {} died", kind, id);
                    }
                    _ => {}
                }
            }
        }

        summary.steps = self.level.step();
        summary.entities_left = self.level.entity_count();
        for cell in self.level.grid().cells() {
            *summary.tile_counts.entry(cell.tile_id).or_insert(0) += 1;
        }
        summary
    }
}

/// Set an interior cell; the border and anything outside the grid are left alone
fn put(level: &mut Level, x: i32, y: i32, tile_id: u16) {
    if x > 0 && y > 0 && x < level.width() - 1 && y < level.height() - 1 {
        level.set_tile(x, y, tile_id);
    }
}

/// Rock border, scattered features, a farmland patch, ice spikes, a lava pool
fn lay_out(level: &mut Level) {
    let (w, h) = (level.width(), level.height());
    let mut rng = step_rng(level.seed(), level.depth(), 0);

    for y in 0..h {
        for x in 0..w {
            let border = x == 0 || y == 0 || x == w - 1 || y == h - 1;
            let id = if border || rng.one_in(14) {
                TileId::ROCK
            } else if rng.one_in(25) {
                TileId::FLOWER
            } else if rng.one_in(20) {
                TileId::DIRT
            } else if rng.one_in(40) {
                TileId::SAND
            } else if rng.one_in(60) {
                TileId::HOLE
            } else {
                TileId::GRASS
            };
            level.set_tile(x, y, id);
        }
    }

    // Farmland patch left of center
    let (fx, fy) = (w / 4, h / 2 - 1);
    for y in fy..fy + 3 {
        for x in fx..fx + 4 {
            put(level, x, y, TileId::FARMLAND);
        }
    }

    // A row of ice spikes on snow
    let sy = h / 4;
    for x in w / 2..(w / 2 + 6).min(w - 1) {
        put(level, x, sy, TileId::SNOW);
        put(level, x, sy + 1, TileId::ICE_SPIKE);
    }

    // Lava pool with an ice block freezing its edge
    let (lx, ly) = (3 * w / 4, 3 * h / 4);
    for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        put(level, lx + dx, ly + dy, TileId::LAVA);
    }
    put(level, lx + 2, ly, TileId::ICE);

    // Torches around the center
    let (cx, cy) = (w / 2, h / 2);
    for (dx, dy) in [(-3, -3), (3, -3), (-3, 3), (3, 3)] {
        put(level, cx + dx, cy + dy, TileId::GRASS + TileId::VARIANT_OFFSET);
    }

    // Keep the spawn area open
    for y in cy - 1..=cy + 1 {
        for x in cx - 1..=cx + 3 {
            put(level, x, y, TileId::GRASS);
        }
    }
}
