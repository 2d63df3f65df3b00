//! Level - one depth of the world: tile grid, entities, events, random source

use std::collections::BTreeMap;
use std::sync::Arc;

use smallvec::SmallVec;

use super::rng_trait::{LevelRng, WorldRng, step_rng};
use super::stats::StepReport;
use super::tiles::{TileRef, TileRegistry};
use super::{LevelEvent, LevelSettings, SpatialIndex, TileGrid};
use crate::entity::{Entity, EntityId, IdAuthority, ItemEntity, LifecycleManager};
use crate::simulation::{Cell, Rect, TileId};

/// Hitbox radius of dropped items
const ITEM_RADIUS: i32 = 3;

/// A single depth of the world
///
/// The level owns its tile grid and every entity attached to it. Tiles and
/// entities get `&mut Level` in their hooks; an entity being updated is taken
/// out of the level for the duration of the call (see [`Level::with_entity_mut`]).
pub struct Level {
    depth: i32,
    grid: TileGrid,
    registry: Arc<TileRegistry>,
    ids: Arc<dyn IdAuthority>,
    entities: BTreeMap<EntityId, Entity>,
    spatial: SpatialIndex,
    events: Vec<LevelEvent>,
    seed: u64,
    step: u64,
    rng: LevelRng,
    quiescent: bool,
    settings: LevelSettings,
    report: StepReport,
}

impl Level {
    /// Grass-filled level
    pub fn new(
        depth: i32,
        width: i32,
        height: i32,
        registry: Arc<TileRegistry>,
        ids: Arc<dyn IdAuthority>,
        seed: u64,
        settings: LevelSettings,
    ) -> Self {
        let grid = TileGrid::new(width, height, Cell::GRASS);
        Self::from_grid(depth, grid, registry, ids, seed, settings)
    }

    /// Level over existing cells
    pub fn from_grid(
        depth: i32,
        grid: TileGrid,
        registry: Arc<TileRegistry>,
        ids: Arc<dyn IdAuthority>,
        seed: u64,
        settings: LevelSettings,
    ) -> Self {
        log::debug!(
            "[LEVEL] Opening depth {} ({}x{}, seed {})",
            depth,
            grid.width(),
            grid.height(),
            seed
        );
        Self {
            depth,
            grid,
            registry,
            ids,
            entities: BTreeMap::new(),
            spatial: SpatialIndex::new(),
            events: Vec::new(),
            seed,
            step: 0,
            rng: step_rng(seed, depth, 0),
            quiescent: false,
            settings,
            report: StepReport::default(),
        }
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn registry(&self) -> &Arc<TileRegistry> {
        &self.registry
    }

    /// Identifier authority shared with the rest of the world
    pub fn ids(&self) -> &dyn IdAuthority {
        self.ids.as_ref()
    }

    pub fn settings(&self) -> &LevelSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: LevelSettings) {
        self.settings = settings;
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of completed steps
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Random source for the current step
    pub fn rng(&mut self) -> &mut LevelRng {
        &mut self.rng
    }

    /// While quiescent (e.g. saving), movement requests are accepted but do nothing
    pub fn is_quiescent(&self) -> bool {
        self.quiescent
    }

    pub fn set_quiescent(&mut self, quiescent: bool) {
        self.quiescent = quiescent;
    }

    // ---- tiles ----

    /// Cell at tile coordinates; outside the grid this is the boundary cell
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        self.grid
            .get(x, y)
            .unwrap_or_else(|| Cell::new(TileId::CONNECTOR))
    }

    /// Behavior for the cell at tile coordinates
    pub fn tile(&self, x: i32, y: i32) -> TileRef {
        match self.grid.get(x, y) {
            Some(cell) => self.registry.get(cell.tile_id),
            None => self.registry.boundary(),
        }
    }

    pub fn data(&self, x: i32, y: i32) -> u8 {
        self.cell(x, y).data
    }

    pub fn set_data(&mut self, x: i32, y: i32, data: u8) {
        self.write_cell(x, y, |cell| cell.data = data);
    }

    /// Replace the tile at `(x, y)`, resetting its data
    pub fn set_tile(&mut self, x: i32, y: i32, tile_id: u16) {
        self.set_tile_with_data(x, y, tile_id, 0);
    }

    pub fn set_tile_with_data(&mut self, x: i32, y: i32, tile_id: u16, data: u8) {
        self.write_cell(x, y, |cell| *cell = Cell::with_data(tile_id, data));
    }

    fn write_cell(&mut self, x: i32, y: i32, write: impl FnOnce(&mut Cell)) {
        match self.grid.get_mut(x, y) {
            Ok(cell) => write(cell),
            Err(e) => {
                log::error!("[LEVEL] Write ignored on depth {}: {}", self.depth, e);
                debug_assert!(false, "write outside level: {}", e);
            }
        }
    }

    /// Light emitted by the tile at `(x, y)`
    pub fn light_radius(&self, x: i32, y: i32) -> i32 {
        self.tile(x, y).light_radius(self, x, y)
    }

    // ---- entities ----

    /// Attach `entity` at fine position `(x, y)` and return its identifier
    pub fn add(&mut self, mut entity: Entity, x: i32, y: i32) -> EntityId {
        LifecycleManager::set_level(&mut entity.core, Some(&*self), x, y);
        let id = entity.id();
        self.spatial.update(id, entity.bounds());
        if let Some(old) = self.entities.insert(id, entity) {
            log::warn!("[LEVEL] {:?} replaced an entity with the same id", old);
        }
        id
    }

    /// Detach the entity with `id` and hand it back
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let mut entity = self.entities.remove(&id)?;
        LifecycleManager::remove(&mut entity.core, self);
        Some(entity)
    }

    /// Drop `id` from the level's bookkeeping
    ///
    /// Called by the lifecycle manager when an entity detaches.
    pub fn forget(&mut self, id: EntityId) {
        self.entities.remove(&id);
        if self.spatial.remove(id) {
            self.report.entities_removed += 1;
        }
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Attached entities in id order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Run `f` with the entity taken out of the level
    ///
    /// The entity is invisible to lookups while `f` runs, which lets it borrow
    /// the level mutably. It is put back afterwards unless it was detached.
    /// Returns `None` if no such entity is attached.
    pub fn with_entity_mut<R>(
        &mut self,
        id: EntityId,
        f: impl FnOnce(&mut Entity, &mut Level) -> R,
    ) -> Option<R> {
        let mut entity = self.entities.remove(&id)?;
        let result = f(&mut entity, self);

        if entity.is_removed() || entity.level() != Some(self.depth) {
            if self.spatial.remove(id) {
                self.report.entities_removed += 1;
            }
        } else {
            // Behaviors may set their position directly
            self.spatial.update(id, entity.bounds());
            self.entities.insert(id, entity);
        }
        Some(result)
    }

    /// Ids of entities whose hitbox overlaps `area`, ascending
    ///
    /// Includes entities currently taken out by [`Level::with_entity_mut`].
    pub fn entity_ids_in_rect(&self, area: &Rect) -> SmallVec<[EntityId; 8]> {
        self.spatial.query(area)
    }

    pub fn entities_in_rect(&self, area: &Rect) -> Vec<&Entity> {
        self.spatial
            .query(area)
            .into_iter()
            .filter_map(|id| self.entities.get(&id))
            .collect()
    }

    /// Keep the spatial index in step with a committed move
    pub fn sync_bounds(&mut self, id: EntityId, bounds: Rect) {
        if self.spatial.bounds_of(id).is_some() {
            self.spatial.update(id, bounds);
        }
    }

    /// Nearest attached player to fine position `(x, y)`; ties go to the lower id
    pub fn closest_player(&self, x: i32, y: i32) -> Option<EntityId> {
        self.entities
            .values()
            .filter(|e| e.is_player())
            .min_by_key(|e| {
                let dx = (e.x() - x) as i64;
                let dy = (e.y() - y) as i64;
                dx * dx + dy * dy
            })
            .map(|e| e.id())
    }

    /// Spawn a stack of `count` items near `(x, y)`
    pub fn drop_item(&mut self, x: i32, y: i32, item: &'static str, count: u32) -> EntityId {
        let x = x + self.rng.gen_range_i32(-5, 6);
        let y = y + self.rng.gen_range_i32(-5, 6);
        let id = self.add(
            Entity::new(ITEM_RADIUS, ITEM_RADIUS, ItemEntity::new(item, count)),
            x,
            y,
        );
        self.push_event(LevelEvent::ItemDropped { id, item, x, y });
        id
    }

    /// Spawn between `min` and `max` (inclusive) single items near `(x, y)`
    pub fn drop_items(&mut self, x: i32, y: i32, min: i32, max: i32, item: &'static str) {
        let count = self.rng.gen_range_i32(min, max + 1);
        for _ in 0..count {
            self.drop_item(x, y, item, 1);
        }
    }

    // ---- events ----

    pub fn push_event(&mut self, event: LevelEvent) {
        self.events.push(event);
    }

    pub fn play_sound(&mut self, name: &'static str, x: i32, y: i32) {
        self.push_event(LevelEvent::Sound { name, x, y });
    }

    /// Events raised since the last drain
    pub fn events(&self) -> &[LevelEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<LevelEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn record_move(&mut self, moved: bool) {
        self.report.record_move(moved);
    }

    // ---- stepping ----

    /// Advance one step
    ///
    /// Reseeds the random source from `(seed, depth, step)`, ticks every cell
    /// row-major, then ticks every attached entity in id order and applies the
    /// movement it requests.
    pub fn tick(&mut self) -> StepReport {
        self.step += 1;
        self.rng = step_rng(self.seed, self.depth, self.step);
        self.report = StepReport::new(self.step);

        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                let tile = self.tile(x, y);
                if tile.tick(self, x, y) {
                    self.report.redraw_cells += 1;
                }
            }
        }

        let ids: Vec<EntityId> = self.entities.keys().copied().collect();
        for id in ids {
            self.with_entity_mut(id, |entity, level| {
                if let Some((dx, dy)) = entity.tick(level) {
                    if !entity.is_removed() && (dx != 0 || dy != 0) {
                        entity.move_by(level, dx, dy);
                    }
                }
            });
        }

        let report = std::mem::take(&mut self.report);
        log::trace!("[LEVEL] Depth {} step {}: {:?}", self.depth, self.step, report);
        report
    }
}

impl std::fmt::Debug for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Level")
            .field("depth", &self.depth)
            .field("size", &self.grid.size())
            .field("entities", &self.entities.len())
            .field("step", &self.step)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Mob, Player};
    use crate::simulation::coords::tile_center;
    use crate::world::test_support::open_level;

    #[test]
    fn test_out_of_grid_reads_are_boundary() {
        let level = open_level(4, 4);
        assert_eq!(level.cell(-1, 0).tile_id, TileId::CONNECTOR);
        assert_eq!(level.tile(4, 0).id(), TileId::CONNECTOR);
        let player = Entity::new(4, 4, Player::new());
        assert!(!level.tile(0, -1).may_pass(&level, 0, -1, &player));
    }

    #[test]
    fn test_set_tile_resets_data() {
        let mut level = open_level(4, 4);
        level.set_tile_with_data(1, 1, TileId::FARMLAND, 4);
        assert_eq!(level.data(1, 1), 4);
        level.set_tile(1, 1, TileId::DIRT);
        assert_eq!(level.cell(1, 1), Cell::new(TileId::DIRT));
    }

    #[test]
    fn test_add_indexes_entity() {
        let mut level = open_level(8, 8);
        let id = level.add(Entity::new(4, 4, Mob::pig()), 40, 40);
        assert!(level.entity_ids_in_rect(&Rect::new(38, 38, 40, 40)).contains(&id));
        assert!(level.entity_ids_in_rect(&Rect::new(0, 0, 8, 8)).is_empty());
        assert_eq!(level.entities_in_rect(&Rect::new(38, 38, 40, 40)).len(), 1);
    }

    #[test]
    fn test_remove_unindexes_entity() {
        let mut level = open_level(8, 8);
        let id = level.add(Entity::new(4, 4, Mob::pig()), 40, 40);
        let pig = level.remove(id).unwrap();
        assert!(pig.is_removed());
        assert!(level.entity(id).is_none());
        assert!(level.entity_ids_in_rect(&Rect::new(0, 0, 128, 128)).is_empty());
    }

    #[test]
    fn test_with_entity_mut_hides_entity() {
        let mut level = open_level(8, 8);
        let id = level.add(Entity::new(4, 4, Mob::pig()), 40, 40);
        let seen = level.with_entity_mut(id, |_, level| level.entity(id).is_some());
        assert_eq!(seen, Some(false));
        assert!(level.entity(id).is_some());
        assert!(level.with_entity_mut(EntityId::from_raw(999), |_, _| ()).is_none());
    }

    #[test]
    fn test_closest_player() {
        let mut level = open_level(16, 16);
        assert!(level.closest_player(0, 0).is_none());
        let near = level.add(Entity::new(4, 4, Player::new()), 40, 40);
        let far = level.add(Entity::new(4, 4, Player::new()), 200, 200);
        level.add(Entity::new(4, 4, Mob::pig()), 10, 10);
        assert_eq!(level.closest_player(0, 0), Some(near));
        assert_eq!(level.closest_player(190, 190), Some(far));
    }

    #[test]
    fn test_drop_items_count_in_range() {
        let mut level = open_level(8, 8);
        for _ in 0..20 {
            level.drop_items(tile_center(3), tile_center(3), 1, 3, "Stone");
        }
        let events = level.drain_events();
        let drops = events
            .iter()
            .filter(|e| matches!(e, LevelEvent::ItemDropped { item: "Stone", .. }))
            .count();
        assert!((20..=60).contains(&drops));
        assert_eq!(level.entity_count(), drops);
        assert!(level.drain_events().is_empty());
    }

    #[test]
    fn test_tick_is_replayable() {
        let run = || {
            let mut level = open_level(8, 8);
            level.set_tile(2, 2, TileId::DIRT);
            level.add(Entity::new(4, 4, Mob::pig()), 64, 64);
            for _ in 0..50 {
                level.tick();
            }
            let pig = level.entities().next().map(|e| (e.x(), e.y()));
            (pig, level.grid().cells().to_vec())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_tick_reports_moves() {
        let mut level = open_level(16, 16);
        let id = level.add(Entity::new(4, 4, Player::new()), 40, 40);
        level.with_entity_mut(id, |e, _| {
            e.behavior_mut::<Player>().unwrap().request_move(1, 0)
        });
        let report = level.tick();
        assert_eq!(report.step, 1);
        assert_eq!(report.moves_attempted, 1);
        assert_eq!(report.moves_succeeded, 1);
        assert_eq!(level.entity(id).unwrap().x(), 41);
    }

    #[test]
    fn test_tick_counts_redraws() {
        let mut level = open_level(4, 4);
        level.set_tile(0, 0, TileId::FARMLAND);
        level.set_tile(3, 3, TileId::FARMLAND);
        assert_eq!(level.tick().redraw_cells, 2);
    }
}
