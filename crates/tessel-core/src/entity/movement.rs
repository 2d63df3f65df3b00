//! Movement resolver - per-axis stepping of entity hitboxes through tiles and other entities

use smallvec::SmallVec;

use super::Entity;
use super::interaction::InteractionHandler;
use crate::simulation::Rect;
use crate::world::Level;

/// Movement resolver - static utility methods for displacing entities
///
/// Each request is split into a horizontal then a vertical axis step. An axis
/// step either commits fully or leaves the position untouched; bump and touch
/// notifications delivered on the way are never rolled back.
pub struct MovementHandler;

impl MovementHandler {
    /// Try to move `entity` by `(dx, dy)` fine units
    ///
    /// Returns true if at least one axis moved. A zero request, or any request
    /// while the level is quiescent, is a successful no-op.
    pub fn move_entity(entity: &mut Entity, level: &mut Level, dx: i32, dy: i32) -> bool {
        if level.is_quiescent() || (dx == 0 && dy == 0) {
            return true;
        }

        if entity.is_removed() || entity.level() != Some(level.depth()) {
            log::warn!(
                "[MOVE] {:?} is not on level {}; ignoring move",
                entity,
                level.depth()
            );
            return false;
        }

        // Both axes are attempted even if the first one fails, so entities slide along walls
        let moved_x = dx != 0 && Self::step(entity, level, dx, 0);
        let moved_y = dy != 0 && !entity.is_removed() && Self::step(entity, level, 0, dy);
        let moved = moved_x || moved_y;
        level.record_move(moved);

        if moved && !entity.is_removed() {
            let (xt, yt) = entity.core.tile();
            let tile = level.tile(xt, yt);
            tile.stepped_on(level, xt, yt, entity);
        }

        log::trace!(
            "[MOVE] {:?} by ({}, {}): x={} y={}",
            entity,
            dx,
            dy,
            moved_x,
            moved_y
        );
        moved
    }

    /// Single-axis step; exactly one of `dx`/`dy` is nonzero
    pub fn step(entity: &mut Entity, level: &mut Level, dx: i32, dy: i32) -> bool {
        debug_assert!(dx == 0 || dy == 0, "axis step must move along one axis");

        let from = entity.bounds();
        let to = from.translated(dx, dy);

        if !Self::bump_tiles(entity, level, &from, &to) {
            return false;
        }

        let was_inside = level.entity_ids_in_rect(&from);
        let is_inside = level.entity_ids_in_rect(&to);

        let self_id = entity.id();
        for &other in is_inside.iter().filter(|id| **id != self_id) {
            InteractionHandler::touch(entity, other, level);
        }
        if entity.is_removed() {
            return false;
        }

        // Entities overlapping before the step never block it, so overlaps can always separate
        let blocked = is_inside
            .iter()
            .filter(|id| **id != self_id && !was_inside.contains(id))
            .any(|id| level.entity(*id).is_some_and(|other| other.blocks(entity)));
        if blocked {
            return false;
        }

        entity.core.x += dx;
        entity.core.y += dy;
        level.sync_bounds(self_id, entity.bounds());
        true
    }

    /// Notify every newly covered tile and check that all of them allow passage
    fn bump_tiles(entity: &mut Entity, level: &mut Level, from: &Rect, to: &Rect) -> bool {
        let (xt0, yt0, xt1, yt1) = to.tile_span();

        for yt in yt0..=yt1 {
            for xt in xt0..=xt1 {
                if from.covers_tile(xt, yt) {
                    continue;
                }

                level.tile(xt, yt).bumped_into(level, xt, yt, entity);
                if entity.is_removed() {
                    return false;
                }

                // Bumping may have replaced the tile
                if !level.tile(xt, yt).may_pass(level, xt, yt, entity) {
                    return false;
                }
            }
        }
        true
    }

    /// Tiles an axis step from `from` to `to` would newly cover, in visiting order
    pub fn newly_covered(from: &Rect, to: &Rect) -> SmallVec<[(i32, i32); 4]> {
        let (xt0, yt0, xt1, yt1) = to.tile_span();
        let mut cells = SmallVec::new();
        for yt in yt0..=yt1 {
            for xt in xt0..=xt1 {
                if !from.covers_tile(xt, yt) {
                    cells.push((xt, yt));
                }
            }
        }
        cells
    }
}
