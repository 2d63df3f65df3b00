//! Entity record and the behavior hooks content entities override

use std::any::Any;
use std::fmt;

use super::lifecycle::LifecycleManager;
use super::movement::MovementHandler;
use super::{Direction, EntityId, Tool};
use crate::simulation::{Rect, TILE_SIZE, coords};
use crate::world::Level;

/// State every entity carries regardless of kind
///
/// Coordinates are fine (entity) coordinates, 16 per tile. `xr`/`yr` are the
/// hitbox half-extents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityCore {
    pub id: EntityId,
    pub x: i32,
    pub y: i32,
    pub xr: i32,
    pub yr: i32,
    /// Set whenever the entity is not attached to a level
    removed: bool,
    /// Depth of the level this entity is attached to
    level: Option<i32>,
}

impl EntityCore {
    /// A detached core with no identifier
    pub fn new(xr: i32, yr: i32) -> Self {
        Self {
            id: EntityId::UNSET,
            x: 0,
            y: 0,
            xr,
            yr,
            removed: true,
            level: None,
        }
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Depth of the level this entity is on
    pub fn level(&self) -> Option<i32> {
        self.level
    }

    pub(crate) fn set_removed(&mut self, removed: bool) {
        self.removed = removed;
    }

    pub(crate) fn set_level(&mut self, level: Option<i32>) {
        self.level = level;
    }

    /// Hitbox at the current position
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.x, self.y, self.xr, self.yr)
    }

    /// Hitbox shifted by `(dx, dy)`
    pub fn bounds_at(&self, dx: i32, dy: i32) -> Rect {
        Rect::from_center(self.x + dx, self.y + dy, self.xr, self.yr)
    }

    pub fn is_touching(&self, area: &Rect) -> bool {
        area.intersects(&self.bounds())
    }

    /// Tile the entity's position lies in
    pub fn tile(&self) -> (i32, i32) {
        coords::tile_of(self.x, self.y)
    }

    /// Whether both entities are on the same level and within `tile_radius` tiles
    pub fn is_within(&self, tile_radius: i32, other: &EntityCore) -> bool {
        let same_level = matches!((self.level, other.level), (Some(a), Some(b)) if a == b);
        if !same_level {
            return false;
        }
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        dx.hypot(dy) <= (tile_radius * TILE_SIZE) as f64
    }
}

/// Kind-specific hooks for entities
///
/// One implementation per content kind (player, mob, item, projectile).
/// Hooks receive the entity's core separately so they can mutate shared state
/// without borrowing the whole entity.
pub trait EntityBehavior: Any {
    /// Short kind name for logs and events
    fn kind_name(&self) -> &'static str;

    /// If this entity stops other solid entities from moving
    fn is_solid(&self) -> bool {
        true
    }

    /// Player-like entities dominate mutual contact
    fn is_player(&self) -> bool {
        false
    }

    fn can_swim(&self) -> bool {
        false
    }

    /// Whether stepping on a tile should apply trampling effects
    fn tramples(&self) -> bool {
        true
    }

    /// Determines if `other` should be prevented from moving into this entity
    fn blocks(&self, _this: &EntityCore, other: &Entity) -> bool {
        self.is_solid() && other.is_solid()
    }

    /// Contact with `other` during a movement step
    fn touched_by(&mut self, _this: &mut EntityCore, _level: &mut Level, _other: &mut Entity) {}

    /// Deliberate use by `player`. Returns true if the action was consumed.
    fn interact(
        &mut self,
        _this: &mut EntityCore,
        _level: &mut Level,
        _player: &mut Entity,
        _tool: Option<&mut Tool>,
        _dir: Direction,
    ) -> bool {
        false
    }

    /// Apply damage. Returns true if the entity died from it.
    fn hurt(
        &mut self,
        _this: &mut EntityCore,
        _level: &mut Level,
        _damage: i32,
        _dir: Direction,
    ) -> bool {
        false
    }

    /// Called once when the entity dies through game action, before removal
    fn on_die(&mut self, _this: &EntityCore, _level: &mut Level) {}

    /// Spend stamina for a deliberate action
    fn pay_stamina(&mut self, _cost: i32) -> bool {
        false
    }

    fn light_radius(&self) -> i32 {
        0
    }

    /// Advance one step. Returns a movement request to resolve afterwards.
    fn tick(&mut self, _this: &mut EntityCore, _level: &mut Level) -> Option<(i32, i32)> {
        None
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A positioned simulation object with a hitbox
pub struct Entity {
    pub core: EntityCore,
    behavior: Box<dyn EntityBehavior>,
}

impl Entity {
    /// Create a detached entity with hitbox half-extents `(xr, yr)`
    pub fn new(xr: i32, yr: i32, behavior: impl EntityBehavior) -> Self {
        Self {
            core: EntityCore::new(xr, yr),
            behavior: Box::new(behavior),
        }
    }

    /// Create a detached entity carrying a pre-assigned identifier
    pub fn with_id(id: EntityId, xr: i32, yr: i32, behavior: impl EntityBehavior) -> Self {
        let mut entity = Self::new(xr, yr, behavior);
        entity.core.id = id;
        entity
    }

    pub fn id(&self) -> EntityId {
        self.core.id
    }

    pub fn x(&self) -> i32 {
        self.core.x
    }

    pub fn y(&self) -> i32 {
        self.core.y
    }

    pub fn bounds(&self) -> Rect {
        self.core.bounds()
    }

    pub fn is_removed(&self) -> bool {
        self.core.is_removed()
    }

    pub fn level(&self) -> Option<i32> {
        self.core.level()
    }

    pub fn kind_name(&self) -> &'static str {
        self.behavior.kind_name()
    }

    pub fn is_solid(&self) -> bool {
        self.behavior.is_solid()
    }

    pub fn is_player(&self) -> bool {
        self.behavior.is_player()
    }

    pub fn can_swim(&self) -> bool {
        self.behavior.can_swim()
    }

    pub fn tramples(&self) -> bool {
        self.behavior.tramples()
    }

    pub fn light_radius(&self) -> i32 {
        self.behavior.light_radius()
    }

    /// Whether this entity prevents `other` from moving into it
    pub fn blocks(&self, other: &Entity) -> bool {
        self.behavior.blocks(&self.core, other)
    }

    pub fn touched_by(&mut self, level: &mut Level, other: &mut Entity) {
        self.behavior.touched_by(&mut self.core, level, other);
    }

    pub fn interact(
        &mut self,
        level: &mut Level,
        player: &mut Entity,
        tool: Option<&mut Tool>,
        dir: Direction,
    ) -> bool {
        self.behavior.interact(&mut self.core, level, player, tool, dir)
    }

    /// Damage this entity; dies (and detaches) if the behavior reports death
    pub fn hurt(&mut self, level: &mut Level, damage: i32, dir: Direction) {
        if self.core.is_removed() {
            return;
        }
        if self.behavior.hurt(&mut self.core, level, damage, dir) {
            self.die(level);
        }
    }

    pub fn pay_stamina(&mut self, cost: i32) -> bool {
        self.behavior.pay_stamina(cost)
    }

    pub fn is_within(&self, tile_radius: i32, other: &Entity) -> bool {
        self.core.is_within(tile_radius, &other.core)
    }

    /// Nearest player on this entity's level; a player finds itself when `include_self`
    pub fn closest_player(&self, level: &Level, include_self: bool) -> Option<EntityId> {
        if include_self && self.is_player() {
            return Some(self.id());
        }
        if self.core.level() != Some(level.depth()) {
            return None;
        }
        level.closest_player(self.core.x, self.core.y)
    }

    /// Attempt to move by `(dx, dy)`. Returns true unless both axes were blocked.
    pub fn move_by(&mut self, level: &mut Level, dx: i32, dy: i32) -> bool {
        MovementHandler::move_entity(self, level, dx, dy)
    }

    /// Removal through game action (drops, scoring hooks fire)
    pub fn die(&mut self, level: &mut Level) {
        LifecycleManager::die(self, level);
    }

    /// Incidental removal (unloading, despawning)
    pub fn remove(&mut self, level: &mut Level) {
        LifecycleManager::remove(&mut self.core, level);
    }

    pub(crate) fn on_die(&mut self, level: &mut Level) {
        self.behavior.on_die(&self.core, level);
    }

    pub(crate) fn tick(&mut self, level: &mut Level) -> Option<(i32, i32)> {
        self.behavior.tick(&mut self.core, level)
    }

    /// Borrow the behavior as a concrete kind
    pub fn behavior<T: EntityBehavior>(&self) -> Option<&T> {
        self.behavior.as_any().downcast_ref::<T>()
    }

    pub fn behavior_mut<T: EntityBehavior>(&mut self) -> Option<&mut T> {
        self.behavior.as_any_mut().downcast_mut::<T>()
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.core.id == other.core.id
    }
}

impl Eq for Entity {}

impl std::hash::Hash for Entity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.core.id.hash(state);
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(eid={}, x={}, y={})",
            self.kind_name(),
            self.core.id.raw(),
            self.core.x,
            self.core.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{ItemEntity, Mob, Player};

    #[test]
    fn test_new_entity_is_detached() {
        let entity = Entity::new(4, 3, Player::new());
        assert!(entity.is_removed());
        assert_eq!(entity.level(), None);
        assert!(!entity.id().is_set());
    }

    #[test]
    fn test_equality_by_id_only() {
        let a = Entity::with_id(EntityId::from_raw(7), 4, 4, Player::new());
        let mut b = Entity::with_id(EntityId::from_raw(7), 2, 2, Mob::pig());
        b.core.x = 500;
        let c = Entity::with_id(EntityId::from_raw(8), 4, 4, Player::new());
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_blocks_requires_both_solid() {
        let player = Entity::new(4, 4, Player::new());
        let mob = Entity::new(4, 4, Mob::pig());
        let item = Entity::new(3, 3, ItemEntity::new("Apple", 1));
        assert!(mob.blocks(&player));
        assert!(player.blocks(&mob));
        assert!(!mob.blocks(&item));
        assert!(!item.blocks(&mob));
    }

    #[test]
    fn test_is_within_requires_same_level() {
        let mut a = EntityCore::new(4, 4);
        let mut b = EntityCore::new(4, 4);
        a.x = 10;
        b.x = 20;
        assert!(!a.is_within(5, &b));

        a.set_level(Some(0));
        b.set_level(Some(0));
        assert!(a.is_within(1, &b));
        assert!(!a.is_within(0, &b));

        b.set_level(Some(-1));
        assert!(!a.is_within(5, &b));
    }

    #[test]
    fn test_is_touching_uses_half_open_bounds() {
        let mut core = EntityCore::new(4, 4);
        core.x = 20;
        core.y = 20;
        assert!(core.is_touching(&Rect::new(23, 23, 30, 30)));
        // Right edge is exclusive
        assert!(!core.is_touching(&Rect::new(24, 16, 30, 24)));
    }

    #[test]
    fn test_behavior_downcast() {
        let entity = Entity::new(4, 4, Player::new());
        assert!(entity.behavior::<Player>().is_some());
        assert!(entity.behavior::<Mob>().is_none());
    }

    #[test]
    fn test_debug_format_includes_kind_and_id() {
        let entity = Entity::with_id(EntityId::from_raw(12), 4, 4, Mob::pig());
        assert_eq!(format!("{:?}", entity), "Pig(eid=12, x=0, y=0)");
    }
}
