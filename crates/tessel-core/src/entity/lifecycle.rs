//! Lifecycle manager - attach/detach of entities and identifier assignment

use super::{Entity, EntityCore};
use crate::world::{Level, LevelEvent};

/// Lifecycle manager - static utility methods for entity bookkeeping
pub struct LifecycleManager;

impl LifecycleManager {
    /// Bind `core` to `level` at fine position `(x, y)`
    ///
    /// Attaching to no level is refused and logged. An identifier is drawn from
    /// the level's authority only if the entity has none yet.
    pub fn set_level(core: &mut EntityCore, level: Option<&Level>, x: i32, y: i32) {
        let Some(level) = level else {
            log::warn!(
                "[LIFECYCLE] Tried to set level of {} to nothing; ignoring",
                core.id
            );
            return;
        };

        core.set_level(Some(level.depth()));
        core.set_removed(false);
        core.x = x;
        core.y = y;

        if !core.id.is_set() {
            core.id = level.ids().next_id();
        } else {
            level.ids().observe(core.id);
        }
    }

    /// Detach from whatever level the entity is on
    ///
    /// Idempotent. The level's index entry is dropped if the entity was attached.
    pub fn remove(core: &mut EntityCore, level: &mut Level) {
        let was_attached = !core.is_removed();
        core.set_removed(true);
        if was_attached && core.level() == Some(level.depth()) {
            level.forget(core.id);
        }
        core.set_level(None);
    }

    /// Detach only if currently on the level at `depth`
    ///
    /// Returns false (and changes nothing) on a mismatch.
    pub fn remove_from(core: &mut EntityCore, level: &mut Level, depth: i32) -> bool {
        if core.level() != Some(depth) {
            log::debug!(
                "[LIFECYCLE] Tried to remove {} from level {} but it is on {:?}",
                core.id,
                depth,
                core.level()
            );
            return false;
        }
        Self::remove(core, level);
        true
    }

    /// Removal through game action
    ///
    /// Fires the behavior's death hook and a death event before detaching.
    pub fn die(entity: &mut Entity, level: &mut Level) {
        if entity.is_removed() {
            return;
        }
        entity.on_die(level);
        level.push_event(LevelEvent::EntityDied {
            id: entity.id(),
            kind: entity.kind_name(),
            x: entity.x(),
            y: entity.y(),
        });
        log::debug!("[LIFECYCLE] {:?} died", entity);
        Self::remove(&mut entity.core, level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityId, Mob, Player};
    use crate::world::test_support::open_level;

    #[test]
    fn test_set_level_none_is_refused() {
        let mut core = EntityCore::new(4, 4);
        LifecycleManager::set_level(&mut core, None, 10, 10);
        assert!(core.is_removed());
        assert_eq!(core.level(), None);
        assert!(!core.id.is_set());
        assert_eq!((core.x, core.y), (0, 0));
    }

    #[test]
    fn test_set_level_assigns_id_once() {
        let level = open_level(8, 8);
        let mut core = EntityCore::new(4, 4);
        LifecycleManager::set_level(&mut core, Some(&level), 24, 40);
        let first = core.id;
        assert!(first.is_set());
        assert!(!core.is_removed());
        assert_eq!(core.level(), Some(level.depth()));
        assert_eq!((core.x, core.y), (24, 40));

        LifecycleManager::set_level(&mut core, Some(&level), 8, 8);
        assert_eq!(core.id, first);
    }

    #[test]
    fn test_preassigned_id_is_kept() {
        let level = open_level(8, 8);
        let mut core = EntityCore::new(4, 4);
        core.id = EntityId::from_raw(900);
        LifecycleManager::set_level(&mut core, Some(&level), 8, 8);
        assert_eq!(core.id.raw(), 900);
        // The authority never hands out a host-assigned id afterwards
        assert!(level.ids().next_id().raw() > 900);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut level = open_level(8, 8);
        let id = level.add(Entity::new(4, 4, Player::new()), 24, 24);
        let mut entity = level.remove(id).unwrap();
        assert!(entity.is_removed());
        assert_eq!(entity.level(), None);

        LifecycleManager::remove(&mut entity.core, &mut level);
        assert!(entity.is_removed());
        assert_eq!(entity.level(), None);
    }

    #[test]
    fn test_remove_from_wrong_level_is_refused() {
        let mut level = open_level(8, 8);
        let id = level.add(Entity::new(4, 4, Mob::pig()), 24, 24);
        let removed = level
            .with_entity_mut(id, |entity, level| {
                LifecycleManager::remove_from(&mut entity.core, level, 3)
            })
            .unwrap();
        assert!(!removed);
        assert!(level.entity(id).is_some_and(|e| !e.is_removed()));

        let removed = level
            .with_entity_mut(id, |entity, level| {
                let depth = level.depth();
                LifecycleManager::remove_from(&mut entity.core, level, depth)
            })
            .unwrap();
        assert!(removed);
        assert!(level.entity(id).is_none());
    }

    #[test]
    fn test_die_emits_event_and_detaches() {
        let mut level = open_level(8, 8);
        let id = level.add(Entity::new(4, 4, Mob::pig()), 24, 24);
        level.with_entity_mut(id, |entity, level| entity.die(level));

        assert!(level.entity(id).is_none());
        let events = level.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            LevelEvent::EntityDied { id: died, kind: "Pig", .. } if *died == id
        )));
    }
}
