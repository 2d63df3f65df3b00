use std::any::Any;

use super::{Entity, EntityBehavior, EntityCore, LifecycleManager, Player};
use crate::world::{Level, LevelEvent};

/// Ticks a dropped item lies around before despawning
pub const ITEM_LIFETIME: u32 = 600;

/// An item lying on the ground, picked up when a player touches it
#[derive(Debug, Clone)]
pub struct ItemEntity {
    pub item: &'static str,
    pub count: u32,
    time: u32,
    lifetime: u32,
}

impl ItemEntity {
    pub fn new(item: &'static str, count: u32) -> Self {
        Self {
            item,
            count,
            time: 0,
            lifetime: ITEM_LIFETIME,
        }
    }

    pub fn with_lifetime(mut self, lifetime: u32) -> Self {
        self.lifetime = lifetime;
        self
    }
}

impl EntityBehavior for ItemEntity {
    fn kind_name(&self) -> &'static str {
        "Item"
    }

    fn is_solid(&self) -> bool {
        false
    }

    fn tramples(&self) -> bool {
        false
    }

    fn touched_by(&mut self, this: &mut EntityCore, level: &mut Level, other: &mut Entity) {
        if !other.is_player() || this.is_removed() {
            return;
        }
        if let Some(player) = other.behavior_mut::<Player>() {
            player.pick_up(self.item, self.count);
        }
        level.push_event(LevelEvent::ItemPickedUp {
            by: other.id(),
            item: self.item,
            count: self.count,
        });
        LifecycleManager::remove(this, level);
    }

    fn tick(&mut self, this: &mut EntityCore, level: &mut Level) -> Option<(i32, i32)> {
        self.time += 1;
        if self.time >= self.lifetime {
            LifecycleManager::remove(this, level);
        }
        None
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
