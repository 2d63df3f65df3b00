//! Player entity - stamina, health and pickups

use std::any::Any;
use std::collections::BTreeMap;

use super::{Direction, EntityBehavior, EntityCore, Health, Stamina};
use crate::world::{Level, LevelEvent};

/// Ticks of invulnerability after taking damage
pub const PLAYER_HURT_COOLDOWN: u32 = 10;

/// Player-controlled entity
///
/// Players dominate contact: anything a player walks into, or that walks into
/// a player, is "touched by" the player.
#[derive(Debug, Clone)]
pub struct Player {
    pub health: Health,
    pub stamina: Stamina,
    /// Invulnerability ticks remaining
    pub hurt_time: u32,
    inventory: BTreeMap<&'static str, u32>,
    /// Movement requested by the host, applied on the next tick
    pending_move: Option<(i32, i32)>,
}

impl Player {
    pub fn new() -> Self {
        Self {
            health: Health::new(10),
            stamina: Stamina::new(10, 10),
            hurt_time: 0,
            inventory: BTreeMap::new(),
            pending_move: None,
        }
    }

    /// Queue a movement for the next tick (replaces any earlier request)
    pub fn request_move(&mut self, dx: i32, dy: i32) {
        self.pending_move = Some((dx, dy));
    }

    pub fn pick_up(&mut self, item: &'static str, count: u32) {
        *self.inventory.entry(item).or_insert(0) += count;
    }

    pub fn count_item(&self, item: &str) -> u32 {
        self.inventory.get(item).copied().unwrap_or(0)
    }

    pub fn inventory(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        self.inventory.iter().map(|(k, v)| (*k, *v))
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityBehavior for Player {
    fn kind_name(&self) -> &'static str {
        "Player"
    }

    fn is_player(&self) -> bool {
        true
    }

    fn pay_stamina(&mut self, cost: i32) -> bool {
        self.stamina.pay(cost)
    }

    fn hurt(
        &mut self,
        this: &mut EntityCore,
        level: &mut Level,
        damage: i32,
        dir: Direction,
    ) -> bool {
        if self.hurt_time > 0 || damage <= 0 {
            return false;
        }
        self.hurt_time = PLAYER_HURT_COOLDOWN;
        let died = self.health.take_damage(damage);
        level.push_event(LevelEvent::EntityHurt {
            id: this.id,
            damage,
            dir,
        });
        died
    }

    fn tick(&mut self, _this: &mut EntityCore, _level: &mut Level) -> Option<(i32, i32)> {
        self.stamina.update();
        self.hurt_time = self.hurt_time.saturating_sub(1);
        self.pending_move.take()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::world::test_support::open_level;

    #[test]
    fn test_hurt_cooldown() {
        let mut level = open_level(8, 8);
        let id = level.add(Entity::new(4, 4, Player::new()), 24, 24);
        level.with_entity_mut(id, |p, level| {
            p.hurt(level, 3, Direction::Left);
            p.hurt(level, 3, Direction::Left);
        });
        let player = level.entity(id).unwrap().behavior::<Player>().unwrap();
        assert_eq!(player.health.current, 7);
        assert_eq!(player.hurt_time, PLAYER_HURT_COOLDOWN);
    }

    #[test]
    fn test_lethal_damage_removes_player() {
        let mut level = open_level(8, 8);
        let id = level.add(Entity::new(4, 4, Player::new()), 24, 24);
        level.with_entity_mut(id, |p, level| p.hurt(level, 50, Direction::Up));
        assert!(level.entity(id).is_none());
    }

    #[test]
    fn test_pending_move_applied_once() {
        let mut level = open_level(8, 8);
        let id = level.add(Entity::new(4, 4, Player::new()), 24, 24);
        level.with_entity_mut(id, |p, _| {
            p.behavior_mut::<Player>().unwrap().request_move(4, 0)
        });
        level.tick();
        level.tick();
        assert_eq!(level.entity(id).unwrap().x(), 28);
    }

    #[test]
    fn test_inventory_counts() {
        let mut player = Player::new();
        player.pick_up("Apple", 2);
        player.pick_up("Apple", 1);
        player.pick_up("Stone", 4);
        assert_eq!(player.count_item("Apple"), 3);
        assert_eq!(player.count_item("Coal"), 0);
        assert_eq!(
            player.inventory().collect::<Vec<_>>(),
            vec![("Apple", 3), ("Stone", 4)]
        );
    }
}
