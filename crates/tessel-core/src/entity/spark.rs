use std::any::Any;

use super::{Direction, EntityBehavior, EntityCore, EntityId, LifecycleManager};
use crate::world::Level;

/// Non-solid projectile flying in a straight line until its lifetime runs out
///
/// Sparks ignore tile collision and hurt the closest player when its hitbox
/// covers the spark's position.
#[derive(Debug, Clone)]
pub struct Spark {
    /// Entity that fired this spark
    pub owner: EntityId,
    pub damage: i32,
    xa: f64,
    ya: f64,
    /// Sub-unit position, seeded from the core on the first tick
    pos: Option<(f64, f64)>,
    time: u32,
    lifetime: u32,
}

impl Spark {
    pub fn new(owner: EntityId, xa: f64, ya: f64, lifetime: u32) -> Self {
        Self {
            owner,
            damage: 1,
            xa,
            ya,
            pos: None,
            time: 0,
            lifetime,
        }
    }

    pub fn with_damage(mut self, damage: i32) -> Self {
        self.damage = damage;
        self
    }
}

impl EntityBehavior for Spark {
    fn kind_name(&self) -> &'static str {
        "Spark"
    }

    fn is_solid(&self) -> bool {
        false
    }

    fn tramples(&self) -> bool {
        false
    }

    fn tick(&mut self, this: &mut EntityCore, level: &mut Level) -> Option<(i32, i32)> {
        self.time += 1;

        let (xx, yy) = self.pos.unwrap_or((this.x as f64, this.y as f64));
        let (xx, yy) = (xx + self.xa, yy + self.ya);
        self.pos = Some((xx, yy));
        this.x = xx as i32;
        this.y = yy as i32;

        if let Some(target) = level.closest_player(this.x, this.y) {
            let (x, y, damage) = (this.x, this.y, self.damage);
            level.with_entity_mut(target, |player, level| {
                if player.bounds().contains_point(x, y) {
                    let dir = Direction::from_delta(player.x() - x, player.y() - y);
                    player.hurt(level, damage, dir);
                }
            });
        }

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, Player};
    use crate::simulation::Rect;
    use crate::world::test_support::open_level;

    #[test]
    fn test_flies_and_expires() {
        let mut level = open_level(16, 16);
        let id = level.add(
            Entity::new(0, 0, Spark::new(EntityId::UNSET, 1.5, 0.0, 4)),
            40,
            40,
        );
        level.tick();
        level.tick();
        assert_eq!(level.entity(id).unwrap().x(), 43);
        // Spatial index follows the direct position update
        assert!(level.entity_ids_in_rect(&Rect::new(43, 40, 44, 41)).contains(&id));
        level.tick();
        level.tick();
        assert!(level.entity(id).is_none());
    }

    #[test]
    fn test_hurts_player_on_hit() {
        let mut level = open_level(16, 16);
        let player = level.add(Entity::new(4, 4, Player::new()), 48, 40);
        level.add(
            Entity::new(0, 0, Spark::new(EntityId::UNSET, 4.0, 0.0, 100).with_damage(2)),
            40,
            40,
        );
        level.tick();
        let health = level
            .entity(player)
            .and_then(|p| p.behavior::<Player>())
            .map(|p| p.health.current)
            .unwrap();
        assert_eq!(health, 8);
    }
}
