//! Simple wandering mobs

use std::any::Any;

use super::{Direction, Entity, EntityBehavior, EntityCore, Health};
use crate::simulation::TILE_SIZE;
use crate::world::{Difficulty, Level, LevelEvent, WorldRng};

/// Mob kinds with built-in stats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MobKind {
    /// Passive, drops raw pork
    Pig,
    /// Hostile, chases and damages players on contact
    Zombie,
}

/// Ticks a wander direction is kept before rerolling
const WALK_TIME: u32 = 60;

/// Zombies notice players within this many tiles
const CHASE_RADIUS: i32 = 8;

/// A wandering mob with health and a drop table
#[derive(Debug, Clone)]
pub struct Mob {
    pub kind: MobKind,
    pub health: Health,
    walk: (i32, i32),
    walk_time: u32,
}

impl Mob {
    pub fn new(kind: MobKind) -> Self {
        let health = match kind {
            MobKind::Pig => Health::new(10),
            MobKind::Zombie => Health::new(15),
        };
        Self {
            kind,
            health,
            walk: (0, 0),
            walk_time: 0,
        }
    }

    pub fn pig() -> Self {
        Self::new(MobKind::Pig)
    }

    pub fn zombie() -> Self {
        Self::new(MobKind::Zombie)
    }

    /// Contact damage dealt to players
    pub fn attack(&self, difficulty: Difficulty) -> i32 {
        match self.kind {
            MobKind::Pig => 0,
            MobKind::Zombie => 1 + difficulty.index(),
        }
    }

    /// Item and count range dropped on death
    pub fn drops(&self, difficulty: Difficulty) -> (&'static str, i32, i32) {
        match self.kind {
            MobKind::Pig => match difficulty {
                Difficulty::Peaceful | Difficulty::Easy => ("Raw Pork", 1, 3),
                Difficulty::Normal => ("Raw Pork", 1, 2),
                Difficulty::Hard => ("Raw Pork", 0, 2),
            },
            MobKind::Zombie => ("Cloth", 1, 2),
        }
    }

    fn wander(&mut self, level: &mut Level) -> (i32, i32) {
        let rng = level.rng();
        if self.walk_time == 0 || rng.one_in(200) {
            self.walk = (rng.gen_range_i32(-1, 2), rng.gen_range_i32(-1, 2));
            self.walk_time = WALK_TIME;
        }
        self.walk_time -= 1;
        self.walk
    }

    fn chase(&self, this: &EntityCore, level: &Level) -> Option<(i32, i32)> {
        let target = level.closest_player(this.x, this.y)?;
        let player = level.entity(target)?;
        let (dx, dy) = (player.x() - this.x, player.y() - this.y);
        let reach = CHASE_RADIUS * TILE_SIZE;
        if dx.abs() > reach || dy.abs() > reach {
            return None;
        }
        Some((dx.signum(), dy.signum()))
    }
}

impl EntityBehavior for Mob {
    fn kind_name(&self) -> &'static str {
        match self.kind {
            MobKind::Pig => "Pig",
            MobKind::Zombie => "Zombie",
        }
    }

    fn touched_by(&mut self, this: &mut EntityCore, level: &mut Level, other: &mut Entity) {
        if !other.is_player() {
            return;
        }
        let damage = self.attack(level.settings().difficulty);
        if damage > 0 {
            let dir = Direction::from_delta(other.x() - this.x, other.y() - this.y);
            other.hurt(level, damage, dir);
        }
    }

    fn hurt(
        &mut self,
        this: &mut EntityCore,
        level: &mut Level,
        damage: i32,
        dir: Direction,
    ) -> bool {
        let died = self.health.take_damage(damage);
        level.push_event(LevelEvent::EntityHurt {
            id: this.id,
            damage,
            dir,
        });
        died
    }

    fn on_die(&mut self, this: &EntityCore, level: &mut Level) {
        let (item, min, max) = self.drops(level.settings().difficulty);
        level.drop_items(this.x, this.y, min, max, item);
    }

    fn tick(&mut self, this: &mut EntityCore, level: &mut Level) -> Option<(i32, i32)> {
        if self.kind == MobKind::Zombie && level.settings().difficulty != Difficulty::Peaceful {
            if let Some(step) = self.chase(this, level) {
                return Some(step);
            }
        }
        let step = self.wander(level);
        (step != (0, 0)).then_some(step)
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
    use crate::entity::Player;
    use crate::world::test_support::{open_level, open_level_with};
    use crate::world::LevelSettings;

    #[test]
    fn test_pig_drops_by_difficulty() {
        let pig = Mob::pig();
        assert_eq!(pig.drops(Difficulty::Easy), ("Raw Pork", 1, 3));
        assert_eq!(pig.drops(Difficulty::Normal), ("Raw Pork", 1, 2));
        assert_eq!(pig.drops(Difficulty::Hard), ("Raw Pork", 0, 2));
    }

    #[test]
    fn test_death_spawns_drops() {
        let mut level = open_level_with(
            8,
            8,
            LevelSettings {
                difficulty: Difficulty::Easy,
                ..Default::default()
            },
        );
        let id = level.add(Entity::new(4, 4, Mob::pig()), 40, 40);
        level.with_entity_mut(id, |pig, level| pig.hurt(level, 100, Direction::Left));

        assert!(level.entity(id).is_none());
        let dropped: usize = level
            .entities()
            .filter(|e| e.kind_name() == "Item")
            .count();
        assert!((1..=3).contains(&dropped), "dropped {}", dropped);
    }

    #[test]
    fn test_zombie_chases_player() {
        let mut level = open_level(16, 16);
        level.add(Entity::new(4, 4, Player::new()), 120, 40);
        let zombie = level.add(Entity::new(4, 4, Mob::zombie()), 40, 40);
        for _ in 0..10 {
            level.tick();
        }
        assert_eq!(level.entity(zombie).unwrap().x(), 50);
    }

    #[test]
    fn test_attack_scales_with_difficulty() {
        assert_eq!(Mob::zombie().attack(Difficulty::Peaceful), 1);
        assert_eq!(Mob::zombie().attack(Difficulty::Hard), 4);
        assert_eq!(Mob::pig().attack(Difficulty::Hard), 0);
    }

    #[test]
    fn test_wander_stays_on_level() {
        let mut level = open_level(8, 8);
        let id = level.add(Entity::new(4, 4, Mob::pig()), 64, 64);
        for _ in 0..500 {
            level.tick();
        }
        let pig = level.entity(id).unwrap();
        assert!(pig.x() >= 0 && pig.x() < 8 * TILE_SIZE);
        assert!(pig.y() >= 0 && pig.y() < 8 * TILE_SIZE);
    }
}
