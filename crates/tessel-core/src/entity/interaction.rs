//! Interaction handler - entity contact and deliberate tile use

use super::{Direction, Entity, EntityId, Tool, ToolKind};
use crate::world::WorldRng;
use crate::world::Level;

/// Interaction handler - static utility methods for contact and tile use
pub struct InteractionHandler;

impl InteractionHandler {
    /// Deliver a touch between the moving `mover` and the attached entity `other`
    ///
    /// Players dominate contact: when `other` is a player and the mover is not,
    /// the mover is the one touched. Otherwise `other` is touched by the mover.
    /// Returns false if `other` is not currently available on the level.
    pub fn touch(mover: &mut Entity, other: EntityId, level: &mut Level) -> bool {
        if other == mover.id() {
            return false;
        }
        level
            .with_entity_mut(other, |other, level| {
                if other.is_player() && !mover.is_player() {
                    mover.touched_by(level, other);
                } else {
                    other.touched_by(level, mover);
                }
            })
            .is_some()
    }

    /// Deliberate use of another entity by `player`
    ///
    /// Falls back to a melee attack when the entity does not consume the action
    /// and the player holds a sword. Returns true if anything happened.
    pub fn interact_entity(
        level: &mut Level,
        target: &mut Entity,
        player: &mut Entity,
        mut tool: Option<&mut Tool>,
        dir: Direction,
    ) -> bool {
        if target.interact(level, player, tool.as_deref_mut(), dir) {
            return true;
        }

        let Some(sword) = tool.filter(|t| t.kind == ToolKind::Sword) else {
            return false;
        };
        if !player.pay_stamina(sword.stamina_cost()) || !sword.pay_durability() {
            return false;
        }
        let damage = Self::melee_damage(level, sword);
        log::debug!("[INTERACT] {:?} hit {:?} for {}", player, target, damage);
        target.hurt(level, damage, dir);
        true
    }

    /// Sword damage: tier bonus plus a small random spread
    pub fn melee_damage(level: &mut Level, sword: &Tool) -> i32 {
        let spread = level.rng().gen_range_i32(0, 3);
        (sword.level() + 1) * 2 + spread
    }

    /// Deliberate use of a tile by `player`, optionally holding `tool`
    ///
    /// Returns true if the tile consumed the action.
    pub fn interact_tile(
        level: &mut Level,
        xt: i32,
        yt: i32,
        player: &mut Entity,
        tool: Option<&mut Tool>,
        dir: Direction,
    ) -> bool {
        let tile = level.tile(xt, yt);
        let consumed = tile.interact(level, xt, yt, player, tool, dir);
        if consumed {
            log::debug!(
                "[INTERACT] {:?} used {} at ({}, {})",
                player,
                tile.name(),
                xt,
                yt
            );
        }
        consumed
    }

    /// Apply combat damage to a tile. Returns true if the tile reacted.
    pub fn hurt_tile(
        level: &mut Level,
        xt: i32,
        yt: i32,
        source: Option<&Entity>,
        damage: i32,
        dir: Direction,
    ) -> bool {
        let tile = level.tile(xt, yt);
        tile.hurt(level, xt, yt, source, damage, dir)
    }

    /// Tile in front of `entity` when facing `dir`
    pub fn facing_tile(entity: &Entity, dir: Direction) -> (i32, i32) {
        let (xt, yt) = entity.core.tile();
        let (dx, dy) = dir.delta();
        (xt + dx, yt + dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Mob, Player, ToolKind, ToolTier};
    use crate::simulation::{TileId, coords::tile_center};
    use crate::world::test_support::open_level;

    fn player_health(level: &Level, id: EntityId) -> i32 {
        level
            .entity(id)
            .and_then(|e| e.behavior::<Player>())
            .map(|p| p.health.current)
            .unwrap()
    }

    #[test]
    fn test_mob_moving_into_player_is_touched_by_player() {
        let mut level = open_level(8, 8);
        let player = level.add(Entity::new(4, 4, Player::new()), 24, 24);
        let zombie = level.add(Entity::new(4, 4, Mob::zombie()), 30, 24);
        let before = player_health(&level, player);

        let delivered = level
            .with_entity_mut(zombie, |z, level| {
                InteractionHandler::touch(z, player, level)
            })
            .unwrap();
        assert!(delivered);
        assert!(player_health(&level, player) < before);
    }

    #[test]
    fn test_player_moving_into_mob_touches_mob() {
        let mut level = open_level(8, 8);
        let player = level.add(Entity::new(4, 4, Player::new()), 24, 24);
        let zombie = level.add(Entity::new(4, 4, Mob::zombie()), 30, 24);
        let before = player_health(&level, player);

        level.with_entity_mut(player, |p, level| {
            InteractionHandler::touch(p, zombie, level)
        });
        assert!(player_health(&level, player) < before);
    }

    #[test]
    fn test_passive_mobs_ignore_contact() {
        let mut level = open_level(8, 8);
        let player = level.add(Entity::new(4, 4, Player::new()), 24, 24);
        let pig = level.add(Entity::new(4, 4, Mob::pig()), 30, 24);
        let before = player_health(&level, player);

        level.with_entity_mut(pig, |p, level| InteractionHandler::touch(p, player, level));
        assert_eq!(player_health(&level, player), before);
    }

    #[test]
    fn test_touch_self_is_ignored() {
        let mut level = open_level(8, 8);
        let player = level.add(Entity::new(4, 4, Player::new()), 24, 24);
        let delivered = level
            .with_entity_mut(player, |p, level| InteractionHandler::touch(p, player, level))
            .unwrap();
        assert!(!delivered);
    }

    #[test]
    fn test_sword_attack_hurts_mob() {
        let mut level = open_level(8, 8);
        let pig = level.add(Entity::new(4, 4, Mob::pig()), 40, 24);
        let mut player = Entity::new(4, 4, Player::new());
        let mut sword = Tool::new(ToolKind::Sword, ToolTier::Gem);

        let hit = level
            .with_entity_mut(pig, |pig, level| {
                InteractionHandler::interact_entity(
                    level,
                    pig,
                    &mut player,
                    Some(&mut sword),
                    Direction::Right,
                )
            })
            .unwrap();
        assert!(hit);
        assert_eq!(sword.durability, ToolTier::Gem.max_durability() - 1);
        // Gem sword deals at least 10, more than a pig's health
        assert!(level.entity(pig).is_none());
    }

    #[test]
    fn test_interact_entity_without_sword() {
        let mut level = open_level(8, 8);
        let pig = level.add(Entity::new(4, 4, Mob::pig()), 40, 24);
        let mut player = Entity::new(4, 4, Player::new());
        let mut shovel = Tool::new(ToolKind::Shovel, ToolTier::Wood);
        let hit = level
            .with_entity_mut(pig, |pig, level| {
                InteractionHandler::interact_entity(
                    level,
                    pig,
                    &mut player,
                    Some(&mut shovel),
                    Direction::Right,
                )
            })
            .unwrap();
        assert!(!hit);
        assert!(level.entity(pig).is_some());
    }

    #[test]
    fn test_touch_missing_entity() {
        let mut level = open_level(8, 8);
        let mut player = Entity::new(4, 4, Player::new());
        assert!(!InteractionHandler::touch(
            &mut player,
            EntityId::from_raw(404),
            &mut level
        ));
    }

    #[test]
    fn test_interact_tile_shovel_on_grass() {
        let mut level = open_level(8, 8);
        let mut player = Entity::new(4, 4, Player::new());
        let mut shovel = Tool::new(ToolKind::Shovel, ToolTier::Gem);

        let consumed = InteractionHandler::interact_tile(
            &mut level,
            3,
            2,
            &mut player,
            Some(&mut shovel),
            Direction::Right,
        );
        assert!(consumed);
        assert_eq!(level.cell(3, 2).tile_id, TileId::DIRT);
    }

    #[test]
    fn test_interact_without_tool_is_not_consumed() {
        let mut level = open_level(8, 8);
        let mut player = Entity::new(4, 4, Player::new());
        assert!(!InteractionHandler::interact_tile(
            &mut level,
            2,
            1,
            &mut player,
            None,
            Direction::Right
        ));
        assert_eq!(level.cell(2, 1).tile_id, TileId::GRASS);
    }

    #[test]
    fn test_facing_tile() {
        let mut player = Entity::new(4, 4, Player::new());
        player.core.x = tile_center(3);
        player.core.y = tile_center(4);
        assert_eq!(InteractionHandler::facing_tile(&player, Direction::Up), (3, 3));
        assert_eq!(InteractionHandler::facing_tile(&player, Direction::Right), (4, 4));
    }
}
