//! Effects raised during a step for hosts to consume afterwards

use crate::entity::{Direction, EntityId};

/// Something that happened on a level this step
///
/// Rendering, audio and persistence never run inside a step; they drain these
/// after the step settles.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelEvent {
    /// An item entity was spawned at fine coordinates
    ItemDropped {
        id: EntityId,
        item: &'static str,
        x: i32,
        y: i32,
    },
    ItemPickedUp {
        by: EntityId,
        item: &'static str,
        count: u32,
    },
    /// A tile took damage but survived
    TileHurt {
        x: i32,
        y: i32,
        tile: u16,
        damage: i32,
    },
    /// A tile was replaced after being destroyed
    TileDestroyed { x: i32, y: i32, from: u16, to: u16 },
    EntityHurt {
        id: EntityId,
        damage: i32,
        dir: Direction,
    },
    EntityDied {
        id: EntityId,
        kind: &'static str,
        x: i32,
        y: i32,
    },
    /// Sound cue at fine coordinates
    Sound {
        name: &'static str,
        x: i32,
        y: i32,
    },
}
