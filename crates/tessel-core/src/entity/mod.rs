//! Entities - positioned actors with hitboxes, and the systems that move them

pub mod direction;
#[allow(clippy::module_inception)]
mod entity;
pub mod health;
mod id;
mod interaction;
mod item_entity;
mod lifecycle;
mod mob;
mod movement;
mod player;
mod spark;
pub mod tools;

pub use direction::Direction;
pub use entity::{Entity, EntityBehavior, EntityCore};
pub use health::{Health, Stamina};
pub use id::{EntityId, IdAuthority, LocalIdAuthority};
pub use interaction::InteractionHandler;
pub use item_entity::{ITEM_LIFETIME, ItemEntity};
pub use lifecycle::LifecycleManager;
pub use mob::{Mob, MobKind};
pub use movement::MovementHandler;
pub use player::{PLAYER_HURT_COOLDOWN, Player};
pub use spark::Spark;
pub use tools::{Tool, ToolKind, ToolTier};
