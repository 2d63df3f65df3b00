//! Tools used for deliberate tile interaction

use serde::{Deserialize, Serialize};

/// Tool types with different use cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    /// Digging ground tiles
    Shovel,
    /// Tilling ground into farmland
    Hoe,
    /// Breaking rock, ore and ice
    Pickaxe,
    /// Felling trees
    Axe,
    /// Combat
    Sword,
    /// Picking up placed objects (torches, furniture)
    PowerGlove,
}

/// Tool tier affects stamina cost and durability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ToolTier {
    Wood,
    Rock,
    Iron,
    Gold,
    Gem,
}

impl ToolTier {
    /// Numeric level (0 = wood)
    pub fn level(&self) -> i32 {
        match self {
            ToolTier::Wood => 0,
            ToolTier::Rock => 1,
            ToolTier::Iron => 2,
            ToolTier::Gold => 3,
            ToolTier::Gem => 4,
        }
    }

    /// Get the max durability for this tier
    pub fn max_durability(&self) -> i32 {
        match self {
            ToolTier::Wood => 20,
            ToolTier::Rock => 40,
            ToolTier::Iron => 80,
            ToolTier::Gold => 160,
            ToolTier::Gem => 320,
        }
    }
}

/// A tool held by the interacting player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    pub kind: ToolKind,
    pub tier: ToolTier,
    pub durability: i32,
}

impl Tool {
    pub fn new(kind: ToolKind, tier: ToolTier) -> Self {
        Self {
            kind,
            tier,
            durability: tier.max_durability(),
        }
    }

    pub fn level(&self) -> i32 {
        self.tier.level()
    }

    /// Stamina a player pays to use this tool on a tile
    pub fn stamina_cost(&self) -> i32 {
        (4 - self.level()).max(0)
    }

    /// Spend one use. Returns false (and changes nothing) when the tool is worn out.
    pub fn pay_durability(&mut self) -> bool {
        if self.kind == ToolKind::PowerGlove {
            return true;
        }
        if self.durability <= 0 {
            return false;
        }
        self.durability -= 1;
        true
    }

    pub fn is_broken(&self) -> bool {
        self.kind != ToolKind::PowerGlove && self.durability <= 0
    }
}
