use serde::{Deserialize, Serialize};

/// Facing / attack direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    None,
    Down,
    Up,
    Left,
    Right,
}

impl Direction {
    /// Unit step in tile space
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Down => (0, 1),
            Direction::Up => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Dominant direction of a movement delta; horizontal wins ties
    pub fn from_delta(dx: i32, dy: i32) -> Self {
        if dx == 0 && dy == 0 {
            Direction::None
        } else if dx.abs() >= dy.abs() {
            if dx > 0 { Direction::Right } else { Direction::Left }
        } else if dy > 0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }
}
