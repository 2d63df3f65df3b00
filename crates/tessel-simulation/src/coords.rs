//! Fine (entity) and tile coordinate conversion
//!
//! Entities live on a fine grid where each tile spans 16x16 units. A 128x128
//! tile level is therefore 2048x2048 in entity coordinates. Conversion floors
//! toward negative infinity so that fine coordinate -1 belongs to tile -1,
//! not tile 0.

/// Size of a tile in fine units
pub const TILE_SIZE: i32 = 16;

/// log2(TILE_SIZE)
pub const TILE_SHIFT: u32 = 4;

/// Tile coordinate containing the fine coordinate `v`
#[inline]
pub fn to_tile(v: i32) -> i32 {
    v.div_euclid(TILE_SIZE)
}

/// Fine coordinate of the top-left corner of tile `t`
#[inline]
pub fn to_fine(t: i32) -> i32 {
    t * TILE_SIZE
}

/// Fine coordinate of the center of tile `t`
#[inline]
pub fn tile_center(t: i32) -> i32 {
    to_fine(t) + TILE_SIZE / 2
}

/// Tile containing the fine point `(x, y)`
#[inline]
pub fn tile_of(x: i32, y: i32) -> (i32, i32) {
    (to_tile(x), to_tile(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_tile_positive() {
        assert_eq!(to_tile(0), 0);
        assert_eq!(to_tile(15), 0);
        assert_eq!(to_tile(16), 1);
        assert_eq!(to_tile(2047), 127);
    }

    #[test]
    fn test_to_tile_negative_floors() {
        assert_eq!(to_tile(-1), -1);
        assert_eq!(to_tile(-16), -1);
        assert_eq!(to_tile(-17), -2);
    }

    #[test]
    fn test_to_tile_matches_arithmetic_shift() {
        for v in -100..100 {
            assert_eq!(to_tile(v), v >> TILE_SHIFT);
        }
    }

    #[test]
    fn test_center_round_trips() {
        for t in -5..5 {
            assert_eq!(to_tile(tile_center(t)), t);
            assert_eq!(to_tile(to_fine(t)), t);
        }
        assert_eq!(tile_center(5), 88);
    }
}
