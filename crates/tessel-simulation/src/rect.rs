//! Axis-aligned rectangles for hitboxes and swept volumes

use crate::coords::to_tile;
use serde::{Deserialize, Serialize};

/// Axis-aligned box over fine coordinates, half-open: `[x0, x1) x [y0, y1)`
///
/// Built from a center and half-extents, so an entity at `(x, y)` with radii
/// `(xr, yr)` spans `2 * xr` units horizontally. A zero half-extent still
/// spans one unit, so a point-sized entity occupies exactly one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Rectangle centered on `(x, y)` with half-extents `(xr, yr)`
    pub fn from_center(x: i32, y: i32, xr: i32, yr: i32) -> Self {
        Self {
            x0: x - xr,
            y0: y - yr,
            x1: x + xr.max(1),
            y1: y + yr.max(1),
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// Same rectangle shifted by `(dx, dy)`
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x0: self.x0 + dx,
            y0: self.y0 + dy,
            x1: self.x1 + dx,
            y1: self.y1 + dy,
        }
    }

    /// Inclusive tile range covered by this rectangle: `(xt0, yt0, xt1, yt1)`
    pub fn tile_span(&self) -> (i32, i32, i32, i32) {
        (
            to_tile(self.x0),
            to_tile(self.y0),
            to_tile((self.x1 - 1).max(self.x0)),
            to_tile((self.y1 - 1).max(self.y0)),
        )
    }

    /// Whether tile `(xt, yt)` lies inside this rectangle's tile span
    pub fn covers_tile(&self, xt: i32, yt: i32) -> bool {
        let (xt0, yt0, xt1, yt1) = self.tile_span();
        xt >= xt0 && xt <= xt1 && yt >= yt0 && yt <= yt1
    }

    /// Inclusive corner points, for spatial indexes that store closed boxes
    pub fn corners(&self) -> ([i32; 2], [i32; 2]) {
        (
            [self.x0, self.y0],
            [(self.x1 - 1).max(self.x0), (self.y1 - 1).max(self.y0)],
        )
    }
}
