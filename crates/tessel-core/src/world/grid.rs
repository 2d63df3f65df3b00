//! Tile grid storage for a level

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::LevelError;
use crate::simulation::Cell;

/// Dense row-major grid of cells
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TileGrid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl TileGrid {
    /// Create a grid filled with `fill`
    pub fn new(width: i32, height: i32, fill: Cell) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![fill; (width * height) as usize],
        }
    }

    /// Create a grid from existing cells (row-major)
    pub fn from_cells(width: i32, height: i32, cells: Vec<Cell>) -> Result<Self, LevelError> {
        let expected = (width.max(0) * height.max(0)) as usize;
        if cells.len() != expected {
            return Err(LevelError::SizeMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Cell at tile coordinates, `None` outside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if self.in_bounds(x, y) {
            Some(self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Mutable cell at tile coordinates
    pub fn get_mut(&mut self, x: i32, y: i32) -> Result<&mut Cell, LevelError> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Ok(&mut self.cells[idx])
        } else {
            Err(LevelError::OutOfBounds { x, y })
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::TileId;

    #[test]
    fn test_new_fills_grid() {
        let grid = TileGrid::new(4, 3, Cell::new(TileId::DIRT));
        assert_eq!(grid.cells().len(), 12);
        assert_eq!(grid.get(3, 2), Some(Cell::new(TileId::DIRT)));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = TileGrid::new(4, 4, Cell::GRASS);
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(4, 0), None);
        assert!(matches!(
            grid.get_mut(0, 4),
            Err(LevelError::OutOfBounds { x: 0, y: 4 })
        ));
    }

    #[test]
    fn test_row_major_layout() {
        let mut grid = TileGrid::new(3, 2, Cell::GRASS);
        *grid.get_mut(1, 1).unwrap() = Cell::with_data(TileId::SAND, 9);
        assert_eq!(grid.cells()[4], Cell::with_data(TileId::SAND, 9));
    }

    #[test]
    fn test_from_cells_size_mismatch() {
        let err = TileGrid::from_cells(2, 2, vec![Cell::GRASS; 3]).unwrap_err();
        assert!(matches!(
            err,
            LevelError::SizeMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }
}
