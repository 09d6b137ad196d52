//! Uniform spatial hash grid
//!
//! Partitions a rectangular region into `columns × rows` equally sized
//! cells. Members are bucketed into every cell their shape touches and the
//! buckets are cleared wholesale between steps; the cell geometry only
//! changes when the grid is rebuilt.
//!
//! Cells are stored row-major starting at the minimum corner of the region,
//! so cell `(column, row)` lives at index `row * columns + column`.

use crate::foundation::math::{Rect, Vec2};
use crate::physics::CollisionError;

/// One grid cell and the members bucketed into it this step
#[derive(Debug, Clone)]
pub struct Cell<T> {
    bounds: Rect,
    members: Vec<T>,
}

impl<T> Cell<T> {
    /// World-space region covered by the cell
    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    /// Members bucketed into the cell, in insertion order
    pub fn members(&self) -> &[T] {
        &self.members
    }
}

/// Fixed-resolution grid over a bounding region
#[derive(Debug, Clone)]
pub struct SpatialHashGrid<T> {
    bounds: Rect,
    columns: u32,
    rows: u32,
    cell_size: Vec2,
    cells: Vec<Cell<T>>,
}

impl<T> SpatialHashGrid<T> {
    /// Build a grid tiling `bounds` with `columns × rows` cells
    ///
    /// Fails if the region is empty or non-finite or either dimension is zero.
    pub fn new(bounds: Rect, columns: u32, rows: u32) -> Result<Self, CollisionError> {
        if !bounds.is_valid() {
            return Err(CollisionError::InvalidBoundingBox(bounds));
        }
        if columns == 0 || rows == 0 {
            return Err(CollisionError::InvalidGridResolution { columns, rows });
        }

        let cell_size = Vec2::new(bounds.width / columns as f32, bounds.height / rows as f32);
        let cells = (0..rows)
            .flat_map(|row| (0..columns).map(move |column| (column, row)))
            .map(|(column, row)| Cell {
                bounds: Rect::new(
                    bounds.x + column as f32 * cell_size.x,
                    bounds.y + row as f32 * cell_size.y,
                    cell_size.x,
                    cell_size.y,
                ),
                members: Vec::new(),
            })
            .collect();

        Ok(Self {
            bounds,
            columns,
            rows,
            cell_size,
            cells,
        })
    }

    /// Region covered by the grid
    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    /// Number of cells along X
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cells along Y
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Size of a single cell
    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[Cell<T>] {
        &self.cells
    }

    /// Cell by index
    pub fn cell(&self, index: usize) -> Option<&Cell<T>> {
        self.cells.get(index)
    }

    /// Index of cell `(column, row)`
    pub fn cell_index(&self, column: u32, row: u32) -> Option<usize> {
        (column < self.columns && row < self.rows)
            .then(|| row as usize * self.columns as usize + column as usize)
    }

    /// Indices of the cells whose area intersects `area`, row-major
    ///
    /// This is a bounds-only test; callers refine it with an exact shape
    /// test against [`Cell::bounds`]. Areas entirely outside the grid yield
    /// no cells.
    pub fn candidate_cells(&self, area: &Rect) -> Vec<usize> {
        if !area.overlaps(&self.bounds) {
            return Vec::new();
        }

        let (first_column, last_column) = Self::span(area.x, area.x + area.width, self.bounds.x, self.cell_size.x, self.columns);
        let (first_row, last_row) = Self::span(area.y, area.y + area.height, self.bounds.y, self.cell_size.y, self.rows);

        let mut indices = Vec::with_capacity(
            ((last_column - first_column + 1) * (last_row - first_row + 1)) as usize,
        );
        for row in first_row..=last_row {
            for column in first_column..=last_column {
                indices.push(row as usize * self.columns as usize + column as usize);
            }
        }
        indices
    }

    /// Bucket a member into a cell. Returns `false` for an out-of-range index.
    pub fn insert(&mut self, index: usize, member: T) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) => {
                cell.members.push(member);
                true
            }
            None => false,
        }
    }

    /// Empty every cell, keeping the geometry
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.members.clear();
        }
    }

    /// Total number of bucket entries across all cells
    pub fn occupancy(&self) -> usize {
        self.cells.iter().map(|cell| cell.members.len()).sum()
    }

    fn span(min: f32, max: f32, origin: f32, cell: f32, count: u32) -> (u32, u32) {
        let last = i64::from(count) - 1;
        let to_index = |value: f32| (((value - origin) / cell).floor() as i64).clamp(0, last) as u32;
        (to_index(min), to_index(max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cells_tile_the_region() {
        let bounds = Rect::new(10.0, 20.0, 600.0, 300.0);
        let grid = SpatialHashGrid::<u32>::new(bounds, 6, 3).unwrap();

        assert_eq!(grid.cells().len(), 18);
        assert_relative_eq!(grid.cell_size(), Vec2::new(100.0, 100.0));

        let area: f32 = grid.cells().iter().map(|c| c.bounds().width * c.bounds().height).sum();
        assert_relative_eq!(area, bounds.width * bounds.height, epsilon = 1e-2);

        let last = grid.cell(grid.cell_index(5, 2).unwrap()).unwrap();
        assert_relative_eq!(last.bounds().max(), bounds.max());
        let first = grid.cell(0).unwrap();
        assert_relative_eq!(first.bounds().min(), bounds.min());
    }

    #[test]
    fn test_rejects_invalid_configuration() {
        assert!(SpatialHashGrid::<u32>::new(Rect::new(0.0, 0.0, 0.0, 10.0), 2, 2).is_err());
        assert!(SpatialHashGrid::<u32>::new(Rect::new(0.0, 0.0, 10.0, f32::INFINITY), 2, 2).is_err());
        assert!(SpatialHashGrid::<u32>::new(Rect::new(0.0, 0.0, 10.0, 10.0), 0, 2).is_err());
    }

    #[test]
    fn test_candidate_cells_are_clamped() {
        let grid = SpatialHashGrid::<u32>::new(Rect::new(0.0, 0.0, 100.0, 100.0), 4, 4).unwrap();

        assert_eq!(grid.candidate_cells(&Rect::new(10.0, 10.0, 5.0, 5.0)), vec![0]);
        assert_eq!(grid.candidate_cells(&Rect::new(20.0, 20.0, 10.0, 10.0)), vec![0, 1, 4, 5]);
        assert_eq!(grid.candidate_cells(&Rect::new(-50.0, -50.0, 1000.0, 1000.0)).len(), 16);
        assert!(grid.candidate_cells(&Rect::new(200.0, 200.0, 5.0, 5.0)).is_empty());
    }

    #[test]
    fn test_clear_keeps_geometry() {
        let mut grid = SpatialHashGrid::new(Rect::new(0.0, 0.0, 10.0, 10.0), 2, 2).unwrap();
        assert!(grid.insert(3, 'a'));
        assert!(!grid.insert(4, 'b'));
        assert_eq!(grid.occupancy(), 1);

        grid.clear();
        assert_eq!(grid.occupancy(), 0);
        assert_eq!(grid.cells().len(), 4);
    }
}
