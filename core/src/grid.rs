use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular grid of cells, `width` columns by `height` rows.
///
/// Cells are addressed by `(row, col)`. Dimensions never change after
/// construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Creates a grid of covered, mine-free cells.
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: Coord, height: Coord) -> Self {
        assert!(
            width >= 1 && height >= 1,
            "grid must be at least 1x1, got {width}x{height}"
        );
        Self {
            cells: Array2::default((height, width).to_nd_index()),
        }
    }

    /// `(rows, cols)`, the same order as coordinates.
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (Self::narrow(rows), Self::narrow(cols))
    }

    pub fn width(&self) -> Coord {
        self.size().1
    }

    pub fn height(&self) -> Coord {
        self.size().0
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        let (rows, cols) = self.size();
        row < rows && col < cols
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    pub fn get_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        self.cells.get_mut(coords.to_nd_index())
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Every coordinate in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    pub fn mine_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.is_mine)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    /// Fills in `adjacent_mines` for every non-mine cell.
    ///
    /// Must run after mines are placed and before anything is revealed.
    pub fn compute_adjacency(&mut self) {
        for coords in self.iter_coords() {
            if self[coords].is_mine {
                continue;
            }
            let count = self.count_adjacent_mines(coords);
            self[coords].adjacent_mines = count;
        }
    }

    fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        let count = self
            .iter_neighbors(coords)
            .filter(|&pos| self[pos].is_mine)
            .count();
        // at most eight neighbours
        count as u8
    }

    pub(crate) fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    fn narrow(len: usize) -> Coord {
        // dimensions only ever come from `Coord` values
        len as Coord
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force_count(grid: &Grid, (row, col): Coord2) -> u8 {
        let (rows, cols) = grid.size();
        let mut count = 0;
        for d_row in -1i16..=1 {
            for d_col in -1i16..=1 {
                if d_row == 0 && d_col == 0 {
                    continue;
                }
                let r = row as i16 + d_row;
                let c = col as i16 + d_col;
                if r >= 0 && r < rows as i16 && c >= 0 && c < cols as i16 {
                    if grid[(r as Coord, c as Coord)].is_mine {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    #[test]
    fn new_grid_has_requested_shape() {
        let grid = Grid::new(14, 20);
        assert_eq!(grid.width(), 14);
        assert_eq!(grid.height(), 20);
        assert_eq!(grid.size(), (20, 14));
        assert_eq!(grid.total_cells(), 280);
        assert!(grid.iter_coords().all(|coords| grid[coords] == Cell::default()));
    }

    #[test]
    #[should_panic]
    fn zero_width_grid_panics() {
        Grid::new(0, 3);
    }

    #[test]
    fn lookups_are_bounds_checked() {
        let mut grid = Grid::new(3, 2);
        assert!(grid.contains((1, 2)));
        assert!(!grid.contains((2, 0)));
        assert!(!grid.contains((0, 3)));
        assert!(grid.get((2, 0)).is_none());
        assert!(grid.get_mut((0, 3)).is_none());
    }

    #[test]
    fn adjacency_matches_brute_force_for_every_layout() {
        // every mine layout of a 3x3 and a 2x4 grid
        for (width, height) in [(3, 3), (4, 2)] {
            let total = mult(width, height) as u32;
            for mask in 0u32..(1 << total) {
                let mut grid = Grid::new(width, height);
                for (i, coords) in grid.iter_coords().enumerate() {
                    grid[coords].is_mine = mask & (1 << i) != 0;
                }
                grid.compute_adjacency();

                for coords in grid.iter_coords() {
                    let cell = grid[coords];
                    if cell.is_mine {
                        assert_eq!(cell.adjacent_mines, 0);
                    } else {
                        assert_eq!(cell.adjacent_mines, brute_force_count(&grid, coords));
                    }
                }
                assert_eq!(grid.mine_count(), mask.count_ones() as CellCount);
            }
        }
    }

    #[test]
    fn fully_surrounded_cell_counts_eight() {
        let mut grid = Grid::new(3, 3);
        for coords in grid.iter_coords() {
            grid[coords].is_mine = coords != (1, 1);
        }
        grid.compute_adjacency();
        assert_eq!(grid[(1, 1)].adjacent_mines, 8);
    }
}
