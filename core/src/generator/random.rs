use super::*;

/// Uniformly random placement by rejection sampling.
///
/// A random cell is drawn repeatedly and the draw is retried whenever it lands
/// on a cell that already holds a mine. Nothing keeps the first reveal safe.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinePlacer {
    seed: u64,
}

impl RandomMinePlacer {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinePlacer for RandomMinePlacer {
    fn place(self, grid: &mut Grid, mine_count: CellCount) {
        use rand::prelude::*;

        let total_cells = grid.total_cells();
        assert!(
            mine_count < total_cells,
            "cannot place {mine_count} mines on {total_cells} cells"
        );

        let (rows, cols) = grid.size();
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines_placed: CellCount = 0;
        let mut collisions: u32 = 0;

        while mines_placed < mine_count {
            let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
            let cell = &mut grid[coords];
            if cell.is_mine {
                collisions += 1;
                continue;
            }
            cell.is_mine = true;
            mines_placed += 1;
        }

        log::debug!(
            "Placed {} mines on {}x{} grid (seed {}, {} collisions)",
            mines_placed,
            cols,
            rows,
            self.seed,
            collisions
        );
    }
}
