use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy that decides which cells of a fresh grid hold mines.
pub trait MinePlacer {
    /// Marks exactly `mine_count` distinct cells of `grid` as mines.
    fn place(self, grid: &mut Grid, mine_count: CellCount);
}
