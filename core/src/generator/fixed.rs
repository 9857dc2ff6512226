use super::*;

/// Places mines at a known list of coordinates.
///
/// Useful for reproducing a specific board.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinePlacer {
    mines: Vec<Coord2>,
}

impl FixedMinePlacer {
    /// Checks every coordinate against `config` and rejects layouts that
    /// would leave no safe cell.
    pub fn new(config: GameConfig, mines: &[Coord2]) -> Result<Self> {
        let mut unique: Vec<Coord2> = Vec::with_capacity(mines.len());
        for &coords in mines {
            if coords.0 >= config.height || coords.1 >= config.width {
                return Err(GameError::InvalidCoords);
            }
            if !unique.contains(&coords) {
                unique.push(coords);
            }
        }
        if unique.len() >= usize::from(config.total_cells()) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self { mines: unique })
    }

    pub fn mine_count(&self) -> CellCount {
        // bounded by the total cell count checked in `new`
        self.mines.len() as CellCount
    }
}

impl MinePlacer for FixedMinePlacer {
    fn place(self, grid: &mut Grid, mine_count: CellCount) {
        assert_eq!(
            self.mine_count(),
            mine_count,
            "fixed layout does not match the configured mine count"
        );
        for coords in self.mines {
            grid[coords].is_mine = true;
        }
    }
}
