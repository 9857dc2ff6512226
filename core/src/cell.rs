use serde::{Deserialize, Serialize};

/// Hidden and player-visible state of a single grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    /// Mines in the 8-neighbourhood, only meaningful for non-mine cells.
    pub adjacent_mines: u8,
}

impl Cell {
    /// Whether the player can still reveal or flag this cell.
    pub const fn is_covered(self) -> bool {
        !self.is_revealed
    }
}

/// What a presentation layer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Covered,
    Number(u8),
    Blank,
    Mine,
    /// The mine whose reveal lost the game.
    Exploded,
    Flag,
    IncorrectFlag,
}

impl CellView {
    pub const fn from_count(count: u8) -> Self {
        if count == 0 {
            Self::Blank
        } else {
            Self::Number(count)
        }
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Covered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_covered_and_empty() {
        let cell = Cell::default();
        assert!(cell.is_covered());
        assert!(!cell.is_mine);
        assert!(!cell.is_flagged);
        assert_eq!(cell.adjacent_mines, 0);
    }

    #[test]
    fn zero_count_is_blank() {
        assert_eq!(CellView::from_count(0), CellView::Blank);
        assert_eq!(CellView::from_count(3), CellView::Number(3));
    }
}
