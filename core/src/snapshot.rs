use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a presentation layer needs to draw a session, with mines hidden
/// until the game resolves them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// `(rows, cols)`
    pub size: Coord2,
    pub cells: Array2<CellView>,
    pub flags_placed: CellCount,
    pub mine_count: CellCount,
    pub state: GameState,
    pub flag_mode: bool,
    pub elapsed_secs: u32,
    pub summary: Option<GameSummary>,
}

impl Snapshot {
    pub fn from_session(session: &GameSession) -> Self {
        let grid = session.grid();
        let cells = Array2::from_shape_fn(grid.cells().raw_dim(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            session.view_of(coords, grid[coords])
        });

        Self {
            size: grid.size(),
            cells,
            flags_placed: session.flags_placed(),
            mine_count: session.mine_count(),
            state: session.state(),
            flag_mode: session.flag_mode(),
            elapsed_secs: session.elapsed_secs(),
            summary: session.summary(),
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(width: Coord, height: Coord, mines: &[Coord2]) -> GameSession {
        let config = GameConfig::new(width, height, mines.len() as CellCount).unwrap();
        GameSession::with_placer(config, FixedMinePlacer::new(config, mines).unwrap())
    }

    #[test]
    fn fresh_session_is_all_covered() {
        let snapshot = Snapshot::from_session(&GameSession::new_from_preset(Preset::Hard, 3));

        assert_eq!(snapshot.size, (32, 14));
        assert_eq!(snapshot.cells.dim(), (32, 14));
        assert!(snapshot.cells.iter().all(|&view| view == CellView::Covered));
        assert_eq!(snapshot.mine_count, 99);
        assert_eq!(snapshot.state, GameState::NotStarted);
        assert_eq!(snapshot.summary, None);
    }

    #[test]
    fn maps_revealed_and_flagged_cells() {
        let mut session = session(2, 2, &[(0, 0)]);
        session.reveal((1, 1));
        session.toggle_flag((0, 0));
        session.set_flag_mode(true);

        let snapshot = Snapshot::from_session(&session);

        assert_eq!(snapshot.cell((1, 1)), Some(CellView::Number(1)));
        assert_eq!(snapshot.cell((0, 0)), Some(CellView::Flag));
        assert_eq!(snapshot.cell((0, 1)), Some(CellView::Covered));
        assert_eq!(snapshot.cell((2, 0)), None);
        assert_eq!(snapshot.flags_placed, 1);
        assert_eq!(snapshot.state, GameState::InProgress);
        assert!(snapshot.flag_mode);
    }

    #[test]
    fn lost_snapshot_carries_summary() {
        let mut session = session(3, 1, &[(0, 0), (0, 2)]);
        session.toggle_flag((0, 2));
        session.reveal((0, 0));

        let snapshot = Snapshot::from_session(&session);

        assert_eq!(snapshot.cell((0, 0)), Some(CellView::Exploded));
        assert_eq!(snapshot.cell((0, 2)), Some(CellView::Flag));
        let summary = snapshot.summary.unwrap();
        assert!(!summary.won);
        assert_eq!(summary.correct_flags, 1);
    }

    #[test]
    fn serializes_to_json() {
        let mut session = session(2, 1, &[(0, 0)]);
        session.reveal((0, 1));

        let json = serde_json::to_value(Snapshot::from_session(&session)).unwrap();

        assert_eq!(json["state"], "Won");
        assert_eq!(json["mine_count"], 1);
        assert_eq!(json["summary"]["won"], true);
    }
}
