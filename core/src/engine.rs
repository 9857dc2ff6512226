use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - NotStarted -> Lost (first reveal hits a mine)
/// - NotStarted -> Won (first reveal clears the whole board)
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Initial state
    NotStarted,
    /// Player has interacted with the grid
    InProgress,
    /// Every safe cell revealed
    Won,
    /// A mine was revealed
    Lost,
}

impl GameState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// End-of-game report.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub won: bool,
    pub correct_flags: CellCount,
    pub elapsed_secs: u32,
}

/// A single game from setup to win or loss.
///
/// Mines are placed and adjacency computed when the session is created; a new
/// game always means a new session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    revealed_safe_count: CellCount,
    flags_placed: CellCount,
    correct_flags: CellCount,
    state: GameState,
    flag_mode: bool,
    triggered_mine: Option<Coord2>,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl GameSession {
    pub fn new_from_preset(preset: Preset, seed: u64) -> Self {
        log::debug!("New {} session", preset);
        Self::new(preset.config(), seed)
    }

    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_placer(config, RandomMinePlacer::new(seed))
    }

    /// Builds the grid, places mines with `placer` and computes adjacency.
    ///
    /// Panics if `config` has a zero dimension or no safe cell.
    pub fn with_placer(config: GameConfig, placer: impl MinePlacer) -> Self {
        assert!(
            config.mines < config.total_cells(),
            "invalid config, {} mines on {} cells",
            config.mines,
            config.total_cells()
        );

        let mut grid = Grid::new(config.width, config.height);
        placer.place(&mut grid, config.mines);
        grid.compute_adjacency();

        Self {
            config,
            grid,
            revealed_safe_count: 0,
            flags_placed: 0,
            correct_flags: 0,
            state: Default::default(),
            flag_mode: false,
            triggered_mine: None,
            started_at: None,
            ended_at: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// `(rows, cols)`
    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn width(&self) -> Coord {
        self.config.width
    }

    pub fn height(&self) -> Coord {
        self.config.height
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flags_placed
    }

    /// How many flags can still be placed
    pub fn flags_left(&self) -> CellCount {
        self.config.mines - self.flags_placed
    }

    pub fn correct_flags(&self) -> CellCount {
        self.correct_flags
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_safe_count
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn flag_mode(&self) -> bool {
        self.flag_mode
    }

    pub fn set_flag_mode(&mut self, enabled: bool) {
        if self.flag_mode != enabled {
            log::debug!("Flag mode {}", if enabled { "on" } else { "off" });
        }
        self.flag_mode = enabled;
    }

    /// How many seconds have passed since the game started, 0 if it hasn't started
    pub fn elapsed_secs(&self) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or_else(Utc::now) - started_at)
                .num_seconds()
                .clamp(0, u32::MAX.into()) as u32
        } else {
            0
        }
    }

    /// Available once the game is won or lost.
    pub fn summary(&self) -> Option<GameSummary> {
        self.state.is_finished().then(|| GameSummary {
            won: matches!(self.state, GameState::Won),
            correct_flags: self.correct_flags,
            elapsed_secs: self.elapsed_secs(),
        })
    }

    /// What should be drawn at `coords`, `None` when out of range.
    pub fn cell_view(&self, coords: Coord2) -> Option<CellView> {
        self.grid
            .get(coords)
            .map(|&cell| self.view_of(coords, cell))
    }

    pub(crate) fn view_of(&self, coords: Coord2, cell: Cell) -> CellView {
        let lost = matches!(self.state, GameState::Lost);
        if cell.is_flagged {
            if lost && !cell.is_mine {
                CellView::IncorrectFlag
            } else {
                CellView::Flag
            }
        } else if !cell.is_revealed {
            CellView::Covered
        } else if !cell.is_mine {
            CellView::from_count(cell.adjacent_mines)
        } else if self.triggered_mine == Some(coords) {
            CellView::Exploded
        } else {
            CellView::Mine
        }
    }

    pub(crate) fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Click: reveals, or toggles a flag while flag mode is on.
    pub fn primary_action(&mut self, coords: Coord2) -> ActionOutcome {
        if self.flag_mode {
            ActionOutcome::Flag(self.toggle_flag(coords))
        } else {
            ActionOutcome::Reveal(self.reveal(coords))
        }
    }

    /// Secondary click: always toggles a flag.
    pub fn secondary_action(&mut self, coords: Coord2) -> ActionOutcome {
        ActionOutcome::Flag(self.toggle_flag(coords))
    }

    /// Reveal a covered, unflagged cell, flood-filling from zero cells.
    ///
    /// Anything else (finished game, out of range, revealed or flagged cell)
    /// is ignored.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if self.state.is_finished() {
            log::debug!("Ignoring reveal at {:?}, game already ended", coords);
            return RevealOutcome::NoChange;
        }

        let Some(&cell) = self.grid.get(coords) else {
            log::warn!("Ignoring reveal at {:?}, outside the grid", coords);
            return RevealOutcome::NoChange;
        };

        if cell.is_revealed || cell.is_flagged {
            return RevealOutcome::NoChange;
        }

        self.mark_started();
        self.reveal_cell(coords)
    }

    fn reveal_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = &mut self.grid[coords];
        cell.is_revealed = true;
        let Cell {
            is_mine,
            adjacent_mines,
            ..
        } = *cell;

        if is_mine {
            log::debug!("Revealed mine at {:?}", coords);
            self.triggered_mine = Some(coords);
            self.end_game(false);
            return RevealOutcome::HitMine;
        }

        self.revealed_safe_count += 1;
        log::debug!("Revealed cell at {:?}, mine count: {}", coords, adjacent_mines);

        if adjacent_mines == 0 {
            self.flood_fill(coords);
        }

        if self.check_win() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Depth-first cascade from a revealed zero cell.
    ///
    /// `is_revealed` is the visited marker, so it is set before a cell's
    /// neighbours are pushed.
    fn flood_fill(&mut self, origin: Coord2) {
        let mut to_visit: Vec<Coord2> = self.grid.iter_neighbors(origin).collect();
        log::trace!("Starting flood-fill from {:?}, initial neighbors: {:?}", origin, to_visit);

        while let Some(visit_coords) = to_visit.pop() {
            let cell = &mut self.grid[visit_coords];

            // skip flagged or already revealed cells
            if cell.is_revealed || cell.is_flagged {
                continue;
            }

            // only neighbours of zero cells get here, none of them is a mine
            debug_assert!(!cell.is_mine, "flood fill reached a mine at {visit_coords:?}");
            cell.is_revealed = true;
            let visit_count = cell.adjacent_mines;
            self.revealed_safe_count += 1;
            log::trace!("Flood revealed cell at {:?}, mine count: {}", visit_coords, visit_count);

            if visit_count == 0 {
                to_visit.extend(self.grid.iter_neighbors(visit_coords));
            }
        }
    }

    /// Flag or unflag a covered cell. Placing is capped at the mine count.
    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        if self.state.is_finished() {
            log::debug!("Ignoring flag at {:?}, game already ended", coords);
            return FlagOutcome::NoChange;
        }

        let Some(cell) = self.grid.get_mut(coords) else {
            log::warn!("Ignoring flag at {:?}, outside the grid", coords);
            return FlagOutcome::NoChange;
        };

        if cell.is_revealed {
            return FlagOutcome::NoChange;
        }

        let outcome = if cell.is_flagged {
            cell.is_flagged = false;
            self.flags_placed -= 1;
            if cell.is_mine {
                self.correct_flags -= 1;
            }
            FlagOutcome::Removed
        } else if self.flags_placed < self.config.mines {
            cell.is_flagged = true;
            self.flags_placed += 1;
            if cell.is_mine {
                self.correct_flags += 1;
            }
            FlagOutcome::Placed
        } else {
            log::debug!("No flags left, {} already placed", self.flags_placed);
            FlagOutcome::AtCapacity
        };

        self.mark_started();
        self.check_win();
        outcome
    }

    /// Ends the game as won once every safe cell is revealed.
    fn check_win(&mut self) -> bool {
        if !self.state.is_finished() && self.revealed_safe_count == self.config.safe_cells() {
            self.end_game(true);
            true
        } else {
            false
        }
    }

    /// Checks if the state is initial and changes to in-progress recording the start time
    fn mark_started(&mut self) {
        if self.state.is_initial() {
            let now = Utc::now();
            log::debug!("started at {}", now);
            self.started_at = Some(now);
            self.state = GameState::InProgress;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        let now = Utc::now();
        self.started_at.get_or_insert(now);
        self.ended_at = Some(now);
        log::debug!("ended at {}, {:?}", now, self.state);

        if !won {
            self.reveal_mines();
        }
    }

    /// Uncovers every mine the player neither flagged nor revealed.
    ///
    /// Wrong flags stay flagged and are told apart in [`CellView`].
    fn reveal_mines(&mut self) {
        for coords in self.grid.iter_coords() {
            let cell = &mut self.grid[coords];
            if cell.is_mine && !cell.is_flagged && !cell.is_revealed {
                cell.is_revealed = true;
            }
        }
    }
}
