use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod grid;
mod snapshot;
mod types;

/// Grid dimensions and mine count of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Columns.
    pub width: Coord,
    /// Rows.
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidSize);
        }
        if mines >= mult(width, height) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(width, height, mines))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

/// The fixed difficulty modes a session can be started with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    Easy,
    Normal,
    Hard,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Easy, Preset::Normal, Preset::Hard];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new_unchecked(10, 10, 10),
            Self::Normal => GameConfig::new_unchecked(14, 20, 40),
            Self::Hard => GameConfig::new_unchecked(14, 32, 99),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::Easy
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| GameError::UnknownPreset(name.into()))
    }
}

/// Outcome of toggling a flag
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Placed,
    Removed,
    /// Every available flag is already on the grid.
    AtCapacity,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange | Self::AtCapacity => false,
            Self::Placed | Self::Removed => true,
        }
    }
}

/// Outcome of revealing a cell
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Outcome of a primary or secondary interaction with a cell
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Reveal(RevealOutcome),
    Flag(FlagOutcome),
}

impl ActionOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Reveal(outcome) => outcome.has_update(),
            Self::Flag(outcome) => outcome.has_update(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_modes() {
        assert_eq!(Preset::Easy.config(), GameConfig::new(10, 10, 10).unwrap());
        assert_eq!(Preset::Normal.config(), GameConfig::new(14, 20, 40).unwrap());
        assert_eq!(Preset::Hard.config(), GameConfig::new(14, 32, 99).unwrap());
        assert_eq!(Preset::Hard.config().safe_cells(), 448 - 99);
    }

    #[test]
    fn preset_names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(preset.to_string().parse::<Preset>(), Ok(preset));
        }
        assert_eq!(" HARD ".parse::<Preset>(), Ok(Preset::Hard));
        assert_eq!(
            "expert".parse::<Preset>(),
            Err(GameError::UnknownPreset("expert".into()))
        );
    }

    #[test]
    fn config_rejects_bad_dimensions() {
        assert_eq!(GameConfig::new(0, 5, 1), Err(GameError::InvalidSize));
        assert_eq!(GameConfig::new(5, 0, 1), Err(GameError::InvalidSize));
        assert_eq!(GameConfig::new(2, 2, 4), Err(GameError::TooManyMines));
        assert!(GameConfig::new(2, 2, 3).is_ok());
        assert!(GameConfig::new(1, 1, 0).is_ok());
    }

    #[test]
    fn rejected_flag_is_not_an_update() {
        assert!(!FlagOutcome::AtCapacity.has_update());
        assert!(ActionOutcome::Flag(FlagOutcome::Placed).has_update());
        assert!(!ActionOutcome::Reveal(RevealOutcome::NoChange).has_update());
    }
}
