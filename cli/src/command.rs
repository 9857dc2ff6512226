use core::str::FromStr;
use minegrid_core::{Coord, Coord2};
use thiserror::Error;

/// A line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// Click, honours flag mode
    Primary(Coord2),
    /// Right click, always flags
    Secondary(Coord2),
    ToggleFlagMode,
    NewGame,
    Menu,
    Dump,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum ParseCommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}, type `h` for help")]
    Unknown(String),
    #[error("Expected `{0} <row> <col>`")]
    MissingCoords(&'static str),
    #[error("Invalid number {0:?}")]
    InvalidNumber(String),
    #[error("Unexpected trailing input {0:?}")]
    Trailing(String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        use Command::*;

        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(ParseCommandError::Empty);
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Primary(parse_coords(&mut words, "r")?),
            "f" | "flag" => Secondary(parse_coords(&mut words, "f")?),
            "m" | "mode" => ToggleFlagMode,
            "n" | "new" => NewGame,
            "b" | "back" | "menu" => Menu,
            "d" | "dump" => Dump,
            "h" | "help" | "?" => Help,
            "q" | "quit" | "exit" => Quit,
            _ => return Err(ParseCommandError::Unknown(head.into())),
        };

        if let Some(extra) = words.next() {
            return Err(ParseCommandError::Trailing(extra.into()));
        }
        Ok(command)
    }
}

fn parse_coords<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<Coord2, ParseCommandError> {
    let (Some(row), Some(col)) = (words.next(), words.next()) else {
        return Err(ParseCommandError::MissingCoords(name));
    };
    let parse = |word: &str| {
        word.parse::<Coord>()
            .map_err(|_| ParseCommandError::InvalidNumber(word.into()))
    };
    Ok((parse(row)?, parse(col)?))
}

pub(crate) const HELP: &str = "\
commands:
  r <row> <col>   reveal a cell (flags it while flag mode is on)
  f <row> <col>   toggle a flag
  m               toggle flag mode
  n               new game with the same mode
  b               back to the mode menu
  d               dump the board as JSON
  q               quit";
