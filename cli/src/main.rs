use anyhow::Context;
use chrono::prelude::*;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use minegrid_core::*;
use std::io::{self, BufRead, Write};

use command::*;

mod command;
mod render;

/// Clear the grid without stepping on a mine.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Skip the menu and start right away (easy, normal or hard)
    #[arg(short, long)]
    mode: Option<Preset>,

    /// Seed for mine placement, later games use the following seeds
    #[arg(long)]
    seed: Option<u64>,

    /// Start the first game with flag mode enabled
    #[arg(long, requires = "mode")]
    flag_mode: bool,

    #[command(flatten)]
    verbose: Verbosity,
}

/// Seed derived from the wall clock when none is given.
fn clock_seed() -> u64 {
    let now = Utc::now();
    ((now.timestamp() as u64) << 32) ^ u64::from(now.timestamp_subsec_nanos())
}

enum Screen {
    Menu,
    Playing(GameSession),
}

/// Menu and game screens driven by line-based input.
struct App {
    screen: Screen,
    preset: Preset,
    next_seed: u64,
    /// Cleared after input that leaves the board as it was.
    redraw: bool,
}

impl App {
    fn new(seed: u64) -> Self {
        Self {
            screen: Screen::Menu,
            preset: Preset::default(),
            next_seed: seed,
            redraw: true,
        }
    }

    /// Replaces any running game with a fresh session.
    fn start(&mut self, preset: Preset) {
        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(1);
        self.preset = preset;
        log::info!("Starting {} game with seed {}", preset, seed);
        self.screen = Screen::Playing(GameSession::new_from_preset(preset, seed));
    }

    fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> anyhow::Result<()> {
        let mut lines = input.lines();
        loop {
            if self.redraw {
                self.draw(out)?;
            }
            self.redraw = true;
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next() else {
                writeln!(out)?;
                return Ok(());
            };
            let line = line.context("failed to read input")?;

            let keep_going = match self.screen {
                Screen::Menu => self.handle_menu(line.trim(), out)?,
                Screen::Playing(_) => self.handle_game(&line, out)?,
            };
            if !keep_going {
                return Ok(());
            }
        }
    }

    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        match &self.screen {
            Screen::Menu => {
                writeln!(out, "Choose a mode:")?;
                for preset in Preset::ALL {
                    let config = preset.config();
                    writeln!(
                        out,
                        "  {:<7} {}x{}, {} mines",
                        preset.name(),
                        config.width,
                        config.height,
                        config.mines
                    )?;
                }
                writeln!(out, "  q       quit")
            }
            Screen::Playing(session) => {
                write!(out, "\n[{}]\n", self.preset)?;
                write!(out, "{}", render::draw(&Snapshot::from_session(session)))?;
                if let Some(summary) = session.summary() {
                    writeln!(out, "{}", render::end_message(&summary))?;
                    writeln!(out, "n: new game, b: menu, q: quit")?;
                }
                Ok(())
            }
        }
    }

    fn handle_menu(&mut self, choice: &str, out: &mut impl Write) -> anyhow::Result<bool> {
        if matches!(choice, "q" | "quit" | "exit") {
            return Ok(false);
        }
        match choice.parse::<Preset>() {
            Ok(preset) => self.start(preset),
            Err(err) => writeln!(out, "{}", err)?,
        }
        Ok(true)
    }

    fn handle_game(&mut self, line: &str, out: &mut impl Write) -> anyhow::Result<bool> {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(ParseCommandError::Empty) => {
                self.redraw = false;
                return Ok(true);
            }
            Err(err) => {
                writeln!(out, "{}", err)?;
                self.redraw = false;
                return Ok(true);
            }
        };

        let Screen::Playing(session) = &mut self.screen else {
            return Ok(true);
        };

        match command {
            Command::Primary(coords) | Command::Secondary(coords)
                if session.cell_view(coords).is_none() =>
            {
                let (rows, cols) = session.size();
                writeln!(
                    out,
                    "({}, {}) is outside the {}x{} grid",
                    coords.0, coords.1, rows, cols
                )?;
                self.redraw = false;
            }
            Command::Primary(coords) | Command::Secondary(coords) => {
                let outcome = if matches!(command, Command::Primary(_)) {
                    session.primary_action(coords)
                } else {
                    session.secondary_action(coords)
                };
                log::debug!("{:?} -> {:?}", command, outcome);
                if outcome == ActionOutcome::Flag(FlagOutcome::AtCapacity) {
                    writeln!(out, "No flags left")?;
                }
                self.redraw = outcome.has_update();
            }
            Command::ToggleFlagMode => {
                let enabled = !session.flag_mode();
                session.set_flag_mode(enabled);
            }
            Command::NewGame => self.start(self.preset),
            Command::Menu => {
                self.screen = Screen::Menu;
            }
            Command::Dump => {
                let json = serde_json::to_string_pretty(&Snapshot::from_session(session))?;
                writeln!(out, "{}", json)?;
                self.redraw = false;
            }
            Command::Help => {
                writeln!(out, "{}", HELP)?;
                self.redraw = false;
            }
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let seed = cli.seed.unwrap_or_else(clock_seed);
    let mut app = App::new(seed);
    if let Some(preset) = cli.mode {
        app.start(preset);
        if let Screen::Playing(session) = &mut app.screen {
            session.set_flag_mode(cli.flag_mode);
        }
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    app.run(stdin.lock(), &mut stdout)
}
