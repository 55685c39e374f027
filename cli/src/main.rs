use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use sapper_core::{CellCount, CellIndex, Coord, Coord2, GameSession};
use tracing_subscriber::filter::LevelFilter;

use command::{Command, HELP};
use settings::{Overrides, Preset, Settings};

mod command;
mod render;
mod settings;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Start from a standard board
    #[arg(short, long, value_enum)]
    preset: Option<Preset>,

    /// TOML file with any of `width`, `height`, `mines`, `seed`
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<Coord>,

    #[arg(long)]
    height: Option<Coord>,

    #[arg(short, long)]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            width: self.width,
            height: self.height,
            mines: self.mines,
            seed: self.seed,
        }
    }
}

fn level_filter(verbose: &Verbosity<WarnLevel>) -> LevelFilter {
    match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(level_filter(&args.verbose))
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("Error initializing logger")?;

    let file = args.config.as_deref().map(Overrides::load).transpose()?;
    let settings = Settings::resolve(args.preset, file, args.overrides())?;
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let mut session = GameSession::new(settings.config, seed)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    play(&mut session, stdin.lock(), stdout.lock())
}

/// Reads commands until `quit` or end of input, drawing the board after every
/// change.
fn play(session: &mut GameSession, input: impl BufRead, mut output: impl Write) -> Result<()> {
    writeln!(output, "Welcome to Minesweeper!")?;
    write!(output, "{}", render::render(&session.snapshot()))?;
    writeln!(output, "Type `help` for commands.")?;

    for line in input.lines() {
        let line = line.context("could not read command")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "{err}")?;
                continue;
            }
        };
        log::debug!("command: {:?}", command);

        let redraw = match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(output, "{HELP}")?;
                false
            }
            Command::New(None) => {
                session.restart();
                true
            }
            Command::New(Some((width, height, mines))) => {
                match session.new_game(width, height, mines) {
                    Ok(()) => true,
                    Err(err) => {
                        writeln!(output, "{err}")?;
                        false
                    }
                }
            }
            Command::Open(coords) => on_cell(session, coords, &mut output, |session, index| {
                session.open(index).has_update()
            })?,
            Command::Chord(coords) => on_cell(session, coords, &mut output, |session, index| {
                session.chord(index).has_update()
            })?,
            Command::Flag(coords) => on_cell(session, coords, &mut output, |session, index| {
                session.toggle_flag(index).has_update()
            })?,
        };

        if redraw {
            write!(output, "{}", render::render(&session.snapshot()))?;
        }
    }

    output.flush()?;
    Ok(())
}

/// Validates player coordinates before they reach the engine.
fn on_cell(
    session: &mut GameSession,
    (col, row): Coord2,
    output: &mut impl Write,
    action: impl FnOnce(&mut GameSession, CellIndex) -> bool,
) -> Result<bool> {
    let Some(index) = session.topology().index_of(col, row) else {
        writeln!(output, "({col}, {row}) is outside the board")?;
        return Ok(false);
    };
    if session.status().is_finished() {
        writeln!(output, "Game over, type `new` to play again")?;
        return Ok(false);
    }
    Ok(action(session, index))
}
