use std::str::FromStr;

use sapper_core::{CellCount, Coord, Coord2};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Open(Coord2),
    Flag(Coord2),
    Chord(Coord2),
    /// Restart, optionally with new `(width, height, mines)`
    New(Option<(Coord, Coord, CellCount)>),
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command `{0}`, type `help` for the list")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    Arguments {
        command: &'static str,
        expected: &'static str,
    },
}

pub(crate) const HELP: &str = "\
commands (coordinates are zero-based COL ROW):
  open COL ROW    (o)  open a cell, or chord an opened one
  flag COL ROW    (f)  toggle a flag
  chord COL ROW   (c)  open the neighbors of a satisfied number
  new [W H M]     (n)  start over, optionally with a new board
  help            (h)  show this text
  quit            (q)  leave";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Empty);
        };
        let args: Vec<&str> = words.collect();

        let command = match name.to_ascii_lowercase().as_str() {
            "open" | "o" => Self::Open(coords("open", &args)?),
            "flag" | "f" => Self::Flag(coords("flag", &args)?),
            "chord" | "c" => Self::Chord(coords("chord", &args)?),
            "new" | "n" if args.is_empty() => Self::New(None),
            "new" | "n" => Self::New(Some(dimensions(&args)?)),
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => return Err(CommandError::Unknown(name.to_string())),
        };
        Ok(command)
    }
}

fn coords(command: &'static str, args: &[&str]) -> Result<Coord2, CommandError> {
    let err = CommandError::Arguments {
        command,
        expected: "COL ROW",
    };
    match args {
        [col, row] => match (col.parse(), row.parse()) {
            (Ok(col), Ok(row)) => Ok((col, row)),
            _ => Err(err),
        },
        _ => Err(err),
    }
}

fn dimensions(args: &[&str]) -> Result<(Coord, Coord, CellCount), CommandError> {
    let err = CommandError::Arguments {
        command: "new",
        expected: "nothing or WIDTH HEIGHT MINES",
    };
    match args {
        [width, height, mines] => match (width.parse(), height.parse(), mines.parse()) {
            (Ok(width), Ok(height), Ok(mines)) => Ok((width, height, mines)),
            _ => Err(err),
        },
        _ => Err(err),
    }
}
