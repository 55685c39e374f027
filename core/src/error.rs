use thiserror::Error;

use crate::{CellCount, CellIndex};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must be at least one cell wide and tall")]
    EmptyBoard,
    #[error("Board needs at least one mine")]
    NoMines,
    #[error("Too many mines, {mines} requested but only {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Cell index {0} is outside the board")]
    InvalidIndex(CellIndex),
}

pub type Result<T> = core::result::Result<T, GameError>;
