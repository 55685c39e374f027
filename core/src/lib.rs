#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use snapshot::*;
pub use topology::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod session;
mod snapshot;
mod topology;
mod types;

/// Board dimensions and mine count, validated so that `0 < mines < width * height`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub(crate) const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(width, height, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::EmptyBoard);
        }
        if self.mines == 0 {
            return Err(GameError::NoMines);
        }
        let cells = self.total_cells();
        if self.mines >= cells {
            return Err(GameError::TooManyMines {
                mines: self.mines,
                cells,
            });
        }
        Ok(())
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(9, 9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 16, 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked(30, 16, 99)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    pub const fn topology(&self) -> Topology {
        Topology::new(self.width, self.height)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(10, 8, 10)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    NoChange,
    Opened,
    Exploded,
    Won,
}

impl OpenOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use OpenOutcome::*;
        match self {
            NoChange => false,
            Opened => true,
            Exploded => true,
            Won => true,
        }
    }
}

/// Used to merge outcomes when a chord opens several cells
impl BitOr for OpenOutcome {
    type Output = OpenOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use OpenOutcome::*;
        match (self, rhs) {
            (Exploded, _) => Exploded,
            (_, Exploded) => Exploded,
            (Won, _) => Won,
            (_, Won) => Won,
            (Opened, _) => Opened,
            (_, Opened) => Opened,
            (NoChange, NoChange) => NoChange,
        }
    }
}
