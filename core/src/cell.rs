use serde::{Deserialize, Serialize};

/// What a cell holds: a mine, or the number of mines among its neighbors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Mine,
    Count(u8),
}

impl CellValue {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Count(0))
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::Count(0)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    value: CellValue,
    opened: bool,
    flagged: bool,
}

impl Cell {
    pub(crate) const fn with_value(value: CellValue) -> Self {
        Self {
            value,
            opened: false,
            flagged: false,
        }
    }

    pub const fn value(self) -> CellValue {
        self.value
    }

    pub const fn is_mine(self) -> bool {
        self.value.is_mine()
    }

    pub const fn is_opened(self) -> bool {
        self.opened
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    pub(crate) fn set_value(&mut self, value: CellValue) {
        self.value = value;
    }

    pub(crate) fn mark_opened(&mut self) {
        self.opened = true;
    }

    pub(crate) fn set_flagged(&mut self, flagged: bool) {
        self.flagged = flagged;
    }
}
