use alloc::vec::Vec;
use core::ops::BitOr;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Gameplay state machine for a single board.
///
/// Indices passed to the public methods must be inside the board, anything
/// else panics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealEngine {
    board: Board,
    status: GameStatus,
    opened_safe: CellCount,
    flag_count: CellCount,
    triggered_mine: Option<CellIndex>,
}

impl RevealEngine {
    /// Picks up wherever `board` left off: counters and status are taken from
    /// the cells, so a board that was already played can be resumed.
    pub fn new(board: Board) -> Self {
        let mut opened_safe: CellCount = 0;
        let mut flag_count: CellCount = 0;
        let mut triggered_mine = None;
        for (index, cell) in board.cells().enumerate() {
            match (cell.is_opened(), cell.is_mine()) {
                (true, false) => opened_safe += 1,
                (true, true) => {
                    triggered_mine.get_or_insert(index);
                }
                (false, _) if cell.is_flagged() => flag_count += 1,
                (false, _) => {}
            }
        }

        let status = if triggered_mine.is_some() {
            GameStatus::Lost
        } else if opened_safe == board.safe_cell_count() {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        };

        Self {
            board,
            status,
            opened_safe,
            flag_count,
            triggered_mine,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, index: CellIndex) -> Cell {
        self.board.cell(index)
    }

    /// How many mines have not been flagged yet
    pub fn mines_left(&self) -> isize {
        (self.board.mine_count() as isize) - (self.flag_count as isize)
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    pub fn opened_safe_count(&self) -> CellCount {
        self.opened_safe
    }

    /// The mine whose opening lost the game.
    pub fn triggered_mine(&self) -> Option<CellIndex> {
        self.triggered_mine
    }

    /// Whether [`chord`](Self::chord) at `index` would try to open anything.
    pub fn can_chord_at(&self, index: CellIndex) -> bool {
        let cell = self.board.cell(index);
        match cell.value() {
            CellValue::Count(count) if cell.is_opened() && !self.is_finished() => {
                let flagged = self.count_flagged_neighbors(index);
                flagged > 0 && flagged == count
            }
            _ => false,
        }
    }

    pub fn toggle_flag(&mut self, index: CellIndex) -> FlagOutcome {
        if self.is_finished() {
            return FlagOutcome::NoChange;
        }

        let cell = self.board.cell_mut(index);
        if cell.is_opened() {
            FlagOutcome::NoChange
        } else if cell.is_flagged() {
            cell.set_flagged(false);
            self.flag_count -= 1;
            FlagOutcome::Unflagged
        } else {
            cell.set_flagged(true);
            self.flag_count += 1;
            FlagOutcome::Flagged
        }
    }

    /// Open a closed cell, or chord when the cell is already open
    pub fn open(&mut self, index: CellIndex) -> OpenOutcome {
        let cell = self.board.cell(index);
        if self.is_finished() || cell.is_flagged() {
            OpenOutcome::NoChange
        } else if cell.is_opened() {
            self.chord(index)
        } else {
            self.open_cell(index)
        }
    }

    /// Open every closed neighbor of an opened cell once the flags around it
    /// account for its count. Flags are taken at face value.
    pub fn chord(&mut self, index: CellIndex) -> OpenOutcome {
        if !self.can_chord_at(index) {
            return OpenOutcome::NoChange;
        }

        log::debug!("Chord at {}", index);
        let closed: Vec<CellIndex> = self
            .board
            .neighbors_of(index)
            .filter(|&pos| !self.board.cell(pos).is_opened())
            .collect();

        // an earlier neighbor's cascade may already have opened later ones
        closed
            .into_iter()
            .map(|neighbor| {
                if self.board.cell(neighbor).is_opened() {
                    OpenOutcome::NoChange
                } else {
                    self.open(neighbor)
                }
            })
            .fold(OpenOutcome::NoChange, BitOr::bitor)
    }

    fn open_cell(&mut self, index: CellIndex) -> OpenOutcome {
        let cell = self.board.cell_mut(index);
        cell.mark_opened();

        match cell.value() {
            CellValue::Mine => {
                log::debug!("Mine opened at {}", index);
                self.triggered_mine = Some(index);
                self.reveal_mines();
                self.end_game(GameStatus::Lost);
                OpenOutcome::Exploded
            }
            CellValue::Count(count) => {
                self.opened_safe += 1;
                log::debug!("Open cell at {}, mine count: {}", index, count);

                if count == 0 {
                    self.flood_from(index);
                }

                if self.check_won() {
                    self.end_game(GameStatus::Won);
                    OpenOutcome::Won
                } else {
                    OpenOutcome::Opened
                }
            }
        }
    }

    /// Depth-first cascade over the zero region around `origin`, which must
    /// already be open. `is_opened` doubles as the visited set.
    fn flood_from(&mut self, origin: CellIndex) {
        let mut to_visit: Vec<CellIndex> = self.closed_safe_neighbors(origin).collect();
        log::trace!(
            "Starting flood-fill from {}, initial neighbors: {:?}",
            origin,
            to_visit
        );

        while let Some(visit) = to_visit.pop() {
            let cell = self.board.cell_mut(visit);
            if cell.is_opened() || cell.is_flagged() {
                continue;
            }

            cell.mark_opened();
            self.opened_safe += 1;
            let value = cell.value();
            log::trace!("Flood opened cell at {}, value: {:?}", visit, value);

            if value.is_zero() {
                to_visit.extend(self.closed_safe_neighbors(visit));
            }
        }
    }

    fn closed_safe_neighbors(&self, index: CellIndex) -> impl Iterator<Item = CellIndex> + '_ {
        self.board.neighbors_of(index).filter(|&pos| {
            let cell = self.board.cell(pos);
            !cell.is_mine() && !cell.is_opened() && !cell.is_flagged()
        })
    }

    fn count_flagged_neighbors(&self, index: CellIndex) -> u8 {
        // at most eight neighbors
        self.board
            .neighbors_of(index)
            .filter(|&pos| self.board.cell(pos).is_flagged())
            .count() as u8
    }

    fn check_won(&self) -> bool {
        // closed cells == mines, mines are only ever opened on a loss
        self.opened_safe == self.board.safe_cell_count()
    }

    fn reveal_mines(&mut self) {
        for index in 0..self.board.topology().len() {
            let cell = self.board.cell_mut(index);
            if cell.is_mine() {
                cell.mark_opened();
            }
        }
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }

        self.status = status;
        log::debug!(
            "Game ended: {:?} with {} of {} safe cells opened",
            status,
            self.opened_safe,
            self.board.safe_cell_count()
        );
    }
}
