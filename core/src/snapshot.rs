use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What the player may see of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Opened(CellValue),
}

impl From<Cell> for CellView {
    fn from(cell: Cell) -> Self {
        if cell.is_opened() {
            Self::Opened(cell.value())
        } else if cell.is_flagged() {
            Self::Flagged
        } else {
            Self::Hidden
        }
    }
}

/// Player-visible state of a game, indexed `[row, col]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: Coord,
    pub height: Coord,
    pub mine_count: CellCount,
    pub mines_left: isize,
    pub status: GameStatus,
    pub triggered_mine: Option<CellIndex>,
    pub cells: Array2<CellView>,
}

impl Snapshot {
    pub fn from_engine(engine: &RevealEngine) -> Self {
        let board = engine.board();
        Self {
            width: board.width(),
            height: board.height(),
            mine_count: board.mine_count(),
            mines_left: engine.mines_left(),
            status: engine.status(),
            triggered_mine: engine.triggered_mine(),
            cells: board.as_array().mapv(CellView::from),
        }
    }

    pub fn topology(&self) -> Topology {
        Topology::new(self.width, self.height)
    }

    pub fn view(&self, index: CellIndex) -> CellView {
        let (col, row) = self.topology().coords_of(index);
        self.cells[[usize::from(row), usize::from(col)]]
    }

    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = CellView> + '_> + '_ {
        self.cells.rows().into_iter().map(|row| row.into_iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn engine() -> RevealEngine {
        // * . .
        // . . .
        RevealEngine::new(Board::from_mine_indices(3, 2, &[0]).unwrap())
    }

    #[test]
    fn closed_cells_do_not_leak_values() {
        let mut engine = engine();
        engine.open(1);
        engine.toggle_flag(0);

        let snapshot = Snapshot::from_engine(&engine);

        assert_eq!(snapshot.view(0), CellView::Flagged);
        assert_eq!(snapshot.view(1), CellView::Opened(CellValue::Count(1)));
        assert_eq!(snapshot.view(2), CellView::Hidden);
        assert_eq!(snapshot.mines_left, 0);
        assert_eq!(snapshot.status, GameStatus::InProgress);
    }

    #[test]
    fn lost_game_shows_mines() {
        let mut engine = engine();
        engine.open(0);

        let snapshot = Snapshot::from_engine(&engine);

        assert_eq!(snapshot.status, GameStatus::Lost);
        assert_eq!(snapshot.triggered_mine, Some(0));
        assert_eq!(snapshot.view(0), CellView::Opened(CellValue::Mine));
    }

    #[test]
    fn rows_follow_board_layout() {
        let mut engine = engine();
        engine.open(5);

        let snapshot = Snapshot::from_engine(&engine);
        let rows: Vec<Vec<CellView>> = snapshot.rows().map(|row| row.collect()).collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[0][0], CellView::Hidden);
        assert_eq!(rows[1][2], CellView::Opened(CellValue::Count(0)));
    }

    #[test]
    fn serializes_to_json() {
        let mut engine = engine();
        engine.open(2);

        let snapshot = Snapshot::from_engine(&engine);
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, snapshot);
        assert!(json.contains("\"InProgress\""));
    }
}
