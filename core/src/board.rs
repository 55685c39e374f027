use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// All cells of one game, stored as `(row, col)` so the logical order matches
/// flat cell indices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    topology: Topology,
    mine_count: CellCount,
}

impl Board {
    /// Builds a board from cells in flat index order and fills in the
    /// adjacency counts of every safe cell.
    pub(crate) fn from_cells(topology: Topology, cells: &[Cell]) -> Self {
        debug_assert_eq!(cells.len(), topology.len());
        let width = usize::from(topology.width());
        let shape = (usize::from(topology.height()), width);
        let cells = Array2::from_shape_fn(shape, |(row, col)| cells[row * width + col]);
        let mine_count = cells
            .iter()
            .filter(|cell| cell.is_mine())
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);

        let mut board = Self {
            cells,
            topology,
            mine_count,
        };
        board.place_numbers();
        board
    }

    /// Board with mines at exactly the given indices, duplicates are ignored.
    pub fn from_mine_indices(width: Coord, height: Coord, mines: &[CellIndex]) -> Result<Self> {
        let topology = Topology::new(width, height);
        let mut cells: Vec<Cell> = (0..topology.len()).map(|_| Cell::default()).collect();
        for &index in mines {
            if !topology.contains(index) {
                return Err(GameError::InvalidIndex(index));
            }
            cells[index] = Cell::with_value(CellValue::Mine);
        }

        let board = Self::from_cells(topology, &cells);
        GameConfig::new(width, height, board.mine_count)?;
        Ok(board)
    }

    fn place_numbers(&mut self) {
        for index in 0..self.topology.len() {
            if !self.cell(index).is_mine() {
                let count = self.adjacent_mine_count(index);
                self.cell_mut(index).set_value(CellValue::Count(count));
            }
        }
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.width(), self.height(), self.mine_count)
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn width(&self) -> Coord {
        self.topology.width()
    }

    pub fn height(&self) -> Coord {
        self.topology.height()
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.width(), self.height())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn cell(&self, index: CellIndex) -> Cell {
        self.cells[self.nd_index(index)]
    }

    pub(crate) fn cell_mut(&mut self, index: CellIndex) -> &mut Cell {
        let nd_index = self.nd_index(index);
        &mut self.cells[nd_index]
    }

    /// Cells in flat index order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    pub fn as_array(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub fn adjacent_mine_count(&self, index: CellIndex) -> u8 {
        // at most eight neighbors
        self.topology
            .neighbors_of(index)
            .filter(|&pos| self.cell(pos).is_mine())
            .count() as u8
    }

    pub fn neighbors_of(&self, index: CellIndex) -> NeighborIter {
        self.topology.neighbors_of(index)
    }

    fn nd_index(&self, index: CellIndex) -> [usize; 2] {
        assert!(
            self.topology.contains(index),
            "cell index {index} out of range for {}x{} board",
            self.width(),
            self.height()
        );
        let (col, row) = self.topology.coords_of(index);
        [usize::from(row), usize::from(col)]
    }
}
