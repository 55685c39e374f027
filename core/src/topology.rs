use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Geometry of a `width` by `height` grid addressed by flat row-major indices.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    width: Coord,
    height: Coord,
}

impl Topology {
    pub const fn new(width: Coord, height: Coord) -> Self {
        Self { width, height }
    }

    pub const fn width(&self) -> Coord {
        self.width
    }

    pub const fn height(&self) -> Coord {
        self.height
    }

    pub const fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn contains(&self, index: CellIndex) -> bool {
        index < self.len()
    }

    /// Column and row of a flat index.
    pub fn coords_of(&self, index: CellIndex) -> Coord2 {
        debug_assert!(self.contains(index), "index {index} outside {self:?}");
        let width = usize::from(self.width);
        // both quotient and remainder are bounded by the u8 dimensions
        ((index % width) as Coord, (index / width) as Coord)
    }

    /// Flat index of `(col, row)`, if it lies on the grid.
    pub fn index_of(&self, col: Coord, row: Coord) -> Option<CellIndex> {
        if col < self.width && row < self.height {
            Some(usize::from(row) * usize::from(self.width) + usize::from(col))
        } else {
            None
        }
    }

    pub fn neighbors_of(&self, index: CellIndex) -> NeighborIter {
        NeighborIter::new(self.coords_of(index), *self)
    }

    pub fn neighbor_set(&self, index: CellIndex) -> SmallVec<[CellIndex; 8]> {
        self.neighbors_of(index).collect()
    }
}

/// `(dcol, drow)` for NW, N, NE, W, E, SW, S, SE.
const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (col, row) = coords;
    let (dcol, drow) = delta;
    let (width, height) = bounds;

    let next_col = col.checked_add_signed(dcol.try_into().ok()?)?;
    if next_col >= width {
        return None;
    }

    let next_row = row.checked_add_signed(drow.try_into().ok()?)?;
    if next_row >= height {
        return None;
    }

    Some((next_col, next_row))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    topology: Topology,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, topology: Topology) -> Self {
        Self {
            center,
            topology,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = CellIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let bounds = (self.topology.width, self.topology.height);
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(self.center, DISPLACEMENTS[self.index as usize], bounds);
            self.index += 1;

            if let Some((col, row)) = next_item {
                return self.topology.index_of(col, row);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(DISPLACEMENTS.len() - usize::from(self.index)))
    }
}
