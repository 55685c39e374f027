/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Flat row-major cell index, `row * width + col`.
pub type CellIndex = usize;

/// Two-dimensional coordinates `(col, row)`.
pub type Coord2 = (Coord, Coord);

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}
