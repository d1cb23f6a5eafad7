use ndarray::Array2;
use smallvec::SmallVec;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Neighbors of a single cell, never more than eight.
pub type Neighbors = SmallVec<[Coord2; 8]>;

/// Converts board coordinates into the index type `ndarray` expects.
pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Cell count of an `a` by `b` board. Widening to [`CellCount`] means two
/// [`Coord`] values always fit.
pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Neighbor walking for any grid stored as an `Array2`, bounded by the array's
/// own shape.
pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        let size = (rows as Coord, cols as Coord);
        NeighborIter::new(index, size)
    }
}

/// Row-major scan order: the row above, the same row, the row below.
const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, 0),
    (-1, -1),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, 0),
    (1, -1),
    (1, 1),
];

/// Shifts `coords` by `delta`. `None` when the result falls off either edge of a
/// `bounds` sized board, including below zero.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

/// Lazily walks the in-bounds neighbors of `center`.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(DISPLACEMENTS.len() - usize::from(self.index)))
    }
}

/// Collects the in-bounds neighbors of `coords` on a board of `size`.
///
/// The order is stable: row above, same row, row below, each starting with the
/// cell straight above or below before its left and right diagonals. Corners
/// yield three neighbors, edges five, and interior cells eight.
pub fn neighbors_of(coords: Coord2, size: Coord2) -> Neighbors {
    NeighborIter::new(coords, size).collect()
}
