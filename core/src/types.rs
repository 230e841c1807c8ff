use ndarray::Array2;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Signed grid offset `(dx, dy)` between two cells.
pub type Offset2 = (i16, i16);

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

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Offset of `to` relative to `from`.
pub fn offset(from: Coord2, to: Coord2) -> Offset2 {
    (
        i16::from(to.0) - i16::from(from.0),
        i16::from(to.1) - i16::from(from.1),
    )
}

/// Euclidean distance between two cells, in cell units.
pub fn distance(from: Coord2, to: Coord2) -> f64 {
    let (dx, dy) = offset(from, to);
    let (dx, dy) = (i32::from(dx), i32::from(dy));
    f64::from(dx * dx + dy * dy).sqrt()
}

/// Iterates every coordinate of a board in row-major order (`y` outer, `x` inner).
pub fn iter_row_major((size_x, size_y): Coord2) -> impl Iterator<Item = Coord2> {
    (0..size_y).flat_map(move |y| (0..size_x).map(move |x| (x, y)))
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (dim_x, dim_y) = self.dim();
        // boards are built from `Coord` sizes, so both axes fit
        let size = (dim_x as Coord, dim_y as Coord);
        NeighborIter::new(index, size)
    }
}

/// Moore neighborhood in row-major order: increasing `y`, then increasing `x`.
const DISPLACEMENTS: [(i8, i8); 8] = [
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
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// In-bounds Moore neighbors of a cell, clamped at the board edges.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
    end: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
            end: DISPLACEMENTS.len() as u8,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.end {
            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
        None
    }
}

impl DoubleEndedIterator for NeighborIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        while self.index < self.end {
            self.end -= 1;
            let next_item = apply_delta(self.center, DISPLACEMENTS[self.end as usize], self.bounds);

            if next_item.is_some() {
                return next_item;
            }
        }
        None
    }
}
