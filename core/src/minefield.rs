use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Immutable mine placement with precomputed neighbor counts.
///
/// Out-of-range coordinates passed to the infallible queries panic; use
/// [`Minefield::validate_coords`] first when the coordinates come from outside.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Minefield {
    mine_mask: Array2<bool>,
    neighbor_counts: Array2<u8>,
    mine_count: CellCount,
}

impl Minefield {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (dim_x, dim_y) = mine_mask.dim();
        let valid_axis = |len: usize| (1..=usize::from(Coord::MAX)).contains(&len);
        if !valid_axis(dim_x) || !valid_axis(dim_y) {
            return Err(GameError::InvalidSize);
        }
        Ok(Self::from_valid_mask(mine_mask))
    }

    /// Caller guarantees both axes are in `1..=Coord::MAX`.
    pub(crate) fn from_valid_mask(mine_mask: Array2<bool>) -> Self {
        let neighbor_counts = Array2::from_shape_fn(mine_mask.dim(), |(x, y)| {
            if mine_mask[(x, y)] {
                return 0;
            }
            mine_mask
                .iter_neighbors((x as Coord, y as Coord))
                .filter(|&pos| mine_mask[pos.to_nd_index()])
                .count() as u8
        });
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;

        Self {
            mine_mask,
            neighbor_counts,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (dim_x, dim_y) = self.mine_mask.dim();
        (dim_x as Coord, dim_y as Coord)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn has_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Mines among the Moore neighbors of `coords`; always 0 for a mine cell.
    pub fn neighbor_count(&self, coords: Coord2) -> u8 {
        self.neighbor_counts[coords.to_nd_index()]
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for Minefield {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force_count(field: &Minefield, (x, y): Coord2) -> u8 {
        let (size_x, size_y) = field.size();
        let mut count = 0;
        for ny in y.saturating_sub(1)..=(y + 1).min(size_y - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(size_x - 1) {
                if (nx, ny) != (x, y) && field.has_mine((nx, ny)) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn two_corner_mines_on_three_by_three() {
        let field = Minefield::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(field.mine_count(), 2);
        assert!(field.has_mine((0, 0)));
        assert!(field.has_mine((2, 2)));
        assert_eq!(field.neighbor_count((1, 0)), 1);
        assert_eq!(field.neighbor_count((0, 1)), 1);
        assert_eq!(field.neighbor_count((1, 1)), 2);
        assert_eq!(field.neighbor_count((1, 2)), 1);
        assert_eq!(field.neighbor_count((2, 1)), 1);
        assert_eq!(field.neighbor_count((2, 0)), 0);
        assert_eq!(field.neighbor_count((0, 2)), 0);
        assert_eq!(field.neighbor_count((0, 0)), 0);
        assert_eq!(field.neighbor_count((2, 2)), 0);
    }

    #[test]
    fn counts_match_brute_force() {
        let mines = [(0, 0), (3, 0), (4, 1), (1, 2), (2, 2), (4, 3), (0, 3)];
        let field = Minefield::from_mine_coords((5, 4), &mines).unwrap();

        for coords in iter_row_major(field.size()) {
            if !field.has_mine(coords) {
                assert_eq!(
                    field.neighbor_count(coords),
                    brute_force_count(&field, coords),
                    "count at {coords:?}"
                );
            }
        }
        assert_eq!(field.safe_cell_count(), 13);
    }

    #[test]
    fn queries_are_idempotent() {
        let field = Minefield::from_mine_coords((4, 4), &[(1, 1), (2, 3)]).unwrap();
        for coords in iter_row_major(field.size()) {
            assert_eq!(field.has_mine(coords), field.has_mine(coords));
            assert_eq!(field.neighbor_count(coords), field.neighbor_count(coords));
        }
    }

    #[test]
    fn fully_mined_neighborhood_counts_eight() {
        let mines: Vec<_> = iter_row_major((3, 3)).filter(|&c| c != (1, 1)).collect();
        let field = Minefield::from_mine_coords((3, 3), &mines).unwrap();
        assert_eq!(field.neighbor_count((1, 1)), 8);
    }

    #[test]
    fn rejects_out_of_range_mine() {
        assert_eq!(
            Minefield::from_mine_coords((3, 3), &[(3, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn rejects_empty_board() {
        assert_eq!(
            Minefield::from_mine_coords((0, 3), &[]),
            Err(GameError::InvalidSize)
        );
        assert_eq!(
            Minefield::from_mine_mask(Array2::default([300, 1])),
            Err(GameError::InvalidSize)
        );
    }

    #[test]
    fn validate_coords_checks_both_axes() {
        let field = Minefield::from_mine_coords((4, 2), &[]).unwrap();
        assert_eq!(field.validate_coords((3, 1)), Ok((3, 1)));
        assert_eq!(field.validate_coords((4, 0)), Err(GameError::InvalidCoords));
        assert_eq!(field.validate_coords((0, 2)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn game_config_reports_fixed_layout() {
        let field = Minefield::from_mine_coords((4, 5), &[(0, 0), (1, 1)]).unwrap();
        let config = field.game_config();
        assert_eq!(config.size, (4, 5));
        assert_eq!(config.mines, 2);
        assert_eq!(config.density(), 0.1);
    }
}
