use ndarray::Array2;

use super::*;

/// Count-exact generation: places exactly `config.mines` mines, each on a uniformly random cell that is not mined
/// yet. The same seed and config always give the same minefield.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Minefield {
        use rand::prelude::*;
        use rand::seq::index;

        debug_assert_eq!(config.validate(), Ok(config), "generator needs a validated config");
        let size = config.size;
        let total_cells = usize::from(config.total_cells());
        let mines_wanted = usize::from(config.mines).min(total_cells);

        // optimize for full boards
        if mines_wanted == total_cells {
            return build(Array2::from_elem(size.to_nd_index(), true));
        }

        let mut mines: Array2<bool> = Array2::default(size.to_nd_index());
        let (_, dim_y) = mines.dim();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        // distinct flat indices, each subset equally likely; `y` is the fast axis of the mask
        for place in index::sample(&mut rng, total_cells, mines_wanted) {
            mines[[place / dim_y, place % dim_y]] = true;
        }

        let field = build(mines);
        if field.mine_count() != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                field.mine_count(),
                config.mines
            );
        }
        log::debug!(
            "Generated {}x{} minefield with {} mines (seed {})",
            size.0,
            size.1,
            field.mine_count(),
            self.seed
        );
        field
    }
}

fn build(mines: Array2<bool>) -> Minefield {
    // validated configs have non-zero `Coord` axes
    Minefield::from_valid_mask(mines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(size: Coord2, density: f64, seed: u64) -> Minefield {
        let config = GameConfig::new(size, density).unwrap();
        RandomMinefieldGenerator::new(seed).generate(config)
    }

    #[test]
    fn places_exact_mine_count() {
        for seed in 0..32 {
            for &(size, density) in &[
                ((20, 20), 0.1),
                ((9, 9), 0.123),
                ((30, 16), 0.2),
                ((5, 1), 0.5),
                ((1, 1), 0.0),
                ((4, 4), 0.9),
            ] {
                let expected = GameConfig::new(size, density).unwrap().mines;
                let field = generate(size, density, seed);
                let counted = iter_row_major(size).filter(|&c| field.has_mine(c)).count();
                assert_eq!(field.mine_count(), expected);
                assert_eq!(counted, usize::from(expected));
            }
        }
    }

    #[test]
    fn neighbor_counts_match_placement() {
        for seed in 0..16 {
            let field = generate((12, 9), 0.25, seed);
            for coords in iter_row_major(field.size()) {
                if field.has_mine(coords) {
                    continue;
                }
                let expected = NeighborIter::new(coords, field.size())
                    .filter(|&pos| field.has_mine(pos))
                    .count();
                assert_eq!(usize::from(field.neighbor_count(coords)), expected);
            }
        }
    }

    #[test]
    fn same_seed_same_field() {
        assert_eq!(generate((16, 16), 0.15, 7), generate((16, 16), 0.15, 7));
    }

    #[test]
    fn full_density_mines_every_cell() {
        let field = generate((6, 3), 1.0, 3);
        assert_eq!(field.mine_count(), 18);
        assert_eq!(field.safe_cell_count(), 0);
    }

    #[test]
    fn large_dense_board_is_exact() {
        let config = GameConfig::new((255, 255), 0.9).unwrap();
        let field = RandomMinefieldGenerator::new(3).generate(config);
        assert_eq!(field.mine_count(), config.mines);
        assert_eq!(field.size(), (255, 255));
    }

    #[test]
    fn different_seeds_differ() {
        assert_ne!(generate((16, 16), 0.15, 7), generate((16, 16), 0.15, 8));
    }
}
