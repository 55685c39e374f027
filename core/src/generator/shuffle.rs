use alloc::vec::Vec;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Uniformly random placement: the first `mines` cells are mined and the whole
/// array is then put through a Fisher-Yates shuffle.
#[derive(Clone, Debug, PartialEq)]
pub struct ShuffleGenerator {
    seed: u64,
}

impl ShuffleGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for ShuffleGenerator {
    fn generate(self, config: GameConfig) -> Board {
        let topology = config.topology();
        let total_cells = topology.len();
        let mines = usize::from(config.mines);

        if mines >= total_cells {
            log::warn!(
                "Board already full, generated anyway, requested {} but only fits {}",
                mines,
                total_cells
            );
        }

        let mut cells: Vec<Cell> = (0..total_cells)
            .map(|index| {
                if index < mines {
                    Cell::with_value(CellValue::Mine)
                } else {
                    Cell::default()
                }
            })
            .collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        cells.shuffle(&mut rng);

        let board = Board::from_cells(topology, &cells);
        log::debug!(
            "Generated {}x{} board with {} mines from seed {}",
            board.width(),
            board.height(),
            board.mine_count(),
            self.seed
        );
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn generate(config: GameConfig, seed: u64) -> Board {
        ShuffleGenerator::new(seed).generate(config)
    }

    #[test]
    fn places_exact_mine_count() {
        for seed in 0..50 {
            for config in [
                GameConfig::beginner(),
                GameConfig::expert(),
                GameConfig::new(3, 3, 8).unwrap(),
                GameConfig::new(1, 2, 1).unwrap(),
            ] {
                let board = generate(config, seed);
                let mines = board.cells().filter(|cell| cell.is_mine()).count();

                assert_eq!(mines, usize::from(config.mines));
                assert_eq!(board.mine_count(), config.mines);
                assert_eq!(board.game_config(), config);
            }
        }
    }

    #[test]
    fn counts_match_neighboring_mines() {
        for seed in 0..50 {
            let board = generate(GameConfig::intermediate(), seed);
            for index in 0..board.topology().len() {
                let cell = board.cell(index);
                if cell.is_mine() {
                    continue;
                }
                let expected = board
                    .neighbors_of(index)
                    .filter(|&pos| board.cell(pos).is_mine())
                    .count() as u8;
                assert_eq!(cell.value(), CellValue::Count(expected));
            }
        }
    }

    #[test]
    fn fresh_cells_are_closed_and_unflagged() {
        let board = generate(GameConfig::default(), 7);

        assert!(board.cells().all(|cell| !cell.is_opened() && !cell.is_flagged()));
    }

    #[test]
    fn same_seed_same_board() {
        let config = GameConfig::expert();

        assert_eq!(generate(config, 1234), generate(config, 1234));
        assert_ne!(generate(config, 1234), generate(config, 4321));
    }

    #[test]
    fn placement_is_roughly_uniform() {
        // one mine on a 2x2 board lands on each cell about a quarter of the time
        let config = GameConfig::new(2, 2, 1).unwrap();
        let mut hits = vec![0u32; 4];
        let rounds = 4000;
        for seed in 0..rounds {
            let board = generate(config, seed);
            for (index, cell) in board.cells().enumerate() {
                if cell.is_mine() {
                    hits[index] += 1;
                }
            }
        }

        for count in hits {
            assert!((800..1200).contains(&count), "skewed placement: {count}");
        }
    }
}
