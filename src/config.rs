use std::time::Duration;

use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::constants::{HEIGHT, SEEDED_ROWS, WIDTH};
use crate::core::{Board, PieceGenerator};

#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    pub board_width: usize,
    pub board_height: usize,
    /// Fixed seed for reproducible games; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Checkerboard rows at the bottom of a new board, 0 for an empty one.
    pub seeded_rows: usize,
    pub tick_duration: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: WIDTH,
            board_height: HEIGHT,
            seed: None,
            seeded_rows: SEEDED_ROWS,
            tick_duration: Duration::from_millis(500),
        }
    }
}

impl GameConfig {
    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// The generator and the board fill get separate streams so the piece
    /// sequence does not depend on how many cells were seeded.
    pub fn build_board(&self) -> Board {
        let mut rng = self.rng();
        let generator = PieceGenerator::from_seed(rng.gen::<u64>());

        if self.seeded_rows == 0 {
            return Board::new(self.board_width, self.board_height, generator);
        }
        Board::seeded(
            self.board_width,
            self.board_height,
            generator,
            self.seeded_rows,
            &mut rng,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BlockGame, Position};

    #[test]
    fn test_seeded_config_is_reproducible() {
        let config = GameConfig {
            seed: Some(42),
            ..Default::default()
        };
        let a = config.build_board();
        let b = config.build_board();
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_empty_board_config() {
        let config = GameConfig {
            board_width: 7,
            board_height: 9,
            seed: Some(1),
            seeded_rows: 0,
            ..Default::default()
        };
        let board = config.build_board();
        assert_eq!((board.width(), board.height()), (7, 9));
        assert!(board.grid().elements_row_major_iter().all(Option::is_none));
        assert!(board.get(Position::new(8, 6)).is_none());
    }
}
