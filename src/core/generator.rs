use crate::core::constants::{spawn, COLORS, WIDTH};
use crate::core::pieces::{BlockColor, Piece, PieceError, PieceKind, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use std::iter::Iterator;

/// Weighted random piece source: I 3/5, Diagonal 1/5, L 1/5, every block
/// colored independently from `COLORS`.
#[derive(Clone, Debug)]
pub struct PieceGenerator {
    rng: StdRng,
    spawn_col: isize,
}

impl PieceGenerator {
    pub fn new(rng: StdRng) -> Self {
        Self {
            rng,
            spawn_col: spawn::column(WIDTH),
        }
    }

    /// Centres spawned pieces on a board `width` cells wide.
    pub fn with_board_width(mut self, width: usize) -> Self {
        self.spawn_col = spawn::column(width);
        self
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn get_next(&mut self) -> Result<Piece, PieceError> {
        let (kind, row) = match self.rng.gen_range(0..5) {
            0..=2 => (PieceKind::I, spawn::I_ROW),
            3 => (PieceKind::Diagonal, spawn::DIAGONAL_ROW),
            _ => (PieceKind::L, spawn::L_ROW),
        };

        let colors: Vec<BlockColor> = (0..kind.block_count())
            .map(|_| random_color(&mut self.rng))
            .collect();
        Piece::new(kind, Position::new(row, self.spawn_col), &colors)
    }
}

/// Uniform pick from the shared palette.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> BlockColor {
    COLORS[rng.gen_range(0..COLORS.len())]
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Iterator for PieceGenerator {
    type Item = Piece;

    fn next(&mut self) -> Option<Self::Item> {
        self.get_next().ok()
    }
}
