mod pieces;
mod board;
mod generator;
mod matching;
pub mod constants;


pub use board::{Board, BlockGame, Grid, GridCell, StepOutcome};
pub use pieces::{Block, BlockColor, MoveDirection, Piece, PieceError, PieceKind, Position};
pub use generator::{random_color, PieceGenerator};
pub use matching::Matcher;
