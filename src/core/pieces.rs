use std::fmt::Display;
use std::ops::Add;

use thiserror::Error;

use crate::core::constants::{shapes, Shape};

/// Row/column pair. Row 0 is the top of the board, rows grow downwards.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Position {
    row: isize,
    col: isize,
}

impl Position {
    pub const fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }

    pub fn row(&self) -> isize {
        self.row
    }

    pub fn col(&self) -> isize {
        self.col
    }

    pub fn set_row(&mut self, row: isize) {
        self.row = row;
    }

    pub fn set_col(&mut self, col: isize) {
        self.col = col;
    }

    pub fn up(&self) -> Self {
        Self::new(self.row - 1, self.col)
    }

    pub fn down(&self) -> Self {
        Self::new(self.row + 1, self.col)
    }

    pub fn left(&self) -> Self {
        Self::new(self.row, self.col - 1)
    }

    pub fn right(&self) -> Self {
        Self::new(self.row, self.col + 1)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Self) -> Self::Output {
        Position::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl From<(isize, isize)> for Position {
    fn from((row, col): (isize, isize)) -> Self {
        Self::new(row, col)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BlockColor {
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
}

impl BlockColor {
    pub fn symbol(&self) -> char {
        match self {
            BlockColor::Red => 'R',
            BlockColor::Green => 'G',
            BlockColor::Blue => 'B',
            BlockColor::Yellow => 'Y',
            BlockColor::Magenta => 'M',
        }
    }
}

impl Display for BlockColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Block {
    color: BlockColor,
    position: Position,
}

impl Block {
    pub fn new(color: BlockColor, position: Position) -> Self {
        Self { color, position }
    }

    pub fn color(&self) -> BlockColor {
        self.color
    }

    pub fn set_color(&mut self, color: BlockColor) {
        self.color = color;
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PieceKind {
    I,
    Diagonal,
    L,
}

impl PieceKind {
    pub fn all() -> Vec<PieceKind> {
        vec![PieceKind::I, PieceKind::Diagonal, PieceKind::L]
    }

    pub(crate) fn shape(&self) -> &'static Shape {
        match self {
            PieceKind::I => &shapes::I,
            PieceKind::Diagonal => &shapes::DIAGONAL,
            PieceKind::L => &shapes::L,
        }
    }

    pub fn block_count(&self) -> usize {
        self.shape().offsets.len()
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum MoveDirection {
    Left,
    Right,
    Down,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PieceError {
    #[error("{kind:?} piece needs {expected} colors, got {actual}")]
    InvalidConfiguration {
        kind: PieceKind,
        expected: usize,
        actual: usize,
    },
}

/// A rigid group of colored blocks. Block positions are stored relative
/// to the anchor; `blocks()` hands out absolute copies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    position: Position,
    blocks: Vec<Block>,
    width: usize,
}

impl Piece {
    pub fn new(
        kind: PieceKind,
        position: Position,
        colors: &[BlockColor],
    ) -> Result<Self, PieceError> {
        let shape = kind.shape();
        if colors.len() != shape.offsets.len() {
            return Err(PieceError::InvalidConfiguration {
                kind,
                expected: shape.offsets.len(),
                actual: colors.len(),
            });
        }

        let mut blocks: Vec<Block> = colors
            .iter()
            .map(|&color| Block::new(color, Position::default()))
            .collect();
        for (block, &offset) in blocks.iter_mut().zip(shape.offsets) {
            block.set_position(offset.into());
        }

        Ok(Self {
            kind,
            position,
            blocks,
            width: shape.width,
        })
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Block colors in storage order.
    pub fn colors(&self) -> Vec<BlockColor> {
        self.blocks.iter().map(Block::color).collect()
    }

    /// Fresh copies of the blocks, placed at anchor + offset.
    pub fn blocks(&self) -> Vec<Block> {
        self.blocks
            .iter()
            .map(|block| Block::new(block.color(), self.position + block.position()))
            .collect()
    }

    pub fn shift_down(&mut self) {
        self.position.set_row(self.position.row() + 1);
    }

    pub fn shift_left(&mut self) {
        self.position.set_col(self.position.col() - 1);
    }

    pub fn shift_right(&mut self) {
        self.position.set_col(self.position.col() + 1);
    }

    pub fn shift(&mut self, direction: MoveDirection) {
        match direction {
            MoveDirection::Left => self.shift_left(),
            MoveDirection::Right => self.shift_right(),
            MoveDirection::Down => self.shift_down(),
        }
    }

    /// Horizontal flip inside the bounding box.
    pub fn transform(&mut self) {
        let width = self.width as isize;
        for block in self.blocks.iter_mut() {
            let mut position = block.position();
            position.set_col(width - position.col() - 1);
            block.set_position(position);
        }
    }

    /// Block `i` takes the color of block `i - 1`; block 0 takes the last one's.
    pub fn cycle(&mut self) {
        let Some(last) = self.blocks.last().map(Block::color) else {
            return;
        };
        for i in (1..self.blocks.len()).rev() {
            let color = self.blocks[i - 1].color();
            self.blocks[i].set_color(color);
        }
        self.blocks[0].set_color(last);
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let height = self
            .blocks
            .iter()
            .map(|block| block.position().row() + 1)
            .max()
            .unwrap_or(0);

        let mut s = String::new();
        for row in 0..height {
            for col in 0..self.width as isize {
                let here = Position::new(row, col);
                let symbol = self
                    .blocks
                    .iter()
                    .find(|block| block.position() == here)
                    .map_or('.', |block| block.color().symbol());
                s.push(symbol);
            }
            s.push('\n');
        }

        write!(f, "{}", s)
    }
}
