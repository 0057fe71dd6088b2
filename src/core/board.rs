use std::fmt::Display;

use array2d::Array2D;
use bevy::log::{debug, error, trace};
use bevy::prelude::Resource;
use itertools::Itertools;
use rand::Rng;

use crate::core::generator::{random_color, PieceGenerator};
use crate::core::matching::Matcher;
use crate::core::pieces::{BlockColor, MoveDirection, Piece, Position};

/// A locked, colored cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct GridCell {
    color: BlockColor,
}

impl GridCell {
    pub fn new(color: BlockColor) -> Self {
        Self { color }
    }

    pub fn color(&self) -> BlockColor {
        self.color
    }

    pub fn matches(&self, other: &GridCell) -> bool {
        self.color == other.color
    }
}

/// Row-major `height x width` matrix, row 0 on top.
pub type Grid = Array2D<Option<GridCell>>;

/// What a concrete board has to provide on top of its grid.
pub trait BlockGame {
    fn grid(&self) -> &Grid;

    /// Scans the grid, returns the cells to clear and adds their count to
    /// the score.
    fn determine_cells_to_collapse(&mut self) -> Vec<Position>;

    fn determine_score(&self) -> usize;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Spawned,
    Moved,
    Locked { collapsed: Vec<Position> },
    GameOver,
}

#[derive(Resource, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Grid,
    current: Option<Piece>,
    generator: PieceGenerator,
    score: usize,
    game_over: bool,
}

impl Board {
    pub fn new(width: usize, height: usize, generator: PieceGenerator) -> Self {
        Self {
            width,
            height,
            cells: Array2D::filled_with(None, height, width),
            current: None,
            generator: generator.with_board_width(width),
            score: 0,
            game_over: false,
        }
    }

    /// Board whose lowest `rows` rows hold a checkerboard of random colors.
    pub fn seeded<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        generator: PieceGenerator,
        rows: usize,
        rng: &mut R,
    ) -> Self {
        let mut board = Self::new(width, height, generator);
        let first = height.saturating_sub(rows);
        for row in first..height {
            for col in ((row - first) % 2..width).step_by(2) {
                board.cells[(row, col)] = Some(GridCell::new(random_color(rng)));
            }
        }
        board
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.row() >= 0
            && position.col() >= 0
            && position.row() < self.height as isize
            && position.col() < self.width as isize
    }

    pub fn get(&self, position: Position) -> Option<&GridCell> {
        if !self.in_bounds(position) {
            return None;
        }
        self.cells[(position.row() as usize, position.col() as usize)].as_ref()
    }

    /// Writes a cell; positions off the grid are ignored.
    pub fn set(&mut self, position: Position, cell: Option<GridCell>) {
        if !self.in_bounds(position) {
            return;
        }
        self.cells[(position.row() as usize, position.col() as usize)] = cell;
    }

    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    /// Replaces the active piece without any fit check.
    pub fn set_current(&mut self, piece: Piece) {
        self.current = Some(piece);
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Columns must be on the board and rows above it; rows inside it must be empty.
    pub fn fits(&self, piece: &Piece) -> bool {
        piece.blocks().iter().all(|block| {
            let position = block.position();
            if position.col() < 0 || position.col() >= self.width as isize {
                return false;
            }
            if position.row() >= self.height as isize {
                return false;
            }
            position.row() < 0 || self.get(position).is_none()
        })
    }

    /// Takes the generator's next piece. Ends the game if it has no room.
    pub fn spawn(&mut self) -> bool {
        let piece = match self.generator.get_next() {
            Ok(piece) => piece,
            Err(err) => {
                error!("could not build the next piece: {}", err);
                self.current = None;
                self.game_over = true;
                return false;
            }
        };
        if !self.fits(&piece) {
            debug!("no room to spawn {:?}, game over", piece.kind());
            self.current = None;
            self.game_over = true;
            return false;
        }
        debug!("spawned {:?} at {:?}", piece.kind(), piece.position());
        self.current = Some(piece);
        true
    }

    fn try_update(&mut self, update: impl FnOnce(&mut Piece)) -> bool {
        let Some(current) = self.current.as_ref() else {
            return false;
        };
        let mut candidate = current.clone();
        update(&mut candidate);

        if self.fits(&candidate) {
            self.current = Some(candidate);
            true
        } else {
            trace!("rejected move for {:?} at {:?}", current.kind(), current.position());
            false
        }
    }

    pub fn try_shift(&mut self, direction: MoveDirection) -> bool {
        self.try_update(|piece| piece.shift(direction))
    }

    pub fn try_transform(&mut self) -> bool {
        self.try_update(Piece::transform)
    }

    /// Colors never affect the fit, so this always succeeds with a piece.
    pub fn cycle(&mut self) -> bool {
        self.try_update(Piece::cycle)
    }

    /// Copies the active piece into the grid. Returns false if part of it
    /// was still above the board; those blocks are lost.
    pub fn lock(&mut self) -> bool {
        let Some(piece) = self.current.take() else {
            return false;
        };

        let mut landed = true;
        for block in piece.blocks() {
            if block.position().row() < 0 {
                landed = false;
                continue;
            }
            self.set(block.position(), Some(GridCell::new(block.color())));
        }
        debug!("locked {:?} at {:?}", piece.kind(), piece.position());
        landed
    }

    /// Clears `positions`; cells above a cleared cell drop down to fill it.
    pub fn collapse(&mut self, positions: &[Position]) {
        let positions: Vec<Position> = positions
            .iter()
            .copied()
            .filter(|&position| self.in_bounds(position))
            .unique()
            .collect();

        for &position in positions.iter() {
            self.set(position, None);
        }

        for col in positions.iter().map(Position::col).unique() {
            let cleared: Vec<isize> = positions
                .iter()
                .filter(|position| position.col() == col)
                .map(Position::row)
                .collect();

            let mut fall = 0;
            for row in (0..self.height as isize).rev() {
                if cleared.contains(&row) {
                    fall += 1;
                    continue;
                }
                if fall > 0 {
                    let cell = self.get(Position::new(row, col)).copied();
                    self.set(Position::new(row + fall, col), cell);
                    self.set(Position::new(row, col), None);
                }
            }
        }
    }

    /// One tick: spawn if idle, otherwise fall one row or lock and resolve
    /// matches until the grid is stable.
    pub fn step(&mut self) -> StepOutcome {
        if self.game_over {
            return StepOutcome::GameOver;
        }

        if self.current.is_none() {
            return if self.spawn() {
                StepOutcome::Spawned
            } else {
                StepOutcome::GameOver
            };
        }

        if self.try_shift(MoveDirection::Down) {
            return StepOutcome::Moved;
        }

        if !self.lock() {
            debug!("piece locked above the board, game over");
            self.game_over = true;
        }

        let mut collapsed = Vec::new();
        loop {
            let cells = self.determine_cells_to_collapse();
            if cells.is_empty() {
                break;
            }
            self.collapse(&cells);
            collapsed.extend(cells);
        }

        StepOutcome::Locked { collapsed }
    }
}

impl BlockGame for Board {
    fn grid(&self) -> &Grid {
        &self.cells
    }

    fn determine_cells_to_collapse(&mut self) -> Vec<Position> {
        let cells = Matcher::new(&self.cells).cells_to_collapse();
        self.score += cells.len();
        if !cells.is_empty() {
            debug!("collapsing {} cells, score {}", cells.len(), self.score);
        }
        cells
    }

    fn determine_score(&self) -> usize {
        self.score
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = String::new();

        for row in self.cells.as_rows() {
            for cell in row {
                s.push(cell.map_or('.', |cell| cell.color().symbol()));
            }
            s.push('\n');
        }

        write!(f, "{}", s)
    }
}
