use crate::core::pieces::BlockColor;

/// Default playfield size, in cells.
pub const WIDTH: usize = 12;
pub const HEIGHT: usize = 24;

/// Rows of the checkerboard pre-fill on a freshly seeded board.
pub const SEEDED_ROWS: usize = 8;

/// Palette shared by the generator and board seeding. Pieces and seeded
/// cells must draw from the same set or nothing can ever match.
pub static COLORS: [BlockColor; 5] = [
    BlockColor::Red,
    BlockColor::Green,
    BlockColor::Blue,
    BlockColor::Yellow,
    BlockColor::Magenta,
];

/// A fixed offset table plus the bounding width used by the flip.
#[derive(Copy, Clone, Debug)]
pub struct Shape {
    pub offsets: &'static [(isize, isize)],
    pub width: usize,
}

// (row, col) offsets from the anchor, in block storage order.
pub mod shapes {
    use super::Shape;
    //  .#.
    //  .#.
    //  .#.
    pub static I: Shape = Shape { offsets: &[(0, 1), (1, 1), (2, 1)], width: 3 };
    //  #.
    //  .#
    pub static DIAGONAL: Shape = Shape { offsets: &[(0, 0), (1, 1)], width: 2 };
    //  ##.
    //  .#.
    //  .#.
    pub static L: Shape = Shape { offsets: &[(0, 0), (0, 1), (1, 1), (2, 1)], width: 3 };
}

// Pieces spawn mostly above row 0, around the middle column.
pub mod spawn {
    pub const I_ROW: isize = -2;
    pub const DIAGONAL_ROW: isize = -1;
    pub const L_ROW: isize = -2;

    /// Anchor column for a board `width` cells wide; 5 on the default board.
    pub fn column(width: usize) -> isize {
        width as isize / 2 - 1
    }
}
