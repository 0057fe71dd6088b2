use itertools::{iproduct, Itertools};

use crate::core::board::{Grid, GridCell};
use crate::core::pieces::Position;

/// Local match scan over a borrowed grid.
///
/// A cell qualifies when at least two of its four orthogonal neighbours
/// share its color; the cell and those neighbours are then marked. This is
/// a per-cell test, not a flood fill: cells are only ever merged through a
/// qualifying centre.
pub struct Matcher<'a> {
    grid: &'a Grid,
}

impl<'a> Matcher<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    fn cell(&self, position: Position) -> Option<&GridCell> {
        if position.row() < 0 || position.col() < 0 {
            return None;
        }
        self.grid
            .get(position.row() as usize, position.col() as usize)
            .and_then(Option::as_ref)
    }

    /// False when either position is off the grid or empty.
    pub fn do_cells_match(&self, p1: Position, p2: Position) -> bool {
        match (self.cell(p1), self.cell(p2)) {
            (Some(c1), Some(c2)) => c1.matches(c2),
            _ => false,
        }
    }

    /// Matching neighbours in up, right, down, left order, then `position`
    /// itself.
    pub fn matching_cells_in_neighborhood(&self, position: Position) -> Vec<Position> {
        let neighbours = [position.up(), position.right(), position.down(), position.left()];
        let mut cells: Vec<Position> = neighbours
            .into_iter()
            .filter(|&neighbour| self.do_cells_match(position, neighbour))
            .collect();
        cells.push(position);
        cells
    }

    pub fn check_neighboring_cells(&self, position: Position) -> bool {
        self.matching_cells_in_neighborhood(position).len() > 2
    }

    /// Row-major scan; the result keeps the first occurrence of each position.
    pub fn cells_to_collapse(&self) -> Vec<Position> {
        iproduct!(0..self.grid.num_rows(), 0..self.grid.num_columns())
            .map(|(row, col)| Position::new(row as isize, col as isize))
            .filter(|&position| self.check_neighboring_cells(position))
            .flat_map(|position| self.matching_cells_in_neighborhood(position))
            .unique()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pieces::BlockColor::{self, *};
    use array2d::Array2D;

    fn grid(cells: &[(usize, usize, BlockColor)]) -> Grid {
        sized_grid(6, 5, cells)
    }

    fn sized_grid(rows: usize, cols: usize, cells: &[(usize, usize, BlockColor)]) -> Grid {
        let mut grid = Array2D::filled_with(None, rows, cols);
        for &(row, col, color) in cells {
            grid[(row, col)] = Some(GridCell::new(color));
        }
        grid
    }

    #[test]
    fn test_out_of_bounds_never_matches() {
        let grid = grid(&[(0, 0, Red), (5, 4, Red)]);
        let matcher = Matcher::new(&grid);

        assert!(matcher.do_cells_match(Position::new(0, 0), Position::new(0, 0)));
        assert!(matcher.do_cells_match(Position::new(0, 0), Position::new(5, 4)));
        assert!(!matcher.do_cells_match(Position::new(0, 0), Position::new(-1, 0)));
        assert!(!matcher.do_cells_match(Position::new(0, -1), Position::new(0, 0)));
        assert!(!matcher.do_cells_match(Position::new(5, 4), Position::new(6, 4)));
        assert!(!matcher.do_cells_match(Position::new(5, 5), Position::new(5, 4)));
    }

    #[test]
    fn test_empty_and_different_colors() {
        let grid = grid(&[(1, 1, Red), (1, 2, Blue)]);
        let matcher = Matcher::new(&grid);

        assert!(!matcher.do_cells_match(Position::new(1, 1), Position::new(1, 2)));
        assert!(!matcher.do_cells_match(Position::new(1, 1), Position::new(2, 1)));
        assert!(!matcher.do_cells_match(Position::new(3, 3), Position::new(3, 3)));
    }

    #[test]
    fn test_neighborhood_order() {
        let grid = grid(&[
            (2, 2, Green),
            (1, 2, Green),
            (2, 3, Green),
            (3, 2, Green),
            (2, 1, Green),
        ]);
        let matcher = Matcher::new(&grid);

        assert_eq!(
            matcher.matching_cells_in_neighborhood(Position::new(2, 2)),
            vec![
                Position::new(1, 2),
                Position::new(2, 3),
                Position::new(3, 2),
                Position::new(2, 1),
                Position::new(2, 2),
            ]
        );
        // the centre is reported even when it is empty
        assert_eq!(
            matcher.matching_cells_in_neighborhood(Position::new(0, 0)),
            vec![Position::new(0, 0)]
        );
    }

    #[test]
    fn test_check_threshold() {
        let grid = grid(&[(0, 0, Red), (0, 1, Red), (4, 0, Blue), (4, 1, Blue), (4, 2, Blue)]);
        let matcher = Matcher::new(&grid);

        assert!(!matcher.check_neighboring_cells(Position::new(0, 0)));
        assert!(!matcher.check_neighboring_cells(Position::new(0, 1)));
        assert!(matcher.check_neighboring_cells(Position::new(4, 1)));
        assert!(!matcher.check_neighboring_cells(Position::new(4, 2)));
    }

    #[test]
    fn test_square_deduplicated_in_scan_order() {
        let grid = grid(&[(0, 0, Yellow), (0, 1, Yellow), (1, 0, Yellow), (1, 1, Yellow)]);
        let matcher = Matcher::new(&grid);

        assert_eq!(
            matcher.cells_to_collapse(),
            vec![
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(0, 0),
                Position::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_snake_collapses_whole() {
        let grid = grid(&[
            (5, 0, Magenta),
            (5, 1, Magenta),
            (4, 1, Magenta),
            (3, 1, Magenta),
            (3, 2, Magenta),
            (0, 4, Magenta),
        ]);
        let mut cells = Matcher::new(&grid).cells_to_collapse();
        cells.sort_by_key(|p| (p.row(), p.col()));

        assert_eq!(
            cells,
            vec![
                Position::new(3, 1),
                Position::new(3, 2),
                Position::new(4, 1),
                Position::new(5, 0),
                Position::new(5, 1),
            ]
        );
    }

    #[test]
    fn test_triples_joined_through_single_cell() {
        // two red triples meeting at (1, 3), which has exactly two red neighbours
        let grid = sized_grid(
            3,
            7,
            &[
                (1, 0, Red),
                (1, 1, Red),
                (1, 2, Red),
                (1, 3, Red),
                (1, 4, Red),
                (1, 5, Red),
                (1, 6, Red),
                (0, 3, Blue),
                (2, 3, Green),
            ],
        );
        let matcher = Matcher::new(&grid);
        assert_eq!(matcher.matching_cells_in_neighborhood(Position::new(1, 3)).len(), 3);

        let cells = matcher.cells_to_collapse();
        assert_eq!(cells.len(), 7);
        assert!((0..7).all(|col| cells.contains(&Position::new(1, col))));
        assert!(!cells.contains(&Position::new(0, 3)));
        assert!(!cells.contains(&Position::new(2, 3)));
    }
}
