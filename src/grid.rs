//! The letter grid and its neighbour relation.
//!
//! A grid is an N×N matrix of cells, each holding exactly one letter. Irish
//! letters with a síneadh fada ("á", "É") are single letters for spelling
//! purposes, so cells are stored as small strings rather than `char`s and a
//! combining accent after the base character is accepted.
//!
//! Adjacency is the 8-directional king-move relation: two distinct cells are
//! adjacent when their Chebyshev distance is 1. That relation is the whole
//! of the game's geometry — the path validator and the word search both
//! build on [`is_adjacent`] / [`DIRECTIONS`] and nothing else.

use crate::errors::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate. Equality and ordering are by field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// The neighbouring position one step in `(dr, dc)`, or `None` when the
    /// step leaves an `size`×`size` grid.
    #[must_use]
    pub fn step(self, dr: i32, dc: i32, size: usize) -> Option<Position> {
        let row = self.row.checked_add_signed(dr as isize)?;
        let col = self.col.checked_add_signed(dc as isize)?;
        if row < size && col < size {
            Some(Position { row, col })
        } else {
            None
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// The 8 compass offsets, row-major from the top-left neighbour.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// True iff `a` and `b` are distinct cells at Chebyshev distance 1
/// (the 8 compass neighbours; a cell is never adjacent to itself).
#[must_use]
pub fn is_adjacent(a: Position, b: Position) -> bool {
    a != b && a.row.abs_diff(b.row) <= 1 && a.col.abs_diff(b.col) <= 1
}

/// True iff both coordinates of `p` lie in `[0, size)`.
#[must_use]
pub fn in_bounds(p: Position, size: usize) -> bool {
    p.row < size && p.col < size
}

/// An immutable N×N letter grid.
///
/// Constructed from rows of cells; construction validates shape and cell
/// contents, so every `Grid` in circulation is fully populated and square.
/// Deserialization goes through the same validation, which is how a
/// malformed snapshot file surfaces as a corrupt-data error rather than a
/// panic mid-search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<String>>", into = "Vec<Vec<String>>")]
pub struct Grid {
    cells: Vec<String>,
    size: usize,
}

impl Grid {
    /// Build a grid from rows of single-letter cells.
    ///
    /// # Errors
    /// - [`GridError::EmptyGrid`] when `rows` is empty
    /// - [`GridError::NotSquare`] when any row length differs from the row count
    /// - [`GridError::EmptyCell`] when a cell is empty or whitespace
    /// - [`GridError::NotOneLetter`] when a cell holds more than one letter
    pub fn new(rows: Vec<Vec<String>>) -> Result<Self, GridError> {
        let size = rows.len();
        if size == 0 {
            return Err(GridError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, cols) in rows.into_iter().enumerate() {
            if cols.len() != size {
                return Err(GridError::NotSquare {
                    row,
                    found: cols.len(),
                    expected: size,
                });
            }
            for (col, cell) in cols.into_iter().enumerate() {
                let letter = cell.trim();
                if letter.is_empty() {
                    return Err(GridError::EmptyCell { row, col });
                }
                if !is_single_letter(letter) {
                    return Err(GridError::NotOneLetter {
                        row,
                        col,
                        cell: letter.to_string(),
                    });
                }
                cells.push(letter.to_string());
            }
        }

        Ok(Grid { cells, size })
    }

    /// Parse a grid from text, one row per line.
    ///
    /// Cells may be separated by whitespace (`b e a n`); a line without
    /// whitespace is split into individual characters (`bean`), which covers
    /// grids typed quickly on the command line.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let rows: Vec<Vec<String>> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                if line.contains(char::is_whitespace) {
                    line.split_whitespace().map(str::to_string).collect()
                } else {
                    line.chars().map(String::from).collect()
                }
            })
            .collect();
        Grid::new(rows)
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The letter at `pos`, or `None` when `pos` is out of bounds.
    #[must_use]
    pub fn letter(&self, pos: Position) -> Option<&str> {
        if in_bounds(pos, self.size) {
            Some(self.cells[pos.row * self.size + pos.col].as_str())
        } else {
            None
        }
    }

    /// Rows of cells, in reading order. Used for display and serialization.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.cells
            .chunks(self.size)
            .map(|chunk| chunk.to_vec())
            .collect()
    }
}

impl TryFrom<Vec<Vec<String>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<String>>) -> Result<Self, Self::Error> {
        Grid::new(rows)
    }
}

impl From<Grid> for Vec<Vec<String>> {
    fn from(grid: Grid) -> Self {
        grid.rows()
    }
}

/// One letter: a single character, optionally followed by combining marks
/// (so both precomposed "á" and "a" + U+0301 count as one letter).
fn is_single_letter(cell: &str) -> bool {
    let mut chars = cell.chars();
    if chars.next().is_none() {
        return false;
    }
    chars.all(|c| ('\u{0300}'..='\u{036F}').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_no_self_adjacency() {
        let p = Position::new(1, 1);
        assert!(!is_adjacent(p, p));
    }

    #[test]
    fn test_all_eight_neighbours_are_adjacent() {
        let center = Position::new(1, 1);
        for (dr, dc) in DIRECTIONS {
            let n = center.step(dr, dc, 3).unwrap();
            assert!(is_adjacent(center, n), "{center} vs {n}");
            assert!(is_adjacent(n, center));
        }
    }

    #[test]
    fn test_distance_two_is_not_adjacent() {
        assert!(!is_adjacent(Position::new(0, 0), Position::new(0, 2)));
        assert!(!is_adjacent(Position::new(0, 0), Position::new(2, 2)));
        assert!(!is_adjacent(Position::new(2, 0), Position::new(0, 0)));
    }

    #[test]
    fn test_in_bounds() {
        assert!(in_bounds(Position::new(0, 0), 4));
        assert!(in_bounds(Position::new(3, 3), 4));
        assert!(!in_bounds(Position::new(4, 0), 4));
        assert!(!in_bounds(Position::new(0, 4), 4));
    }

    #[test]
    fn test_step_stays_inside() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.step(-1, 0, 4), None);
        assert_eq!(corner.step(0, -1, 4), None);
        assert_eq!(corner.step(1, 1, 4), Some(Position::new(1, 1)));

        let far = Position::new(3, 3);
        assert_eq!(far.step(1, 0, 4), None);
        assert_eq!(far.step(0, 1, 4), None);
    }

    #[test]
    fn test_grid_construction_and_lookup() {
        let grid = Grid::new(rows(&[&["c", "a"], &["t", "s"]])).unwrap();
        assert_eq!(grid.size(), 2);
        assert_eq!(grid.letter(Position::new(0, 0)), Some("c"));
        assert_eq!(grid.letter(Position::new(1, 1)), Some("s"));
        assert_eq!(grid.letter(Position::new(2, 0)), None);
    }

    #[test]
    fn test_grid_accepts_fada_letters() {
        let grid = Grid::new(rows(&[&["m", "ó"], &["r", "a"]])).unwrap();
        assert_eq!(grid.letter(Position::new(0, 1)), Some("ó"));
    }

    #[test]
    fn test_grid_accepts_combining_accent() {
        // 'a' followed by U+0301 is one letter
        let grid = Grid::new(rows(&[&["a\u{0301}", "b"], &["c", "d"]])).unwrap();
        assert_eq!(grid.size(), 2);
    }

    #[test]
    fn test_grid_rejects_empty_cell() {
        let err = Grid::new(rows(&[&["c", ""], &["t", "s"]])).unwrap_err();
        assert!(matches!(err, GridError::EmptyCell { row: 0, col: 1 }));
    }

    #[test]
    fn test_grid_rejects_multi_letter_cell() {
        let err = Grid::new(rows(&[&["ca", "a"], &["t", "s"]])).unwrap_err();
        assert!(matches!(err, GridError::NotOneLetter { row: 0, col: 0, .. }));
    }

    #[test]
    fn test_grid_rejects_non_square() {
        let err = Grid::new(rows(&[&["c", "a", "t"], &["s", "o"]])).unwrap_err();
        assert!(matches!(err, GridError::NotSquare { row: 0, .. }));
    }

    #[test]
    fn test_grid_rejects_empty() {
        assert!(matches!(Grid::new(vec![]), Err(GridError::EmptyGrid)));
    }

    #[test]
    fn test_parse_whitespace_separated() {
        let grid = Grid::parse("b e a n\nf r i t\nc a t h\nm ó r a").unwrap();
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.letter(Position::new(3, 1)), Some("ó"));
    }

    #[test]
    fn test_parse_compact_rows() {
        let grid = Grid::parse("cat\nsón\nrit").unwrap();
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.letter(Position::new(1, 1)), Some("ó"));
    }

    #[test]
    fn test_serde_round_trip() {
        let grid = Grid::parse("ca\nts").unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, r#"[["c","a"],["t","s"]]"#);
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn test_deserialize_rejects_malformed_grid() {
        let result: Result<Grid, _> = serde_json::from_str(r#"[["c",""],["t","s"]]"#);
        assert!(result.is_err());
    }
}
