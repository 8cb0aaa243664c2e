//! Player-path validation and spelling.
//!
//! A path is an ordered sequence of grid positions. A path is playable when
//! it has at least two cells, stays inside the grid, never revisits a cell
//! and only ever steps to an 8-directional neighbour. [`is_valid_path`] is
//! the pure predicate the play-time boundary calls before looking a spelled
//! word up in the day's solution set; an invalid path is simply rejected,
//! no lookup happens.
//!
//! [`TracedPath`] carries the small amount of state a live drag needs:
//! append when the pointer enters a fresh neighbour, cut back when it
//! re-enters a cell already on the path. That truncate-on-revisit policy is
//! UI behaviour, but the primitives live here so the UI holds no grid logic
//! of its own.

use crate::errors::PathError;
use crate::grid::{in_bounds, is_adjacent, Grid, Position};
use std::collections::HashSet;

/// True iff `path` is playable on a `size`×`size` grid: at least two
/// cells, all in bounds, no repeats, consecutive cells adjacent.
#[must_use]
pub fn is_valid_path(path: &[Position], size: usize) -> bool {
    if path.len() < 2 {
        return false;
    }

    if !path.iter().all(|&pos| in_bounds(pos, size)) {
        return false;
    }

    let mut seen: HashSet<Position> = HashSet::with_capacity(path.len());
    if !path.iter().all(|&pos| seen.insert(pos)) {
        return false;
    }

    path.windows(2).all(|pair| is_adjacent(pair[0], pair[1]))
}

/// Concatenate the letters along `path`.
///
/// # Errors
/// [`PathError::OutOfBounds`] when any position lies outside the grid.
/// Validated paths never fail; unvalidated input is handled rather than
/// panicking.
pub fn spell(path: &[Position], grid: &Grid) -> Result<String, PathError> {
    let mut word = String::new();
    for &pos in path {
        let letter = grid.letter(pos).ok_or(PathError::OutOfBounds {
            pos,
            size: grid.size(),
        })?;
        word.push_str(letter);
    }
    Ok(word)
}

/// What a [`TracedPath::trace`] step did with the entered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceStep {
    /// The cell was appended to the path.
    Extended,
    /// The cell was already on the path; everything after it was cut.
    Truncated,
    /// The cell is not adjacent to the path head and was ignored.
    Ignored,
}

/// A path under construction during a drag.
#[derive(Debug, Clone, Default)]
pub struct TracedPath {
    positions: Vec<Position>,
}

impl TracedPath {
    #[must_use]
    pub fn start(pos: Position) -> Self {
        TracedPath {
            positions: vec![pos],
        }
    }

    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Feed the cell the pointer just entered.
    ///
    /// Re-entering a cell already on the path truncates back to that cell
    /// (dragging backwards undoes the path); a fresh cell adjacent to the
    /// head extends the path; anything else is ignored.
    pub fn trace(&mut self, pos: Position) -> TraceStep {
        if let Some(at) = self.positions.iter().position(|&p| p == pos) {
            self.positions.truncate(at + 1);
            return TraceStep::Truncated;
        }
        match self.positions.last() {
            Some(&head) if is_adjacent(head, pos) => {
                self.positions.push(pos);
                TraceStep::Extended
            }
            None => {
                self.positions.push(pos);
                TraceStep::Extended
            }
            Some(_) => TraceStep::Ignored,
        }
    }
}
