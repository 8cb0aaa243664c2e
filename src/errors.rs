//! Error types for grid and path operations with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code for documentation lookup:
//!
//! - G001: `NotSquare` (Grid rows have inconsistent lengths)
//! - G002: `EmptyGrid` (Grid has no rows)
//! - G003: `EmptyCell` (A cell holds no letter)
//! - G004: `NotOneLetter` (A cell holds more than one letter)
//! - P001: `OutOfBounds` (A path position lies outside the grid)
//! - A001: `Io` (A dictionary artifact could not be read)
//! - A002: `Json` (A dictionary artifact is not valid JSON)
//!
//! Snapshot-storage errors live in [`crate::snapshot`] with their own `S0xx`
//! codes, mirroring this scheme.

use crate::grid::Position;
use std::io;
use std::path::PathBuf;

/// Errors raised while constructing a [`crate::grid::Grid`].
///
/// Construction is the only place cell contents are checked; every later
/// operation (spelling, searching) may assume a well-formed grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("grid is not square: row {row} has {found} cells, expected {expected}")]
    NotSquare {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("grid has no rows")]
    EmptyGrid,

    #[error("cell ({row},{col}) is empty")]
    EmptyCell { row: usize, col: usize },

    #[error("cell ({row},{col}) holds {cell:?}, which is not a single letter")]
    NotOneLetter {
        row: usize,
        col: usize,
        cell: String,
    },
}

/// Error raised when spelling a path that leaves the grid.
///
/// Callers that validate first never see this; it exists so `spell` is
/// total over arbitrary input paths.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("position ({},{}) is outside a {size}x{size} grid", pos.row, pos.col)]
    OutOfBounds { pos: Position, size: usize },
}

/// Errors raised while loading a dictionary artifact (lemma source, word
/// list or word collection) from disk.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path} is not valid JSON for this artifact: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ArtifactError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ArtifactError::Io { .. } => "A001",
            ArtifactError::Json { .. } => "A002",
        }
    }
}

impl GridError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            GridError::NotSquare { .. } => "G001",
            GridError::EmptyGrid => "G002",
            GridError::EmptyCell { .. } => "G003",
            GridError::NotOneLetter { .. } => "G004",
        }
    }

    /// Returns optional help text with guidance for fixing the error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            GridError::NotSquare { .. } => {
                Some("Every row must have the same number of cells as there are rows")
            }
            GridError::EmptyGrid => Some("Provide at least one row of letters"),
            GridError::EmptyCell { .. } => {
                Some("Fill in every cell before analyzing or playing the grid")
            }
            GridError::NotOneLetter { .. } => {
                Some("Each cell holds exactly one letter; separate cells with spaces")
            }
        }
    }
}

impl PathError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            PathError::OutOfBounds { .. } => "P001",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_error_codes_are_unique() {
        let errors = [
            GridError::NotSquare {
                row: 1,
                found: 3,
                expected: 4,
            },
            GridError::EmptyGrid,
            GridError::EmptyCell { row: 0, col: 0 },
            GridError::NotOneLetter {
                row: 0,
                col: 0,
                cell: "ab".into(),
            },
        ];
        let mut codes: Vec<&str> = errors.iter().map(GridError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_display_messages() {
        let e = GridError::EmptyCell { row: 2, col: 3 };
        assert_eq!(e.to_string(), "cell (2,3) is empty");

        let e = PathError::OutOfBounds {
            pos: Position { row: 4, col: 0 },
            size: 4,
        };
        assert_eq!(e.to_string(), "position (4,0) is outside a 4x4 grid");
        assert_eq!(e.code(), "P001");
    }

    #[test]
    fn test_help_text_present_for_user_facing_errors() {
        assert!(GridError::EmptyGrid.help().is_some());
        assert!(GridError::EmptyCell { row: 0, col: 0 }.help().is_some());
    }
}
