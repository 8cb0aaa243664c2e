//! Daily puzzle snapshots and their storage.
//!
//! A snapshot is the immutable record of one day's puzzle: the grid plus
//! its full solution set, stored as `<grids-dir>/<YYYYMMDD>.json` with the
//! shape `{"grid": [[...]], "words": [[surface, lemma], ...]}`. Authoring
//! writes a snapshot once; play time only reads.
//!
//! [`DailyPuzzleResolver`] serves "the puzzle for this date": the exact key
//! when it exists, otherwise the most recent snapshot in the store. The
//! fixed-width date key makes lexicographic order chronological, so "most
//! recent" is simply the greatest key. "Today" is injected by the caller —
//! the resolver never looks at the system clock, which keeps the fallback
//! logic testable with fixed dates.
//!
//! # Error Codes
//!
//! - S001: `NoSnapshots` (The store holds no snapshot at all)
//! - S002: `Corrupt` (A snapshot file exists but does not parse)
//! - S003: `InvalidKey` (A snapshot key is not an 8-digit date)
//! - S004: `Io` (The store could not be read or written)
//! - S005: `Encode` (A snapshot could not be serialized)

use crate::grid::Grid;
use crate::irish_char::normalize;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// One day's puzzle: the grid and every (surface form, lemma) pair the
/// grid search found on it, in collation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleSnapshot {
    pub grid: Grid,
    pub words: Vec<(String, String)>,
}

impl PuzzleSnapshot {
    /// Look a spelled word up in the solution set.
    ///
    /// Matching is case-folded; the returned pair is the stored entry with
    /// its exact case and fadas. `None` is an ordinary miss ("not a word
    /// today"), never an error.
    #[must_use]
    pub fn lookup(&self, spelled: &str) -> Option<(&str, &str)> {
        let folded = normalize(spelled);
        self.words
            .iter()
            .find(|(surface, _)| normalize(surface) == folded)
            .map(|(surface, lemma)| (surface.as_str(), lemma.as_str()))
    }
}

/// True iff `key` is a fixed-width YYYYMMDD date string.
#[must_use]
pub fn is_date_key(key: &str) -> bool {
    key.len() == 8 && key.bytes().all(|b| b.is_ascii_digit())
}

/// Errors from snapshot storage and resolution.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The store holds no snapshot at all, so there is nothing to fall
    /// back to. Reported upward as a hard failure; any "generate a random
    /// grid instead" behaviour belongs to the caller.
    #[error("no puzzle snapshot found")]
    NoSnapshots,

    /// A snapshot file exists but cannot be parsed into grid + words.
    #[error("snapshot {key} is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid snapshot key {key:?} (expected YYYYMMDD)")]
    InvalidKey { key: String },

    #[error("snapshot storage error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("failed to encode snapshot {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SnapshotError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            SnapshotError::NoSnapshots => "S001",
            SnapshotError::Corrupt { .. } => "S002",
            SnapshotError::InvalidKey { .. } => "S003",
            SnapshotError::Io { .. } => "S004",
            SnapshotError::Encode { .. } => "S005",
        }
    }

    /// Returns optional help text with guidance for fixing the error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            SnapshotError::NoSnapshots => {
                Some("Author at least one puzzle first: cearnogach author --grid <file> ...")
            }
            SnapshotError::Corrupt { .. } => {
                Some("Re-author the snapshot for this date; the file on disk is not valid")
            }
            SnapshotError::InvalidKey { .. } => {
                Some("Dates are 8 digits, e.g. 20250101")
            }
            _ => None,
        }
    }

    /// Format with error code and help text, for top-level CLI reporting.
    #[must_use]
    pub fn display_detailed(&self) -> String {
        let mut out = format!("[{}] {}", self.code(), self);
        if let Some(help) = self.help() {
            out.push_str("\nHelp: ");
            out.push_str(help);
        }
        out
    }
}

/// Keyed snapshot storage. Implemented by the on-disk store below; tests
/// substitute in-memory implementations to drive the resolver.
pub trait SnapshotStore {
    /// The snapshot stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<PuzzleSnapshot>, SnapshotError>;

    /// Every date key present in the store, in no particular order.
    fn list_keys(&self) -> Result<Vec<String>, SnapshotError>;
}

/// Directory-backed store: one `<key>.json` file per day.
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirStore { dir: dir.into() }
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Write a snapshot under `key`, atomically (write to a temp file in
    /// the same directory, then rename over the target). Returns the path
    /// written.
    pub fn put(&self, key: &str, snapshot: &PuzzleSnapshot) -> Result<PathBuf, SnapshotError> {
        if !is_date_key(key) {
            return Err(SnapshotError::InvalidKey {
                key: key.to_string(),
            });
        }
        fs::create_dir_all(&self.dir)?;

        let mut temp = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer_pretty(&mut temp, snapshot).map_err(|source| {
            SnapshotError::Encode {
                key: key.to_string(),
                source,
            }
        })?;

        let path = self.file_path(key);
        temp.persist(&path).map_err(|e| SnapshotError::Io {
            source: e.error,
        })?;
        Ok(path)
    }
}

impl SnapshotStore for DirStore {
    fn get(&self, key: &str) -> Result<Option<PuzzleSnapshot>, SnapshotError> {
        let contents = match fs::read_to_string(self.file_path(key)) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot = serde_json::from_str(&contents).map_err(|source| {
            SnapshotError::Corrupt {
                key: key.to_string(),
                source,
            }
        })?;
        Ok(Some(snapshot))
    }

    fn list_keys(&self) -> Result<Vec<String>, SnapshotError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            // a store that was never written to is just empty
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    if is_date_key(stem) {
                        keys.push(stem.to_string());
                    }
                }
            }
        }
        Ok(keys)
    }
}

/// Serves the puzzle for a requested date, falling back to the most
/// recent snapshot when that date has none.
pub struct DailyPuzzleResolver<S> {
    store: S,
    today: String,
}

impl<S: SnapshotStore> DailyPuzzleResolver<S> {
    /// `today` is the caller's current date key; [`Self::resolve_today`]
    /// uses it, everything else ignores it.
    #[must_use]
    pub fn new(store: S, today: impl Into<String>) -> Self {
        DailyPuzzleResolver {
            store,
            today: today.into(),
        }
    }

    pub fn resolve_today(&self) -> Result<(String, PuzzleSnapshot), SnapshotError> {
        self.resolve(&self.today)
    }

    /// The snapshot for `requested`, or the most recent one when absent.
    ///
    /// # Errors
    /// [`SnapshotError::NoSnapshots`] when the store is empty,
    /// [`SnapshotError::Corrupt`] when the chosen file does not parse.
    pub fn resolve(&self, requested: &str) -> Result<(String, PuzzleSnapshot), SnapshotError> {
        if let Some(snapshot) = self.store.get(requested)? {
            return Ok((requested.to_string(), snapshot));
        }

        let mut keys = self.store.list_keys()?;
        keys.sort_unstable();
        let Some(latest) = keys.pop() else {
            return Err(SnapshotError::NoSnapshots);
        };

        debug!("no snapshot for {requested}, falling back to {latest}");
        match self.store.get(&latest)? {
            Some(snapshot) => Ok((latest, snapshot)),
            // the file vanished between list and read
            None => Err(SnapshotError::NoSnapshots),
        }
    }
}
