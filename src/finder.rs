//! The exhaustive grid word search.
//!
//! Every dictionary word reachable by a legal path is found by brute force:
//! one depth-first traversal per starting cell, extending the path to every
//! unvisited 8-directional neighbour. There is no prefix pruning — with a
//! 4×4 grid the whole path space is a few million nodes and a hash lookup
//! per node, well under a second. The [`FinderConfig::node_budget`] is the
//! safety valve that keeps the same code from spinning forever on a grid
//! it was never meant for; exhausting it ends the search with a truncated
//! report instead of an error.
//!
//! The traversal mutates one shared visited mask, path buffer and candidate
//! string, pushing before each recursion and popping on return, so sibling
//! branches never see each other's visits.
//!
//! A path "matches" when its case-folded spelling equals the case-folded
//! form of a collection entry; every entry that folds to the spelling is
//! reported (case variants of one spelling are separate entries with their
//! own lemmas). The grid only supplies letter sequences — reported surface
//! forms always come from the collection, exact case and fadas intact.

use crate::grid::{Grid, Position, DIRECTIONS};
use crate::irish_char::{collate, normalize};
use crate::lemma::WordCollection;
use log::{debug, warn};
use std::collections::{HashMap, HashSet};

/// Shortest word the search reports. The daily game plays with 4.
pub const DEFAULT_MIN_LENGTH: usize = 4;

/// Default node budget. A 4×4 grid needs a few million nodes; anything
/// approaching this bound is a grid the brute-force approach is wrong for.
pub const DEFAULT_NODE_BUDGET: usize = 50_000_000;

#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Minimum path length (in letters) for a candidate to be looked up.
    pub min_length: usize,
    /// Maximum number of cell visits before the search gives up.
    pub node_budget: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        FinderConfig {
            min_length: DEFAULT_MIN_LENGTH,
            node_budget: DEFAULT_NODE_BUDGET,
        }
    }
}

/// Whether the search ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// Every path was explored.
    Complete,
    /// The node budget ran out; the word list may be incomplete.
    BudgetExhausted,
}

/// Result of a grid search.
#[derive(Debug, Clone)]
pub struct FindReport {
    /// Found (surface form, lemma) pairs, deduplicated, in collation order
    /// (fada forms sort next to their base spellings).
    pub words: Vec<(String, String)>,
    pub status: SearchStatus,
    /// Cells visited across all traversals; the authoring CLI logs this.
    pub nodes_visited: usize,
}

/// Find every collection entry spellable by a valid path on `grid`.
#[must_use]
pub fn find_words(grid: &Grid, collection: &WordCollection, config: &FinderConfig) -> FindReport {
    let pairs: Vec<(&str, &str)> = collection.iter().collect();

    // case-folded surface -> indices of all entries that fold to it
    let mut folded: HashMap<String, Vec<usize>> = HashMap::new();
    for (at, (surface, _)) in pairs.iter().enumerate() {
        folded.entry(normalize(surface)).or_default().push(at);
    }

    if folded.is_empty() {
        debug!("empty collection, nothing to search for");
        return FindReport {
            words: Vec::new(),
            status: SearchStatus::Complete,
            nodes_visited: 0,
        };
    }

    let mut search = Search {
        grid,
        folded: &folded,
        config,
        visited: vec![false; grid.size() * grid.size()],
        path_len: 0,
        word: String::new(),
        found: HashSet::new(),
        nodes: 0,
        exhausted: false,
    };

    for row in 0..grid.size() {
        for col in 0..grid.size() {
            search.dfs(Position::new(row, col));
        }
    }

    let mut words: Vec<(String, String)> = search
        .found
        .iter()
        .map(|&at| (pairs[at].0.to_string(), pairs[at].1.to_string()))
        .collect();
    words.sort_by(|a, b| collate(&a.0, &b.0));

    let status = if search.exhausted {
        SearchStatus::BudgetExhausted
    } else {
        SearchStatus::Complete
    };
    debug!(
        "search visited {} nodes, found {} words",
        search.nodes,
        words.len()
    );

    FindReport {
        words,
        status,
        nodes_visited: search.nodes,
    }
}

/// Mutable traversal state, shared across the whole search.
struct Search<'a> {
    grid: &'a Grid,
    folded: &'a HashMap<String, Vec<usize>>,
    config: &'a FinderConfig,
    visited: Vec<bool>,
    path_len: usize,
    /// Case-folded spelling of the current path.
    word: String,
    found: HashSet<usize>,
    nodes: usize,
    exhausted: bool,
}

impl Search<'_> {
    fn dfs(&mut self, pos: Position) {
        if self.exhausted {
            return;
        }
        self.nodes += 1;
        if self.nodes > self.config.node_budget {
            warn!(
                "node budget of {} exhausted, stopping search",
                self.config.node_budget
            );
            self.exhausted = true;
            return;
        }

        let size = self.grid.size();
        let cell = pos.row * size + pos.col;
        // grid cells are always in bounds for their own grid
        let letter = self.grid.letter(pos).unwrap_or_default();

        // push
        self.visited[cell] = true;
        self.path_len += 1;
        let word_len_before = self.word.len();
        for c in letter.chars() {
            self.word.extend(c.to_lowercase());
        }

        if self.path_len >= self.config.min_length {
            if let Some(hits) = self.folded.get(&self.word) {
                self.found.extend(hits.iter().copied());
            }
        }

        for (dr, dc) in DIRECTIONS {
            if let Some(next) = pos.step(dr, dc, size) {
                if !self.visited[next.row * size + next.col] {
                    self.dfs(next);
                }
            }
        }

        // pop, so sibling branches start from the same state
        self.word.truncate(word_len_before);
        self.path_len -= 1;
        self.visited[cell] = false;
    }
}
