use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::time::Instant;

use cearnogach::errors::GridError;
use cearnogach::finder::{self, FinderConfig, SearchStatus};
use cearnogach::grid::{Grid, Position};
use cearnogach::lemma::{resolve_collection, LemmaIndex, LemmaSource, WordCollection};
use cearnogach::path::{is_valid_path, spell};
use cearnogach::snapshot::{DailyPuzzleResolver, DirStore, PuzzleSnapshot, SnapshotError};
use cearnogach::word_list::{exclusions_from_names, NameEntry, WordList};

/// Cearnógach puzzle toolkit
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the word→lemma collection from the lemma dictionary and word list
    BuildCollection {
        /// Path to the lemma dictionary (lemma -> array of word forms)
        #[arg(long, default_value = "lemmas.json")]
        lemmas: String,

        /// Path to the word list (flat array of surface forms)
        #[arg(long, default_value = "word-list.json")]
        word_list: String,

        /// Name table (e.g. countries.json); its words are removed from the
        /// word list before resolution
        #[arg(long)]
        exclude: Option<String>,

        /// Where to write the collection artifact
        #[arg(short, long, default_value = "word-collection.json")]
        out: String,
    },

    /// Search a grid for every collection word and write the day's snapshot
    Author {
        /// Path to the grid file, one row per line ("b e a n" or "bean")
        grid: String,

        /// Path to the word-collection artifact
        #[arg(short, long, default_value = "word-collection.json")]
        collection: String,

        /// Snapshot date (YYYYMMDD); defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Directory the dated snapshots live in
        #[arg(long, default_value = "grids")]
        grids_dir: String,

        /// Shortest word to report
        #[arg(short, long, default_value_t = finder::DEFAULT_MIN_LENGTH)]
        min_length: usize,

        /// Cell-visit cap for the search
        #[arg(long, default_value_t = finder::DEFAULT_NODE_BUDGET)]
        node_budget: usize,
    },

    /// Print the puzzle for a date, falling back to the most recent one
    Show {
        /// Requested date (YYYYMMDD); defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Directory the dated snapshots live in
        #[arg(long, default_value = "grids")]
        grids_dir: String,
    },

    /// Validate a drawn path against a day's puzzle and look the word up
    Check {
        /// Path cells as row,col pairs: "0,0 0,1 1,2"
        path: String,

        /// Requested date (YYYYMMDD); defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Directory the dated snapshots live in
        #[arg(long, default_value = "grids")]
        grids_dir: String,
    },
}

/// Entry point of the Cearnógach CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with code 1.
fn main() -> ExitCode {
    // Set up logging
    let debug_enabled = std::env::var("CEARNOGACH_DEBUG").is_ok();
    cearnogach::log::init_logger(debug_enabled);

    if let Err(e) = try_main() {
        // Print the error to stderr, with code and help text for our own
        // error types
        if let Some(snapshot_err) = e.downcast_ref::<SnapshotError>() {
            eprintln!("Error: {}", snapshot_err.display_detailed());
        } else if let Some(grid_err) = e.downcast_ref::<GridError>() {
            eprintln!("Error [{}]: {grid_err}", grid_err.code());
            if let Some(help) = grid_err.help() {
                eprintln!("Help: {help}");
            }
        } else {
            eprintln!("Error: {e}");
        }
        // Exit explicitly with a nonzero code so scripts can detect failure
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::BuildCollection {
            lemmas,
            word_list,
            exclude,
            out,
        } => build_collection(&lemmas, &word_list, exclude.as_deref(), &out),
        Command::Author {
            grid,
            collection,
            date,
            grids_dir,
            min_length,
            node_budget,
        } => author(
            &grid,
            &collection,
            date.unwrap_or_else(today_key),
            &grids_dir,
            min_length,
            node_budget,
        ),
        Command::Show { date, grids_dir } => show(date.unwrap_or_else(today_key), &grids_dir),
        Command::Check {
            path,
            date,
            grids_dir,
        } => check(&path, date.unwrap_or_else(today_key), &grids_dir),
    }
}

/// Today in the fixed-width key format the snapshot store uses.
fn today_key() -> String {
    chrono::Local::now().format("%Y%m%d").to_string()
}

fn build_collection(
    lemmas_path: &str,
    word_list_path: &str,
    exclude_path: Option<&str>,
    out_path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let t_load = Instant::now();
    let source = LemmaSource::load_from_path(lemmas_path)?;
    let mut word_list = WordList::load_from_path(word_list_path)?;
    log::info!(
        "loaded {} lemmas and {} words",
        source.len(),
        word_list.len()
    );

    if let Some(exclude_path) = exclude_path {
        let names = NameEntry::load_list_from_path(exclude_path)?;
        let removed = word_list.remove_excluded(&exclusions_from_names(&names));
        eprintln!("✓ Removed {removed} name words from the word list");
    }
    let load_secs = t_load.elapsed().as_secs_f64();

    let t_build = Instant::now();
    let index = LemmaIndex::build(&source);
    let resolution = resolve_collection(&word_list.words, &index);
    let build_secs = t_build.elapsed().as_secs_f64();

    let json = serde_json::to_string_pretty(&resolution.collection)?;
    std::fs::write(out_path, json)?;

    eprintln!(
        "✓ Matched {} words, {} unmatched; collection written to {}",
        resolution.matched,
        resolution.unmatched.len(),
        out_path
    );
    if !resolution.unmatched.is_empty() {
        eprintln!("Unmatched words (first 20):");
        for word in resolution.unmatched.iter().take(20) {
            eprintln!("  - {word}");
        }
        if resolution.unmatched.len() > 20 {
            eprintln!("  ... and {} more", resolution.unmatched.len() - 20);
        }
    }
    eprintln!("Loaded inputs in {load_secs:.3}s; resolved in {build_secs:.3}s.");

    Ok(())
}

fn author(
    grid_path: &str,
    collection_path: &str,
    date: String,
    grids_dir: &str,
    min_length: usize,
    node_budget: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let t_load = Instant::now();
    let grid = Grid::parse(&std::fs::read_to_string(grid_path)?)?;
    let collection = WordCollection::load_from_path(collection_path)?;
    let load_secs = t_load.elapsed().as_secs_f64();
    log::info!(
        "authoring {}x{} grid against {} collection entries",
        grid.size(),
        grid.size(),
        collection.len()
    );

    let t_search = Instant::now();
    let config = FinderConfig {
        min_length,
        node_budget,
    };
    let report = finder::find_words(&grid, &collection, &config);
    let search_secs = t_search.elapsed().as_secs_f64();

    if report.status == SearchStatus::BudgetExhausted {
        eprintln!(
            "⚠️  Node budget exhausted after {} cells; the word list may be incomplete",
            report.nodes_visited
        );
    }

    let snapshot = PuzzleSnapshot {
        grid,
        words: report.words,
    };
    let store = DirStore::new(grids_dir);
    let written = store.put(&date, &snapshot)?;

    eprintln!(
        "✓ Found {} words ({} cells visited); snapshot written to {}",
        snapshot.words.len(),
        report.nodes_visited,
        written.display()
    );
    eprintln!("Loaded in {load_secs:.3}s; searched in {search_secs:.3}s.");

    Ok(())
}

fn show(date: String, grids_dir: &str) -> Result<(), Box<dyn std::error::Error>> {
    let resolver = DailyPuzzleResolver::new(DirStore::new(grids_dir), date);
    let (key, snapshot) = resolver.resolve_today()?;

    for row in snapshot.grid.rows() {
        println!("{}", row.join(" "));
    }
    println!();
    for (surface, lemma) in &snapshot.words {
        if surface == lemma {
            println!("{surface}");
        } else {
            println!("{surface} ({lemma})");
        }
    }
    eprintln!("✓ Puzzle {key}: {} words", snapshot.words.len());

    Ok(())
}

fn check(
    path_arg: &str,
    date: String,
    grids_dir: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let resolver = DailyPuzzleResolver::new(DirStore::new(grids_dir), date);
    let (key, snapshot) = resolver.resolve_today()?;

    let path = parse_path(path_arg)?;
    if !is_valid_path(&path, snapshot.grid.size()) {
        // an invalid path is rejected before any lookup happens
        println!("✗ invalid path");
        return Ok(());
    }

    let word = spell(&path, &snapshot.grid)?;
    match snapshot.lookup(&word) {
        Some((surface, lemma)) if surface == lemma => {
            println!("✓ {surface}");
        }
        Some((surface, lemma)) => {
            println!("✓ {surface} ({lemma})");
        }
        None => {
            println!("✗ \"{word}\" is not in puzzle {key}");
        }
    }

    Ok(())
}

/// Parse "0,0 0,1 1,2" into positions.
fn parse_path(arg: &str) -> Result<Vec<Position>, Box<dyn std::error::Error>> {
    arg.split_whitespace()
        .map(|cell| {
            let (row, col) = cell
                .split_once(',')
                .ok_or_else(|| format!("invalid cell {cell:?} (expected row,col)"))?;
            Ok(Position::new(row.trim().parse()?, col.trim().parse()?))
        })
        .collect()
}
