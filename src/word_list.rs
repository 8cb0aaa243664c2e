//! `word_list` — Module to load and maintain the reference vocabulary
//!
//! The word list (`word-list.json`, a flat JSON array) is the superset of
//! surface forms the puzzle may ever use. Entries are expected to already
//! carry correct case and fadas; this module deliberately does NOT
//! normalize them — the exact spelling is the identity of an entry, and
//! normalization happens at lookup time instead.
//!
//! The maintenance half deals with proper nouns: place names leak into the
//! source vocabulary, and the puzzle should not ask players to find
//! "Éire". [`exclusions_from_names`] turns a name table (Irish and English
//! columns) into a case-folded exclusion set, expanding the quirks of
//! Irish naming along the way:
//! - a leading "an" article is dropped ("An Fhrainc" → "Fhrainc")
//! - a lenition 'h' in second position is dropped ("Fhrainc" → "Frainc")
//! - multi-word names contribute each word separately, stripped of
//!   punctuation
//!
//! [`WordList::remove_excluded`] then filters the vocabulary by case-folded
//! membership, reporting how many entries were dropped.

use crate::errors::ArtifactError;
use crate::irish_char::{normalize, FADA_VOWELS};
use log::debug;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// The flat reference vocabulary, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordList {
    pub words: Vec<String>,
}

impl WordList {
    #[must_use]
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        WordList {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a `word-list.json` style flat array.
    pub fn parse_from_str(contents: &str) -> Result<Self, serde_json::Error> {
        let words: Vec<String> = serde_json::from_str(contents)?;
        Ok(WordList { words })
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_from_str(&contents).map_err(|source| ArtifactError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Drop every word whose case-folded form is in `exclusions`.
    /// Returns the number of words removed.
    pub fn remove_excluded(&mut self, exclusions: &HashSet<String>) -> usize {
        let before = self.words.len();
        self.words.retain(|word| !exclusions.contains(&normalize(word)));
        let removed = before - self.words.len();
        debug!("word list filtered: {removed} of {before} entries removed");
        removed
    }
}

/// One row of the name table (`countries.json`): the Irish name, the
/// English name, and whatever other columns the file carries (ignored).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NameEntry {
    #[serde(default)]
    pub ga: Option<String>,
    #[serde(default)]
    pub en: Option<String>,
}

impl NameEntry {
    pub fn parse_list_from_str(contents: &str) -> Result<Vec<NameEntry>, serde_json::Error> {
        serde_json::from_str(contents)
    }

    pub fn load_list_from_path(path: impl AsRef<Path>) -> Result<Vec<NameEntry>, ArtifactError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_list_from_str(&contents).map_err(|source| ArtifactError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Strip the definite article and a second-position lenition 'h' from an
/// Irish name: "An Bhreatain" → "Breatain".
#[must_use]
pub fn base_irish_name(name: &str) -> String {
    let mut name = name.trim();
    if let Some(prefix) = name.get(..3) {
        if prefix.eq_ignore_ascii_case("an ") {
            name = name[3..].trim();
        }
    }

    let mut chars: Vec<char> = name.chars().collect();
    if chars.len() >= 2 && chars[1].eq_ignore_ascii_case(&'h') {
        chars.remove(1);
    }
    chars.into_iter().collect()
}

/// Every word of every name, case-folded and stripped of punctuation —
/// the exclusion set for [`WordList::remove_excluded`].
#[must_use]
pub fn exclusions_from_names(names: &[NameEntry]) -> HashSet<String> {
    let mut exclusions = HashSet::new();

    for entry in names {
        if let Some(ga) = &entry.ga {
            for word in base_irish_name(ga).to_lowercase().split_whitespace() {
                let cleaned = clean_name_word(word, true);
                if !cleaned.is_empty() {
                    exclusions.insert(cleaned);
                }
            }
        }
        if let Some(en) = &entry.en {
            for word in en.to_lowercase().split_whitespace() {
                let cleaned = clean_name_word(word, false);
                if !cleaned.is_empty() {
                    exclusions.insert(cleaned);
                }
            }
        }
    }

    debug!("{} exclusion words from {} names", exclusions.len(), names.len());
    exclusions
}

/// Keep word characters only; Irish names also keep fada vowels
/// ("poblacht," → "poblacht", "chósta" keeps "ó").
fn clean_name_word(word: &str, irish: bool) -> String {
    word.chars()
        .filter(|c| {
            c.is_ascii_alphanumeric() || *c == '_' || (irish && FADA_VOWELS.contains(*c))
        })
        .collect()
}
