//! `lemma` — building the word→lemma dictionary used by the grid search.
//!
//! The source material is a lemma dictionary (`lemmas.json`): a JSON object
//! mapping each headword to the list of inflected forms that belong to it.
//! One form can be claimed by several lemmas ("siúl" the noun and "Siúl" the
//! proper noun both list "siúl"), so the reverse index keeps *all* claimants
//! per normalized form, in the order they were encountered.
//!
//! [`resolve_collection`] then walks a flat word list and pins each surface
//! form to exactly one lemma:
//!
//! - no candidates → the word is recorded as unmatched and dropped
//!   (never a build failure; the report carries the leftovers)
//! - otherwise the first-encountered candidate wins, unless some candidate
//!   is, case-folded, the queried form itself — a lemma that *is* the word
//!   beats a lemma that merely inflects to it.
//!
//! The output [`WordCollection`] is the dictionary artifact consumed by
//! [`crate::finder`]; it keeps the word-list order and the exact surface
//! spellings (case and fadas intact), which is what the JSON on disk holds.

use crate::errors::ArtifactError;
use crate::irish_char::normalize;
use log::debug;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// The lemma dictionary: (headword, inflected forms) in file order.
///
/// File order matters — it is the encounter order that breaks ties when a
/// form is claimed by several lemmas, so the same file always produces the
/// same collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LemmaSource {
    entries: Vec<(String, Vec<String>)>,
}

impl LemmaSource {
    #[must_use]
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<S>)>,
        S: Into<String>,
    {
        LemmaSource {
            entries: pairs
                .into_iter()
                .map(|(lemma, forms)| {
                    (lemma.into(), forms.into_iter().map(Into::into).collect())
                })
                .collect(),
        }
    }

    /// Parse `lemmas.json` content.
    ///
    /// Values that are not arrays are tolerated (the lemma keeps an empty
    /// form list) and non-string members are skipped, matching the lenient
    /// handling of the dictionary tooling that produces the file.
    pub fn parse_from_str(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
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
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(lemma, forms)| (lemma.as_str(), forms.as_slice()))
    }
}

impl<'de> Deserialize<'de> for LemmaSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SourceVisitor;

        impl<'de> Visitor<'de> for SourceVisitor {
            type Value = LemmaSource;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object mapping lemma to an array of word forms")
            }

            fn visit_map<A>(self, mut access: A) -> Result<LemmaSource, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((lemma, value)) =
                    access.next_entry::<String, serde_json::Value>()?
                {
                    let forms = match value {
                        serde_json::Value::Array(items) => items
                            .into_iter()
                            .filter_map(|item| match item {
                                serde_json::Value::String(s) => Some(s),
                                _ => None,
                            })
                            .collect(),
                        _ => Vec::new(),
                    };
                    entries.push((lemma, forms));
                }
                Ok(LemmaSource { entries })
            }
        }

        deserializer.deserialize_map(SourceVisitor)
    }
}

/// Reverse index: normalized surface form → lemmas claiming it, in
/// encounter order.
#[derive(Debug, Clone, Default)]
pub struct LemmaIndex {
    by_form: HashMap<String, Vec<String>>,
}

impl LemmaIndex {
    /// Build the reverse index from a lemma source.
    ///
    /// Each lemma is indexed under its own normalized spelling first, then
    /// under every form it lists. Duplicate claims accumulate rather than
    /// overwrite, so the resolution step can see every candidate.
    #[must_use]
    pub fn build(source: &LemmaSource) -> Self {
        let mut by_form: HashMap<String, Vec<String>> = HashMap::new();

        for (lemma, forms) in source.iter() {
            by_form
                .entry(normalize(lemma))
                .or_default()
                .push(lemma.to_string());

            for form in forms {
                by_form
                    .entry(normalize(form))
                    .or_default()
                    .push(lemma.to_string());
            }
        }

        debug!(
            "lemma index: {} lemmas -> {} distinct forms",
            source.len(),
            by_form.len()
        );
        LemmaIndex { by_form }
    }

    /// Candidate lemmas for a normalized form, in encounter order.
    #[must_use]
    pub fn candidates(&self, normalized_form: &str) -> &[String] {
        self.by_form
            .get(normalized_form)
            .map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_form.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_form.is_empty()
    }
}

/// The dictionary artifact: surface form → lemma, in word-list order.
///
/// Surface forms are exact spellings — "Móra" and "móra" are distinct
/// entries, each with its own lemma. Serialized as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordCollection {
    pairs: Vec<(String, String)>,
    by_surface: HashMap<String, usize>,
}

impl WordCollection {
    /// Insert a pair, keeping the first lemma when a surface form repeats.
    /// Returns false when the surface form was already present.
    pub fn insert(&mut self, surface: impl Into<String>, lemma: impl Into<String>) -> bool {
        let surface = surface.into();
        if self.by_surface.contains_key(&surface) {
            return false;
        }
        self.by_surface.insert(surface.clone(), self.pairs.len());
        self.pairs.push((surface, lemma.into()));
        true
    }

    /// The lemma for an exact surface form.
    #[must_use]
    pub fn lemma(&self, surface: &str) -> Option<&str> {
        self.by_surface
            .get(surface)
            .map(|&at| self.pairs[at].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(surface, lemma)| (surface.as_str(), lemma.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn parse_from_str(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
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
}

impl Serialize for WordCollection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for (surface, lemma) in &self.pairs {
            map.serialize_entry(surface, lemma)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WordCollection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CollectionVisitor;

        impl<'de> Visitor<'de> for CollectionVisitor {
            type Value = WordCollection;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object mapping surface form to lemma")
            }

            fn visit_map<A>(self, mut access: A) -> Result<WordCollection, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut collection = WordCollection::default();
                while let Some((surface, lemma)) = access.next_entry::<String, String>()? {
                    collection.insert(surface, lemma);
                }
                Ok(collection)
            }
        }

        deserializer.deserialize_map(CollectionVisitor)
    }
}

/// Outcome of resolving a word list against a lemma index.
///
/// `matched + unmatched.len()` always equals the number of word-list
/// entries handed in; an unmatched word never aborts the build.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub collection: WordCollection,
    pub matched: usize,
    pub unmatched: Vec<String>,
}

/// Resolve every word-list entry to its lemma.
///
/// The entry keeps its exact spelling as the collection key; only the
/// lookup is done on the normalized form. See the module docs for the
/// tie-break rule.
#[must_use]
pub fn resolve_collection(words: &[String], index: &LemmaIndex) -> Resolution {
    let mut collection = WordCollection::default();
    let mut matched = 0;
    let mut unmatched = Vec::new();

    for word in words {
        let normalized = normalize(word);
        let candidates = index.candidates(&normalized);
        if candidates.is_empty() {
            unmatched.push(word.clone());
            continue;
        }

        let selected = candidates
            .iter()
            .find(|lemma| normalize(lemma) == normalized)
            .unwrap_or(&candidates[0]);
        collection.insert(word.clone(), selected.clone());
        matched += 1;
    }

    debug!(
        "collection resolved: {} matched, {} unmatched",
        matched,
        unmatched.len()
    );
    Resolution {
        collection,
        matched,
        unmatched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> LemmaSource {
        LemmaSource::from_pairs([
            ("siúl", vec!["ag siúl", "shiúil", "siúlta"]),
            ("bean", vec!["mná", "mnaoi"]),
            ("mór", vec!["móra", "mhór"]),
        ])
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_index_contains_lemma_itself() {
        let index = LemmaIndex::build(&source());
        assert_eq!(index.candidates("siúl"), ["siúl"]);
    }

    #[test]
    fn test_index_maps_forms_to_their_lemma() {
        let index = LemmaIndex::build(&source());
        assert_eq!(index.candidates("mná"), ["bean"]);
        assert_eq!(index.candidates("móra"), ["mór"]);
    }

    #[test]
    fn test_index_normalizes_case_and_whitespace() {
        let index = LemmaIndex::build(&LemmaSource::from_pairs([("Éire", vec![" Éireann "])]));
        assert_eq!(index.candidates("éire"), ["Éire"]);
        assert_eq!(index.candidates("éireann"), ["Éire"]);
    }

    #[test]
    fn test_index_accumulates_shared_forms() {
        let index = LemmaIndex::build(&LemmaSource::from_pairs([
            ("rith", vec!["rith"]),
            ("ráth", vec!["rith"]),
        ]));
        assert_eq!(index.candidates("rith"), ["rith", "rith", "ráth"]);
    }

    #[test]
    fn test_resolve_matches_forms_and_lemmas() {
        let index = LemmaIndex::build(&source());
        let resolution = resolve_collection(&words(&["mná", "siúl", "móra"]), &index);

        assert_eq!(resolution.matched, 3);
        assert!(resolution.unmatched.is_empty());
        assert_eq!(resolution.collection.lemma("mná"), Some("bean"));
        assert_eq!(resolution.collection.lemma("siúl"), Some("siúl"));
        assert_eq!(resolution.collection.lemma("móra"), Some("mór"));
    }

    #[test]
    fn test_resolve_records_unmatched_without_failing() {
        let index = LemmaIndex::build(&source());
        let resolution = resolve_collection(&words(&["mná", "zebra"]), &index);

        assert_eq!(resolution.matched, 1);
        assert_eq!(resolution.unmatched, ["zebra"]);
        assert_eq!(resolution.collection.lemma("zebra"), None);
        // matched + unmatched partition the word list
        assert_eq!(resolution.matched + resolution.unmatched.len(), 2);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let index = LemmaIndex::build(&source());
        let list = words(&["mná", "siúl", "zebra", "móra"]);
        let first = resolve_collection(&list, &index);
        let second = resolve_collection(&list, &index);

        assert_eq!(first.collection, second.collection);
        assert_eq!(first.matched, second.matched);
        assert_eq!(first.unmatched, second.unmatched);
    }

    #[test]
    fn test_exact_match_tie_break_is_deterministic_per_ordering() {
        // both "siúl" and "Siúl" case-fold to the query, so the exact-match
        // preference finds whichever was encountered first — the result
        // depends on source order but never on anything else
        let forward = LemmaSource::from_pairs([("siúl", vec!["ag siúl"]), ("Siúl", vec![])]);
        let backward = LemmaSource::from_pairs([("Siúl", vec![]), ("siúl", vec!["ag siúl"])]);

        let index = LemmaIndex::build(&forward);
        let resolution = resolve_collection(&words(&["siúl"]), &index);
        assert_eq!(resolution.collection.lemma("siúl"), Some("siúl"));

        let index = LemmaIndex::build(&backward);
        let resolution = resolve_collection(&words(&["siúl"]), &index);
        assert_eq!(resolution.collection.lemma("siúl"), Some("Siúl"));
    }

    #[test]
    fn test_first_encounter_wins_without_exact_match() {
        // neither candidate case-folds to the query, so encounter order decides
        let source = LemmaSource::from_pairs([("siúl", vec!["ag siúl"]), ("Siúlóid", vec!["ag siúl"])]);
        let index = LemmaIndex::build(&source);
        let resolution = resolve_collection(&words(&["ag siúl"]), &index);
        assert_eq!(resolution.collection.lemma("ag siúl"), Some("siúl"));
    }

    #[test]
    fn test_exact_match_preference_is_case_folded() {
        // "Siúl" case-folds to the query "siúl", so it beats the
        // first-encountered "bealach" that merely lists the form
        let source = LemmaSource::from_pairs([("bealach", vec!["siúl"]), ("Siúl", vec![])]);
        let index = LemmaIndex::build(&source);
        let resolution = resolve_collection(&words(&["siúl"]), &index);
        assert_eq!(resolution.collection.lemma("siúl"), Some("Siúl"));
    }

    #[test]
    fn test_collection_keeps_word_list_order_and_exact_keys() {
        let index = LemmaIndex::build(&source());
        let resolution = resolve_collection(&words(&["móra", "Mhór", "mná"]), &index);

        let keys: Vec<&str> = resolution.collection.iter().map(|(w, _)| w).collect();
        // "Mhór" resolves through the normalized form but keeps its spelling
        assert_eq!(keys, ["móra", "Mhór", "mná"]);
    }

    #[test]
    fn test_collection_duplicate_surface_keeps_first() {
        let mut collection = WordCollection::default();
        assert!(collection.insert("mná", "bean"));
        assert!(!collection.insert("mná", "other"));
        assert_eq!(collection.lemma("mná"), Some("bean"));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_lemma_source_parses_object() {
        let source =
            LemmaSource::parse_from_str(r#"{"siúl": ["ag siúl"], "bean": ["mná"]}"#).unwrap();
        assert_eq!(source.len(), 2);
        let entries: Vec<_> = source.iter().collect();
        assert_eq!(entries[0].0, "siúl");
        assert_eq!(entries[0].1, ["ag siúl"]);
    }

    #[test]
    fn test_lemma_source_tolerates_non_array_values() {
        let source = LemmaSource::parse_from_str(r#"{"siúl": "oops", "bean": ["mná"]}"#).unwrap();
        let entries: Vec<_> = source.iter().collect();
        assert!(entries[0].1.is_empty());
        assert_eq!(entries[1].1, ["mná"]);
    }

    #[test]
    fn test_lemma_source_rejects_non_object() {
        assert!(LemmaSource::parse_from_str(r#"["siúl"]"#).is_err());
    }

    #[test]
    fn test_collection_json_round_trip() {
        let mut collection = WordCollection::default();
        collection.insert("mná", "bean");
        collection.insert("Móra", "Móra");
        collection.insert("móra", "mór");

        let json = serde_json::to_string(&collection).unwrap();
        assert_eq!(json, r#"{"mná":"bean","Móra":"Móra","móra":"mór"}"#);

        let back = WordCollection::parse_from_str(&json).unwrap();
        assert_eq!(back, collection);
    }
}
