use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::LazyLock;

// Character-set constants for the Irish alphabet
pub(crate) const VOWELS: &str = "aeiou";
pub(crate) const FADA_VOWELS: &str = "áéíóú";
pub(crate) const CONSONANTS: &str = "bcdfghlmnprst";

static VOWEL_SET: LazyLock<HashSet<char>> =
    LazyLock::new(|| VOWELS.chars().chain(FADA_VOWELS.chars()).collect());
static CONSONANT_SET: LazyLock<HashSet<char>> = LazyLock::new(|| CONSONANTS.chars().collect());

pub trait IrishChar {
    fn is_vowel(&self) -> bool;
    fn is_consonant(&self) -> bool;
    fn is_fada(&self) -> bool;
    /// The same letter with any síneadh fada removed ('á' → 'a').
    /// Non-fada characters are returned unchanged.
    fn without_fada(&self) -> char;
}

impl IrishChar for char {
    fn is_vowel(&self) -> bool {
        // to_lowercase (not to_ascii_lowercase) so 'Á' folds to 'á'
        let lower = self.to_lowercase().next().unwrap_or(*self);
        VOWEL_SET.contains(&lower)
    }
    fn is_consonant(&self) -> bool {
        CONSONANT_SET.contains(&self.to_ascii_lowercase())
    }
    fn is_fada(&self) -> bool {
        matches!(self, 'á' | 'é' | 'í' | 'ó' | 'ú' | 'Á' | 'É' | 'Í' | 'Ó' | 'Ú')
    }
    fn without_fada(&self) -> char {
        match self {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            'Á' => 'A',
            'É' => 'E',
            'Í' => 'I',
            'Ó' => 'O',
            'Ú' => 'U',
            _ => *self,
        }
    }
}

/// Normalize a word for lookup: trim surrounding whitespace and case-fold.
///
/// Fadas are preserved — "Siúl" and "siúl" normalize to the same string,
/// "siul" does not. This is the folding used by the lemma index, the grid
/// search and the play-time lookup, so all three agree on what counts as
/// the same word.
#[must_use]
pub fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Collation key: case-folded with fadas stripped.
///
/// Used as the primary sort key so that accented forms land next to their
/// base spellings ("fáda" directly after "fada") instead of past 'z'.
#[must_use]
pub fn sort_key(word: &str) -> String {
    word.trim()
        .to_lowercase()
        .chars()
        .map(|c| c.without_fada())
        .collect()
}

/// Order two surface forms the way the word list is displayed: primary key
/// ignores case and fadas, the exact string breaks ties so the ordering is
/// total and deterministic.
#[must_use]
pub fn collate(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b)).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_vowel() {
        assert!('a'.is_vowel());
        assert!('e'.is_vowel());
        assert!('í'.is_vowel());
        assert!('ú'.is_vowel());
        assert!('Ó'.is_vowel());
    }

    #[test]
    fn test_is_not_vowel() {
        assert!(!'b'.is_vowel());
        assert!(!'t'.is_vowel());
        assert!(!'1'.is_vowel());
        assert!(!'@'.is_vowel());
    }

    #[test]
    fn test_is_consonant() {
        assert!('b'.is_consonant());
        assert!('s'.is_consonant());
        assert!('T'.is_consonant());
    }

    #[test]
    fn test_is_not_consonant() {
        assert!(!'a'.is_consonant());
        assert!(!'á'.is_consonant());
        // not part of the traditional Irish alphabet
        assert!(!'k'.is_consonant());
        assert!(!'z'.is_consonant());
    }

    #[test]
    fn test_fada_detection_and_removal() {
        assert!('á'.is_fada());
        assert!('Ú'.is_fada());
        assert!(!'a'.is_fada());

        assert_eq!('á'.without_fada(), 'a');
        assert_eq!('É'.without_fada(), 'E');
        assert_eq!('x'.without_fada(), 'x');
    }

    #[test]
    fn test_normalize_folds_case_but_keeps_fadas() {
        assert_eq!(normalize("Siúl"), "siúl");
        assert_eq!(normalize("  bEAn  "), "bean");
        // fadas are significant after normalization
        assert_ne!(normalize("siúl"), normalize("siul"));
    }

    #[test]
    fn test_sort_key_strips_fadas() {
        assert_eq!(sort_key("fáda"), "fada");
        assert_eq!(sort_key("MÓRA"), "mora");
    }

    #[test]
    fn test_collate_places_fada_forms_next_to_base() {
        let mut words = vec!["fada", "zú", "fáda", "bos"];
        words.sort_by(|a, b| collate(a, b));
        assert_eq!(words, vec!["bos", "fada", "fáda", "zú"]);
    }

    #[test]
    fn test_collate_is_deterministic_on_case_variants() {
        // equal sort keys fall back to exact comparison
        assert_eq!(collate("Móra", "móra"), Ordering::Less);
        assert_eq!(collate("móra", "móra"), Ordering::Equal);
    }
}
