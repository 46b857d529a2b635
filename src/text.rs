//! Text normalization and tokenization shared by every pipeline stage.
//!
//! All scoring operates on the output of [`tokenize`], so segmentation, corpus
//! statistics, and query extraction agree on what a "term" is.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Minimum token length kept by [`tokenize`]. Shorter fragments are almost
/// always artifacts of PDF extraction (column breaks, ligature splits).
pub const MIN_TOKEN_LEN: usize = 3;

/// Normalize a string for matching: lowercase, strip diacritics, and collapse
/// whitespace.
///
/// # Algorithm (with unicode-normalization feature)
///
/// 1. NFD normalize (decompose characters into base + combining marks)
/// 2. Filter out combining marks (category Mn = Mark, Nonspacing)
/// 3. Lowercase
/// 4. Collapse whitespace
#[cfg(feature = "unicode-normalization")]
pub fn normalize(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lightweight normalization without the unicode-normalization dependency.
/// Just lowercases and collapses whitespace.
#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check if a character is a combining mark (diacritic).
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

/// Stop words excluded from term vectors and keyword extraction.
///
/// Sorted so membership checks can binary-search.
const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "all", "among", "and", "any", "are", "because",
    "been", "before", "being", "below", "between", "but", "can", "could",
    "did", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "her", "here", "hers", "him",
    "his", "how", "into", "its", "itself", "just", "more", "most", "myself",
    "nor", "not", "now", "off", "once", "only", "other", "our", "ours",
    "ourselves", "out", "over", "own", "same", "she", "should", "some",
    "such", "than", "that", "the", "their", "theirs", "them", "themselves",
    "then", "there", "these", "they", "this", "those", "through", "too",
    "under", "until", "very", "was", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "would", "you",
    "your", "yours", "yourself",
];

/// Whether a normalized token is a stop word.
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

/// Split text into normalized terms: lowercase, diacritics stripped,
/// alphabetic-led alphanumeric runs, stop words and short fragments removed.
///
/// Duplicates are preserved; callers that need frequencies count them.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    let mut terms = Vec::new();
    let mut current = String::new();

    for c in normalized.chars().chain(std::iter::once(' ')) {
        if c.is_alphanumeric() {
            current.push(c);
        } else if !current.is_empty() {
            let token = std::mem::take(&mut current);
            if token.len() >= MIN_TOKEN_LEN
                && token.chars().next().is_some_and(|c| c.is_alphabetic())
                && !is_stop_word(&token)
            {
                terms.push(token);
            }
        }
    }

    terms
}

/// Split a body of text into sentence units on terminal punctuation.
///
/// Empty units are dropped; surviving units are trimmed but otherwise kept
/// verbatim so refined output reads like the source.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split_inclusive(['.', '!', '?'])
        .map(str::trim)
        .filter(|unit| !unit.is_empty() && unit.chars().any(char::is_alphanumeric))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_collapses() {
        assert_eq!(normalize("  Hello   World  "), "hello world");
    }

    #[cfg(feature = "unicode-normalization")]
    #[test]
    fn normalize_strips_diacritics() {
        assert_eq!(normalize("café naïve"), "cafe naive");
    }

    #[test]
    fn tokenize_drops_stop_words_and_short_tokens() {
        let terms = tokenize("The cat sat on the methodology of review");
        assert_eq!(terms, vec!["cat", "sat", "methodology", "review"]);
    }

    #[test]
    fn tokenize_keeps_duplicates() {
        let terms = tokenize("review review review");
        assert_eq!(terms.len(), 3);
    }

    #[test]
    fn tokenize_rejects_number_led_tokens() {
        let terms = tokenize("2024 results 42nd");
        assert_eq!(terms, vec!["results"]);
    }

    #[test]
    fn stop_word_list_is_sorted() {
        let mut sorted = STOP_WORDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, STOP_WORDS);
    }

    #[test]
    fn split_sentences_keeps_order_and_trims() {
        let units = split_sentences("First point. Second point! Third?");
        assert_eq!(units, vec!["First point.", "Second point!", "Third?"]);
    }

    #[test]
    fn split_sentences_drops_punctuation_only_units() {
        let units = split_sentences("Real sentence. ... !");
        assert_eq!(units, vec!["Real sentence."]);
    }
}
