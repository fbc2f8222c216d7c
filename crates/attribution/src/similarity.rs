//! Lexical similarity between answer spans and chunk content.
//!
//! Matching is purely lexical: either literal containment (scored by the
//! length ratio of the two strings) or Jaccard similarity over case-folded
//! word sets. No embeddings, no stemming.

use std::collections::HashSet;

/// Extract the case-folded word set of a text.
///
/// Words are maximal runs of alphanumeric characters or underscores, the
/// usual `\w+` notion of a word.
pub fn word_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Score how well two texts match, in [0, 1].
///
/// If one string literally contains the other (case-insensitively), the
/// score is `shorter_len / longer_len`. Otherwise it is the Jaccard
/// similarity of the two word sets, or 0 if either set is empty.
pub fn match_score(text1: &str, text2: &str) -> f64 {
    let a = text1.to_lowercase();
    let b = text2.to_lowercase();

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    if b.contains(&a) {
        return a.chars().count() as f64 / b.chars().count() as f64;
    }
    if a.contains(&b) {
        return b.chars().count() as f64 / a.chars().count() as f64;
    }

    jaccard(&word_set(&a), &word_set(&b))
}

/// Containment-or-Jaccard score against a chunk whose lowercased content
/// and word set were computed once up front.
///
/// Equivalent to [`match_score`] but avoids re-deriving the chunk side for
/// every sentence in the sentence-by-chunk comparison loop.
pub(crate) fn match_score_prepared(
    sentence_lower: &str,
    sentence_words: &HashSet<String>,
    content_lower: &str,
    content_words: &HashSet<String>,
) -> f64 {
    if sentence_lower.is_empty() || content_lower.is_empty() {
        return 0.0;
    }

    if content_lower.contains(sentence_lower) {
        return sentence_lower.chars().count() as f64 / content_lower.chars().count() as f64;
    }
    if sentence_lower.contains(content_lower) {
        return content_lower.chars().count() as f64 / sentence_lower.chars().count() as f64;
    }

    jaccard(sentence_words, content_words)
}

/// Jaccard similarity: intersection size over union size.
fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(b).count();
    let union = a.union(b).count();

    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_set_case_folds_and_splits_punctuation() {
        let words = word_set("Heart disease, HEART failure!");
        assert!(words.contains("heart"));
        assert!(words.contains("disease"));
        assert!(words.contains("failure"));
        assert_eq!(words.len(), 3);
    }

    #[test]
    fn test_identical_texts_score_one() {
        assert_eq!(match_score("regular exercise", "regular exercise"), 1.0);
    }

    #[test]
    fn test_containment_scored_by_length_ratio() {
        // 5 chars contained in 10 chars
        let score = match_score("aaaaa", "aaaaabbbbb");
        assert!((score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_containment_is_case_insensitive() {
        let score = match_score("Heart", "the heart of the matter");
        assert!(score > 0.0);
    }

    #[test]
    fn test_jaccard_partial_overlap() {
        // word sets: {a b c} vs {b c d} -> 2/4
        let score = match_score("alpha beta gamma", "beta gamma delta");
        assert!((score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_texts_score_zero() {
        assert_eq!(match_score("apples oranges", "bicycle motorway"), 0.0);
    }

    #[test]
    fn test_empty_input_scores_zero() {
        assert_eq!(match_score("", "something"), 0.0);
        assert_eq!(match_score("something", ""), 0.0);
        assert_eq!(match_score("", ""), 0.0);
    }

    #[test]
    fn test_prepared_variant_matches_direct_scoring() {
        let sentence = "Exercise reduces heart disease risk";
        let content = "Regular exercise has been shown to reduce the risk of heart disease";

        let direct = match_score(sentence, content);

        let sentence_lower = sentence.to_lowercase();
        let content_lower = content.to_lowercase();
        let prepared = match_score_prepared(
            &sentence_lower,
            &word_set(sentence),
            &content_lower,
            &word_set(content),
        );

        assert!((direct - prepared).abs() < 1e-9);
    }
}
