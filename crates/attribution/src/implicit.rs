//! Implicit citation matching.
//!
//! Fallback for answers that carry no explicit `[Source: ...]` markers:
//! the answer is segmented into sentences and each sentence is scored
//! against every chunk's content with the lexical similarity function.
//! The best sufficiently-strong chunk per sentence becomes a citation,
//! with near-duplicate spans suppressed.

use std::collections::HashSet;

use crate::chunk::ContextChunk;
use crate::similarity::{match_score, match_score_prepared, word_set};
use crate::types::{AttributionConfig, AttributionResult, CitationRecord};

/// Infer citations by lexical overlap between answer sentences and chunks.
///
/// The confidence score of this path is the fraction of the trimmed
/// answer covered by accepted citation spans, capped at 1.
pub fn extract(
    answer: &str,
    chunks: &[ContextChunk],
    config: &AttributionConfig,
) -> AttributionResult {
    // Each chunk's lowercased content and word set are derived once, not
    // per sentence.
    let prepared: Vec<(String, HashSet<String>)> = chunks
        .iter()
        .map(|chunk| (chunk.content.to_lowercase(), word_set(&chunk.content)))
        .collect();

    let mut citations: Vec<CitationRecord> = Vec::new();
    let mut total_matched_chars = 0usize;

    for sentence in split_sentences(answer) {
        if sentence.trim().chars().count() < config.min_sentence_chars {
            continue;
        }

        let sentence_lower = sentence.to_lowercase();
        let sentence_words = word_set(sentence);

        let mut best_score = 0.0f64;
        let mut best_chunk: Option<usize> = None;

        for (chunk, (content_lower, content_words)) in chunks.iter().zip(&prepared) {
            let score =
                match_score_prepared(&sentence_lower, &sentence_words, content_lower, content_words);

            // Acceptance is strict: a score of exactly the threshold loses
            if score > best_score && score > config.min_match_score {
                best_score = score;
                best_chunk = Some(chunk.index);
            }
        }

        let Some(source_index) = best_chunk else {
            continue;
        };

        let redundant = citations
            .iter()
            .any(|existing| match_score(sentence, &existing.text) > config.dedup_threshold);
        if redundant {
            tracing::debug!("Suppressing near-duplicate citation: {:.40}...", sentence);
            continue;
        }

        total_matched_chars += sentence.chars().count();
        citations.push(CitationRecord {
            text: sentence.to_string(),
            source_index,
        });
    }

    let answer_chars = answer.trim().chars().count();
    let confidence_score = (total_matched_chars as f64 / answer_chars.max(1) as f64).min(1.0);

    AttributionResult {
        citations,
        confidence_score,
    }
}

/// Split text into sentences on `[.!?]` followed by whitespace.
///
/// The terminator stays with its sentence; the whitespace run between
/// sentences is dropped.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut prev: Option<char> = None;

    let mut iter = text.char_indices().peekable();
    while let Some((i, c)) = iter.next() {
        if c.is_whitespace() && matches!(prev, Some('.') | Some('!') | Some('?')) {
            sentences.push(&text[start..i]);

            let mut next_start = i + c.len_utf8();
            while let Some(&(j, c2)) = iter.peek() {
                if c2.is_whitespace() {
                    iter.next();
                    next_start = j + c2.len_utf8();
                } else {
                    break;
                }
            }
            start = next_start;
        }
        prev = Some(c);
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }

    sentences
}
