//! Explicit citation parsing.
//!
//! The generation prompt asks the model to cite as `[Source: Title]`.
//! This parser finds those markers in the answer, resolves each marker to
//! a chunk by its title or source string, and extracts the sentence the
//! marker closes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::chunk::ContextChunk;
use crate::types::{AttributionConfig, AttributionResult, CitationRecord};

/// Inline source markers: `[Source: X]` or `[Source X]`, case-insensitive.
static SOURCE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[source:?\s*([^\]]+)\]").expect("valid source marker pattern"));

/// Per-request lookup from lowercased title/source strings to chunk index.
///
/// Insertion order is the iteration contract: entries are added chunk by
/// chunk (title before source), and the substring fallback scans in that
/// order. A duplicate key overwrites the mapped index in place, so the
/// last chunk wins while the key keeps its first insertion position.
struct SourceLookup {
    entries: Vec<(String, usize)>,
}

impl SourceLookup {
    fn from_chunks(chunks: &[ContextChunk]) -> Self {
        let mut lookup = Self {
            entries: Vec::new(),
        };

        for chunk in chunks {
            if let Some(title) = chunk.metadata.title.as_deref() {
                if !title.is_empty() {
                    lookup.insert(title.to_lowercase(), chunk.index);
                }
            }
            if let Some(source) = chunk.metadata.source.as_deref() {
                if !source.is_empty() {
                    lookup.insert(source.to_lowercase(), chunk.index);
                }
            }
        }

        lookup
    }

    fn insert(&mut self, key: String, index: usize) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = index;
        } else {
            self.entries.push((key, index));
        }
    }

    /// Resolve a marker's inner text to a chunk index.
    ///
    /// Exact match first, then substring containment in either direction,
    /// taking the first hit in insertion order.
    fn resolve(&self, marker_text: &str) -> Option<usize> {
        let needle = marker_text.to_lowercase();

        if let Some((_, index)) = self.entries.iter().find(|(key, _)| *key == needle) {
            return Some(*index);
        }

        self.entries
            .iter()
            .find(|(key, _)| needle.contains(key.as_str()) || key.contains(&needle))
            .map(|(_, index)| *index)
    }
}

/// Extract explicit `[Source: X]` citations from the answer.
///
/// The confidence score of this path is coverage-based: cited markers
/// relative to the number of chunks, capped at 1. It says nothing about
/// match quality.
pub fn extract(
    answer: &str,
    chunks: &[ContextChunk],
    config: &AttributionConfig,
) -> AttributionResult {
    let lookup = SourceLookup::from_chunks(chunks);
    let mut citations = Vec::new();

    for captures in SOURCE_MARKER.captures_iter(answer) {
        let marker = captures.get(0).expect("whole match always present");
        let marker_text = captures
            .get(1)
            .map(|m| m.as_str().trim())
            .unwrap_or_default();

        let Some(source_index) = lookup.resolve(marker_text) else {
            tracing::debug!("Unresolved source marker: [{}]", marker_text);
            continue;
        };

        let cited_text = cited_span(answer, marker.start(), marker.end(), config);
        if !cited_text.is_empty() {
            citations.push(CitationRecord {
                text: cited_text,
                source_index,
            });
        }
    }

    let confidence_score = (citations.len() as f64 / chunks.len().max(1) as f64).min(1.0);

    AttributionResult {
        citations,
        confidence_score,
    }
}

/// Extract the span of text a marker cites.
///
/// A window of up to `lookback_chars` before and `lookahead_chars` after
/// the marker is considered. The span runs from the nearest sentence
/// terminator (`.`) before the marker, falling back to the nearest
/// newline, up to the marker itself.
fn cited_span(answer: &str, marker_start: usize, marker_end: usize, config: &AttributionConfig) -> String {
    let window_start = chars_back(answer, marker_start, config.lookback_chars);
    let window_end = chars_forward(answer, marker_end, config.lookahead_chars);
    let window = &answer[window_start..window_end];

    // Marker position relative to the window
    let sentence_end = marker_start - window_start;
    let before_marker = &window[..sentence_end];

    // Nearest terminator with a non-empty span after it, else the nearest
    // newline, else the window start
    let sentence_start = match before_marker.rfind('.') {
        Some(p) if p + 1 < sentence_end => p + 1,
        _ => before_marker.rfind('\n').map(|p| p + 1).unwrap_or(0),
    };

    window[sentence_start..sentence_end].trim().to_string()
}

/// Byte index `n` characters before `end`, clamped to the start of `s`.
fn chars_back(s: &str, end: usize, n: usize) -> usize {
    let mut idx = end;
    for (i, _) in s[..end].char_indices().rev().take(n) {
        idx = i;
    }
    idx
}

/// Byte index `n` characters after `start`, clamped to the end of `s`.
fn chars_forward(s: &str, start: usize, n: usize) -> usize {
    s[start..]
        .char_indices()
        .nth(n)
        .map(|(i, _)| start + i)
        .unwrap_or(s.len())
}
