//! Attribution result types and tunable parameters.

use salus_core::AttributionOverrides;
use serde::{Deserialize, Serialize};

/// A single citation linking a span of the generated answer to a context
/// chunk.
///
/// `source_index` always references a valid position in the chunk list the
/// extraction ran against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationRecord {
    /// The cited span of answer text
    pub text: String,

    /// Index of the supporting chunk
    pub source_index: usize,
}

/// Result of one attribution pass over a generated answer.
///
/// Created fresh per request and consumed immediately; never persisted.
/// An empty citation list with confidence 0.0 is the normal "no evidence"
/// outcome, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributionResult {
    /// Citations in the order they were found
    pub citations: Vec<CitationRecord>,

    /// Confidence in the attribution, always in [0, 1]
    pub confidence_score: f64,
}

impl AttributionResult {
    /// The degraded "nothing found" result.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Tunable parameters for the attribution pipeline.
///
/// The defaults reproduce the observed production literals. They are
/// uncalibrated, so callers may override them via configuration rather
/// than recompiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributionConfig {
    /// Minimum lexical score for an implicit sentence/chunk match.
    /// The comparison is strict: a score equal to this value is rejected.
    pub min_match_score: f64,

    /// Span similarity above which a new implicit citation is considered
    /// redundant with an already-accepted one and discarded.
    pub dedup_threshold: f64,

    /// Weight of the parser's own confidence in the final blend.
    pub extraction_weight: f64,

    /// Weight of the cited chunks' average retrieval relevance in the
    /// final blend.
    pub relevance_weight: f64,

    /// Sentences shorter than this (after trimming) are too short to
    /// attribute reliably and are skipped.
    pub min_sentence_chars: usize,

    /// How far back from an explicit marker to look for the cited span.
    pub lookback_chars: usize,

    /// How far past an explicit marker the context window extends.
    pub lookahead_chars: usize,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            min_match_score: 0.3,
            dedup_threshold: 0.5,
            extraction_weight: 0.7,
            relevance_weight: 0.3,
            min_sentence_chars: 10,
            lookback_chars: 200,
            lookahead_chars: 50,
        }
    }
}

impl AttributionConfig {
    /// Apply configuration-file overrides on top of the defaults.
    pub fn with_overrides(mut self, overrides: &AttributionOverrides) -> Self {
        if let Some(v) = overrides.min_match_score {
            self.min_match_score = v;
        }
        if let Some(v) = overrides.dedup_threshold {
            self.dedup_threshold = v;
        }
        if let Some(v) = overrides.extraction_weight {
            self.extraction_weight = v;
        }
        if let Some(v) = overrides.relevance_weight {
            self.relevance_weight = v;
        }
        self
    }
}
