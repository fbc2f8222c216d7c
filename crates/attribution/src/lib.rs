//! Answer attribution for retrieval-augmented generation.
//!
//! Given a generated answer and the context chunks used to produce it,
//! this crate determines which chunks support which answer spans and how
//! trustworthy the answer is overall. Matching is purely lexical.
//!
//! The pipeline per request is a single linear sequence:
//! normalize chunks → try explicit `[Source: ...]` markers → fall back to
//! implicit sentence matching → blend confidence with retrieval
//! relevance. It is pure and stateless: every invocation builds and
//! discards its own lookup structures, so concurrent requests need no
//! coordination.

pub mod chunk;
pub mod confidence;
mod explicit;
mod implicit;
pub mod relevance;
pub mod similarity;
pub mod types;

// Re-export commonly used types
pub use chunk::{normalize_chunks, ChunkMetadata, ContextChunk, RawChunk};
pub use confidence::blend_confidence;
pub use relevance::{rank_chunks, relevance_confidence};
pub use types::{AttributionConfig, AttributionResult, CitationRecord};

/// Extract citations from a generated answer.
///
/// Explicit `[Source: X]` markers are tried first; only when none resolve
/// does the implicit lexical matcher run. The two results are never
/// merged. An empty answer or chunk list yields the empty result; no
/// evidence is a normal outcome, not an error.
///
/// The returned confidence is the chosen parser's own estimate; callers
/// that want retrieval relevance folded in apply [`blend_confidence`]
/// afterwards (exactly once).
pub fn extract_citations(
    answer: &str,
    chunks: &[ContextChunk],
    config: &AttributionConfig,
) -> AttributionResult {
    if answer.is_empty() || chunks.is_empty() {
        return AttributionResult::empty();
    }

    let explicit_result = explicit::extract(answer, chunks, config);
    if !explicit_result.citations.is_empty() {
        tracing::debug!(
            "Explicit attribution: {} citations, confidence {:.2}",
            explicit_result.citations.len(),
            explicit_result.confidence_score
        );
        return explicit_result;
    }

    let implicit_result = implicit::extract(answer, chunks, config);
    tracing::debug!(
        "Implicit attribution: {} citations, confidence {:.2}",
        implicit_result.citations.len(),
        implicit_result.confidence_score
    );
    implicit_result
}
