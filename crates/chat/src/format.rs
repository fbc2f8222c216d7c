//! Response formatting for the public API surface.
//!
//! Converts internal attribution results into the citation shape clients
//! see and applies the final confidence blend.

use salus_attribution::{blend_confidence, AttributionConfig, AttributionResult, ContextChunk};
use serde::{Deserialize, Serialize};

/// Source metadata attached to a public citation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitationSource {
    pub title: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// A citation as presented to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Citation {
    /// The cited span of the answer
    pub text: String,

    /// Where the cited content came from
    pub source: CitationSource,

    /// Raw retrieval distance of the supporting chunk
    pub similarity_score: f64,
}

/// The complete answer payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated answer text
    pub answer: String,

    /// Citations backing the answer, possibly empty
    pub citations: Vec<Citation>,

    /// Blended confidence in [0, 1]
    pub confidence_score: f64,

    /// Model that produced the answer
    pub model: String,
}

/// Build the public response from an attribution pass.
///
/// Citations whose source index falls outside the chunk list are dropped
/// rather than reported with fabricated metadata. The confidence blend is
/// applied here, exactly once per response.
pub fn format_response(
    answer: String,
    result: &AttributionResult,
    chunks: &[ContextChunk],
    config: &AttributionConfig,
    model: String,
) -> ChatResponse {
    let citations = result
        .citations
        .iter()
        .filter_map(|citation| {
            chunks.get(citation.source_index).map(|chunk| Citation {
                text: citation.text.clone(),
                source: CitationSource {
                    title: chunk
                        .metadata
                        .title
                        .clone()
                        .unwrap_or_else(|| "Unknown".to_string()),
                    source: chunk
                        .metadata
                        .source
                        .clone()
                        .unwrap_or_else(|| "Unknown".to_string()),
                    page: chunk.metadata.page,
                },
                similarity_score: chunk.metadata.similarity_score,
            })
        })
        .collect();

    ChatResponse {
        answer,
        citations,
        confidence_score: blend_confidence(result, chunks, config),
        model,
    }
}
