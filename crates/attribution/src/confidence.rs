//! Final confidence blending.
//!
//! Combines the citation parser's own confidence with the retrieval
//! relevance of the chunks that were actually cited. The blended score is
//! advisory: it never blocks or alters response delivery.

use crate::chunk::ContextChunk;
use crate::relevance::relevance_confidence;
use crate::types::{AttributionConfig, AttributionResult};

/// Blend attribution confidence with cited-chunk retrieval relevance.
///
/// With at least one citation the result is
/// `extraction_weight * attribution + relevance_weight * avg(relevance)`;
/// with none, the attribution confidence passes through unchanged (it is
/// 0.0 on both parser paths in that case). Clamped to [0, 1] so
/// non-default weights cannot push the score out of range.
pub fn blend_confidence(
    result: &AttributionResult,
    chunks: &[ContextChunk],
    config: &AttributionConfig,
) -> f64 {
    if result.citations.is_empty() {
        return result.confidence_score.clamp(0.0, 1.0);
    }

    let relevance_scores: Vec<f64> = result
        .citations
        .iter()
        .filter_map(|citation| chunks.get(citation.source_index))
        .map(|chunk| relevance_confidence(chunk.metadata.similarity_score))
        .collect();

    if relevance_scores.is_empty() {
        return result.confidence_score.clamp(0.0, 1.0);
    }

    let avg_relevance = relevance_scores.iter().sum::<f64>() / relevance_scores.len() as f64;

    let blended = config.extraction_weight * result.confidence_score
        + config.relevance_weight * avg_relevance;

    blended.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkMetadata;
    use crate::types::CitationRecord;

    fn chunk(distance: f64, index: usize) -> ContextChunk {
        ContextChunk {
            content: "content".to_string(),
            metadata: ChunkMetadata {
                similarity_score: distance,
                ..Default::default()
            },
            index,
        }
    }

    fn citation(source_index: usize) -> CitationRecord {
        CitationRecord {
            text: "cited span".to_string(),
            source_index,
        }
    }

    #[test]
    fn test_blend_weights_extraction_and_relevance() {
        let chunks = vec![chunk(0.2, 0)]; // relevance 0.8
        let result = AttributionResult {
            citations: vec![citation(0)],
            confidence_score: 0.5,
        };

        let blended = blend_confidence(&result, &chunks, &AttributionConfig::default());
        // 0.7 * 0.5 + 0.3 * 0.8
        assert!((blended - 0.59).abs() < 1e-9);
    }

    #[test]
    fn test_empty_citations_pass_through() {
        let chunks = vec![chunk(0.0, 0)];
        let result = AttributionResult::empty();

        let blended = blend_confidence(&result, &chunks, &AttributionConfig::default());
        assert_eq!(blended, 0.0);
    }

    #[test]
    fn test_average_over_multiple_cited_chunks() {
        let chunks = vec![chunk(0.0, 0), chunk(0.5, 1)]; // relevance 1.0 and 0.5
        let result = AttributionResult {
            citations: vec![citation(0), citation(1)],
            confidence_score: 1.0,
        };

        let blended = blend_confidence(&result, &chunks, &AttributionConfig::default());
        // 0.7 * 1.0 + 0.3 * 0.75
        assert!((blended - 0.925).abs() < 1e-9);
    }

    #[test]
    fn test_blend_stays_in_unit_interval() {
        let chunks = vec![chunk(0.0, 0)];
        let result = AttributionResult {
            citations: vec![citation(0)],
            confidence_score: 1.0,
        };

        let mut config = AttributionConfig::default();
        config.extraction_weight = 1.5;
        config.relevance_weight = 1.5;

        let blended = blend_confidence(&result, &chunks, &config);
        assert_eq!(blended, 1.0);
    }
}
