//! Retrieval relevance scoring and re-ranking.
//!
//! Converts the vector store's raw distance metric into a [0, 1]
//! confidence (higher is better) and reorders chunks by it before they
//! reach the citation stage.

use crate::chunk::ContextChunk;

/// Convert a raw distance into a relevance confidence.
///
/// Distance 0 maps to 1.0, anything at or beyond 1 maps to 0.0. Rounded
/// to two decimal places like the retrieval layer reports it.
pub fn relevance_confidence(distance: f64) -> f64 {
    let confidence = 1.0 - distance.min(1.0);
    (confidence * 100.0).round() / 100.0
}

/// Re-rank chunks by descending relevance confidence.
///
/// The sort is stable, so chunks with equal confidence keep their original
/// retrieval order. Indices are reassigned afterwards so they stay unique
/// and contiguous from 0 for the citation stage.
pub fn rank_chunks(mut chunks: Vec<ContextChunk>) -> Vec<ContextChunk> {
    chunks.sort_by(|a, b| {
        let ca = relevance_confidence(a.metadata.similarity_score);
        let cb = relevance_confidence(b.metadata.similarity_score);
        cb.partial_cmp(&ca).unwrap_or(std::cmp::Ordering::Equal)
    });

    for (index, chunk) in chunks.iter_mut().enumerate() {
        chunk.index = index;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkMetadata;

    fn chunk(content: &str, distance: f64, index: usize) -> ContextChunk {
        ContextChunk {
            content: content.to_string(),
            metadata: ChunkMetadata {
                similarity_score: distance,
                ..Default::default()
            },
            index,
        }
    }

    #[test]
    fn test_distance_zero_is_full_confidence() {
        assert_eq!(relevance_confidence(0.0), 1.0);
    }

    #[test]
    fn test_distance_at_or_beyond_one_is_zero() {
        assert_eq!(relevance_confidence(1.0), 0.0);
        assert_eq!(relevance_confidence(3.5), 0.0);
    }

    #[test]
    fn test_confidence_rounds_to_two_decimals() {
        assert_eq!(relevance_confidence(0.333), 0.67);
        assert_eq!(relevance_confidence(0.125), 0.88);
    }

    #[test]
    fn test_rank_orders_by_descending_confidence() {
        let chunks = vec![
            chunk("far", 0.9, 0),
            chunk("near", 0.1, 1),
            chunk("middle", 0.5, 2),
        ];

        let ranked = rank_chunks(chunks);
        assert_eq!(ranked[0].content, "near");
        assert_eq!(ranked[1].content, "middle");
        assert_eq!(ranked[2].content, "far");
    }

    #[test]
    fn test_rank_reassigns_contiguous_indices() {
        let ranked = rank_chunks(vec![chunk("b", 0.8, 0), chunk("a", 0.2, 1)]);
        assert_eq!(ranked[0].index, 0);
        assert_eq!(ranked[1].index, 1);
        assert_eq!(ranked[0].content, "a");
    }

    #[test]
    fn test_ties_preserve_retrieval_order() {
        // 0.301 and 0.304 both round to confidence 0.70; 0.29 rounds to
        // 0.71 and outranks them
        let ranked = rank_chunks(vec![
            chunk("first", 0.301, 0),
            chunk("second", 0.304, 1),
            chunk("third", 0.29, 2),
        ]);

        assert_eq!(ranked[0].content, "third");
        assert_eq!(ranked[1].content, "first");
        assert_eq!(ranked[2].content, "second");
    }
}
