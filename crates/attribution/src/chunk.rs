//! Context chunk types and normalization of raw retrieval output.
//!
//! The retrieval subsystem hands over loosely-shaped JSON. This module
//! converts it into typed, validated chunks once at the boundary so the
//! rest of the pipeline never has to access fields defensively.

use serde::{Deserialize, Serialize};

/// Source metadata attached to a retrieved chunk.
///
/// Title and source are optional because retrieval metadata is
/// best-effort; `similarity_score` is the raw distance metric reported by
/// the vector store (lower is better).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub title: Option<String>,
    pub source: Option<String>,
    pub page: Option<u32>,
    pub similarity_score: f64,
}

/// A retrieved passage plus metadata and its position in the chunk list.
///
/// Immutable once constructed. `index` is unique and contiguous from 0
/// within one request's chunk list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextChunk {
    pub content: String,
    pub metadata: ChunkMetadata,
    pub index: usize,
}

/// Raw retrieval output as it arrives over the boundary.
///
/// Both fields tolerate absence or unexpected shapes; normalization
/// substitutes defaults rather than failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawChunk {
    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Convert raw retrieval output into typed chunks, indexed in order.
pub fn normalize_chunks(raw: &[RawChunk]) -> Vec<ContextChunk> {
    raw.iter()
        .enumerate()
        .map(|(index, item)| ContextChunk {
            content: item.content.clone().unwrap_or_default(),
            metadata: extract_metadata(&item.metadata),
            index,
        })
        .collect()
}

/// Pull the known metadata fields out of an arbitrary JSON value.
fn extract_metadata(value: &serde_json::Value) -> ChunkMetadata {
    ChunkMetadata {
        title: value
            .get("title")
            .and_then(|v| v.as_str())
            .map(str::to_string),
        source: value
            .get("source")
            .and_then(|v| v.as_str())
            .map(str::to_string),
        page: value
            .get("page")
            .and_then(|v| v.as_u64())
            .map(|p| p as u32),
        similarity_score: value
            .get("similarity_score")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0),
    }
}
