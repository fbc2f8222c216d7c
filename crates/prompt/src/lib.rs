//! Prompt construction for the Salus consultant.
//!
//! Provides the system prompt and the RAG prompt that embeds retrieved
//! context chunks with their source metadata.

pub mod templates;

pub use templates::{rag_prompt, system_prompt};
