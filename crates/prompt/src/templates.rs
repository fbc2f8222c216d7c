//! Prompt templates for the Salus consultant.
//!
//! The RAG prompt numbers each retrieved passage as `[Context N]` and
//! closes it with a `[Source: ...]` line, which is what teaches the model
//! the explicit citation format the attribution parser later looks for.

use handlebars::Handlebars;
use salus_attribution::ContextChunk;
use salus_core::{AppError, AppResult};
use serde::Serialize;

/// RAG prompt template rendered with Handlebars.
const RAG_TEMPLATE: &str = "\
Please answer the following question based on the provided context information. \
If the context doesn't contain relevant information, acknowledge that you don't \
have enough information to provide a complete answer.

--- CONTEXT INFORMATION ---
{{#each contexts}}
[Context {{number}}]
{{content}}
[Source: {{source_line}}]

{{/each}}\
--- END OF CONTEXT ---

Question: {{question}}

Answer:";

/// Template context for one retrieved passage.
#[derive(Debug, Serialize)]
struct ContextBlock {
    number: usize,
    content: String,
    source_line: String,
}

#[derive(Debug, Serialize)]
struct RagPromptData {
    question: String,
    contexts: Vec<ContextBlock>,
}

/// Get the system prompt for health consultations.
pub fn system_prompt() -> String {
    "You are a helpful AI health consultant. Your role is to provide informative, \
     evidence-based health information. Remember to:\n\
     1. Be accurate and cite your sources when possible.\n\
     2. Acknowledge limitations in your knowledge.\n\
     3. Never provide medical diagnoses or prescribe treatments.\n\
     4. Recommend consulting healthcare professionals for specific medical concerns.\n\
     5. Focus on general health education and information.\n\
     6. Be empathetic and supportive while maintaining professionalism.\n\
     7. Only provide information that is supported by the given context.\n\
     8. If you don't know or the information isn't in the context, say so clearly.\n\
     9. When citing sources, use the format [Source: Title]."
        .to_string()
}

/// Format the RAG prompt with retrieved context chunks.
///
/// With no chunks the prompt degrades to a bare question.
pub fn rag_prompt(question: &str, chunks: &[ContextChunk]) -> AppResult<String> {
    if chunks.is_empty() {
        return Ok(format!("Question: {}\n\nAnswer:", question));
    }

    let data = RagPromptData {
        question: question.to_string(),
        contexts: chunks
            .iter()
            .map(|chunk| ContextBlock {
                number: chunk.index + 1,
                content: chunk.content.clone(),
                source_line: source_line(chunk),
            })
            .collect(),
    };

    render("rag", RAG_TEMPLATE, &data)
}

/// Build the `Title: X | Source: Y | Page: Z` line for a chunk.
fn source_line(chunk: &ContextChunk) -> String {
    let mut parts = Vec::new();

    if let Some(title) = chunk.metadata.title.as_deref() {
        parts.push(format!("Title: {}", title));
    }
    if let Some(source) = chunk.metadata.source.as_deref() {
        parts.push(format!("Source: {}", source));
    }
    if let Some(page) = chunk.metadata.page {
        parts.push(format!("Page: {}", page));
    }

    if parts.is_empty() {
        "Unknown source".to_string()
    } else {
        parts.join(" | ")
    }
}

/// Render a Handlebars template with the given data.
fn render<T: Serialize>(name: &str, template: &str, data: &T) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text output, no HTML escaping
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string(name, template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render(name, data)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}
