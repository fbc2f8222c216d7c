//! Chat orchestration for the Salus consultant.
//!
//! Wires the full question-answering pipeline together: query
//! preprocessing, chunk ranking, prompt construction, LLM completion, and
//! citation attribution.

pub mod format;
pub mod query;

pub use format::{ChatResponse, Citation, CitationSource};
pub use query::QueryProcessor;
pub use salus_attribution::{AttributionConfig, RawChunk};

use salus_attribution::{
    extract_citations, normalize_chunks, rank_chunks, AttributionResult, ContextChunk,
};
use salus_core::{AppError, AppResult};
use salus_llm::{LlmClient, LlmRequest};
use std::sync::Arc;

/// Generation parameters for one question.
#[derive(Debug, Clone, Default)]
pub struct AskOptions {
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    pub temperature: Option<f32>,
}

/// The question-answering service.
///
/// Stateless across requests; all per-request data lives on the stack of
/// [`ChatService::respond`].
pub struct ChatService {
    client: Arc<dyn LlmClient>,
    model: String,
    query_processor: QueryProcessor,
    attribution: AttributionConfig,
}

impl ChatService {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            query_processor: QueryProcessor::default(),
            attribution: AttributionConfig::default(),
        }
    }

    /// Replace the attribution parameters (defaults otherwise).
    pub fn with_attribution_config(mut self, config: AttributionConfig) -> Self {
        self.attribution = config;
        self
    }

    /// Answer a question against the given retrieval output.
    ///
    /// The chunks are ranked by retrieval relevance before prompting, and
    /// the same ranked list is used for attribution so citation indices
    /// line up with the `[Context N]` numbering the model saw.
    ///
    /// Attribution is advisory: if it panics, the answer is still
    /// delivered, with no citations and zero confidence.
    pub async fn respond(
        &self,
        question: &str,
        raw_chunks: &[RawChunk],
        options: &AskOptions,
    ) -> AppResult<ChatResponse> {
        let question = self.query_processor.preprocess(question)?;
        tracing::info!("Processing query: '{}'", question);

        let chunks = rank_chunks(normalize_chunks(raw_chunks));
        tracing::info!("Using {} context chunks", chunks.len());

        let prompt = salus_prompt::rag_prompt(&question, &chunks)?;

        let mut request =
            LlmRequest::new(prompt, &self.model).with_system(salus_prompt::system_prompt());
        if let Some(max_tokens) = options.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }
        if let Some(temperature) = options.temperature {
            request = request.with_temperature(temperature);
        }

        let response = self.client.complete(&request).await?;

        let result = self.attribute(&response.content, &chunks);

        Ok(format::format_response(
            response.content,
            &result,
            &chunks,
            &self.attribution,
            response.model,
        ))
    }

    /// Run attribution on an already-generated answer.
    ///
    /// Exposed separately so answers produced elsewhere can be attributed
    /// against their retrieval context.
    pub fn attribute_answer(
        &self,
        answer: &str,
        raw_chunks: &[RawChunk],
    ) -> AppResult<ChatResponse> {
        if answer.trim().is_empty() {
            return Err(AppError::Attribution(
                "Answer text is required".to_string(),
            ));
        }

        let chunks = rank_chunks(normalize_chunks(raw_chunks));
        let result = self.attribute(answer, &chunks);

        Ok(format::format_response(
            answer.to_string(),
            &result,
            &chunks,
            &self.attribution,
            self.model.clone(),
        ))
    }

    /// Attribution with a panic boundary.
    ///
    /// The extraction pipeline is pure, but a defect in it must not cost
    /// the user their answer. A panic degrades to the empty result.
    fn attribute(&self, answer: &str, chunks: &[ContextChunk]) -> AttributionResult {
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            extract_citations(answer, chunks, &self.attribution)
        }));

        match outcome {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("Citation extraction panicked; returning answer without citations");
                AttributionResult::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salus_core::AppResult;
    use salus_llm::{LlmResponse, LlmUsage};

    struct CannedClient {
        answer: String,
    }

    #[async_trait::async_trait]
    impl LlmClient for CannedClient {
        fn provider_name(&self) -> &str {
            "canned"
        }

        async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
            Ok(LlmResponse {
                content: self.answer.clone(),
                model: request.model.clone(),
                usage: LlmUsage::default(),
            })
        }
    }

    fn service(answer: &str) -> ChatService {
        ChatService::new(
            Arc::new(CannedClient {
                answer: answer.to_string(),
            }),
            "llama3.2",
        )
    }

    fn raw_chunks() -> Vec<RawChunk> {
        vec![
            RawChunk {
                content: Some(
                    "Regular exercise has been shown to reduce the risk of heart disease by up to 30%."
                        .to_string(),
                ),
                metadata: serde_json::json!({
                    "title": "Cardiovascular Health Guidelines",
                    "source": "American Heart Association",
                    "page": 42,
                    "similarity_score": 0.2,
                }),
            },
            RawChunk {
                content: Some(
                    "A diet rich in fruits, vegetables, and whole grains can help maintain healthy cholesterol levels."
                        .to_string(),
                ),
                metadata: serde_json::json!({
                    "title": "Nutrition and Heart Health",
                    "source": "Journal of Nutrition",
                    "page": 118,
                    "similarity_score": 0.4,
                }),
            },
        ]
    }

    #[tokio::test]
    async fn test_respond_attaches_citations() {
        let service = service(
            "Exercise reduces heart disease risk by up to 30% \
             [Source: American Heart Association].",
        );

        let response = service
            .respond("How can I improve my heart health?", &raw_chunks(), &AskOptions::default())
            .await
            .unwrap();

        assert_eq!(response.model, "llama3.2");
        assert_eq!(response.citations.len(), 1);
        assert_eq!(
            response.citations[0].source.source,
            "American Heart Association"
        );
        assert!(response.confidence_score > 0.0);
    }

    #[tokio::test]
    async fn test_respond_without_chunks_still_answers() {
        let service = service("General health advice without sources.");

        let response = service
            .respond("What is a healthy diet?", &[], &AskOptions::default())
            .await
            .unwrap();

        assert_eq!(response.answer, "General health advice without sources.");
        assert!(response.citations.is_empty());
        assert_eq!(response.confidence_score, 0.0);
    }

    #[tokio::test]
    async fn test_respond_rejects_invalid_query() {
        let service = service("unused");

        let result = service.respond("Hi", &raw_chunks(), &AskOptions::default()).await;
        assert!(matches!(result, Err(AppError::Query(_))));
    }

    #[test]
    fn test_attribute_answer_requires_text() {
        let service = service("unused");
        let result = service.attribute_answer("  ", &raw_chunks());
        assert!(matches!(result, Err(AppError::Attribution(_))));
    }

    #[test]
    fn test_attribute_answer_matches_chunks() {
        let service = service("unused");

        let response = service
            .attribute_answer(
                "Regular exercise has been shown to reduce the risk of heart disease by up to 30%.",
                &raw_chunks(),
            )
            .unwrap();

        assert!(!response.citations.is_empty());
        assert_eq!(
            response.citations[0].source.title,
            "Cardiovascular Health Guidelines"
        );
    }
}
