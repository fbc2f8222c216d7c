//! Ask command handler.
//!
//! Sends a question to the LLM grounded in a retrieval context file and
//! prints the answer with its citations.

use clap::Args;
use salus_chat::AskOptions;
use salus_core::{AppConfig, AppError, AppResult};
use std::path::PathBuf;

/// Ask a question against retrieved context
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: Option<String>,

    /// Read the question from a file
    #[arg(short, long, conflicts_with = "question")]
    pub file: Option<PathBuf>,

    /// JSON file with retrieved context chunks
    #[arg(short = 'C', long)]
    pub context: Option<PathBuf>,

    /// Maximum tokens in response
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Temperature for response generation (0.0-2.0)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let question = self
            .get_question()?
            .ok_or_else(|| AppError::Config("No question provided".to_string()))?;

        let chunks = match &self.context {
            Some(path) => super::load_chunks(path)?,
            None => Vec::new(),
        };
        tracing::debug!("Loaded {} context chunks", chunks.len());

        let service = super::build_service(config)?;

        let options = AskOptions {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = service.respond(&question, &chunks, &options).await?;

        if self.json {
            let json = serde_json::to_string_pretty(&response)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            println!("{}", response.answer);

            if !response.citations.is_empty() {
                println!("\nSources:");
                for citation in &response.citations {
                    let page = citation
                        .source
                        .page
                        .map(|p| format!(", p. {}", p))
                        .unwrap_or_default();
                    println!(
                        "  - {} ({}{})",
                        citation.source.title, citation.source.source, page
                    );
                }
            }

            println!("\nConfidence: {:.2}", response.confidence_score);
        }

        Ok(())
    }

    /// Get the question text from the positional argument or a file.
    fn get_question(&self) -> AppResult<Option<String>> {
        if let Some(ref question) = self.question {
            return Ok(Some(question.clone()));
        }

        if let Some(ref path) = self.file {
            let text = std::fs::read_to_string(path).map_err(|e| {
                AppError::Config(format!("Failed to read question file {:?}: {}", path, e))
            })?;
            return Ok(Some(text));
        }

        Ok(None)
    }
}
