//! Attribute command handler.
//!
//! Runs citation attribution over an existing answer without calling the
//! LLM. Useful for inspecting how an answer maps back to its sources.

use clap::Args;
use salus_core::{AppConfig, AppError, AppResult};
use std::path::PathBuf;

/// Attribute an existing answer to its context chunks
#[derive(Args, Debug)]
pub struct AttributeCommand {
    /// The answer text to attribute
    pub answer: Option<String>,

    /// Read the answer from a file
    #[arg(short, long, conflicts_with = "answer")]
    pub file: Option<PathBuf>,

    /// JSON file with retrieved context chunks
    #[arg(short = 'C', long)]
    pub context: PathBuf,
}

impl AttributeCommand {
    /// Execute the attribute command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing attribute command");

        let answer = self
            .get_answer()?
            .ok_or_else(|| AppError::Config("No answer provided".to_string()))?;

        let chunks = super::load_chunks(&self.context)?;
        tracing::debug!("Loaded {} context chunks", chunks.len());

        let service = super::build_service(config)?;
        let response = service.attribute_answer(&answer, &chunks)?;

        let json = serde_json::to_string_pretty(&serde_json::json!({
            "citations": response.citations,
            "confidence_score": response.confidence_score,
        }))
        .map_err(|e| AppError::Serialization(e.to_string()))?;
        println!("{}", json);

        Ok(())
    }

    /// Get the answer text from the positional argument or a file.
    fn get_answer(&self) -> AppResult<Option<String>> {
        if let Some(ref answer) = self.answer {
            return Ok(Some(answer.clone()));
        }

        if let Some(ref path) = self.file {
            let text = std::fs::read_to_string(path).map_err(|e| {
                AppError::Config(format!("Failed to read answer file {:?}: {}", path, e))
            })?;
            return Ok(Some(text));
        }

        Ok(None)
    }
}
