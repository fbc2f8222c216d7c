//! Command handlers for the Salus CLI.

pub mod ask;
pub mod attribute;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use attribute::AttributeCommand;

use salus_chat::{ChatService, RawChunk};
use salus_core::{AppConfig, AppError, AppResult};
use std::path::Path;

/// Build the chat service from resolved configuration.
fn build_service(config: &AppConfig) -> AppResult<ChatService> {
    let api_key = config.resolve_api_key();

    let client = salus_llm::create_client(
        &config.provider,
        config.endpoint.as_deref(),
        api_key.as_deref(),
    )
    .map_err(AppError::Config)?;

    let attribution = match &config.attribution {
        Some(overrides) => salus_chat::AttributionConfig::default().with_overrides(overrides),
        None => salus_chat::AttributionConfig::default(),
    };

    Ok(ChatService::new(client, &config.model).with_attribution_config(attribution))
}

/// Load retrieval output from a JSON file.
///
/// The file holds an array of chunks, each with optional `content` and
/// `metadata` fields.
fn load_chunks(path: &Path) -> AppResult<Vec<RawChunk>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("Failed to read context file {:?}: {}", path, e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| AppError::Config(format!("Failed to parse context file {:?}: {}", path, e)))
}
