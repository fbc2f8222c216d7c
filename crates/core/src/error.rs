//! Error types for the Salus consultant.
//!
//! This module defines a unified error enum covering every error category
//! in the application: configuration, I/O, query validation, LLM provider,
//! attribution, and serialization failures.

use thiserror::Error;

/// Unified error type for the Salus consultant.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// Errors are propagated, never panicked on.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Query validation and preprocessing errors
    #[error("Invalid query: {0}")]
    Query(String),

    /// LLM provider errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Citation attribution errors
    #[error("Attribution error: {0}")]
    Attribution(String),

    /// Prompt rendering errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
