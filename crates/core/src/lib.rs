//! Salus Core Library
//!
//! Foundational utilities shared across the Salus workspace:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, AttributionOverrides};
pub use error::{AppError, AppResult};
