//! Configuration management for the Salus CLI.
//!
//! Configuration is layered from three sources, later entries winning:
//! 1. Built-in defaults
//! 2. A YAML config file (`.salus/config.yaml` or `SALUS_CONFIG`)
//! 3. Environment variables and CLI flags

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// LLM provider (e.g., "ollama", "openai")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Provider endpoint override
    pub endpoint: Option<String>,

    /// API key for providers that require one
    pub api_key: Option<String>,

    /// Environment variable holding the API key
    pub api_key_env: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Attribution threshold overrides
    pub attribution: Option<AttributionOverrides>,
}

/// Overrides for the attribution pipeline's tunable thresholds.
///
/// The literals these replace are uncalibrated, so they are exposed in the
/// config file rather than hardcoded. Unset fields keep the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributionOverrides {
    /// Minimum lexical score for an implicit match (default 0.3)
    #[serde(rename = "minMatchScore")]
    pub min_match_score: Option<f64>,

    /// Span similarity above which a citation is redundant (default 0.5)
    #[serde(rename = "dedupThreshold")]
    pub dedup_threshold: Option<f64>,

    /// Weight of extraction confidence in the blend (default 0.7)
    #[serde(rename = "extractionWeight")]
    pub extraction_weight: Option<f64>,

    /// Weight of retrieval relevance in the blend (default 0.3)
    #[serde(rename = "relevanceWeight")]
    pub relevance_weight: Option<f64>,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmSettings>,
    logging: Option<LoggingSettings>,
    attribution: Option<AttributionOverrides>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LlmSettings {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSettings {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            provider: "ollama".to_string(), // Local-first default
            model: "llama3.2".to_string(),
            endpoint: None,
            api_key: None,
            api_key_env: None,
            log_level: None,
            verbose: false,
            no_color: false,
            attribution: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// Environment variables:
    /// - `SALUS_CONFIG`: Path to config file
    /// - `SALUS_PROVIDER`: LLM provider
    /// - `SALUS_MODEL`: Model identifier
    /// - `SALUS_ENDPOINT`: Provider endpoint
    /// - `SALUS_API_KEY`: API key
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(config_file) = std::env::var("SALUS_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(".salus/config.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override the config file
        if let Ok(provider) = std::env::var("SALUS_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("SALUS_MODEL") {
            config.model = model;
        }

        if let Ok(endpoint) = std::env::var("SALUS_ENDPOINT") {
            config.endpoint = Some(endpoint);
        }

        if let Ok(key) = std::env::var("SALUS_API_KEY") {
            config.api_key = Some(key);
        }

        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(llm) = config_file.llm {
            if let Some(provider) = llm.provider {
                result.provider = provider;
            }
            if let Some(model) = llm.model {
                result.model = model;
            }
            if llm.endpoint.is_some() {
                result.endpoint = llm.endpoint;
            }
            if llm.api_key_env.is_some() {
                result.api_key_env = llm.api_key_env;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if config_file.attribution.is_some() {
            result.attribution = config_file.attribution;
        }

        Ok(result)
    }

    /// Apply CLI overrides, giving flags precedence over everything else.
    pub fn with_overrides(
        mut self,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        endpoint: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if endpoint.is_some() {
            self.endpoint = endpoint;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Resolve the API key for the active provider.
    ///
    /// An explicit `SALUS_API_KEY` wins; otherwise the env var named by
    /// `apiKeyEnv` in the config file is consulted.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }

        if let Some(ref env_var) = self.api_key_env {
            if let Ok(key) = std::env::var(env_var) {
                return Some(key);
            }
        }

        None
    }

    /// Validate configuration for the active provider.
    pub fn validate(&self) -> AppResult<()> {
        let known_providers = ["ollama", "openai"];

        if !known_providers.contains(&self.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                known_providers.join(", ")
            )));
        }

        if self.provider == "openai" && self.resolve_api_key().is_none() {
            return Err(AppError::Config(
                "OpenAI provider requires an API key (SALUS_API_KEY or apiKeyEnv)".to_string(),
            ));
        }

        Ok(())
    }
}
