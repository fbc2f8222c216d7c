//! Query preprocessing and validation.
//!
//! Cleans up user questions before they reach retrieval and the LLM:
//! whitespace normalization, special-character stripping, length limits,
//! and a basic screen for injection-style content.

use once_cell::sync::Lazy;
use regex::Regex;
use salus_core::{AppError, AppResult};

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

// Strips punctuation that carries no meaning in a question while keeping
// characters that do: hyphens in medical terms, percentages, dosages.
static SPECIAL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s\-%+./]").expect("special-char regex is valid"));

static HARMFUL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(?:drop|delete|truncate|alter)\s+(?:table|database)\b",
        r"(?i)\b(?:insert|update)\s+into\b",
        r"(?i)\b(?:select|union)\b.+\bfrom\b",
        r"(?i)\b(?:exec|execute|eval)\b",
        r"(?i)\b(?:subprocess|os\.system)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("harmful pattern regex is valid"))
    .collect()
});

/// Preprocessor for user questions.
#[derive(Debug, Clone)]
pub struct QueryProcessor {
    /// Minimum acceptable query length in characters
    pub min_query_length: usize,

    /// Queries longer than this are truncated
    pub max_query_length: usize,
}

impl Default for QueryProcessor {
    fn default() -> Self {
        Self {
            min_query_length: 3,
            max_query_length: 500,
        }
    }
}

impl QueryProcessor {
    /// Validate and clean a user question.
    ///
    /// Trims, enforces the length bounds (truncating over-long input),
    /// collapses whitespace runs, and strips special characters. Questions
    /// that are too short, punctuation-only, or contain injection-style
    /// content are rejected.
    pub fn preprocess(&self, query: &str) -> AppResult<String> {
        let query = query.trim();

        if query.is_empty() {
            return Err(AppError::Query("Query cannot be empty".to_string()));
        }

        if query.chars().count() < self.min_query_length {
            return Err(AppError::Query(format!(
                "Query is too short (minimum {} characters)",
                self.min_query_length
            )));
        }

        for pattern in HARMFUL_PATTERNS.iter() {
            if pattern.is_match(query) {
                return Err(AppError::Query(
                    "Query contains potentially harmful content".to_string(),
                ));
            }
        }

        let mut query: String = query.chars().take(self.max_query_length).collect();

        query = WHITESPACE.replace_all(&query, " ").into_owned();
        query = SPECIAL_CHARS.replace_all(&query, " ").into_owned();
        query = WHITESPACE.replace_all(&query, " ").trim().to_string();

        if query.chars().all(|c| !c.is_alphanumeric()) {
            return Err(AppError::Query(
                "Query cannot consist only of punctuation".to_string(),
            ));
        }

        Ok(query)
    }
}
