//! Configuration structures for the analysis pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PqaError, Result};

/// Main configuration for pqa.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PqaConfig {
    /// Question answering engine configuration.
    pub engine: EngineConfig,

    /// Document loading configuration.
    pub document: DocumentConfig,

    /// Remote document download configuration.
    pub fetch: FetchConfig,
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How many ranked categories the matcher tries per question.
    pub max_categories: usize,

    /// A lower-ranked category is only tried when its classifier score is at
    /// least this fraction of the top score (0.0 - 1.0).
    pub min_retry_score_ratio: f32,

    /// Answer from surrounding text when no rule matches.
    pub enable_fallback: bool,

    /// Maximum length in bytes of a fallback excerpt.
    pub fallback_window: usize,

    /// Confidence reported for fallback answers (0.0 - 1.0).
    pub fallback_confidence: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_categories: 2,
            min_retry_score_ratio: 0.5,
            enable_fallback: true,
            fallback_window: 200,
            fallback_confidence: 0.4,
        }
    }
}

/// Document loading configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Minimum extracted text length to consider a PDF as text-based.
    pub min_text_length: usize,

    /// Largest accepted document in bytes.
    pub max_bytes: usize,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            min_text_length: 20,
            max_bytes: 50 * 1024 * 1024,
        }
    }
}

/// Download configuration for documents given as URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// User-Agent header sent with downloads.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("pqa/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl PqaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Check that values are within their valid ranges.
    pub fn validate(&self) -> Result<()> {
        let engine = &self.engine;
        if engine.max_categories == 0 {
            return Err(PqaError::Config("engine.max_categories must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&engine.min_retry_score_ratio) {
            return Err(PqaError::Config(
                "engine.min_retry_score_ratio must be between 0 and 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&engine.fallback_confidence) {
            return Err(PqaError::Config(
                "engine.fallback_confidence must be between 0 and 1".into(),
            ));
        }
        if engine.fallback_window == 0 {
            return Err(PqaError::Config("engine.fallback_window must be positive".into()));
        }
        if self.document.max_bytes == 0 {
            return Err(PqaError::Config("document.max_bytes must be positive".into()));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(PqaError::Config("fetch.timeout_secs must be positive".into()));
        }
        Ok(())
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
