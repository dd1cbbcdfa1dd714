//! Configuration settings for tubeqa.

use crate::error::{Result, TubeqaError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub gemini: GeminiSettings,
    pub youtube: YoutubeSettings,
    pub chunking: ChunkingSettings,
    pub embedding: EmbeddingSettings,
    pub rag: RagSettings,
    pub export: ExportSettings,
    pub sentiment: SentimentSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for temporary files (subtitle downloads).
    pub temp_dir: String,
    /// Log level used when no -v flag is given (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            temp_dir: "/tmp/tubeqa".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Gemini API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    /// Base URL of the OpenAI-compatible Gemini endpoint.
    pub api_base: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 300,
        }
    }
}

impl GeminiSettings {
    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            Ok(_) => Err(TubeqaError::Config(format!(
                "{} is empty. Please check your .env file.",
                self.api_key_env
            ))),
            Err(_) => Err(TubeqaError::Config(format!(
                "{} is not set. Please check your .env file.",
                self.api_key_env
            ))),
        }
    }
}

/// YouTube transcript settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// Subtitle languages passed to yt-dlp, in preference order.
    pub sub_langs: String,
    /// Maximum video duration to accept (in seconds).
    pub max_duration_seconds: u32,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            sub_langs: "en.*,en".to_string(),
            max_duration_seconds: 14400,
        }
    }
}

/// Transcript chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Maximum characters per chunk.
    pub chunk_size: usize,
    /// Characters of trailing context carried into the next chunk.
    pub chunk_overlap: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding model to use.
    pub model: String,
    /// Output dimensionality (model default when unset).
    pub dimensions: Option<u32>,
    /// Texts per embedding request.
    pub batch_size: usize,
    /// Maximum concurrent embedding requests.
    pub max_concurrent: usize,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: "text-embedding-004".to_string(),
            dimensions: None,
            batch_size: 100,
            max_concurrent: 2,
        }
    }
}

/// Question answering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagSettings {
    /// Chat model for answer generation.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Number of transcript chunks retrieved per question.
    pub top_k: usize,
    /// Boilerplate openings removed from answers.
    pub strip_prefixes: Vec<String>,
}

impl Default for RagSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.2,
            top_k: 4,
            strip_prefixes: vec!["Based on the provided transcript context,".to_string()],
        }
    }
}

/// Transcript export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Characters per line in PDF output.
    pub pdf_line_chars: usize,
    /// Font size in points for PDF output.
    pub pdf_font_size: f32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            pdf_line_chars: 90,
            pdf_font_size: 12.0,
        }
    }
}

/// Sentiment analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentSettings {
    /// Polarity magnitude above which the tone is positive or negative.
    pub tone_threshold: f32,
}

impl Default for SentimentSettings {
    fn default() -> Self {
        Self { tone_threshold: 0.3 }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            settings.validate()?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Reject combinations that cannot work at runtime.
    pub fn validate(&self) -> Result<()> {
        if !matches!(
            self.general.log_level.as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            return Err(TubeqaError::Config(format!(
                "general.log_level must be one of trace, debug, info, warn, error (got {})",
                self.general.log_level
            )));
        }
        if self.chunking.chunk_size == 0 {
            return Err(TubeqaError::Config("chunking.chunk_size must be positive".into()));
        }
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(TubeqaError::Config(format!(
                "chunking.chunk_overlap ({}) must be smaller than chunking.chunk_size ({})",
                self.chunking.chunk_overlap, self.chunking.chunk_size
            )));
        }
        if self.rag.top_k == 0 {
            return Err(TubeqaError::Config("rag.top_k must be positive".into()));
        }
        if self.embedding.batch_size == 0 {
            return Err(TubeqaError::Config("embedding.batch_size must be positive".into()));
        }
        if self.export.pdf_line_chars == 0 {
            return Err(TubeqaError::Config("export.pdf_line_chars must be positive".into()));
        }
        Ok(())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| TubeqaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Return a copy with a dotted key (e.g. `rag.top_k`) set to `value`.
    ///
    /// The value is parsed as a TOML literal when possible (numbers, booleans,
    /// arrays) and falls back to a plain string.
    pub fn with_value(&self, key: &str, value: &str) -> Result<Self> {
        let mut root = toml::Value::try_from(self)
            .map_err(|e| TubeqaError::Config(e.to_string()))?;

        let parts: Vec<&str> = key.split('.').collect();
        let (last, path) = parts
            .split_last()
            .ok_or_else(|| TubeqaError::Config("Empty configuration key".into()))?;

        let mut current = &mut root;
        for part in path {
            current = current
                .get_mut(*part)
                .ok_or_else(|| TubeqaError::Config(format!("Unknown configuration key: {}", key)))?;
        }

        let table = current
            .as_table_mut()
            .ok_or_else(|| TubeqaError::Config(format!("Not a configuration section: {}", key)))?;
        if !table.contains_key(*last) && !is_optional_key(key) {
            return Err(TubeqaError::Config(format!("Unknown configuration key: {}", key)));
        }
        table.insert((*last).to_string(), parse_toml_literal(value));

        let updated: Settings = root
            .try_into()
            .map_err(|e: toml::de::Error| TubeqaError::Config(format!("Invalid value for {}: {}", key, e)))?;
        updated.validate()?;
        Ok(updated)
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tubeqa")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded temp directory path.
    pub fn temp_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.temp_dir)
    }
}

/// Keys that serialize to nothing when unset and so are absent from the table.
fn is_optional_key(key: &str) -> bool {
    matches!(key, "embedding.dimensions" | "prompts.custom_dir")
}

fn parse_toml_literal(value: &str) -> toml::Value {
    let wrapped = format!("v = {}", value);
    match toml::from_str::<toml::Table>(&wrapped) {
        Ok(mut table) => table
            .remove("v")
            .unwrap_or_else(|| toml::Value::String(value.to_string())),
        Err(_) => toml::Value::String(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_qa_pipeline() {
        let settings = Settings::default();
        assert_eq!(settings.chunking.chunk_size, 1000);
        assert_eq!(settings.chunking.chunk_overlap, 200);
        assert_eq!(settings.rag.top_k, 4);
        assert!((settings.rag.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(settings.embedding.model, "text-embedding-004");
        assert_eq!(settings.gemini.api_key_env, "GEMINI_API_KEY");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [rag]
            top_k = 6
            "#,
        )
        .unwrap();
        assert_eq!(settings.rag.top_k, 6);
        assert_eq!(settings.rag.model, "gemini-2.5-flash");
        assert_eq!(settings.chunking.chunk_size, 1000);
    }

    #[test]
    fn test_overlap_must_be_smaller_than_size() {
        let mut settings = Settings::default();
        settings.chunking.chunk_overlap = 1000;
        assert!(matches!(settings.validate(), Err(TubeqaError::Config(_))));
    }

    #[test]
    fn test_log_level_is_validated() {
        let settings = Settings::default();
        let updated = settings.with_value("general.log_level", "debug").unwrap();
        assert_eq!(updated.general.log_level, "debug");

        assert!(settings.with_value("general.log_level", "loud").is_err());
    }

    #[test]
    fn test_removed_data_dir_key_is_unknown() {
        assert!(Settings::default().with_value("general.data_dir", "~/x").is_err());
    }

    #[test]
    fn test_with_value_sets_typed_values() {
        let settings = Settings::default();

        let updated = settings.with_value("rag.top_k", "8").unwrap();
        assert_eq!(updated.rag.top_k, 8);

        let updated = settings.with_value("rag.model", "gemini-2.5-pro").unwrap();
        assert_eq!(updated.rag.model, "gemini-2.5-pro");

        let updated = settings.with_value("embedding.dimensions", "768").unwrap();
        assert_eq!(updated.embedding.dimensions, Some(768));
    }

    #[test]
    fn test_with_value_rejects_unknown_and_invalid() {
        let settings = Settings::default();
        assert!(settings.with_value("rag.nope", "1").is_err());
        assert!(settings.with_value("nope.top_k", "1").is_err());
        assert!(settings.with_value("rag.top_k", "many").is_err());
        assert!(settings.with_value("chunking.chunk_overlap", "5000").is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut settings = Settings::default();
        settings.rag.top_k = 3;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.rag.top_k, 3);
    }
}
